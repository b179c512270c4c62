//! Progress reporting port for UI integration.

/// Events emitted during collection for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Collection started for an image.
    Started {
        /// Name of the image.
        name: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// All blur levels succeeded and the image's rows were committed.
    Committed {
        /// Name of the image.
        name: String,
        /// Number of rows written.
        rows: usize,
    },
    /// An image was discarded, with no rows written.
    Skipped {
        /// Name of the image.
        name: String,
        /// Reason for discarding.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Images whose rows were committed.
        committed: usize,
        /// Images discarded.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
