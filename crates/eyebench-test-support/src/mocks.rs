//! Mock implementations of core port traits.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use eyebench_core::{
    DescribeError, FaceDescriber, FaceDescription, ImageSource, LoadedImage, ProgressEvent,
    ProgressSink, RecordSink, SharpnessRecord,
};

/// Mock implementation of `ImageSource` yielding pre-built images.
pub struct MockImageSource {
    images: Vec<LoadedImage>,
}

impl MockImageSource {
    /// Creates a new mock source with the given named images.
    #[must_use]
    pub fn new(images: Vec<(&str, image::DynamicImage)>) -> Self {
        Self {
            images: images
                .into_iter()
                .map(|(name, image)| LoadedImage {
                    name: name.to_owned(),
                    image,
                })
                .collect(),
        }
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<LoadedImage>> + Send + '_> {
        Box::new(self.images.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// A scripted answer for one `describe` call.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return this face description.
    Face(FaceDescription),
    /// Signal zero-or-multiple faces.
    NoFace,
    /// Signal a service failure with the given message.
    ServiceError(String),
}

/// Mock implementation of `FaceDescriber`.
///
/// Serves scripted responses in order, falling back to a fixed response
/// when the script runs out. Tracks the number of calls.
pub struct MockFaceDescriber {
    script: Mutex<VecDeque<ScriptedResponse>>,
    fallback: ScriptedResponse,
    calls: Arc<Mutex<usize>>,
}

impl MockFaceDescriber {
    /// A describer that always answers with the same response.
    #[must_use]
    pub fn always(fallback: ScriptedResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// A describer that serves `script` in order, then `fallback`.
    #[must_use]
    pub fn scripted(script: Vec<ScriptedResponse>, fallback: ScriptedResponse) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of `describe` calls so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceDescriber for MockFaceDescriber {
    fn describe(&self, _jpeg_bytes: &[u8]) -> Result<FaceDescription, DescribeError> {
        if let Ok(mut c) = self.calls.lock() {
            *c += 1;
        }
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match next {
            ScriptedResponse::Face(face) => Ok(face),
            ScriptedResponse::NoFace => Err(DescribeError::NoFaceOrAmbiguous),
            ScriptedResponse::ServiceError(msg) => {
                Err(DescribeError::Service(anyhow::anyhow!(msg)))
            }
        }
    }
}

/// Mock implementation of `RecordSink` capturing committed batches.
#[derive(Default)]
pub struct MockRecordSink {
    commits: Arc<Mutex<Vec<Vec<SharpnessRecord>>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockRecordSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed batches, one per image.
    #[must_use]
    pub fn commits(&self) -> Vec<Vec<SharpnessRecord>> {
        self.commits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns all committed rows flattened in write order.
    #[must_use]
    pub fn rows(&self) -> Vec<SharpnessRecord> {
        self.commits().into_iter().flatten().collect()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordSink for MockRecordSink {
    fn commit(&self, records: &[SharpnessRecord]) -> anyhow::Result<()> {
        self.commits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(records.to_vec());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` capturing events.
#[derive(Default)]
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the reasons of all `Skipped` events.
    #[must_use]
    pub fn skip_reasons(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Skipped { reason, .. } => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { committed, skipped } => Some((*committed, *skipped)),
            _ => None,
        })
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
