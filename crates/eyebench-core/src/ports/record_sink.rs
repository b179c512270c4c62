//! Output port for committed measurement rows.

use crate::domain::SharpnessRecord;

/// Port for writing measurement rows.
///
/// The pipeline buffers rows per image and calls `commit` only when every
/// blur level succeeded, so a sink never sees a partial image.
pub trait RecordSink: Send + Sync {
    /// Writes a complete per-image batch of rows, in blur-ladder order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn commit(&self, records: &[SharpnessRecord]) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
