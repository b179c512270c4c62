//! CSV output adapter.
//!
//! One row per (image, blur level), fixed 19-column schema, non-numeric
//! fields quoted, floats written without precision loss. The pipeline only
//! hands over complete per-image batches, so a reader never sees a partial
//! image as long as it reads through this module's schema validation.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use eyebench_core::{validate_header, RecordSink, SharpnessRecord};

/// CSV record sink adapter.
pub struct CsvRecordSink {
    writer: Mutex<csv::Writer<File>>,
}

impl CsvRecordSink {
    /// Creates (truncates) the output file. The header row is emitted with
    /// the first committed batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::NonNumeric)
            .from_writer(file);
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }
}

impl RecordSink for CsvRecordSink {
    #[allow(clippy::significant_drop_tightening)]
    fn commit(&self, records: &[SharpnessRecord]) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        for record in records {
            writer.serialize(record)?;
        }
        // Push the whole batch to disk so a later crash cannot leave a
        // partially buffered image in memory.
        writer.flush()?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

/// Reads a results table back, validating the header against the column
/// contract.
///
/// # Errors
///
/// Fails on I/O errors, a mismatched header or malformed rows.
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<SharpnessRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let header: Vec<String> = reader
        .headers()
        .context("failed to read CSV header")?
        .iter()
        .map(ToOwned::to_owned)
        .collect();
    validate_header(&header).with_context(|| format!("{} is not a results table", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row.context("malformed results row")?);
    }
    Ok(records)
}
