//! Eyebench adapters - implementations of the core ports against the real
//! world: filesystem image loading, CSV output and the HTTP face-detection
//! service.

mod csv_sink;
mod fs;
mod rekognition;

pub use csv_sink::{read_table, CsvRecordSink};
pub use fs::FsImageSource;
pub use rekognition::HttpFaceDescriber;
