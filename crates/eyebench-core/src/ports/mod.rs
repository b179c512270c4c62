//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external
//! adapters (filesystem, detection service, CSV output, progress UI).

mod face_describer;
mod image_source;
mod progress;
mod record_sink;

pub use face_describer::{DescribeError, FaceDescriber};
pub use image_source::{ImageSource, LoadedImage};
pub use progress::{ProgressEvent, ProgressSink};
pub use record_sink::RecordSink;
