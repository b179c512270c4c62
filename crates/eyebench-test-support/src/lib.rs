//! Test support for eyebench.
//!
//! Synthetic image builders and mock implementations of the core ports,
//! shared by unit and integration tests across the workspace.

mod builders;
mod mocks;

pub use builders::{fixed_face, textured_portrait, EYE_LEFT_NORM, EYE_RIGHT_NORM};
pub use mocks::{
    MockFaceDescriber, MockImageSource, MockProgressSink, MockRecordSink, ScriptedResponse,
};
