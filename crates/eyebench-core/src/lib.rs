//! Eyebench Core - Domain logic for the eye-region sharpness benchmark
//!
//! This crate contains the domain types, the port traits for external
//! collaborators (image source, face-detection service, record sink), the
//! collection pipeline and the four sharpness metric implementations.

pub mod dataset;
pub mod domain;
pub mod metrics;
pub mod pipeline;
pub mod ports;

pub use dataset::{validate_header, Dataset, SeriesBuckets};
pub use domain::{
    metric_series, CollectConfig, EyePair, FaceDescription, FailureMode, Landmark, LandmarkKind,
    MetricSample, MetricSeries, SharpnessRecord, EXPECTED_HEADER,
};
pub use metrics::GrayPatch;
pub use pipeline::{collect, CollectStats};
pub use ports::{
    DescribeError, FaceDescriber, ImageSource, LoadedImage, ProgressEvent, ProgressSink,
    RecordSink,
};
