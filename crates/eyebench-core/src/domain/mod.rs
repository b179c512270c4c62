//! Domain types shared across the collector and the visualizer.

mod config;
mod face;
mod record;
mod series;

pub use config::{CollectConfig, FailureMode};
pub use face::{EyePair, FaceDescription, Landmark, LandmarkKind};
pub use record::{MetricSample, SharpnessRecord, EXPECTED_HEADER};
pub use series::{metric_series, MetricSeries};
