//! The per-(image, blur level) measurement row and its CSV column contract.

use serde::{Deserialize, Serialize};

/// Fixed column order of the output table. The writer emits exactly this
/// header and the reshaper refuses tables that do not match it.
pub const EXPECTED_HEADER: [&str; 19] = [
    "File",
    "BlurStdDev",
    "ReferenceSharpness",
    "VoL_Left",
    "VoL_Right",
    "VoL_Mean",
    "VoL_Time",
    "PBM_Left",
    "PBM_Right",
    "PBM_Mean",
    "PBM_Time",
    "TV_Left",
    "TV_Right",
    "TV_Mean",
    "TV_Time",
    "WCV_Left",
    "WCV_Right",
    "WCV_Mean",
    "WCV_Time",
];

/// One measurement row: source file, blur sigma, the service's reference
/// sharpness, and for each local metric the left/right eye values, their mean
/// and the combined left+right computation time in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpnessRecord {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "BlurStdDev")]
    pub blur_std_dev: f64,
    #[serde(rename = "ReferenceSharpness")]
    pub reference_sharpness: f64,

    #[serde(rename = "VoL_Left")]
    pub vol_left: f64,
    #[serde(rename = "VoL_Right")]
    pub vol_right: f64,
    #[serde(rename = "VoL_Mean")]
    pub vol_mean: f64,
    #[serde(rename = "VoL_Time")]
    pub vol_time: f64,

    #[serde(rename = "PBM_Left")]
    pub pbm_left: f64,
    #[serde(rename = "PBM_Right")]
    pub pbm_right: f64,
    #[serde(rename = "PBM_Mean")]
    pub pbm_mean: f64,
    #[serde(rename = "PBM_Time")]
    pub pbm_time: f64,

    #[serde(rename = "TV_Left")]
    pub tv_left: f64,
    #[serde(rename = "TV_Right")]
    pub tv_right: f64,
    #[serde(rename = "TV_Mean")]
    pub tv_mean: f64,
    #[serde(rename = "TV_Time")]
    pub tv_time: f64,

    #[serde(rename = "WCV_Left")]
    pub wcv_left: f64,
    #[serde(rename = "WCV_Right")]
    pub wcv_right: f64,
    #[serde(rename = "WCV_Mean")]
    pub wcv_mean: f64,
    #[serde(rename = "WCV_Time")]
    pub wcv_time: f64,
}

/// Left/right values plus timing for one metric, produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub left: f64,
    pub right: f64,
    /// Combined left+right wall-clock seconds.
    pub seconds: f64,
}

impl MetricSample {
    /// Mean of the left and right eye values.
    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}
