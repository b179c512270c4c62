//! HTTP adapter for the face-detection service.
//!
//! Speaks the Rekognition `DetectFaces` wire contract: a JSON request with
//! base64 image bytes and an attribute selector, a JSON response with zero
//! or more face details each carrying named landmarks in normalized
//! coordinates and a quality block with a sharpness score.
//!
//! The endpoint is configurable so the collector can target either the real
//! service (behind a signing proxy) or a local emulator; request signing is
//! deliberately out of scope here. Calls are blocking and never retried.

use anyhow::{anyhow, Context};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use eyebench_core::{DescribeError, FaceDescriber, FaceDescription, Landmark, LandmarkKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const TARGET_HEADER: &str = "RekognitionService.DetectFaces";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct DetectFacesRequest {
    #[serde(rename = "Image")]
    image: ImagePayload,
    #[serde(rename = "Attributes")]
    attributes: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ImagePayload {
    #[serde(rename = "Bytes")]
    bytes: String,
}

#[derive(Debug, Deserialize)]
struct DetectFacesResponse {
    #[serde(rename = "FaceDetails", default)]
    face_details: Vec<FaceDetail>,
}

#[derive(Debug, Deserialize)]
struct FaceDetail {
    #[serde(rename = "Landmarks", default)]
    landmarks: Vec<WireLandmark>,
    #[serde(rename = "Quality")]
    quality: Quality,
}

#[derive(Debug, Deserialize)]
struct WireLandmark {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
}

#[derive(Debug, Deserialize)]
struct Quality {
    #[serde(rename = "Sharpness")]
    sharpness: f64,
}

/// Blocking HTTP implementation of `FaceDescriber`.
pub struct HttpFaceDescriber {
    endpoint: String,
    headers: Vec<(String, String)>,
    client: reqwest::blocking::Client,
}

impl HttpFaceDescriber {
    /// Creates a describer targeting the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            client,
        })
    }

    /// Adds an extra request header, for auth tokens the endpoint requires.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl FaceDescriber for HttpFaceDescriber {
    fn describe(&self, jpeg_bytes: &[u8]) -> Result<FaceDescription, DescribeError> {
        let request = DetectFacesRequest {
            image: ImagePayload {
                bytes: BASE64.encode(jpeg_bytes),
            },
            attributes: vec!["DEFAULT"],
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("X-Amz-Target", TARGET_HEADER)
            .header("Content-Type", CONTENT_TYPE)
            .json(&request);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .map_err(|e| DescribeError::Service(anyhow!(e).context("detection request failed")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DescribeError::Service(anyhow!(
                "detection service returned {status}: {body}"
            )));
        }

        let parsed: DetectFacesResponse = response
            .json()
            .map_err(|e| DescribeError::Service(anyhow!(e).context("malformed detection response")))?;

        debug!("detection returned {} face(s)", parsed.face_details.len());
        single_face(parsed)
    }
}

/// Enforces the exactly-one-face contract and converts the wire face into
/// the domain description.
fn single_face(response: DetectFacesResponse) -> Result<FaceDescription, DescribeError> {
    let mut faces = response.face_details;
    if faces.len() != 1 {
        return Err(DescribeError::NoFaceOrAmbiguous);
    }
    let face = faces.remove(0);

    let landmarks = face
        .landmarks
        .into_iter()
        .map(|l| Landmark {
            kind: match l.kind.as_str() {
                "eyeLeft" => LandmarkKind::EyeLeft,
                "eyeRight" => LandmarkKind::EyeRight,
                _ => LandmarkKind::Other,
            },
            x: l.x,
            y: l.y,
        })
        .collect();

    Ok(FaceDescription {
        sharpness: face.quality.sharpness,
        landmarks,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn response(json: &str) -> DetectFacesResponse {
        serde_json::from_str(json).unwrap()
    }

    const ONE_FACE: &str = r#"{
        "FaceDetails": [{
            "Landmarks": [
                {"Type": "eyeLeft", "X": 0.31, "Y": 0.41},
                {"Type": "eyeRight", "X": 0.62, "Y": 0.4},
                {"Type": "nose", "X": 0.47, "Y": 0.55}
            ],
            "Quality": {"Brightness": 71.2, "Sharpness": 86.9}
        }]
    }"#;

    #[test]
    fn test_single_face_parsed() {
        let face = single_face(response(ONE_FACE)).unwrap();
        assert!((face.sharpness - 86.9).abs() < 1e-12);
        assert_eq!(face.landmarks.len(), 3);

        let left = face.landmark(LandmarkKind::EyeLeft).unwrap();
        assert!((left.x - 0.31).abs() < 1e-12);
        assert!((left.y - 0.41).abs() < 1e-12);
        // Unused landmark kinds are kept but tagged Other.
        assert_eq!(face.landmarks[2].kind, LandmarkKind::Other);
    }

    #[test]
    fn test_zero_faces_is_ambiguous() {
        let result = single_face(response(r#"{"FaceDetails": []}"#));
        assert!(matches!(result, Err(DescribeError::NoFaceOrAmbiguous)));
    }

    #[test]
    fn test_missing_face_details_is_ambiguous() {
        let result = single_face(response("{}"));
        assert!(matches!(result, Err(DescribeError::NoFaceOrAmbiguous)));
    }

    #[test]
    fn test_two_faces_is_ambiguous() {
        let two = r#"{
            "FaceDetails": [
                {"Landmarks": [], "Quality": {"Sharpness": 10.0}},
                {"Landmarks": [], "Quality": {"Sharpness": 20.0}}
            ]
        }"#;
        let result = single_face(response(two));
        assert!(matches!(result, Err(DescribeError::NoFaceOrAmbiguous)));
    }

    #[test]
    fn test_request_serializes_wire_shape() {
        let request = DetectFacesRequest {
            image: ImagePayload {
                bytes: BASE64.encode(b"jpeg"),
            },
            attributes: vec!["DEFAULT"],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Attributes"][0], "DEFAULT");
        assert_eq!(json["Image"]["Bytes"], BASE64.encode(b"jpeg"));
    }
}
