//! Face detection port.

use crate::domain::FaceDescription;

/// Why a detection request did not produce a usable face description.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    /// The service answered cleanly but found zero or more than one face.
    /// The caller must discard the whole current image across all remaining
    /// blur levels.
    #[error("detection found zero or multiple faces")]
    NoFaceOrAmbiguous,
    /// The service itself failed: transport, auth, quota or a malformed
    /// response. Kept separate from the ambiguous case so batch policy can
    /// differ.
    #[error("detection service failure")]
    Service(#[source] anyhow::Error),
}

/// Port for the external face-detection service.
///
/// One call per blur variant; this is the pipeline's dominant cost and it is
/// never retried here.
pub trait FaceDescriber: Send + Sync {
    /// Detects faces in an encoded (JPEG) image and returns the single
    /// face's landmarks and quality score.
    ///
    /// # Errors
    ///
    /// `NoFaceOrAmbiguous` when the face count is not exactly one,
    /// `Service` for any failure of the service itself.
    fn describe(&self, jpeg_bytes: &[u8]) -> Result<FaceDescription, DescribeError>;
}
