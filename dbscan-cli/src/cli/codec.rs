//! JSON encoding of the clustering call.
//!
//! A request document carries the algorithm selector, the density parameters,
//! and the points; each point is either a bare coordinate array or an object
//! with a `vec` field. The response document carries the labels and the
//! cluster count.

use std::io::{Read, Write};

use dbscan_core::{
    Algorithm, ClusterRequest, ClusterResponse, DEFAULT_LEAF_SIZE, DEFAULT_WORKERS, DbscanError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while decoding or encoding documents.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input was not a well-formed request document.
    #[error("malformed request document: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The document was well-formed but named an invalid setting.
    #[error(transparent)]
    Request(#[from] DbscanError),
    /// The response could not be written.
    #[error("failed to write response document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    /// Returns a stable machine-readable code for this failure.
    ///
    /// Request errors report the code of the underlying [`DbscanError`].
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "CODEC_MALFORMED",
            Self::Request(error) => error.code().as_str(),
            Self::Encode(_) => "CODEC_ENCODE",
        }
    }
}

/// Wire form of a single point.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PointDocument {
    /// `[x, y, ...]`
    Bare(Vec<f64>),
    /// `{"vec": [x, y, ...]}`, also accepted with the key spelled `Vec`.
    Tagged {
        /// Coordinates of the point.
        #[serde(alias = "Vec")]
        vec: Vec<f64>,
    },
}

impl PointDocument {
    fn into_coordinates(self) -> Vec<f64> {
        match self {
            Self::Bare(vec) | Self::Tagged { vec } => vec,
        }
    }
}

/// Wire form of a clustering request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RequestDocument {
    /// `"brute"` or `"kd_tree"`.
    pub algorithm: String,
    /// Inclusive neighbourhood radius.
    pub epsilon: f64,
    /// Density threshold, counting the point itself.
    pub min_points: usize,
    /// k-d tree leaf size; defaults when absent.
    #[serde(default)]
    pub leaf_size: Option<usize>,
    /// Precompute worker count; defaults to one when absent.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Input points.
    pub points: Vec<PointDocument>,
}

impl TryFrom<RequestDocument> for ClusterRequest {
    type Error = CodecError;

    fn try_from(document: RequestDocument) -> Result<Self, Self::Error> {
        let algorithm = document.algorithm.parse::<Algorithm>()?;
        Ok(Self::new(algorithm, document.epsilon, document.min_points)
            .with_leaf_size(document.leaf_size.unwrap_or(DEFAULT_LEAF_SIZE))
            .with_workers(document.workers.unwrap_or(DEFAULT_WORKERS))
            .with_points(
                document
                    .points
                    .into_iter()
                    .map(PointDocument::into_coordinates)
                    .collect(),
            ))
    }
}

/// Wire form of a clustering response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseDocument {
    /// One label per input point: `-1` for noise, `k >= 1` for cluster `k`.
    pub labels: Vec<i64>,
    /// Number of clusters produced.
    pub clusters: usize,
}

impl From<&ClusterResponse> for ResponseDocument {
    fn from(response: &ClusterResponse) -> Self {
        Self {
            labels: response.labels.clone(),
            clusters: response.clusters,
        }
    }
}

/// Decodes a request document from `reader`.
///
/// # Errors
/// Returns [`CodecError::Malformed`] for invalid JSON or a document missing
/// required fields, and [`CodecError::Request`] for an unknown algorithm.
///
/// # Examples
/// ```
/// use dbscan_cli::cli::decode_request;
/// use dbscan_core::Algorithm;
///
/// let raw = r#"{"algorithm":"kd_tree","epsilon":1.0,"min_points":2,
///               "points":[[0.0,0.0],{"vec":[1.0,0.0]}]}"#;
/// let request = decode_request(raw.as_bytes())?;
/// assert_eq!(request.algorithm, Algorithm::KdTree);
/// assert_eq!(request.workers, 1);
/// assert_eq!(request.points, vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
/// # Ok::<(), dbscan_cli::cli::CodecError>(())
/// ```
pub fn decode_request(reader: impl Read) -> Result<ClusterRequest, CodecError> {
    let document: RequestDocument =
        serde_json::from_reader(reader).map_err(CodecError::Malformed)?;
    ClusterRequest::try_from(document)
}

/// Writes `response` as a single-line JSON document followed by a newline.
///
/// # Errors
/// Returns [`CodecError::Encode`] when serialisation or the write fails.
pub fn encode_response(
    response: &ClusterResponse,
    mut writer: impl Write,
) -> Result<(), CodecError> {
    serde_json::to_writer(&mut writer, &ResponseDocument::from(response))
        .map_err(CodecError::Encode)?;
    writer
        .write_all(b"\n")
        .map_err(|error| CodecError::Encode(serde_json::Error::io(error)))
}
