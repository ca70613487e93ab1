use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Which of the two artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Scaler,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "Model"),
            ArtifactKind::Scaler => write!(f, "Scaler"),
        }
    }
}

/// Every failure the checker can report.
///
/// The first three variants happen while building the inference context and
/// are fatal: the form is never shown. [`WaterError::Prediction`] is scoped to
/// a single submission and the form stays usable.
#[derive(Debug, Error)]
pub enum WaterError {
    #[error("{kind} file not found. Checked: {checked:?}")]
    MissingArtifact {
        kind: ArtifactKind,
        checked: Vec<PathBuf>,
    },

    #[error("Error loading {kind} from {}: {source:#}", .path.display())]
    ArtifactLoad {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error mapping classes: expected 2 distinct labels, model exposes {labels:?}")]
    MappingShape { labels: Vec<i64> },

    #[error("Error during prediction: {0}")]
    Prediction(String),
}

impl WaterError {
    /// Whether the error must stop the app before the form is reachable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WaterError::Prediction(_))
    }
}

/// Failure raised by a [`Transformer`](super::artifact::Transformer) or
/// [`Classifier`](super::artifact::Classifier) on a single input row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("X has {got} features, but the artifact is expecting {expected} features as input")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("non-finite value {value} at feature {index}")]
    NonFinite { index: usize, value: f64 },

    #[error("decision value overflowed to {0}")]
    NonFiniteDecision(f64),

    #[error("label {0} is not in the class mapping")]
    UnknownLabel(i64),
}

impl From<InferenceError> for WaterError {
    fn from(e: InferenceError) -> Self {
        WaterError::Prediction(e.to_string())
    }
}
