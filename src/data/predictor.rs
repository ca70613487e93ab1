use std::path::PathBuf;

use super::artifact::{Classifier, Transformer};
use super::error::{InferenceError, WaterError};
use super::features::FeatureVector;
use super::loader::{LoadedArtifacts, load_artifacts};
use super::mapping::{ClassMapping, Verdict};
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// InferenceContext – everything a prediction needs, loaded once
// ---------------------------------------------------------------------------

/// Immutable inference state built at startup and passed to [`predict`].
pub struct InferenceContext {
    scaler: Box<dyn Transformer>,
    model: Box<dyn Classifier>,
    mapping: ClassMapping,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl InferenceContext {
    /// Load artifacts and derive the class mapping. Every error returned here
    /// is fatal.
    pub fn load(config: &AppConfig) -> Result<Self, WaterError> {
        let loaded = load_artifacts(config)?;
        Self::from_artifacts(loaded)
    }

    pub fn from_artifacts(loaded: LoadedArtifacts) -> Result<Self, WaterError> {
        let mapping = ClassMapping::from_classifier(loaded.model.as_ref()).inspect_err(|e| {
            log::error!("{e}");
        })?;
        log::debug!("class mapping: {:?}", mapping.iter().collect::<Vec<_>>());
        Ok(Self {
            scaler: loaded.scaler,
            model: loaded.model,
            mapping,
            model_path: loaded.model_path,
            scaler_path: loaded.scaler_path,
        })
    }

    /// Build a context directly from in-memory capabilities.
    pub fn new(
        scaler: Box<dyn Transformer>,
        model: Box<dyn Classifier>,
    ) -> Result<Self, WaterError> {
        Self::from_artifacts(LoadedArtifacts {
            model,
            scaler,
            model_path: PathBuf::new(),
            scaler_path: PathBuf::new(),
        })
    }

    pub fn mapping(&self) -> &ClassMapping {
        &self.mapping
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Outcome of one successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub verdict: Verdict,
    pub raw_input: FeatureVector,
    pub scaled_input: Vec<f64>,
    pub label: i64,
}

/// Scale, classify and map one row.
pub fn predict(ctx: &InferenceContext, input: &FeatureVector) -> Result<Prediction, WaterError> {
    predict_row(ctx, input.as_slice()).map(|(verdict, scaled_input, label)| Prediction {
        verdict,
        raw_input: *input,
        scaled_input,
        label,
    })
}

fn run(ctx: &InferenceContext, row: &[f64]) -> Result<(Verdict, Vec<f64>, i64), InferenceError> {
    let scaled = ctx.scaler.transform(row)?;
    let label = ctx.model.predict(&scaled)?;
    let verdict = ctx
        .mapping
        .verdict(label)
        .ok_or(InferenceError::UnknownLabel(label))?;
    Ok((verdict, scaled, label))
}

/// Row-level form of [`predict`]; accepts any width so a mismatched input
/// surfaces as a prediction failure instead of a type error.
pub fn predict_row(
    ctx: &InferenceContext,
    row: &[f64],
) -> Result<(Verdict, Vec<f64>, i64), WaterError> {
    match run(ctx, row) {
        Ok(out) => {
            log::debug!("predicted label {} ({}) for {row:?}", out.2, out.0);
            Ok(out)
        }
        Err(e) => {
            log::error!("Error during prediction: {e}");
            Err(e.into())
        }
    }
}
