use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::de::DeserializeOwned;

use super::artifact::{Classifier, Scaler, SvmModel, Transformer};
use super::error::{ArtifactKind, WaterError};
use super::features::N_FEATURES;
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Return the first candidate that exists on disk.
pub fn find_first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

/// Resolve one artifact or report every path that was checked.
pub fn resolve(kind: ArtifactKind, candidates: Vec<PathBuf>) -> Result<PathBuf, WaterError> {
    match find_first_existing(&candidates) {
        Some(path) => {
            log::info!("{kind} artifact resolved to {}", path.display());
            Ok(path)
        }
        None => {
            log::error!("{kind} file not found. Checked: {candidates:?}");
            Err(WaterError::MissingArtifact {
                kind,
                checked: candidates,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).context("reading artifact file")?;
    serde_json::from_str(&text).context("parsing artifact JSON")
}

/// Load and validate a scaler artifact.
pub fn load_scaler(path: &Path) -> Result<Scaler> {
    let scaler: Scaler = read_json(path)?;
    scaler.validate().context("invalid scaler parameters")?;
    Ok(scaler)
}

/// Load and validate a classifier artifact.
pub fn load_model(path: &Path) -> Result<SvmModel> {
    let model: SvmModel = read_json(path)?;
    model.validate().context("invalid model parameters")?;
    Ok(model)
}

fn wrap(kind: ArtifactKind, path: &Path) -> impl FnOnce(anyhow::Error) -> WaterError + '_ {
    move |source| {
        log::error!("Error loading {kind} from {}: {source:#}", path.display());
        WaterError::ArtifactLoad {
            kind,
            path: path.to_path_buf(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// The two loaded artifacts and where they came from.
pub struct LoadedArtifacts {
    pub model: Box<dyn Classifier>,
    pub scaler: Box<dyn Transformer>,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("model_path", &self.model_path)
            .field("scaler_path", &self.scaler_path)
            .finish_non_exhaustive()
    }
}

/// Find and load both artifacts.
///
/// Both paths are resolved before anything is parsed, so a missing scaler is
/// reported even when the model file is corrupt.
pub fn load_artifacts(config: &AppConfig) -> Result<LoadedArtifacts, WaterError> {
    let model_path = resolve(ArtifactKind::Model, config.expand(&config.model_candidates))?;
    let scaler_path = resolve(ArtifactKind::Scaler, config.expand(&config.scaler_candidates))?;

    let model = load_model(&model_path).map_err(wrap(ArtifactKind::Model, &model_path))?;
    let scaler = load_scaler(&scaler_path).map_err(wrap(ArtifactKind::Scaler, &scaler_path))?;

    check_widths(Transformer::n_features(&scaler), Classifier::n_features(&model))
        .map_err(wrap(ArtifactKind::Model, &model_path))?;

    log::info!(
        "Model and scaler loaded successfully ({} / {})",
        model_path.display(),
        scaler_path.display()
    );

    Ok(LoadedArtifacts {
        model: Box::new(model),
        scaler: Box::new(scaler),
        model_path,
        scaler_path,
    })
}

fn check_widths(scaler: usize, model: usize) -> Result<()> {
    ensure!(
        scaler == N_FEATURES,
        "scaler expects {scaler} features, the form provides {N_FEATURES}"
    );
    ensure!(
        model == scaler,
        "model expects {model} features but scaler produces {scaler}"
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    pub(crate) const MODEL_JSON: &str = r#"{
        "kind": "linear_svm",
        "classes": [0, 1],
        "coef": [0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.2],
        "intercept": 0.0
    }"#;

    pub(crate) const SCALER_JSON: &str = r#"{
        "kind": "standard",
        "mean": [7.0, 196.0, 22000.0, 7.1, 333.0, 426.0, 14.3, 66.4, 3.97],
        "scale": [1.5, 32.9, 8768.0, 1.58, 41.4, 80.8, 3.3, 16.2, 0.78]
    }"#;

    fn config_for(dir: &Path) -> AppConfig {
        AppConfig::with_base_dirs(vec![dir.to_path_buf()])
    }

    fn write(dir: &Path, rel: &str, text: &str) {
        let p = dir.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, text).unwrap();
    }

    #[test]
    fn loads_from_models_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "models/svm.json", MODEL_JSON);
        write(dir.path(), "models/scaler.json", SCALER_JSON);

        let loaded = load_artifacts(&config_for(dir.path())).unwrap();
        assert_eq!(loaded.model_path, dir.path().join("models/svm.json"));
        assert_eq!(loaded.scaler_path, dir.path().join("models/scaler.json"));
        assert_eq!(loaded.model.classes(), &[0, 1]);
        assert_eq!(loaded.scaler.n_features(), N_FEATURES);
    }

    #[test]
    fn base_directory_file_wins_over_models_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "svm.json", MODEL_JSON);
        write(dir.path(), "models/svm.json", "not json");
        write(dir.path(), "scaler.json", SCALER_JSON);

        let loaded = load_artifacts(&config_for(dir.path())).unwrap();
        assert_eq!(loaded.model_path, dir.path().join("svm.json"));
    }

    #[test]
    fn missing_everything_reports_model_first() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifacts(&config_for(dir.path())).unwrap_err();
        match err {
            WaterError::MissingArtifact { kind, checked } => {
                assert_eq!(kind, ArtifactKind::Model);
                assert_eq!(checked.len(), 2);
            }
            other => panic!("expected MissingArtifact, got {other:?}"),
        }
    }

    #[test]
    fn missing_scaler_is_reported_even_with_bad_model() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "svm.json", "{ broken");
        let err = load_artifacts(&config_for(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            WaterError::MissingArtifact {
                kind: ArtifactKind::Scaler,
                ..
            }
        ));
    }

    #[test]
    fn corrupt_model_surfaces_cause() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "svm.json", "{ broken");
        write(dir.path(), "scaler.json", SCALER_JSON);
        let err = load_artifacts(&config_for(dir.path())).unwrap_err();
        assert!(err.is_fatal());
        let msg = err.to_string();
        assert!(msg.contains("Error loading Model"), "{msg}");
        assert!(msg.contains("parsing artifact JSON"), "{msg}");
    }

    #[test]
    fn width_mismatch_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "svm.json",
            r#"{"kind":"linear_svm","classes":[0,1],"coef":[1.0,1.0],"intercept":0.0}"#,
        );
        write(dir.path(), "scaler.json", SCALER_JSON);
        let err = load_artifacts(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, WaterError::ArtifactLoad { .. }));
        assert!(err.to_string().contains("model expects 2 features"));
    }

    #[test]
    fn directories_are_not_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("svm.json")).unwrap();
        assert_eq!(find_first_existing(&[dir.path().join("svm.json")]), None);
    }
}
