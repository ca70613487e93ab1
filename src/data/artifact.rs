use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

use super::error::InferenceError;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A fitted feature transform: raw row → normalized row of the same width.
pub trait Transformer {
    /// Width of the rows this transform was fitted on.
    fn n_features(&self) -> usize;

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// A fitted binary decision function over normalized rows.
pub trait Classifier {
    /// Known labels in index order.
    fn classes(&self) -> &[i64];

    fn n_features(&self) -> usize;

    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError>;
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::DimensionMismatch {
            expected,
            got: row.len(),
        });
    }
    Ok(())
}

fn check_finite(row: &[f64]) -> Result<(), InferenceError> {
    match row.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InferenceError::NonFinite {
            index,
            value: row[index],
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Scaler artifacts
// ---------------------------------------------------------------------------

/// On-disk scaler, tagged by `"kind"`.
///
/// ```json
/// { "kind": "standard", "mean": [7.08, 196.4, ...], "scale": [1.47, 32.9, ...] }
/// { "kind": "min_max", "data_min": [...], "data_max": [...], "feature_range": [0.0, 1.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "unit_range")]
        feature_range: (f64, f64),
    },
}

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Zero spans come from constant training columns; treat them as 1.
fn nonzero(span: f64) -> f64 {
    if span == 0.0 { 1.0 } else { span }
}

impl Scaler {
    /// Reject parameter vectors that cannot describe one fitted transform.
    pub fn validate(&self) -> Result<()> {
        match self {
            Scaler::Standard { mean, scale } => {
                ensure!(!mean.is_empty(), "scaler has no features");
                ensure!(
                    mean.len() == scale.len(),
                    "mean has {} entries but scale has {}",
                    mean.len(),
                    scale.len()
                );
            }
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                ensure!(!data_min.is_empty(), "scaler has no features");
                ensure!(
                    data_min.len() == data_max.len(),
                    "data_min has {} entries but data_max has {}",
                    data_min.len(),
                    data_max.len()
                );
                if lo >= hi {
                    bail!("feature_range ({lo}, {hi}) is empty");
                }
            }
        }
        Ok(())
    }
}

impl Transformer for Scaler {
    fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { data_min, .. } => data_min.len(),
        }
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.n_features(), row)?;
        check_finite(row)?;
        let out = match self {
            Scaler::Standard { mean, scale } => row
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(&x, (&m, &s))| (x - m) / nonzero(s))
                .collect(),
            Scaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => row
                .iter()
                .zip(data_min.iter().zip(data_max))
                .map(|(&x, (&min, &max))| lo + (x - min) * (hi - lo) / nonzero(max - min))
                .collect(),
        };
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Classifier artifacts
// ---------------------------------------------------------------------------

/// On-disk binary SVM, tagged by `"kind"`.
///
/// Decision value `d > 0` selects `classes[1]`, otherwise `classes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SvmModel {
    /// `d = coef · z + intercept`
    LinearSvm {
        classes: Vec<i64>,
        coef: Vec<f64>,
        intercept: f64,
    },
    /// `d = Σ dual_coef[i] · exp(-gamma · |z - sv[i]|²) + intercept`
    RbfSvm {
        classes: Vec<i64>,
        gamma: f64,
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        intercept: f64,
    },
}

impl SvmModel {
    /// Reject internally inconsistent models. Label-set shape is checked
    /// separately by the class mapper.
    pub fn validate(&self) -> Result<()> {
        match self {
            SvmModel::LinearSvm { coef, .. } => {
                ensure!(!coef.is_empty(), "model has no coefficients");
            }
            SvmModel::RbfSvm {
                gamma,
                support_vectors,
                dual_coef,
                ..
            } => {
                ensure!(!support_vectors.is_empty(), "model has no support vectors");
                ensure!(
                    support_vectors.len() == dual_coef.len(),
                    "{} support vectors but {} dual coefficients",
                    support_vectors.len(),
                    dual_coef.len()
                );
                let width = support_vectors[0].len();
                ensure!(width > 0, "support vectors are empty");
                if let Some(i) = support_vectors.iter().position(|sv| sv.len() != width) {
                    bail!(
                        "support vector {i} has {} features, expected {width}",
                        support_vectors[i].len()
                    );
                }
                ensure!(*gamma > 0.0, "gamma must be positive, got {gamma}");
            }
        }
        Ok(())
    }

    /// Signed distance to the separating surface.
    pub fn decision_function(&self, row: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.n_features(), row)?;
        check_finite(row)?;
        let d = match self {
            SvmModel::LinearSvm {
                coef, intercept, ..
            } => coef.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + intercept,
            SvmModel::RbfSvm {
                gamma,
                support_vectors,
                dual_coef,
                intercept,
                ..
            } => {
                let kernel_sum: f64 = support_vectors
                    .iter()
                    .zip(dual_coef)
                    .map(|(sv, alpha)| {
                        let sq_dist: f64 =
                            sv.iter().zip(row).map(|(s, x)| (x - s) * (x - s)).sum();
                        alpha * (-gamma * sq_dist).exp()
                    })
                    .sum();
                kernel_sum + intercept
            }
        };
        if !d.is_finite() {
            return Err(InferenceError::NonFiniteDecision(d));
        }
        Ok(d)
    }
}

impl Classifier for SvmModel {
    fn classes(&self) -> &[i64] {
        match self {
            SvmModel::LinearSvm { classes, .. } | SvmModel::RbfSvm { classes, .. } => classes,
        }
    }

    fn n_features(&self) -> usize {
        match self {
            SvmModel::LinearSvm { coef, .. } => coef.len(),
            SvmModel::RbfSvm {
                support_vectors, ..
            } => support_vectors.first().map_or(0, Vec::len),
        }
    }

    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError> {
        let d = self.decision_function(row)?;
        let idx = usize::from(d > 0.0);
        // An unvalidated label set may be shorter than two; report it as a
        // label outside the mapping rather than indexing out of bounds.
        self.classes()
            .get(idx)
            .copied()
            .ok_or(InferenceError::UnknownLabel(idx as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Scaler {
        Scaler::Standard {
            mean: vec![1.0, 10.0],
            scale: vec![2.0, 0.0],
        }
    }

    #[test]
    fn standard_scaler_centers_and_scales() {
        let z = standard().transform(&[3.0, 12.0]).unwrap();
        assert_eq!(z, vec![1.0, 2.0]);
    }

    #[test]
    fn min_max_scaler_respects_feature_range() {
        let s = Scaler::MinMax {
            data_min: vec![0.0, 5.0],
            data_max: vec![10.0, 5.0],
            feature_range: (-1.0, 1.0),
        };
        let z = s.transform(&[5.0, 6.0]).unwrap();
        assert_eq!(z, vec![0.0, 1.0]);
    }

    #[test]
    fn min_max_feature_range_defaults_to_unit() {
        let s: Scaler =
            serde_json::from_str(r#"{"kind":"min_max","data_min":[0.0],"data_max":[4.0]}"#)
                .unwrap();
        assert_eq!(s.transform(&[1.0]).unwrap(), vec![0.25]);
    }

    #[test]
    fn scaler_rejects_wrong_width() {
        let err = standard().transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn scaler_rejects_nan() {
        let err = standard().transform(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, InferenceError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn scaler_validation_catches_length_mismatch() {
        let s = Scaler::Standard {
            mean: vec![1.0, 2.0],
            scale: vec![1.0],
        };
        assert!(s.validate().is_err());
        assert!(standard().validate().is_ok());
    }

    #[test]
    fn linear_svm_picks_class_by_sign() {
        let m = SvmModel::LinearSvm {
            classes: vec![0, 1],
            coef: vec![1.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(m.predict(&[1.0, 0.0]).unwrap(), 1);
        assert_eq!(m.predict(&[0.0, 1.0]).unwrap(), 0);
        // d == 0 falls on the negative side
        assert_eq!(m.predict(&[0.0, 0.5]).unwrap(), 0);
    }

    #[test]
    fn rbf_svm_decision_uses_kernel_distance() {
        let m = SvmModel::RbfSvm {
            classes: vec![-1, 1],
            gamma: 1.0,
            support_vectors: vec![vec![0.0, 0.0], vec![3.0, 3.0]],
            dual_coef: vec![1.0, -1.0],
            intercept: 0.0,
        };
        m.validate().unwrap();
        assert_eq!(m.predict(&[0.1, 0.0]).unwrap(), 1);
        assert_eq!(m.predict(&[2.9, 3.0]).unwrap(), -1);
        let d = m.decision_function(&[0.0, 0.0]).unwrap();
        assert!((d - (1.0 - (-18.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn rbf_validation_catches_ragged_support_vectors() {
        let m = SvmModel::RbfSvm {
            classes: vec![0, 1],
            gamma: 0.1,
            support_vectors: vec![vec![0.0, 0.0], vec![1.0]],
            dual_coef: vec![1.0, -1.0],
            intercept: 0.0,
        };
        let msg = format!("{:#}", m.validate().unwrap_err());
        assert!(msg.contains("support vector 1"));
    }

    #[test]
    fn classifier_rejects_wrong_width() {
        let m = SvmModel::LinearSvm {
            classes: vec![0, 1],
            coef: vec![1.0; 9],
            intercept: 0.0,
        };
        let err = m.predict(&[1.0; 4]).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::DimensionMismatch {
                expected: 9,
                got: 4
            }
        ));
    }

    #[test]
    fn model_json_uses_kind_tag() {
        let m: SvmModel = serde_json::from_str(
            r#"{"kind":"linear_svm","classes":[0,1],"coef":[0.5,0.5],"intercept":-1.0}"#,
        )
        .unwrap();
        assert_eq!(m.classes(), &[0, 1]);
        assert_eq!(Classifier::n_features(&m), 2);
    }

    fn rbf(gamma: f64, support_vectors: Vec<Vec<f64>>, dual_coef: Vec<f64>) -> SvmModel {
        SvmModel::RbfSvm {
            classes: vec![0, 1],
            gamma,
            support_vectors,
            dual_coef,
            intercept: 0.0,
        }
    }

    #[test]
    fn min_max_validation_rejects_empty_feature_range() {
        for range in [(1.0, 1.0), (1.0, 0.0)] {
            let s = Scaler::MinMax {
                data_min: vec![0.0],
                data_max: vec![1.0],
                feature_range: range,
            };
            assert!(s.validate().is_err(), "{range:?}");
        }
    }

    #[test]
    fn min_max_validation_rejects_length_mismatch() {
        let s = Scaler::MinMax {
            data_min: vec![0.0, 0.0],
            data_max: vec![1.0],
            feature_range: (0.0, 1.0),
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn scaler_validation_rejects_no_features() {
        let s = Scaler::Standard {
            mean: vec![],
            scale: vec![],
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rbf_validation_rejects_dual_coef_count_mismatch() {
        let m = rbf(0.1, vec![vec![0.0], vec![1.0]], vec![1.0]);
        let msg = format!("{:#}", m.validate().unwrap_err());
        assert!(msg.contains("2 support vectors but 1 dual coefficients"), "{msg}");
    }

    #[test]
    fn rbf_validation_rejects_non_positive_gamma() {
        for gamma in [0.0, -0.5] {
            let m = rbf(gamma, vec![vec![0.0]], vec![1.0]);
            assert!(m.validate().is_err(), "gamma {gamma}");
        }
    }

    #[test]
    fn rbf_validation_rejects_missing_support_vectors() {
        assert!(rbf(0.1, vec![], vec![]).validate().is_err());
        assert!(rbf(0.1, vec![vec![]], vec![1.0]).validate().is_err());
    }

    #[test]
    fn linear_validation_rejects_empty_coef() {
        let m = SvmModel::LinearSvm {
            classes: vec![0, 1],
            coef: vec![],
            intercept: 0.0,
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn overflowing_decision_value_is_an_error() {
        let m = SvmModel::LinearSvm {
            classes: vec![0, 1],
            coef: vec![1.0e300, 1.0e300],
            intercept: 0.0,
        };
        m.validate().unwrap();
        let err = m.predict(&[1.0e300, 1.0e300]).unwrap_err();
        assert_eq!(err, InferenceError::NonFiniteDecision(f64::INFINITY));
        assert!(!err.to_string().contains("feature"));
    }
}
