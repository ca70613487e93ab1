use std::collections::BTreeMap;
use std::fmt;

use super::artifact::Classifier;
use super::error::WaterError;

// ---------------------------------------------------------------------------
// Verdict – what the user is told
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Safe,
    UnSafe,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::UnSafe => "UnSafe",
        }
    }

    pub fn is_safe(self) -> bool {
        self == Verdict::Safe
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClassMapping – raw label → verdict
// ---------------------------------------------------------------------------

/// Two-entry lookup derived from the model's own label order:
/// `classes[0]` is unsafe, `classes[1]` is safe.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMapping {
    mapping: BTreeMap<i64, Verdict>,
}

impl ClassMapping {
    /// Build the mapping from a classifier's label set.
    ///
    /// Anything other than exactly two distinct labels is rejected: there is
    /// no way to tell which label means "safe" otherwise.
    pub fn from_classifier(model: &dyn Classifier) -> Result<Self, WaterError> {
        Self::from_labels(model.classes())
    }

    pub fn from_labels(labels: &[i64]) -> Result<Self, WaterError> {
        match labels {
            [unsafe_label, safe_label] if unsafe_label != safe_label => {
                let mapping = BTreeMap::from([
                    (*unsafe_label, Verdict::UnSafe),
                    (*safe_label, Verdict::Safe),
                ]);
                Ok(Self { mapping })
            }
            _ => Err(WaterError::MappingShape {
                labels: labels.to_vec(),
            }),
        }
    }

    pub fn verdict(&self, label: i64) -> Option<Verdict> {
        self.mapping.get(&label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Verdict)> + '_ {
        self.mapping.iter().map(|(&l, &v)| (l, v))
    }
}
