use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Feature – one measured water property
// ---------------------------------------------------------------------------

/// Number of measurements the artifacts were fitted on.
pub const N_FEATURES: usize = 9;

/// A single water-quality measurement, in the column order used at fit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Ph,
    Hardness,
    Solids,
    Chloramines,
    Sulfate,
    Conductivity,
    OrganicCarbon,
    Trihalomethanes,
    Turbidity,
}

impl Feature {
    /// All features in fitted column order.
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::Ph,
        Feature::Hardness,
        Feature::Solids,
        Feature::Chloramines,
        Feature::Sulfate,
        Feature::Conductivity,
        Feature::OrganicCarbon,
        Feature::Trihalomethanes,
        Feature::Turbidity,
    ];

    /// Column name as it appeared in the training data.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Ph => "ph",
            Feature::Hardness => "hardness",
            Feature::Solids => "solids",
            Feature::Chloramines => "chloramines",
            Feature::Sulfate => "sulfate",
            Feature::Conductivity => "conductivity",
            Feature::OrganicCarbon => "organicCarbon",
            Feature::Trihalomethanes => "trihalomethanes",
            Feature::Turbidity => "turbidity",
        }
    }

    /// Position in the feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Widget range. Only pH is bounded; the model sees whatever the user
    /// types for everything else.
    pub fn input_range(self) -> RangeInclusive<f64> {
        match self {
            Feature::Ph => 0.0..=14.0,
            _ => f64::NEG_INFINITY..=f64::INFINITY,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – one form submission
// ---------------------------------------------------------------------------

/// Raw measurements for one sample, ordered as [`Feature::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector(pub [f64; N_FEATURES]);

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn get_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.0[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(feature, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}
