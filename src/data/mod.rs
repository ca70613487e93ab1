/// Inference layer: artifacts, loading, class mapping and prediction.
///
/// Architecture:
/// ```text
///  svm.json / scaler.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  candidate paths → SvmModel + Scaler
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  mapping  │  model classes → UnSafe / Safe
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ predictor  │  FeatureVector → scale → classify → Verdict
///   └───────────┘
/// ```

pub mod artifact;
pub mod error;
pub mod features;
pub mod loader;
pub mod mapping;
pub mod predictor;
