use crate::config::AppConfig;
use crate::data::error::WaterError;
use crate::data::features::FeatureVector;
use crate::data::predictor::{InferenceContext, Prediction, predict};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded artifacts, or the fatal error that stopped startup.
    pub startup: Result<InferenceContext, WaterError>,

    /// Current form values.
    pub inputs: FeatureVector,

    /// Result of the last successful submission.
    pub prediction: Option<Prediction>,

    /// Whether raw/scaled inputs and the raw label are shown.
    pub show_details: bool,

    /// Load confirmation, kept for the whole session.
    pub load_message: Option<String>,

    /// Failure of the last submission, cleared by the next success.
    pub last_error: Option<WaterError>,
}

impl AppState {
    /// Load artifacts and prepare the form.
    pub fn new(config: &AppConfig) -> Self {
        Self::from_startup(InferenceContext::load(config))
    }

    pub fn from_startup(startup: Result<InferenceContext, WaterError>) -> Self {
        let load_message = startup
            .as_ref()
            .ok()
            .map(|_| "Model and scaler loaded successfully.".to_string());
        Self {
            startup,
            inputs: FeatureVector::default(),
            prediction: None,
            show_details: false,
            load_message,
            last_error: None,
        }
    }

    /// The context, if startup succeeded. `None` means the form must not be
    /// shown.
    pub fn context(&self) -> Option<&InferenceContext> {
        self.startup.as_ref().ok()
    }

    pub fn fatal_error(&self) -> Option<&WaterError> {
        self.startup.as_ref().err().filter(|e| e.is_fatal())
    }

    /// Run the predictor on the current inputs.
    ///
    /// On failure the previous result is cleared and the error is kept in
    /// `last_error`; the form stays usable.
    pub fn submit(&mut self) {
        let Some(ctx) = self.startup.as_ref().ok() else {
            return;
        };
        match predict(ctx, &self.inputs) {
            Ok(p) => {
                log::info!("Prediction: water is {}", p.verdict);
                self.prediction = Some(p);
                self.last_error = None;
            }
            Err(e) => {
                self.prediction = None;
                self.last_error = Some(e);
            }
        }
    }
}
