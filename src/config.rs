use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Where to look for artifacts and how to size the window.
///
/// Built once in `main`; nothing here is read from flags or files.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directories searched in order. Duplicates are skipped.
    pub base_dirs: Vec<PathBuf>,
    /// Relative candidate paths for the classifier, in priority order.
    pub model_candidates: Vec<PathBuf>,
    /// Relative candidate paths for the scaler, in priority order.
    pub scaler_candidates: Vec<PathBuf>,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut base_dirs = Vec::new();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            base_dirs.push(dir);
        }
        if let Ok(cwd) = std::env::current_dir() {
            base_dirs.push(cwd);
        }
        Self::with_base_dirs(base_dirs)
    }
}

impl AppConfig {
    /// Default candidate names searched under the given directories.
    pub fn with_base_dirs(base_dirs: Vec<PathBuf>) -> Self {
        Self {
            base_dirs,
            model_candidates: vec![PathBuf::from("svm.json"), Path::new("models").join("svm.json")],
            scaler_candidates: vec![
                PathBuf::from("scaler.json"),
                Path::new("models").join("scaler.json"),
            ],
            title: "💧 Water Quality Prediction".to_string(),
            window_size: [640.0, 760.0],
            min_window_size: [420.0, 480.0],
        }
    }

    /// Absolute candidate paths: every base directory × every relative name,
    /// base directories outermost.
    pub fn expand(&self, relative: &[PathBuf]) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = Vec::new();
        for base in &self.base_dirs {
            for rel in relative {
                let p = base.join(rel);
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
        out
    }
}
