//! Writes demo `models/svm.json` and `models/scaler.json` so the checker can
//! be started without a training run. The numbers are illustrative only.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

/// Per-feature mean and standard deviation, roughly those of the public
/// water-potability dataset, in form order.
const MEAN: [f64; 9] = [7.08, 196.37, 22014.09, 7.12, 333.78, 426.21, 14.28, 66.40, 3.97];
const SCALE: [f64; 9] = [1.47, 32.87, 8768.44, 1.58, 41.41, 80.81, 3.31, 16.17, 0.78];

/// Seeded xoshiro256** so every run writes the same support vectors.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1); also picks which side an unsafe cluster sits on.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal draw (Box-Muller), used to scatter support vectors around a
    /// cluster centre in scaled space.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Support vectors in scaled space: potable samples cluster near the mean,
/// non-potable ones sit further out.
fn support_vectors(rng: &mut SimpleRng) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut svs = Vec::new();
    let mut dual = Vec::new();
    for _ in 0..12 {
        svs.push((0..9).map(|_| rng.gauss(0.0, 0.6)).collect());
        dual.push(1.0);
    }
    for _ in 0..12 {
        let sign = if rng.next_f64() < 0.5 { -1.0 } else { 1.0 };
        svs.push((0..9).map(|_| sign * rng.gauss(1.8, 0.5)).collect());
        dual.push(-1.0);
    }
    (svs, dual)
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let out_dir = Path::new("models");
    std::fs::create_dir_all(out_dir).context("creating models/")?;

    let mut rng = SimpleRng::new(42);
    let (support_vectors, dual_coef) = support_vectors(&mut rng);

    let scaler = json!({
        "kind": "standard",
        "mean": MEAN,
        "scale": SCALE,
    });
    let model = json!({
        "kind": "rbf_svm",
        "classes": [0, 1],
        "gamma": 0.111,
        "support_vectors": &support_vectors,
        "dual_coef": &dual_coef,
        "intercept": 0.0,
    });

    write_json(&out_dir.join("scaler.json"), &scaler)?;
    write_json(&out_dir.join("svm.json"), &model)?;

    println!(
        "Wrote {} support vectors to {}",
        dual_coef.len(),
        out_dir.join("svm.json").display()
    );
    Ok(())
}
