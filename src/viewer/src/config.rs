use std::path::Path;

use serde::{Deserialize, Serialize};

use protocol::color::Rgb;
use xpbd::config::SimConfig;

use crate::error::{Error, Result};

/// How the line is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
	/// stroke half width
	pub radius: f32,
	/// colour at the lead end
	pub color0: Rgb,
	/// colour at the anchor end
	pub color1: Rgb,
	pub background: Option<Rgb>,
	/// samples per curve segment
	pub curve_steps: usize,
	/// fraction of the remaining reveal covered per frame
	pub smoothness: f32,
	pub show_exponent: f32,
	pub scroll_speed: f32,
	pub reveal_start: f32,
	pub reveal_target: f32,
	/// drawn fraction past which the line takes its occlusion shading
	pub ao_threshold: f32,
}

impl Default for LineConfig {
	fn default() -> Self {
		Self {
			radius: 8.0,
			color0: Rgb::from_u32(0x5a90ff),
			color1: Rgb::from_u32(0x2a38ee),
			background: None,
			curve_steps: 8,
			smoothness: 0.1,
			show_exponent: 0.8,
			scroll_speed: 8.0,
			reveal_start: 0.0,
			reveal_target: 1.0,
			ao_threshold: 0.555,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub sim: SimConfig,
	pub line: LineConfig,
}

fn bad(msg: String) -> Error {
	Error::Sim(xpbd::Error::InvalidConfiguration(msg))
}

impl Config {
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		let config: Self = serde_json::from_str(&text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		self.sim.validate()?;
		let line = &self.line;
		if !(line.radius.is_finite() && line.radius > 0.0) {
			return Err(bad(format!("radius must be > 0, got {}", line.radius)));
		}
		if !(line.smoothness > 0.0 && line.smoothness <= 1.0) {
			return Err(bad(format!(
				"smoothness must be in (0, 1], got {}",
				line.smoothness
			)));
		}
		if !(line.show_exponent.is_finite() && line.show_exponent > 0.0) {
			return Err(bad(format!(
				"show_exponent must be > 0, got {}",
				line.show_exponent
			)));
		}
		if line.curve_steps == 0 {
			return Err(bad("curve_steps must be >= 1".to_string()));
		}
		Ok(())
	}
}
