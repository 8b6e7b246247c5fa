use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};
use crate::V2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingMode {
	/// Spring acceleration on the lead particle.
	Force,
	/// Positional leash solved with the distance constraints.
	Leash,
}

/// Simulation parameters. Lengths are in world units (pixels at zoom 1),
/// time in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	pub count: usize,
	pub spacing: f32,
	pub anchor: usize,
	pub origin: [f32; 2],
	/// direction the chain is laid out in from the origin
	pub axis: [f32; 2],
	/// fraction of the implied velocity kept per step
	pub damping: f32,
	pub gravity: [f32; 2],
	pub iterations: usize,
	pub tolerance: f32,
	pub compliance: f32,
	/// links resist stretching only
	pub slack: bool,
	pub max_dt: f32,
	pub max_dp: Option<f32>,
	pub coupling: CouplingMode,
	pub strength: f32,
	pub leash_compliance: f32,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			count: 32,
			spacing: 20.0,
			anchor: 0,
			origin: [0.0, 0.0],
			axis: [0.0, -1.0],
			damping: 0.98,
			gravity: [0.0, -980.0],
			iterations: 10,
			tolerance: 0.01,
			compliance: 0.0,
			slack: false,
			max_dt: 1.0 / 30.0,
			max_dp: None,
			coupling: CouplingMode::Force,
			strength: 40.0,
			leash_compliance: 1e-6,
		}
	}
}

fn non_negative(name: &str, x: f32) -> Result<()> {
	if !(x.is_finite() && x >= 0.0) {
		return invalid(format!("{} must be finite and >= 0, got {}", name, x));
	}
	Ok(())
}

impl SimConfig {
	pub fn validate(&self) -> Result<()> {
		if self.count < 2 {
			return invalid(format!("count must be >= 2, got {}", self.count));
		}
		if !(self.spacing.is_finite() && self.spacing > 0.0) {
			return invalid(format!("spacing must be > 0, got {}", self.spacing));
		}
		if self.anchor >= self.count {
			return invalid(format!(
				"anchor {} out of range for {} particles",
				self.anchor, self.count
			));
		}
		let axis = V2::from(self.axis);
		if !(axis.iter().all(|x| x.is_finite()) && axis.magnitude() > 0.0) {
			return invalid(format!("axis {:?} has no direction", self.axis));
		}
		if !(0.0..=1.0).contains(&self.damping) {
			return invalid(format!("damping must be in [0, 1], got {}", self.damping));
		}
		if !self.gravity.iter().chain(self.origin.iter()).all(|x| x.is_finite()) {
			return invalid("gravity and origin must be finite");
		}
		if self.iterations == 0 {
			return invalid("iterations must be >= 1");
		}
		if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
			return invalid(format!("max_dt must be > 0, got {}", self.max_dt));
		}
		if let Some(max_dp) = self.max_dp {
			if !(max_dp > 0.0) {
				return invalid(format!("max_dp must be > 0, got {}", max_dp));
			}
		}
		non_negative("tolerance", self.tolerance)?;
		non_negative("compliance", self.compliance)?;
		non_negative("strength", self.strength)?;
		non_negative("leash_compliance", self.leash_compliance)?;
		Ok(())
	}
}
