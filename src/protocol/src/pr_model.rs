// pr_model: physical model for rendering

use serde::{Deserialize, Serialize};

use crate::path::PrPath;
use crate::V2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrChain {
	pub particles: Vec<[f32; 2]>,
	pub anchor: usize,
}

impl PrChain {
	pub fn points(&self) -> Vec<V2> {
		self.particles.iter().map(|&p| p.into()).collect()
	}

	pub fn path(&self) -> PrPath {
		PrPath::smooth(&self.points())
	}
}
