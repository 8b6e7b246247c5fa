pub mod color;
pub mod path;
pub mod pr_model;
pub mod view;

use pr_model::PrChain;

use serde::{Deserialize, Serialize};

pub type V2 = nalgebra::Vector2<f32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
	FrameUpdate { frame: u64, chain: PrChain, shown: f32 },
}

impl Message {
	pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
		bincode::serialize(&self)
	}

	pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
		bincode::deserialize(bytes)
	}
}
