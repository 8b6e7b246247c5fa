use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{CouplingMode, SimConfig};
use crate::constraint::leash::LeashConstraint;
use crate::V2;

const ABSENT: u64 = u64::MAX;

/// Latest pointer position in world space. Writers replace the value, the
/// simulation reads it once per step; nothing is queued.
#[derive(Debug)]
pub struct PointerTarget(AtomicU64);

impl Default for PointerTarget {
	fn default() -> Self {
		Self(AtomicU64::new(ABSENT))
	}
}

impl PointerTarget {
	// non-finite positions are dropped
	pub fn set(&self, pos: V2) {
		if !(pos[0].is_finite() && pos[1].is_finite()) {
			return;
		}
		let bits = (pos[0].to_bits() as u64) << 32 | pos[1].to_bits() as u64;
		self.0.store(bits, Ordering::Release);
	}

	pub fn clear(&self) {
		self.0.store(ABSENT, Ordering::Release);
	}

	pub fn get(&self) -> Option<V2> {
		let bits = self.0.load(Ordering::Acquire);
		if bits == ABSENT {
			return None;
		}
		Some(V2::new(
			f32::from_bits((bits >> 32) as u32),
			f32::from_bits(bits as u32),
		))
	}
}

pub struct PointerCoupler {
	mode: CouplingMode,
	strength: f32,
	leash_compliance: f32,
	// sampled once per step
	sample: Option<V2>,
	leash: Option<LeashConstraint>,
}

impl PointerCoupler {
	pub fn new(config: &SimConfig) -> Self {
		Self {
			mode: config.coupling,
			strength: config.strength,
			leash_compliance: config.leash_compliance,
			sample: None,
			leash: None,
		}
	}

	pub fn sample(&mut self, target: &PointerTarget, lead: usize) {
		self.sample = target.get();
		self.leash = match (self.mode, self.sample) {
			(CouplingMode::Leash, Some(pos)) => Some(
				LeashConstraint::new_with_pos(lead, pos)
					.with_compliance(self.leash_compliance),
			),
			_ => None,
		};
	}

	/// Extra acceleration on the lead particle at `lead_pos`.
	pub fn force(&self, lead_pos: V2) -> V2 {
		match (self.mode, self.sample) {
			(CouplingMode::Force, Some(target)) => {
				(target - lead_pos) * self.strength
			}
			_ => V2::zeros(),
		}
	}

	pub fn leash_mut(&mut self) -> Option<&mut LeashConstraint> {
		self.leash.as_mut()
	}
}
