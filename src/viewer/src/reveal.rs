use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::config::LineConfig;

/// Latest requested reveal ratio, written by input handlers.
#[derive(Debug)]
pub struct RevealTarget(AtomicU32);

impl RevealTarget {
	pub fn new(ratio: f32) -> Self {
		let target = Self(AtomicU32::new(0));
		target.set(ratio);
		target
	}

	// clamped to [0, 1], nan is dropped
	pub fn set(&self, ratio: f32) {
		if ratio.is_nan() {
			return;
		}
		self.0.store(ratio.clamp(0.0, 1.0).to_bits(), Ordering::Release);
	}

	pub fn get(&self) -> f32 {
		f32::from_bits(self.0.load(Ordering::Acquire))
	}
}

/// Ratio for a scroll position of `offset` out of `max`.
pub fn scroll_ratio(offset: f32, max: f32, speed: f32) -> f32 {
	if max <= 0.0 {
		return 1.0;
	}
	(offset / max * speed).clamp(0.0, 1.0)
}

/// Eases the drawn part of the line toward the target, once per frame.
pub struct Reveal {
	current: f32,
	smoothness: f32,
	exponent: f32,
	target: Arc<RevealTarget>,
}

impl Reveal {
	pub fn new(line: &LineConfig) -> Self {
		Self {
			current: line.reveal_start.clamp(0.0, 1.0),
			smoothness: line.smoothness,
			exponent: line.show_exponent,
			target: Arc::new(RevealTarget::new(line.reveal_target)),
		}
	}

	pub fn target(&self) -> Arc<RevealTarget> {
		self.target.clone()
	}

	pub fn advance(&mut self) {
		self.current += (self.target.get() - self.current) * self.smoothness;
	}

	/// Fraction of the line's length to draw.
	pub fn shown(&self) -> f32 {
		self.current.powf(self.exponent)
	}
}
