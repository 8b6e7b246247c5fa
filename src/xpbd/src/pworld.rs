use std::sync::Arc;

use log::{debug, info};

use crate::chain::Chain;
use crate::config::SimConfig;
use crate::constraint::Constraint;
use crate::controller_message::ControllerMessage;
use crate::error::Result;
use crate::pointer::{PointerCoupler, PointerTarget};
use crate::V2;
use protocol::pr_model::PrChain;

pub struct PWorld {
	pub damping: f32,
	pub gravity: V2,
	pub iterations: usize,
	pub tolerance: f32,
	pub max_dt: f32,
	pub max_dp: f32,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,

	chain: Chain,
	pointer: Arc<PointerTarget>,
	coupler: PointerCoupler,
}

impl PWorld {
	pub fn new(config: &SimConfig) -> Result<Self> {
		let chain = Chain::from_config(config)?;
		info!(
			"chain of {} particles, spacing {}, anchor {}",
			chain.len(),
			config.spacing,
			chain.anchor()
		);
		Ok(Self {
			damping: config.damping,
			gravity: config.gravity.into(),
			iterations: config.iterations,
			tolerance: config.tolerance,
			max_dt: config.max_dt,
			max_dp: config.max_dp.unwrap_or(f32::INFINITY),
			forward_frames: -1,
			chain,
			pointer: Default::default(),
			coupler: PointerCoupler::new(config),
		})
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 0;
		self
	}

	pub fn with_gravity(mut self, gravity: V2) -> Self {
		self.gravity = gravity;
		self
	}

	/// Shared handle for input handlers to write pointer positions into.
	pub fn pointer(&self) -> Arc<PointerTarget> {
		self.pointer.clone()
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	pub fn positions(&self) -> Vec<V2> {
		self.chain.positions()
	}

	pub fn pr_chain(&self) -> PrChain {
		self.chain.pr_chain()
	}

	pub fn is_paused(&self) -> bool {
		self.forward_frames == 0
	}

	pub fn handle(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
				} else {
					self.forward_frames = 0;
				}
				debug!("paused: {}", self.is_paused());
			}
			ControllerMessage::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames += 1;
				}
			}
			ControllerMessage::Reset => self.chain.reset(),
			ControllerMessage::Resize(_) => {}
		}
	}

	/// Steps unless paused. Returns whether a step was taken.
	pub fn advance(&mut self, dt: f32) -> bool {
		if self.forward_frames == 0 {
			return false;
		}
		if self.forward_frames > 0 {
			self.forward_frames -= 1;
		}
		self.step(dt);
		true
	}

	pub fn clamp_dt(&self, dt: f32) -> f32 {
		if dt > self.max_dt {
			debug!("dt {} clamped to {}", dt, self.max_dt);
			return self.max_dt;
		}
		if dt > 0.0 {
			dt
		} else {
			0.0
		}
	}

	#[cfg(not(debug_assertions))]
	fn integrate(&mut self, dt: f32, lead: usize, pull: V2) {
		use rayon::prelude::*;
		let (gravity, damping, max_dp) =
			(self.gravity, self.damping, self.max_dp);
		self.chain
			.particles_mut()
			.par_iter_mut()
			.enumerate()
			.for_each(|(i, p)| {
				let accel = if i == lead { gravity + pull } else { gravity };
				p.update(dt, accel, damping, max_dp);
			});
	}

	#[cfg(debug_assertions)]
	fn integrate(&mut self, dt: f32, lead: usize, pull: V2) {
		let (gravity, damping, max_dp) =
			(self.gravity, self.damping, self.max_dp);
		self.chain
			.particles_mut()
			.iter_mut()
			.enumerate()
			.for_each(|(i, p)| {
				let accel = if i == lead { gravity + pull } else { gravity };
				p.update(dt, accel, damping, max_dp);
			});
	}

	pub fn step(&mut self, dt: f32) {
		let dt = self.clamp_dt(dt);
		if dt == 0f32 {
			return;
		}
		let lead = self.chain.lead();
		self.coupler.sample(&self.pointer, lead);
		let pull = self.coupler.force(self.chain.particles()[lead].get_pos());
		self.integrate(dt, lead, pull);
		let leash = self.coupler.leash_mut().map(|l| l as &mut dyn Constraint);
		self.chain.relax(dt, self.iterations, self.tolerance, leash);
	}
}
