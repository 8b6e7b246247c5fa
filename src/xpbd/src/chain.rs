use crate::config::SimConfig;
use crate::constraint::distance::DistanceConstraint;
use crate::constraint::Constraint;
use crate::error::Result;
use crate::particle::Particle;
use crate::V2;
use protocol::pr_model::PrChain;

/// Open chain of particles linked by distance constraints, with one pinned
/// anchor.
#[derive(Debug, Clone)]
pub struct Chain {
	particles: Vec<Particle>,
	constraints: Vec<DistanceConstraint>,
	anchor: usize,
	layout: Vec<V2>,
}

impl Chain {
	/// Chain along the default axis from the default origin.
	pub fn initialize(count: usize, spacing: f32, anchor: usize) -> Result<Self> {
		Self::from_config(&SimConfig {
			count,
			spacing,
			anchor,
			..Default::default()
		})
	}

	pub fn from_config(config: &SimConfig) -> Result<Self> {
		config.validate()?;
		let origin = V2::from(config.origin);
		let axis = V2::from(config.axis).normalize();
		let layout: Vec<V2> = (0..config.count)
			.map(|i| origin + axis * (config.spacing * i as f32))
			.collect();
		let particles: Vec<Particle> = layout
			.iter()
			.enumerate()
			.map(|(i, &pos)| {
				if i == config.anchor {
					Particle::pinned(pos)
				} else {
					Particle::new(1.0, pos)
				}
			})
			.collect();
		let constraints = (1..config.count)
			.map(|i| {
				let c = DistanceConstraint::new_with_l0(i - 1, i, config.spacing)
					.with_compliance(config.compliance);
				if config.slack {
					c.attractive_only()
				} else {
					c
				}
			})
			.collect();
		Ok(Self {
			particles,
			constraints,
			anchor: config.anchor,
			layout,
		})
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn anchor(&self) -> usize {
		self.anchor
	}

	/// The end of the chain farthest from the anchor.
	pub fn lead(&self) -> usize {
		let last = self.len() - 1;
		if self.anchor * 2 >= last {
			0
		} else {
			last
		}
	}

	pub fn positions(&self) -> Vec<V2> {
		self.particles.iter().map(|p| p.get_pos()).collect()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn constraints(&self) -> &[DistanceConstraint] {
		&self.constraints
	}

	pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Largest deviation of any link from its rest length.
	pub fn max_error(&self) -> f32 {
		self.constraints
			.iter()
			.map(|c| (c.length(&self.particles) - c.rest_length()).abs())
			.fold(0.0, f32::max)
	}

	/// Gauss-Seidel relaxation; stops early once a sweep finds every link
	/// within `tolerance`. Returns the number of sweeps done.
	pub fn relax(
		&mut self,
		dt: f32,
		iterations: usize,
		tolerance: f32,
		mut extra: Option<&mut dyn Constraint>,
	) -> usize {
		for c in self.constraints.iter_mut() {
			c.pre_iteration();
		}
		if let Some(c) = extra.as_mut() {
			c.pre_iteration();
		}
		for it in 0..iterations {
			let mut err = 0f32;
			for c in self.constraints.iter_mut() {
				err = err.max(c.step(&mut self.particles, dt));
			}
			if let Some(c) = extra.as_mut() {
				c.step(&mut self.particles, dt);
			} else if err < tolerance {
				return it + 1;
			}
		}
		iterations
	}

	pub fn reset(&mut self) {
		for (p, &pos) in self.particles.iter_mut().zip(self.layout.iter()) {
			p.reset_pos(pos);
		}
	}

	pub fn pr_chain(&self) -> PrChain {
		PrChain {
			particles: self.particles.iter().map(|p| p.render()).collect(),
			anchor: self.anchor,
		}
	}
}
