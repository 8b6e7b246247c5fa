use crate::constraint::Constraint;
use crate::particle::Particle;
use crate::V2;

/// Pulls one particle toward a fixed point in space.
#[derive(Debug, Clone)]
pub struct LeashConstraint {
	p: usize,
	pos: V2,
	lambda: f32,
	compliance: f32,
}

impl LeashConstraint {
	pub fn new_with_pos(p: usize, pos: V2) -> Self {
		Self {
			p,
			pos,
			lambda: 0.,
			compliance: 1e-8,
		}
	}

	pub fn with_compliance(mut self, c: f32) -> Self {
		self.compliance = c;
		self
	}
}

impl Constraint for LeashConstraint {
	fn pre_iteration(&mut self) {
		self.lambda = 0f32;
	}

	fn step(&mut self, ps: &mut [Particle], dt: f32) -> f32 {
		let p = &mut ps[self.p];
		let imass = p.get_imass();
		if imass == 0.0 {
			return 0.0;
		}
		let dp = p.get_pos() - self.pos;
		let dl = dp.magnitude();
		if !dl.is_normal() {
			return 0.0;
		}
		let compliance_t = self.compliance / dt.powi(2);
		let dlambda =
			(-dl - compliance_t * self.lambda) / (imass + compliance_t);
		let correct = dp * (dlambda / dl);
		self.lambda += dlambda;
		p.add_pos(correct * imass);
		dl
	}

	fn particles(&self) -> Vec<usize> {
		vec![self.p]
	}
}
