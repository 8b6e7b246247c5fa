use log::warn;

use crate::constraint::{rp, Constraint};
use crate::particle::Particle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceConstraintType {
	Normal,
	Attractive, // slack rope
}
type DCTy = DistanceConstraintType;

#[derive(Debug, Clone)]
pub struct DistanceConstraint {
	ps: [usize; 2],
	l0: f32,
	lambda: f32,
	compliance: f32,
	ty: DCTy,
}

impl DistanceConstraint {
	pub fn new_with_l0(p1: usize, p2: usize, l0: f32) -> Self {
		Self {
			ps: [p1, p2],
			l0,
			lambda: 0f32,
			compliance: 0f32,
			ty: DCTy::Normal,
		}
	}

	pub fn attractive_only(mut self) -> Self {
		self.ty = DCTy::Attractive;
		self
	}

	pub fn with_compliance(mut self, c: f32) -> Self {
		self.compliance = c;
		self
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	pub fn length(&self, ps: &[Particle]) -> f32 {
		(ps[self.ps[0]].get_pos() - ps[self.ps[1]].get_pos()).magnitude()
	}
}

impl Constraint for DistanceConstraint {
	fn pre_iteration(&mut self) {
		self.lambda = 0f32;
	}

	fn step(&mut self, ps: &mut [Particle], dt: f32) -> f32 {
		let [i1, i2] = self.ps;
		let imass1 = ps[i1].get_imass();
		let imass2 = ps[i2].get_imass();
		let imass = imass1 + imass2;
		if imass == 0.0 {
			return 0.0;
		}
		let dp = ps[i1].get_pos() - ps[i2].get_pos();
		let l = dp.magnitude();
		if !l.is_normal() {
			warn!("bad distance {} between {} and {}", l, i1, i2);
			ps[i1].add_pos(rp() * imass1);
			ps[i2].add_pos(rp() * imass2);
			return self.l0;
		}
		let dl = l - self.l0;
		if self.ty == DCTy::Attractive && dl <= 0. {
			return 0.0;
		}
		let compliance_t = self.compliance / dt.powi(2);
		let dlambda =
			(-dl - compliance_t * self.lambda) / (imass + compliance_t);
		let correct = dp * (dlambda / l);
		self.lambda += dlambda;

		ps[i1].add_pos(correct * imass1);
		ps[i2].add_pos(-correct * imass2);
		dl.abs()
	}

	fn particles(&self) -> Vec<usize> {
		self.ps.to_vec()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::V2;
	use float_cmp::approx_eq;

	fn pair(imass0: f32) -> Vec<Particle> {
		vec![
			Particle::new(imass0, V2::new(0., 0.)),
			Particle::new(1.0, V2::new(12., 0.)),
		]
	}

	#[test]
	fn test_equal_masses_split_correction() {
		let mut ps = pair(1.0);
		let mut c = DistanceConstraint::new_with_l0(0, 1, 10.);
		let err = c.step(&mut ps, 0.01);
		assert!(approx_eq!(f32, err, 2.0));
		assert!(approx_eq!(f32, ps[0].pos[0], 1.0));
		assert!(approx_eq!(f32, ps[1].pos[0], 11.0));
	}

	#[test]
	fn test_pinned_partner_takes_nothing() {
		let mut ps = pair(0.0);
		let mut c = DistanceConstraint::new_with_l0(0, 1, 10.);
		c.step(&mut ps, 0.01);
		assert_eq!(ps[0].pos, V2::new(0., 0.));
		assert!(approx_eq!(f32, ps[1].pos[0], 10.0));
	}

	#[test]
	fn test_slack_link_ignores_compression() {
		let mut ps = pair(1.0);
		let mut c = DistanceConstraint::new_with_l0(0, 1, 20.).attractive_only();
		assert_eq!(c.step(&mut ps, 0.01), 0.0);
		assert!(approx_eq!(f32, c.length(&ps), 12.0));
		// stretched past rest length it pulls like a normal link
		let mut c = DistanceConstraint::new_with_l0(0, 1, 8.).attractive_only();
		assert!(approx_eq!(f32, c.step(&mut ps, 0.01), 4.0));
		assert!(approx_eq!(f32, c.length(&ps), 8.0, epsilon = 1e-5));
	}

	#[test]
	fn test_compliance_softens() {
		let mut ps = pair(1.0);
		let mut c = DistanceConstraint::new_with_l0(0, 1, 10.).with_compliance(1e-4);
		c.pre_iteration();
		c.step(&mut ps, 0.01);
		let l = c.length(&ps);
		assert!(l > 10.0 && l < 12.0);
	}

	#[test]
	fn test_coincident_particles_are_separated() {
		let mut ps = vec![
			Particle::new(1.0, V2::new(3., 3.)),
			Particle::new(1.0, V2::new(3., 3.)),
		];
		let mut c = DistanceConstraint::new_with_l0(0, 1, 10.);
		assert_eq!(c.step(&mut ps, 0.01), 10.0);
		assert!(ps[0].pos.iter().all(|x| x.is_finite()));
		assert!(ps[1].pos.iter().all(|x| x.is_finite()));
	}
}
