use crate::V2;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
	pub imass: f32,
	pub pos: V2,
	pub ppos: V2,
}

impl Particle {
	pub fn new(imass: f32, pos: V2) -> Self {
		Self {
			imass, // 0 is pinned
			pos,
			ppos: pos,
		}
	}

	pub fn pinned(pos: V2) -> Self {
		Self::new(0.0, pos)
	}

	pub fn is_pinned(&self) -> bool {
		self.imass == 0f32
	}

	pub fn get_pos(&self) -> V2 {
		self.pos
	}

	pub fn add_pos(&mut self, dp: V2) {
		self.pos += dp
	}

	pub fn reset_pos(&mut self, p: V2) {
		self.pos = p;
		self.ppos = p;
	}

	pub fn get_imass(&self) -> f32 {
		self.imass
	}

	/// Position Verlet step; velocity is implied by `pos - ppos`.
	///
	/// The implied velocity assumes the previous step used the same `t`.
	pub fn update(&mut self, t: f32, accel: V2, damping: f32, max_dp: f32) {
		if self.is_pinned() {
			return;
		}
		let ppos = self.pos;
		let mut dp = (self.pos - self.ppos) * damping + accel * t * t;
		if dp.magnitude() > max_dp {
			dp = dp.normalize() * max_dp;
		}
		self.pos += dp;
		self.ppos = ppos;
	}

	pub fn render(&self) -> [f32; 2] {
		self.pos.into()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn test_pinned_never_moves() {
		let mut p = Particle::pinned(V2::new(1., 2.));
		p.update(0.1, V2::new(0., -1000.), 1.0, f32::INFINITY);
		assert_eq!(p.get_pos(), V2::new(1., 2.));
	}

	#[test]
	fn test_update_keeps_momentum() {
		let mut p = Particle::new(1.0, V2::new(0., 0.));
		p.ppos = V2::new(-1., 0.);
		p.update(0.1, V2::new(0., -10.), 0.5, f32::INFINITY);
		assert!(approx_eq!(f32, p.pos[0], 0.5));
		assert!(approx_eq!(f32, p.pos[1], -0.1));
		assert_eq!(p.ppos, V2::new(0., 0.));
	}

	#[test]
	fn test_update_max_dp() {
		let mut p = Particle::new(1.0, V2::new(0., 0.));
		p.update(1.0, V2::new(0., -100.), 1.0, 2.0);
		assert!(approx_eq!(f32, p.pos.magnitude(), 2.0, epsilon = 1e-6));
	}
}
