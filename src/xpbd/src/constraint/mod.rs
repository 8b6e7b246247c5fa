use rand::Rng;

use crate::particle::Particle;
use crate::V2;

pub mod distance;
pub mod leash;

pub trait Constraint {
	fn pre_iteration(&mut self);

	// returns the violation found before correcting it
	fn step(&mut self, ps: &mut [Particle], dt: f32) -> f32;

	fn particles(&self) -> Vec<usize>;
}

// tiny random offset to separate coincident particles
pub(crate) fn rp() -> V2 {
	let mut rng = rand::thread_rng();
	V2::new(rng.gen_range(-1e-4..1e-4), rng.gen_range(-1e-4..1e-4))
}
