use protocol::color::{gradient, Rgb};
use protocol::path::{polyline_length, truncate, PrPath};
use protocol::pr_model::PrChain;
use protocol::V2;
use rand::Rng;

use crate::config::LineConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
	pub radius: f32,
	// anchor end
	pub from: Rgb,
	// lead end
	pub to: Rgb,
}

impl Stroke {
	pub fn new(line: &LineConfig) -> Self {
		Self {
			radius: line.radius,
			from: line.color1,
			to: line.color0,
		}
	}

	pub fn color_at(&self, t: f32) -> Rgb {
		gradient(self.from, self.to, t)
	}
}

fn linear_step(e0: f32, e1: f32, x: f32) -> f32 {
	((x - e0) / (e1 - e0)).clamp(0.0, 1.0)
}

/// Fixed per-point occlusion of the flattened line, faded in once the
/// drawn fraction passes `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct Occlusion {
	threshold: f32,
	cd: Vec<f32>,
}

impl Occlusion {
	pub fn new(threshold: f32, cd: Vec<f32>) -> Self {
		Self { threshold, cd }
	}

	pub fn random(threshold: f32, count: usize) -> Self {
		let mut rng = rand::thread_rng();
		let cd = (0..count).map(|_| rng.gen_range(0.85..=1.0)).collect();
		Self::new(threshold, cd)
	}

	/// Brightness factor of point `i` when `shown` of the line is drawn.
	pub fn shade(&self, i: usize, shown: f32) -> f32 {
		let ao = 0.9 + 0.1 * self.cd.get(i).copied().unwrap_or(1.0);
		let ratio = linear_step(self.threshold - 0.02, self.threshold + 0.02, shown);
		(ao + 1.0 - ratio).min(1.0)
	}
}

/// Smoothed, partially revealed chain in world coordinates, ordered from
/// the anchor end.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPath {
	pub points: Vec<V2>,
	// position of each point along the whole line, in [0, 1]
	pub ts: Vec<f32>,
	pub stroke: Stroke,
	// brightness factor per point
	pub shade: Vec<f32>,
}

impl StyledPath {
	pub fn new(chain: &PrChain, shown: f32, stroke: Stroke, steps: usize) -> Self {
		let mut points = chain.points();
		// draw outward from the anchor
		if chain.anchor * 2 >= points.len().saturating_sub(1) {
			points.reverse();
		}
		let curve = PrPath::smooth(&points).flatten(steps);
		let total = polyline_length(&curve);
		let points = truncate(&curve, shown);
		let mut ts = Vec::with_capacity(points.len());
		let mut acc = 0f32;
		for (i, p) in points.iter().enumerate() {
			if i > 0 {
				acc += (p - points[i - 1]).magnitude();
			}
			ts.push(if total > 0.0 { acc / total } else { 0.0 });
		}
		let shade = vec![1.0; points.len()];
		Self {
			points,
			ts,
			stroke,
			shade,
		}
	}

	pub fn with_occlusion(mut self, occlusion: &Occlusion, shown: f32) -> Self {
		self.shade = (0..self.points.len())
			.map(|i| occlusion.shade(i, shown))
			.collect();
		self
	}

	pub fn is_empty(&self) -> bool {
		self.points.len() < 2
	}

	pub fn colors(&self) -> Vec<Rgb> {
		self.ts
			.iter()
			.zip(self.shade.iter())
			.map(|(&t, &k)| self.stroke.color_at(t).scale(k))
			.collect()
	}
}

/// Something the line can be drawn on.
pub trait Surface {
	fn clear(&mut self) -> Result<()>;

	fn draw_path(&mut self, path: &StyledPath) -> Result<()>;

	fn present(&mut self) -> Result<()>;

	fn resize(&mut self, _size: [u32; 2]) {}
}

#[cfg(test)]
mod test {
	use super::*;
	use float_cmp::approx_eq;

	fn chain(anchor: usize) -> PrChain {
		PrChain {
			particles: vec![[0., 0.], [0., -20.], [0., -40.], [0., -60.]],
			anchor,
		}
	}

	fn stroke() -> Stroke {
		Stroke::new(&LineConfig::default())
	}

	#[test]
	fn test_full_path() {
		let path = StyledPath::new(&chain(0), 1.0, stroke(), 4);
		assert_eq!(path.points[0], V2::new(0., 0.));
		assert_eq!(path.points.len(), path.ts.len());
		assert_eq!(path.ts[0], 0.0);
		assert!(approx_eq!(f32, *path.ts.last().unwrap(), 1.0, epsilon = 1e-5));
		let colors = path.colors();
		assert_eq!(colors[0].to_u8(), LineConfig::default().color1.to_u8());
		let lead = colors.last().unwrap().to_u8();
		assert_eq!(lead, LineConfig::default().color0.to_u8());
	}

	#[test]
	fn test_partial_path() {
		let path = StyledPath::new(&chain(0), 0.5, stroke(), 4);
		let l = polyline_length(&path.points);
		assert!(approx_eq!(f32, l, 30.0, epsilon = 1e-3));
		assert!(approx_eq!(f32, *path.ts.last().unwrap(), 0.5, epsilon = 1e-5));
		assert!(StyledPath::new(&chain(0), 0.0, stroke(), 4).is_empty());
	}

	#[test]
	fn test_occlusion_after_threshold() {
		let occlusion = Occlusion::new(0.555, vec![0.85; 64]);
		let plain = StyledPath::new(&chain(0), 1.0, stroke(), 4);
		// still drawing in
		let early = StyledPath::new(&chain(0), 0.5, stroke(), 4)
			.with_occlusion(&occlusion, 0.5);
		assert!(early.shade.iter().all(|&k| k == 1.0));
		let full = plain.clone().with_occlusion(&occlusion, 1.0);
		for (a, b) in full.colors().iter().zip(plain.colors().iter()) {
			for c in 0..3 {
				assert!(approx_eq!(f32, a.0[c], b.0[c] * 0.985, epsilon = 1e-5));
			}
		}
		assert_eq!(occlusion.shade(0, 0.555), 1.0);
		assert!(approx_eq!(f32, occlusion.shade(0, 0.58), 0.985, epsilon = 1e-6));
		// past the sampled points there is no occlusion
		assert!(approx_eq!(f32, occlusion.shade(100, 1.0), 1.0, epsilon = 1e-6));
	}

	#[test]
	fn test_starts_at_anchor() {
		let path = StyledPath::new(&chain(3), 0.5, stroke(), 4);
		assert_eq!(path.points[0], V2::new(0., -60.));
	}
}
