use crate::V2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
	Move(V2),
	Line(V2),
	// control, end
	Quad(V2, V2),
}

/// Smoothed curve through a chain of particles.
///
/// Interior particles become control points of quadratic segments that end
/// halfway to the next particle, so the curve starts at the first particle,
/// ends at the last one and is tangent-continuous in between.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrPath {
	segments: Vec<Segment>,
}

fn mid(a: V2, b: V2) -> V2 {
	(a + b) * 0.5
}

impl PrPath {
	pub fn smooth(points: &[V2]) -> Self {
		let mut segments = Vec::with_capacity(points.len());
		let n = points.len();
		if n == 0 {
			return Self { segments };
		}
		segments.push(Segment::Move(points[0]));
		if n == 2 {
			segments.push(Segment::Line(points[1]));
		}
		for i in 1..n.saturating_sub(1) {
			let end = if i == n - 2 {
				points[n - 1]
			} else {
				mid(points[i], points[i + 1])
			};
			segments.push(Segment::Quad(points[i], end));
		}
		Self { segments }
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Polyline approximation, `steps` samples per quadratic segment.
	pub fn flatten(&self, steps: usize) -> Vec<V2> {
		let steps = steps.max(1);
		let mut result = Vec::new();
		let mut cur = V2::zeros();
		for seg in self.segments.iter() {
			match *seg {
				Segment::Move(p) | Segment::Line(p) => {
					result.push(p);
					cur = p;
				}
				Segment::Quad(c, e) => {
					for k in 1..=steps {
						let t = k as f32 / steps as f32;
						let s = 1.0 - t;
						result.push(cur * (s * s) + c * (2.0 * s * t) + e * (t * t));
					}
					cur = e;
				}
			}
		}
		result
	}
}

pub fn polyline_length(points: &[V2]) -> f32 {
	points.windows(2).map(|w| (w[1] - w[0]).magnitude()).sum()
}

/// Leading part of a polyline covering `ratio` of its arc length.
pub fn truncate(points: &[V2], ratio: f32) -> Vec<V2> {
	if ratio <= 0.0 || points.is_empty() {
		return Vec::new();
	}
	if ratio >= 1.0 {
		return points.to_vec();
	}
	let mut left = polyline_length(points) * ratio;
	let mut result = vec![points[0]];
	for w in points.windows(2) {
		let l = (w[1] - w[0]).magnitude();
		if l >= left {
			if l > 0.0 {
				result.push(w[0] + (w[1] - w[0]) * (left / l));
			}
			break;
		}
		left -= l;
		result.push(w[1]);
	}
	result
}

#[cfg(test)]
mod test {
	use super::*;
	use float_cmp::approx_eq;
	use test_case::test_case;

	fn line(n: usize) -> Vec<V2> {
		(0..n).map(|i| V2::new(10. * i as f32, 0.)).collect()
	}

	#[test_case(0, 0 ; "empty")]
	#[test_case(1, 1 ; "single point")]
	#[test_case(2, 2 ; "straight segment")]
	#[test_case(5, 4 ; "curved chain")]
	fn test_smooth_segment_count(n: usize, segments: usize) {
		assert_eq!(PrPath::smooth(&line(n)).segments().len(), segments);
	}

	#[test]
	fn test_last_curve_ends_on_last_point() {
		let ps = line(4);
		let path = PrPath::smooth(&ps);
		assert_eq!(path.segments()[0], Segment::Move(ps[0]));
		assert_eq!(path.segments()[1], Segment::Quad(ps[1], mid(ps[1], ps[2])));
		assert_eq!(path.segments()[2], Segment::Quad(ps[2], ps[3]));
		assert_eq!(
			PrPath::smooth(&line(2)).segments()[1],
			Segment::Line(V2::new(10., 0.))
		);
	}

	#[test]
	fn test_smooth_endpoints() {
		let ps = vec![
			V2::new(0., 0.),
			V2::new(5., -10.),
			V2::new(-3., -20.),
			V2::new(4., -30.),
		];
		let flat = PrPath::smooth(&ps).flatten(8);
		assert_eq!(flat[0], ps[0]);
		let last = flat[flat.len() - 1];
		assert!(approx_eq!(f32, last[0], 4., epsilon = 1e-4));
		assert!(approx_eq!(f32, last[1], -30., epsilon = 1e-4));
	}

	#[test]
	fn test_flatten_collinear_stays_on_line() {
		let flat = PrPath::smooth(&line(4)).flatten(4);
		assert!(flat.iter().all(|p| p[1].abs() < 1e-6));
		assert!(approx_eq!(f32, polyline_length(&flat), 30., epsilon = 1e-3));
	}

	#[test]
	fn test_truncate() {
		let ps = line(3);
		assert!(truncate(&ps, 0.0).is_empty());
		assert_eq!(truncate(&ps, 1.0), ps);
		let half = truncate(&ps, 0.5);
		assert_eq!(half.len(), 2);
		assert!(approx_eq!(f32, half[1][0], 10., epsilon = 1e-5));
		let quarter = truncate(&ps, 0.25);
		assert!(approx_eq!(f32, polyline_length(&quarter), 5., epsilon = 1e-5));
	}
}
