use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
	pub fn from_u32(c: u32) -> Self {
		let ch = |shift: u32| ((c >> shift) & 0xff) as f32 / 255.0;
		Self([ch(16), ch(8), ch(0)])
	}

	pub fn to_u8(self) -> [u8; 3] {
		self.0.map(|x| (x.clamp(0.0, 1.0) * 255.0).round() as u8)
	}

	pub fn scale(self, k: f32) -> Self {
		Self(self.0.map(|x| x * k))
	}

	pub fn to_hex(self) -> String {
		let [r, g, b] = self.to_u8();
		format!("#{:02x}{:02x}{:02x}", r, g, b)
	}

	pub fn to_hsv(self) -> Hsv {
		let [r, g, b] = self.0;
		let max = r.max(g).max(b);
		let min = r.min(g).min(b);
		let d = max - min;
		let h = if d == 0.0 {
			0.0
		} else if max == r {
			((g - b) / d).rem_euclid(6.0) / 6.0
		} else if max == g {
			((b - r) / d + 2.0) / 6.0
		} else {
			((r - g) / d + 4.0) / 6.0
		};
		let s = if max == 0.0 { 0.0 } else { d / max };
		Hsv([h, s, max])
	}
}

impl TryFrom<String> for Rgb {
	type Error = String;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		let hex = s.trim_start_matches('#');
		if hex.len() != 6 {
			return Err(format!("bad color {:?}", s));
		}
		u32::from_str_radix(hex, 16)
			.map(Self::from_u32)
			.map_err(|e| format!("bad color {:?}: {}", s, e))
	}
}

impl From<Rgb> for String {
	fn from(c: Rgb) -> Self {
		c.to_hex()
	}
}

// hue in turns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv(pub [f32; 3]);

impl Hsv {
	pub fn to_rgb(self) -> Rgb {
		let [h, s, v] = self.0;
		let ch = |n: f32| {
			let k = (n + h * 6.0).rem_euclid(6.0);
			v - v * s * (k.min(4.0 - k)).clamp(0.0, 1.0)
		};
		Rgb([ch(5.0), ch(3.0), ch(1.0)])
	}

	// hue goes the short way around
	pub fn lerp(self, other: Hsv, x: f32) -> Hsv {
		let [h0, s0, v0] = self.0;
		let [h1, s1, v1] = other.0;
		let dh = ((h1 - h0).rem_euclid(1.0) + 1.5).rem_euclid(1.0) - 0.5;
		Hsv([
			(h0 + dh * x).rem_euclid(1.0),
			s0 + (s1 - s0) * x,
			v0 + (v1 - v0) * x,
		])
	}
}

/// Stroke colour at `t` along the line, 0 at the anchor and 1 at the lead.
pub fn gradient(from: Rgb, to: Rgb, t: f32) -> Rgb {
	let t = t.clamp(0.0, 1.0);
	let mix = 1.0 - (1.0 - t).powi(2);
	from.to_hsv().lerp(to.to_hsv(), mix).to_rgb()
}

#[cfg(test)]
mod test {
	use super::*;

	fn close(a: Rgb, b: Rgb) -> bool {
		a.0.iter().zip(b.0.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
	}

	#[test]
	fn test_hex() {
		let c: Rgb = "#5a90ff".to_string().try_into().unwrap();
		assert_eq!(c.to_u8(), [0x5a, 0x90, 0xff]);
		assert_eq!(c.to_hex(), "#5a90ff");
		assert!(Rgb::try_from("#5a90".to_string()).is_err());
		assert!(Rgb::try_from("zzzzzz".to_string()).is_err());
	}

	#[test]
	fn test_hsv_round_trip() {
		for c in [0x2a38ee, 0x5a90ff, 0xff0000, 0x00ff80, 0x000000] {
			let c = Rgb::from_u32(c);
			assert!(close(c.to_hsv().to_rgb(), c));
		}
	}

	#[test]
	fn test_gradient_endpoints() {
		let c0 = Rgb::from_u32(0x5a90ff);
		let c1 = Rgb::from_u32(0x2a38ee);
		assert!(close(gradient(c1, c0, 0.0), c1));
		assert!(close(gradient(c1, c0, 1.0), c0));
		// eased toward the lead colour
		let m = gradient(c1, c0, 0.5).to_hsv().0[0];
		let h1 = c1.to_hsv().0[0];
		let h0 = c0.to_hsv().0[0];
		assert!((m - h1).abs() > (m - h0).abs());
	}
}
