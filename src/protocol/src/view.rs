use crate::V2;

// world is y-up, screen is y-down
#[derive(Debug, Clone)]
pub struct View {
	world_center: V2,
	screen_r: V2,
	zoom: f32,
}

impl Default for View {
	fn default() -> Self {
		Self {
			world_center: V2::new(0., -300.),
			screen_r: V2::new(640., 480.), // half size
			zoom: 1.0,
		}
	}
}

impl View {
	pub fn with_zoom(mut self, zoom: f32) -> Self {
		self.zoom = zoom;
		self
	}

	pub fn get_zoom(&self) -> f32 {
		self.zoom
	}

	pub fn screen_size(&self) -> [f32; 2] {
		[self.screen_r[0] * 2., self.screen_r[1] * 2.]
	}

	pub fn s2w(&self, pos: V2) -> V2 {
		let d = pos - self.screen_r;
		V2::new(d[0], -d[1]) / self.zoom + self.world_center
	}

	pub fn w2s(&self, pos: V2) -> V2 {
		let d = (pos - self.world_center) * self.zoom;
		V2::new(d[0], -d[1]) + self.screen_r
	}

	pub fn move_view(&mut self, ds: V2) {
		self.world_center -= V2::new(ds[0], -ds[1]) / self.zoom;
	}

	pub fn resize(&mut self, new_size: [u32; 2]) {
		self.screen_r[0] = new_size[0] as f32 / 2.;
		self.screen_r[1] = new_size[1] as f32 / 2.;
	}

	pub fn scale_view(&mut self, zoom_in: bool) {
		if zoom_in {
			self.zoom *= 1.5;
		} else {
			self.zoom /= 1.5;
		}
	}
}
