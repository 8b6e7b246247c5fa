use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use protocol::color::Rgb;
use protocol::view::View;
use protocol::V2;
use viewer::surface::{StyledPath, Surface};
use viewer::{Error, Result};

pub struct Renderer {
	canvas: Canvas<Window>,
	vp: View,
	background: Color,
}

fn color(c: Rgb) -> Color {
	let [r, g, b] = c.to_u8();
	Color::RGB(r, g, b)
}

impl Renderer {
	pub fn new(mut canvas: Canvas<Window>, vp: View, background: Rgb) -> Self {
		let background = color(background);
		canvas.set_draw_color(background);
		canvas.clear();
		canvas.present();
		Self {
			canvas,
			vp,
			background,
		}
	}

	pub fn view(&self) -> &View {
		&self.vp
	}

	pub fn view_mut(&mut self) -> &mut View {
		&mut self.vp
	}

	fn map_pos(&self, pos: V2) -> [i16; 2] {
		let cast = self.vp.w2s(pos);
		// overflow is okay
		[cast[0] as i16, cast[1] as i16]
	}
}

impl Surface for Renderer {
	fn clear(&mut self) -> Result<()> {
		self.canvas.set_draw_color(self.background);
		self.canvas.clear();
		Ok(())
	}

	fn draw_path(&mut self, path: &StyledPath) -> Result<()> {
		let r = (path.stroke.radius * self.vp.get_zoom()).max(1.0);
		let colors = path.colors();
		for (i, w) in path.points.windows(2).enumerate() {
			let [x1, y1] = self.map_pos(w[0]);
			let [x2, y2] = self.map_pos(w[1]);
			let c = color(colors[i + 1]);
			self.canvas
				.thick_line(x1, y1, x2, y2, (r * 2.0) as u8, c)
				.map_err(Error::Surface)?;
			// round joints
			self.canvas
				.filled_circle(x2, y2, r as i16, c)
				.map_err(Error::Surface)?;
		}
		if let (Some(&p), Some(&c)) = (path.points.first(), colors.first()) {
			let [x, y] = self.map_pos(p);
			self.canvas
				.filled_circle(x, y, r as i16, color(c))
				.map_err(Error::Surface)?;
		}
		Ok(())
	}

	fn present(&mut self) -> Result<()> {
		self.canvas.present();
		Ok(())
	}

	fn resize(&mut self, size: [u32; 2]) {
		self.vp.resize(size);
	}
}
