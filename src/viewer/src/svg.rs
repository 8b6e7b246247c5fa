use std::fmt::Write;

use protocol::color::Rgb;
use protocol::view::View;

use crate::error::{Error, Result};
use crate::surface::{StyledPath, Surface};

/// Headless surface producing one SVG document per presented frame.
pub struct SvgSurface {
	view: View,
	background: Option<Rgb>,
	body: String,
	document: Option<String>,
}

impl SvgSurface {
	pub fn new(view: View, background: Option<Rgb>) -> Self {
		Self {
			view,
			background,
			body: String::new(),
			document: None,
		}
	}

	pub fn view(&self) -> &View {
		&self.view
	}

	/// The last presented frame.
	pub fn document(&self) -> Option<&str> {
		self.document.as_deref()
	}
}

fn fmt_err(e: std::fmt::Error) -> Error {
	Error::Surface(e.to_string())
}

impl Surface for SvgSurface {
	fn clear(&mut self) -> Result<()> {
		self.body.clear();
		if let Some(bg) = self.background {
			writeln!(
				self.body,
				r#"<rect width="100%" height="100%" fill="{}"/>"#,
				bg.to_hex()
			)
			.map_err(fmt_err)?;
		}
		Ok(())
	}

	// one line element per piece so the gradient follows the curve
	fn draw_path(&mut self, path: &StyledPath) -> Result<()> {
		let width = path.stroke.radius * 2.0 * self.view.get_zoom();
		let colors = path.colors();
		writeln!(
			self.body,
			r#"<g stroke-width="{:.2}" stroke-linecap="round" fill="none">"#,
			width
		)
		.map_err(fmt_err)?;
		for (i, w) in path.points.windows(2).enumerate() {
			let a = self.view.w2s(w[0]);
			let b = self.view.w2s(w[1]);
			writeln!(
				self.body,
				r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"/>"#,
				a[0],
				a[1],
				b[0],
				b[1],
				colors[i + 1].to_hex()
			)
			.map_err(fmt_err)?;
		}
		writeln!(self.body, "</g>").map_err(fmt_err)?;
		Ok(())
	}

	fn present(&mut self) -> Result<()> {
		let [w, h] = self.view.screen_size();
		let mut doc = String::with_capacity(self.body.len() + 160);
		writeln!(
			doc,
			r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
		)
		.map_err(fmt_err)?;
		doc.push_str(&self.body);
		doc.push_str("</svg>\n");
		self.document = Some(doc);
		Ok(())
	}

	fn resize(&mut self, size: [u32; 2]) {
		self.view.resize(size);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::LineConfig;
	use crate::surface::Stroke;
	use protocol::pr_model::PrChain;

	fn path(shown: f32) -> StyledPath {
		let chain = PrChain {
			particles: vec![[0., 0.], [0., -20.], [0., -40.]],
			anchor: 0,
		};
		StyledPath::new(&chain, shown, Stroke::new(&LineConfig::default()), 2)
	}

	#[test]
	fn test_document_per_frame() {
		let mut svg = SvgSurface::new(View::default(), Some(Rgb::from_u32(0xffffff)));
		assert!(svg.document().is_none());
		svg.clear().unwrap();
		svg.draw_path(&path(1.0)).unwrap();
		svg.present().unwrap();
		let doc = svg.document().unwrap().to_string();
		assert!(doc.starts_with("<svg"));
		assert!(doc.contains(r##"fill="#ffffff""##));
		assert_eq!(doc.matches("<line").count(), 2);
		assert!(doc.contains(r#"stroke-width="16.00""#));
		assert!(doc.contains("#5a90ff"));

		svg.clear().unwrap();
		svg.present().unwrap();
		assert_eq!(svg.document().unwrap().matches("<line").count(), 0);
	}

	#[test]
	fn test_resize_changes_canvas() {
		let mut svg = SvgSurface::new(View::default(), None);
		svg.resize([300, 200]);
		svg.clear().unwrap();
		svg.present().unwrap();
		assert!(svg.document().unwrap().contains(r#"width="300" height="200""#));
	}
}
