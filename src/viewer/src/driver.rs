use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use log::{debug, info};

use protocol::path::PrPath;
use protocol::Message;
use xpbd::controller_message::ControllerMessage;
use xpbd::pointer::PointerTarget;
use xpbd::pworld::PWorld;

use crate::config::LineConfig;
use crate::error::Result;
use crate::reveal::{Reveal, RevealTarget};
use crate::surface::{Occlusion, Stroke, StyledPath, Surface};
use crate::time_manager::{Clock, TimeManager};

/// Steps the world once per frame and draws the result.
pub struct RenderDriver<S: Surface, C: Clock> {
	pworld: PWorld,
	surface: S,
	time: TimeManager<C>,
	reveal: Reveal,
	stroke: Stroke,
	occlusion: Occlusion,
	curve_steps: usize,
	rx: Option<Receiver<ControllerMessage>>,
	stop: Arc<AtomicBool>,
	frame: u64,
}

impl<S: Surface, C: Clock> RenderDriver<S, C> {
	pub fn new(
		pworld: PWorld,
		surface: S,
		time: TimeManager<C>,
		line: &LineConfig,
	) -> Self {
		info!("render driver at {:.1} fps", 1.0 / time.frame_time());
		let samples = PrPath::smooth(&pworld.positions())
			.flatten(line.curve_steps)
			.len();
		Self {
			pworld,
			surface,
			time,
			reveal: Reveal::new(line),
			stroke: Stroke::new(line),
			occlusion: Occlusion::random(line.ao_threshold, samples),
			curve_steps: line.curve_steps,
			rx: None,
			stop: Arc::new(AtomicBool::new(false)),
			frame: 0,
		}
	}

	pub fn with_controller(mut self, rx: Receiver<ControllerMessage>) -> Self {
		self.rx = Some(rx);
		self
	}

	pub fn pointer(&self) -> Arc<PointerTarget> {
		self.pworld.pointer()
	}

	pub fn reveal_target(&self) -> Arc<RevealTarget> {
		self.reveal.target()
	}

	/// Setting the returned flag ends `run` after the current frame.
	pub fn stop_handle(&self) -> Arc<AtomicBool> {
		self.stop.clone()
	}

	pub fn pworld(&self) -> &PWorld {
		&self.pworld
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn shown(&self) -> f32 {
		self.reveal.shown()
	}

	pub fn message(&self) -> Message {
		Message::FrameUpdate {
			frame: self.frame,
			chain: self.pworld.pr_chain(),
			shown: self.reveal.shown(),
		}
	}

	/// Current frame as a length-prefixed bincode record.
	pub fn encode_frame(&self) -> Result<Vec<u8>> {
		let bytes = self.message().to_bytes()?;
		let mut record = Vec::with_capacity(bytes.len() + 4);
		record.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
		record.extend_from_slice(&bytes);
		Ok(record)
	}

	fn handle_messages(&mut self) {
		let Some(rx) = self.rx.as_ref() else {
			return;
		};
		let msgs: Vec<ControllerMessage> = rx.try_iter().collect();
		for msg in msgs {
			debug!("controller message {:?}", msg);
			match msg {
				ControllerMessage::Resize(size) => self.surface.resize(size),
				ControllerMessage::TogglePause => {
					self.pworld.handle(msg);
					self.time.set(!self.pworld.is_paused());
				}
				msg => self.pworld.handle(msg),
			}
		}
	}

	pub fn draw(&mut self) -> Result<()> {
		let shown = self.reveal.shown();
		let path = StyledPath::new(
			&self.pworld.pr_chain(),
			shown,
			self.stroke,
			self.curve_steps,
		)
		.with_occlusion(&self.occlusion, shown);
		self.surface.clear()?;
		if !path.is_empty() {
			self.surface.draw_path(&path)?;
		}
		self.surface.present()
	}

	pub fn tick(&mut self) -> Result<()> {
		self.handle_messages();
		let mut dt = self.time.take_time();
		// frame forward while stopped
		if self.time.is_stopped() {
			dt = self.time.frame_time();
		}
		self.pworld.advance(dt);
		self.reveal.advance();
		self.draw()?;
		self.frame += 1;
		Ok(())
	}

	pub fn run(&mut self) -> Result<()> {
		while !self.stop.load(Ordering::Acquire) {
			self.tick()?;
		}
		info!("stopped after {} frames", self.frame);
		Ok(())
	}
}
