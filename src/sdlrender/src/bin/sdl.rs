use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::{anyhow, Context};
use clap::Parser;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

use protocol::color::Rgb;
use protocol::view::View;
use protocol::V2;
use sdlrender::renderer::Renderer;
use viewer::config::Config;
use viewer::driver::RenderDriver;
use viewer::reveal::scroll_ratio;
use viewer::time_manager::{SystemClock, TimeManager, TimeModel};
use xpbd::controller_message::ControllerMessage;
use xpbd::pworld::PWorld;

// wheel distance that counts as a full page
const PAGE: f32 = 2000.0;

/// Pointer-reactive line in a window.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	#[arg(long)]
	config: Option<PathBuf>,
	#[arg(long, default_value = "60")]
	fps: f32,
	#[arg(long, default_value = "1280")]
	width: u32,
	#[arg(long, default_value = "960")]
	height: u32,
}

pub fn main() -> anyhow::Result<()> {
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Info)
		.parse_default_env()
		.init();
	let args = Args::parse();
	let config = match &args.config {
		Some(path) => Config::load(path)
			.with_context(|| format!("loading {}", path.display()))?,
		None => Config::default(),
	};

	let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
	let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
	let window = video_subsystem
		.window("lusion-line", args.width, args.height)
		.position_centered()
		.resizable()
		.build()?;
	let canvas = window.into_canvas().present_vsync().build()?;
	let mut view = View::default();
	view.resize([args.width, args.height]);
	let background = config.line.background.unwrap_or(Rgb::from_u32(0xffffff));
	let renderer = Renderer::new(canvas, view, background);

	let (tx, rx) = channel();
	let pworld = PWorld::new(&config.sim)?;
	let time = TimeManager::new(
		SystemClock::default(),
		TimeModel::RtFrameLock,
		args.fps,
	);
	let mut driver = RenderDriver::new(pworld, renderer, time, &config.line)
		.with_controller(rx);
	let pointer = driver.pointer();
	let reveal = driver.reveal_target();
	let mut scroll = 0f32;
	let mut panning = false;

	let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
	'running: loop {
		for event in event_pump.poll_iter() {
			match event {
				Event::Quit { .. }
				| Event::KeyDown {
					keycode: Some(Keycode::Q),
					..
				} => break 'running,
				Event::KeyDown {
					keycode: Some(key),
					..
				} => {
					let msg = match key {
						Keycode::Space => ControllerMessage::TogglePause,
						Keycode::S => ControllerMessage::FrameForward,
						Keycode::R => ControllerMessage::Reset,
						Keycode::I => {
							driver.surface_mut().view_mut().scale_view(true);
							continue;
						}
						Keycode::O => {
							driver.surface_mut().view_mut().scale_view(false);
							continue;
						}
						_ => continue,
					};
					tx.send(msg)?;
				}
				Event::MouseButtonDown {
					mouse_btn: MouseButton::Middle,
					..
				} => panning = true,
				Event::MouseButtonUp {
					mouse_btn: MouseButton::Middle,
					..
				} => panning = false,
				Event::MouseMotion {
					x, y, xrel, yrel, ..
				} => {
					if panning {
						let ds = V2::new(xrel as f32, yrel as f32);
						driver.surface_mut().view_mut().move_view(ds);
					}
					let c = V2::new(x as f32, y as f32);
					pointer.set(driver.surface().view().s2w(c));
				}
				Event::MouseWheel { y, .. } => {
					scroll = (scroll - y as f32 * 50.0).clamp(0.0, PAGE);
					let speed = config.line.scroll_speed;
					reveal.set(scroll_ratio(scroll, PAGE, speed));
				}
				Event::Window {
					win_event: WindowEvent::Leave,
					..
				} => pointer.clear(),
				Event::Window {
					win_event: WindowEvent::Resized(w, h),
					..
				} => {
					tx.send(ControllerMessage::Resize([w as u32, h as u32]))?;
				}
				_ => {}
			}
		}
		driver.tick()?;
	}
	Ok(())
}
