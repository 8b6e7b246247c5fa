use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use protocol::view::View;
use protocol::V2;
use viewer::config::Config;
use viewer::driver::RenderDriver;
use viewer::svg::SvgSurface;
use viewer::time_manager::{SystemClock, TimeManager, TimeModel};
use xpbd::pworld::PWorld;

/// Render the pointer-reactive line without a window.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// JSON file with `sim` and `line` sections; missing fields use defaults.
	#[arg(long)]
	config: Option<PathBuf>,
	/// Number of frames to render.
	#[arg(long, default_value = "120")]
	frames: u64,
	#[arg(long, default_value = "60")]
	fps: f32,
	/// Canvas size in pixels, as WIDTHxHEIGHT.
	#[arg(long, default_value = "1280x960", value_parser = parse_size)]
	size: [u32; 2],
	/// Directory for one SVG file per frame.
	#[arg(long)]
	out_dir: Option<PathBuf>,
	/// Write only every n-th frame.
	#[arg(long, default_value = "1")]
	every: u64,
	/// Pointer held at screen position X,Y for the whole run.
	#[arg(long, value_parser = parse_point)]
	pointer: Option<V2>,
	/// Scroll position as a fraction of the page, drives the reveal.
	#[arg(long)]
	scroll: Option<f32>,
	/// File for length-prefixed bincode frame snapshots.
	#[arg(long)]
	dump: Option<PathBuf>,
	/// Pace frames with the wall clock instead of a fixed step.
	#[arg(long)]
	realtime: bool,
}

fn parse_size(s: &str) -> Result<[u32; 2], String> {
	let (w, h) = s.split_once('x').ok_or("expected WIDTHxHEIGHT")?;
	let w = w.trim().parse().map_err(|e| format!("width: {e}"))?;
	let h = h.trim().parse().map_err(|e| format!("height: {e}"))?;
	Ok([w, h])
}

fn parse_point(s: &str) -> Result<V2, String> {
	let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
	let x = x.trim().parse().map_err(|e| format!("x: {e}"))?;
	let y = y.trim().parse().map_err(|e| format!("y: {e}"))?;
	Ok(V2::new(x, y))
}

fn main() -> anyhow::Result<()> {
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Info)
		.parse_default_env()
		.init();

	let args = Args::parse();
	if args.every == 0 {
		bail!("--every must be at least 1");
	}
	let config = match &args.config {
		Some(path) => Config::load(path)
			.with_context(|| format!("loading {}", path.display()))?,
		None => Config::default(),
	};
	if let Some(dir) = &args.out_dir {
		std::fs::create_dir_all(dir)
			.with_context(|| format!("creating {}", dir.display()))?;
	}
	let mut dump = match &args.dump {
		Some(path) => Some(BufWriter::new(
			File::create(path)
				.with_context(|| format!("creating {}", path.display()))?,
		)),
		None => None,
	};

	let mut view = View::default();
	view.resize(args.size);
	let pworld = PWorld::new(&config.sim)?;
	let surface = SvgSurface::new(view.clone(), config.line.background);
	let model = if args.realtime {
		TimeModel::RtFrameLock
	} else {
		TimeModel::VideoRender
	};
	let time = TimeManager::new(SystemClock::default(), model, args.fps);
	let mut driver = RenderDriver::new(pworld, surface, time, &config.line);

	if let Some(p) = args.pointer {
		driver.pointer().set(view.s2w(p));
	}
	if let Some(scroll) = args.scroll {
		let ratio =
			viewer::reveal::scroll_ratio(scroll, 1.0, config.line.scroll_speed);
		driver.reveal_target().set(ratio);
	}

	for _ in 0..args.frames {
		driver.tick()?;
		let frame = driver.frame();
		if (frame - 1) % args.every != 0 {
			continue;
		}
		if let (Some(dir), Some(doc)) = (&args.out_dir, driver.surface().document())
		{
			let path = dir.join(format!("frame-{:05}.svg", frame));
			std::fs::write(&path, doc)
				.with_context(|| format!("writing {}", path.display()))?;
		}
		if let Some(w) = dump.as_mut() {
			w.write_all(&driver.encode_frame()?)?;
		}
	}
	if let Some(mut w) = dump {
		w.flush()?;
	}
	info!(
		"rendered {} frames, max link error {:.4}",
		driver.frame(),
		driver.pworld().chain().max_error()
	);
	Ok(())
}
