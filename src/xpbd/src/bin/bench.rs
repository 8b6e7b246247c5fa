use std::time::Instant;

use xpbd::config::SimConfig;
use xpbd::pworld::PWorld;
use xpbd::V2;

fn main() -> xpbd::Result<()> {
	let start = Instant::now();
	let config = SimConfig {
		count: 2000,
		spacing: 2.0,
		axis: [1.0, 0.0],
		..Default::default()
	};
	let mut pworld = PWorld::new(&config)?;
	pworld.pointer().set(V2::new(1500.0, -800.0));
	let dt = 1.0 / 60.0;
	let rframes = 600;
	for _ in 0..rframes {
		pworld.step(dt);
	}
	let time = rframes as f32 * dt;
	let duration = start.elapsed().as_secs_f32();
	println!("{:.3}% of real time", duration / time * 100.0);
	Ok(())
}
