use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Clock {
	/// Monotonic time since an arbitrary origin.
	fn now(&self) -> Duration;

	fn sleep(&self, d: Duration);
}

pub struct SystemClock {
	start: Instant,
}

impl Default for SystemClock {
	fn default() -> Self {
		Self {
			start: Instant::now(),
		}
	}
}

impl Clock for SystemClock {
	fn now(&self) -> Duration {
		self.start.elapsed()
	}

	fn sleep(&self, d: Duration) {
		std::thread::sleep(d);
	}
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
	nanos: Arc<AtomicU64>,
}

impl ManualClock {
	pub fn advance(&self, d: Duration) {
		self.nanos.fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Duration {
		Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
	}

	fn sleep(&self, d: Duration) {
		self.advance(d);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeModel {
	// fixed step per frame, no waiting
	VideoRender,
	// measured step, waits out the rest of the frame period
	RtFrameLock,
}

pub struct TimeManager<C: Clock> {
	pft: Duration,
	model: TimeModel,
	clock: C,
	last: Duration,
	pause_start: Option<Duration>,
	total_pause: Duration,
}

impl<C: Clock> TimeManager<C> {
	pub fn new(clock: C, model: TimeModel, fps: f32) -> Self {
		let last = clock.now();
		Self {
			pft: Duration::from_secs_f64(1.0 / fps.max(1.0) as f64),
			model,
			clock,
			last,
			pause_start: None,
			total_pause: Duration::ZERO,
		}
	}

	pub fn frame_time(&self) -> f32 {
		self.pft.as_secs_f32()
	}

	pub fn is_stopped(&self) -> bool {
		self.pause_start.is_some()
	}

	/// Running or not; time spent stopped is not counted.
	pub fn set(&mut self, on: bool) {
		if on != self.pause_start.is_some() {
			return;
		}
		if let Some(start) = self.pause_start.take() {
			self.total_pause += self.clock.now().saturating_sub(start);
		} else {
			self.pause_start = Some(self.clock.now());
		}
	}

	/// Seconds since the previous call.
	pub fn take_time(&mut self) -> f32 {
		match self.model {
			TimeModel::VideoRender => self.pft.as_secs_f32(),
			TimeModel::RtFrameLock => {
				let passed = self.clock.now().saturating_sub(self.last);
				if passed < self.pft {
					self.clock.sleep(self.pft - passed);
				}
				let now = self.clock.now();
				let mut paused = std::mem::take(&mut self.total_pause);
				// an ongoing stop is charged to this frame up to now only
				if let Some(start) = self.pause_start.as_mut() {
					paused += now.saturating_sub(*start);
					*start = now;
				}
				let dt = now.saturating_sub(self.last).saturating_sub(paused);
				self.last = now;
				dt.as_secs_f32()
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn test_video_render_is_fixed() {
		let clock = ManualClock::default();
		let mut tm = TimeManager::new(clock.clone(), TimeModel::VideoRender, 50.0);
		clock.advance(Duration::from_secs(3));
		assert!(approx_eq!(f32, tm.take_time(), 0.02, epsilon = 1e-6));
		assert_eq!(clock.now(), Duration::from_secs(3));
	}

	#[test]
	fn test_frame_lock_waits_out_period() {
		let clock = ManualClock::default();
		let mut tm = TimeManager::new(clock.clone(), TimeModel::RtFrameLock, 50.0);
		clock.advance(Duration::from_millis(5));
		assert!(approx_eq!(f32, tm.take_time(), 0.02, epsilon = 1e-5));
		assert_eq!(clock.now(), Duration::from_millis(20));
	}

	#[test]
	fn test_frame_lock_reports_stall() {
		let clock = ManualClock::default();
		let mut tm = TimeManager::new(clock.clone(), TimeModel::RtFrameLock, 60.0);
		clock.advance(Duration::from_secs(5));
		assert!(approx_eq!(f32, tm.take_time(), 5.0, epsilon = 1e-4));
	}

	#[test]
	fn test_stopped_time_not_counted() {
		let clock = ManualClock::default();
		let mut tm = TimeManager::new(clock.clone(), TimeModel::RtFrameLock, 50.0);
		tm.set(false);
		clock.advance(Duration::from_secs(2));
		tm.set(true);
		clock.advance(Duration::from_millis(30));
		assert!(approx_eq!(f32, tm.take_time(), 0.03, epsilon = 1e-5));
	}

	#[test]
	fn test_frames_taken_while_stopped() {
		let clock = ManualClock::default();
		let mut tm = TimeManager::new(clock.clone(), TimeModel::RtFrameLock, 50.0);
		tm.set(false);
		assert!(tm.is_stopped());
		for _ in 0..50 {
			assert_eq!(tm.take_time(), 0.0);
		}
		tm.set(true);
		assert!(approx_eq!(f32, tm.take_time(), 0.02, epsilon = 1e-5));
		assert!(approx_eq!(f32, tm.take_time(), 0.02, epsilon = 1e-5));
	}
}
