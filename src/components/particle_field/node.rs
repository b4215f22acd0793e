//! Individual field nodes.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::FieldConfig;

/// Per-axis sinusoidal wandering added on top of linear motion.
#[derive(Clone, Debug, PartialEq)]
pub struct Drift {
	pub phase_x: f64,
	pub phase_y: f64,
	pub amp_x: f64,
	pub amp_y: f64,
	pub freq_x: f64,
	pub freq_y: f64,
}

impl Drift {
	/// Positional offset for one frame at simulation time `clock` (ms).
	pub fn offset(&self, clock: f64) -> (f64, f64) {
		(
			(clock * self.freq_x + self.phase_x).sin() * self.amp_x,
			(clock * self.freq_y + self.phase_y).cos() * self.amp_y,
		)
	}
}

/// A single point in the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Velocity the node relaxes back to after being pulled by the pointer.
	pub base_vx: f64,
	pub base_vy: f64,
	pub radius: f64,
	pub drift: Option<Drift>,
}

impl Node {
	/// Random node somewhere inside `width × height`.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig, width: f64, height: f64) -> Self {
		let vx = sample(rng, (-config.max_speed, config.max_speed));
		let vy = sample(rng, (-config.max_speed, config.max_speed));
		let drift = config.drift.then(|| Drift {
			phase_x: sample(rng, (0.0, TAU)),
			phase_y: sample(rng, (0.0, TAU)),
			amp_x: sample(rng, config.drift_amplitude),
			amp_y: sample(rng, config.drift_amplitude),
			freq_x: sample(rng, config.drift_frequency),
			freq_y: sample(rng, config.drift_frequency),
		});

		Self {
			x: sample(rng, (0.0, width)),
			y: sample(rng, (0.0, height)),
			vx,
			vy,
			base_vx: vx,
			base_vy: vy,
			radius: sample(rng, config.radius),
			drift,
		}
	}

	/// Node at rest at a fixed position.
	pub fn at(x: f64, y: f64, radius: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			base_vx: 0.0,
			base_vy: 0.0,
			radius,
			drift: None,
		}
	}

	/// Same node with a new linear and baseline velocity.
	pub fn moving(self, vx: f64, vy: f64) -> Self {
		Self {
			vx,
			vy,
			base_vx: vx,
			base_vy: vy,
			..self
		}
	}

	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Uniform sample from `[lo, hi)`; `lo` when the range is empty or its span
/// is not finite, zero when `lo` itself is not finite.
fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo && (hi - lo).is_finite() {
		rng.gen_range(lo..hi)
	} else if lo.is_finite() {
		lo
	} else {
		0.0
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn random_nodes_respect_config_ranges() {
		let mut rng = SmallRng::seed_from_u64(7);
		let config = FieldConfig::drift();
		for _ in 0..500 {
			let node = Node::random(&mut rng, &config, 800.0, 600.0);
			assert!((0.0..800.0).contains(&node.x));
			assert!((0.0..600.0).contains(&node.y));
			assert!(node.vx.abs() <= config.max_speed);
			assert!(node.vy.abs() <= config.max_speed);
			assert_eq!((node.vx, node.vy), (node.base_vx, node.base_vy));
			assert!((config.radius.0..config.radius.1).contains(&node.radius));

			let drift = node.drift.expect("drift preset gives every node a drift");
			assert!((0.0..TAU).contains(&drift.phase_x));
			assert!((0.1..0.35).contains(&drift.amp_x));
			assert!((0.0003..0.0009).contains(&drift.freq_y));
		}
	}

	#[test]
	fn no_drift_without_drift_flag() {
		let mut rng = SmallRng::seed_from_u64(7);
		let node = Node::random(&mut rng, &FieldConfig::interactive(), 100.0, 100.0);
		assert!(node.drift.is_none());
	}

	#[test]
	fn empty_ranges_do_not_panic() {
		let mut rng = SmallRng::seed_from_u64(1);
		let config = FieldConfig {
			drift: true,
			drift_amplitude: (0.0, 0.0),
			max_speed: 0.0,
			..FieldConfig::drift()
		};
		let node = Node::random(&mut rng, &config, 0.0, 0.0);
		assert_eq!((node.x, node.y, node.vx, node.vy), (0.0, 0.0, 0.0, 0.0));
	}

	#[test]
	fn overflowing_ranges_do_not_panic() {
		let mut rng = SmallRng::seed_from_u64(2);
		let config = FieldConfig {
			max_speed: 1e308,
			radius: (f64::NEG_INFINITY, 2.0),
			..FieldConfig::drift()
		};
		let node = Node::random(&mut rng, &config, 800.0, 600.0);
		assert_eq!((node.vx, node.vy), (-1e308, -1e308));
		assert_eq!(node.radius, 0.0);
		assert!((0.0..800.0).contains(&node.x));
	}

	#[test]
	fn drift_offset_is_bounded_by_amplitude() {
		let drift = Drift {
			phase_x: 1.0,
			phase_y: 2.0,
			amp_x: 0.2,
			amp_y: 0.3,
			freq_x: 0.0005,
			freq_y: 0.0007,
		};
		for step in 0..1000 {
			let (dx, dy) = drift.offset(step as f64 * 16.0);
			assert!(dx.abs() <= 0.2 + 1e-12);
			assert!(dy.abs() <= 0.3 + 1e-12);
		}
	}
}
