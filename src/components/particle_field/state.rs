//! Particle field simulation state.
//!
//! Holds the node set for one surface together with the cached pointer and
//! the simulation clock. All mutation happens in [`ParticleField::advance`];
//! resize and pointer notifications only overwrite cached inputs.

use rand::Rng;

use super::config::FieldConfig;
use super::node::Node;

/// Milliseconds of simulation clock per 60 Hz frame.
const FRAME_MS: f64 = 16.0;

/// One proximity connection between two nodes, `i < j`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub i: usize,
	pub j: usize,
	pub distance: f64,
}

/// Complete simulation state for one drawing surface.
pub struct ParticleField {
	pub width: u32,
	pub height: u32,
	nodes: Vec<Node>,
	pointer: Option<(f64, f64)>,
	/// Accumulated simulation time in milliseconds.
	pub clock: f64,
}

impl ParticleField {
	/// Field sized to `width × height`, populated with random nodes.
	pub fn new<R: Rng + ?Sized>(config: &FieldConfig, width: u32, height: u32, rng: &mut R) -> Self {
		let mut field = Self {
			width,
			height,
			nodes: Vec::new(),
			pointer: None,
			clock: 0.0,
		};
		field.populate(config, rng);
		field
	}

	/// Field with no surface area and no nodes.
	pub fn empty() -> Self {
		Self {
			width: 0,
			height: 0,
			nodes: Vec::new(),
			pointer: None,
			clock: 0.0,
		}
	}

	/// Field with explicit nodes, clamped into bounds.
	pub fn with_nodes(width: u32, height: u32, nodes: Vec<Node>) -> Self {
		let mut field = Self {
			width,
			height,
			nodes,
			pointer: None,
			clock: 0.0,
		};
		let (w, h) = field.bounds();
		for node in &mut field.nodes {
			node.x = node.x.clamp(0.0, w);
			node.y = node.y.clamp(0.0, h);
		}
		field
	}

	fn populate<R: Rng + ?Sized>(&mut self, config: &FieldConfig, rng: &mut R) {
		let count = config.node_count(self.width, self.height);
		let (w, h) = self.bounds();
		self.nodes = (0..count)
			.map(|_| Node::random(rng, config, w, h))
			.collect();
		log::debug!(
			"particle-field: {} nodes for {}x{}",
			self.nodes.len(),
			self.width,
			self.height
		);
	}

	/// Adopt new dimensions and regenerate every node from scratch.
	pub fn resize<R: Rng + ?Sized>(
		&mut self,
		config: &FieldConfig,
		width: u32,
		height: u32,
		rng: &mut R,
	) {
		self.width = width;
		self.height = height;
		self.populate(config, rng);
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = (x.is_finite() && y.is_finite()).then_some((x, y));
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	fn bounds(&self) -> (f64, f64) {
		(f64::from(self.width), f64::from(self.height))
	}

	/// Advance the simulation by `dt` seconds.
	///
	/// Velocities are per 60 Hz frame, so `dt = 1/60` moves each node by
	/// exactly its velocity. After this returns every node lies inside
	/// `[0, width] × [0, height]`.
	pub fn advance(&mut self, config: &FieldConfig, dt: f64) {
		if self.nodes.is_empty() || !(dt.is_finite() && dt > 0.0) {
			return;
		}

		let frames = dt * 60.0;
		self.clock += frames * FRAME_MS;
		let clock = self.clock;
		let (w, h) = self.bounds();
		let pointer = self.pointer.filter(|_| config.pointer_enabled());
		// Exponential smoothing: v += (base - v) * (1 - e^(-rate * dt))
		let relax = if config.velocity_return > 0.0 {
			1.0 - (-config.velocity_return * dt).exp()
		} else {
			0.0
		};

		for node in &mut self.nodes {
			if let Some((px, py)) = pointer {
				let (dx, dy) = (px - node.x, py - node.y);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < config.influence_radius && dist > f64::EPSILON {
					let strength =
						(config.influence_radius - dist) / config.influence_radius * config.attraction;
					node.vx += dx / dist * strength * frames;
					node.vy += dy / dist * strength * frames;
				}
			}

			if relax > 0.0 {
				node.vx += (node.base_vx - node.vx) * relax;
				node.vy += (node.base_vy - node.vy) * relax;
			}

			let (drift_x, drift_y) = node
				.drift
				.as_ref()
				.map_or((0.0, 0.0), |d| d.offset(clock));
			node.x += (node.vx + drift_x) * frames;
			node.y += (node.vy + drift_y) * frames;

			if node.x < 0.0 {
				node.vx = node.vx.abs() * config.restitution;
				node.base_vx = node.base_vx.abs();
			} else if node.x > w {
				node.vx = -node.vx.abs() * config.restitution;
				node.base_vx = -node.base_vx.abs();
			}
			if node.y < 0.0 {
				node.vy = node.vy.abs() * config.restitution;
				node.base_vy = node.base_vy.abs();
			} else if node.y > h {
				node.vy = -node.vy.abs() * config.restitution;
				node.base_vy = -node.base_vy.abs();
			}

			// NaN from a degenerate config lands on the origin rather than escaping.
			node.x = if node.x.is_nan() { 0.0 } else { node.x.clamp(0.0, w) };
			node.y = if node.y.is_nan() { 0.0 } else { node.y.clamp(0.0, h) };
		}
	}

	/// Every unordered node pair strictly closer than `max_distance`.
	pub fn connections(&self, max_distance: f64) -> impl Iterator<Item = Connection> + '_ {
		let nodes = &self.nodes;
		(0..nodes.len()).flat_map(move |i| {
			(i + 1..nodes.len()).filter_map(move |j| {
				let distance = nodes[i].distance_to(nodes[j].x, nodes[j].y);
				(distance < max_distance).then_some(Connection { i, j, distance })
			})
		})
	}

	/// Whether a connection touches the pointer's influence area.
	pub fn is_near_pointer(&self, connection: &Connection, radius: f64) -> bool {
		let Some((px, py)) = self.pointer else {
			return false;
		};
		let (a, b) = (&self.nodes[connection.i], &self.nodes[connection.j]);
		a.distance_to(px, py) < radius || b.distance_to(px, py) < radius
	}
}
