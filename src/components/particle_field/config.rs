//! Tunable constants for the particle field.
//!
//! All behavioral differences between field styles live here: node density,
//! motion model, pointer response, and colors. Two presets cover the common
//! cases; anything else is a JSON override on top of one of them.

use serde::{Deserialize, Serialize};

use super::theme::ThemePalettes;
use crate::error::ConfigError;

/// Hard ceiling on `max_nodes`; the connection pass is quadratic in node count.
pub const NODE_CEILING: usize = 200;

/// Largest accepted `max_speed`, pixels per frame.
const SPEED_CEILING: f64 = 100.0;

/// Largest accepted node radius or drift amplitude, pixels.
const SIZE_CEILING: f64 = 100.0;

/// Field parameters. Distances are in surface pixels, velocities in pixels per
/// 60 Hz frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Surface area (px²) per node.
	pub density: f64,
	/// Upper bound on node count regardless of surface area.
	pub max_nodes: usize,
	/// Pairs strictly closer than this are connected.
	pub max_connect_distance: f64,
	/// Peak line opacity multiplier, reached at zero distance.
	pub line_opacity: f64,
	/// Connection line width.
	pub line_width: f64,
	/// Fraction of velocity kept after a boundary bounce.
	pub restitution: f64,
	/// Initial velocity per axis is drawn from `-max_speed..max_speed`.
	pub max_speed: f64,
	/// Node radius range `(min, max)`.
	pub radius: (f64, f64),
	/// Add sinusoidal wandering on top of linear motion.
	pub drift: bool,
	/// Drift amplitude range `(min, max)`, pixels per frame.
	pub drift_amplitude: (f64, f64),
	/// Drift frequency range `(min, max)`, radians per millisecond.
	pub drift_frequency: (f64, f64),
	/// Distance within which the pointer pulls nodes. Zero disables it.
	pub influence_radius: f64,
	/// Velocity gained per frame at zero distance from the pointer.
	pub attraction: f64,
	/// Rate (1/s) at which velocity relaxes back to its baseline. Zero disables it.
	pub velocity_return: f64,
	/// Draw connections near the pointer brighter and thicker.
	pub active_connections: bool,
	/// Opacity multiplier for active connections.
	pub active_line_boost: f64,
	/// Width multiplier for active connections.
	pub active_line_width: f64,
	/// Colors for each theme.
	pub palettes: ThemePalettes,
}

impl FieldConfig {
	/// Slow organic drift with no pointer interaction.
	pub fn drift() -> Self {
		Self {
			density: 25_000.0,
			max_nodes: 50,
			max_connect_distance: 130.0,
			line_opacity: 0.6,
			line_width: 1.0,
			restitution: 0.8,
			max_speed: 0.06,
			radius: (1.0, 2.5),
			drift: true,
			drift_amplitude: (0.1, 0.35),
			drift_frequency: (0.0003, 0.0009),
			influence_radius: 0.0,
			attraction: 0.0,
			velocity_return: 0.0,
			active_connections: false,
			active_line_boost: 1.0,
			active_line_width: 1.0,
			palettes: ThemePalettes::neural(),
		}
	}

	/// Faster nodes that lean toward the pointer and relax back afterwards.
	pub fn interactive() -> Self {
		Self {
			density: 20_000.0,
			max_nodes: 80,
			max_connect_distance: 150.0,
			line_opacity: 0.8,
			line_width: 1.0,
			restitution: 1.0,
			max_speed: 0.25,
			radius: (1.5, 3.0),
			drift: false,
			drift_amplitude: (0.0, 0.0),
			drift_frequency: (0.0, 0.0),
			influence_radius: 150.0,
			attraction: 0.02,
			velocity_return: 1.5,
			active_connections: true,
			active_line_boost: 2.5,
			active_line_width: 1.8,
			palettes: ThemePalettes::vivid(),
		}
	}

	/// Named preset, if it exists.
	pub fn preset(name: &str) -> Option<Self> {
		match name {
			"drift" => Some(Self::drift()),
			"interactive" => Some(Self::interactive()),
			_ => None,
		}
	}

	/// Number of nodes for a surface: `min(max_nodes, floor(area / density))`.
	pub fn node_count(&self, width: u32, height: u32) -> usize {
		if width == 0 || height == 0 || self.density.is_nan() || self.density <= 0.0 {
			return 0;
		}
		let area = f64::from(width) * f64::from(height);
		let by_area = (area / self.density).floor() as usize;
		by_area.min(self.max_nodes)
	}

	/// Whether the pointer affects node velocity at all.
	pub fn pointer_enabled(&self) -> bool {
		self.influence_radius > 0.0 && self.attraction != 0.0
	}

	/// Check every value the simulation depends on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		non_negative("density", self.density)?;
		if self.density <= 0.0 {
			return Err(out_of_range("density", "must be greater than zero"));
		}
		if self.max_nodes > NODE_CEILING {
			return Err(out_of_range("max_nodes", "must not exceed 200"));
		}
		non_negative("max_connect_distance", self.max_connect_distance)?;
		non_negative("line_opacity", self.line_opacity)?;
		non_negative("line_width", self.line_width)?;
		non_negative("restitution", self.restitution)?;
		if self.restitution > 1.0 {
			return Err(out_of_range("restitution", "must be within [0, 1]"));
		}
		non_negative("max_speed", self.max_speed)?;
		if self.max_speed > SPEED_CEILING {
			return Err(out_of_range("max_speed", "must not exceed 100"));
		}
		range("radius", self.radius, SIZE_CEILING)?;
		range("drift_amplitude", self.drift_amplitude, SIZE_CEILING)?;
		range("drift_frequency", self.drift_frequency, 1.0)?;
		non_negative("influence_radius", self.influence_radius)?;
		if !self.attraction.is_finite() {
			return Err(out_of_range("attraction", "must be finite"));
		}
		non_negative("velocity_return", self.velocity_return)?;
		non_negative("active_line_boost", self.active_line_boost)?;
		non_negative("active_line_width", self.active_line_width)?;
		Ok(())
	}

	/// Parse a JSON override. An optional `"preset"` key picks the base
	/// preset; every other key replaces that field of the base. The merged
	/// result must pass [`FieldConfig::validate`].
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let mut overrides: serde_json::Value = serde_json::from_str(text)?;
		let base = overrides
			.as_object_mut()
			.and_then(|obj| obj.remove("preset"))
			.and_then(|p| p.as_str().and_then(Self::preset))
			.unwrap_or_default();

		let mut merged = serde_json::to_value(base)?;
		if let (Some(target), Some(source)) = (merged.as_object_mut(), overrides.as_object()) {
			for (key, value) in source {
				target.insert(key.clone(), value.clone());
			}
		}
		let config: Self = serde_json::from_value(merged)?;
		config.validate()?;
		Ok(config)
	}
}

fn out_of_range(field: &'static str, reason: &'static str) -> ConfigError {
	ConfigError::OutOfRange { field, reason }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if !value.is_finite() || value < 0.0 {
		return Err(out_of_range(field, "must be finite and non-negative"));
	}
	Ok(())
}

/// `(min, max)` with `0 <= min <= max <= ceiling`.
fn range(field: &'static str, (lo, hi): (f64, f64), ceiling: f64) -> Result<(), ConfigError> {
	non_negative(field, lo)?;
	non_negative(field, hi)?;
	if lo > hi || hi > ceiling {
		return Err(out_of_range(field, "must be an ordered range within bounds"));
	}
	Ok(())
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self::drift()
	}
}
