//! Error types for the particle field.

use thiserror::Error;

/// Reasons a drawing surface cannot be used. Every variant means the same
/// thing to the engine: stay idle until the next init or resize.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
	/// No canvas element to draw on.
	#[error("no canvas element available")]
	Missing,

	/// The canvas has no drawable area.
	#[error("surface has zero area ({width}x{height})")]
	ZeroSized {
		/// Surface width in pixels.
		width: u32,
		/// Surface height in pixels.
		height: u32,
	},

	/// The browser refused to hand out a 2D rendering context.
	#[error("2d rendering context unavailable: {0}")]
	ContextUnavailable(String),
}

/// Reasons a field configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The JSON text did not describe a configuration.
	#[error("invalid config json: {0}")]
	Json(#[from] serde_json::Error),

	/// A field holds a value the simulation cannot run with.
	#[error("config field '{field}' out of range: {reason}")]
	OutOfRange {
		/// Name of the offending field.
		field: &'static str,
		/// What the value must satisfy.
		reason: &'static str,
	},
}
