//! The particle field engine.
//!
//! Owns every piece of mutable state the animation needs: the simulation,
//! the drawing surface, the theme source, and the random generator. The host
//! forwards resize and pointer notifications and calls [`FieldEngine::tick`]
//! once per display refresh.
//!
//! Without a usable surface the engine is idle: every call returns without
//! doing work, and the next [`FieldEngine::attach`] or resize tries again.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::render;
use super::state::ParticleField;
use super::surface::Surface;
use super::theme::ThemeSource;
use crate::error::SurfaceError;

/// Simulation step per frame, in seconds. One step moves a node by exactly
/// its per-frame velocity.
pub const FRAME_DT: f64 = 1.0 / 60.0;

/// Particle field bound to an optional drawing surface.
pub struct FieldEngine<S, T> {
	config: FieldConfig,
	theme: T,
	surface: Option<S>,
	field: ParticleField,
	rng: SmallRng,
}

impl<S: Surface, T: ThemeSource> FieldEngine<S, T> {
	/// Create the engine and, if a surface is given, populate it. A config that
	/// fails validation is replaced by the default preset.
	pub fn init(surface: Option<S>, theme: T, config: FieldConfig, seed: u64) -> Self {
		let config = match config.validate() {
			Ok(()) => config,
			Err(e) => {
				log::warn!("particle-field: {e}, using defaults");
				FieldConfig::default()
			}
		};
		let mut engine = Self {
			config,
			theme,
			surface: None,
			field: ParticleField::empty(),
			rng: SmallRng::seed_from_u64(seed),
		};
		match surface {
			Some(surface) => engine.attach(surface),
			None => log::warn!("particle-field: {}", SurfaceError::Missing),
		}
		engine
	}

	/// Bind a surface, replacing any previous one, and regenerate nodes at its size.
	pub fn attach(&mut self, surface: S) {
		let (width, height) = surface.size();
		self.surface = Some(surface);
		self.regenerate(width, height);
	}

	/// Whether a surface is bound.
	pub fn has_surface(&self) -> bool {
		self.surface.is_some()
	}

	/// The bound surface, if any.
	pub fn surface(&self) -> Option<&S> {
		self.surface.as_ref()
	}

	/// Current simulation state.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Config in effect after validation.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Resize the surface and rebuild every node at the new dimensions.
	pub fn on_resize(&mut self, width: u32, height: u32) {
		let Some(surface) = self.surface.as_mut() else {
			return;
		};
		surface.set_size(width, height);
		self.regenerate(width, height);
	}

	/// Cache the pointer position for the next advance.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		self.field.set_pointer(x, y);
	}

	/// Forget the pointer; attraction stops on the next advance.
	pub fn on_pointer_leave(&mut self) {
		self.field.clear_pointer();
	}

	fn regenerate(&mut self, width: u32, height: u32) {
		if let Err(e) = drawable(width, height) {
			log::warn!("particle-field: {e}");
		}
		self.field
			.resize(&self.config, width, height, &mut self.rng);
	}

	/// Step the simulation by `dt` seconds.
	pub fn advance(&mut self, dt: f64) {
		if self.surface.is_none() {
			return;
		}
		self.field.advance(&self.config, dt);
	}

	/// Draw the current state in the page's current theme.
	pub fn render(&mut self) {
		let Some(surface) = self.surface.as_mut() else {
			return;
		};
		let palette = self.config.palettes.resolve(self.theme.current());
		render::render(&self.field, surface, palette, &self.config);
	}

	/// One animation frame: advance, then render.
	pub fn tick(&mut self) {
		self.advance(FRAME_DT);
		self.render();
	}
}

fn drawable(width: u32, height: u32) -> Result<(), SurfaceError> {
	if width == 0 || height == 0 {
		return Err(SurfaceError::ZeroSized { width, height });
	}
	Ok(())
}
