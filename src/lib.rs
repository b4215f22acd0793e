//! particle-field: Animated node-graph background for a portfolio site.
//!
//! This crate provides a WASM canvas component that draws slowly drifting
//! nodes joined by proximity lines, colored by the page's light/dark theme.

use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::particle_field::{
	FieldConfig, FieldEngine, ParticleFieldCanvas, Surface, ThemeMode, ThemeSource,
};
pub use error::{ConfigError, SurfaceError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-field-config".
/// Expected format: JSON object of `FieldConfig` fields, optionally with
/// `"preset": "drift" | "interactive"`.
pub fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (max {} nodes, connect < {}px)",
				config.max_nodes, config.max_connect_distance
			);
			config
		}
		Err(e) => {
			warn!("particle-field: failed to parse config, using defaults: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Loads field configuration from the DOM and renders the background canvas.
#[component]
pub fn App() -> impl IntoView {
	let config = load_field_config();

	view! {
		<ParticleFieldCanvas config=config />
	}
}
