//! Theme-dependent coloring for the particle field.
//!
//! The active theme is owned by the page, not by the engine. The engine reads
//! it through [`ThemeSource`] once per frame and resolves it to a fixed
//! [`Palette`] with a plain lookup, so a theme switch shows up on the very
//! next frame without any transition.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with its opacity replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Same color with its opacity multiplied by `factor`.
	pub fn scale_alpha(self, factor: f64) -> Self {
		self.with_alpha(self.a * factor)
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// The two page themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	/// Dark page theme (the page default).
	#[default]
	Dark,
	/// Light page theme.
	Light,
}

impl ThemeMode {
	/// Interpret a `data-theme` attribute value. Anything but `"light"` is dark.
	pub fn from_attribute(value: Option<&str>) -> Self {
		match value.map(str::trim) {
			Some(v) if v.eq_ignore_ascii_case("light") => ThemeMode::Light,
			_ => ThemeMode::Dark,
		}
	}
}

/// Colors used to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
	/// Fill for the whole surface.
	pub background: Color,
	/// Fill for node discs.
	pub node: Color,
	/// Stroke for connection lines, before distance fading.
	pub line: Color,
}

/// Palette pair, one per theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePalettes {
	/// Palette used while the page is dark.
	pub dark: Palette,
	/// Palette used while the page is light.
	pub light: Palette,
}

impl ThemePalettes {
	/// Cyan nodes on deep navy / slate-teal on pale gray.
	pub fn neural() -> Self {
		Self {
			dark: Palette {
				background: Color::rgb(20, 24, 36),
				node: Color::rgba(110, 200, 217, 0.4),
				line: Color::rgba(110, 200, 217, 0.06),
			},
			light: Palette {
				background: Color::rgb(223, 226, 230),
				node: Color::rgba(74, 158, 181, 0.4),
				line: Color::rgba(74, 158, 181, 0.06),
			},
		}
	}

	/// Brighter variant for the interactive preset, where lines carry more weight.
	pub fn vivid() -> Self {
		Self {
			dark: Palette {
				background: Color::rgb(15, 18, 28),
				node: Color::rgba(120, 210, 230, 0.6),
				line: Color::rgba(120, 210, 230, 0.15),
			},
			light: Palette {
				background: Color::rgb(236, 239, 243),
				node: Color::rgba(52, 128, 160, 0.55),
				line: Color::rgba(52, 128, 160, 0.15),
			},
		}
	}

	/// Pure lookup of the palette for a theme.
	pub fn resolve(&self, mode: ThemeMode) -> &Palette {
		match mode {
			ThemeMode::Dark => &self.dark,
			ThemeMode::Light => &self.light,
		}
	}
}

impl Default for ThemePalettes {
	fn default() -> Self {
		Self::neural()
	}
}

/// Read-only access to the page's current theme.
pub trait ThemeSource {
	/// The theme that should color the next frame.
	fn current(&self) -> ThemeMode;
}

impl ThemeSource for ThemeMode {
	fn current(&self) -> ThemeMode {
		*self
	}
}

impl<F> ThemeSource for F
where
	F: Fn() -> ThemeMode,
{
	fn current(&self) -> ThemeMode {
		self()
	}
}

/// Reads `data-theme` from the document root element every time it is asked.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentTheme;

impl ThemeSource for DocumentTheme {
	fn current(&self) -> ThemeMode {
		let attr = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.document_element())
			.and_then(|root| root.get_attribute("data-theme"));
		ThemeMode::from_attribute(attr.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn attribute_parsing_defaults_to_dark() {
		assert_eq!(ThemeMode::from_attribute(Some("light")), ThemeMode::Light);
		assert_eq!(ThemeMode::from_attribute(Some(" Light ")), ThemeMode::Light);
		assert_eq!(ThemeMode::from_attribute(Some("dark")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_attribute(Some("sepia")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_attribute(None), ThemeMode::Dark);
	}

	#[test]
	fn resolve_picks_matching_palette() {
		let palettes = ThemePalettes::neural();
		assert_eq!(
			palettes.resolve(ThemeMode::Dark).background,
			Color::rgb(20, 24, 36)
		);
		assert_eq!(
			palettes.resolve(ThemeMode::Light).background,
			Color::rgb(223, 226, 230)
		);
		assert_ne!(
			palettes.resolve(ThemeMode::Dark),
			palettes.resolve(ThemeMode::Light)
		);
	}

	#[test]
	fn css_serialization() {
		assert_eq!(Color::rgb(20, 24, 36).to_css(), "#141824");
		assert_eq!(
			Color::rgba(110, 200, 217, 0.4).to_css(),
			"rgba(110, 200, 217, 0.4)"
		);
	}

	#[test]
	fn scale_alpha_stays_in_unit_range() {
		let c = Color::rgba(1, 2, 3, 0.5);
		assert!((c.scale_alpha(0.5).a - 0.25).abs() < 1e-12);
		assert_eq!(c.scale_alpha(4.0).a, 1.0);
		assert_eq!(c.scale_alpha(-1.0).a, 0.0);
	}

	#[test]
	fn closures_act_as_theme_sources() {
		let shared = Rc::new(Cell::new(ThemeMode::Dark));
		let source = {
			let shared = shared.clone();
			move || shared.get()
		};
		assert_eq!(source.current(), ThemeMode::Dark);
		shared.set(ThemeMode::Light);
		assert_eq!(source.current(), ThemeMode::Light);
	}

	#[test]
	fn palettes_deserialize_partially() {
		let json = r#"{ "light": { "background": { "r": 1, "g": 2, "b": 3, "a": 1.0 },
			"node": { "r": 4, "g": 5, "b": 6, "a": 0.5 },
			"line": { "r": 7, "g": 8, "b": 9, "a": 0.1 } } }"#;
		let palettes: ThemePalettes = serde_json::from_str(json).unwrap();
		assert_eq!(palettes.dark, ThemePalettes::neural().dark);
		assert_eq!(palettes.light.background, Color::rgb(1, 2, 3));
	}
}
