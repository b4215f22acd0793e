//! Frame rendering for the particle field.
//!
//! Drawing happens in three passes so nodes sit on top of their connections:
//! 1. Background fill
//! 2. Connection lines, faded by distance
//! 3. Node discs

use super::config::FieldConfig;
use super::state::{Connection, ParticleField};
use super::surface::Surface;
use super::theme::Palette;

/// Draws one frame of `field` onto `surface`.
pub fn render<S: Surface + ?Sized>(
	field: &ParticleField,
	surface: &mut S,
	palette: &Palette,
	config: &FieldConfig,
) {
	if field.width == 0 || field.height == 0 {
		return;
	}

	surface.fill_rect(
		0.0,
		0.0,
		f64::from(field.width),
		f64::from(field.height),
		palette.background,
	);

	draw_connections(field, surface, palette, config);
	draw_nodes(field, surface, palette);
}

fn draw_connections<S: Surface + ?Sized>(
	field: &ParticleField,
	surface: &mut S,
	palette: &Palette,
	config: &FieldConfig,
) {
	let max = config.max_connect_distance;
	if max.is_nan() || max <= 0.0 {
		return;
	}

	for connection in field.connections(max) {
		let fade = 1.0 - connection.distance / max;
		let (opacity, width) = if is_active(field, &connection, config) {
			(
				fade * config.line_opacity * config.active_line_boost,
				config.line_width * config.active_line_width,
			)
		} else {
			(fade * config.line_opacity, config.line_width)
		};

		let (a, b) = (&field.nodes()[connection.i], &field.nodes()[connection.j]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			width,
			palette.line.scale_alpha(opacity),
		);
	}
}

fn is_active(field: &ParticleField, connection: &Connection, config: &FieldConfig) -> bool {
	config.active_connections
		&& config.influence_radius > 0.0
		&& field.is_near_pointer(connection, config.influence_radius)
}

fn draw_nodes<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, palette: &Palette) {
	for node in field.nodes() {
		surface.fill_disc(node.x, node.y, node.radius, palette.node);
	}
}

#[cfg(test)]
mod tests {
	use super::super::node::Node;
	use super::super::surface::testing::{Op, RecordingSurface};
	use super::super::theme::{Color, ThemeMode, ThemePalettes};
	use super::*;

	fn line_field() -> ParticleField {
		ParticleField::with_nodes(
			400,
			300,
			vec![
				Node::at(10.0, 10.0, 1.0),
				Node::at(75.0, 10.0, 2.0),
				Node::at(300.0, 200.0, 1.5),
			],
		)
	}

	#[test]
	fn draws_background_then_lines_then_nodes() {
		let config = FieldConfig::drift();
		let palette = config.palettes.resolve(ThemeMode::Dark).clone();
		let mut surface = RecordingSurface::new(400, 300);
		render(&line_field(), &mut surface, &palette, &config);

		assert_eq!(
			surface.ops[0],
			Op::Rect {
				width: 400.0,
				height: 300.0,
				color: palette.background,
			}
		);
		assert!(matches!(surface.ops[1], Op::Line { .. }));
		assert_eq!(surface.lines().len(), 1);
		assert_eq!(surface.discs().len(), 3);
		assert!(matches!(surface.ops.last(), Some(Op::Disc { .. })));
	}

	#[test]
	fn line_opacity_fades_linearly_with_distance() {
		let config = FieldConfig::drift();
		let palette = config.palettes.resolve(ThemeMode::Dark).clone();
		let mut surface = RecordingSurface::new(400, 300);
		render(&line_field(), &mut surface, &palette, &config);

		let Op::Line { color, width, .. } = surface.lines()[0] else {
			unreachable!()
		};
		let expected = palette.line.a * config.line_opacity * (1.0 - 65.0 / 130.0);
		assert!((color.a - expected).abs() < 1e-12);
		assert_eq!(*width, config.line_width);
	}

	#[test]
	fn nodes_use_their_own_radius() {
		let config = FieldConfig::drift();
		let palette = config.palettes.resolve(ThemeMode::Light).clone();
		let mut surface = RecordingSurface::new(400, 300);
		render(&line_field(), &mut surface, &palette, &config);

		let radii: Vec<f64> = surface
			.discs()
			.into_iter()
			.map(|op| match op {
				Op::Disc { radius, color, .. } => {
					assert_eq!(*color, palette.node);
					*radius
				}
				_ => unreachable!(),
			})
			.collect();
		assert_eq!(radii, vec![1.0, 2.0, 1.5]);
	}

	#[test]
	fn active_connections_are_brighter_and_wider() {
		let config = FieldConfig::interactive();
		let palette = config.palettes.resolve(ThemeMode::Dark).clone();
		let mut field = line_field();

		let mut idle = RecordingSurface::new(400, 300);
		render(&field, &mut idle, &palette, &config);

		field.set_pointer(20.0, 20.0);
		let mut active = RecordingSurface::new(400, 300);
		render(&field, &mut active, &palette, &config);

		let (
			Op::Line {
				color: idle_color,
				width: idle_width,
				..
			},
			Op::Line {
				color: active_color,
				width: active_width,
				..
			},
		) = (idle.lines()[0], active.lines()[0])
		else {
			unreachable!()
		};
		assert!(active_color.a > idle_color.a);
		assert!(active_width > idle_width);
	}

	#[test]
	fn theme_switch_changes_every_color() {
		let config = FieldConfig::drift();
		let palettes = ThemePalettes::neural();
		let field = line_field();

		let mut dark = RecordingSurface::new(400, 300);
		render(&field, &mut dark, palettes.resolve(ThemeMode::Dark), &config);
		let mut light = RecordingSurface::new(400, 300);
		render(&field, &mut light, palettes.resolve(ThemeMode::Light), &config);

		assert_eq!(dark.ops.len(), light.ops.len());
		for (d, l) in dark.ops.iter().zip(&light.ops) {
			assert_ne!(d, l);
		}
	}

	#[test]
	fn zero_sized_field_draws_nothing() {
		let config = FieldConfig::drift();
		let mut surface = RecordingSurface::new(0, 0);
		render(
			&ParticleField::empty(),
			&mut surface,
			&Palette {
				background: Color::rgb(0, 0, 0),
				node: Color::rgb(1, 1, 1),
				line: Color::rgb(2, 2, 2),
			},
			&config,
		);
		assert!(surface.ops.is_empty());
	}
}
