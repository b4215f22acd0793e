//! Drawing surfaces the field can render onto.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;
use crate::error::SurfaceError;

/// Minimal 2D raster target.
pub trait Surface {
	/// Current pixel dimensions `(width, height)`.
	fn size(&self) -> (u32, u32);

	/// Change the pixel dimensions. Clears the contents.
	fn set_size(&mut self, width: u32, height: u32);

	/// Fill an axis-aligned rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);

	/// Fill a circle.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// An HTML canvas and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Obtain the 2D context for `canvas`.
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| SurfaceError::ContextUnavailable(format!("{e:?}")))?
			.ok_or_else(|| SurfaceError::ContextUnavailable("2d context not supported".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SurfaceError::ContextUnavailable("unexpected context type".into()))?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (u32, u32) {
		(self.canvas.width(), self.canvas.height())
	}

	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(x, y, width, height);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
		self.ctx.fill();
	}
}
