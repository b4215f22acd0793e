//! Leptos component hosting the particle field background.
//!
//! The component creates a viewport-filling canvas behind the page and wires
//! window resize and pointer events into a [`FieldEngine`]. An animation loop
//! runs via `requestAnimationFrame`, calling [`FieldEngine::tick`] each frame.
//! Event handlers only cache inputs; all simulation happens inside the tick.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::engine::FieldEngine;
use super::surface::CanvasSurface;
use super::theme::DocumentTheme;

type Engine = FieldEngine<CanvasSurface, DocumentTheme>;
type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type PointerCallback = Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>>;

/// Renders the animated node-graph background.
///
/// The canvas is fixed behind page content and ignores pointer events so it
/// never intercepts clicks; pointer position is tracked on the window
/// instead. If the browser cannot provide a 2D context the canvas stays blank
/// and the rest of the page is unaffected.
#[component]
pub fn ParticleFieldCanvas(
	/// Field tunables. Defaults to the drift preset.
	#[prop(optional)]
	config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: Rc<RefCell<Option<Engine>>> = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let move_cb: PointerCallback = Rc::new(RefCell::new(None));
	let leave_cb: PointerCallback = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		if engine.borrow().is_some() {
			return;
		}

		let (w, h) = viewport_size(&window).unwrap_or((0, 0));
		canvas.set_width(w);
		canvas.set_height(h);

		let surface = match CanvasSurface::acquire(canvas.clone()) {
			Ok(surface) => Some(surface),
			Err(e) => {
				log::warn!("particle-field: {e}");
				None
			}
		};
		*engine.borrow_mut() = Some(FieldEngine::init(
			surface,
			DocumentTheme,
			config.clone(),
			random_seed(),
		));

		let (engine_resize, canvas_resize) = (engine.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().and_then(|w| viewport_size(&w)) else {
				return;
			};
			if let Some(ref mut e) = *engine_resize.borrow_mut() {
				if !e.has_surface() {
					canvas_resize.set_width(nw);
					canvas_resize.set_height(nh);
					match CanvasSurface::acquire(canvas_resize.clone()) {
						Ok(surface) => e.attach(surface),
						Err(err) => log::warn!("particle-field: {err}"),
					}
				}
				e.on_resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (engine_move, canvas_move) = (engine.clone(), canvas.clone());
		*move_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_move.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			if let Some(ref mut e) = *engine_move.borrow_mut() {
				if (0.0..=rect.width()).contains(&x) && (0.0..=rect.height()).contains(&y) {
					e.on_pointer_move(x, y);
				} else {
					e.on_pointer_leave();
				}
			}
		}));
		if let Some(ref cb) = *move_cb.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let engine_leave = engine.clone();
		*leave_cb.borrow_mut() = Some(Closure::new(move |_: MouseEvent| {
			if let Some(ref mut e) = *engine_leave.borrow_mut() {
				e.on_pointer_leave();
			}
		}));
		if let (Some(root), Some(cb)) = (
			window.document().and_then(|d| d.document_element()),
			leave_cb.borrow().as_ref(),
		) {
			let _ = root.add_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		}

		let (engine_anim, animate_inner) = (engine.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut e) = *engine_anim.borrow_mut() {
				e.tick();
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="position: fixed; inset: 0; z-index: -1; display: block; pointer-events: none;"
		/>
	}
}

/// Window inner size in whole pixels.
fn viewport_size(window: &Window) -> Option<(u32, u32)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w.max(0.0) as u32, h.max(0.0) as u32))
}

/// Fresh seed per page load; placement is meant to differ between visits.
fn random_seed() -> u64 {
	let now = js_sys::Date::now() as u64;
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	now.rotate_left(21) ^ noise
}
