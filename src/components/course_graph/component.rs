use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::ingest::{self, Prepared};
use super::render;
use super::state::GraphState;
use super::types::GraphData;

/// Fixed viewport, matching the recommendation page's graph panel.
pub const CANVAS_WIDTH: f64 = 1200.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const EMPTY_NOTICE: &str = "No dependency data for this course.";
const MALFORMED_NOTICE: &str = "Dependency data could not be displayed.";

/// Interactive course dependency graph on a fixed-size canvas.
///
/// Each change of `data` is one atomic render call: the description is
/// validated first, the previous session is discarded, and only then does
/// drawing start. A rejected description leaves the surface cleared.
#[component]
pub fn CourseGraphCanvas(#[prop(into)] data: Signal<Option<GraphData>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let payload = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CANVAS_WIDTH as u32);
		canvas.set_height(CANVAS_HEIGHT as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		// Replacing the session here also cancels the previous graph's
		// ticks: the animation loop only ever reads the current session,
		// so a stale simulation can never write to the new surface.
		match ingest::prepare(payload.as_ref()) {
			Ok(Prepared::Empty) => {
				*state_init.borrow_mut() = None;
				render::render_notice(&ctx, CANVAS_WIDTH, CANVAS_HEIGHT, EMPTY_NOTICE);
			}
			Ok(Prepared::Graph(graph)) => {
				*state_init.borrow_mut() =
					Some(GraphState::new(&graph, CANVAS_WIDTH, CANVAS_HEIGHT));
			}
			Err(err) => {
				error!("rejecting graph render: {err}");
				*state_init.borrow_mut() = None;
				render::render_notice(&ctx, CANVAS_WIDTH, CANVAS_HEIGHT, MALFORMED_NOTICE);
			}
		}

		// One animation loop per mounted component, started on first run.
		if animate_init.borrow().is_none() {
			let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					s.tick();
					render::render(s, &ctx);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	});

	let pointer = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="course-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
