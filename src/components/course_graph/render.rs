//! Canvas drawing. Pure readers of the session state: every frame redraws
//! edges, nodes and labels from the same position snapshot, so an edge can
//! never lag behind the node it is attached to.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{GraphState, NODE_RADIUS};

const BACKGROUND: &str = "#fafafa";
const EDGE_STROKE: &str = "rgba(153, 153, 153, 0.6)";
const TARGET_FILL: &str = "#ff4d4f";
const COURSE_FILL: &str = "#1890ff";
const LABEL_FILL: &str = "#333333";
const NOTICE_FILL: &str = "#8c8c8c";

/// Draw one frame of the graph.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

/// Clear the surface and show a neutral informational notice, used for the
/// empty state and for rejected render calls. Nothing partial is ever drawn.
pub fn render_notice(ctx: &CanvasRenderingContext2d, width: f64, height: f64, message: &str) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.set_fill_style_str(NOTICE_FILL);
	ctx.set_font("16px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(message, width / 2.0, height / 2.0);
	ctx.set_text_align("start");
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	ctx.set_stroke_style_str(EDGE_STROKE);
	ctx.set_line_width(1.5);

	for &(src, tgt) in state.edges() {
		let (a, b) = (positions[src], positions[tgt]);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();

	for (style, p) in state.node_styles().iter().zip(positions) {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if style.is_target {
			TARGET_FILL
		} else {
			COURSE_FILL
		});
		ctx.fill();

		ctx.set_fill_style_str(LABEL_FILL);
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(&style.name, p.x + NODE_RADIUS + 4.0, p.y + 4.0);
	}
}
