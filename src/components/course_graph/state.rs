//! Per-render-session state: the layout engine, node styling, the drag state
//! machine, and the position snapshot the renderer reads each frame.

use super::ingest::ValidGraph;
use super::sim::{LayoutEngine, Point, Simulation};

pub const NODE_RADIUS: f64 = 20.0;
pub const HIT_RADIUS: f64 = 24.0;

/// Display attributes of one node, fixed for the session.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub name: String,
	pub is_target: bool,
}

/// Drag gesture state. At most one node is manipulated at a time; the active
/// drag owns the pinned node and releases it on the way back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
	Idle,
	Dragging { node: usize },
}

/// Everything one rendered graph session owns. Replaced wholesale when a new
/// graph description arrives; nothing carries over.
pub struct GraphState {
	engine: Box<dyn LayoutEngine>,
	nodes: Vec<NodeStyle>,
	edges: Vec<(usize, usize)>,
	positions: Vec<Point>,
	drag: DragPhase,
	pub width: f64,
	pub height: f64,
}

impl GraphState {
	pub fn new(graph: &ValidGraph, width: f64, height: f64) -> Self {
		let engine = Box::new(Simulation::new(graph, width, height));
		Self::with_engine(engine, graph, width, height)
	}

	/// Wire an arbitrary layout engine, used by tests to script the physics.
	pub fn with_engine(
		engine: Box<dyn LayoutEngine>,
		graph: &ValidGraph,
		width: f64,
		height: f64,
	) -> Self {
		let positions = engine.positions();
		Self {
			engine,
			nodes: graph
				.nodes
				.iter()
				.map(|node| NodeStyle {
					name: node.name.clone(),
					is_target: node.is_target,
				})
				.collect(),
			edges: graph.edges.clone(),
			positions,
			drag: DragPhase::Idle,
			width,
			height,
		}
	}

	/// Advance the simulation one step and refresh the position snapshot.
	/// Nodes and their incident edges are always drawn from this one
	/// snapshot, so they can never desynchronize.
	pub fn tick(&mut self) {
		self.engine.step();
		self.positions = self.engine.positions();
	}

	pub fn positions(&self) -> &[Point] {
		&self.positions
	}

	pub fn node_styles(&self) -> &[NodeStyle] {
		&self.nodes
	}

	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.drag, DragPhase::Dragging { .. })
	}

	/// Topmost node under the pointer, if any.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (idx, p) in self.positions.iter().enumerate() {
			let (dx, dy) = (p.x - x, p.y - y);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(idx);
			}
		}
		found
	}

	/// Start a drag if the pointer is over a node: pin it where it currently
	/// sits and re-heat the layout so neighbors visibly react.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		if self.is_dragging() {
			return false;
		}
		let Some(node) = self.node_at(x, y) else {
			return false;
		};
		let p = self.positions[node];
		self.engine.reheat();
		self.engine.pin(node, p.x, p.y);
		self.drag = DragPhase::Dragging { node };
		true
	}

	/// Follow the pointer while dragging; the pin takes effect on the very
	/// next tick.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let DragPhase::Dragging { node } = self.drag {
			self.engine.pin(node, x, y);
		}
	}

	/// End the gesture: release the pin and let the energy settle back down.
	pub fn end_drag(&mut self) {
		if let DragPhase::Dragging { node } = self.drag {
			self.engine.release(node);
			self.engine.settle();
			self.drag = DragPhase::Idle;
		}
	}
}
