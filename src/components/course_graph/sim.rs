//! Force-directed layout simulation.
//!
//! A discrete stepper over node positions: pairwise charge repulsion, spring
//! attraction along resolved edges, and a centering pass that keeps the
//! centroid on the viewport midpoint. A decaying alpha scales the force
//! contributions so the layout converges; dragging re-heats it.
//!
//! The module has no drawing-surface dependencies. The renderer drives it
//! through [`LayoutEngine`] once per animation frame and reads back an
//! immutable position snapshot.

use std::f64::consts::PI;

use super::ingest::ValidGraph;

/// Simulation stops changing positions once alpha falls below this with a
/// zero alpha target.
pub const ALPHA_MIN: f64 = 0.001;
/// Per-step fraction alpha moves toward its target; reaches `ALPHA_MIN`
/// from 1.0 in roughly 300 steps.
const ALPHA_DECAY: f64 = 0.0228;
/// Fraction of velocity carried into the next step.
const VELOCITY_RETAIN: f64 = 0.6;
/// Global pairwise charge. Strongly repulsive so nodes spread out.
const CHARGE_STRENGTH: f64 = -800.0;
/// Rest separation the edge springs pull toward.
const LINK_DISTANCE: f64 = 30.0;
/// Alpha target while a drag gesture is active.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// A position snapshot entry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// The stepper interface the renderer drives on a fixed cadence.
///
/// Substitutable, so drag-state handling can be tested against a scripted
/// engine without running real physics.
pub trait LayoutEngine {
	/// Advance one tick. A no-op while settled.
	fn step(&mut self);
	/// Immutable snapshot of every node position, indexed like the graph's
	/// node list.
	fn positions(&self) -> Vec<Point>;
	/// Fix a node at `(x, y)`; forces still emanate from it, but integration
	/// writes the pinned position until released.
	fn pin(&mut self, node: usize, x: f64, y: f64);
	/// Return a pinned node to force control.
	fn release(&mut self, node: usize);
	/// Raise the alpha target so the layout visibly reacts to interaction.
	fn reheat(&mut self);
	/// Drop the alpha target back to zero so the layout can converge.
	fn settle(&mut self);
	/// True once alpha has decayed below threshold with no elevated target.
	fn is_settled(&self) -> bool;
}

#[derive(Clone, Debug)]
struct SimNode {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	pin: Option<Point>,
}

#[derive(Clone, Copy, Debug)]
struct Link {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Concrete force simulation over one validated graph.
///
/// Scoped to a single render session; rendering a new graph means building a
/// new `Simulation`, which discards all prior positions and energy.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<Link>,
	alpha: f64,
	alpha_target: f64,
	center: Point,
	jiggle_seed: usize,
}

impl Simulation {
	/// Build a simulation for `graph`, seeding positions deterministically on
	/// a circle around the viewport center.
	pub fn new(graph: &ValidGraph, width: f64, height: f64) -> Self {
		let n = graph.nodes.len();
		let center = Point {
			x: width / 2.0,
			y: height / 2.0,
		};

		let nodes = (0..n)
			.map(|i| {
				let angle = (i as f64) * 2.0 * PI / n as f64;
				SimNode {
					x: center.x + 100.0 * angle.cos(),
					y: center.y + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pin: None,
				}
			})
			.collect();

		let mut degree = vec![0usize; n];
		for &(src, tgt) in &graph.edges {
			degree[src] += 1;
			degree[tgt] += 1;
		}
		let links = graph
			.edges
			.iter()
			.map(|&(source, target)| Link {
				source,
				target,
				strength: 1.0 / degree[source].min(degree[target]) as f64,
				bias: degree[source] as f64 / (degree[source] + degree[target]) as f64,
			})
			.collect();

		Self {
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			center,
			jiggle_seed: 0,
		}
	}

	/// Current alpha, elevated on a fresh simulation and after re-heating.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	// Tiny deterministic offset standing in for zero distance, so coincident
	// nodes never yield NaN forces.
	fn jiggle(&mut self) -> f64 {
		self.jiggle_seed = (self.jiggle_seed * 9301 + 49297) % 233280;
		(self.jiggle_seed as f64 / 233280.0 - 0.5) * 1e-6
	}

	fn apply_links(&mut self) {
		for li in 0..self.links.len() {
			let link = self.links[li];
			let (s, t) = (link.source, link.target);
			let mut dx =
				self.nodes[t].x + self.nodes[t].vx - self.nodes[s].x - self.nodes[s].vx;
			let mut dy =
				self.nodes[t].y + self.nodes[t].vy - self.nodes[s].y - self.nodes[s].vy;
			if dx == 0.0 && dy == 0.0 {
				dx = self.jiggle();
				dy = self.jiggle();
			}
			let len = (dx * dx + dy * dy).sqrt();
			let scale = (len - LINK_DISTANCE) / len * self.alpha * link.strength;
			let (fx, fy) = (dx * scale, dy * scale);

			self.nodes[t].vx -= fx * link.bias;
			self.nodes[t].vy -= fy * link.bias;
			self.nodes[s].vx += fx * (1.0 - link.bias);
			self.nodes[s].vy += fy * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self) {
		// n is dozens to low hundreds, so the quadratic pass is fine.
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = self.jiggle();
					dy = self.jiggle();
				}
				let mut l2 = dx * dx + dy * dy;
				// Clamp the falloff below unit distance so near-coincident
				// nodes get a bounded push instead of a numeric explosion.
				if l2 < 1.0 {
					l2 = l2.sqrt();
				}
				let w = CHARGE_STRENGTH * self.alpha / l2;

				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
			}
		}
	}

	fn apply_center(&mut self) {
		let n = self.nodes.len() as f64;
		let (mut sx, mut sy) = (0.0, 0.0);
		for node in &self.nodes {
			sx += node.x;
			sy += node.y;
		}
		let (sx, sy) = (sx / n - self.center.x, sy / n - self.center.y);
		for node in &mut self.nodes {
			node.x -= sx;
			node.y -= sy;
		}
	}

	fn integrate(&mut self) {
		for node in &mut self.nodes {
			if let Some(pin) = node.pin {
				node.x = pin.x;
				node.y = pin.y;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= VELOCITY_RETAIN;
				node.vy *= VELOCITY_RETAIN;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}
}

impl LayoutEngine for Simulation {
	fn step(&mut self) {
		if self.is_settled() || self.nodes.is_empty() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.integrate();
	}

	fn positions(&self) -> Vec<Point> {
		self.nodes
			.iter()
			.map(|node| Point {
				x: node.x,
				y: node.y,
			})
			.collect()
	}

	fn pin(&mut self, node: usize, x: f64, y: f64) {
		self.nodes[node].pin = Some(Point { x, y });
	}

	fn release(&mut self, node: usize) {
		self.nodes[node].pin = None;
	}

	fn reheat(&mut self) {
		self.alpha_target = DRAG_ALPHA_TARGET;
	}

	fn settle(&mut self) {
		self.alpha_target = 0.0;
	}

	fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::course_graph::types::GraphNode;

	const WIDTH: f64 = 1200.0;
	const HEIGHT: f64 = 600.0;

	fn graph(n: usize, edges: Vec<(usize, usize)>) -> ValidGraph {
		let nodes = (0..n)
			.map(|i| GraphNode {
				id: i as u64,
				name: format!("Course {i}"),
				is_target: false,
			})
			.collect();
		ValidGraph { nodes, edges }
	}

	fn distance(a: Point, b: Point) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn fresh_simulation_starts_hot() {
		let sim = Simulation::new(&graph(2, vec![(0, 1)]), WIDTH, HEIGHT);
		assert_eq!(sim.alpha(), 1.0);
		assert!(!sim.is_settled());
	}

	#[test]
	fn connected_nodes_pull_together() {
		let mut sim = Simulation::new(&graph(2, vec![(0, 1)]), WIDTH, HEIGHT);
		let before = sim.positions();
		let initial = distance(before[0], before[1]);
		for _ in 0..100 {
			sim.step();
		}
		let after = sim.positions();
		assert!(distance(after[0], after[1]) < initial);
	}

	#[test]
	fn unconnected_nodes_repel() {
		let mut sim = Simulation::new(&graph(2, vec![]), WIDTH, HEIGHT);
		sim.pin(0, 600.0, 300.0);
		sim.pin(1, 601.0, 300.0);
		sim.step();
		sim.release(0);
		sim.release(1);
		let initial = {
			let p = sim.positions();
			distance(p[0], p[1])
		};
		for _ in 0..10 {
			sim.step();
		}
		let p = sim.positions();
		assert!(distance(p[0], p[1]) > initial);
	}

	#[test]
	fn lone_node_is_centered() {
		let mut sim = Simulation::new(&graph(1, vec![]), WIDTH, HEIGHT);
		sim.step();
		let p = sim.positions();
		assert_eq!(p[0], Point { x: 600.0, y: 300.0 });
	}

	#[test]
	fn centroid_converges_to_viewport_midpoint() {
		let mut sim = Simulation::new(&graph(5, vec![(0, 1), (1, 2), (2, 3), (3, 4)]), WIDTH, HEIGHT);
		for _ in 0..400 {
			sim.step();
		}
		let p = sim.positions();
		let cx = p.iter().map(|p| p.x).sum::<f64>() / p.len() as f64;
		let cy = p.iter().map(|p| p.y).sum::<f64>() / p.len() as f64;
		assert!((cx - 600.0).abs() < 1.0);
		assert!((cy - 300.0).abs() < 1.0);
	}

	#[test]
	fn pinned_node_holds_exact_position_under_forces() {
		let mut sim = Simulation::new(&graph(2, vec![(0, 1)]), WIDTH, HEIGHT);
		sim.pin(0, 50.0, 60.0);
		sim.step();
		assert_eq!(sim.positions()[0], Point { x: 50.0, y: 60.0 });
		for _ in 0..10 {
			sim.step();
		}
		assert_eq!(sim.positions()[0], Point { x: 50.0, y: 60.0 });
	}

	#[test]
	fn released_node_resumes_moving() {
		let mut sim = Simulation::new(&graph(2, vec![(0, 1)]), WIDTH, HEIGHT);
		sim.pin(0, 50.0, 60.0);
		sim.step();
		sim.release(0);
		sim.reheat();
		for _ in 0..5 {
			sim.step();
		}
		assert_ne!(sim.positions()[0], Point { x: 50.0, y: 60.0 });
	}

	#[test]
	fn alpha_decays_until_settled_and_reheat_revives() {
		let mut sim = Simulation::new(&graph(3, vec![(0, 1), (1, 2)]), WIDTH, HEIGHT);
		let mut steps = 0;
		while !sim.is_settled() {
			sim.step();
			steps += 1;
			assert!(steps < 2000, "simulation never settled");
		}

		let frozen = sim.positions();
		for _ in 0..10 {
			sim.step();
		}
		assert_eq!(sim.positions(), frozen);

		sim.reheat();
		assert!(!sim.is_settled());
		let alpha_before = sim.alpha();
		sim.step();
		assert!(sim.alpha() > alpha_before);

		sim.settle();
		while !sim.is_settled() {
			sim.step();
		}
	}

	#[test]
	fn coincident_nodes_do_not_blow_up() {
		let mut sim = Simulation::new(&graph(2, vec![(0, 1)]), WIDTH, HEIGHT);
		sim.pin(0, 600.0, 300.0);
		sim.pin(1, 600.0, 300.0);
		sim.step();
		sim.release(0);
		sim.release(1);
		for _ in 0..20 {
			sim.step();
		}
		for p in sim.positions() {
			assert!(p.x.is_finite() && p.y.is_finite());
		}
	}

	#[test]
	fn new_simulation_discards_prior_state() {
		let g = graph(4, vec![(0, 1), (1, 2), (2, 3)]);
		let mut old = Simulation::new(&g, WIDTH, HEIGHT);
		let seed = old.positions();
		for _ in 0..50 {
			old.step();
		}
		assert_ne!(old.positions(), seed);

		let fresh = Simulation::new(&g, WIDTH, HEIGHT);
		assert_eq!(fresh.alpha(), 1.0);
		assert_eq!(fresh.positions(), seed);
	}
}
