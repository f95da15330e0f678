//! Validation and normalization of incoming graph descriptions.
//!
//! `prepare` is pure: it either short-circuits to the empty state, rejects
//! the whole description, or resolves every edge endpoint to a node index so
//! the simulation never has to chase ids again.

use std::collections::HashMap;

use super::types::{GraphData, GraphNode};

/// A graph description that failed validation. Fatal for the render call;
/// nothing partial is drawn.
#[derive(Debug, PartialEq, Eq)]
pub enum GraphError {
	DuplicateNodeId(u64),
	UnknownEndpoint { source: u64, target: u64 },
}

// Hand-written impls: the thiserror derive would treat the `source` field of
// `UnknownEndpoint` as the error's `source()`, which a `u64` cannot be.
impl std::fmt::Display for GraphError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::DuplicateNodeId(id) => write!(f, "duplicate node id {id}"),
			Self::UnknownEndpoint { source, target } => {
				write!(f, "edge {source} -> {target} references an unknown node")
			}
		}
	}
}

impl std::error::Error for GraphError {}

/// A validated graph, edges resolved to indices into `nodes`.
#[derive(Clone, Debug)]
pub struct ValidGraph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<(usize, usize)>,
}

/// Outcome of ingesting a graph description.
#[derive(Clone, Debug)]
pub enum Prepared {
	/// No dependency data. Expected when a query yields nothing; not an error.
	Empty,
	Graph(ValidGraph),
}

/// Validate a graph description from the recommendation service.
///
/// An absent description, or one with zero nodes, is the empty state. An
/// edge referencing an id outside the node set rejects the whole call.
pub fn prepare(data: Option<&GraphData>) -> Result<Prepared, GraphError> {
	let Some(data) = data else {
		return Ok(Prepared::Empty);
	};
	if data.nodes.is_empty() {
		return Ok(Prepared::Empty);
	}

	let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
	for (idx, node) in data.nodes.iter().enumerate() {
		if id_to_idx.insert(node.id, idx).is_some() {
			return Err(GraphError::DuplicateNodeId(node.id));
		}
	}

	let mut edges = Vec::with_capacity(data.links.len());
	for link in &data.links {
		match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
			(Some(&src), Some(&tgt)) => edges.push((src, tgt)),
			_ => {
				return Err(GraphError::UnknownEndpoint {
					source: link.source,
					target: link.target,
				});
			}
		}
	}

	Ok(Prepared::Graph(ValidGraph {
		nodes: data.nodes.clone(),
		edges,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::course_graph::types::GraphLink;

	fn node(id: u64, name: &str) -> GraphNode {
		GraphNode {
			id,
			name: name.into(),
			is_target: false,
		}
	}

	#[test]
	fn absent_description_is_empty_state() {
		assert!(matches!(prepare(None), Ok(Prepared::Empty)));
	}

	#[test]
	fn zero_nodes_is_empty_state() {
		let data = GraphData::default();
		assert!(matches!(prepare(Some(&data)), Ok(Prepared::Empty)));
	}

	#[test]
	fn edges_resolve_to_node_indices() {
		let data = GraphData {
			nodes: vec![node(10, "Algebra"), node(20, "Calculus")],
			links: vec![GraphLink {
				source: 10,
				target: 20,
			}],
		};
		let Ok(Prepared::Graph(graph)) = prepare(Some(&data)) else {
			panic!("expected a valid graph");
		};
		assert_eq!(graph.edges, vec![(0, 1)]);
		assert_eq!(graph.nodes.len(), 2);
	}

	#[test]
	fn unknown_endpoint_rejects_whole_call() {
		let data = GraphData {
			nodes: vec![node(1, "Algebra")],
			links: vec![GraphLink { source: 1, target: 2 }],
		};
		assert_eq!(
			prepare(Some(&data)).unwrap_err(),
			GraphError::UnknownEndpoint { source: 1, target: 2 }
		);
	}

	#[test]
	fn duplicate_id_rejects_whole_call() {
		let data = GraphData {
			nodes: vec![node(1, "Algebra"), node(1, "Calculus")],
			links: vec![],
		};
		assert_eq!(
			prepare(Some(&data)).unwrap_err(),
			GraphError::DuplicateNodeId(1)
		);
	}
}
