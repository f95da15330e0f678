//! Wire shape of a graph description as produced by the recommendation API.

use serde::Deserialize;

/// One course in the dependency graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	pub id: u64,
	pub name: String,
	#[serde(default)]
	pub is_target: bool,
}

/// A directed prerequisite edge between two course ids.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: u64,
	pub target: u64,
}

/// A complete graph description, submitted as one atomic unit per render.
///
/// A missing `nodes` or `links` field deserializes to an empty collection;
/// zero nodes is the expected "no dependency data" signal, not an error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a JSON payload from the recommendation service.
	pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_api_payload() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": 1, "name": "Algebra"},
					{"id": 2, "name": "Calculus", "is_target": true}
				],
				"links": [{"source": 1, "target": 2}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].name, "Algebra");
		assert!(!data.nodes[0].is_target);
		assert!(data.nodes[1].is_target);
		assert_eq!(data.links.len(), 1);
		assert_eq!((data.links[0].source, data.links[0].target), (1, 2));
	}

	#[test]
	fn missing_collections_default_to_empty() {
		let data = GraphData::from_json("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}

	#[test]
	fn rejects_garbage_payload() {
		assert!(GraphData::from_json("not json").is_err());
	}
}
