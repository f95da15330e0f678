mod component;
pub mod ingest;
mod render;
pub mod sim;
mod state;
mod types;

pub use component::{CANVAS_HEIGHT, CANVAS_WIDTH, CourseGraphCanvas};
pub use ingest::{GraphError, Prepared, ValidGraph, prepare};
pub use types::{GraphData, GraphLink, GraphNode};
