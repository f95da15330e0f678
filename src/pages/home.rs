use leptos::prelude::*;
use log::error;

use crate::components::course_graph::{CourseGraphCanvas, GraphData};

/// A recommendation-API payload for a small prerequisite graph, as the
/// `/api/recommend/` endpoint would return it.
const SAMPLE_PAYLOAD: &str = r#"{
	"nodes": [
		{"id": 1, "name": "Intro to Programming"},
		{"id": 2, "name": "Discrete Mathematics"},
		{"id": 3, "name": "Data Structures"},
		{"id": 4, "name": "Computer Organization"},
		{"id": 5, "name": "Algorithms"},
		{"id": 6, "name": "Operating Systems", "is_target": true}
	],
	"links": [
		{"source": 1, "target": 3},
		{"source": 2, "target": 3},
		{"source": 3, "target": 5},
		{"source": 1, "target": 4},
		{"source": 4, "target": 6},
		{"source": 5, "target": 6}
	]
}"#;

/// Payload for a course with no dependency data.
const EMPTY_PAYLOAD: &str = r#"{"nodes": [], "links": []}"#;

fn parse_payload(payload: &str) -> Option<GraphData> {
	match GraphData::from_json(payload) {
		Ok(data) => Some(data),
		Err(err) => {
			error!("failed to parse graph payload: {err}");
			None
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let show_sample = RwSignal::new(true);
	let graph_data = Signal::derive(move || {
		if show_sample.get() {
			parse_payload(SAMPLE_PAYLOAD)
		} else {
			parse_payload(EMPTY_PAYLOAD)
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<h1>"Course Dependency Explorer"</h1>
				<p class="subtitle">"Drag courses to reposition them; the layout settles on its own."</p>
				<div class="graph-controls">
					<button on:click=move |_| show_sample.set(true)>"Operating Systems"</button>
					<button on:click=move |_| show_sample.set(false)>"Course without data"</button>
				</div>
				<CourseGraphCanvas data=graph_data />
			</div>
		</ErrorBoundary>
	}
}
