//! JSON data views for the heavy widget forms

use http::{Request, Response, StatusCode};
use select2_widgets::{QueryParams, json_response};
use serde_json::{Value, json};

const HEAVY_DATA_1: [&str; 10] = [
	"Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const HEAVY_DATA_2: [&str; 10] = [
	"Six", "Seven", "Eight", "Nine", "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen",
];

/// Numbers containing `term`, case-insensitively, numbered by their
/// position among the matches.
fn number_results(numbers: &[&str], term: &str) -> Value {
	let term = term.to_lowercase();
	let results: Vec<Value> = numbers
		.iter()
		.filter(|number| number.to_lowercase().contains(&term))
		.enumerate()
		.map(|(index, number)| json!({"id": index, "text": number}))
		.collect();
	json!({"err": "nil", "results": results})
}

fn respond(request: &Request<()>, numbers: &[&str]) -> Response<String> {
	let params = QueryParams::from_request(request);
	let term = params.get("term").unwrap_or_default();
	tracing::debug!(path = %request.uri().path(), term, "heavy data search");
	json_response(StatusCode::OK, &number_results(numbers, term))
}

/// Zero to Nine.
pub fn heavy_data_1(request: &Request<()>) -> Response<String> {
	respond(request, &HEAVY_DATA_1)
}

/// Six to Fifteen.
pub fn heavy_data_2(request: &Request<()>) -> Response<String> {
	respond(request, &HEAVY_DATA_2)
}
