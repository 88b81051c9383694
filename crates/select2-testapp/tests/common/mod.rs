//! Shared fixtures for select2-testapp tests

#![allow(dead_code)]

use http::{Request, StatusCode};
use rstest::fixture;
use select2_forms::Form;
use select2_forms::widget::Attrs;
use select2_testapp::TestApp;
use select2_widgets::Select2Settings;
use serde_json::Value;
use std::collections::HashMap;

/// Seeded catalogue:
/// - genres Rock 1, Jazz 2, Blues 3, Pop 4, Grunge 5
/// - artists The Beatles 1, Miles Davis 2, B.B. King 3, Nirvana 4
/// - countries United Kingdom 1, Germany 2, United States 3
/// - cities London 1, Liverpool 2, Berlin 3, Hamburg 4, Seattle 5, New York 6
#[fixture]
pub fn app() -> TestApp {
	let app = TestApp::new(Select2Settings::default().with_secret_key("testapp-secret"))
		.expect("default settings are valid");
	app.seed().expect("fixture data is valid");
	app
}

pub fn data<const N: usize>(pairs: [(&str, Value); N]) -> HashMap<String, Value> {
	pairs
		.into_iter()
		.map(|(name, value)| (name.to_string(), value))
		.collect()
}

pub fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
	let request = Request::get(uri).body(()).unwrap();
	let response = app.dispatch(&request);
	let body = serde_json::from_str(response.body()).unwrap();
	(response.status(), body)
}

/// Signed field id rendered for `field`, url-encoded for a query string.
pub fn field_id(form: &Form, field: &str) -> String {
	let attrs = form
		.get_field(field)
		.unwrap()
		.widget()
		.build_attrs(&Attrs::new());
	url::form_urlencoded::byte_serialize(attrs["data-field_id"].as_bytes()).collect()
}
