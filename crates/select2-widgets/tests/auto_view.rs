//! Auto-response view tests
//!
//! Requests are dispatched through the context's route table, the same way
//! an application would serve them.

mod common;

use common::{Band, band, bands, context};
use http::{Request, StatusCode};
use rstest::rstest;
use select2_forms::widget::Attrs;
use select2_forms::{Table, Widget};
use select2_widgets::{FieldIdSigner, ModelSelect2Widget, Select2Context};
use serde_json::{Value, json};
use uuid::Uuid;

fn get(context: &Select2Context, uri: &str) -> (StatusCode, Value) {
	let request = Request::get(uri).body(()).unwrap();
	let response = context.urls().dispatch(&request);
	let body = serde_json::from_str(response.body()).unwrap();
	(response.status(), body)
}

fn rendered(context: &Select2Context, bands: &Table<Band>) -> ModelSelect2Widget<Band> {
	let widget = ModelSelect2Widget::new(context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_dependent_fields([("country", "country")])
		.with_max_results(2);
	widget.render("band", None, &[], &Attrs::new());
	widget
}

fn auto_url(widget: &ModelSelect2Widget<Band>, query: &str) -> String {
	let field_id: String = url::form_urlencoded::byte_serialize(widget.field_id().as_bytes()).collect();
	format!("/select2/fields/auto.json?field_id={}{}", field_id, query)
}

#[rstest]
fn test_first_page_has_more(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = rendered(&context, &bands);

	// Act
	let (status, body) = get(&context, &auto_url(&widget, "&term=the"));

	// Assert
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({
			"results": [
				{"id": 1, "text": "The Beatles"},
				{"id": 2, "text": "The Rolling Stones"},
			],
			"more": true,
		})
	);
}

#[rstest]
fn test_last_page(context: Select2Context, bands: Table<Band>) {
	let widget = rendered(&context, &bands);

	let (status, body) = get(&context, &auto_url(&widget, "&term=the&page=last"));

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({"results": [{"id": 4, "text": "The Doors"}], "more": false})
	);
}

#[rstest]
fn test_dependent_field_values(context: Select2Context, bands: Table<Band>) {
	let widget = rendered(&context, &bands);

	let (_, single) = get(&context, &auto_url(&widget, "&country=2"));
	let (_, many) = get(
		&context,
		&auto_url(&widget, "&country%5B%5D=2&country%5B%5D=3&page=2"),
	);

	assert_eq!(single["results"].as_array().map(Vec::len), Some(2));
	assert_eq!(single["results"][0]["text"], "Nirvana");
	assert_eq!(many["results"], json!([{"id": 5, "text": "Kraftwerk"}]));
	assert_eq!(many["more"], false);
}

#[rstest]
fn test_records_created_after_render_are_found(context: Select2Context, bands: Table<Band>) {
	let widget = rendered(&context, &bands);
	band(&bands, "Can", 3);

	let (_, body) = get(&context, &auto_url(&widget, "&term=can"));

	assert_eq!(body["results"], json!([{"id": 6, "text": "Can"}]));
}

#[rstest]
fn test_missing_field_id(context: Select2Context) {
	let (status, body) = get(&context, "/select2/fields/auto.json?term=x");

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "No \"field_id\" provided."}));
}

#[rstest]
fn test_tampered_field_id(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = rendered(&context, &bands);
	let mut field_id = widget.field_id().to_string();
	field_id.pop();

	// Act
	let (status, body) = get(
		&context,
		&format!("/select2/fields/auto.json?field_id={}", field_id),
	);

	// Assert
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "Invalid \"field_id\"."}));
}

#[rstest]
fn test_unknown_field_id(context: Select2Context) {
	let signer = FieldIdSigner::new("widget-test-secret");
	let field_id = signer.sign(&Uuid::new_v4()).unwrap();

	let (status, body) = get(
		&context,
		&format!("/select2/fields/auto.json?field_id={}", field_id),
	);

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "field_id not found"}));
}

#[rstest]
fn test_field_id_issued_for_other_view(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = rendered(&context, &bands);
	let view = select2_widgets::AutoResponseView::from_context(&context);
	context.urls().route("other", "/other.json", view);

	// Act
	let (status, body) = get(
		&context,
		&format!("/other.json?field_id={}", widget.field_id()),
	);

	// Assert
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "field_id was issued for another view."}));
}

#[rstest]
fn test_page_out_of_range(context: Select2Context, bands: Table<Band>) {
	let widget = rendered(&context, &bands);

	let (status, body) = get(&context, &auto_url(&widget, "&page=9"));

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "That page contains no results"}));
}

#[rstest]
fn test_widget_without_search_fields_is_a_server_error(
	context: Select2Context,
	bands: Table<Band>,
) {
	let widget = ModelSelect2Widget::new(&context, bands.all()).unwrap();
	widget.render("band", None, &[], &Attrs::new());

	let (status, _) = get(&context, &auto_url(&widget, ""));

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
