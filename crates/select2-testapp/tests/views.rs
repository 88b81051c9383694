//! Data view tests: heavy data views and the auto view behind demo forms

mod common;

use common::{app, field_id, get};
use http::StatusCode;
use rstest::rstest;
use select2_testapp::{TestApp, forms};
use serde_json::json;

#[rstest]
#[case("/heavy_data_1/?term=F", json!([{"id": 0, "text": "Four"}, {"id": 1, "text": "Five"}]))]
#[case("/heavy_data_2/?term=tw", json!([{"id": 0, "text": "Twelve"}]))]
#[case("/heavy_data_1/?term=zzz", json!([]))]
fn test_heavy_data_views(app: TestApp, #[case] uri: &str, #[case] results: serde_json::Value) {
	// Act
	let (status, body) = get(&app, uri);

	// Assert
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"err": "nil", "results": results}));
}

#[rstest]
fn test_unknown_path(app: TestApp) {
	let (status, body) = get(&app, "/heavy_data_3/");

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "Not found."}));
}

#[rstest]
fn test_chained_city_follows_country(app: TestApp) {
	// Arrange
	let form = forms::address_chained_select2_widget_form(&app).unwrap();
	form.render();

	// Act
	let (status, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}&country=1", field_id(&form, "city")),
	);

	// Assert
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({
			"results": [{"id": 1, "text": "London"}, {"id": 2, "text": "Liverpool"}],
			"more": false,
		})
	);
}

#[rstest]
fn test_chained_country_follows_city(app: TestApp) {
	let form = forms::address_chained_select2_widget_form(&app).unwrap();
	form.render();

	let (_, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}&city=4", field_id(&form, "country")),
	);

	assert_eq!(body["results"], json!([{"id": 2, "text": "Germany"}]));
}

#[rstest]
fn test_independent_city_ignores_missing_country(app: TestApp) {
	let form = forms::address_chained_select2_widget_form(&app).unwrap();
	form.render();

	let (_, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}&term=burg", field_id(&form, "city2")),
	);

	assert_eq!(body["results"], json!([{"id": 4, "text": "Hamburg"}]));
}

#[rstest]
fn test_custom_title_search_results_are_upper_case(app: TestApp) {
	// Arrange
	let form = forms::groupie_form(&app).unwrap();
	form.render();

	// Act
	let (_, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}&term=nir", field_id(&form, "obsession")),
	);

	// Assert
	assert_eq!(body["results"], json!([{"id": 4, "text": "NIRVANA"}]));
}

#[rstest]
fn test_title_widget_searches_by_pk_prefix(app: TestApp) {
	let form = forms::album_model_select2_multiple_widget_required_form(&app).unwrap();
	form.render();

	let (_, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}&term=5", field_id(&form, "genres")),
	);

	assert_eq!(body["results"], json!([{"id": 5, "text": "Grunge"}]));
}

#[rstest]
fn test_unrendered_widget_is_unknown(app: TestApp) {
	let form = forms::groupie_form(&app).unwrap();

	let (status, body) = get(
		&app,
		&format!("/select2/fields/auto.json?field_id={}", field_id(&form, "obsession")),
	);

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({"detail": "field_id not found"}));
}
