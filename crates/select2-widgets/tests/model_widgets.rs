//! Model widget tests
//!
//! Rendering, searching and tag handling of query set backed widgets

mod common;

use common::{Band, bands, context};
use rstest::rstest;
use select2_forms::widget::Attrs;
use select2_forms::{Lookup, Model, Table, Widget};
use select2_widgets::widgets::DEFAULT_MAX_RESULTS;
use select2_widgets::{
	ModelSelect2MultipleWidget, ModelSelect2TagWidget, ModelSelect2Widget, ResultSource,
	Select2Context, Select2Error, Select2Settings, WidgetCache,
};
use serde_json::json;
use std::collections::HashMap;

fn names(widget: &ModelSelect2Widget<Band>, term: &str, dependent: &[Lookup]) -> Vec<String> {
	widget
		.filter_queryset(term, dependent)
		.unwrap()
		.fetch()
		.into_iter()
		.map(|b| b.name)
		.collect()
}

#[rstest]
fn test_defaults_to_auto_view(context: Select2Context, bands: Table<Band>) {
	// Act
	let widget = ModelSelect2Widget::new(&context, bands.all()).unwrap();

	// Assert
	assert_eq!(widget.url(), "/select2/fields/auto.json");
	assert_eq!(widget.max_results(), DEFAULT_MAX_RESULTS);
	assert_eq!(DEFAULT_MAX_RESULTS, 25);
	assert_eq!(widget.cache_key(), format!("select2_{}", widget.uuid()));
}

#[rstest]
fn test_render_registers_data_source(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = ModelSelect2Widget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_max_results(2);
	assert!(context.cache().get(widget.cache_key()).is_none());

	// Act
	widget.render("band", None, &[], &Attrs::new());

	// Assert
	let cached = context.cache().get(widget.cache_key()).unwrap();
	assert_eq!(cached.url, "/select2/fields/auto.json");
	assert_eq!(cached.source.max_results(), 2);
	let results = cached.source.results("the", &[]).unwrap();
	assert_eq!(results.len(), 3);
	assert_eq!(results[0], json!({"id": 1, "text": "The Beatles"}));
}

#[rstest]
fn test_render_shows_only_selected_records(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let mut widget = ModelSelect2MultipleWidget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"]);
	widget.set_required(true);

	// Act
	let html = widget.render("bands", Some(&json!(["3", 1])), &[], &Attrs::new());

	// Assert
	assert!(html.contains("<option value=\"1\" selected>The Beatles</option>"));
	assert!(html.contains("<option value=\"3\" selected>Nirvana</option>"));
	assert!(!html.contains("Kraftwerk"));
	assert!(html.contains("class=\"django-select2 django-select2-heavy\""));
	assert!(html.contains(&format!("data-field_id=\"{}\"", widget.field_id())));
	assert!(html.ends_with(" multiple><option value=\"1\" selected>The Beatles</option><option value=\"3\" selected>Nirvana</option></select>"));
}

#[rstest]
fn test_optional_single_renders_empty_option_first(context: Select2Context, bands: Table<Band>) {
	let widget = ModelSelect2Widget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"]);

	let html = widget.render("band", Some(&json!(5)), &[], &Attrs::new());

	assert!(html.contains("><option value=\"\"></option><option value=\"5\" selected>Kraftwerk</option></select>"));
}

#[rstest]
fn test_label_override(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = ModelSelect2Widget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_label_from_instance(|band: &Band| band.name.to_uppercase());
	let nirvana = bands.get(3).unwrap();

	// Act & Assert
	assert_eq!(widget.label_from_instance(&nirvana), "NIRVANA");
	assert_eq!(
		widget.result_from_instance(&nirvana),
		json!({"id": 3, "text": "NIRVANA"})
	);
	let html = widget.render("band", Some(&json!(3)), &[], &Attrs::new());
	assert!(html.contains(">NIRVANA</option>"));
}

#[rstest]
fn test_search_bits_and_whole_term(context: Select2Context, bands: Table<Band>) {
	let widget = ModelSelect2Widget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains", "pk__startswith"]);

	assert_eq!(names(&widget, "the stones", &[]), vec!["The Rolling Stones"]);
	assert_eq!(names(&widget, "4", &[]), vec!["The Doors"]);
	assert_eq!(names(&widget, "", &[]).len(), 5);
	assert!(names(&widget, "the kraftwerk", &[]).is_empty());
}

#[rstest]
fn test_dependent_lookup_filters(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = ModelSelect2Widget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_dependent_fields([("country", "country")]);

	// Act
	let found = names(&widget, "the", &[Lookup::new("country", "2")]);
	let attrs = widget.build_attrs(&Attrs::new());

	// Assert
	assert_eq!(found, vec!["The Doors"]);
	assert_eq!(attrs["data-select2-dependent-fields"], "country");
}

#[rstest]
fn test_missing_search_fields(context: Select2Context, bands: Table<Band>) {
	let widget = ModelSelect2Widget::new(&context, bands.all()).unwrap();

	let result = widget.filter_queryset("x", &[]);

	assert!(matches!(result, Err(Select2Error::ImproperlyConfigured(_))));
}

#[rstest]
fn test_tag_widget_creates_each_new_value_once(context: Select2Context, bands: Table<Band>) {
	// Arrange
	let widget = ModelSelect2TagWidget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_create_value(|queryset, value| {
			Ok(queryset.create_with(|id| Band {
				id,
				name: value.to_string(),
				country: 0,
			}))
		});
	let data = HashMap::from([(
		"bands".to_string(),
		json!(["2", "Can", "Can", "Neu!", "2"]),
	)]);

	// Act
	let value = widget.value_from_datadict(&data, "bands");

	// Assert
	assert_eq!(value, Some(json!(["2", "6", "7"])));
	assert_eq!(bands.len(), 7);
	assert_eq!(bands.get(6).map(|b| b.name), Some("Can".to_string()));
	assert_eq!(bands.get(7).map(|b| b.name), Some("Neu!".to_string()));
}

#[rstest]
fn test_tag_widget_without_hook_passes_values_through(context: Select2Context, bands: Table<Band>) {
	let widget = ModelSelect2TagWidget::new(&context, bands.all())
		.unwrap()
		.with_search_fields(["name__icontains"]);
	let data = HashMap::from([("bands".to_string(), json!("Can"))]);

	let value = widget.value_from_datadict(&data, "bands");

	assert_eq!(value, Some(json!(["Can"])));
	assert_eq!(bands.len(), 5);
}

#[rstest]
fn test_tag_widget_outside_queryset_is_new(context: Select2Context, bands: Table<Band>) {
	// pk 5 exists in the table but not in the filtered query set
	let uk = bands.all().filter(Lookup::new("country", 1));
	let widget = ModelSelect2TagWidget::new(&context, uk)
		.unwrap()
		.with_search_fields(["name__icontains"])
		.with_create_value(|queryset, value| {
			Ok(queryset.create_with(|id| Band {
				id,
				name: value.to_string(),
				country: 1,
			}))
		});
	let data = HashMap::from([("bands".to_string(), json!(["1", "5"]))]);

	let value = widget.value_from_datadict(&data, "bands");

	assert_eq!(value, Some(json!(["1", "6"])));
	assert_eq!(bands.get(6).map(|b| b.pk()), Some(6));
}

#[rstest]
fn test_repeated_renders_stay_within_cache_limit(bands: Table<Band>) {
	// Arrange
	let settings = Select2Settings::default()
		.with_secret_key("widget-test-secret")
		.with_cache_max_entries(100);
	let context = Select2Context::new(settings).unwrap();

	// Act
	let mut last = None;
	for _ in 0..1000 {
		let widget = ModelSelect2Widget::new(&context, bands.all())
			.unwrap()
			.with_search_fields(["name__icontains"]);
		widget.render("band", None, &[], &Attrs::new());
		last = Some(widget);
	}

	// Assert
	assert_eq!(context.cache().len(), 100);
	let last = last.unwrap();
	assert!(context.cache().get(&last.cache_key()).is_some());
}
