//! Widget configurations used by the demo forms

use crate::models::{Artist, Genre};
use select2_forms::{Model, QuerySet};
use select2_widgets::{
	DataEndpoint, HeavySelect2Widget, ModelSelect2MultipleWidget, ModelSelect2TagWidget,
	ModelSelect2Widget, Select2Context, Select2Result,
};
use serde_json::Value;

/// Search by title, or by the leading digits of the primary key.
pub const TITLE_SEARCH_FIELDS: [&str; 2] = ["title__icontains", "pk__startswith"];

pub fn title_model_select2_widget<M: Model>(
	context: &Select2Context,
	queryset: QuerySet<M>,
) -> Select2Result<ModelSelect2Widget<M>> {
	Ok(ModelSelect2Widget::new(context, queryset)?.with_search_fields(TITLE_SEARCH_FIELDS))
}

pub fn title_model_select2_multiple_widget<M: Model>(
	context: &Select2Context,
	queryset: QuerySet<M>,
) -> Select2Result<ModelSelect2MultipleWidget<M>> {
	Ok(ModelSelect2MultipleWidget::new(context, queryset)?.with_search_fields(TITLE_SEARCH_FIELDS))
}

/// Tag widget over genres; a tag that is not a genre yet becomes one.
pub fn genre_select2_tag_widget(
	context: &Select2Context,
	genres: QuerySet<Genre>,
) -> Select2Result<ModelSelect2TagWidget<Genre>> {
	Ok(ModelSelect2TagWidget::new(context, genres)?
		.with_search_fields(TITLE_SEARCH_FIELDS)
		.with_create_value(|queryset, title| {
			let mut genre = Genre::default();
			genre.set_field("title", Value::from(title))?;
			Ok(queryset.table().save(genre))
		}))
}

/// Artist selector labelled with upper-cased titles.
pub fn artist_custom_title_widget(
	context: &Select2Context,
	artists: QuerySet<Artist>,
) -> Select2Result<ModelSelect2Widget<Artist>> {
	Ok(ModelSelect2Widget::new(context, artists)?
		.with_search_fields(["title__icontains"])
		.with_label_from_instance(|artist: &Artist| artist.title.to_uppercase()))
}

/// Genre selector labelled with upper-cased titles.
pub fn genre_custom_title_widget(
	context: &Select2Context,
	genres: QuerySet<Genre>,
) -> Select2Result<ModelSelect2Widget<Genre>> {
	Ok(ModelSelect2Widget::new(context, genres)?
		.with_search_fields(["title__icontains"])
		.with_label_from_instance(|genre: &Genre| genre.title.to_uppercase()))
}

pub fn artist_data_view_widget(context: &Select2Context) -> Select2Result<HeavySelect2Widget> {
	HeavySelect2Widget::new(context, DataEndpoint::view("heavy_data_1"))
}

pub fn primary_genre_data_url_widget(context: &Select2Context) -> Select2Result<HeavySelect2Widget> {
	HeavySelect2Widget::new(context, DataEndpoint::url("/heavy_data_2/"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::Db;
	use rstest::rstest;
	use select2_forms::widget::{Attrs, Widget};
	use select2_widgets::Select2Settings;
	use std::collections::HashMap;

	fn context() -> Select2Context {
		Select2Context::new(Select2Settings::default()).unwrap()
	}

	#[rstest]
	fn test_tag_widget_creates_genre_with_typed_title() {
		// Arrange
		let db = Db::new();
		db.create_genre("Rock").unwrap();
		let widget = genre_select2_tag_widget(&context(), db.genres.all()).unwrap();
		let data = HashMap::from([("genres".to_string(), serde_json::json!(["1", "Shoegaze"]))]);

		// Act
		let value = widget.value_from_datadict(&data, "genres");

		// Assert
		assert_eq!(value, Some(serde_json::json!(["1", "2"])));
		assert_eq!(db.genres.len(), 2);
		assert_eq!(db.genres.get(2).map(|g| g.title), Some("Shoegaze".to_string()));
	}

	#[rstest]
	fn test_tag_too_long_for_a_title_is_not_created() {
		let db = Db::new();
		let widget = genre_select2_tag_widget(&context(), db.genres.all()).unwrap();
		let long = "x".repeat(60);
		let data = HashMap::from([("genres".to_string(), Value::from(long.clone()))]);

		let value = widget.value_from_datadict(&data, "genres");

		assert_eq!(value, Some(serde_json::json!([long])));
		assert!(db.genres.is_empty());
	}

	#[rstest]
	fn test_custom_title_label_is_upper_case() {
		let db = Db::new();
		let artist = db.create_artist("The Beatles", &[]).unwrap();
		let widget = artist_custom_title_widget(&context(), db.artists.all()).unwrap();

		assert_eq!(widget.label_from_instance(&artist), "THE BEATLES");
	}

	#[rstest]
	fn test_data_url_widget_points_at_literal_path() {
		let widget = primary_genre_data_url_widget(&context()).unwrap();

		let attrs = widget.build_attrs(&Attrs::new());

		assert_eq!(attrs["data-ajax--url"], "/heavy_data_2/");
	}

	#[rstest]
	fn test_data_view_widget_needs_routed_view() {
		assert!(artist_data_view_widget(&context()).is_err());
	}
}
