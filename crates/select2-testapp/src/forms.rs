//! Demo forms, one per widget configuration
//!
//! Every constructor builds a fresh, unbound form against the application's
//! tables. Forms that use heavy or model widgets return an error when a data
//! view they name is not routed.

use crate::app::TestApp;
use crate::models::{Album, Groupie};
use crate::widgets::{
	artist_custom_title_widget, artist_data_view_widget, genre_custom_title_widget,
	genre_select2_tag_widget, primary_genre_data_url_widget, title_model_select2_multiple_widget,
};
use select2_forms::fields::choices;
use select2_forms::validators::MinLengthValidator;
use select2_forms::widget::attrs_from;
use select2_forms::{
	CharField, ChoiceField, Form, FormError, FormResult, ModelChoiceField, ModelForm,
	ModelMultipleChoiceField, MultipleChoiceField,
};
use select2_widgets::{
	DataEndpoint, HeavySelect2MultipleWidget, ModelSelect2MultipleWidget, ModelSelect2Widget,
	Select2MultipleWidget, Select2Result, Select2Widget,
};
use serde_json::{Value, json};

pub const NUMBER_CHOICES: [(i64, &str); 4] = [(1, "One"), (2, "Two"), (3, "Three"), (4, "Four")];

/// Shortest accepted title on the heavy multiple widget form.
pub const TITLE_MIN_LENGTH: usize = 4;

/// Clean hook for `title`: titles need at least four characters.
///
/// # Examples
///
/// ```
/// use select2_testapp::forms::clean_title;
/// use serde_json::json;
///
/// assert!(clean_title(&json!("Help")).is_ok());
/// assert_eq!(
///     clean_title(&json!("Red")).unwrap_err().to_string(),
///     "Title must have more than 3 characters."
/// );
/// ```
pub fn clean_title(value: &Value) -> FormResult<Value> {
	let title = value.as_str().unwrap_or_default();
	MinLengthValidator::new(TITLE_MIN_LENGTH)
		.with_message("Title must have more than 3 characters.")
		.validate(title)
		.map_err(|e| FormError::Validation(e.to_string()))?;
	Ok(value.clone())
}

fn number_choices() -> Vec<(String, String)> {
	choices(NUMBER_CHOICES)
}

pub fn album_select2_widget_form(app: &TestApp) -> ModelForm<Album> {
	let db = app.db();
	let context = app.context();
	let mut form = ModelForm::new(db.albums.clone());
	form.add_field(Box::new(
		ModelChoiceField::new("artist", db.artists.all()).with_widget(Select2Widget::new(context)),
	));
	form.add_field(Box::new(
		ModelChoiceField::new("primary_genre", db.genres.all())
			.required(false)
			.with_widget(Select2Widget::new(context)),
	));
	form
}

pub fn album_select2_multiple_widget_form(app: &TestApp) -> ModelForm<Album> {
	let db = app.db();
	let context = app.context();
	let mut form = ModelForm::new(db.albums.clone());
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("genres", db.genres.all())
			.with_widget(Select2MultipleWidget::new(context)),
	));
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("featured_artists", db.artists.all())
			.required(false)
			.with_widget(Select2MultipleWidget::new(context)),
	));
	form
}

/// Upper-case labelled artist and genre selectors; genre 2 is preselected.
pub fn album_model_select2_widget_form(app: &TestApp) -> Select2Result<ModelForm<Album>> {
	let db = app.db();
	let context = app.context();
	let mut form = ModelForm::new(db.albums.clone());
	form.add_field(Box::new(
		ModelChoiceField::new("artist", db.artists.all())
			.with_widget(artist_custom_title_widget(context, db.artists.all())?),
	));
	form.add_field(Box::new(
		ModelChoiceField::new("primary_genre", db.genres.all())
			.required(false)
			.initial(json!(2))
			.with_widget(genre_custom_title_widget(context, db.genres.all())?),
	));
	Ok(form)
}

pub fn album_model_select2_multiple_widget_required_form(
	app: &TestApp,
) -> Select2Result<ModelForm<Album>> {
	let db = app.db();
	let context = app.context();
	let mut form = ModelForm::new(db.albums.clone());
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("genres", db.genres.all())
			.with_widget(title_model_select2_multiple_widget(context, db.genres.all())?),
	));
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("featured_artists", db.artists.all())
			.required(false)
			.with_widget(title_model_select2_multiple_widget(context, db.artists.all())?),
	));
	Ok(form)
}

pub fn artist_model_select2_multiple_widget_form(app: &TestApp) -> Select2Result<Form> {
	let db = app.db();
	let context = app.context();
	let mut form = Form::new();
	form.add_field(Box::new(
		CharField::new("title".to_string())
			.required()
			.with_max_length(50),
	));
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("genres", db.genres.all()).with_widget(
			ModelSelect2MultipleWidget::new(context, db.genres.all())?
				.with_search_fields(["title__icontains"]),
		),
	));
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("featured_artists", db.artists.all())
			.required(false)
			.with_widget(
				ModelSelect2MultipleWidget::new(context, db.artists.all())?
					.with_search_fields(["title__icontains"]),
			),
	));
	Ok(form)
}

pub fn select2_widget_form(app: &TestApp) -> Form {
	let mut form = Form::new();
	form.add_field(Box::new(
		ChoiceField::new("number", number_choices())
			.required(false)
			.with_widget(Select2Widget::new(app.context())),
	));
	form
}

pub fn heavy_select2_widget_form(app: &TestApp) -> Select2Result<Form> {
	let context = app.context();
	let mut form = Form::new();
	form.add_field(Box::new(
		ChoiceField::new("artist", number_choices()).with_widget(artist_data_view_widget(context)?),
	));
	form.add_field(Box::new(
		ChoiceField::new("primary_genre", number_choices())
			.required(false)
			.with_widget(primary_genre_data_url_widget(context)?),
	));
	Ok(form)
}

/// Heavy multiple selects that search from the first keystroke, plus a
/// title checked by [`clean_title`].
pub fn heavy_select2_multiple_widget_form(app: &TestApp) -> Select2Result<Form> {
	let context = app.context();
	let search_immediately = || attrs_from([("data-minimum-input-length", "0")]);
	let mut form = Form::new();
	form.add_field(Box::new(
		CharField::new("title".to_string())
			.required()
			.with_max_length(50),
	));
	form.add_field(Box::new(
		MultipleChoiceField::new("genres", number_choices()).with_widget(
			HeavySelect2MultipleWidget::new(context, DataEndpoint::view("heavy_data_1"))?
				.with_attrs(search_immediately()),
		),
	));
	form.add_field(Box::new(
		MultipleChoiceField::new("featured_artists", number_choices())
			.required(false)
			.with_widget(
				HeavySelect2MultipleWidget::new(context, DataEndpoint::view("heavy_data_2"))?
					.with_attrs(search_immediately()),
			),
	));
	form.add_field_clean_function("title", clean_title);
	Ok(form)
}

/// Album genres as tags; unknown tags become new genres on submit.
pub fn model_select2_tag_widget_form(app: &TestApp) -> Select2Result<ModelForm<Album>> {
	let db = app.db();
	let mut form = ModelForm::new(db.albums.clone());
	form.add_field(Box::new(
		ModelMultipleChoiceField::new("genres", db.genres.all())
			.with_widget(genre_select2_tag_widget(app.context(), db.genres.all())?),
	));
	Ok(form)
}

/// Country and city narrow each other down; `city2` only follows the country.
pub fn address_chained_select2_widget_form(app: &TestApp) -> Select2Result<Form> {
	let db = app.db();
	let context = app.context();
	let search_immediately = || attrs_from([("data-minimum-input-length", "0")]);
	let mut form = Form::new();
	form.add_field(Box::new(
		ModelChoiceField::new("country", db.countries.all())
			.with_label("Country")
			.with_widget(
				ModelSelect2Widget::new(context, db.countries.all())?
					.with_search_fields(["name__icontains"])
					.with_max_results(500)
					.with_dependent_fields([("city", "cities")])
					.with_attrs(search_immediately()),
			),
	));
	form.add_field(Box::new(
		ModelChoiceField::new("city", db.cities.all())
			.with_label("City")
			.with_widget(
				ModelSelect2Widget::new(context, db.cities.all())?
					.with_search_fields(["name__icontains"])
					.with_max_results(500)
					.with_dependent_fields([("country", "country")])
					.with_attrs(search_immediately()),
			),
	));
	form.add_field(Box::new(
		ModelChoiceField::new("city2", db.cities.all())
			.with_label("City not Interdependent")
			.with_widget(
				ModelSelect2Widget::new(context, db.cities.all())?
					.with_search_fields(["name__icontains"])
					.with_max_results(500)
					.with_dependent_fields([("country", "country")])
					.with_attrs(search_immediately()),
			),
	));
	Ok(form)
}

pub fn groupie_form(app: &TestApp) -> Select2Result<ModelForm<Groupie>> {
	let db = app.db();
	let mut form = ModelForm::new(db.groupies.clone());
	form.add_field(Box::new(
		ModelChoiceField::new("obsession", db.artists.all())
			.with_widget(artist_custom_title_widget(app.context(), db.artists.all())?),
	));
	Ok(form)
}
