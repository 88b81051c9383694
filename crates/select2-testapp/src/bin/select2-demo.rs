//! Seed the demo tables, render every demo form and run a few searches.
//!
//! Settings come from `SELECT2_*` environment variables; log verbosity from
//! `RUST_LOG`.

use http::Request;
use select2_forms::Form;
use select2_forms::widget::Attrs;
use select2_testapp::{TestApp, forms};
use select2_widgets::Select2Settings;
use tracing_subscriber::EnvFilter;

fn print_form(title: &str, form: &Form) {
	println!("== {} ==", title);
	println!("{}\n", form.render());
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let app = TestApp::new(Select2Settings::from_env()?)?;
	app.seed()?;

	print_form("AlbumSelect2WidgetForm", &forms::album_select2_widget_form(&app));
	print_form(
		"AlbumSelect2MultipleWidgetForm",
		&forms::album_select2_multiple_widget_form(&app),
	);
	print_form(
		"AlbumModelSelect2WidgetForm",
		&*forms::album_model_select2_widget_form(&app)?,
	);
	print_form(
		"AlbumModelSelect2MultipleWidgetRequiredForm",
		&*forms::album_model_select2_multiple_widget_required_form(&app)?,
	);
	print_form(
		"ArtistModelSelect2MultipleWidgetForm",
		&forms::artist_model_select2_multiple_widget_form(&app)?,
	);
	print_form("Select2WidgetForm", &forms::select2_widget_form(&app));
	print_form("HeavySelect2WidgetForm", &forms::heavy_select2_widget_form(&app)?);
	print_form(
		"HeavySelect2MultipleWidgetForm",
		&forms::heavy_select2_multiple_widget_form(&app)?,
	);
	print_form(
		"ModelSelect2TagWidgetForm",
		&*forms::model_select2_tag_widget_form(&app)?,
	);

	let address = forms::address_chained_select2_widget_form(&app)?;
	print_form("AddressChainedSelect2WidgetForm", &address);
	print_form("GroupieForm", &*forms::groupie_form(&app)?);

	println!("== Media ==");
	println!("{}\n", address.media().render());

	// Rendering registered every model widget, so its field id now resolves.
	let city_field_id = address
		.get_field("city")
		.and_then(|field| field.widget().build_attrs(&Attrs::new()).remove("data-field_id"));
	let mut searches = vec![
		"/heavy_data_1/?term=e".to_string(),
		"/heavy_data_2/?term=teen".to_string(),
	];
	if let Some(field_id) = city_field_id {
		let field_id: String = url::form_urlencoded::byte_serialize(field_id.as_bytes()).collect();
		searches.push(format!(
			"{}?field_id={}&country=2",
			app.context().settings().auto_view_path,
			field_id
		));
	}
	for uri in searches {
		let response = app.dispatch(&Request::get(uri.as_str()).body(())?);
		println!("GET {} -> {} {}", uri, response.status(), response.body());
	}

	Ok(())
}
