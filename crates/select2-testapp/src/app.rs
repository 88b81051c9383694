//! Application wiring: tables, select2 context and data view routes

use crate::models::Db;
use crate::views::{heavy_data_1, heavy_data_2};
use http::{Request, Response};
use select2_forms::ModelResult;
use select2_widgets::{Select2Context, Select2Result, Select2Settings};

/// The demo application
///
/// Owns the tables and a [`Select2Context`] whose route table serves the
/// auto-response view and both heavy data views.
///
/// # Examples
///
/// ```
/// use select2_testapp::TestApp;
/// use select2_widgets::Select2Settings;
///
/// let app = TestApp::new(Select2Settings::default()).unwrap();
/// assert_eq!(app.context().reverse("heavy_data_1").unwrap(), "/heavy_data_1/");
/// ```
#[derive(Clone)]
pub struct TestApp {
	db: Db,
	context: Select2Context,
}

impl TestApp {
	pub fn new(settings: Select2Settings) -> Select2Result<Self> {
		let context = Select2Context::new(settings)?;
		context
			.urls()
			.route("heavy_data_1", "/heavy_data_1/", heavy_data_1);
		context
			.urls()
			.route("heavy_data_2", "/heavy_data_2/", heavy_data_2);
		Ok(Self {
			db: Db::new(),
			context,
		})
	}

	pub fn db(&self) -> &Db {
		&self.db
	}

	pub fn context(&self) -> &Select2Context {
		&self.context
	}

	/// Route a GET request to the matching data view.
	pub fn dispatch(&self, request: &Request<()>) -> Response<String> {
		self.context.urls().dispatch(request)
	}

	/// Fill the tables with a small music catalogue and an address book.
	pub fn seed(&self) -> ModelResult<()> {
		let db = &self.db;
		let rock = db.create_genre("Rock")?.id;
		let jazz = db.create_genre("Jazz")?.id;
		let blues = db.create_genre("Blues")?.id;
		let pop = db.create_genre("Pop")?.id;
		let grunge = db.create_genre("Grunge")?.id;

		let beatles = db.create_artist("The Beatles", &[rock, pop])?.id;
		let miles = db.create_artist("Miles Davis", &[jazz])?.id;
		db.create_artist("B.B. King", &[blues])?;
		let nirvana = db.create_artist("Nirvana", &[rock, grunge])?.id;

		db.create_album("Abbey Road", beatles, &[rock, pop])?;
		db.create_album("Kind of Blue", miles, &[jazz])?;
		db.create_album("Nevermind", nirvana, &[rock, grunge])?;

		let uk = db.create_country("United Kingdom")?.id;
		let germany = db.create_country("Germany")?.id;
		let usa = db.create_country("United States")?.id;
		db.create_city("London", uk)?;
		db.create_city("Liverpool", uk)?;
		db.create_city("Berlin", germany)?;
		db.create_city("Hamburg", germany)?;
		db.create_city("Seattle", usa)?;
		db.create_city("New York", usa)?;

		db.create_groupie(nirvana)?;

		tracing::info!(
			genres = db.genres.len(),
			artists = db.artists.len(),
			albums = db.albums.len(),
			cities = db.cities.len(),
			"seeded demo data"
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_seed_twice_fails_on_unique_titles() {
		// Arrange
		let app = TestApp::new(Select2Settings::default()).unwrap();
		app.seed().unwrap();

		// Act
		let again = app.seed();

		// Assert
		assert!(again.is_err());
	}

	#[rstest]
	fn test_routes() {
		let app = TestApp::new(Select2Settings::default()).unwrap();

		let names = app.context().urls().names();

		assert!(names.contains(&"heavy_data_1".to_string()));
		assert!(names.contains(&"heavy_data_2".to_string()));
		assert!(names.contains(&select2_widgets::AUTO_VIEW_NAME.to_string()));
	}
}
