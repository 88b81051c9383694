//! Demo records and their tables

use select2_forms::model::{value_to_optional_pk, value_to_pk, value_to_pks, value_to_text};
use select2_forms::{Lookup, Model, ModelError, ModelResult, Table};
use serde_json::Value;

/// Longest title a genre or artist may carry.
pub const TITLE_MAX_LENGTH: usize = 50;

fn unknown_field<M: Model>(field: &str) -> ModelError {
	ModelError::UnknownField {
		model: M::model_name().to_string(),
		field: field.to_string(),
	}
}

fn bounded_text(field: &str, value: &Value, max_length: usize) -> ModelResult<String> {
	let text = value_to_text(field, value)?;
	let count = text.chars().count();
	if count > max_length {
		return Err(ModelError::InvalidValue {
			field: field.to_string(),
			message: format!(
				"Ensure this value has at most {} characters (it has {}).",
				max_length, count
			),
		});
	}
	Ok(text)
}

fn optional_pk(pk: Option<i64>) -> Value {
	pk.map(Value::from).unwrap_or(Value::Null)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genre {
	pub id: i64,
	pub title: String,
}

impl Model for Genre {
	fn model_name() -> &'static str {
		"Genre"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	fn field_names() -> &'static [&'static str] {
		&["title"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"title" => Some(Value::from(self.title.clone())),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"title" => self.title = bounded_text(name, &value, TITLE_MAX_LENGTH)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.title.clone()
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artist {
	pub id: i64,
	pub title: String,
	pub genres: Vec<i64>,
}

impl Model for Artist {
	fn model_name() -> &'static str {
		"Artist"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	fn field_names() -> &'static [&'static str] {
		&["title", "genres"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"title" => Some(Value::from(self.title.clone())),
			"genres" => Some(Value::from(self.genres.clone())),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"title" => self.title = bounded_text(name, &value, TITLE_MAX_LENGTH)?,
			"genres" => self.genres = value_to_pks(name, &value)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.title.clone()
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Album {
	pub id: i64,
	pub title: String,
	pub artist: Option<i64>,
	pub featured_artists: Vec<i64>,
	pub primary_genre: Option<i64>,
	pub genres: Vec<i64>,
}

impl Model for Album {
	fn model_name() -> &'static str {
		"Album"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	fn field_names() -> &'static [&'static str] {
		&["title", "artist", "featured_artists", "primary_genre", "genres"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"title" => Some(Value::from(self.title.clone())),
			"artist" => Some(optional_pk(self.artist)),
			"featured_artists" => Some(Value::from(self.featured_artists.clone())),
			"primary_genre" => Some(optional_pk(self.primary_genre)),
			"genres" => Some(Value::from(self.genres.clone())),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"title" => self.title = bounded_text(name, &value, 255)?,
			"artist" => self.artist = value_to_optional_pk(name, &value)?,
			"featured_artists" => self.featured_artists = value_to_pks(name, &value)?,
			"primary_genre" => self.primary_genre = value_to_optional_pk(name, &value)?,
			"genres" => self.genres = value_to_pks(name, &value)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.title.clone()
	}
}

/// A country; `cities` lists the pks of the cities pointing at it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
	pub id: i64,
	pub name: String,
	pub cities: Vec<i64>,
}

impl Model for Country {
	fn model_name() -> &'static str {
		"Country"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	// `cities` is maintained by `Db::create_city` and cannot be assigned.
	fn field_names() -> &'static [&'static str] {
		&["name"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"name" => Some(Value::from(self.name.clone())),
			"cities" => Some(Value::from(self.cities.clone())),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"name" => self.name = bounded_text(name, &value, 255)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.name.clone()
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct City {
	pub id: i64,
	pub name: String,
	pub country: i64,
}

impl Model for City {
	fn model_name() -> &'static str {
		"City"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	fn field_names() -> &'static [&'static str] {
		&["name", "country"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"name" => Some(Value::from(self.name.clone())),
			"country" => Some(Value::from(self.country)),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"name" => self.name = bounded_text(name, &value, 255)?,
			"country" => self.country = value_to_pk(name, &value)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.name.clone()
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groupie {
	pub id: i64,
	pub obsession: i64,
}

impl Model for Groupie {
	fn model_name() -> &'static str {
		"Groupie"
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn set_pk(&mut self, pk: i64) {
		self.id = pk;
	}

	fn field_names() -> &'static [&'static str] {
		&["obsession"]
	}

	fn get_field(&self, name: &str) -> Option<Value> {
		match name {
			"obsession" => Some(Value::from(self.obsession)),
			_ => None,
		}
	}

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
		match name {
			"obsession" => self.obsession = value_to_pk(name, &value)?,
			_ => return Err(unknown_field::<Self>(name)),
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		format!("Groupie object ({})", self.id)
	}
}

/// One table per demo record
///
/// Clones share the same tables. `Country::cities` is only kept in step with
/// the city table by [`Db::create_city`] and [`Db::move_city`]; cities saved
/// or re-parented through [`Table::save`] or [`Table::update`] leave it stale,
/// and the country search filtered by city then misses them.
#[derive(Clone, Default)]
pub struct Db {
	pub genres: Table<Genre>,
	pub artists: Table<Artist>,
	pub albums: Table<Album>,
	pub countries: Table<Country>,
	pub cities: Table<City>,
	pub groupies: Table<Groupie>,
}

fn does_not_exist<M: Model>() -> ModelError {
	ModelError::DoesNotExist {
		model: M::model_name().to_string(),
	}
}

fn ensure_unique<M: Model>(table: &Table<M>, field: &str, value: &str) -> ModelResult<()> {
	if table.all().filter(Lookup::new(field, value)).exists() {
		return Err(ModelError::Duplicate {
			model: M::model_name().to_string(),
			field: field.to_string(),
		});
	}
	Ok(())
}

fn ensure_exists<M: Model>(table: &Table<M>, pk: i64) -> ModelResult<()> {
	table.get(pk).map(|_| ()).ok_or_else(does_not_exist::<M>)
}

impl Db {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn create_genre(&self, title: &str) -> ModelResult<Genre> {
		let mut genre = Genre::default();
		genre.set_field("title", Value::from(title))?;
		Ok(self.genres.save(genre))
	}

	/// Artist titles are unique.
	pub fn create_artist(&self, title: &str, genres: &[i64]) -> ModelResult<Artist> {
		ensure_unique(&self.artists, "title", title)?;
		for genre in genres {
			ensure_exists(&self.genres, *genre)?;
		}
		let mut artist = Artist::default();
		artist.set_field("title", Value::from(title))?;
		artist.genres = genres.to_vec();
		Ok(self.artists.save(artist))
	}

	pub fn create_album(&self, title: &str, artist: i64, genres: &[i64]) -> ModelResult<Album> {
		ensure_exists(&self.artists, artist)?;
		for genre in genres {
			ensure_exists(&self.genres, *genre)?;
		}
		let mut album = Album::default();
		album.set_field("title", Value::from(title))?;
		album.artist = Some(artist);
		album.genres = genres.to_vec();
		Ok(self.albums.save(album))
	}

	/// Country names are unique.
	pub fn create_country(&self, name: &str) -> ModelResult<Country> {
		ensure_unique(&self.countries, "name", name)?;
		let mut country = Country::default();
		country.set_field("name", Value::from(name))?;
		Ok(self.countries.save(country))
	}

	/// Create a city and add it to its country's `cities`.
	pub fn create_city(&self, name: &str, country: i64) -> ModelResult<City> {
		ensure_exists(&self.countries, country)?;
		let mut city = City::default();
		city.set_field("name", Value::from(name))?;
		city.country = country;
		let city = self.cities.save(city);
		self.countries
			.update(country, |country| country.cities.push(city.id));
		Ok(city)
	}

	/// Re-parent a city, moving its pk between the countries' `cities`.
	pub fn move_city(&self, city: i64, country: i64) -> ModelResult<City> {
		ensure_exists(&self.countries, country)?;
		let previous = self
			.cities
			.get(city)
			.map(|city| city.country)
			.ok_or_else(does_not_exist::<City>)?;
		self.cities.update(city, |city| city.country = country);
		if previous != country {
			self.countries
				.update(previous, |previous| previous.cities.retain(|pk| *pk != city));
			self.countries
				.update(country, |country| country.cities.push(city));
		}
		self.cities.get(city).ok_or_else(does_not_exist::<City>)
	}

	pub fn create_groupie(&self, obsession: i64) -> ModelResult<Groupie> {
		ensure_exists(&self.artists, obsession)?;
		Ok(self.groupies.save(Groupie { id: 0, obsession }))
	}
}
