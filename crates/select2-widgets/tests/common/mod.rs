//! Shared fixtures for select2-widgets tests

#![allow(dead_code)]

use rstest::fixture;
use select2_forms::model::{value_to_pk, value_to_text};
use select2_forms::{Model, ModelError, ModelResult, Table};
use select2_widgets::{Select2Context, Select2Settings};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Band {
	pub id: i64,
	pub name: String,
	pub country: i64,
}

impl Model for Band {
	fn model_name() -> &'static str {
		"Band"
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
			"name" => self.name = value_to_text(name, &value)?,
			"country" => self.country = value_to_pk(name, &value)?,
			_ => {
				return Err(ModelError::UnknownField {
					model: Self::model_name().to_string(),
					field: name.to_string(),
				});
			}
		}
		Ok(())
	}

	fn to_choice_label(&self) -> String {
		self.name.clone()
	}
}

pub fn band(table: &Table<Band>, name: &str, country: i64) -> Band {
	table.create_with(|id| Band {
		id,
		name: name.to_string(),
		country,
	})
}

/// Five bands from countries 1 (UK), 2 (US) and 3 (DE).
#[fixture]
pub fn bands() -> Table<Band> {
	let table = Table::new();
	band(&table, "The Beatles", 1);
	band(&table, "The Rolling Stones", 1);
	band(&table, "Nirvana", 2);
	band(&table, "The Doors", 2);
	band(&table, "Kraftwerk", 3);
	table
}

#[fixture]
pub fn context() -> Select2Context {
	Select2Context::new(Select2Settings::default().with_secret_key("widget-test-secret"))
		.expect("default settings are valid")
}
