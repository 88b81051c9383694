//! Forms bound to a model table

use crate::form::{Form, FormError, FormResult};
use crate::model::{Model, Table};
use serde_json::Value;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// A [`Form`] whose cleaned data is written back to a record
///
/// Only cleaned values whose name is one of [`Model::field_names`] are
/// copied onto the instance; extra form fields are ignored on save.
pub struct ModelForm<M: Model> {
	form: Form,
	table: Table<M>,
	instance: Option<M>,
}

impl<M: Model> ModelForm<M> {
	pub fn new(table: Table<M>) -> Self {
		Self {
			form: Form::new(),
			table,
			instance: None,
		}
	}

	/// Edit an existing record; its field values become the form's initial data.
	pub fn with_instance(table: Table<M>, instance: M) -> Self {
		let initial: HashMap<String, Value> = M::field_names()
			.iter()
			.filter_map(|name| instance.get_field(name).map(|v| (name.to_string(), v)))
			.collect();
		Self {
			form: Form::with_initial(initial),
			table,
			instance: Some(instance),
		}
	}

	pub fn instance(&self) -> Option<&M> {
		self.instance.as_ref()
	}

	pub fn table(&self) -> &Table<M> {
		&self.table
	}

	/// Persist the cleaned data
	///
	/// The form must have passed [`Form::is_valid`] since it was last bound;
	/// validation is not run again here.
	pub fn save(&mut self) -> FormResult<M> {
		if !self.form.is_validated() {
			return Err(FormError::Invalid);
		}

		let mut instance = self.instance.clone().unwrap_or_default();
		for name in M::field_names() {
			if let Some(value) = self.form.cleaned_data().get(*name) {
				instance.set_field(name, value.clone())?;
			}
		}

		let saved = self.table.save(instance);
		tracing::debug!(model = M::model_name(), pk = saved.pk(), "saved model form");
		self.instance = Some(saved.clone());
		Ok(saved)
	}
}

impl<M: Model> Deref for ModelForm<M> {
	type Target = Form;

	fn deref(&self) -> &Self::Target {
		&self.form
	}
}

impl<M: Model> DerefMut for ModelForm<M> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.form
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{CharField, ModelMultipleChoiceField};
	use crate::model::test_support::{Tag, tag_table};
	use rstest::rstest;
	use serde_json::json;

	fn tag_form(table: &Table<Tag>) -> ModelForm<Tag> {
		let mut form = ModelForm::new(table.clone());
		form.add_field(Box::new(CharField::new("title".to_string()).required()));
		form.add_field(Box::new(
			ModelMultipleChoiceField::new("related", table.all()).required(false),
		));
		form
	}

	#[rstest]
	fn test_save_creates_record() {
		// Arrange
		let table = tag_table(&["rock", "jazz"]);
		let mut form = tag_form(&table);
		form.bind(HashMap::from([
			("title".to_string(), json!("blues")),
			("related".to_string(), json!(["2", "1"])),
		]));

		// Act
		assert!(form.is_valid());
		let saved = form.save().unwrap();

		// Assert
		assert_eq!(saved.id, 3);
		assert_eq!(saved.related, vec![1, 2]);
		assert_eq!(table.get(3).map(|t| t.title), Some("blues".to_string()));
	}

	#[rstest]
	fn test_save_updates_instance() {
		let table = tag_table(&["rock"]);
		let existing = table.get(1).unwrap();
		let mut form = ModelForm::with_instance(table.clone(), existing);
		form.add_field(Box::new(CharField::new("title".to_string()).required()));
		assert_eq!(form.initial()["title"], json!("rock"));

		form.bind(HashMap::from([("title".to_string(), json!("metal"))]));
		assert!(form.is_valid());
		form.save().unwrap();

		assert_eq!(table.len(), 1);
		assert_eq!(table.get(1).map(|t| t.title), Some("metal".to_string()));
	}

	#[rstest]
	fn test_save_requires_validation() {
		let table = tag_table(&[]);
		let mut form = tag_form(&table);
		form.bind(HashMap::from([("title".to_string(), json!("x"))]));

		assert!(matches!(form.save(), Err(FormError::Invalid)));
		assert!(table.is_empty());
	}
}
