//! ModelChoiceField and ModelMultipleChoiceField for query set backed choices

use crate::field::{FieldError, FieldResult, FormField, value_to_string, value_to_strings};
use crate::model::Model;
use crate::query::QuerySet;
use crate::widget::{Select, SelectMultiple, Widget};
use serde_json::Value;
use std::collections::HashMap;

fn default_error_messages() -> HashMap<String, String> {
	let mut error_messages = HashMap::new();
	error_messages.insert(
		"required".to_string(),
		"This field is required.".to_string(),
	);
	error_messages.insert(
		"invalid_choice".to_string(),
		"Select a valid choice.".to_string(),
	);
	error_messages.insert(
		"invalid_list".to_string(),
		"Enter a list of values.".to_string(),
	);
	error_messages
}

fn message(messages: &HashMap<String, String>, key: &str, fallback: &str) -> String {
	messages
		.get(key)
		.cloned()
		.unwrap_or_else(|| fallback.to_string())
}

/// A field for selecting a single record from a query set
///
/// The cleaned value is the selected record's primary key.
pub struct ModelChoiceField<M: Model> {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub error_messages: HashMap<String, String>,
	pub widget: Box<dyn Widget>,
	pub help_text: String,
	pub initial: Option<Value>,
	pub queryset: QuerySet<M>,
	pub empty_label: Option<String>,
}

impl<M: Model> ModelChoiceField<M> {
	/// Create a new required ModelChoiceField
	///
	/// # Examples
	///
	/// ```ignore
	/// let field = ModelChoiceField::new("artist", db.artists.all());
	/// assert!(FormField::required(&field));
	/// ```
	pub fn new(name: impl Into<String>, queryset: QuerySet<M>) -> Self {
		let mut widget = Select::new();
		widget.set_required(true);
		Self {
			name: name.into(),
			label: None,
			required: true,
			error_messages: default_error_messages(),
			widget: Box::new(widget),
			help_text: String::new(),
			initial: None,
			queryset,
			empty_label: Some("---------".to_string()),
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self.widget.set_required(required);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn help_text(mut self, text: impl Into<String>) -> Self {
		self.help_text = text.into();
		self
	}

	pub fn initial(mut self, value: Value) -> Self {
		self.initial = Some(value);
		self
	}

	pub fn empty_label(mut self, label: Option<String>) -> Self {
		self.empty_label = label;
		self
	}

	pub fn error_message(
		mut self,
		error_type: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		self.error_messages
			.insert(error_type.into(), message.into());
		self
	}

	pub fn with_widget(mut self, mut widget: impl Widget + 'static) -> Self {
		widget.set_required(self.required);
		self.widget = Box::new(widget);
		self
	}
}

impl<M: Model> FormField for ModelChoiceField<M> {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn widget(&self) -> &dyn Widget {
		self.widget.as_ref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn set_initial(&mut self, value: Value) {
		self.initial = Some(value);
	}

	fn help_text(&self) -> Option<&str> {
		if self.help_text.is_empty() {
			None
		} else {
			Some(&self.help_text)
		}
	}

	/// Query set records as `(pk, label)` pairs, preceded by the empty label.
	fn choices(&self) -> Vec<(String, String)> {
		let mut choices = Vec::new();
		if let Some(empty_label) = &self.empty_label
			&& !(self.required && self.initial.is_some())
		{
			choices.push((String::new(), empty_label.clone()));
		}
		for instance in self.queryset.fetch() {
			choices.push((instance.to_choice_value(), instance.to_choice_label()));
		}
		choices
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let s = match value {
			None | Some(Value::Null) => String::new(),
			Some(v @ (Value::String(_) | Value::Number(_))) => value_to_string(v),
			Some(_) => {
				return Err(FieldError::InvalidChoice(message(
					&self.error_messages,
					"invalid_choice",
					"Select a valid choice.",
				)));
			}
		};

		if s.is_empty() {
			if self.required {
				return Err(FieldError::Validation(message(
					&self.error_messages,
					"required",
					"This field is required.",
				)));
			}
			return Ok(Value::Null);
		}

		// Validate that the choice exists in queryset
		match self
			.queryset
			.fetch()
			.into_iter()
			.find(|instance| instance.to_choice_value() == s)
		{
			Some(instance) => Ok(Value::from(instance.pk())),
			None => Err(FieldError::InvalidChoice(message(
				&self.error_messages,
				"invalid_choice",
				"Select a valid choice.",
			))),
		}
	}

	fn has_changed(&self, initial: Option<&Value>, data: Option<&Value>) -> bool {
		value_to_strings(initial) != value_to_strings(data)
	}
}

/// A field for selecting multiple records from a query set
///
/// The cleaned value is the array of selected primary keys in query set order.
pub struct ModelMultipleChoiceField<M: Model> {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub error_messages: HashMap<String, String>,
	pub widget: Box<dyn Widget>,
	pub help_text: String,
	pub initial: Option<Value>,
	pub queryset: QuerySet<M>,
}

impl<M: Model> ModelMultipleChoiceField<M> {
	pub fn new(name: impl Into<String>, queryset: QuerySet<M>) -> Self {
		let mut widget = SelectMultiple::new();
		widget.set_required(true);
		Self {
			name: name.into(),
			label: None,
			required: true,
			error_messages: default_error_messages(),
			widget: Box::new(widget),
			help_text: String::new(),
			initial: None,
			queryset,
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self.widget.set_required(required);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn help_text(mut self, text: impl Into<String>) -> Self {
		self.help_text = text.into();
		self
	}

	pub fn initial(mut self, value: Value) -> Self {
		self.initial = Some(value);
		self
	}

	pub fn error_message(
		mut self,
		error_type: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		self.error_messages
			.insert(error_type.into(), message.into());
		self
	}

	pub fn with_widget(mut self, mut widget: impl Widget + 'static) -> Self {
		widget.set_required(self.required);
		self.widget = Box::new(widget);
		self
	}
}

impl<M: Model> FormField for ModelMultipleChoiceField<M> {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn widget(&self) -> &dyn Widget {
		self.widget.as_ref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn set_initial(&mut self, value: Value) {
		self.initial = Some(value);
	}

	fn help_text(&self) -> Option<&str> {
		if self.help_text.is_empty() {
			None
		} else {
			Some(&self.help_text)
		}
	}

	fn choices(&self) -> Vec<(String, String)> {
		self.queryset
			.fetch()
			.into_iter()
			.map(|instance| (instance.to_choice_value(), instance.to_choice_label()))
			.collect()
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let values: Vec<String> = match value {
			None | Some(Value::Null) => Vec::new(),
			Some(Value::Array(items)) => items
				.iter()
				.map(value_to_string)
				.filter(|v| !v.is_empty())
				.collect(),
			Some(Value::String(s)) if s.is_empty() => Vec::new(),
			// Comma-separated values
			Some(Value::String(s)) => s
				.split(',')
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
				.collect(),
			Some(Value::Number(n)) => vec![n.to_string()],
			Some(_) => {
				return Err(FieldError::Validation(message(
					&self.error_messages,
					"invalid_list",
					"Enter a list of values.",
				)));
			}
		};

		if values.is_empty() {
			if self.required {
				return Err(FieldError::Validation(message(
					&self.error_messages,
					"required",
					"This field is required.",
				)));
			}
			return Ok(Value::Array(Vec::new()));
		}

		let selected = self.queryset.filter_choice_values(&values);
		for value in &values {
			if !selected
				.iter()
				.any(|instance| &instance.to_choice_value() == value)
			{
				return Err(FieldError::InvalidChoice(format!(
					"Select a valid choice. {} is not one of the available choices.",
					value
				)));
			}
		}

		Ok(Value::Array(
			selected
				.iter()
				.map(|instance| Value::from(instance.pk()))
				.collect(),
		))
	}

	fn has_changed(&self, initial: Option<&Value>, data: Option<&Value>) -> bool {
		let mut a = value_to_strings(initial);
		let mut b = value_to_strings(data);
		a.sort();
		a.dedup();
		b.sort();
		b.dedup();
		a != b
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::test_support::{Tag, tag_table};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_model_choice_field_cleans_to_pk() {
		// Arrange
		let tags = tag_table(&["rock", "jazz"]);
		let field = ModelChoiceField::new("tag", tags.all());

		// Act
		let cleaned = field.clean(Some(&json!("2")));

		// Assert
		assert_eq!(cleaned.unwrap(), json!(2));
	}

	#[rstest]
	fn test_model_choice_field_required() {
		let field = ModelChoiceField::new("tag", tag_table(&[]).all());
		assert!(field.clean(None).is_err());
		assert!(field.clean(Some(&json!(""))).is_err());
	}

	#[rstest]
	fn test_model_choice_field_not_required() {
		let field = ModelChoiceField::new("tag", tag_table(&[]).all()).required(false);
		assert_eq!(field.clean(None).unwrap(), Value::Null);
	}

	#[rstest]
	fn test_model_choice_field_rejects_unknown_pk() {
		let field = ModelChoiceField::new("tag", tag_table(&["rock"]).all());
		let err = field.clean(Some(&json!(99))).unwrap_err();
		assert_eq!(err.to_string(), "Select a valid choice.");
	}

	#[rstest]
	fn test_model_choice_field_choices_include_empty_label() {
		let field = ModelChoiceField::new("tag", tag_table(&["rock"]).all()).required(false);
		assert_eq!(
			field.choices(),
			vec![
				(String::new(), "---------".to_string()),
				("1".to_string(), "rock".to_string())
			]
		);
	}

	#[rstest]
	fn test_model_multiple_choice_field_array() {
		let tags = tag_table(&["a", "b", "c"]);
		let field = ModelMultipleChoiceField::<Tag>::new("tags", tags.all()).required(false);

		assert_eq!(field.clean(Some(&json!(["3", "1"]))).unwrap(), json!([1, 3]));
	}

	#[rstest]
	fn test_model_multiple_choice_field_comma_separated() {
		let tags = tag_table(&["a", "b", "c"]);
		let field = ModelMultipleChoiceField::<Tag>::new("tags", tags.all());

		assert_eq!(field.clean(Some(&json!("1,2,3"))).unwrap(), json!([1, 2, 3]));
	}

	#[rstest]
	fn test_model_multiple_choice_field_invalid_value() {
		let tags = tag_table(&["a"]);
		let field = ModelMultipleChoiceField::<Tag>::new("tags", tags.all());

		let err = field.clean(Some(&json!(["1", "42"]))).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Select a valid choice. 42 is not one of the available choices."
		);
	}

	#[rstest]
	fn test_model_multiple_choice_field_sees_new_rows() {
		let tags = tag_table(&["a"]);
		let field = ModelMultipleChoiceField::<Tag>::new("tags", tags.all());
		tags.create_with(|id| Tag {
			id,
			title: "late".to_string(),
			related: vec![],
		});

		assert_eq!(field.clean(Some(&json!(["2"]))).unwrap(), json!([2]));
	}
}
