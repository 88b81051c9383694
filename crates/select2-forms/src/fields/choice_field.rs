//! ChoiceField and MultipleChoiceField over static choices

use crate::field::{FieldError, FieldResult, FormField, value_to_string, value_to_strings};
use crate::widget::{Select, SelectMultiple, Widget};
use serde_json::Value;

fn invalid_choice(value: &str) -> FieldError {
	FieldError::InvalidChoice(format!(
		"Select a valid choice. {} is not one of the available choices.",
		value
	))
}

/// Turn `(value, label)` pairs of any displayable value into string choices
///
/// # Examples
///
/// ```
/// use select2_forms::fields::choices;
///
/// let numbers = choices([(1, "One"), (2, "Two")]);
/// assert_eq!(numbers[0], ("1".to_string(), "One".to_string()));
/// ```
pub fn choices<I, V, L>(pairs: I) -> Vec<(String, String)>
where
	I: IntoIterator<Item = (V, L)>,
	V: ToString,
	L: Into<String>,
{
	pairs
		.into_iter()
		.map(|(value, label)| (value.to_string(), label.into()))
		.collect()
}

/// A single choice from a fixed list
pub struct ChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub choices: Vec<(String, String)>,
	pub widget: Box<dyn Widget>,
	pub initial: Option<Value>,
}

impl ChoiceField {
	pub fn new(name: impl Into<String>, choices: Vec<(String, String)>) -> Self {
		let mut widget = Select::new();
		widget.set_required(true);
		Self {
			name: name.into(),
			label: None,
			required: true,
			choices,
			widget: Box::new(widget),
			initial: None,
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

	pub fn with_initial(mut self, initial: Value) -> Self {
		self.initial = Some(initial);
		self
	}

	pub fn with_widget(mut self, mut widget: impl Widget + 'static) -> Self {
		widget.set_required(self.required);
		self.widget = Box::new(widget);
		self
	}

	fn valid_value(&self, value: &str) -> bool {
		self.choices.iter().any(|(v, _)| v == value)
	}
}

impl FormField for ChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &dyn Widget {
		self.widget.as_ref()
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn set_initial(&mut self, value: Value) {
		self.initial = Some(value);
	}

	fn choices(&self) -> Vec<(String, String)> {
		self.choices.clone()
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let s = match value {
			None | Some(Value::Null) => String::new(),
			Some(v @ (Value::Array(_) | Value::Object(_))) => {
				return Err(invalid_choice(&v.to_string()));
			}
			Some(v) => value_to_string(v),
		};

		if s.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(Value::String(String::new()));
		}

		if !self.valid_value(&s) {
			return Err(invalid_choice(&s));
		}
		Ok(Value::String(s))
	}

	fn has_changed(&self, initial: Option<&Value>, data: Option<&Value>) -> bool {
		value_to_strings(initial) != value_to_strings(data)
	}
}

/// Any number of choices from a fixed list
pub struct MultipleChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub choices: Vec<(String, String)>,
	pub widget: Box<dyn Widget>,
	pub initial: Option<Value>,
}

impl MultipleChoiceField {
	pub fn new(name: impl Into<String>, choices: Vec<(String, String)>) -> Self {
		let mut widget = SelectMultiple::new();
		widget.set_required(true);
		Self {
			name: name.into(),
			label: None,
			required: true,
			choices,
			widget: Box::new(widget),
			initial: None,
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

	pub fn with_widget(mut self, mut widget: impl Widget + 'static) -> Self {
		widget.set_required(self.required);
		self.widget = Box::new(widget);
		self
	}
}

impl FormField for MultipleChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &dyn Widget {
		self.widget.as_ref()
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn set_initial(&mut self, value: Value) {
		self.initial = Some(value);
	}

	fn choices(&self) -> Vec<(String, String)> {
		self.choices.clone()
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		if let Some(Value::Object(_)) = value {
			return Err(FieldError::validation("Enter a list of values."));
		}
		let values: Vec<String> = value_to_strings(value)
			.into_iter()
			.filter(|v| !v.is_empty())
			.collect();

		if values.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(Value::Array(Vec::new()));
		}

		for v in &values {
			if !self.choices.iter().any(|(choice, _)| choice == v) {
				return Err(invalid_choice(v));
			}
		}
		Ok(Value::Array(values.into_iter().map(Value::String).collect()))
	}

	fn has_changed(&self, initial: Option<&Value>, data: Option<&Value>) -> bool {
		let mut a = value_to_strings(initial);
		let mut b = value_to_strings(data);
		a.sort();
		b.sort();
		a != b
	}
}
