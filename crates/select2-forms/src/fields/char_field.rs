//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField};
use crate::widget::{TextInput, Widget};
use serde_json::Value;

/// Character field with length validation
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Box<dyn Widget>,
	pub initial: Option<Value>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub strip: bool,
}

impl CharField {
	/// Create a new optional CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::fields::CharField;
	///
	/// let field = CharField::new("title".to_string());
	/// assert_eq!(field.name, "title");
	/// assert!(!field.required);
	/// assert_eq!(field.max_length, None);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Box::new(TextInput::new()),
			initial: None,
			max_length: None,
			min_length: None,
			strip: true,
		}
	}

	/// Set the field as required
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::fields::CharField;
	///
	/// let field = CharField::new("title".to_string()).required();
	/// assert!(field.required);
	/// ```
	pub fn required(mut self) -> Self {
		self.required = true;
		self.widget.set_required(true);
		self
	}

	/// Set the maximum length for the field
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::fields::CharField;
	///
	/// let field = CharField::new("title".to_string()).with_max_length(50);
	/// assert_eq!(field.max_length, Some(50));
	/// ```
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(Value::String(initial.into()));
		self
	}

	/// Disable whitespace stripping for the field
	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}

	pub fn with_widget(mut self, mut widget: impl Widget + 'static) -> Self {
		widget.set_required(self.required);
		self.widget = Box::new(widget);
		self
	}
}

impl FormField for CharField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
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

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let str_value = match value {
			None | Some(Value::Null) => None,
			Some(v) => Some(
				v.as_str()
					.ok_or_else(|| FieldError::validation("Value must be a string"))?,
			),
		};

		let processed_value = match str_value {
			Some(v) => {
				let v = if self.strip { v.trim() } else { v };
				if v.is_empty() {
					if self.required {
						return Err(FieldError::Required(self.name.clone()));
					}
					return Ok(Value::String(String::new()));
				}
				v.to_string()
			}
			None => {
				if self.required {
					return Err(FieldError::Required(self.name.clone()));
				}
				return Ok(Value::String(String::new()));
			}
		};

		// Character count, not bytes
		let char_count = processed_value.chars().count();
		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters (it has {}).",
				max_length, char_count
			)));
		}

		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at least {} characters (it has {}).",
				min_length, char_count
			)));
		}

		Ok(Value::String(processed_value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_char_field_required() {
		// Arrange
		let field = CharField::new("title".to_string()).required();

		// Act & Assert
		assert!(field.clean(None).is_err());
		assert!(field.clean(Some(&json!(""))).is_err());
		assert!(field.clean(Some(&json!("  "))).is_err());
		assert!(field.widget().is_required());
	}

	#[rstest]
	fn test_char_field_max_length() {
		// Arrange
		let field = CharField::new("title".to_string()).with_max_length(5);

		// Act & Assert
		assert!(field.clean(Some(&json!("12345"))).is_ok());
		assert!(field.clean(Some(&json!("123456"))).is_err());
	}

	#[rstest]
	fn test_char_field_length_uses_char_count_not_bytes() {
		// Arrange
		let field = CharField::new("title".to_string()).with_max_length(3);

		// Act & Assert
		assert!(field.clean(Some(&json!("äöü"))).is_ok());
		assert!(field.clean(Some(&json!("äöüß"))).is_err());
	}

	#[rstest]
	fn test_char_field_strips_whitespace() {
		let field = CharField::new("title".to_string());
		assert_eq!(field.clean(Some(&json!("  Abbey Road "))).unwrap(), json!("Abbey Road"));
		assert_eq!(field.clean(None).unwrap(), json!(""));
	}

	#[rstest]
	fn test_char_field_rejects_non_string() {
		let field = CharField::new("title".to_string());
		assert!(field.clean(Some(&json!(5))).is_err());
	}
}
