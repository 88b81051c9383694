//! Field trait and field-level error types

use crate::widget::{Attrs, Widget};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required.")]
	Required(String),
	#[error("{0}")]
	Validation(String),
	#[error("{0}")]
	InvalidChoice(String),
}

impl FieldError {
	/// Build a validation error from a message
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::FieldError;
	///
	/// let err = FieldError::validation("Enter a whole number.");
	/// assert_eq!(err.to_string(), "Enter a whole number.");
	/// ```
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation(message.into())
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A form field: owns its widget and knows how to clean raw submitted values.
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str>;

	fn required(&self) -> bool;

	fn help_text(&self) -> Option<&str> {
		None
	}

	fn widget(&self) -> &dyn Widget;

	fn initial(&self) -> Option<&Value>;

	fn set_initial(&mut self, value: Value);

	/// Current `(value, label)` pairs offered by the field.
	fn choices(&self) -> Vec<(String, String)> {
		Vec::new()
	}

	fn render(&self, html_name: &str, value: Option<&Value>, attrs: &Attrs) -> String {
		self.widget().render(html_name, value, &self.choices(), attrs)
	}

	/// Convert a raw value into its cleaned form or report why it is invalid.
	fn clean(&self, value: Option<&Value>) -> FieldResult<Value>;

	fn has_changed(&self, initial: Option<&Value>, data: Option<&Value>) -> bool {
		match (initial, data) {
			(None, None) => false,
			(Some(_), None) | (None, Some(_)) => true,
			(Some(a), Some(b)) => a != b,
		}
	}
}

/// Escape a string for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			other => escaped.push(other),
		}
	}
	escaped
}

/// Escape text content placed between HTML tags.
pub fn escape_html(value: &str) -> String {
	escape_attribute(value)
}

/// Render a JSON scalar the way it would appear in a submitted form.
///
/// Strings are returned verbatim, numbers and booleans use their JSON text,
/// `null` becomes the empty string.
pub fn value_to_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

/// Flatten a submitted value into the list of strings it represents.
pub fn value_to_strings(value: Option<&Value>) -> Vec<String> {
	match value {
		None | Some(Value::Null) => Vec::new(),
		Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
		Some(other) => vec![value_to_string(other)],
	}
}
