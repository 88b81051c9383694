use crate::field::{FormField, escape_attribute, escape_html};
use crate::widget::Attrs;
use serde_json::Value;

/// BoundField represents a field bound to form data
pub struct BoundField<'a> {
	field: &'a dyn FormField,
	data: Option<&'a Value>,
	initial: Option<&'a Value>,
	errors: &'a [String],
	prefix: &'a str,
}

impl<'a> BoundField<'a> {
	/// Bind a field to its submitted data, form-level initial and errors
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("title".to_string()));
	/// let data = serde_json::json!("Abbey Road");
	///
	/// let bound = BoundField::new(field.as_ref(), Some(&data), None, &[], "");
	/// assert_eq!(bound.name(), "title");
	/// assert_eq!(bound.value(), Some(&data));
	/// ```
	pub fn new(
		field: &'a dyn FormField,
		data: Option<&'a Value>,
		initial: Option<&'a Value>,
		errors: &'a [String],
		prefix: &'a str,
	) -> Self {
		Self {
			field,
			data,
			initial,
			errors,
			prefix,
		}
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// Get the HTML name attribute (with prefix)
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("city".to_string()));
	/// let bound = BoundField::new(field.as_ref(), None, None, &[], "address");
	/// assert_eq!(bound.html_name(), "address-city");
	/// assert_eq!(bound.id_for_label(), "id_address-city");
	/// ```
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.field.name().to_string()
		} else {
			format!("{}-{}", self.prefix, self.field.name())
		}
	}

	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	/// The field label, or the field name made human readable
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("primary_genre".to_string()));
	/// let bound = BoundField::new(field.as_ref(), None, None, &[], "");
	/// assert_eq!(bound.label(), "Primary genre");
	/// ```
	pub fn label(&self) -> String {
		match self.field.label() {
			Some(label) => label.to_string(),
			None => pretty_name(self.field.name()),
		}
	}

	/// Submitted data, then form initial, then field initial.
	pub fn value(&self) -> Option<&Value> {
		self.data
			.or(self.initial)
			.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &[String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.field.help_text()
	}

	pub fn label_tag(&self) -> String {
		format!(
			"<label for=\"{}\">{}:</label>",
			escape_attribute(&self.id_for_label()),
			escape_html(&self.label())
		)
	}

	/// Render the field's widget with its `id` attribute.
	pub fn render(&self) -> String {
		let mut attrs = Attrs::new();
		attrs.insert("id".to_string(), self.id_for_label());
		self.field.render(&self.html_name(), self.value(), &attrs)
	}

	pub fn render_errors(&self) -> String {
		if self.errors.is_empty() {
			return String::new();
		}
		let items: String = self
			.errors
			.iter()
			.map(|e| format!("<li>{}</li>", escape_html(e)))
			.collect();
		format!("<ul class=\"errorlist\">{}</ul>", items)
	}
}

/// `"primary_genre"` → `"Primary genre"`
pub fn pretty_name(name: &str) -> String {
	let spaced = name.replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
