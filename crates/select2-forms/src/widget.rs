//! HTML widgets
//!
//! A widget renders a field as HTML and extracts the field's raw value from
//! submitted form data. The built-in widgets cover plain text inputs and
//! `<select>` elements; richer widgets implement [`Widget`] elsewhere.

use crate::field::{escape_attribute, escape_html, value_to_strings};
use crate::media::Media;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// HTML attributes, kept ordered so rendering is deterministic.
pub type Attrs = BTreeMap<String, String>;

/// Build an [`Attrs`] map from key/value pairs
///
/// # Examples
///
/// ```
/// use select2_forms::widget::attrs_from;
///
/// let attrs = attrs_from([("data-minimum-input-length", "0")]);
/// assert_eq!(attrs.get("data-minimum-input-length").map(String::as_str), Some("0"));
/// ```
pub fn attrs_from<I, K, V>(pairs: I) -> Attrs
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	pairs
		.into_iter()
		.map(|(k, v)| (k.into(), v.into()))
		.collect()
}

/// Render attributes as ` key="value"` pairs.
pub fn render_attrs(attrs: &Attrs) -> String {
	let mut html = String::new();
	for (key, value) in attrs {
		html.push_str(&format!(" {}=\"{}\"", key, escape_attribute(value)));
	}
	html
}

/// A single `<option>` ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
	pub selected: bool,
}

impl SelectOption {
	pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			selected,
		}
	}
}

/// Turn `(value, label)` choices into options, marking the selected ones.
///
/// A single select marks at most the first matching choice.
pub fn options_from_choices(
	choices: &[(String, String)],
	selected: &[String],
	multiple: bool,
) -> Vec<SelectOption> {
	let mut has_selected = false;
	choices
		.iter()
		.map(|(value, label)| {
			let selected = selected.contains(value) && (multiple || !has_selected);
			if selected {
				has_selected = true;
			}
			SelectOption::new(value.clone(), label.clone(), selected)
		})
		.collect()
}

/// Render a `<select>` element with the given options.
pub fn render_select(name: &str, attrs: &Attrs, multiple: bool, options: &[SelectOption]) -> String {
	let mut html = format!("<select name=\"{}\"", escape_attribute(name));
	html.push_str(&render_attrs(attrs));
	if multiple {
		html.push_str(" multiple");
	}
	html.push('>');
	for option in options {
		html.push_str(&format!(
			"<option value=\"{}\"{}>{}</option>",
			escape_attribute(&option.value),
			if option.selected { " selected" } else { "" },
			escape_html(&option.label)
		));
	}
	html.push_str("</select>");
	html
}

/// Collect the submitted values for a multiple-value widget.
pub fn multiple_value_from_datadict(data: &HashMap<String, Value>, name: &str) -> Option<Value> {
	match data.get(name) {
		None | Some(Value::Null) => None,
		Some(Value::Array(items)) => Some(Value::Array(items.clone())),
		Some(other) => Some(Value::Array(vec![other.clone()])),
	}
}

pub trait Widget: Send + Sync {
	fn attrs(&self) -> &Attrs;

	fn is_required(&self) -> bool;

	fn set_required(&mut self, required: bool);

	fn allow_multiple_selected(&self) -> bool {
		false
	}

	/// Merge the widget's own attributes with per-render extras.
	fn build_attrs(&self, extra: &Attrs) -> Attrs {
		let mut attrs = self.attrs().clone();
		attrs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
		attrs
	}

	/// Render the widget. `choices` are the owning field's current
	/// `(value, label)` pairs; widgets without options ignore them.
	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String;

	fn value_from_datadict(&self, data: &HashMap<String, Value>, name: &str) -> Option<Value> {
		data.get(name).cloned()
	}

	fn media(&self) -> Media {
		Media::default()
	}
}

/// `<input type="text">`
#[derive(Debug, Clone, Default)]
pub struct TextInput {
	pub attrs: Attrs,
	required: bool,
}

impl TextInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_attrs(mut self, attrs: Attrs) -> Self {
		self.attrs = attrs;
		self
	}
}

impl Widget for TextInput {
	fn attrs(&self) -> &Attrs {
		&self.attrs
	}

	fn is_required(&self) -> bool {
		self.required
	}

	fn set_required(&mut self, required: bool) {
		self.required = required;
	}

	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		_choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String {
		let mut attrs = self.build_attrs(extra_attrs);
		if self.required {
			attrs.insert("required".to_string(), String::new());
		}
		let value = value_to_strings(value).into_iter().next().unwrap_or_default();
		let mut html = format!("<input type=\"text\" name=\"{}\"", escape_attribute(name));
		if !value.is_empty() {
			html.push_str(&format!(" value=\"{}\"", escape_attribute(&value)));
		}
		html.push_str(&render_attrs(&attrs));
		html.push('>');
		html
	}
}

/// Plain single `<select>`
#[derive(Debug, Clone, Default)]
pub struct Select {
	pub attrs: Attrs,
	required: bool,
}

impl Select {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Widget for Select {
	fn attrs(&self) -> &Attrs {
		&self.attrs
	}

	fn is_required(&self) -> bool {
		self.required
	}

	fn set_required(&mut self, required: bool) {
		self.required = required;
	}

	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String {
		let attrs = self.build_attrs(extra_attrs);
		let selected = value_to_strings(value);
		let options = options_from_choices(choices, &selected, false);
		render_select(name, &attrs, false, &options)
	}
}

/// Plain `<select multiple>`
#[derive(Debug, Clone, Default)]
pub struct SelectMultiple {
	pub attrs: Attrs,
	required: bool,
}

impl SelectMultiple {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Widget for SelectMultiple {
	fn attrs(&self) -> &Attrs {
		&self.attrs
	}

	fn is_required(&self) -> bool {
		self.required
	}

	fn set_required(&mut self, required: bool) {
		self.required = required;
	}

	fn allow_multiple_selected(&self) -> bool {
		true
	}

	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String {
		let attrs = self.build_attrs(extra_attrs);
		let selected = value_to_strings(value);
		let options = options_from_choices(choices, &selected, true);
		render_select(name, &attrs, true, &options)
	}

	fn value_from_datadict(&self, data: &HashMap<String, Value>, name: &str) -> Option<Value> {
		multiple_value_from_datadict(data, name)
	}
}
