use crate::bound_field::BoundField;
use crate::field::{FieldError, FormField};
use crate::media::Media;
use serde_json::Value;
use std::collections::HashMap;
use std::ops::Index;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("{0}")]
	Validation(String),
	#[error("Form is not bound or not valid")]
	Invalid,
	#[error(transparent)]
	Model(#[from] crate::model::ModelError),
}

pub type FormResult<T> = Result<T, FormError>;

type CleanFunction = Box<dyn Fn(&HashMap<String, Value>) -> FormResult<()> + Send + Sync>;
type FieldCleanFunction = Box<dyn Fn(&Value) -> FormResult<Value> + Send + Sync>;

/// Special key for form-level (non-field-specific) errors.
pub const ALL_FIELDS_KEY: &str = "_all";

/// Form data structure
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, Value>,
	cleaned_data: HashMap<String, Value>,
	initial: HashMap<String, Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	validated: bool,
	clean_functions: Vec<CleanFunction>,
	field_clean_functions: HashMap<String, FieldCleanFunction>,
	prefix: String,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			cleaned_data: HashMap::new(),
			initial: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			validated: false,
			clean_functions: vec![],
			field_clean_functions: HashMap::new(),
			prefix: String::new(),
		}
	}

	pub fn with_initial(initial: HashMap<String, Value>) -> Self {
		Self {
			initial,
			..Self::new()
		}
	}

	/// Create a new form with a field prefix
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::Form;
	///
	/// let form = Form::with_prefix("address".to_string());
	/// assert_eq!(form.prefix(), "address");
	/// assert_eq!(form.add_prefix_to_field_name("city"), "address-city");
	/// ```
	pub fn with_prefix(prefix: String) -> Self {
		Self {
			prefix,
			..Self::new()
		}
	}

	/// Add a field to the form
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{CharField, Form};
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("title".to_string())));
	/// assert_eq!(form.fields().len(), 1);
	/// ```
	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	/// Bind form data for validation
	pub fn bind(&mut self, data: HashMap<String, Value>) {
		self.data = data;
		self.cleaned_data.clear();
		self.errors.clear();
		self.is_bound = true;
		self.validated = false;
	}

	/// Validate the form and return true if all fields are valid
	///
	/// Each field's widget extracts the raw value from the bound data, the
	/// field cleans it, then any per-field and form-wide clean hooks run.
	/// This happens once per [`bind`](Self::bind); later calls return the
	/// stored outcome.
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{CharField, Form};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("title".to_string()).required()));
	///
	/// let mut data = HashMap::new();
	/// data.insert("title".to_string(), json!("Revolver"));
	/// form.bind(data);
	///
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data().get("title"), Some(&json!("Revolver")));
	/// ```
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}
		if self.validated {
			return self.errors.is_empty();
		}

		self.errors.clear();
		self.cleaned_data.clear();

		for field in &self.fields {
			let html_name = self.add_prefix_to_field_name(field.name());
			let raw = field.widget().value_from_datadict(&self.data, &html_name);

			match field.clean(raw.as_ref()) {
				Ok(mut cleaned) => {
					if let Some(field_clean) = self.field_clean_functions.get(field.name()) {
						match field_clean(&cleaned) {
							Ok(further_cleaned) => {
								cleaned = further_cleaned;
							}
							Err(e) => {
								self.errors
									.entry(field.name().to_string())
									.or_default()
									.push(e.to_string());
								continue;
							}
						}
					}
					self.cleaned_data.insert(field.name().to_string(), cleaned);
				}
				Err(e) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		for clean_fn in &self.clean_functions {
			if let Err(e) = clean_fn(&self.cleaned_data) {
				match e {
					FormError::Field { field, error } => {
						self.errors
							.entry(field)
							.or_default()
							.push(error.to_string());
					}
					other => {
						self.errors
							.entry(ALL_FIELDS_KEY.to_string())
							.or_default()
							.push(other.to_string());
					}
				}
			}
		}

		self.validated = true;
		self.errors.is_empty()
	}

	/// Whether [`Form::is_valid`] ran since the last bind and found no errors.
	pub fn is_validated(&self) -> bool {
		self.validated && self.errors.is_empty()
	}

	pub fn cleaned_data(&self) -> &HashMap<String, Value> {
		&self.cleaned_data
	}

	pub fn data(&self) -> &HashMap<String, Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn initial(&self) -> &HashMap<String, Value> {
		&self.initial
	}

	pub fn set_initial(&mut self, initial: HashMap<String, Value>) {
		self.initial = initial;
	}

	/// Check if any field has changed from its initial value
	pub fn has_changed(&self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.fields.iter().any(|field| {
			let initial = self
				.initial
				.get(field.name())
				.or_else(|| field.initial());
			let html_name = self.add_prefix_to_field_name(field.name());
			field.has_changed(initial, self.data.get(&html_name))
		})
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Box<dyn FormField>> {
		self.fields.iter_mut().find(|f| f.name() == name)
	}

	pub fn remove_field(&mut self, name: &str) -> Option<Box<dyn FormField>> {
		let pos = self.fields.iter().position(|f| f.name() == name)?;
		Some(self.fields.remove(pos))
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Add a custom clean function for form validation
	pub fn add_clean_function<F>(&mut self, f: F)
	where
		F: Fn(&HashMap<String, Value>) -> FormResult<()> + Send + Sync + 'static,
	{
		self.clean_functions.push(Box::new(f));
	}

	/// Add a custom clean function for a specific field
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{CharField, Form, FormError};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("code".to_string())));
	/// form.add_field_clean_function("code", |value| {
	///     Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
	/// });
	///
	/// let mut data = HashMap::new();
	/// data.insert("code".to_string(), json!("abc"));
	/// form.bind(data);
	///
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data()["code"], json!("ABC"));
	/// ```
	pub fn add_field_clean_function<F>(&mut self, field_name: &str, f: F)
	where
		F: Fn(&Value) -> FormResult<Value> + Send + Sync + 'static,
	{
		self.field_clean_functions
			.insert(field_name.to_string(), Box::new(f));
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn set_prefix(&mut self, prefix: String) {
		self.prefix = prefix;
	}

	pub fn add_prefix_to_field_name(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		let field = self.get_field(name)?;
		Some(self.bind_field(field))
	}

	fn bind_field<'a>(&'a self, field: &'a dyn FormField) -> BoundField<'a> {
		let html_name = self.add_prefix_to_field_name(field.name());
		let data = if self.is_bound {
			self.data.get(&html_name)
		} else {
			None
		};
		let errors = self
			.errors
			.get(field.name())
			.map(|e| e.as_slice())
			.unwrap_or(&[]);
		BoundField::new(
			field,
			data,
			self.initial.get(field.name()),
			errors,
			&self.prefix,
		)
	}

	pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
		self.fields
			.iter()
			.map(|field| self.bind_field(field.as_ref()))
			.collect()
	}

	pub fn non_field_errors(&self) -> &[String] {
		self.errors
			.get(ALL_FIELDS_KEY)
			.map(|e| e.as_slice())
			.unwrap_or(&[])
	}

	/// Media of every widget on the form, merged in field order.
	pub fn media(&self) -> Media {
		self.fields
			.iter()
			.fold(Media::new(), |media, field| media.merge(&field.widget().media()))
	}

	/// Render every field as a `<p>` row.
	pub fn render(&self) -> String {
		self.bound_fields()
			.iter()
			.map(|bound| {
				format!(
					"<p>{} {}{}</p>",
					bound.label_tag(),
					bound.render(),
					bound.render_errors()
				)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

impl Form {
	// Allow borrowed_box because Index trait impl requires &Box<dyn FormField>
	#[allow(clippy::borrowed_box)]
	pub fn get(&self, name: &str) -> Option<&Box<dyn FormField>> {
		self.fields.iter().find(|f| f.name() == name)
	}
}

impl Index<&str> for Form {
	type Output = Box<dyn FormField>;

	fn index(&self, name: &str) -> &Self::Output {
		self.get(name)
			.unwrap_or_else(|| panic!("Field '{}' not found", name))
	}
}
