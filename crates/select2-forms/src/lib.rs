//! Form processing and in-memory model storage for select2
//!
//! This crate provides the pieces the select2 widgets plug into:
//! - Form fields with cleaning and validation hooks
//! - Widgets that render HTML and extract submitted values
//! - Media (JS/CSS) declarations merged across a form
//! - Shared model tables with lazily evaluated query sets
//! - Model forms that write cleaned data back to a table

pub mod bound_field;
pub mod field;
pub mod fields;
pub mod form;
pub mod media;
pub mod model;
pub mod model_form;
pub mod query;
pub mod validators;
pub mod widget;

pub use bound_field::BoundField;
pub use field::{FieldError, FieldResult, FormField};
pub use fields::{
	CharField, ChoiceField, ModelChoiceField, ModelMultipleChoiceField, MultipleChoiceField,
};
pub use form::{ALL_FIELDS_KEY, Form, FormError, FormResult};
pub use media::Media;
pub use model::{Model, ModelError, ModelResult, Table};
pub use model_form::ModelForm;
pub use query::{Lookup, LookupOp, Q, QuerySet};
pub use widget::{Attrs, Select, SelectMultiple, TextInput, Widget};
