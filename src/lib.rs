//! # Reinhardt Select2
//!
//! Searchable, AJAX-backed select widgets for Django-style forms.
//!
//! The facade re-exports two crates:
//!
//! - [`forms`]: fields, widgets, bound fields, media, model records,
//!   in-memory query sets and model forms
//! - [`widgets`]: select2 light, heavy and model widgets, signed field ids,
//!   the widget cache and the auto-response view that answers searches
//!
//! ## Feature Flags
//!
//! - `forms` - form core only
//! - `widgets` (default) - select2 widget library, implies `forms`
//!
//! ## Quick Start
//!
//! ```
//! use select2::forms::{Form, ModelChoiceField, Table};
//! # use select2::forms::{Model, ModelResult};
//! # use serde_json::Value;
//! use select2::widgets::{ModelSelect2Widget, Select2Context, Select2Settings};
//!
//! # #[derive(Clone, Default)]
//! # struct Artist { id: i64, title: String }
//! # impl Model for Artist {
//! #     fn model_name() -> &'static str { "Artist" }
//! #     fn pk(&self) -> i64 { self.id }
//! #     fn set_pk(&mut self, pk: i64) { self.id = pk; }
//! #     fn field_names() -> &'static [&'static str] { &["title"] }
//! #     fn get_field(&self, name: &str) -> Option<Value> {
//! #         (name == "title").then(|| Value::from(self.title.clone()))
//! #     }
//! #     fn set_field(&mut self, _: &str, _: Value) -> ModelResult<()> { Ok(()) }
//! #     fn to_choice_label(&self) -> String { self.title.clone() }
//! # }
//! let context = Select2Context::new(Select2Settings::default()).unwrap();
//! let artists = Table::<Artist>::new();
//!
//! let widget = ModelSelect2Widget::new(&context, artists.all())
//!     .unwrap()
//!     .with_search_fields(["title__icontains"]);
//! let mut form = Form::new();
//! form.add_field(Box::new(
//!     ModelChoiceField::new("artist", artists.all()).with_widget(widget),
//! ));
//!
//! assert!(form.render().contains("django-select2-heavy"));
//! ```

#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "widgets")]
pub mod widgets;
