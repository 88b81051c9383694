//! Forms module.
//!
//! Fields, widgets and model forms over in-memory tables.
//!
//! # Examples
//!
//! ```rust
//! use select2::forms::{CharField, Form};
//!
//! let mut form = Form::new();
//! form.add_field(Box::new(CharField::new("title".to_string()).required()));
//! assert_eq!(form.field_count(), 1);
//! ```

pub use select2_forms::*;
