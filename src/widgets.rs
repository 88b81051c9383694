//! Widgets module.
//!
//! Select2 widgets and the JSON views that feed them.
//!
//! # Examples
//!
//! ```rust
//! use select2::widgets::{AUTO_VIEW_NAME, Select2Context, Select2Settings};
//!
//! let context = Select2Context::new(Select2Settings::default()).unwrap();
//! assert_eq!(context.reverse(AUTO_VIEW_NAME).unwrap(), "/select2/fields/auto.json");
//! ```

pub use select2_widgets::*;
