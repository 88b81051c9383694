//! Select2 widgets for select2-forms
//!
//! This crate provides searchable `<select>` widgets and the JSON views that
//! feed them:
//! - Light widgets enhancing choices rendered into the page
//! - Heavy widgets fetching choices from a data view
//! - Model widgets searching a query set through the shared auto-response view
//! - Signed field ids and a widget cache linking rendered widgets to searches
//! - Settings loadable from code, environment variables or files
//!
//! # Examples
//!
//! ```
//! use select2_forms::Widget;
//! use select2_widgets::{Select2Context, Select2Settings, Select2Widget};
//!
//! let context = Select2Context::new(Select2Settings::default()).unwrap();
//! let widget = Select2Widget::new(&context);
//!
//! let choices = vec![("1".to_string(), "One".to_string())];
//! let html = widget.render("number", None, &choices, &Default::default());
//! assert!(html.contains("class=\"django-select2\""));
//! ```

pub mod cache;
pub mod context;
pub mod error;
pub mod pagination;
pub mod search;
pub mod settings;
pub mod signing;
pub mod urls;
pub mod views;
pub mod widgets;

pub use cache::{CacheStatistics, CachedField, InMemoryWidgetCache, WidgetCache};
pub use context::{AUTO_VIEW_NAME, Select2Context};
pub use error::{Select2Error, Select2Result};
pub use search::ResultSource;
pub use settings::{Select2Settings, SettingsError};
pub use signing::FieldIdSigner;
pub use urls::{Handler, UrlConf};
pub use views::{AutoResponseView, QueryParams, json_response};
pub use widgets::{
	DataEndpoint, HeavySelect2MultipleWidget, HeavySelect2TagWidget, HeavySelect2Widget,
	ModelSelect2MultipleWidget, ModelSelect2TagWidget, ModelSelect2Widget, Select2MultipleWidget,
	Select2TagWidget, Select2Widget,
};
