//! Select2 widgets
//!
//! Three families share the same attribute rules:
//! - light widgets render all choices into the page
//! - heavy widgets load choices from a JSON view
//! - model widgets are heavy widgets answered by the auto-response view
//!
//! Each family comes in single, multiple and tag flavours selected by a
//! [`SelectKind`] marker.

mod base;
mod heavy;
mod light;
mod model;

pub use base::{Multiple, Select2Base, SelectKind, Single, Tags, select2_media};
pub use heavy::{
	DataEndpoint, HeavySelect2, HeavySelect2MultipleWidget, HeavySelect2TagWidget,
	HeavySelect2Widget,
};
pub use light::{Select2, Select2MultipleWidget, Select2TagWidget, Select2Widget};
pub use model::{
	CreateValueFn, DEFAULT_MAX_RESULTS, LabelFn, ModelSelect2, ModelSelect2MultipleWidget,
	ModelSelect2TagWidget, ModelSelect2Widget, ModelSource,
};
