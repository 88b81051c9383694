//! Select2 widgets over choices rendered into the page

use super::base::{Multiple, Select2Base, SelectKind, Single, Tags, tag_attrs};
use crate::context::Select2Context;
use select2_forms::Media;
use select2_forms::field::value_to_strings;
use select2_forms::widget::{Attrs, Widget, multiple_value_from_datadict, render_select};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

/// A select2 enhanced `<select>` whose options are all part of the page
pub struct Select2<K: SelectKind> {
	base: Select2Base,
	kind: PhantomData<K>,
}

pub type Select2Widget = Select2<Single>;
pub type Select2MultipleWidget = Select2<Multiple>;
pub type Select2TagWidget = Select2<Tags>;

impl<K: SelectKind> Select2<K> {
	pub fn new(context: &Select2Context) -> Self {
		Self {
			base: Select2Base::new(context),
			kind: PhantomData,
		}
	}

	pub fn with_attrs(mut self, attrs: Attrs) -> Self {
		self.base.set_attrs(attrs);
		self
	}

	/// Placeholder shown while an optional select is empty.
	pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
		self.base.set_empty_label(label);
		self
	}
}

impl<K: SelectKind> Widget for Select2<K> {
	fn attrs(&self) -> &Attrs {
		&self.base.attrs
	}

	fn is_required(&self) -> bool {
		self.base.required
	}

	fn set_required(&mut self, required: bool) {
		self.base.required = required;
	}

	fn allow_multiple_selected(&self) -> bool {
		K::MULTIPLE
	}

	fn build_attrs(&self, extra: &Attrs) -> Attrs {
		let layers = if K::TAGS { vec![tag_attrs()] } else { Vec::new() };
		self.base.build_attrs(&layers, extra)
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
		let options = self.base.options(choices, &selected, K::MULTIPLE);
		render_select(name, &attrs, K::MULTIPLE, &options)
	}

	fn value_from_datadict(&self, data: &HashMap<String, Value>, name: &str) -> Option<Value> {
		if K::MULTIPLE {
			multiple_value_from_datadict(data, name)
		} else {
			data.get(name).cloned()
		}
	}

	fn media(&self) -> Media {
		self.base.media()
	}
}
