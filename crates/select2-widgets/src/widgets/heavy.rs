//! Select2 widgets that fetch their choices from a JSON view

use super::base::{Multiple, Select2Base, SelectKind, Single, Tags, add_class, tag_attrs};
use crate::context::Select2Context;
use crate::error::Select2Result;
use select2_forms::Media;
use select2_forms::field::value_to_strings;
use select2_forms::widget::{
	Attrs, SelectOption, Widget, attrs_from, multiple_value_from_datadict, render_select,
};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use uuid::Uuid;

const HEAVY_CLASS: &str = "django-select2-heavy";

/// Where a heavy widget loads its choices from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEndpoint {
	/// A named route, reversed through the context's URL table
	View(String),
	/// A literal path
	Url(String),
}

impl DataEndpoint {
	pub fn view(name: impl Into<String>) -> Self {
		Self::View(name.into())
	}

	pub fn url(path: impl Into<String>) -> Self {
		Self::Url(path.into())
	}

	pub fn resolve(&self, context: &Select2Context) -> Select2Result<String> {
		match self {
			Self::View(name) => context.reverse(name),
			Self::Url(path) => Ok(path.clone()),
		}
	}
}

/// Identity and AJAX settings of one heavy widget instance
#[derive(Debug, Clone)]
pub(crate) struct HeavyConfig {
	pub(crate) url: String,
	pub(crate) id: Uuid,
	pub(crate) field_id: String,
	pub(crate) dependent_fields: Vec<String>,
}

impl HeavyConfig {
	pub(crate) fn new(context: &Select2Context, endpoint: &DataEndpoint) -> Select2Result<Self> {
		let url = endpoint.resolve(context)?;
		let id = Uuid::new_v4();
		let field_id = context.signer().sign(&id)?;
		Ok(Self {
			url,
			id,
			field_id,
			dependent_fields: Vec::new(),
		})
	}

	/// Attributes of a heavy widget of kind `K`, layered over the select2 defaults.
	pub(crate) fn build_attrs<K: SelectKind>(&self, base: &Select2Base, extra: &Attrs) -> Attrs {
		let mut heavy = attrs_from([
			("data-ajax--url", self.url.as_str()),
			("data-ajax--cache", "true"),
			("data-ajax--type", "GET"),
			("data-minimum-input-length", "2"),
		]);
		if !self.dependent_fields.is_empty() {
			heavy.insert(
				"data-select2-dependent-fields".to_string(),
				self.dependent_fields.join(" "),
			);
		}

		let layers = if K::TAGS {
			vec![heavy, tag_attrs()]
		} else {
			vec![heavy]
		};
		let mut attrs = base.build_attrs(&layers, extra);
		attrs.insert("data-field_id".to_string(), self.field_id.clone());
		add_class(&mut attrs, HEAVY_CLASS);
		attrs
	}
}

/// A select2 widget whose choices come from a data view
///
/// Only the selected choices are rendered; the rest are searched through
/// the view.
pub struct HeavySelect2<K: SelectKind> {
	base: Select2Base,
	config: HeavyConfig,
	kind: PhantomData<K>,
}

pub type HeavySelect2Widget = HeavySelect2<Single>;
pub type HeavySelect2MultipleWidget = HeavySelect2<Multiple>;
pub type HeavySelect2TagWidget = HeavySelect2<Tags>;

impl<K: SelectKind> HeavySelect2<K> {
	/// Fails when `endpoint` names a view that is not routed.
	pub fn new(context: &Select2Context, endpoint: DataEndpoint) -> Select2Result<Self> {
		Ok(Self {
			base: Select2Base::new(context),
			config: HeavyConfig::new(context, &endpoint)?,
			kind: PhantomData,
		})
	}

	pub fn with_attrs(mut self, attrs: Attrs) -> Self {
		self.base.set_attrs(attrs);
		self
	}

	/// Form fields whose values are sent along with each search.
	pub fn with_dependent_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.config.dependent_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn url(&self) -> &str {
		&self.config.url
	}

	pub fn uuid(&self) -> Uuid {
		self.config.id
	}

	/// Signed uuid rendered as `data-field_id`.
	pub fn field_id(&self) -> &str {
		&self.config.field_id
	}
}

impl<K: SelectKind> Widget for HeavySelect2<K> {
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
		self.config.build_attrs::<K>(&self.base, extra)
	}

	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String {
		let attrs = self.build_attrs(extra_attrs);
		let selected: Vec<String> = value_to_strings(value)
			.into_iter()
			.filter(|v| !v.is_empty())
			.collect();

		let mut options: Vec<SelectOption> = choices
			.iter()
			.filter(|(value, _)| selected.contains(value))
			.map(|(value, label)| SelectOption::new(value.clone(), label.clone(), true))
			.collect();
		if !K::MULTIPLE {
			options.truncate(1);
		}
		self.base.add_empty_option(&mut options, K::MULTIPLE);

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
