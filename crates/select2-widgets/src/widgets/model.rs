//! Heavy select2 widgets backed by a query set
//!
//! Model widgets are served by the shared auto-response view. Rendering a
//! widget registers its [`ModelSource`] in the widget cache under the
//! widget's uuid; searches come back with the signed uuid and are answered
//! from that source.

use super::base::{Multiple, Select2Base, SelectKind, Single, Tags};
use super::heavy::{DataEndpoint, HeavyConfig};
use crate::cache::{CachedField, WidgetCache};
use crate::context::{AUTO_VIEW_NAME, Select2Context};
use crate::error::Select2Result;
use crate::search::{ResultSource, filter_queryset};
use select2_forms::field::value_to_strings;
use select2_forms::widget::{
	Attrs, SelectOption, Widget, multiple_value_from_datadict, render_select,
};
use select2_forms::{Lookup, Media, Model, ModelResult, QuerySet};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Default page size of model widget searches.
pub const DEFAULT_MAX_RESULTS: usize = 25;

pub type LabelFn<M> = Arc<dyn Fn(&M) -> String + Send + Sync>;

/// Creates a record for a typed-in tag.
pub type CreateValueFn<M> = Arc<dyn Fn(&QuerySet<M>, &str) -> ModelResult<M> + Send + Sync>;

/// Search configuration of a model widget
pub struct ModelSource<M: Model> {
	queryset: QuerySet<M>,
	search_fields: Vec<String>,
	max_results: usize,
	dependent_fields: BTreeMap<String, String>,
	label: Option<LabelFn<M>>,
}

impl<M: Model> Clone for ModelSource<M> {
	fn clone(&self) -> Self {
		Self {
			queryset: self.queryset.clone(),
			search_fields: self.search_fields.clone(),
			max_results: self.max_results,
			dependent_fields: self.dependent_fields.clone(),
			label: self.label.clone(),
		}
	}
}

impl<M: Model> ModelSource<M> {
	pub fn new(queryset: QuerySet<M>) -> Self {
		Self {
			queryset,
			search_fields: Vec::new(),
			max_results: DEFAULT_MAX_RESULTS,
			dependent_fields: BTreeMap::new(),
			label: None,
		}
	}

	pub fn queryset(&self) -> &QuerySet<M> {
		&self.queryset
	}

	pub fn search_fields(&self) -> &[String] {
		&self.search_fields
	}

	pub fn label_from_instance(&self, instance: &M) -> String {
		match &self.label {
			Some(label) => label(instance),
			None => instance.to_choice_label(),
		}
	}

	pub fn result_from_instance(&self, instance: &M) -> Value {
		json!({
			"id": instance.pk(),
			"text": self.label_from_instance(instance),
		})
	}

	pub fn filter_queryset(&self, term: &str, dependent: &[Lookup]) -> Select2Result<QuerySet<M>> {
		filter_queryset(&self.queryset, &self.search_fields, term, dependent)
	}
}

impl<M: Model> ResultSource for ModelSource<M> {
	fn max_results(&self) -> usize {
		self.max_results
	}

	fn dependent_fields(&self) -> &BTreeMap<String, String> {
		&self.dependent_fields
	}

	fn results(&self, term: &str, dependent: &[Lookup]) -> Select2Result<Vec<Value>> {
		Ok(self
			.filter_queryset(term, dependent)?
			.fetch()
			.iter()
			.map(|instance| self.result_from_instance(instance))
			.collect())
	}
}

/// A heavy select2 widget over the records of a query set
///
/// # Examples
///
/// ```ignore
/// let widget = ModelSelect2Widget::new(&context, db.artists.all())?
///     .with_search_fields(["title__icontains"])
///     .with_label_from_instance(|artist: &Artist| artist.title.to_uppercase());
/// ```
pub struct ModelSelect2<M: Model, K: SelectKind> {
	base: Select2Base,
	config: HeavyConfig,
	source: ModelSource<M>,
	cache: Arc<dyn WidgetCache>,
	cache_key: String,
	create_value: Option<CreateValueFn<M>>,
	kind: PhantomData<K>,
}

pub type ModelSelect2Widget<M> = ModelSelect2<M, Single>;
pub type ModelSelect2MultipleWidget<M> = ModelSelect2<M, Multiple>;
pub type ModelSelect2TagWidget<M> = ModelSelect2<M, Tags>;

impl<M: Model, K: SelectKind> ModelSelect2<M, K> {
	/// A widget searched through the auto-response view.
	pub fn new(context: &Select2Context, queryset: QuerySet<M>) -> Select2Result<Self> {
		Self::with_endpoint(context, queryset, DataEndpoint::view(AUTO_VIEW_NAME))
	}

	pub fn with_endpoint(
		context: &Select2Context,
		queryset: QuerySet<M>,
		endpoint: DataEndpoint,
	) -> Select2Result<Self> {
		let config = HeavyConfig::new(context, &endpoint)?;
		Ok(Self {
			base: Select2Base::new(context),
			cache_key: context.cache_key(&config.id),
			config,
			source: ModelSource::new(queryset),
			cache: context.cache(),
			create_value: None,
			kind: PhantomData,
		})
	}

	pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.source.search_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_max_results(mut self, max_results: usize) -> Self {
		self.source.max_results = max_results;
		self
	}

	/// Filter results by other form fields: `(form field, model lookup)` pairs.
	pub fn with_dependent_fields<I, F, L>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = (F, L)>,
		F: Into<String>,
		L: Into<String>,
	{
		self.source.dependent_fields = fields
			.into_iter()
			.map(|(form_field, lookup)| (form_field.into(), lookup.into()))
			.collect();
		self.config.dependent_fields = self.source.dependent_fields.keys().cloned().collect();
		self
	}

	pub fn with_attrs(mut self, attrs: Attrs) -> Self {
		self.base.set_attrs(attrs);
		self
	}

	pub fn with_label_from_instance<F>(mut self, label: F) -> Self
	where
		F: Fn(&M) -> String + Send + Sync + 'static,
	{
		self.source.label = Some(Arc::new(label));
		self
	}

	/// Hook run for each submitted tag that is not an existing record.
	pub fn with_create_value<F>(mut self, create: F) -> Self
	where
		F: Fn(&QuerySet<M>, &str) -> ModelResult<M> + Send + Sync + 'static,
	{
		self.create_value = Some(Arc::new(create));
		self
	}

	pub fn source(&self) -> &ModelSource<M> {
		&self.source
	}

	pub fn queryset(&self) -> &QuerySet<M> {
		&self.source.queryset
	}

	pub fn search_fields(&self) -> &[String] {
		&self.source.search_fields
	}

	pub fn max_results(&self) -> usize {
		self.source.max_results
	}

	pub fn dependent_fields(&self) -> &BTreeMap<String, String> {
		&self.source.dependent_fields
	}

	pub fn url(&self) -> &str {
		&self.config.url
	}

	pub fn uuid(&self) -> Uuid {
		self.config.id
	}

	pub fn field_id(&self) -> &str {
		&self.config.field_id
	}

	pub fn cache_key(&self) -> &str {
		&self.cache_key
	}

	pub fn label_from_instance(&self, instance: &M) -> String {
		self.source.label_from_instance(instance)
	}

	pub fn result_from_instance(&self, instance: &M) -> Value {
		self.source.result_from_instance(instance)
	}

	pub fn filter_queryset(&self, term: &str, dependent: &[Lookup]) -> Select2Result<QuerySet<M>> {
		self.source.filter_queryset(term, dependent)
	}

	/// Register this widget's data source for the data view.
	pub fn set_to_cache(&self) {
		self.cache.set(
			&self.cache_key,
			CachedField {
				url: self.config.url.clone(),
				source: Arc::new(self.source.clone()),
			},
		);
	}

	/// Submitted tags as primary keys
	///
	/// Existing records are kept as they are; every other distinct value
	/// goes through the create hook once. Values the hook cannot turn into a
	/// record are passed on for the field to reject.
	fn tags_from_datadict(&self, data: &HashMap<String, Value>, name: &str) -> Option<Value> {
		let submitted = multiple_value_from_datadict(data, name)?;
		let mut values: Vec<String> = Vec::new();
		for value in value_to_strings(Some(&submitted)) {
			if !value.is_empty() && !values.contains(&value) {
				values.push(value);
			}
		}

		let queryset = &self.source.queryset;
		let resolved = values
			.into_iter()
			.map(|value| {
				if let Ok(pk) = value.parse::<i64>()
					&& let Some(existing) = queryset.get(pk)
				{
					return existing.to_choice_value();
				}
				let Some(create) = &self.create_value else {
					return value;
				};
				match create(queryset, &value) {
					Ok(created) => {
						tracing::debug!(
							model = M::model_name(),
							pk = created.pk(),
							tag = %value,
							"created record for new tag"
						);
						created.to_choice_value()
					}
					Err(e) => {
						tracing::warn!(model = M::model_name(), tag = %value, error = %e, "could not create tag");
						value
					}
				}
			})
			.map(Value::String)
			.collect();
		Some(Value::Array(resolved))
	}
}

impl<M: Model, K: SelectKind> Widget for ModelSelect2<M, K> {
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

	/// Renders the selected records only; `choices` are not used.
	fn render(
		&self,
		name: &str,
		value: Option<&Value>,
		_choices: &[(String, String)],
		extra_attrs: &Attrs,
	) -> String {
		self.set_to_cache();

		let attrs = self.build_attrs(extra_attrs);
		let selected: Vec<String> = value_to_strings(value)
			.into_iter()
			.filter(|v| !v.is_empty())
			.collect();

		let mut options: Vec<SelectOption> = self
			.source
			.queryset
			.filter_choice_values(&selected)
			.iter()
			.map(|instance| {
				SelectOption::new(
					instance.to_choice_value(),
					self.label_from_instance(instance),
					true,
				)
			})
			.collect();
		if !K::MULTIPLE {
			options.truncate(1);
		}
		self.base.add_empty_option(&mut options, K::MULTIPLE);

		render_select(name, &attrs, K::MULTIPLE, &options)
	}

	fn value_from_datadict(&self, data: &HashMap<String, Value>, name: &str) -> Option<Value> {
		if K::TAGS {
			self.tags_from_datadict(data, name)
		} else if K::MULTIPLE {
			multiple_value_from_datadict(data, name)
		} else {
			data.get(name).cloned()
		}
	}

	fn media(&self) -> Media {
		self.base.media()
	}
}
