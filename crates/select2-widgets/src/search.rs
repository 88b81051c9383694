//! Term search over query sets
//!
//! A term like `"ab cd"` matches a record when every whitespace separated
//! bit matches at least one search lookup, or when the whole term matches
//! one of them.

use crate::error::{Select2Error, Select2Result};
use select2_forms::{Lookup, Model, Q, QuerySet};
use serde_json::Value;
use std::collections::BTreeMap;

/// Build the search predicate for `term` over `search_fields`
///
/// `(f1 ~ bit1 OR f2 ~ bit1) AND (f1 ~ bit2 OR f2 ~ bit2) ... OR (f1 ~ term OR f2 ~ term)`
///
/// An empty term places no restriction.
///
/// # Examples
///
/// ```
/// use select2_forms::Q;
/// use select2_widgets::search::search_filter;
///
/// let fields = vec!["title__icontains".to_string()];
/// assert_eq!(search_filter(&fields, "  "), Q::all());
///
/// let q = search_filter(&fields, "abbey road");
/// assert!(matches!(q, Q::Or(_)));
/// ```
pub fn search_filter(search_fields: &[String], term: &str) -> Q {
	if term.trim().is_empty() || search_fields.is_empty() {
		return Q::all();
	}

	let any_field = |value: &str| {
		Q::Or(
			search_fields
				.iter()
				.map(|lookup| Q::lookup(lookup, value))
				.collect(),
		)
	};

	let every_bit = Q::And(term.split_whitespace().map(&any_field).collect());
	every_bit.or(any_field(term))
}

/// Restrict a query set by a search term and dependent field lookups.
pub fn filter_queryset<M: Model>(
	queryset: &QuerySet<M>,
	search_fields: &[String],
	term: &str,
	dependent: &[Lookup],
) -> Select2Result<QuerySet<M>> {
	if search_fields.is_empty() {
		return Err(Select2Error::ImproperlyConfigured(format!(
			"widget for {} must define search_fields",
			M::model_name()
		)));
	}

	let mut filtered = queryset.filter(search_filter(search_fields, term));
	if !dependent.is_empty() {
		filtered = filtered.filter(Q::And(dependent.iter().cloned().map(Q::from).collect()));
	}
	Ok(filtered)
}

/// Translate submitted dependent field values into lookups
///
/// `dependent_fields` maps a form field name to a model lookup. A single
/// value under the field name becomes an exact lookup; repeated values under
/// `name[]` become an `__in` lookup. Empty values are ignored.
///
/// # Examples
///
/// ```
/// use select2_widgets::search::dependent_lookups;
/// use std::collections::BTreeMap;
///
/// let fields = BTreeMap::from([("country".to_string(), "country".to_string())]);
///
/// let lookups = dependent_lookups(&fields, |name| match name {
///     "country" => vec!["3".to_string()],
///     _ => vec![],
/// });
/// assert_eq!(lookups.len(), 1);
/// assert_eq!(lookups[0].expression(), "country");
/// ```
pub fn dependent_lookups<F>(dependent_fields: &BTreeMap<String, String>, values: F) -> Vec<Lookup>
where
	F: Fn(&str) -> Vec<String>,
{
	let mut lookups = Vec::new();
	for (form_field, model_field) in dependent_fields {
		if let Some(value) = values(form_field).into_iter().find(|v| !v.is_empty()) {
			lookups.push(Lookup::new(model_field, value));
		}

		let many: Vec<Value> = values(&format!("{}[]", form_field))
			.into_iter()
			.filter(|v| !v.is_empty())
			.map(Value::String)
			.collect();
		if !many.is_empty() {
			lookups.push(Lookup::new(
				&format!("{}__in", model_field),
				Value::Array(many),
			));
		}
	}
	lookups
}

/// A searchable source of `{"id", "text"}` results
///
/// This is what a widget registers in the widget cache, so that the
/// auto-response view can answer for it.
pub trait ResultSource: Send + Sync {
	/// Page size of the data view.
	fn max_results(&self) -> usize;

	/// Form field name → model lookup.
	fn dependent_fields(&self) -> &BTreeMap<String, String>;

	/// Every result matching `term` and the dependent lookups, in order.
	fn results(&self, term: &str, dependent: &[Lookup]) -> Select2Result<Vec<Value>>;
}
