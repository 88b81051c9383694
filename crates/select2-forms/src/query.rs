//! Lazy query sets over in-memory tables
//!
//! Filters are expressed with Django-style lookup strings
//! (`"title__icontains"`, `"pk__startswith"`, `"country"`) combined into a
//! [`Q`] tree. A [`QuerySet`] only stores the predicate; rows are read from
//! the table every time it is evaluated.

use crate::field::value_to_string;
use crate::model::{Model, Table, lookup_value};
use serde_json::Value;

/// Comparison applied by a [`Lookup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupOp {
	#[default]
	Exact,
	IExact,
	Contains,
	IContains,
	StartsWith,
	IStartsWith,
	EndsWith,
	IEndsWith,
	In,
}

impl LookupOp {
	pub fn from_suffix(suffix: &str) -> Option<Self> {
		match suffix {
			"exact" => Some(Self::Exact),
			"iexact" => Some(Self::IExact),
			"contains" => Some(Self::Contains),
			"icontains" => Some(Self::IContains),
			"startswith" => Some(Self::StartsWith),
			"istartswith" => Some(Self::IStartsWith),
			"endswith" => Some(Self::EndsWith),
			"iendswith" => Some(Self::IEndsWith),
			"in" => Some(Self::In),
			_ => None,
		}
	}

	pub fn suffix(&self) -> &'static str {
		match self {
			Self::Exact => "exact",
			Self::IExact => "iexact",
			Self::Contains => "contains",
			Self::IContains => "icontains",
			Self::StartsWith => "startswith",
			Self::IStartsWith => "istartswith",
			Self::EndsWith => "endswith",
			Self::IEndsWith => "iendswith",
			Self::In => "in",
		}
	}

	fn compare(&self, candidate: &str, target: &str) -> bool {
		match self {
			Self::Exact | Self::In => candidate == target,
			Self::IExact => candidate.to_lowercase() == target.to_lowercase(),
			Self::Contains => candidate.contains(target),
			Self::IContains => candidate.to_lowercase().contains(&target.to_lowercase()),
			Self::StartsWith => candidate.starts_with(target),
			Self::IStartsWith => candidate.to_lowercase().starts_with(&target.to_lowercase()),
			Self::EndsWith => candidate.ends_with(target),
			Self::IEndsWith => candidate.to_lowercase().ends_with(&target.to_lowercase()),
		}
	}
}

/// A single `field__op = value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
	pub field: String,
	pub op: LookupOp,
	pub value: Value,
}

impl Lookup {
	/// Parse a lookup expression and attach the value to compare against
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::query::{Lookup, LookupOp};
	///
	/// let lookup = Lookup::new("title__icontains", "rock");
	/// assert_eq!(lookup.field, "title");
	/// assert_eq!(lookup.op, LookupOp::IContains);
	///
	/// let bare = Lookup::new("country", 3);
	/// assert_eq!(bare.op, LookupOp::Exact);
	/// ```
	pub fn new(expression: &str, value: impl Into<Value>) -> Self {
		let (field, op) = Self::parse_expression(expression);
		Self {
			field,
			op,
			value: value.into(),
		}
	}

	/// Split `"field__op"` into its parts. Unknown suffixes stay in the field path.
	pub fn parse_expression(expression: &str) -> (String, LookupOp) {
		if let Some((field, suffix)) = expression.rsplit_once("__")
			&& let Some(op) = LookupOp::from_suffix(suffix)
		{
			return (field.to_string(), op);
		}
		(expression.to_string(), LookupOp::Exact)
	}

	pub fn expression(&self) -> String {
		match self.op {
			LookupOp::Exact => self.field.clone(),
			op => format!("{}__{}", self.field, op.suffix()),
		}
	}

	pub fn matches<M: Model>(&self, instance: &M) -> bool {
		match lookup_value(instance, &self.field) {
			None | Some(Value::Null) => false,
			Some(Value::Array(items)) => items.iter().any(|item| self.matches_scalar(item)),
			Some(scalar) => self.matches_scalar(&scalar),
		}
	}

	fn matches_scalar(&self, candidate: &Value) -> bool {
		if candidate.is_null() {
			return false;
		}
		let candidate = value_to_string(candidate);
		match (&self.op, &self.value) {
			(LookupOp::In, Value::Array(targets)) => targets
				.iter()
				.any(|target| candidate == value_to_string(target)),
			(op, target) => op.compare(&candidate, &value_to_string(target)),
		}
	}
}

/// Boolean combination of lookups
#[derive(Debug, Clone, PartialEq)]
pub enum Q {
	Lookup(Lookup),
	And(Vec<Q>),
	Or(Vec<Q>),
	Not(Box<Q>),
}

impl Q {
	pub fn lookup(expression: &str, value: impl Into<Value>) -> Self {
		Self::Lookup(Lookup::new(expression, value))
	}

	/// Always true.
	pub fn all() -> Self {
		Self::And(Vec::new())
	}

	/// Always false.
	pub fn none() -> Self {
		Self::Or(Vec::new())
	}

	pub fn and(self, other: Q) -> Self {
		match self {
			Self::And(mut parts) => {
				parts.push(other);
				Self::And(parts)
			}
			first => Self::And(vec![first, other]),
		}
	}

	pub fn or(self, other: Q) -> Self {
		match self {
			Self::Or(mut parts) => {
				parts.push(other);
				Self::Or(parts)
			}
			first => Self::Or(vec![first, other]),
		}
	}

	#[allow(clippy::should_implement_trait)]
	pub fn not(self) -> Self {
		Self::Not(Box::new(self))
	}

	pub fn matches<M: Model>(&self, instance: &M) -> bool {
		match self {
			Self::Lookup(lookup) => lookup.matches(instance),
			Self::And(parts) => parts.iter().all(|q| q.matches(instance)),
			Self::Or(parts) => parts.iter().any(|q| q.matches(instance)),
			Self::Not(inner) => !inner.matches(instance),
		}
	}
}

impl From<Lookup> for Q {
	fn from(lookup: Lookup) -> Self {
		Self::Lookup(lookup)
	}
}

/// Lazy filtered view of a [`Table`]
pub struct QuerySet<M: Model> {
	table: Table<M>,
	predicate: Q,
}

impl<M: Model> Clone for QuerySet<M> {
	fn clone(&self) -> Self {
		Self {
			table: self.table.clone(),
			predicate: self.predicate.clone(),
		}
	}
}

impl<M: Model> std::fmt::Debug for QuerySet<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QuerySet")
			.field("model", &M::model_name())
			.field("predicate", &self.predicate)
			.finish()
	}
}

impl<M: Model> QuerySet<M> {
	pub fn new(table: Table<M>) -> Self {
		Self {
			table,
			predicate: Q::all(),
		}
	}

	pub fn table(&self) -> &Table<M> {
		&self.table
	}

	pub fn predicate(&self) -> &Q {
		&self.predicate
	}

	pub fn filter(&self, q: impl Into<Q>) -> Self {
		Self {
			table: self.table.clone(),
			predicate: self.predicate.clone().and(q.into()),
		}
	}

	pub fn exclude(&self, q: impl Into<Q>) -> Self {
		Self {
			table: self.table.clone(),
			predicate: self.predicate.clone().and(q.into().not()),
		}
	}

	/// Evaluate against the current rows, ordered by primary key
	///
	/// # Examples
	///
	/// ```ignore
	/// let rock = genres.all().filter(Q::lookup("title__icontains", "rock")).fetch();
	/// ```
	pub fn fetch(&self) -> Vec<M> {
		self.table
			.rows()
			.into_iter()
			.filter(|row| self.predicate.matches(row))
			.collect()
	}

	pub fn count(&self) -> usize {
		self.fetch().len()
	}

	pub fn exists(&self) -> bool {
		self.table.rows().iter().any(|row| self.predicate.matches(row))
	}

	pub fn first(&self) -> Option<M> {
		self.table
			.rows()
			.into_iter()
			.find(|row| self.predicate.matches(row))
	}

	/// Fetch the record with `pk` if it is part of this query set.
	pub fn get(&self, pk: i64) -> Option<M> {
		self.table
			.get(pk)
			.filter(|row| self.predicate.matches(row))
	}

	pub fn pks(&self) -> Vec<i64> {
		self.fetch().iter().map(Model::pk).collect()
	}

	/// Records whose choice value is one of `values`.
	pub fn filter_choice_values(&self, values: &[String]) -> Vec<M> {
		self.fetch()
			.into_iter()
			.filter(|row| values.contains(&row.to_choice_value()))
			.collect()
	}

	/// Insert a new record into the underlying table.
	pub fn create_with<F>(&self, build: F) -> M
	where
		F: FnOnce(i64) -> M,
	{
		self.table.create_with(build)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::test_support::{Tag, tag_table};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("title__icontains", "title", LookupOp::IContains)]
	#[case("pk__startswith", "pk", LookupOp::StartsWith)]
	#[case("country", "country", LookupOp::Exact)]
	#[case("country__name__iexact", "country__name", LookupOp::IExact)]
	#[case("country__name", "country__name", LookupOp::Exact)]
	fn test_parse_expression(#[case] expr: &str, #[case] field: &str, #[case] op: LookupOp) {
		assert_eq!(Lookup::parse_expression(expr), (field.to_string(), op));
	}

	#[rstest]
	fn test_icontains_filter() {
		// Arrange
		let table = tag_table(&["Rock", "Hard Rock", "Jazz"]);

		// Act
		let titles: Vec<String> = table
			.all()
			.filter(Q::lookup("title__icontains", "rock"))
			.fetch()
			.into_iter()
			.map(|t| t.title)
			.collect();

		// Assert
		assert_eq!(titles, vec!["Rock", "Hard Rock"]);
	}

	#[rstest]
	fn test_pk_startswith_matches_numeric_pk() {
		let titles: Vec<&str> = (0..12).map(|_| "x").collect();
		let table = tag_table(&titles);
		let pks = table.all().filter(Q::lookup("pk__startswith", "1")).pks();
		assert_eq!(pks, vec![1, 10, 11, 12]);
	}

	#[rstest]
	fn test_array_field_matches_any_element() {
		let table = Table::<Tag>::new();
		table.create_with(|id| Tag {
			id,
			title: "a".to_string(),
			related: vec![4, 5],
		});
		table.create_with(|id| Tag {
			id,
			title: "b".to_string(),
			related: vec![6],
		});

		assert_eq!(table.all().filter(Q::lookup("related", 5)).pks(), vec![1]);
		assert_eq!(
			table.all().filter(Q::lookup("related__in", json!(["6", "9"]))).pks(),
			vec![2]
		);
	}

	#[rstest]
	fn test_exclude_and_queryset_is_live() {
		let table = tag_table(&["rock"]);
		let qs = table.all().exclude(Q::lookup("title", "jazz"));
		assert_eq!(qs.count(), 1);

		table.create_with(|id| Tag {
			id,
			title: "pop".to_string(),
			related: vec![],
		});

		assert_eq!(qs.count(), 2);
		assert!(qs.get(2).is_some());
	}

	#[rstest]
	fn test_empty_or_is_false_and_empty_and_is_true() {
		let table = tag_table(&["rock"]);
		assert_eq!(table.all().filter(Q::none()).count(), 0);
		assert_eq!(table.all().filter(Q::all()).count(), 1);
	}
}
