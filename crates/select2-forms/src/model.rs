//! Model records and shared in-memory tables
//!
//! Records are plain structs implementing [`Model`]. A [`Table`] stores them
//! keyed by primary key behind a shared lock, and hands out lazy
//! [`QuerySet`]s that always read the live rows.

use crate::query::QuerySet;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
	#[error("{model} has no field named '{field}'")]
	UnknownField { model: String, field: String },
	#[error("Invalid value for '{field}': {message}")]
	InvalidValue { field: String, message: String },
	#[error("{model} matching query does not exist")]
	DoesNotExist { model: String },
	#[error("{model} with this {field} already exists")]
	Duplicate { model: String, field: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A persisted record
///
/// Relation fields report related primary keys from [`Model::get_field`]:
/// a number for a foreign key, an array of numbers for many-to-many and
/// reverse relations.
pub trait Model: Clone + Default + Send + Sync + 'static {
	fn model_name() -> &'static str;

	fn pk(&self) -> i64;

	fn set_pk(&mut self, pk: i64);

	fn field_names() -> &'static [&'static str];

	fn get_field(&self, name: &str) -> Option<Value>;

	fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()>;

	fn to_choice_value(&self) -> String {
		self.pk().to_string()
	}

	fn to_choice_label(&self) -> String;
}

/// Resolve a lookup path against a record; `pk` is always available.
pub fn lookup_value<M: Model>(instance: &M, field: &str) -> Option<Value> {
	if field == "pk" {
		return Some(Value::from(instance.pk()));
	}
	instance.get_field(field)
}

/// Interpret a submitted or cleaned value as a primary key
///
/// # Examples
///
/// ```
/// use select2_forms::model::value_to_pk;
/// use serde_json::json;
///
/// assert_eq!(value_to_pk("artist", &json!(3)).unwrap(), 3);
/// assert_eq!(value_to_pk("artist", &json!("7")).unwrap(), 7);
/// assert!(value_to_pk("artist", &json!("seven")).is_err());
/// ```
pub fn value_to_pk(field: &str, value: &Value) -> ModelResult<i64> {
	let invalid = || ModelError::InvalidValue {
		field: field.to_string(),
		message: format!("'{}' is not a valid primary key", value),
	};
	match value {
		Value::Number(n) => n.as_i64().ok_or_else(invalid),
		Value::String(s) => s.trim().parse().map_err(|_| invalid()),
		_ => Err(invalid()),
	}
}

/// Interpret a value as an optional primary key (`null` and `""` mean none).
pub fn value_to_optional_pk(field: &str, value: &Value) -> ModelResult<Option<i64>> {
	match value {
		Value::Null => Ok(None),
		Value::String(s) if s.is_empty() => Ok(None),
		other => value_to_pk(field, other).map(Some),
	}
}

/// Interpret a value as a list of primary keys.
pub fn value_to_pks(field: &str, value: &Value) -> ModelResult<Vec<i64>> {
	match value {
		Value::Null => Ok(Vec::new()),
		Value::Array(items) => items.iter().map(|v| value_to_pk(field, v)).collect(),
		other => Ok(vec![value_to_pk(field, other)?]),
	}
}

/// Interpret a value as text.
pub fn value_to_text(field: &str, value: &Value) -> ModelResult<String> {
	match value {
		Value::String(s) => Ok(s.clone()),
		Value::Null => Ok(String::new()),
		other => Err(ModelError::InvalidValue {
			field: field.to_string(),
			message: format!("expected text, got {}", other),
		}),
	}
}

struct TableState<M> {
	rows: BTreeMap<i64, M>,
	next_pk: i64,
}

/// Shared, auto-incrementing storage for one record type
pub struct Table<M: Model> {
	state: Arc<RwLock<TableState<M>>>,
}

impl<M: Model> Clone for Table<M> {
	fn clone(&self) -> Self {
		Self {
			state: Arc::clone(&self.state),
		}
	}
}

impl<M: Model> Default for Table<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: Model> Table<M> {
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(TableState {
				rows: BTreeMap::new(),
				next_pk: 1,
			})),
		}
	}

	/// Insert a record built from the next free primary key
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::{Model, ModelResult, Table};
	/// use serde_json::Value;
	///
	/// #[derive(Clone, Default)]
	/// struct Tag {
	///     id: i64,
	///     title: String,
	/// }
	///
	/// impl Model for Tag {
	///     fn model_name() -> &'static str { "Tag" }
	///     fn pk(&self) -> i64 { self.id }
	///     fn set_pk(&mut self, pk: i64) { self.id = pk; }
	///     fn field_names() -> &'static [&'static str] { &["title"] }
	///     fn get_field(&self, name: &str) -> Option<Value> {
	///         (name == "title").then(|| Value::from(self.title.clone()))
	///     }
	///     fn set_field(&mut self, _name: &str, _value: Value) -> ModelResult<()> { Ok(()) }
	///     fn to_choice_label(&self) -> String { self.title.clone() }
	/// }
	///
	/// let tags = Table::<Tag>::new();
	/// let rust = tags.create_with(|id| Tag { id, title: "rust".to_string() });
	/// assert_eq!(rust.id, 1);
	/// assert_eq!(tags.len(), 1);
	/// ```
	pub fn create_with<F>(&self, build: F) -> M
	where
		F: FnOnce(i64) -> M,
	{
		let mut state = self.state.write();
		let pk = state.next_pk;
		state.next_pk += 1;
		let mut instance = build(pk);
		instance.set_pk(pk);
		state.rows.insert(pk, instance.clone());
		instance
	}

	/// Insert or replace a record. A non-positive pk allocates a new one.
	pub fn save(&self, mut instance: M) -> M {
		let mut state = self.state.write();
		if instance.pk() <= 0 {
			let pk = state.next_pk;
			state.next_pk += 1;
			instance.set_pk(pk);
		} else if instance.pk() >= state.next_pk {
			state.next_pk = instance.pk() + 1;
		}
		state.rows.insert(instance.pk(), instance.clone());
		instance
	}

	pub fn get(&self, pk: i64) -> Option<M> {
		self.state.read().rows.get(&pk).cloned()
	}

	/// Apply `change` to the stored record, returning whether it existed.
	pub fn update<F>(&self, pk: i64, change: F) -> bool
	where
		F: FnOnce(&mut M),
	{
		match self.state.write().rows.get_mut(&pk) {
			Some(instance) => {
				change(instance);
				true
			}
			None => false,
		}
	}

	pub fn delete(&self, pk: i64) -> bool {
		self.state.write().rows.remove(&pk).is_some()
	}

	pub fn len(&self) -> usize {
		self.state.read().rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.state.read().rows.is_empty()
	}

	/// Snapshot of every row ordered by primary key.
	pub fn rows(&self) -> Vec<M> {
		self.state.read().rows.values().cloned().collect()
	}

	pub fn all(&self) -> QuerySet<M> {
		QuerySet::new(self.clone())
	}
}

#[cfg(test)]
pub(crate) mod test_support {
	use super::*;

	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Tag {
		pub id: i64,
		pub title: String,
		pub related: Vec<i64>,
	}

	impl Model for Tag {
		fn model_name() -> &'static str {
			"Tag"
		}

		fn pk(&self) -> i64 {
			self.id
		}

		fn set_pk(&mut self, pk: i64) {
			self.id = pk;
		}

		fn field_names() -> &'static [&'static str] {
			&["title", "related"]
		}

		fn get_field(&self, name: &str) -> Option<Value> {
			match name {
				"title" => Some(Value::from(self.title.clone())),
				"related" => Some(Value::from(self.related.clone())),
				_ => None,
			}
		}

		fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
			match name {
				"title" => self.title = value_to_text(name, &value)?,
				"related" => self.related = value_to_pks(name, &value)?,
				_ => {
					return Err(ModelError::UnknownField {
						model: Self::model_name().to_string(),
						field: name.to_string(),
					});
				}
			}
			Ok(())
		}

		fn to_choice_label(&self) -> String {
			self.title.clone()
		}
	}

	pub fn tag_table(titles: &[&str]) -> Table<Tag> {
		let table = Table::new();
		for title in titles {
			table.create_with(|id| Tag {
				id,
				title: title.to_string(),
				related: Vec::new(),
			});
		}
		table
	}
}

#[cfg(test)]
mod tests {
	use super::test_support::*;
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_table_assigns_sequential_pks() {
		// Arrange
		let table = tag_table(&["rock", "jazz"]);

		// Act
		let pks: Vec<i64> = table.rows().iter().map(|t| t.id).collect();

		// Assert
		assert_eq!(pks, vec![1, 2]);
	}

	#[rstest]
	fn test_table_save_keeps_explicit_pk_and_advances_counter() {
		let table = Table::<Tag>::new();
		table.save(Tag {
			id: 10,
			title: "blues".to_string(),
			related: vec![],
		});
		let next = table.create_with(|id| Tag {
			id,
			..Tag::default()
		});
		assert_eq!(next.id, 11);
	}

	#[rstest]
	fn test_table_update_and_delete() {
		let table = tag_table(&["rock"]);
		assert!(table.update(1, |t| t.title = "metal".to_string()));
		assert_eq!(table.get(1).map(|t| t.title), Some("metal".to_string()));
		assert!(table.delete(1));
		assert!(!table.update(1, |_| {}));
		assert!(table.is_empty());
	}

	#[rstest]
	fn test_value_to_pks() {
		assert_eq!(value_to_pks("genres", &json!(["1", 2])).unwrap(), vec![1, 2]);
		assert_eq!(value_to_pks("genres", &Value::Null).unwrap(), Vec::<i64>::new());
		assert_eq!(value_to_optional_pk("genre", &json!("")).unwrap(), None);
	}
}
