use crate::settings::SettingsError;
use select2_forms::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum Select2Error {
	#[error("No \"field_id\" provided.")]
	MissingFieldId,

	#[error("Invalid \"field_id\".")]
	BadSignature,

	#[error("field_id not found")]
	FieldIdNotFound,

	#[error("field_id was issued for another view.")]
	WrongView,

	#[error("{0}")]
	InvalidPage(String),

	#[error("Reverse for '{0}' not found")]
	NoReverseMatch(String),

	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	#[error(transparent)]
	Settings(#[from] SettingsError),

	#[error(transparent)]
	Model(#[from] ModelError),
}

impl Select2Error {
	/// Errors a data view answers with `404 Not Found`.
	pub fn is_not_found(&self) -> bool {
		matches!(
			self,
			Self::MissingFieldId
				| Self::BadSignature
				| Self::FieldIdNotFound
				| Self::WrongView
				| Self::InvalidPage(_)
		)
	}
}

pub type Select2Result<T> = Result<T, Select2Error>;
