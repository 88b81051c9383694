//! Reusable value validators for field clean hooks

use crate::field::{FieldError, FieldResult};

/// Rejects strings with fewer than `min` characters.
///
/// # Examples
///
/// ```
/// use select2_forms::validators::MinLengthValidator;
///
/// let validator = MinLengthValidator::new(4);
/// assert!(validator.validate("Help").is_ok());
/// assert!(validator.validate("Red").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
	message: Option<String>,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min, message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn min(&self) -> usize {
		self.min
	}

	pub fn validate(&self, value: &str) -> FieldResult<()> {
		let count = value.chars().count();
		if count >= self.min {
			return Ok(());
		}
		let msg = self.message.clone().unwrap_or_else(|| {
			format!(
				"Ensure this value has at least {} characters (it has {}).",
				self.min, count
			)
		});
		Err(FieldError::Validation(msg))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", false)]
	#[case("abc", false)]
	#[case("abcd", true)]
	#[case("ÄÖÜß", true)]
	fn test_min_length_boundary(#[case] input: &str, #[case] ok: bool) {
		assert_eq!(MinLengthValidator::new(4).validate(input).is_ok(), ok);
	}

	#[rstest]
	fn test_custom_message() {
		let err = MinLengthValidator::new(2)
			.with_message("Too short")
			.validate("a")
			.unwrap_err();
		assert_eq!(err.to_string(), "Too short");
	}
}
