//! Signed widget field ids
//!
//! A field id is `base64url(uuid) ":" base64url(hmac_sha256(key, uuid))`, so
//! a data view can trust the widget uuid it gets back from the browser.

use crate::error::{Select2Error, Select2Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies widget field ids
///
/// # Examples
///
/// ```
/// use select2_widgets::FieldIdSigner;
/// use uuid::Uuid;
///
/// let signer = FieldIdSigner::new("my-secret-key");
/// let id = Uuid::new_v4();
///
/// let field_id = signer.sign(&id).unwrap();
/// assert_eq!(signer.unsign(&field_id).unwrap(), id);
/// ```
#[derive(Clone)]
pub struct FieldIdSigner {
	secret_key: Vec<u8>,
}

impl std::fmt::Debug for FieldIdSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldIdSigner").finish_non_exhaustive()
	}
}

impl FieldIdSigner {
	pub fn new(secret_key: impl AsRef<[u8]>) -> Self {
		Self {
			secret_key: secret_key.as_ref().to_vec(),
		}
	}

	fn mac(&self, message: &[u8]) -> Select2Result<HmacSha256> {
		let mut mac = HmacSha256::new_from_slice(&self.secret_key)
			.map_err(|e| Select2Error::ImproperlyConfigured(format!("signing key: {}", e)))?;
		mac.update(message);
		Ok(mac)
	}

	pub fn sign(&self, id: &Uuid) -> Select2Result<String> {
		let payload = id.as_bytes();
		let signature = self.mac(payload)?.finalize().into_bytes();
		Ok(format!(
			"{}:{}",
			URL_SAFE_NO_PAD.encode(payload),
			URL_SAFE_NO_PAD.encode(signature)
		))
	}

	/// Verify a field id and return the uuid it carries.
	pub fn unsign(&self, field_id: &str) -> Select2Result<Uuid> {
		let (payload, signature) = field_id
			.split_once(':')
			.ok_or(Select2Error::BadSignature)?;
		let payload = URL_SAFE_NO_PAD
			.decode(payload)
			.map_err(|_| Select2Error::BadSignature)?;
		let signature = URL_SAFE_NO_PAD
			.decode(signature)
			.map_err(|_| Select2Error::BadSignature)?;

		self.mac(&payload)?
			.verify_slice(&signature)
			.map_err(|_| Select2Error::BadSignature)?;

		Uuid::from_slice(&payload).map_err(|_| Select2Error::BadSignature)
	}
}
