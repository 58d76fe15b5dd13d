//! The long-term signing secret.
//!
//! [`SigningSecret`] is deliberately opaque: it has no `Display`, its `Debug`
//! output is redacted, and the raw bytes are only reachable from inside this
//! crate, where they seed the first link of the key-derivation chain.

use std::fmt;

use crate::error::SignError;

/// Prefix prepended to the secret to form the first HMAC key.
const KEY_PREFIX: &[u8] = b"AWS4";

/// An opaque, read-only signing secret.
#[derive(Clone)]
pub struct SigningSecret {
    // "AWS4" + secret, precomputed once at startup.
    prefixed: Box<[u8]>,
}

impl SigningSecret {
    /// Wrap a secret string.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::EmptySecret`] if `secret` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigoracle_auth::secret::SigningSecret;
    ///
    /// let secret = SigningSecret::new("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY").unwrap();
    /// assert_eq!(format!("{secret:?}"), "SigningSecret(<redacted>)");
    /// assert!(SigningSecret::new("").is_err());
    /// ```
    pub fn new(secret: impl AsRef<str>) -> Result<Self, SignError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(SignError::EmptySecret);
        }

        let mut prefixed = Vec::with_capacity(KEY_PREFIX.len() + secret.len());
        prefixed.extend_from_slice(KEY_PREFIX);
        prefixed.extend_from_slice(secret.as_bytes());

        Ok(Self {
            prefixed: prefixed.into_boxed_slice(),
        })
    }

    /// The `"AWS4" + secret` key used for the date step.
    pub(crate) fn date_key_material(&self) -> &[u8] {
        &self.prefixed
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
