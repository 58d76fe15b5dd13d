//! The [`Signer`] trait consumed by the HTTP layer, and its secret-backed implementation.

use std::sync::Arc;

use tracing::trace;

use crate::error::SignError;
use crate::scope::SigningScope;
use crate::secret::SigningSecret;
use crate::sigv4::{Signature, derive_signing_key, sign};

/// Produces SigV4 signatures for a scope and string to sign.
///
/// Implementations must be stateless per call: every value derived for one
/// request is passed by argument and returned by value, never stashed in
/// shared state.
pub trait Signer: Send + Sync + 'static {
    /// Sign the raw `string_to_sign` bytes with a key derived for `scope`.
    fn sign(&self, scope: &SigningScope, string_to_sign: &[u8]) -> Result<Signature, SignError>;
}

/// A [`Signer`] backed by a single long-term [`SigningSecret`].
///
/// The secret is shared read-only across all requests. Derived keys are
/// computed fresh on every call.
///
/// # Examples
///
/// ```
/// use sigoracle_auth::scope::SigningScope;
/// use sigoracle_auth::secret::SigningSecret;
/// use sigoracle_auth::signer::{SecretSigner, Signer};
///
/// let signer = SecretSigner::new(SigningSecret::new("secret").unwrap());
/// let scope = SigningScope::new("20240101", "us-east-1", "s3").unwrap();
/// let signature = signer.sign(&scope, b"string-to-sign").unwrap();
/// assert_eq!(signature.as_str().len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct SecretSigner {
    secret: Arc<SigningSecret>,
}

impl SecretSigner {
    /// Create a signer owning `secret`.
    #[must_use]
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    /// Create a signer sharing an already reference-counted secret.
    #[must_use]
    pub fn from_shared(secret: Arc<SigningSecret>) -> Self {
        Self { secret }
    }
}

impl Signer for SecretSigner {
    fn sign(&self, scope: &SigningScope, string_to_sign: &[u8]) -> Result<Signature, SignError> {
        trace!(
            scope = %scope,
            string_to_sign_len = string_to_sign.len(),
            "deriving signing key"
        );
        let key = derive_signing_key(&self.secret, scope);
        Ok(sign(&key, string_to_sign))
    }
}
