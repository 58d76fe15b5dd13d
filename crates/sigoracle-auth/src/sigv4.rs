//! AWS Signature Version 4 key derivation and signing.
//!
//! The signing flow is two steps:
//!
//! 1. [`derive_signing_key`] chains HMAC-SHA256 over the secret and the credential
//!    scope components to produce a 32-byte [`DerivedKey`].
//! 2. [`sign`] computes HMAC-SHA256 of the caller's string to sign under that key
//!    and returns the lowercase hex [`Signature`].
//!
//! Every intermediate key is the raw 32-byte digest of the previous step. Hex
//! encoding an intermediate value does not fail, it just yields a wrong signature.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::SignError;
use crate::scope::{REQUEST_TYPE_SUFFIX, SigningScope};
use crate::secret::SigningSecret;

/// The only algorithm supported by this implementation.
pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";

type HmacSha256 = Hmac<Sha256>;

/// A per-request signing key derived from the secret and a credential scope.
///
/// Never cached or persisted; its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    /// The raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// A lowercase hex-encoded HMAC-SHA256 signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// The hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the signature, returning the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

/// Derive the SigV4 signing key using the HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// The scope was validated when it was built, so derivation itself cannot fail.
///
/// # Examples
///
/// ```
/// use sigoracle_auth::scope::SigningScope;
/// use sigoracle_auth::secret::SigningSecret;
/// use sigoracle_auth::sigv4::derive_signing_key;
///
/// let secret = SigningSecret::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY").unwrap();
/// let scope = SigningScope::new("20150830", "us-east-1", "iam").unwrap();
/// let key = derive_signing_key(&secret, &scope);
/// assert_eq!(
///     hex::encode(key.as_bytes()),
///     "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
/// );
/// ```
#[must_use]
pub fn derive_signing_key(secret: &SigningSecret, scope: &SigningScope) -> DerivedKey {
    let date_key = hmac_sha256(secret.date_key_material(), scope.date().as_bytes());
    let date_region_key = hmac_sha256(&date_key, scope.region().as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, scope.service().as_bytes());
    DerivedKey(hmac_sha256(
        &date_region_service_key,
        REQUEST_TYPE_SUFFIX.as_bytes(),
    ))
}

/// Compute the HMAC-SHA256 signature of `string_to_sign` under `key`.
///
/// The input is signed byte for byte; it does not have to be UTF-8.
/// Returns the lowercase hex encoding of the 32-byte digest.
#[must_use]
pub fn sign(key: &DerivedKey, string_to_sign: impl AsRef<[u8]>) -> Signature {
    Signature(hex::encode(hmac_sha256(&key.0, string_to_sign.as_ref())))
}

/// Validate the scope fields, derive the signing key and sign in one call.
///
/// # Errors
///
/// Returns [`SignError::InvalidScope`] when `date` is not a `YYYYMMDD` date or
/// `region`/`service` is empty. No key is derived in that case.
///
/// # Examples
///
/// ```
/// use sigoracle_auth::secret::SigningSecret;
/// use sigoracle_auth::sigv4::sign_string_to_sign;
///
/// let secret = SigningSecret::new("secret").unwrap();
/// assert!(sign_string_to_sign(&secret, "20240101", "us-east-1", "s3", "x").is_ok());
/// assert!(sign_string_to_sign(&secret, "2024-01-01", "us-east-1", "s3", "x").is_err());
/// ```
pub fn sign_string_to_sign(
    secret: &SigningSecret,
    date: &str,
    region: &str,
    service: &str,
    string_to_sign: impl AsRef<[u8]>,
) -> Result<Signature, SignError> {
    let scope = SigningScope::new(date, region, service)?;
    Ok(sign(&derive_signing_key(secret, &scope), string_to_sign))
}

/// Build the SigV4 string to sign.
///
/// Callers of the oracle construct this themselves; it is provided here for
/// clients and tests that need the canonical layout.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <ISO8601 timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
///
/// # Examples
///
/// ```
/// use sigoracle_auth::sigv4::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "20130524T000000Z",
///     "20130524/us-east-1/s3/aws4_request",
///     "7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20130524T000000Z\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{SIGNING_ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Compute the SHA-256 hash of the given payload and return it as a hex string.
///
/// # Examples
///
/// ```
/// use sigoracle_auth::sigv4::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Compute HMAC-SHA256 and return the raw digest.
fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);

    let mut out = [0_u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}
