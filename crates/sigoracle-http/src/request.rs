//! Parsing and validation of signing requests.
//!
//! The endpoint takes its inputs as query parameters:
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `date` | `YYYYMMDD` UTC date of the credential scope |
//! | `region` | region of the credential scope |
//! | `service` | service of the credential scope |
//! | `scope` | full credential scope string, kept for diagnostics |
//! | `tosign` | the exact string to sign |
//!
//! Values are decoded to raw bytes (`+` as space, then percent-decoding) so
//! `tosign` is signed exactly as sent, even when it is not UTF-8. The scope
//! fields must be UTF-8.
//!
//! Validation happens in three passes: presence, size caps, then scope
//! validity. A request that fails a pass never reaches the next one, so a bad
//! date never triggers key derivation.

use percent_encoding::percent_decode;
use sigoracle_auth::SigningScope;
use tracing::warn;

use crate::error::OracleHttpError;

/// Query parameter names, in the order they are reported when missing.
pub const REQUIRED_PARAMS: [&str; 5] = ["date", "region", "service", "scope", "tosign"];

/// Upper bounds applied to request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    /// Maximum size of `tosign` in bytes.
    pub max_string_to_sign_size: usize,
    /// Maximum size of `region`, `service`, and `scope` in bytes.
    pub max_scope_field_length: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_string_to_sign_size: 65_536,
            max_scope_field_length: 256,
        }
    }
}

/// A fully validated signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    /// The validated credential scope.
    pub scope: SigningScope,
    /// The `scope` parameter as sent by the caller.
    pub credential_scope: String,
    /// Whether `credential_scope` agrees with the explicit scope fields.
    pub scope_matches: bool,
    /// The exact bytes to sign.
    pub string_to_sign: Vec<u8>,
}

#[derive(Debug, Default)]
struct RawParams {
    date: Option<Vec<u8>>,
    region: Option<Vec<u8>>,
    service: Option<Vec<u8>>,
    scope: Option<Vec<u8>>,
    tosign: Option<Vec<u8>>,
}

impl RawParams {
    fn from_query(query: &str) -> Self {
        let mut params = Self::default();

        for pair in query.as_bytes().split(|&b| b == b'&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };

            let slot = match decode_component(name).as_slice() {
                b"date" => &mut params.date,
                b"region" => &mut params.region,
                b"service" => &mut params.service,
                b"scope" => &mut params.scope,
                b"tosign" => &mut params.tosign,
                _ => continue,
            };
            // First occurrence wins; empty values count as absent.
            if slot.is_none() && !value.is_empty() {
                *slot = Some(decode_component(value));
            }
        }

        params
    }

    /// Unwrap all five parameters, or name every one that is missing.
    fn into_complete(self) -> Result<[Vec<u8>; 5], OracleHttpError> {
        let fields = [self.date, self.region, self.service, self.scope, self.tosign];
        let missing: Vec<&str> = REQUIRED_PARAMS
            .iter()
            .zip(&fields)
            .filter_map(|(name, value)| value.is_none().then_some(*name))
            .collect();

        if !missing.is_empty() {
            return Err(OracleHttpError::missing_parameters(&missing));
        }
        Ok(fields.map(Option::unwrap_or_default))
    }
}

/// Decode one `application/x-www-form-urlencoded` component to raw bytes.
fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

fn into_text(name: &str, value: Vec<u8>) -> Result<String, OracleHttpError> {
    String::from_utf8(value).map_err(|_| OracleHttpError::invalid_utf8(name))
}

impl SignRequest {
    /// Parse and validate a signing request from the raw query string.
    ///
    /// # Errors
    ///
    /// - `MissingParameter` when any of [`REQUIRED_PARAMS`] is absent or empty.
    /// - `ParameterTooLarge` when a parameter exceeds `limits`.
    /// - `InvalidParameter` when `date`, `region`, `service` or `scope` is not UTF-8.
    /// - `InvalidScope` when the date is not a valid `YYYYMMDD` date.
    pub fn from_query(query: Option<&str>, limits: &RequestLimits) -> Result<Self, OracleHttpError> {
        let [date, region, service, scope, tosign] =
            RawParams::from_query(query.unwrap_or_default()).into_complete()?;

        if tosign.len() > limits.max_string_to_sign_size {
            return Err(OracleHttpError::parameter_too_large(
                "tosign",
                limits.max_string_to_sign_size,
            ));
        }
        for (name, value) in [("region", &region), ("service", &service), ("scope", &scope)] {
            if value.len() > limits.max_scope_field_length {
                return Err(OracleHttpError::parameter_too_large(
                    name,
                    limits.max_scope_field_length,
                ));
            }
        }

        let signing_scope = SigningScope::new(
            into_text("date", date)?,
            into_text("region", region)?,
            into_text("service", service)?,
        )?;
        let credential_scope = into_text("scope", scope)?;
        let scope_matches = check_scope_consistency(&signing_scope, &credential_scope);

        Ok(Self {
            scope: signing_scope,
            credential_scope,
            scope_matches,
            string_to_sign: tosign,
        })
    }
}

/// Warn when the diagnostic `scope` parameter disagrees with the explicit fields.
///
/// The explicit fields are authoritative; a mismatch does not fail the request.
fn check_scope_consistency(scope: &SigningScope, credential_scope: &str) -> bool {
    match SigningScope::parse_credential_scope(credential_scope) {
        Ok(parsed) if parsed == *scope => true,
        Ok(parsed) => {
            warn!(
                expected = %scope,
                provided = %parsed,
                "credential scope parameter does not match explicit scope fields"
            );
            false
        }
        Err(err) => {
            warn!(error = %err, "credential scope parameter is malformed");
            false
        }
    }
}
