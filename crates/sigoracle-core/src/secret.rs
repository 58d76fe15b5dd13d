//! Startup loading of the long-term signing secret.

use sigoracle_auth::SigningSecret;
use tracing::info;

use crate::error::{OracleError, OracleResult};

/// Environment variables consulted for the secret, in priority order.
pub const SECRET_ENV_VARS: [&str; 3] = ["SIGNING_SECRET", "AWS_SECRET", "AWS_SECRET_ACCESS_KEY"];

/// Load the signing secret through a variable lookup.
///
/// The first variable in [`SECRET_ENV_VARS`] with a non-empty value wins;
/// empty values are skipped.
///
/// # Errors
///
/// Returns [`OracleError::MissingSecret`] when no variable holds a non-empty
/// value.
pub fn load_secret(lookup: impl Fn(&str) -> Option<String>) -> OracleResult<SigningSecret> {
    for var in SECRET_ENV_VARS {
        let Some(value) = lookup(var).filter(|v| !v.is_empty()) else {
            continue;
        };

        info!(source = var, "loaded signing secret");
        return SigningSecret::new(value).map_err(|e| OracleError::Config(e.to_string()));
    }

    Err(OracleError::MissingSecret(SECRET_ENV_VARS.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_fail_when_no_secret_is_set() {
        let result = load_secret(|_| None);
        assert!(matches!(result, Err(OracleError::MissingSecret(_))));
    }

    #[test]
    fn test_should_fail_when_secret_is_empty() {
        let result = load_secret(|_| Some(String::new()));
        assert!(matches!(result, Err(OracleError::MissingSecret(_))));
    }

    #[test]
    fn test_should_prefer_signing_secret_over_fallbacks() {
        let secret = load_secret(|key| match key {
            "SIGNING_SECRET" => Some("primary".to_owned()),
            "AWS_SECRET" => Some("fallback".to_owned()),
            _ => None,
        })
        .unwrap();

        let expected = SigningSecret::new("primary").unwrap();
        let scope = sigoracle_auth::SigningScope::new("20240101", "us-east-1", "s3").unwrap();
        assert_eq!(
            sigoracle_auth::derive_signing_key(&secret, &scope),
            sigoracle_auth::derive_signing_key(&expected, &scope)
        );
    }

    #[test]
    fn test_should_skip_empty_primary_and_use_fallback() {
        let result = load_secret(|key| match key {
            "SIGNING_SECRET" => Some(String::new()),
            "AWS_SECRET_ACCESS_KEY" => Some("fallback".to_owned()),
            _ => None,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_should_name_all_variables_in_error() {
        let err = load_secret(|_| None).unwrap_err();
        let message = err.to_string();
        for var in SECRET_ENV_VARS {
            assert!(message.contains(var));
        }
    }
}
