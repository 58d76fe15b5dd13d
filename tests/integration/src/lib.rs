//! Integration tests for the sigoracle server.
//!
//! These tests require a running server at `localhost:8080` started with
//! `SIGNING_SECRET` set to the AWS documentation example key. They are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! SIGNING_SECRET=wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY cargo run -p sigoracle-server &
//! cargo test -p sigoracle-integration -- --ignored
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// The secret the server under test is expected to hold.
pub const EXAMPLE_SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the server under test.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("SIGORACLE_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Create an HTTP client for the server under test.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Build a signing URL from explicit parameters; `None` values are omitted.
#[must_use]
pub fn sign_url(params: &[(&str, Option<&str>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        if let Some(value) = value {
            query.append_pair(name, value);
        }
    }
    format!("{}/sign_auth?{}", endpoint_url(), query.finish())
}

/// The signature the server should return for these inputs.
#[must_use]
pub fn expected_signature(date: &str, region: &str, service: &str, tosign: &str) -> String {
    let secret = sigoracle_auth::SigningSecret::new(EXAMPLE_SECRET_KEY).expect("valid secret");
    let scope = sigoracle_auth::SigningScope::new(date, region, service).expect("valid scope");
    sigoracle_auth::sign(&sigoracle_auth::derive_signing_key(&secret, &scope), tosign).into_string()
}

mod test_cors;
mod test_error;
mod test_sign;
