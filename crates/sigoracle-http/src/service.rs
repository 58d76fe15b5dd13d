//! The signing HTTP service implementing hyper's `Service` trait.
//!
//! [`OracleHttpService`] handles:
//!
//! 1. CORS preflight requests (`OPTIONS`, answered 204)
//! 2. Health check interception (`GET /health`, `GET /_health`)
//! 3. The signing endpoint (`GET <sign_path>`)
//! 4. Common response headers (CORS, `x-request-id`, `Server`)
//! 5. Error response formatting
//!
//! The request body is never read; every input arrives in the query string.
//! All per-request values live on the stack of [`handle_request`]; the only
//! state shared between requests is the immutable signer and config.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hyper::service::Service;
use sigoracle_auth::Signer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::body::OracleResponseBody;
use crate::error::OracleHttpError;
use crate::request::{RequestLimits, SignRequest};
use crate::response::{
    add_common_headers, cors_preflight_response, error_to_response, health_check_response,
    signature_response,
};

/// Configuration for the signing HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignHttpConfig {
    /// Path of the signing endpoint (e.g. `/sign_auth`).
    pub sign_path: String,
    /// Size caps applied to request parameters.
    pub limits: RequestLimits,
}

impl Default for SignHttpConfig {
    fn default() -> Self {
        Self {
            sign_path: "/sign_auth".to_owned(),
            limits: RequestLimits::default(),
        }
    }
}

/// The signing HTTP service.
///
/// # Type Parameters
///
/// - `S`: The [`Signer`] that turns a scope and string to sign into a signature.
#[derive(Debug)]
pub struct OracleHttpService<S: Signer> {
    signer: Arc<S>,
    config: Arc<SignHttpConfig>,
}

impl<S: Signer> OracleHttpService<S> {
    /// Create a new service with the given signer and configuration.
    #[must_use]
    pub fn new(signer: S, config: SignHttpConfig) -> Self {
        Self {
            signer: Arc::new(signer),
            config: Arc::new(config),
        }
    }

    /// Create a new service from an `Arc<S>` signer and configuration.
    #[must_use]
    pub fn from_shared(signer: Arc<S>, config: SignHttpConfig) -> Self {
        Self {
            signer,
            config: Arc::new(config),
        }
    }
}

impl<S: Signer> Clone for OracleHttpService<S> {
    fn clone(&self) -> Self {
        Self {
            signer: Arc::clone(&self.signer),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Signer, B: Send + 'static> Service<http::Request<B>> for OracleHttpService<S> {
    type Response = http::Response<OracleResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let signer = Arc::clone(&self.signer);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let (parts, _body) = req.into_parts();

            let response = handle_request(&parts, signer.as_ref(), &config, &request_id);
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Route and process a single request.
///
/// Signing is CPU-bound and short, so this runs synchronously inside the
/// connection task.
pub fn handle_request<S: Signer + ?Sized>(
    parts: &http::request::Parts,
    signer: &S,
    config: &SignHttpConfig,
    request_id: &str,
) -> http::Response<OracleResponseBody> {
    let method = &parts.method;
    let path = parts.uri.path();
    debug!(%method, path, request_id, "processing request");

    if *method == http::Method::OPTIONS {
        return cors_preflight_response();
    }

    if *method == http::Method::GET && is_health_check(path) {
        return health_check_response();
    }

    if path != config.sign_path {
        return error_to_response(&OracleHttpError::not_found(path));
    }
    if *method != http::Method::GET {
        return error_to_response(&OracleHttpError::method_not_allowed(method));
    }

    match sign_request(parts.uri.query(), signer, &config.limits, request_id) {
        Ok(response) => response,
        Err(err) => {
            warn!(code = %err.code, error = %err.message, request_id, "rejected signing request");
            error_to_response(&err)
        }
    }
}

/// Validate the query and sign it.
fn sign_request<S: Signer + ?Sized>(
    query: Option<&str>,
    signer: &S,
    limits: &RequestLimits,
    request_id: &str,
) -> Result<http::Response<OracleResponseBody>, OracleHttpError> {
    let request = SignRequest::from_query(query, limits)?;

    info!(
        date = request.scope.date(),
        region = request.scope.region(),
        service = request.scope.service(),
        credential_scope = %request.credential_scope,
        scope_matches = request.scope_matches,
        string_to_sign_len = request.string_to_sign.len(),
        request_id,
        "signing request"
    );

    let signature = signer.sign(&request.scope, &request.string_to_sign)?;
    Ok(signature_response(signature))
}

/// Check if the path is a health check probe.
fn is_health_check(path: &str) -> bool {
    path == "/health" || path == "/_health"
}
