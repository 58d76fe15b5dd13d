//! Response construction: signatures, JSON errors, CORS, and health.

use sigoracle_auth::Signature;

use crate::body::OracleResponseBody;
use crate::error::OracleHttpError;

/// Content type of a successful signing response.
pub const SIGNATURE_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of JSON error and health responses.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers a browser may send with a cross-origin signing request.
const CORS_ALLOW_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, \
     Authorization, accept, origin, Cache-Control, X-Requested-With";

/// Methods advertised to CORS preflight.
const CORS_ALLOW_METHODS: &str = "POST, OPTIONS, GET, PUT, DELETE";

/// Serialize an error into `{"error": <message>}`.
///
/// ```
/// use sigoracle_http::error::OracleHttpError;
/// use sigoracle_http::response::error_to_json;
///
/// let json = error_to_json(&OracleHttpError::missing_parameters(&["region"]));
/// assert_eq!(json, br#"{"error":"missing required parameters: region"}"#);
/// ```
#[must_use]
pub fn error_to_json(error: &OracleHttpError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "error": error.message }))
        .expect("JSON serialization of error cannot fail")
}

/// Convert an [`OracleHttpError`] into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &OracleHttpError) -> http::Response<OracleResponseBody> {
    http::Response::builder()
        .status(error.status_code)
        .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(OracleResponseBody::from_json(error_to_json(error)))
        .expect("valid error response")
}

/// Build the 200 response carrying the hex signature as its body.
#[must_use]
pub fn signature_response(signature: Signature) -> http::Response<OracleResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, SIGNATURE_CONTENT_TYPE)
        .body(OracleResponseBody::from_string(signature.into_string()))
        .expect("valid signature response")
}

/// Produce a CORS preflight response: 204 with no body.
#[must_use]
pub fn cors_preflight_response() -> http::Response<OracleResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::NO_CONTENT)
        .body(OracleResponseBody::empty())
        .expect("static CORS response should be valid")
}

/// Produce a health check response.
#[must_use]
pub fn health_check_response() -> http::Response<OracleResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(OracleResponseBody::from_string(
            r#"{"status":"running","service":"sign"}"#,
        ))
        .expect("static health response should be valid")
}

/// Add the headers every response carries: CORS and the request id.
#[must_use]
pub fn add_common_headers(
    mut response: http::Response<OracleResponseBody>,
    request_id: &str,
) -> http::Response<OracleResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }

    headers.insert(
        http::header::SERVER,
        http::HeaderValue::from_static("sigoracle"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        http::HeaderValue::from_static("*"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        http::HeaderValue::from_static("true"),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_HEADERS,
        http::HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_METHODS,
        http::HeaderValue::from_static(CORS_ALLOW_METHODS),
    );

    response
}
