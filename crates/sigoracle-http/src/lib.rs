//! HTTP layer for the sigoracle signing endpoint.
//!
//! - **Request parsing** ([`request`]): Extracts and validates the `date`,
//!   `region`, `service`, `scope`, and `tosign` query parameters.
//!
//! - **Response construction** ([`response`]): Signature bodies, `{"error": ...}`
//!   JSON errors, CORS headers, and the health payload.
//!
//! - **Errors** ([`error`]): [`OracleHttpError`](error::OracleHttpError) and its
//!   mapping to HTTP status codes.
//!
//! - **Service** ([`service`]): The [`OracleHttpService`](service::OracleHttpService)
//!   implementing hyper's `Service` trait.
//!
//! - **Body** ([`body`]): The [`OracleResponseBody`](body::OracleResponseBody) type.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> OracleHttpService (hyper Service)
//!     -> CORS preflight / health check interception
//!     -> Path and method check
//!     -> SignRequest::from_query (presence, size caps, scope validation)
//!     -> Signer::sign (derive key, HMAC the string to sign)
//!     -> Common response headers (CORS, x-request-id)
//!   <- HTTP Response
//! ```

pub mod body;
pub mod error;
pub mod request;
pub mod response;
pub mod service;

pub use service::{OracleHttpService, SignHttpConfig};
