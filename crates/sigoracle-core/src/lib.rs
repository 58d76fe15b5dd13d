//! Core infrastructure for the sigoracle signing service.
//!
//! Provides the environment-driven [`OracleConfig`](config::OracleConfig) and
//! the fail-fast loading of the long-term signing secret.

pub mod config;
pub mod error;
pub mod secret;

pub use config::OracleConfig;
pub use error::{OracleError, OracleResult};
pub use secret::load_secret;
