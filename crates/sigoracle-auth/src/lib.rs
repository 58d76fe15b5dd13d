//! AWS Signature Version 4 signing for the sigoracle service.
//!
//! This crate holds the only part of the service with real semantics: deriving
//! a scoped signing key from a long-term secret and signing a caller-supplied
//! string to sign with it. The secret never leaves the process; callers only
//! ever see the final hex signature.
//!
//! # Usage
//!
//! ```rust
//! use sigoracle_auth::{SecretSigner, Signer, SigningScope, SigningSecret};
//!
//! let signer = SecretSigner::new(
//!     SigningSecret::new("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY").unwrap(),
//! );
//! let scope = SigningScope::new("20130524", "us-east-1", "s3").unwrap();
//! let signature = signer
//!     .sign(
//!         &scope,
//!         "AWS4-HMAC-SHA256\n20130524T000000Z\n20130524/us-east-1/s3/aws4_request\n\
//!          7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972"
//!             .as_bytes(),
//!     )
//!     .unwrap();
//! assert_eq!(
//!     signature.as_str(),
//!     "f0e8bdb87c964420e857bd35b5d6ed310bd44f0170aba48dd91039c6036bdb41"
//! );
//! ```
//!
//! # Modules
//!
//! - [`error`] - Signing error types
//! - [`scope`] - Validated credential scope
//! - [`secret`] - Opaque signing secret
//! - [`signer`] - The [`Signer`] trait and [`SecretSigner`]
//! - [`sigv4`] - Key derivation and the final HMAC

pub mod error;
pub mod scope;
pub mod secret;
pub mod signer;
pub mod sigv4;

pub use error::SignError;
pub use scope::SigningScope;
pub use secret::SigningSecret;
pub use signer::{SecretSigner, Signer};
pub use sigv4::{DerivedKey, Signature, derive_signing_key, sign, sign_string_to_sign};
