//! # BitID
//!
//! This crate implements the [BitID] authentication protocol: a service
//! challenges a user to prove ownership of a Bitcoin address by signing a
//! one-time challenge URI with the address's private key.
//!
//! A challenge URI copies the callback's authority and path under the
//! `bitid:` scheme and carries the server nonce in the `x` query parameter:
//!
//! ```text
//! bitid://localhost:3000/callback?x=fe32e61882a71074
//! ```
//!
//! ## Example
//! ```rust
//! use bitid::{BitidChallenge, ChallengeParams};
//!
//! // Server side: issue a fresh challenge.
//! let challenge = BitidChallenge::new(ChallengeParams {
//!     nonce: Some("fe32e61882a71074".to_string()),
//!     callback: "http://localhost:3000/callback".to_string(),
//!     ..Default::default()
//! });
//! let uri = challenge.uri().unwrap().to_string();
//!
//! // Later: validate the wallet's signed response.
//! let response = BitidChallenge::new(ChallengeParams {
//!     callback: "http://localhost:3000/callback".to_string(),
//!     uri: Some(uri),
//!     signature: Some("...".to_string()),
//!     address: Some("1HpE8571PFRwge5coHiFdSCLcwa7qetcn".to_string()),
//!     ..Default::default()
//! });
//! assert!(response.uri_valid());
//! assert!(!response.signature_valid()); // "..." is not a real signature
//! ```
//!
//! [BitID]: https://github.com/bitid/bitid

pub mod challenge;
pub mod protocol;
pub mod uri;
pub mod verification;

// Re-exports of key components
pub use challenge::{BitidChallenge, ChallengeParams};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
