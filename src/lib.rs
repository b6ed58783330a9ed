//! # serpentseal
//!
//! Hybrid file encryption: an RSA key pair seals a freshly drawn 256-bit
//! session key, a bitsliced Serpent cipher encrypts the file body in
//! 16-byte blocks, and SHA-256 digests the content so both sides can
//! compare.
//!
//! This is a study cipher, not a production cryptosystem: blocks are
//! encrypted independently (no IV, no chaining), RSA is textbook (safe only
//! for sealing uniformly random integers), and nothing here is constant
//! time.

pub mod bigint;
pub mod error;
pub mod hybrid;
pub mod rsa;
pub mod serpent;
pub mod sha256;

pub use error::{Error, Result};
pub use hybrid::Envelope;
pub use rsa::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use serpent::Serpent;
