//! Elliptic curve cryptography on secp256k1.
//!
//! Provides private keys (with WIF import/export), public keys and ECDSA
//! signatures with DER encoding and low-R/low-S helpers.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::{Network, PrivateKey};
pub use public_key::PublicKey;
pub use signature::Signature;
