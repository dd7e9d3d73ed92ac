#![deny(missing_docs)]

//! Bitcoin SDK - Complete SDK.
//!
//! Re-exports the wire codec, script, transaction and PSBT crates for
//! single-crate usage.

pub use btc_primitives as primitives;
pub use btc_psbt as psbt;
pub use btc_script as script;
pub use btc_transaction as transaction;
