//! BIP-174 partially signed Bitcoin transactions.
//!
//! Decodes and re-encodes the PSBT envelope, computes the fee it pays and
//! signs its P2PKH and P2WPKH inputs.

pub mod constants;
pub mod fee;
pub mod field;
pub mod input;
pub mod output;
pub mod psbt;
pub mod signer;

mod error;
pub use error::{FeeError, PsbtError};
pub use field::PsbtField;
pub use input::{PsbtInput, PsbtUtxo};
pub use output::PsbtOutput;
pub use psbt::Psbt;
pub use signer::{sign, sign_transaction};
