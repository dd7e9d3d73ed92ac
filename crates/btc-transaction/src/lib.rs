//! Bitcoin transaction codec, signature hashing and signing.
//!
//! Provides the `Transaction` type with its inputs and outputs, a
//! structural slicer over the wire format, the legacy and BIP-143 sighash
//! algorithms, and a deterministic low-R signer for P2PKH and P2WPKH
//! inputs.

pub mod input;
pub mod outpoint;
pub mod output;
pub mod sighash;
pub mod signer;
pub mod slice;
pub mod template;
pub mod transaction;

mod error;
pub use error::{HasherError, SignError, TransactionError};
pub use input::TransactionInput;
pub use outpoint::Outpoint;
pub use output::TransactionOutput;
pub use sighash::{compute_sighash, Configuration, HasherKey, SigHashType, SigVersion};
pub use signer::sign;
pub use slice::TxLayout;
pub use transaction::Transaction;
