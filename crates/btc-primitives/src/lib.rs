//! Bitcoin primitives: hashing, secp256k1 keys and signatures, and the
//! low-level wire format shared by every other crate in the workspace.
//!
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - `Txid`, displayed byte-reversed relative to the wire
//! - Private/public keys, WIF, DER signatures with low-R/low-S helpers
//! - `VarInt`, `WireReader`, `WireWriter` and the `WireCodec` trait

pub mod hash;
pub mod txid;
pub mod util;
pub mod wire;
pub mod ec;

mod error;
pub use error::{CodecError, PrimitivesError};
pub use txid::Txid;
pub use wire::{Span, WireCodec};
