//! Bitcoin script parsing, building and standard-type classification.
//!
//! Provides the `Script` byte newtype, opcode definitions, chunk decoding
//! and the `ScriptType` classifier used to pick a signature-hash algorithm.

pub mod chunk;
pub mod opcodes;
pub mod script;
pub mod script_type;

mod error;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
pub use script_type::{classify, ScriptType};
