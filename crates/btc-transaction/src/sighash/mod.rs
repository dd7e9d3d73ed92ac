//! Signature hash computation for transaction signing.
//!
//! A hasher is built per signing call from the resolved
//! [`Configuration`], fed [`HasherKey`]s and finalized once. The legacy
//! and BIP-143 algorithms are variants of the closed [`Hasher`] enum;
//! Taproot configurations are recognised but rejected.

pub mod base;
pub mod config;
pub mod key;
pub mod witness_v0;

use std::fmt;

use tracing::debug;

pub use base::BaseHasher;
pub use config::{Configuration, SigVersion};
pub use key::{HasherKey, HasherKeyId};
pub use witness_v0::WitnessV0Hasher;

use crate::HasherError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input, allowing other
/// inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

/// Legacy digest returned, unhashed, for SIGHASH_SINGLE when the input has
/// no output at the same index.
pub const SIGHASH_SINGLE_OUT_OF_RANGE: [u8; 32] = {
    let mut digest = [0u8; 32];
    digest[31] = 0x01;
    digest
};

/// A sighash type as carried in signatures and PSBT input maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigHashType(pub u32);

impl SigHashType {
    pub const ALL: SigHashType = SigHashType(SIGHASH_ALL);
    pub const NONE: SigHashType = SigHashType(SIGHASH_NONE);
    pub const SINGLE: SigHashType = SigHashType(SIGHASH_SINGLE);
    pub const ALL_ANYONECANPAY: SigHashType = SigHashType(SIGHASH_ALL | SIGHASH_ANYONECANPAY);
    pub const NONE_ANYONECANPAY: SigHashType = SigHashType(SIGHASH_NONE | SIGHASH_ANYONECANPAY);
    pub const SINGLE_ANYONECANPAY: SigHashType =
        SigHashType(SIGHASH_SINGLE | SIGHASH_ANYONECANPAY);

    /// The base type with the ANYONECANPAY flag masked off.
    pub fn base_type(&self) -> u32 {
        self.0 & SIGHASH_MASK
    }

    pub fn anyone_can_pay(&self) -> bool {
        self.0 & SIGHASH_ANYONECANPAY != 0
    }

    pub fn is_none(&self) -> bool {
        self.base_type() == SIGHASH_NONE
    }

    pub fn is_single(&self) -> bool {
        self.base_type() == SIGHASH_SINGLE
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }

    /// The trailing byte appended to a DER signature.
    pub fn as_byte(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl Default for SigHashType {
    fn default() -> Self {
        SigHashType::ALL
    }
}

impl From<u32> for SigHashType {
    fn from(value: u32) -> Self {
        SigHashType(value)
    }
}

impl fmt::Display for SigHashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base_type() {
            SIGHASH_NONE => "NONE",
            SIGHASH_SINGLE => "SINGLE",
            _ => "ALL",
        };
        if self.anyone_can_pay() {
            write!(f, "{}|ANYONECANPAY", base)
        } else {
            f.write_str(base)
        }
    }
}

// -----------------------------------------------------------------------
// Hasher dispatch
// -----------------------------------------------------------------------

/// A digest algorithm being fed its inputs.
#[derive(Debug, Clone)]
pub enum Hasher<'a> {
    Base(BaseHasher<'a>),
    WitnessV0(WitnessV0Hasher<'a>),
}

impl<'a> Hasher<'a> {
    /// Select the hasher for a configuration.
    ///
    /// # Returns
    /// An empty hasher, or `NotSupported` for Taproot and Tapscript.
    pub fn for_config(config: &Configuration) -> Result<Self, HasherError> {
        match config.sig_version {
            SigVersion::Base => Ok(Hasher::Base(BaseHasher::new())),
            SigVersion::WitnessV0 => Ok(Hasher::WitnessV0(WitnessV0Hasher::new())),
            SigVersion::Taproot | SigVersion::Tapscript => Err(HasherError::NotSupported(
                format!("{:?} signature hashing", config.sig_version),
            )),
        }
    }

    /// Store `key`; a later key with the same id replaces the earlier one.
    pub fn combine(&mut self, key: HasherKey<'a>) -> &mut Self {
        match self {
            Hasher::Base(h) => h.combine(key),
            Hasher::WitnessV0(h) => h.combine(key),
        }
        self
    }

    /// Check that every required key is present and compute the digest.
    pub fn finalize(&self) -> Result<[u8; 32], HasherError> {
        match self {
            Hasher::Base(h) => h.finalize(),
            Hasher::WitnessV0(h) => h.finalize(),
        }
    }
}

/// Compute a sighash in one call.
///
/// # Arguments
/// * `config` - The resolved configuration for the spent output.
/// * `keys` - Context values; later keys override earlier ones.
///
/// # Returns
/// The 32-byte digest to sign.
pub fn compute_sighash<'a>(
    config: &Configuration,
    keys: impl IntoIterator<Item = HasherKey<'a>>,
) -> Result<[u8; 32], HasherError> {
    let mut hasher = Hasher::for_config(config)?;
    for key in keys {
        if let HasherKey::SigHash(sighash) = key {
            debug!(sig_version = ?config.sig_version, sighash = %sighash, "sighash type set");
        }
        hasher.combine(key);
    }
    hasher.finalize()
}
