//! Context values fed to a hasher.

use std::fmt;

use btc_script::Script;

use super::SigHashType;
use crate::transaction::Transaction;

/// One piece of signing context.
///
/// The last four variants are accepted by every hasher but only consumed
/// by the Taproot variants, which are not implemented yet.
#[derive(Debug, Clone, Copy)]
pub enum HasherKey<'a> {
    Transaction(&'a Transaction),
    InputIndex(usize),
    ScriptCode(&'a Script),
    Amount(u64),
    SigHash(SigHashType),
    TapScript(&'a Script),
    LeafVersion(u8),
    ControlBlock(&'a [u8]),
    Annex(&'a [u8]),
}

impl HasherKey<'_> {
    /// The slot this key fills.
    pub fn id(&self) -> HasherKeyId {
        match self {
            HasherKey::Transaction(_) => HasherKeyId::Transaction,
            HasherKey::InputIndex(_) => HasherKeyId::InputIndex,
            HasherKey::ScriptCode(_) => HasherKeyId::ScriptCode,
            HasherKey::Amount(_) => HasherKeyId::Amount,
            HasherKey::SigHash(_) => HasherKeyId::SigHash,
            HasherKey::TapScript(_) => HasherKeyId::TapScript,
            HasherKey::LeafVersion(_) => HasherKeyId::LeafVersion,
            HasherKey::ControlBlock(_) => HasherKeyId::ControlBlock,
            HasherKey::Annex(_) => HasherKeyId::Annex,
        }
    }
}

/// Identifies a [`HasherKey`] variant without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HasherKeyId {
    Transaction,
    InputIndex,
    ScriptCode,
    Amount,
    SigHash,
    TapScript,
    LeafVersion,
    ControlBlock,
    Annex,
}

impl HasherKeyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            HasherKeyId::Transaction => "transaction",
            HasherKeyId::InputIndex => "inputIndex",
            HasherKeyId::ScriptCode => "scriptCode",
            HasherKeyId::Amount => "amount",
            HasherKeyId::SigHash => "sigHash",
            HasherKeyId::TapScript => "tapScript",
            HasherKeyId::LeafVersion => "leafVersion",
            HasherKeyId::ControlBlock => "controlBlock",
            HasherKeyId::Annex => "annex",
        }
    }
}

impl fmt::Display for HasherKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
