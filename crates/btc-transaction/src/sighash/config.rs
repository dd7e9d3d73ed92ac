//! Choosing the sighash algorithm for a spent output.

use btc_script::{Script, ScriptType};

use crate::HasherError;

/// Which digest algorithm signs an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigVersion {
    /// Pre-segwit legacy digest.
    Base,
    /// BIP-143 digest for version 0 witness programs.
    WitnessV0,
    /// BIP-341 key path. Not implemented.
    Taproot,
    /// BIP-342 script path. Not implemented.
    Tapscript,
}

/// The algorithm plus whether the spend path is a multisig script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub sig_version: SigVersion,
    pub multisig: bool,
}

impl Configuration {
    pub fn new(sig_version: SigVersion, multisig: bool) -> Self {
        Configuration {
            sig_version,
            multisig,
        }
    }

    /// Resolve the configuration for spending an output locked by `script`.
    ///
    /// P2SH outputs are resolved through `redeem_script` one level deep;
    /// P2WSH (native or nested) consults `witness_script` only to detect
    /// multisig.
    ///
    /// # Arguments
    /// * `script` - The locking script of the output being spent.
    /// * `witness_script` - The P2WSH witness script, if any.
    /// * `redeem_script` - The P2SH redeem script, if any.
    ///
    /// # Returns
    /// The configuration, or `HasherError::NotSupported` for script types
    /// that cannot be signed (nonstandard, null data, unknown witness
    /// versions, anchors and taproot).
    pub fn resolve(
        script: &Script,
        witness_script: Option<&Script>,
        redeem_script: Option<&Script>,
    ) -> Result<Self, HasherError> {
        let witness_multisig = is_multisig(witness_script);
        match script.script_type() {
            t if is_unsupported(t) => Err(unsupported(t)),
            ScriptType::WitnessV0KeyHash => Ok(Self::new(SigVersion::WitnessV0, false)),
            ScriptType::WitnessV0ScriptHash => {
                Ok(Self::new(SigVersion::WitnessV0, witness_multisig))
            }
            ScriptType::ScriptHash => match redeem_script.map(Script::script_type) {
                Some(ScriptType::Multisig) => Ok(Self::new(SigVersion::Base, true)),
                Some(ScriptType::WitnessV0KeyHash) => Ok(Self::new(SigVersion::WitnessV0, false)),
                Some(ScriptType::WitnessV0ScriptHash) => {
                    Ok(Self::new(SigVersion::WitnessV0, witness_multisig))
                }
                Some(t) if is_unsupported(t) => Err(unsupported(t)),
                _ => Ok(Self::new(SigVersion::Base, is_multisig(redeem_script))),
            },
            t => Ok(Self::new(SigVersion::Base, t == ScriptType::Multisig)),
        }
    }
}

fn is_multisig(script: Option<&Script>) -> bool {
    script.map_or(false, |s| s.script_type() == ScriptType::Multisig)
}

fn is_unsupported(t: ScriptType) -> bool {
    matches!(
        t,
        ScriptType::NonStandard
            | ScriptType::NullData
            | ScriptType::WitnessUnknown
            | ScriptType::Anchor
            | ScriptType::WitnessV1Taproot
    )
}

fn unsupported(t: ScriptType) -> HasherError {
    HasherError::NotSupported(format!("cannot sign {} outputs", t))
}
