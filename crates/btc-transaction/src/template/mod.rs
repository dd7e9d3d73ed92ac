//! Script templates for the spend paths the signer supports.
//!
//! Each template knows the locking script for a public key hash and how to
//! place a signature and public key into an input: in the scriptSig for
//! P2PKH, in the witness for P2WPKH.

pub mod p2pkh;
pub mod p2wpkh;
