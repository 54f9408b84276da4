//! Transaction signing.
//!
//! Signing is a separate step from construction: key material may live
//! behind a wallet or remote signer that only sees the finished
//! transaction. Each input gets its own recoverable signature, but every
//! signature covers the same digest, the inner hash over the whole
//! input/output set. Mutating anything after signing therefore
//! invalidates every signature at once.
//!
//! All failure modes in this module are caller-contract violations and
//! panic. A builder that double-signs or supplies the wrong number of
//! keys is broken code, not recoverable input.

use super::builder::Transaction;
use crate::crypto::hash::Hash256;
use crate::crypto::keys::{VelaKeypair, VelaSignature};

/// Signs every input of `tx`, filling the header's signature vector so
/// that `sigs[i]` authorizes `inputs[i]` with `keys[i]`.
///
/// The transaction's inputs and outputs must be final; the signatures
/// bind the inner hash over both.
///
/// # Panics
///
/// Panics if the transaction is already signed, or if the key count
/// does not match the input count.
pub fn sign_inputs(tx: &mut Transaction, keys: &[VelaKeypair]) {
    assert!(
        tx.head.sigs.is_empty(),
        "transaction has already been signed"
    );
    assert!(
        keys.len() == tx.inputs.len(),
        "got {} signing keys for {} inputs",
        keys.len(),
        tx.inputs.len()
    );

    tx.head.sigs = vec![VelaSignature::zeroed(); tx.inputs.len()];
    let digest = tx.inner_hash();
    for (index, key) in keys.iter().enumerate() {
        sign_input(tx, index as u16, key, &digest);
    }
}

/// Writes the signature for a single input slot.
///
/// # Panics
///
/// Panics if `index` is not a valid input index.
fn sign_input(tx: &mut Transaction, index: u16, key: &VelaKeypair, digest: &Hash256) {
    assert!(
        (index as usize) < tx.inputs.len(),
        "signature index {} out of range for {} inputs",
        index,
        tx.inputs.len()
    );
    if tx.head.sigs.len() <= index as usize {
        tx.head.sigs
            .resize(index as usize + 1, VelaSignature::zeroed());
    }
    tx.head.sigs[index as usize] = key.sign_hash(digest);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
