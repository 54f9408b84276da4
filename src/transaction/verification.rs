//! Transaction well-formedness verification.
//!
//! Every transaction entering a pool or a block passes
//! [`verify_transaction`] first. The checks run strictly in order and
//! stop at the first failure: structural checks before hashing, the
//! size cap before the uniqueness scans, signature recovery before the
//! amount rules. Every rejection has a dedicated error variant with a
//! unique shortest witness, which is what keeps this function testable.
//!
//! What is deliberately NOT checked here: whether the referenced
//! unspent outputs exist, whether each recovered key matches the
//! address locking its output, and whether coins and hours are
//! conserved. All of that needs the UTXO set and belongs to its
//! validator.

use std::collections::HashSet;

use thiserror::Error;

use super::builder::Transaction;
use super::types::UxBody;
use crate::config::{COIN_GRANULARITY, MAX_TRANSACTION_INPUTS};
use crate::crypto::keys::verify_signed_hash;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a transaction fails the well-formedness check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The header's inner hash does not match the inputs and outputs.
    #[error("header hash does not match the hash of inputs and outputs")]
    InvalidHeaderHash,

    /// The transaction spends nothing.
    #[error("transaction has no inputs")]
    NoInputs,

    /// The transaction creates nothing.
    #[error("transaction has no outputs")]
    NoOutputs,

    /// Signature and input counts differ.
    #[error("signature count {sigs} does not match input count {inputs}")]
    InvalidSignatureCount {
        /// Number of signatures present.
        sigs: usize,
        /// Number of inputs present.
        inputs: usize,
    },

    /// More signatures than u16 indices can address.
    #[error("too many signatures and inputs")]
    TooManySignatures,

    /// Serialized size exceeds the caller's cap.
    #[error("transaction size {size} exceeds the {max_size}-byte cap")]
    TooLarge {
        /// Serialized size of the transaction.
        size: usize,
        /// The cap that was applied.
        max_size: usize,
    },

    /// The same unspent output is spent twice.
    #[error("duplicate spend of the same unspent output")]
    DuplicateSpend,

    /// Two outputs would become the same unspent output.
    #[error("duplicate output in transaction")]
    DuplicateOutput,

    /// A signature fails to recover or verify under the header hash.
    #[error("signature {index} is not a valid signature of the header hash")]
    InvalidSignature {
        /// Index of the offending signature.
        index: usize,
    },

    /// An output carries zero coins.
    #[error("zero coin output")]
    ZeroCoinOutput,

    /// An output's coins are not a whole-vela multiple.
    #[error("output coins must be a multiple of {COIN_GRANULARITY} drops")]
    InvalidCoinGranularity,
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks that `tx` is well formed, with `max_size` as the serialized
/// size cap (a consensus parameter owned by the caller).
///
/// The checks, in order:
///
/// 1. Header hash binds the current inputs and outputs.
/// 2. At least one input.
/// 3. At least one output.
/// 4. Exactly one signature per input.
/// 5. Fewer than 2^16 signatures.
/// 6. Serialized size within `max_size`.
/// 7. No input spent twice.
/// 8. No two outputs deriving the same unspent-output identity.
/// 9. Every signature recovers and verifies under the header hash.
/// 10. Every output's coins nonzero and a whole-vela multiple.
///
/// # Errors
///
/// Returns the first failing check's [`ValidationError`]; later checks
/// do not run.
pub fn verify_transaction(tx: &Transaction, max_size: usize) -> Result<(), ValidationError> {
    if tx.inner_hash() != tx.head.inner_hash {
        return Err(ValidationError::InvalidHeaderHash);
    }

    if tx.inputs.is_empty() {
        return Err(ValidationError::NoInputs);
    }
    if tx.outputs.is_empty() {
        return Err(ValidationError::NoOutputs);
    }

    if tx.head.sigs.len() != tx.inputs.len() {
        return Err(ValidationError::InvalidSignatureCount {
            sigs: tx.head.sigs.len(),
            inputs: tx.inputs.len(),
        });
    }
    if tx.head.sigs.len() > MAX_TRANSACTION_INPUTS {
        return Err(ValidationError::TooManySignatures);
    }

    let size = tx.size();
    if size > max_size {
        return Err(ValidationError::TooLarge { size, max_size });
    }

    let mut spent = HashSet::with_capacity(tx.inputs.len());
    for input in &tx.inputs {
        if !spent.insert(*input) {
            return Err(ValidationError::DuplicateSpend);
        }
    }

    // Identity of each prospective unspent output. All outputs share the
    // transaction id as their source, so identical triples collide.
    let src_transaction = tx.hash();
    let mut created = HashSet::with_capacity(tx.outputs.len());
    for output in &tx.outputs {
        if !created.insert(UxBody::new(src_transaction, output).hash()) {
            return Err(ValidationError::DuplicateOutput);
        }
    }

    for (index, sig) in tx.head.sigs.iter().enumerate() {
        verify_signed_hash(sig, &tx.head.inner_hash)
            .map_err(|_| ValidationError::InvalidSignature { index })?;
    }

    for output in &tx.outputs {
        if output.coins == 0 {
            return Err(ValidationError::ZeroCoinOutput);
        }
        if output.coins % COIN_GRANULARITY != 0 {
            return Err(ValidationError::InvalidCoinGranularity);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TRANSACTION_SIZE;
    use crate::crypto::address::Address;
    use crate::crypto::hash::{sha256, Hash256};
    use crate::crypto::keys::{VelaKeypair, VelaSignature};
    use crate::transaction::builder::TransactionHeader;
    use crate::transaction::signing::sign_inputs;

    fn destination() -> Address {
        Address::from_public_key(&VelaKeypair::generate().public_key())
    }

    /// One input, one whole-vela output, properly signed.
    fn valid_tx() -> Transaction {
        let keypair = VelaKeypair::generate();
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"an unspent output"));
        tx.push_output(destination(), 1_000_000, 0);
        tx.update_header();
        sign_inputs(&mut tx, &[keypair]);
        tx
    }

    /// Builds, signs, and returns a transaction over the given outputs.
    fn signed_tx_with_outputs(outputs: &[(u64, u64)]) -> Transaction {
        let keypair = VelaKeypair::generate();
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"an unspent output"));
        for &(coins, hours) in outputs {
            tx.push_output(destination(), coins, hours);
        }
        tx.update_header();
        sign_inputs(&mut tx, &[keypair]);
        tx
    }

    #[test]
    fn minimal_valid_transaction_passes() {
        assert_eq!(verify_transaction(&valid_tx(), MAX_TRANSACTION_SIZE), Ok(()));
    }

    #[test]
    fn tampered_output_fails_the_header_check_first() {
        // The signature is now stale too, but the header check runs
        // before signature recovery and must win.
        let mut tx = valid_tx();
        tx.outputs[0].coins ^= 1;
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::InvalidHeaderHash)
        );
    }

    #[test]
    fn stale_header_rejected() {
        let mut tx = valid_tx();
        tx.head.inner_hash = sha256(b"not the inner hash");
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::InvalidHeaderHash)
        );
    }

    #[test]
    fn no_inputs_rejected() {
        let mut tx = Transaction::new();
        tx.push_output(destination(), 1_000_000, 0);
        tx.update_header();
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::NoInputs)
        );
    }

    #[test]
    fn no_outputs_rejected() {
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"in"));
        tx.update_header();
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::NoOutputs)
        );
    }

    #[test]
    fn missing_signatures_rejected() {
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"in"));
        tx.push_output(destination(), 1_000_000, 0);
        tx.update_header();
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::InvalidSignatureCount { sigs: 0, inputs: 1 })
        );
    }

    #[test]
    fn signature_count_above_u16_range_rejected() {
        // Built in memory; the wire format could never carry this many
        // under the decode cap.
        let count = MAX_TRANSACTION_INPUTS + 1;
        let mut tx = Transaction {
            head: TransactionHeader {
                inner_hash: Hash256::default(),
                sigs: vec![VelaSignature::zeroed(); count],
            },
            inputs: (0..count as u32).map(|i| sha256(&i.to_le_bytes())).collect(),
            outputs: Vec::new(),
        };
        tx.push_output(destination(), 1_000_000, 0);
        tx.update_header();
        assert_eq!(
            verify_transaction(&tx, usize::MAX),
            Err(ValidationError::TooManySignatures)
        );
    }

    #[test]
    fn size_boundary_is_inclusive() {
        let tx = valid_tx();
        let size = tx.size();
        assert_eq!(verify_transaction(&tx, size), Ok(()));
        assert_eq!(
            verify_transaction(&tx, size - 1),
            Err(ValidationError::TooLarge {
                size,
                max_size: size - 1
            })
        );
    }

    #[test]
    fn duplicate_spend_rejected() {
        let keypair_a = VelaKeypair::generate();
        let keypair_b = VelaKeypair::generate();
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"same output"));
        tx.push_input(sha256(b"same output"));
        tx.push_output(destination(), 1_000_000, 0);
        tx.update_header();
        sign_inputs(&mut tx, &[keypair_a, keypair_b]);
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::DuplicateSpend)
        );
    }

    #[test]
    fn duplicate_output_rejected() {
        let keypair = VelaKeypair::generate();
        let shared = destination();
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"in"));
        tx.push_output(shared, 1_000_000, 5);
        tx.push_output(shared, 1_000_000, 5);
        tx.update_header();
        sign_inputs(&mut tx, &[keypair]);
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::DuplicateOutput)
        );
    }

    #[test]
    fn same_address_different_amounts_is_fine() {
        let keypair = VelaKeypair::generate();
        let shared = destination();
        let mut tx = Transaction::new();
        tx.push_input(sha256(b"in"));
        tx.push_output(shared, 1_000_000, 5);
        tx.push_output(shared, 2_000_000, 5);
        tx.update_header();
        sign_inputs(&mut tx, &[keypair]);
        assert_eq!(verify_transaction(&tx, MAX_TRANSACTION_SIZE), Ok(()));
    }

    #[test]
    fn unparseable_signature_rejected() {
        let mut tx = valid_tx();
        tx.head.sigs[0] = VelaSignature::zeroed();
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::InvalidSignature { index: 0 })
        );
    }

    #[test]
    fn zero_coin_output_rejected() {
        let tx = signed_tx_with_outputs(&[(1_000_000, 0), (0, 10)]);
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::ZeroCoinOutput)
        );
    }

    #[test]
    fn sub_granularity_output_rejected() {
        let tx = signed_tx_with_outputs(&[(1, 0)]);
        assert_eq!(
            verify_transaction(&tx, MAX_TRANSACTION_SIZE),
            Err(ValidationError::InvalidCoinGranularity)
        );
    }

    #[test]
    fn whole_vela_output_accepted() {
        let tx = signed_tx_with_outputs(&[(1_000_000, 0)]);
        assert_eq!(verify_transaction(&tx, MAX_TRANSACTION_SIZE), Ok(()));
    }

    #[test]
    fn hours_have_no_granularity_rule() {
        let tx = signed_tx_with_outputs(&[(1_000_000, 999_999)]);
        assert_eq!(verify_transaction(&tx, MAX_TRANSACTION_SIZE), Ok(()));
    }

    #[test]
    fn all_error_messages_render() {
        // Display derives stay wired to real context.
        let rendered = format!(
            "{}",
            ValidationError::TooLarge {
                size: 200,
                max_size: 100
            }
        );
        assert!(rendered.contains("200"));
        assert!(rendered.contains("100"));
    }
}
