//! Fee-priority ordering for block candidates.
//!
//! Block builders hand a snapshot of candidate transactions and a fee
//! function to [`sort_transactions`], then cut the result down to the
//! block's byte budget with [`truncate_bytes_to`]. The ordering is part
//! of the block-builder contract: every node given the same snapshot and
//! fee function must produce the same sequence, so the sort key is a
//! total order, fee-per-kilobyte descending with the transaction id as
//! the ascending tie-break.
//!
//! The selector is a pure function over its arguments. Callers holding a
//! locked pool snapshot under the pool's lock, release it, then sort.

use tracing::debug;

use super::builder::Transaction;
use crate::config::FEE_PRIORITY_SCALE;
use crate::crypto::hash::Hash256;

/// A candidate with its precomputed sort key.
///
/// Size and id come from one serialization per transaction; the sort
/// never re-encodes.
struct RankedTransaction {
    tx: Transaction,
    priority: u64,
    hash: Hash256,
}

/// Orders transactions by fee per kilobyte, highest first, ties broken
/// by transaction id ascending.
///
/// `fee_calc` supplies each transaction's fee or an error; transactions
/// whose fee cannot be computed are excluded from the result. Priority
/// is `(fee * 1024) / size` with truncating integer division and
/// wrapping multiplication, matching every other node bit for bit.
pub fn sort_transactions<F, E>(txns: Vec<Transaction>, fee_calc: F) -> Vec<Transaction>
where
    F: Fn(&Transaction) -> Result<u64, E>,
{
    let mut ranked: Vec<RankedTransaction> = Vec::with_capacity(txns.len());
    for tx in txns {
        match fee_calc(&tx) {
            Ok(fee) => {
                let (size, hash) = tx.size_and_hash();
                let priority = fee.wrapping_mul(FEE_PRIORITY_SCALE) / size as u64;
                ranked.push(RankedTransaction { tx, priority, hash });
            }
            Err(_) => {
                debug!(txid = %tx.hash(), "dropping transaction with uncomputable fee");
            }
        }
    }

    // Stable sort: byte-identical duplicates keep their input order, so
    // the output is still a deterministic function of the input sequence.
    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.hash.cmp(&b.hash))
    });
    ranked.into_iter().map(|entry| entry.tx).collect()
}

/// Returns the longest prefix of `txns` whose cumulative serialized
/// sizes stay within `size_cap`.
///
/// Sizes are summed raw, with no per-element framing; the container that
/// carries the transactions contributes its own.
pub fn truncate_bytes_to(mut txns: Vec<Transaction>, size_cap: usize) -> Vec<Transaction> {
    let mut total = 0usize;
    for (index, tx) in txns.iter().enumerate() {
        let pending = tx.size();
        if total + pending > size_cap {
            txns.truncate(index);
            return txns;
        }
        total += pending;
    }
    txns
}

/// Transaction ids of a slice, in order.
pub fn hashes(txns: &[Transaction]) -> Vec<Hash256> {
    txns.iter().map(Transaction::hash).collect()
}

/// Sum of the raw serialized sizes of a slice. Not the size of a
/// serialized sequence, which would carry a length prefix.
pub fn total_size(txns: &[Transaction]) -> usize {
    txns.iter().map(Transaction::size).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
