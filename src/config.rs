//! # Consensus Constants
//!
//! Every consensus-relevant magic number in VELA lives here. Changing any
//! value in this file after genesis is a hard fork; most of them are also
//! baked into the wire format, so changing them is closer to launching a
//! different chain.

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Smallest-unit granularity for transaction outputs, in drops.
///
/// Amounts are denominated in drops (10^-6 of a whole vela), but outputs
/// may only carry whole-vela multiples. An output whose coins are zero or
/// not divisible by this constant is rejected at validation time.
pub const COIN_GRANULARITY: u64 = 1_000_000;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum serialized transaction size in bytes.
///
/// This is the default cap callers pass to verification and the hard
/// bound the decoder applies to every length prefix before allocating.
pub const MAX_TRANSACTION_SIZE: usize = 32 * 1024;

/// Maximum number of inputs (and therefore signatures) per transaction.
///
/// Signature indices are u16 on the wire, so the count must stay below
/// 2^16. Pushing an input past this limit is a builder bug and panics.
pub const MAX_TRANSACTION_INPUTS: usize = 65_535;

// ---------------------------------------------------------------------------
// Record Widths
// ---------------------------------------------------------------------------

/// SHA-256 digest length in bytes. Input references, inner hashes, and
/// transaction ids are all this wide.
pub const HASH_LENGTH: usize = 32;

/// Recoverable ECDSA signature length: 64 compact bytes plus one
/// trailing recovery-id byte.
pub const SIGNATURE_LENGTH: usize = 65;

/// Wire width of an address: 1 version byte + 20-byte RIPEMD-160 digest.
pub const ADDRESS_LENGTH: usize = 21;

/// Wire width of a transaction output: address + coins + hours.
pub const TRANSACTION_OUTPUT_LENGTH: usize = ADDRESS_LENGTH + 8 + 8;

/// Serialized size of the smallest possible transaction (one signature,
/// one input, one output).
pub const MIN_TRANSACTION_SIZE: usize =
    HASH_LENGTH + 4 + SIGNATURE_LENGTH + 4 + HASH_LENGTH + 4 + TRANSACTION_OUTPUT_LENGTH;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Scale factor for fee priority: priority = (fee * scale) / size.
///
/// Fees are compared per kilobyte of serialized transaction, with
/// truncating integer division. The scale is part of the block-builder
/// contract; every node must rank candidates identically.
pub const FEE_PRIORITY_SCALE: u64 = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_is_one_whole_vela() {
        assert_eq!(COIN_GRANULARITY, 1_000_000);
    }

    #[test]
    fn input_limit_fits_u16() {
        assert!(MAX_TRANSACTION_INPUTS < 1 << 16);
        assert_eq!(MAX_TRANSACTION_INPUTS, u16::MAX as usize);
    }

    #[test]
    fn minimum_transaction_is_178_bytes() {
        // 32-byte inner hash, three u32 counts, one signature, one input
        // hash, one 37-byte output.
        assert_eq!(MIN_TRANSACTION_SIZE, 178);
    }

    #[test]
    fn record_widths() {
        assert_eq!(SIGNATURE_LENGTH, 65);
        assert_eq!(ADDRESS_LENGTH, 21);
        assert_eq!(TRANSACTION_OUTPUT_LENGTH, 37);
    }

    #[test]
    fn size_cap_admits_the_smallest_transaction() {
        assert!(MIN_TRANSACTION_SIZE <= MAX_TRANSACTION_SIZE);
    }
}
