//! Value records carried by transactions.
//!
//! [`TransactionOutput`] is what actually travels on the wire; [`UxBody`]
//! is derived from it at validation time to compute the identity the
//! output will have once it becomes an unspent output.

use serde::{Deserialize, Serialize};

use crate::crypto::address::Address;
use crate::crypto::hash::{sha256, Hash256};
use crate::encode::{ByteReader, DecodeError};

// ---------------------------------------------------------------------------
// TransactionOutput
// ---------------------------------------------------------------------------

/// A single output: destination address, coin amount, coin-hour amount.
///
/// Coins are denominated in drops. Granularity (nonzero, whole-vela
/// multiples) is enforced at verification time, not here, so builders
/// may stage intermediate states freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Destination address.
    pub address: Address,
    /// Amount in drops.
    pub coins: u64,
    /// Coin hours carried to the destination.
    pub hours: u64,
}

impl TransactionOutput {
    /// Appends the canonical 37-byte wire form: address, coins, hours.
    pub fn encode_to(&self, buf: &mut Vec<u8>) {
        self.address.encode_to(buf);
        buf.extend_from_slice(&self.coins.to_le_bytes());
        buf.extend_from_slice(&self.hours.to_le_bytes());
    }

    /// Decodes the canonical wire form.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let address = Address::decode(reader)?;
        let coins = reader.read_u64()?;
        let hours = reader.read_u64()?;
        Ok(Self {
            address,
            coins,
            hours,
        })
    }
}

// ---------------------------------------------------------------------------
// UxBody
// ---------------------------------------------------------------------------

/// The preimage of a prospective unspent output's identity.
///
/// Never transmitted. Built from a transaction's id and one of its
/// outputs; the SHA-256 of its canonical encoding is the id the output
/// will be spendable under once confirmed. Two outputs of one
/// transaction collide exactly when their (address, coins, hours)
/// triples are equal, since they share `src_transaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UxBody {
    /// Id of the transaction that creates this output.
    pub src_transaction: Hash256,
    /// Destination address, copied from the output.
    pub address: Address,
    /// Amount in drops, copied from the output.
    pub coins: u64,
    /// Coin hours, copied from the output.
    pub hours: u64,
}

impl UxBody {
    /// Builds the preimage for `output` as created by transaction
    /// `src_transaction`.
    pub fn new(src_transaction: Hash256, output: &TransactionOutput) -> Self {
        Self {
            src_transaction,
            address: output.address,
            coins: output.coins,
            hours: output.hours,
        }
    }

    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.src_transaction.as_bytes());
        self.address.encode_to(buf);
        buf.extend_from_slice(&self.coins.to_le_bytes());
        buf.extend_from_slice(&self.hours.to_le_bytes());
    }

    /// The identity the output will have as an unspent output.
    pub fn hash(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(32 + 21 + 8 + 8);
        self.encode_to(&mut buf);
        sha256(&buf)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
