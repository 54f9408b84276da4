//! Transaction structure, construction, and canonical bytes.
//!
//! A transaction is built mutably: inputs and outputs are appended, the
//! header hash is computed with [`Transaction::update_header`], then the
//! signature vector is filled by [`super::signing::sign_inputs`]. From
//! that point it is immutable by convention; any further mutation breaks
//! the header binding and every signature.
//!
//! Two digests identify a transaction:
//!
//! - the **inner hash**, `SHA256(encode(inputs) || encode(outputs))`,
//!   stored in the header and signed by every input. The two sequences
//!   are encoded independently, each with its own length prefix; this is
//!   not the same bytes as encoding a record that wraps both, and the
//!   deployed chain has frozen it this way.
//! - the **transaction id**, `SHA256(SHA256(serialize(tx)))` over the
//!   full serialization, header and signatures included. Computed on
//!   demand, never stored in the record.

use serde::{Deserialize, Serialize};

use super::types::TransactionOutput;
use crate::config::{
    HASH_LENGTH, MAX_TRANSACTION_INPUTS, SIGNATURE_LENGTH, TRANSACTION_OUTPUT_LENGTH,
};
use crate::crypto::address::Address;
use crate::crypto::hash::{double_sha256, sha256, Hash256};
use crate::crypto::keys::VelaSignature;
use crate::encode::{ByteReader, DecodeError};

// ---------------------------------------------------------------------------
// TransactionHeader
// ---------------------------------------------------------------------------

/// Header of a transaction: the inner hash and the signature vector.
///
/// Signatures are parallel to the inputs; `sigs[i]` authorizes
/// `inputs[i]`. The header itself is excluded from the inner hash but
/// included in the transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// SHA-256 over the encoded inputs and outputs; the signing digest.
    pub inner_hash: Hash256,
    /// One recoverable signature per input, in input order.
    pub sigs: Vec<VelaSignature>,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A VELA transaction: spends existing unspent outputs, creates new ones.
///
/// Inputs are the 32-byte identities of the unspent outputs being spent.
/// Outputs are (address, coins, hours) triples. There is no script
/// language on this chain.
///
/// # Examples
///
/// ```
/// use vela_core::config::MAX_TRANSACTION_SIZE;
/// use vela_core::crypto::{sha256, Address, VelaKeypair};
/// use vela_core::transaction::{sign_inputs, verify_transaction, Transaction};
///
/// let keypair = VelaKeypair::generate();
/// let destination = Address::from_public_key(&keypair.public_key());
///
/// let mut tx = Transaction::new();
/// tx.push_input(sha256(b"some unspent output id"));
/// tx.push_output(destination, 1_000_000, 0);
/// tx.update_header();
/// sign_inputs(&mut tx, &[keypair]);
///
/// assert!(verify_transaction(&tx, MAX_TRANSACTION_SIZE).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Inner hash and signatures.
    pub head: TransactionHeader,
    /// Identities of the unspent outputs being spent.
    pub inputs: Vec<Hash256>,
    /// Newly created outputs.
    pub outputs: Vec<TransactionOutput>,
}

impl Transaction {
    /// Creates an empty transaction ready for construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an input spending the unspent output `ux_hash` and
    /// returns its index, which is also the index of its future
    /// signature.
    ///
    /// # Panics
    ///
    /// Panics if the transaction already carries the maximum number of
    /// inputs. Input counts are bounded by u16 indices; a builder that
    /// pushes past the bound is broken, not unlucky.
    pub fn push_input(&mut self, ux_hash: Hash256) -> u16 {
        assert!(
            self.inputs.len() < MAX_TRANSACTION_INPUTS,
            "maximum transaction inputs reached"
        );
        self.inputs.push(ux_hash);
        (self.inputs.len() - 1) as u16
    }

    /// Appends an output sending `coins` drops and `hours` coin hours to
    /// `address`. No validation happens here; granularity rules are
    /// checked at verification time.
    pub fn push_output(&mut self, address: Address, coins: u64, hours: u64) {
        self.outputs.push(TransactionOutput {
            address,
            coins,
            hours,
        });
    }

    /// Recomputes the inner hash and stores it in the header.
    ///
    /// Call after the last input or output mutation and before signing.
    pub fn update_header(&mut self) {
        self.head.inner_hash = self.inner_hash();
    }

    /// Computes the signing digest: a single SHA-256 over the encoded
    /// inputs followed by the encoded outputs.
    pub fn inner_hash(&self) -> Hash256 {
        let mut buf =
            Vec::with_capacity(8 + self.inputs.len() * HASH_LENGTH
                + self.outputs.len() * TRANSACTION_OUTPUT_LENGTH);
        self.encode_inputs(&mut buf);
        self.encode_outputs(&mut buf);
        sha256(&buf)
    }

    fn encode_inputs(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            buf.extend_from_slice(input.as_bytes());
        }
    }

    fn encode_outputs(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            output.encode_to(buf);
        }
    }

    fn serialized_size(&self) -> usize {
        HASH_LENGTH
            + 4
            + self.head.sigs.len() * SIGNATURE_LENGTH
            + 4
            + self.inputs.len() * HASH_LENGTH
            + 4
            + self.outputs.len() * TRANSACTION_OUTPUT_LENGTH
    }

    /// Serializes the full transaction into its canonical wire form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.serialized_size());
        buf.extend_from_slice(self.head.inner_hash.as_bytes());
        buf.extend_from_slice(&(self.head.sigs.len() as u32).to_le_bytes());
        for sig in &self.head.sigs {
            buf.extend_from_slice(sig.as_bytes());
        }
        self.encode_inputs(&mut buf);
        self.encode_outputs(&mut buf);
        buf
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> usize {
        self.serialize().len()
    }

    /// The transaction id: double SHA-256 over the full serialization.
    pub fn hash(&self) -> Hash256 {
        double_sha256(&self.serialize())
    }

    /// Returns the serialized size and the transaction id from a single
    /// serialization. Block builders rank by both; one encoding pass is
    /// enough.
    pub fn size_and_hash(&self) -> (usize, Hash256) {
        let bytes = self.serialize();
        (bytes.len(), double_sha256(&bytes))
    }

    /// Decodes a transaction from untrusted bytes.
    ///
    /// Fails unless the buffer contains exactly one well-framed
    /// transaction: no short reads, no length prefix beyond the decode
    /// cap, no trailing bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(tx)
    }

    /// Decodes a transaction from bytes this process itself produced.
    ///
    /// # Panics
    ///
    /// Panics on any decode failure. Only use on trusted bytes, such as
    /// records read back from our own storage; hostile input goes
    /// through [`deserialize`](Self::deserialize).
    pub fn must_deserialize(bytes: &[u8]) -> Self {
        Self::deserialize(bytes)
            .unwrap_or_else(|err| panic!("failed to deserialize trusted transaction: {err}"))
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let inner_hash = Hash256(reader.read_array::<HASH_LENGTH>()?);

        let sig_count = reader.read_length(SIGNATURE_LENGTH)?;
        let mut sigs = Vec::with_capacity(sig_count);
        for _ in 0..sig_count {
            sigs.push(VelaSignature::from_bytes(
                reader.read_array::<SIGNATURE_LENGTH>()?,
            ));
        }

        let input_count = reader.read_length(HASH_LENGTH)?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            inputs.push(Hash256(reader.read_array::<HASH_LENGTH>()?));
        }

        let output_count = reader.read_length(TRANSACTION_OUTPUT_LENGTH)?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(TransactionOutput::decode(reader)?);
        }

        Ok(Self {
            head: TransactionHeader { inner_hash, sigs },
            inputs,
            outputs,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
