//! # Keys and Recoverable Signatures
//!
//! secp256k1 keypairs and the 65-byte recoverable ECDSA signatures that
//! authorize transaction inputs. A signature carries its recovery id, so
//! verifiers recover the signing public key from the signature and the
//! digest alone; no key ever travels with the transaction.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS cryptographic RNG. Signing itself is
//!   deterministic (RFC 6979 nonces inside libsecp256k1).
//! - Secret key bytes are never logged and never serialized implicitly.
//!   Exporting them is an explicit `secret_key_bytes()` call.
//! - Verification is strict: a signature must parse, recover, and verify
//!   against the recovered key before it counts as well formed.

use std::fmt;

use rand::rngs::OsRng;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::Hash256;
use crate::config::SIGNATURE_LENGTH;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from key and signature operations.
///
/// Deliberately coarse. Distinguishing *why* a signature failed hands an
/// oracle to whoever is feeding us garbage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a point on the curve")]
    InvalidPublicKey,

    #[error("malformed signature: expected {SIGNATURE_LENGTH} bytes with a valid recovery id")]
    MalformedSignature,

    #[error("signature recovery failed")]
    RecoveryFailed,

    #[error("signature does not verify against the recovered key")]
    VerificationFailed,
}

// ---------------------------------------------------------------------------
// VelaKeypair
// ---------------------------------------------------------------------------

/// A secp256k1 keypair, the atomic unit of spending authority.
///
/// Holds only the 32-byte secret scalar; the public key is derived on
/// demand. Intentionally implements neither `Serialize` nor
/// `Deserialize`: a keypair must never leak into JSON or logs by
/// accident. Exporting the secret is a deliberate
/// [`secret_key_bytes`](Self::secret_key_bytes) call.
#[derive(Clone)]
pub struct VelaKeypair {
    secret_key: SecretKey,
}

impl VelaKeypair {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, _public_key) = secp.generate_keypair(&mut OsRng);
        Self { secret_key }
    }

    /// Constructs a keypair deterministically from 32 seed bytes.
    ///
    /// Fails if the bytes are not a valid curve scalar (zero, or at or
    /// above the group order). Feed this a CSPRNG or KDF output, not a
    /// password.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, KeyError> {
        let secret_key = SecretKey::from_slice(seed).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { secret_key })
    }

    /// Loads a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_seed(&arr)
    }

    /// Returns the public half of this keypair.
    pub fn public_key(&self) -> VelaPublicKey {
        let secp = Secp256k1::signing_only();
        VelaPublicKey {
            key: PublicKey::from_secret_key(&secp, &self.secret_key),
        }
    }

    /// Signs a 32-byte digest, producing a recoverable signature.
    ///
    /// The digest is signed as-is; hashing the message is the caller's
    /// business. For transactions that digest is the header's inner hash.
    pub fn sign_hash(&self, digest: &Hash256) -> VelaSignature {
        let secp = Secp256k1::signing_only();
        let message = Message::from_digest(digest.0);
        let signature = secp.sign_ecdsa_recoverable(&message, &self.secret_key);
        VelaSignature::from_recoverable(&signature)
    }

    /// Exports the raw 32-byte secret. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.secret_key.secret_bytes()
    }
}

impl fmt::Debug for VelaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The secret never appears in debug output.
        write!(f, "VelaKeypair({:?})", self.public_key())
    }
}

// ---------------------------------------------------------------------------
// VelaPublicKey
// ---------------------------------------------------------------------------

/// The shareable half of a keypair. Addresses are derived from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VelaPublicKey {
    key: PublicKey,
}

impl VelaPublicKey {
    /// Parses a public key from its 33-byte compressed encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    /// Returns the 33-byte compressed encoding.
    pub fn serialize(&self) -> [u8; 33] {
        self.key.serialize()
    }

    /// Hex-encodes the compressed key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }
}

impl fmt::Debug for VelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VelaPublicKey({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// VelaSignature
// ---------------------------------------------------------------------------

/// A recoverable ECDSA signature: 64 compact bytes (r || s) followed by
/// one recovery-id byte.
///
/// The recovery id is what lets [`recover`](Self::recover) reconstruct
/// the signing public key, which in turn is how input authorization is
/// checked without storing keys on chain. The byte layout is part of the
/// wire format and must not change.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VelaSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl VelaSignature {
    /// Wraps raw signature bytes without validation.
    ///
    /// Untrusted bytes are fine here; validity is established later by
    /// [`recover`](Self::recover) or [`verify_signed_hash`].
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// The all-zero signature, used as a placeholder slot before signing.
    /// It never verifies.
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0u8; SIGNATURE_LENGTH],
        }
    }

    fn from_recoverable(signature: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = recovery_id.to_i32() as u8;
        Self { bytes }
    }

    fn to_recoverable(self) -> Result<RecoverableSignature, KeyError> {
        let recovery_id = RecoveryId::from_i32(i32::from(self.bytes[64]))
            .map_err(|_| KeyError::MalformedSignature)?;
        RecoverableSignature::from_compact(&self.bytes[..64], recovery_id)
            .map_err(|_| KeyError::MalformedSignature)
    }

    /// Returns the raw 65 bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Hex-encodes the signature (130 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parses a hex-encoded signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|_| KeyError::MalformedSignature)?;
        Ok(Self { bytes })
    }

    /// Recovers the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &Hash256) -> Result<VelaPublicKey, KeyError> {
        let signature = self.to_recoverable()?;
        let secp = Secp256k1::verification_only();
        let message = Message::from_digest(digest.0);
        let key = secp
            .recover_ecdsa(&message, &signature)
            .map_err(|_| KeyError::RecoveryFailed)?;
        Ok(VelaPublicKey { key })
    }
}

impl fmt::Debug for VelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VelaSignature({})", self.to_hex())
    }
}

impl Serialize for VelaSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for VelaSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            VelaSignature::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            let arr: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
                serde::de::Error::custom(format!("expected 65-byte signature, got {}", b.len()))
            })?;
            Ok(VelaSignature::from_bytes(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks that a signature is well formed over `digest`: it parses,
/// recovers to some public key, and verifies against that key.
///
/// This does NOT check that the recovered key is the one entitled to
/// spend anything; matching the recovered address against the referenced
/// unspent output's lock is the UTXO validator's job.
pub fn verify_signed_hash(signature: &VelaSignature, digest: &Hash256) -> Result<(), KeyError> {
    let recoverable = signature.to_recoverable()?;
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(digest.0);
    let key = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| KeyError::RecoveryFailed)?;
    secp.verify_ecdsa(&message, &recoverable.to_standard(), &key)
        .map_err(|_| KeyError::VerificationFailed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
