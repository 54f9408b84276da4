//! # Addresses
//!
//! A VELA address is 21 bytes on the wire: a version byte followed by
//! the 20-byte RIPEMD-160 digest of the SHA-256 of a compressed public
//! key. The codec treats it as an opaque fixed-width blob; this module
//! owns derivation and the human-readable bech32 form (`vela1...`).
//!
//! Bech32 is display plumbing only. Nothing consensus-critical ever
//! sees an address string; the chain knows only the raw 21 bytes.

use std::fmt;

use bech32::{Bech32, Hrp};
use ripemd::{Digest, Ripemd160};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::sha256;
use super::keys::VelaPublicKey;
use crate::config::ADDRESS_LENGTH;
use crate::encode::{ByteReader, DecodeError};

/// Human-readable prefix for all VELA addresses.
const ADDRESS_HRP: &str = "vela";

/// Current address version byte.
pub const ADDRESS_VERSION: u8 = 0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing the human-readable address form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The bech32 string could not be decoded.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded string carried an unexpected human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// The decoded payload has the wrong length.
    #[error("invalid address payload: expected {expected} bytes, got {got}")]
    InvalidPayloadLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A transaction output destination.
///
/// # Examples
///
/// ```
/// use vela_core::crypto::{Address, VelaKeypair};
///
/// let keypair = VelaKeypair::generate();
/// let address = Address::from_public_key(&keypair.public_key());
/// let encoded = address.to_bech32();
/// assert!(encoded.starts_with("vela1"));
/// assert_eq!(Address::from_bech32(&encoded).unwrap(), address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address {
    /// Address format version.
    pub version: u8,
    /// RIPEMD-160 digest of the SHA-256 of the owning public key.
    pub key: [u8; 20],
}

impl Address {
    /// Derives the address of a public key:
    /// `RIPEMD160(SHA256(compressed_key))`, current version.
    pub fn from_public_key(public_key: &VelaPublicKey) -> Self {
        let sha = sha256(&public_key.serialize());
        let mut hasher = Ripemd160::new();
        hasher.update(sha.as_bytes());
        let digest = hasher.finalize();
        let mut key = [0u8; 20];
        key.copy_from_slice(&digest);
        Self {
            version: ADDRESS_VERSION,
            key,
        }
    }

    /// Appends the canonical 21-byte wire form: version, then key digest.
    pub fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.version);
        buf.extend_from_slice(&self.key);
    }

    /// Decodes the canonical wire form.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let version = reader.read_u8()?;
        let key = reader.read_array::<20>()?;
        Ok(Self { version, key })
    }

    /// Encodes as a bech32 string with the `vela` prefix.
    pub fn to_bech32(&self) -> String {
        let hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        let mut payload = [0u8; ADDRESS_LENGTH];
        payload[0] = self.version;
        payload[1..].copy_from_slice(&self.key);
        bech32::encode::<Bech32>(hrp, &payload)
            .expect("encoding a 21-byte payload should never fail")
    }

    /// Parses a bech32-encoded address, validating prefix, checksum,
    /// and payload length.
    pub fn from_bech32(encoded: &str) -> Result<Self, AddressError> {
        let (hrp, payload) =
            bech32::decode(encoded).map_err(|e| AddressError::Bech32Decode(e.to_string()))?;

        let expected_hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        if hrp != expected_hrp {
            return Err(AddressError::InvalidHrp {
                expected: ADDRESS_HRP.to_string(),
                got: hrp.to_string(),
            });
        }

        if payload.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidPayloadLength {
                expected: ADDRESS_LENGTH,
                got: payload.len(),
            });
        }

        let mut key = [0u8; 20];
        key.copy_from_slice(&payload[1..]);
        Ok(Self {
            version: payload[0],
            key,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_bech32())
        } else {
            let mut payload = [0u8; ADDRESS_LENGTH];
            payload[0] = self.version;
            payload[1..].copy_from_slice(&self.key);
            serializer.serialize_bytes(&payload)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_bech32(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != ADDRESS_LENGTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {}-byte address, got {}",
                    ADDRESS_LENGTH,
                    bytes.len()
                )));
            }
            let mut key = [0u8; 20];
            key.copy_from_slice(&bytes[1..]);
            Ok(Address {
                version: bytes[0],
                key,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::VelaKeypair;

    #[test]
    fn derivation_is_deterministic() {
        let keypair = VelaKeypair::from_seed(&[3u8; 32]).unwrap();
        let a = Address::from_public_key(&keypair.public_key());
        let b = Address::from_public_key(&keypair.public_key());
        assert_eq!(a, b);
        assert_eq!(a.version, ADDRESS_VERSION);
    }

    #[test]
    fn different_keys_different_addresses() {
        let a = Address::from_public_key(&VelaKeypair::generate().public_key());
        let b = Address::from_public_key(&VelaKeypair::generate().public_key());
        assert_ne!(a, b);
    }

    #[test]
    fn bech32_roundtrip() {
        let address = Address::from_public_key(&VelaKeypair::generate().public_key());
        let encoded = address.to_bech32();
        assert!(encoded.starts_with("vela1"), "address was: {}", encoded);
        assert_eq!(Address::from_bech32(&encoded).unwrap(), address);
    }

    #[test]
    fn foreign_hrp_rejected() {
        let hrp = Hrp::parse("btc").unwrap();
        let encoded = bech32::encode::<Bech32>(hrp, &[0u8; ADDRESS_LENGTH]).unwrap();
        assert!(matches!(
            Address::from_bech32(&encoded),
            Err(AddressError::InvalidHrp { .. })
        ));
    }

    #[test]
    fn wrong_payload_length_rejected() {
        let hrp = Hrp::parse("vela").unwrap();
        let encoded = bech32::encode::<Bech32>(hrp, &[0u8; 20]).unwrap();
        assert!(matches!(
            Address::from_bech32(&encoded),
            Err(AddressError::InvalidPayloadLength {
                expected: 21,
                got: 20
            })
        ));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let address = Address::from_public_key(&VelaKeypair::generate().public_key());
        let mut encoded = address.to_bech32();
        let mid = encoded.len() / 2;
        let original = encoded.as_bytes()[mid];
        let replacement = if original == b'q' { b'p' } else { b'q' };
        encoded.replace_range(mid..mid + 1, std::str::from_utf8(&[replacement]).unwrap());
        assert!(Address::from_bech32(&encoded).is_err());
    }

    #[test]
    fn wire_roundtrip() {
        let address = Address::from_public_key(&VelaKeypair::generate().public_key());
        let mut buf = Vec::new();
        address.encode_to(&mut buf);
        assert_eq!(buf.len(), ADDRESS_LENGTH);

        let mut reader = ByteReader::new(&buf);
        assert_eq!(Address::decode(&mut reader).unwrap(), address);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn serde_json_uses_bech32() {
        let address = Address::from_public_key(&VelaKeypair::generate().public_key());
        let json = serde_json::to_string(&address).unwrap();
        assert!(json.contains("vela1"));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
