//! # Cryptographic Primitives
//!
//! The hash, key, signature, and address types the transaction core
//! consumes. All of it is a thin, typed wrapper over audited
//! implementations: SHA-256 and RIPEMD-160 from the RustCrypto hashes,
//! ECDSA with public-key recovery from libsecp256k1. Nothing in here
//! rolls its own math, and nothing in here should tempt you to.
//!
//! The contracts that matter to consensus:
//!
//! - `sha256` / `double_sha256` produce the digests every identity in
//!   the system is addressed by.
//! - A [`VelaSignature`] is 65 bytes and recovers its signing key from
//!   the signature and digest alone.
//! - An [`Address`] binds a public key to 21 fixed wire bytes.

pub mod address;
pub mod hash;
pub mod keys;

pub use address::{Address, AddressError};
pub use hash::{double_sha256, sha256, Hash256};
pub use keys::{verify_signed_hash, KeyError, VelaKeypair, VelaPublicKey, VelaSignature};
