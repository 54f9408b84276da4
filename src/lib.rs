// Copyright (c) 2026 Vela Labs. MIT License.

//! # VELA Transaction Core
//!
//! The consensus-critical heart of the VELA network: everything a node
//! needs to represent, encode, hash, sign, validate, and prioritize
//! transactions, and nothing it doesn't.
//!
//! Every byte produced by this crate is consensus-critical. The wire
//! format, the hash preimages, and the selection ordering are frozen by
//! the blocks already on chain; a reimplementation must byte-match them,
//! not improve them. Tread accordingly.
//!
//! ## Architecture
//!
//! - **config** — Consensus constants. Granularity, size caps, record widths.
//! - **encode** — The canonical little-endian codec primitives and decode errors.
//! - **crypto** — SHA-256 digests, recoverable secp256k1 signatures, addresses.
//! - **transaction** — Construction, signing, verification, and selection.
//!
//! ## What is NOT here
//!
//! UTXO set maintenance, block assembly, the mempool, networking, and the
//! wallet all live in their own crates. This crate is stateless and pure:
//! no I/O, no locks, no clocks. A fully signed [`transaction::Transaction`]
//! is immutable by convention and safe to share across threads.
//!
//! ## Design Philosophy
//!
//! 1. Hostile bytes get a typed error. Broken callers get a panic.
//! 2. The decoder never allocates more than its input could justify.
//! 3. If it orders transactions, the order is total and deterministic.

pub mod config;
pub mod crypto;
pub mod encode;
pub mod transaction;
