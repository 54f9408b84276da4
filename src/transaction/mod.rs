//! # Transactions
//!
//! Construction, signing, verification, and block-candidate selection
//! for VELA transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Output and prospective-unspent-output records
//! builder.rs      — Transaction structure, construction, canonical bytes, ids
//! signing.rs      — One recoverable signature per input over the inner hash
//! verification.rs — Ordered fail-fast well-formedness checks
//! selection.rs    — Fee-per-kB priority ordering and byte-budget truncation
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — [`Transaction::new`], then `push_input` / `push_output`.
//! 2. **Finalize** — [`Transaction::update_header`] stores the inner hash.
//! 3. **Sign** — [`sign_inputs`] fills the parallel signature vector.
//! 4. **Verify** — [`verify_transaction`] gates pool and block admission.
//! 5. **Select** — [`sort_transactions`] + [`truncate_bytes_to`] pick a
//!    block candidate set.
//!
//! A signed transaction is treated as immutable. The id
//! ([`Transaction::hash`]) is recomputed from bytes on demand and never
//! stored inside the record.

pub mod builder;
pub mod selection;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Transaction, TransactionHeader};
pub use selection::{hashes, sort_transactions, total_size, truncate_bytes_to};
pub use signing::sign_inputs;
pub use types::{TransactionOutput, UxBody};
pub use verification::{verify_transaction, ValidationError};
