//! Bigram-based word generation library.
//!
//! This crate provides a first-order Markov model over words including:
//! - Text normalization and tokenization
//! - Accumulative bigram fitting over one or more sources
//! - Weighted random walks with an injectable random source
//! - A versioned, compact on-disk snapshot format
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Bigram model, text normalization and persisted snapshots.
pub mod model;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (line reading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ModelError, Result};
pub use model::bigram_model::BigramModel;
