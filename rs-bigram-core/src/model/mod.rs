//! Top-level module for the bigram generation system.
//!
//! This module provides:
//! - The word-level bigram model (`BigramModel`)
//! - Internal transition rows (`State`)
//! - Text normalization and tokenization (`text`)
//! - The versioned persisted form of a model (`ModelSnapshot`)

/// First-order Markov model over words.
///
/// Handles accumulative fitting, default start word selection,
/// weighted random walks and persistence.
pub mod bigram_model;

/// Versioned snapshot schema used to save and restore a model.
pub mod snapshot;

/// Line normalization and whitespace tokenization.
pub mod text;

/// Internal representation of a single table row (one word).
///
/// Tracks outgoing transitions and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;
