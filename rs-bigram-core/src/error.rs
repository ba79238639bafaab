//! Error types for the bigram model.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type of the crate.
#[derive(Error, Debug)]
pub enum ModelError {
	/// A walk was requested from (or reached) a word that has no table entry.
	#[error("Word '{0}' is absent from the model")]
	AbsentWord(String),

	/// Generation without an explicit first word on a model that was never fitted.
	#[error("Model is empty, fit it before generating")]
	EmptyModel,

	/// I/O error with file context
	#[error("I/O error for {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Snapshot serialization error
	#[error("Failed to encode model: {0}")]
	Encode(#[source] postcard::Error),

	/// Snapshot deserialization error
	#[error("Failed to decode model: {0}")]
	Decode(#[source] postcard::Error),

	/// Snapshot written by an incompatible format version
	#[error("Unsupported snapshot version {found} (expected {expected})")]
	UnsupportedVersion { found: u32, expected: u32 },

	/// Snapshot decoded fine but breaks a table invariant
	#[error("Corrupt snapshot: {0}")]
	CorruptSnapshot(String),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
