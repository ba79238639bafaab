use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use tracing::{debug, info, trace};

use super::snapshot::ModelSnapshot;
use super::state::State;
use super::text::tokenize;
use crate::error::{ModelError, Result};
use crate::io::{get_filename, read_bytes, read_file, write_bytes};

/// Represents a first-order Markov model over words.
///
/// The `BigramModel` stores, for every word seen followed by another one,
/// the multiset of its successors, and generates text by walking this
/// table with weighted random choices.
///
/// # Responsibilities
/// - Build the transition table from lines of text, across several calls
/// - Keep track of the most common word (default starting point)
/// - Generate word sequences from an injected random source
/// - Remember every generated sequence and every fitted source
///
/// # Invariants
/// - `states` holds one row per word, in first-discovery order
/// - `index` maps each row word to its position in `states`
/// - Every row has at least one successor and every count is >= 1
/// - `most_common_word` is `None` only while the table is empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BigramModel {
	/// Table rows, in the order their word was first seen as a predecessor.
	pub(super) states: Vec<State>,

	/// Word to position in `states`.
	pub(super) index: HashMap<String, usize>,

	/// Word whose successor counts sum to the maximum total.
	pub(super) most_common_word: Option<String>,

	/// Every sequence returned by `generate`, oldest first.
	pub(super) history: Vec<Vec<String>>,

	/// Names (without extension) of files fitted with `fit_file`.
	pub(super) sources: Vec<String>,
}

impl BigramModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Fits the model on one logical source, given line by line.
	///
	/// Each line is normalized and tokenized. Every pair of adjacent words
	/// is counted, including the pair formed by the last word of a line and
	/// the first word of the next one. A line without any word breaks that
	/// chain: the following line is not linked to the lines before it.
	///
	/// Counts accumulate over calls, but two calls are never linked to each
	/// other. The most common word is recomputed over the whole table
	/// at the end of every call, even for an empty input.
	pub fn fit<I, S>(&mut self, lines: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut carry: Option<String> = None;

		for line in lines {
			let mut words = tokenize(line.as_ref());

			if let (Some(previous), Some(first)) = (carry.as_deref(), words.first()) {
				self.record(previous, first);
			}
			for pair in words.windows(2) {
				self.record(&pair[0], &pair[1]);
			}

			// `None` on a blank line, which drops the previous carry
			carry = words.pop();
		}

		self.update_most_common_word();
	}

	/// Reads a UTF-8 text file and fits the model on its lines.
	///
	/// The file name (without extension) is appended to `sources`.
	///
	/// # Errors
	/// Returns `ModelError::Io` if the file cannot be read or is not valid UTF-8.
	/// The model is left untouched in that case.
	pub fn fit_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let path = path.as_ref();
		let lines = read_file(path)?;
		debug!(path = %path.display(), lines = lines.len(), "fitting source");

		self.fit(&lines);
		self.sources.push(get_filename(path));

		debug!(
			words = self.states.len(),
			most_common_word = self.most_common_word.as_deref().unwrap_or_default(),
			"source fitted"
		);
		Ok(())
	}

	/// Generates `length` words after a starting word.
	///
	/// The starting word is `first_word` when given and non-empty, otherwise
	/// the most common word of the model. Each following word is drawn among
	/// the successors of the current one, weighted by their counts.
	///
	/// # Returns
	/// The `length + 1` words joined with single spaces. The words are also
	/// appended to the model history.
	///
	/// # Errors
	/// - `ModelError::AbsentWord` if `first_word` is not a word of the table,
	///   or if the walk reaches a word that was never followed by another one.
	/// - `ModelError::EmptyModel` if no starting word is given and the model
	///   was never fitted.
	///
	/// On error the history is left unchanged.
	pub fn generate<R: Rng + ?Sized>(
		&mut self,
		length: usize,
		first_word: Option<&str>,
		rng: &mut R,
	) -> Result<String> {
		let start = match first_word.filter(|word| !word.is_empty()) {
			Some(word) if self.index.contains_key(word) => word.to_owned(),
			Some(word) => return Err(ModelError::AbsentWord(word.to_owned())),
			None => self.most_common_word.clone().ok_or(ModelError::EmptyModel)?,
		};

		let mut sequence = vec![start];
		for _ in 0..length {
			let current = &sequence[sequence.len() - 1];
			let next = self
				.state(current)
				.and_then(|state| state.predict(rng))
				.ok_or_else(|| ModelError::AbsentWord(current.clone()))?;
			sequence.push(next.to_owned());
		}
		trace!(length, start = %sequence[0], "sequence generated");

		let result = sequence.join(" ");
		self.history.push(sequence);
		Ok(result)
	}

	/// Returns the most common word, if the model was fitted on any pair.
	pub fn most_common_word(&self) -> Option<&str> {
		self.most_common_word.as_deref()
	}

	/// Returns `true` if `word` has at least one recorded successor.
	pub fn contains(&self, word: &str) -> bool {
		self.index.contains_key(word)
	}

	/// Number of times `next_word` was observed right after `word`.
	pub fn count(&self, word: &str, next_word: &str) -> usize {
		self.state(word).map_or(0, |state| state.count(next_word))
	}

	/// Successors of `word` and their counts, in lexical order.
	///
	/// Returns `None` if the word is not in the table.
	pub fn successors(&self, word: &str) -> Option<impl Iterator<Item = (&str, usize)>> {
		self.state(word).map(State::transitions)
	}

	/// Table words in first-discovery order.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.states.iter().map(State::word)
	}

	/// Number of words in the table.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if no pair was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Every sequence produced by `generate`, oldest first.
	pub fn history(&self) -> &[Vec<String>] {
		&self.history
	}

	/// Names of the files fitted with `fit_file`, in fitting order.
	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	/// Serializes the model into a versioned snapshot.
	///
	/// # Errors
	/// Returns `ModelError::Encode` if serialization fails.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		ModelSnapshot::from(self).encode()
	}

	/// Restores a model from bytes produced by `to_bytes`.
	///
	/// # Errors
	/// - `ModelError::UnsupportedVersion` for snapshots of another format version.
	/// - `ModelError::Decode` if the bytes are not a snapshot.
	/// - `ModelError::CorruptSnapshot` if the snapshot breaks a table invariant.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		ModelSnapshot::decode(bytes)?.into_model()
	}

	/// Writes the model to `path` (see `to_bytes`).
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let bytes = self.to_bytes()?;
		write_bytes(path, &bytes)?;
		info!(path = %path.display(), bytes = bytes.len(), words = self.states.len(), "model saved");
		Ok(())
	}

	/// Reads a model previously written with `save`.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let model = Self::from_bytes(&read_bytes(path)?)?;
		info!(path = %path.display(), words = model.states.len(), "model loaded");
		Ok(model)
	}

	fn state(&self, word: &str) -> Option<&State> {
		self.index.get(word).map(|&position| &self.states[position])
	}

	/// Counts one occurrence of `next_word` following `word`.
	///
	/// The row for `word` is created on first use, at the end of the table.
	fn record(&mut self, word: &str, next_word: &str) {
		let position = match self.index.get(word) {
			Some(&position) => position,
			None => {
				self.states.push(State::new(word));
				let position = self.states.len() - 1;
				self.index.insert(word.to_owned(), position);
				position
			}
		};
		self.states[position].add_transition(next_word);
	}

	/// Rescans the whole table for the word with the largest successor total.
	///
	/// Only a strictly larger total replaces the current best, so the first
	/// discovered word wins ties.
	fn update_most_common_word(&mut self) {
		let mut best: Option<(&State, usize)> = None;
		for state in &self.states {
			let total = state.total();
			match best {
				Some((_, max)) if total <= max => {}
				_ => best = Some((state, total)),
			}
		}
		self.most_common_word = best.map(|(state, _)| state.word().to_owned());
	}
}
