use std::collections::BTreeMap;

use rand::Rng;

/// Represents a row of the transition table.
///
/// A `State` corresponds to one normalized word (`word`) and stores
/// every observed successor of that word with its occurrence count.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during fitting
/// - Predict the next word using weighted random sampling
///
/// ## Invariants
/// - Each successor occurrence count is strictly positive
/// - A state stored in a table has at least one successor
/// - Successors iterate in lexical order, so a seeded random source
///   always picks the same successor
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct State {
	/// The word this row describes.
	word: String,
	/// Successors indexed by the following word.
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new empty state for the given word.
	pub(crate) fn new(word: &str) -> Self {
		Self {
			word: word.to_owned(),
			transitions: BTreeMap::new(),
		}
	}

	/// Rebuilds a state from already counted successors.
	///
	/// Used when restoring a snapshot; the caller validates the counts.
	pub(crate) fn from_counts(word: String, transitions: BTreeMap<String, usize>) -> Self {
		Self { word, transitions }
	}

	pub(crate) fn word(&self) -> &str {
		&self.word
	}

	/// Successors and their counts, in lexical order.
	pub(crate) fn transitions(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(next, count)| (next.as_str(), *count))
	}

	/// Number of times `next_word` was seen right after this word.
	pub(crate) fn count(&self, next_word: &str) -> usize {
		self.transitions.get(next_word).copied().unwrap_or(0)
	}

	/// Sum of all successor counts.
	pub(crate) fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Records an occurrence of a transition toward `next_word`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub(crate) fn add_transition(&mut self, next_word: &str) {
		// Only allocate the key on first sight, `entry` would need an owned `String` every time
		match self.transitions.get_mut(next_word) {
			Some(count) => *count += 1,
			None => {
				self.transitions.insert(next_word.to_owned(), 1);
			}
		}
	}

	/// Predicts the next word using weighted random sampling.
	///
	/// The probability of selecting a word is proportional to its
	/// occurrence count. One number is drawn in `0..total` and the
	/// successors are scanned with a cumulative subtraction.
	///
	/// Returns `None` if the state has no transitions.
	pub(crate) fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next_word, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next_word);
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`
		None
	}
}
