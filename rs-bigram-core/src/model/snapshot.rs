use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::bigram_model::BigramModel;
use super::state::State;
use crate::error::{ModelError, Result};

/// Current format version written by `ModelSnapshot::encode`.
///
/// Bump it whenever the layout of `ModelSnapshot` or `StateRecord` changes.
/// Snapshots of any other version are rejected instead of being decoded
/// into a wrong model.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted form of a `BigramModel`.
///
/// Encoded with `postcard`. `version` is the first field, so it can be
/// read on its own before the rest of the layout is trusted.
///
/// # Invariants checked on restore
/// - Words are unique and each has at least one successor
/// - Successors are unique per word and all counts are >= 1
/// - `most_common_word` is a table word, and is set whenever the table is not empty
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelSnapshot {
	pub version: u32,
	/// Table rows in first-discovery order.
	pub states: Vec<StateRecord>,
	pub most_common_word: Option<String>,
	pub history: Vec<Vec<String>>,
	pub sources: Vec<String>,
}

/// One persisted table row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StateRecord {
	pub word: String,
	/// Successors and their counts, in lexical order.
	pub transitions: Vec<(String, usize)>,
}

impl From<&BigramModel> for ModelSnapshot {
	fn from(model: &BigramModel) -> Self {
		let states = model
			.states
			.iter()
			.map(|state| StateRecord {
				word: state.word().to_owned(),
				transitions: state
					.transitions()
					.map(|(next, count)| (next.to_owned(), count))
					.collect(),
			})
			.collect();

		Self {
			version: SNAPSHOT_VERSION,
			states,
			most_common_word: model.most_common_word.clone(),
			history: model.history.clone(),
			sources: model.sources.clone(),
		}
	}
}

impl ModelSnapshot {
	/// Encodes the snapshot with `postcard`.
	pub fn encode(&self) -> Result<Vec<u8>> {
		postcard::to_stdvec(self).map_err(ModelError::Encode)
	}

	/// Decodes a snapshot, checking its version first.
	///
	/// # Errors
	/// - `ModelError::Decode` if the bytes cannot be decoded.
	/// - `ModelError::UnsupportedVersion` if the version is not `SNAPSHOT_VERSION`.
	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let (version, _) = postcard::take_from_bytes::<u32>(bytes).map_err(ModelError::Decode)?;
		if version != SNAPSHOT_VERSION {
			return Err(ModelError::UnsupportedVersion {
				found: version,
				expected: SNAPSHOT_VERSION,
			});
		}

		let (snapshot, rest) = postcard::take_from_bytes::<Self>(bytes).map_err(ModelError::Decode)?;
		if !rest.is_empty() {
			return Err(ModelError::CorruptSnapshot(format!("{} trailing bytes", rest.len())));
		}
		Ok(snapshot)
	}

	/// Rebuilds the model, validating every table invariant.
	///
	/// # Errors
	/// Returns `ModelError::CorruptSnapshot` describing the first broken invariant.
	pub fn into_model(self) -> Result<BigramModel> {
		let mut states = Vec::with_capacity(self.states.len());
		let mut index = HashMap::with_capacity(self.states.len());

		for record in self.states {
			if record.transitions.is_empty() {
				return Err(corrupt(format!("word '{}' has no successor", record.word)));
			}

			let mut transitions = BTreeMap::new();
			for (next, count) in record.transitions {
				if count == 0 {
					return Err(corrupt(format!("'{}' -> '{}' has a zero count", record.word, next)));
				}
				if transitions.insert(next, count).is_some() {
					return Err(corrupt(format!("word '{}' has a duplicated successor", record.word)));
				}
			}

			if index.insert(record.word.clone(), states.len()).is_some() {
				return Err(corrupt(format!("word '{}' appears twice", record.word)));
			}
			states.push(State::from_counts(record.word, transitions));
		}

		match &self.most_common_word {
			Some(word) if !index.contains_key(word) => {
				return Err(corrupt(format!("most common word '{}' is not in the table", word)));
			}
			None if !states.is_empty() => {
				return Err(corrupt("missing most common word".to_owned()));
			}
			_ => {}
		}

		Ok(BigramModel {
			states,
			index,
			most_common_word: self.most_common_word,
			history: self.history,
			sources: self.sources,
		})
	}
}

fn corrupt(reason: String) -> ModelError {
	ModelError::CorruptSnapshot(reason)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn sample_model() -> BigramModel {
		let mut model = BigramModel::new();
		model.fit(["zeta x", "zeta y", "alpha x", "alpha y x"]);
		model
			.generate(3, Some("alpha"), &mut StdRng::seed_from_u64(1))
			.unwrap();
		model
	}

	fn record(word: &str, transitions: &[(&str, usize)]) -> StateRecord {
		StateRecord {
			word: word.to_owned(),
			transitions: transitions.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
		}
	}

	fn snapshot(states: Vec<StateRecord>, most_common_word: Option<&str>) -> ModelSnapshot {
		ModelSnapshot {
			version: SNAPSHOT_VERSION,
			states,
			most_common_word: most_common_word.map(str::to_owned),
			history: Vec::new(),
			sources: Vec::new(),
		}
	}

	#[test]
	fn test_snapshot_keeps_discovery_order() {
		let snap = ModelSnapshot::from(&sample_model());
		let words: Vec<_> = snap.states.iter().map(|r| r.word.as_str()).collect();
		assert_eq!(words, vec!["zeta", "x", "y", "alpha"]);
		assert_eq!(snap.most_common_word.as_deref(), Some("zeta"));
		assert_eq!(snap.history.len(), 1);
	}

	#[test]
	fn test_bytes_restore_equal_model() {
		let model = sample_model();
		let restored = BigramModel::from_bytes(&model.to_bytes().unwrap()).unwrap();
		assert_eq!(restored, model);
	}

	#[test]
	fn test_restored_model_generates_same_text() {
		let mut model = sample_model();
		let mut restored = BigramModel::from_bytes(&model.to_bytes().unwrap()).unwrap();

		let a = model.generate(12, None, &mut StdRng::seed_from_u64(99)).unwrap();
		let b = restored.generate(12, None, &mut StdRng::seed_from_u64(99)).unwrap();
		assert_eq!(a, b);

		// Further fitting keeps behaving the same
		model.fit(["alpha alpha alpha alpha"]);
		restored.fit(["alpha alpha alpha alpha"]);
		assert_eq!(model.most_common_word(), restored.most_common_word());
		assert_eq!(model, restored);
	}

	#[test]
	fn test_empty_model_round_trip() {
		let model = BigramModel::new();
		let restored = BigramModel::from_bytes(&model.to_bytes().unwrap()).unwrap();
		assert!(restored.is_empty());
		assert_eq!(restored.most_common_word(), None);
	}

	#[test]
	fn test_decode_rejects_other_version() {
		let mut snap = ModelSnapshot::from(&sample_model());
		snap.version = SNAPSHOT_VERSION + 1;
		let bytes = snap.encode().unwrap();

		match ModelSnapshot::decode(&bytes) {
			Err(ModelError::UnsupportedVersion { found, expected }) => {
				assert_eq!(found, SNAPSHOT_VERSION + 1);
				assert_eq!(expected, SNAPSHOT_VERSION);
			}
			other => panic!("expected UnsupportedVersion, got {:?}", other),
		}
	}

	#[test]
	fn test_decode_rejects_garbage() {
		assert!(matches!(ModelSnapshot::decode(&[]), Err(ModelError::Decode(_))));
		// Valid version, truncated body
		assert!(matches!(ModelSnapshot::decode(&[SNAPSHOT_VERSION as u8, 3]), Err(ModelError::Decode(_))));
	}

	#[test]
	fn test_decode_rejects_trailing_bytes() {
		let mut bytes = sample_model().to_bytes().unwrap();
		bytes.push(0);
		assert!(matches!(ModelSnapshot::decode(&bytes), Err(ModelError::CorruptSnapshot(_))));
	}

	#[test]
	fn test_into_model_rejects_broken_invariants() {
		let cases = vec![
			snapshot(vec![record("a", &[])], Some("a")),
			snapshot(vec![record("a", &[("b", 0)])], Some("a")),
			snapshot(vec![record("a", &[("b", 1), ("b", 2)])], Some("a")),
			snapshot(vec![record("a", &[("b", 1)]), record("a", &[("c", 1)])], Some("a")),
			snapshot(vec![record("a", &[("b", 1)])], Some("b")),
			snapshot(vec![record("a", &[("b", 1)])], None),
			snapshot(Vec::new(), Some("a")),
		];

		for case in cases {
			let result = case.clone().into_model();
			assert!(
				matches!(result, Err(ModelError::CorruptSnapshot(_))),
				"accepted {:?}",
				case
			);
		}
	}

	#[test]
	fn test_into_model_rebuilds_index() {
		let snap = snapshot(
			vec![record("a", &[("b", 3), ("c", 1)]), record("b", &[("a", 1)])],
			Some("a"),
		);
		let model = snap.into_model().unwrap();

		assert!(model.contains("b"));
		assert_eq!(model.count("a", "b"), 3);
		assert_eq!(model.count("b", "a"), 1);
		assert_eq!(model.words().collect::<Vec<_>>(), vec!["a", "b"]);
	}
}
