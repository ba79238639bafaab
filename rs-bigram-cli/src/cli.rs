use std::path::PathBuf;

use clap::Parser;

/// Simple text generator built on a word bigram model.
///
/// Steps run in a fixed order: load, fit, generate, save.
#[derive(Parser, Debug)]
#[command(name = "rs-bigram")]
#[command(version, long_about = None)]
pub struct Cli {
	/// Text files to fit the model on (one fit per file)
	#[arg(long, num_args = 1.., value_name = "FILE")]
	pub fit: Vec<PathBuf>,

	/// Number of words to generate after the first one, and the output path
	#[arg(long, num_args = 2, value_names = ["LENGTH", "PATH"], allow_negative_numbers = true)]
	pub generate: Option<Vec<String>>,

	/// First word of the generated sequence (defaults to the most common word)
	#[arg(long = "first-word", short = 'w', alias = "first_word", value_name = "WORD")]
	pub first_word: Option<String>,

	/// Seed for the random source, for reproducible generation
	#[arg(long)]
	pub seed: Option<u64>,

	/// Path to save the model to
	#[arg(long, value_name = "PATH")]
	pub save: Option<PathBuf>,

	/// Path to a previously saved model
	#[arg(long, value_name = "PATH")]
	pub load: Option<PathBuf>,

	/// Print debug traces on stderr (filter with RUST_LOG)
	#[arg(long)]
	pub debug: bool,
}

/// Parsed `--generate LENGTH PATH` request.
#[derive(Debug, PartialEq, Eq)]
pub struct GenerateRequest {
	pub length: usize,
	pub output: PathBuf,
}

impl Cli {
	/// Validates the `--generate` pair, if present.
	pub fn generate_request(&self) -> anyhow::Result<Option<GenerateRequest>> {
		match self.generate.as_deref() {
			None => Ok(None),
			Some([length, output]) => {
				let length = length
					.parse::<usize>()
					.map_err(|_| anyhow::anyhow!("LENGTH must be a non-negative integer, got '{}'", length))?;
				Ok(Some(GenerateRequest {
					length,
					output: PathBuf::from(output),
				}))
			}
			Some(other) => anyhow::bail!("--generate expects LENGTH and PATH, got {} values", other.len()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full_invocation() {
		let cli = Cli::try_parse_from([
			"rs-bigram", "--load", "in.bin", "--fit", "a.txt", "b.txt", "--generate", "10", "out.txt", "-w",
			"hello", "--seed", "3", "--save", "out.bin",
		])
		.unwrap();

		assert_eq!(cli.load, Some(PathBuf::from("in.bin")));
		assert_eq!(cli.fit, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
		assert_eq!(cli.first_word.as_deref(), Some("hello"));
		assert_eq!(cli.seed, Some(3));
		assert_eq!(cli.save, Some(PathBuf::from("out.bin")));
		assert_eq!(
			cli.generate_request().unwrap(),
			Some(GenerateRequest { length: 10, output: PathBuf::from("out.txt") })
		);
	}

	#[test]
	fn test_first_word_alias() {
		let cli = Cli::try_parse_from(["rs-bigram", "--first_word", "x"]).unwrap();
		assert_eq!(cli.first_word.as_deref(), Some("x"));
	}

	#[test]
	fn test_generate_requires_two_values() {
		assert!(Cli::try_parse_from(["rs-bigram", "--generate", "10"]).is_err());
	}

	#[test]
	fn test_generate_rejects_bad_length() {
		let cli = Cli::try_parse_from(["rs-bigram", "--generate", "-1", "out.txt"]).unwrap();
		assert_eq!(cli.generate.as_deref(), Some(&["-1".to_owned(), "out.txt".to_owned()][..]));
		assert!(cli.generate_request().is_err());

		let cli = Cli::try_parse_from(["rs-bigram", "--generate", "ten", "out.txt"]).unwrap();
		assert!(cli.generate_request().is_err());
	}

	#[test]
	fn test_nothing_requested() {
		let cli = Cli::try_parse_from(["rs-bigram"]).unwrap();
		assert!(cli.fit.is_empty());
		assert_eq!(cli.generate_request().unwrap(), None);
	}
}
