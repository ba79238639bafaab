use std::sync::LazyLock;

use regex::Regex;

/// Any character that cannot be part of a word.
///
/// Words are made of letters and numbers (any script), underscore,
/// apostrophe and hyphen. The last two keep contractions and hyphenated
/// compounds together. Combining marks are not word characters.
static NON_WORD_CHAR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_'-]").expect("valid word pattern"));

/// Normalizes a raw line of text.
///
/// The line is lowercased, then every character that is not a word
/// character is replaced by a single space.
///
/// ```
/// use rs_bigram_core::model::text::normalize;
///
/// assert_eq!(normalize("Don't STOP, well-known!"), "don't stop  well-known ");
/// ```
pub fn normalize(line: &str) -> String {
	NON_WORD_CHAR.replace_all(&line.to_lowercase(), " ").into_owned()
}

/// Normalizes a line and splits it on runs of whitespace.
///
/// Empty tokens are discarded, so a line made only of punctuation
/// yields no words.
pub fn tokenize(line: &str) -> Vec<String> {
	normalize(line).split_whitespace().map(str::to_owned).collect()
}
