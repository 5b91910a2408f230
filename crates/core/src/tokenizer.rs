//! Word tokenizer.
//!
//! A token is either a word with its trailing punctuation and whitespace, or a
//! lone word character / `$`. A single-character word followed by whitespace
//! is glued to the next word, so "I travel" comes out as one token and a lone
//! "I" never flashes on screen by itself.

use std::sync::LazyLock;

use regex::Regex;

/// `.-:` inside the trailing class is a range (`.` to `:`), so the trailing
/// run also takes `/` and ASCII digits.
const WORD_PATTERN: &str = r"\w\s*\w+[\s,.-:?!]*|[\w$]";

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORD_PATTERN).expect("word pattern is valid"));

/// Split one line into word tokens, in order. Text the pattern does not match
/// (leading whitespace, stray symbols) is skipped.
pub fn tokenize(line: &str) -> Vec<&str> {
    WORD_RE.find_iter(line).map(|m| m.as_str()).collect()
}

/// Number of tokens `tokenize` would return.
pub fn token_count(line: &str) -> usize {
    WORD_RE.find_iter(line).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_single_char_word_with_next() {
        let tokens = tokenize("I travel the world and the seven seas");
        assert_eq!(
            tokens,
            vec!["I travel ", "the ", "world ", "and ", "the ", "seven ", "seas"]
        );
    }

    #[test]
    fn keeps_trailing_punctuation_and_newline() {
        let tokens = tokenize("Hello, world!\n");
        assert_eq!(tokens, vec!["Hello, ", "world!\n"]);
    }

    #[test]
    fn trailing_run_includes_digits_and_slash() {
        // The trailing class covers the '.'..=':' range.
        let tokens = tokenize("page 12/30: done");
        assert_eq!(tokens, vec!["page 12/30: ", "done"]);
    }

    #[test]
    fn lone_characters() {
        assert_eq!(tokenize("$"), vec!["$"]);
        assert_eq!(tokenize("a"), vec!["a"]);
        // A dash is not whitespace, so the glue branch fails and both letters
        // stand alone.
        assert_eq!(tokenize("x - y"), vec!["x", "y"]);
    }

    #[test]
    fn skips_unmatched_text() {
        assert_eq!(tokenize("   -- ** "), Vec::<&str>::new());
        assert_eq!(tokenize("  -- go"), vec!["go"]);
    }

    #[test]
    fn unicode_word_characters() {
        assert_eq!(tokenize("café déjà vu"), vec!["café ", "déjà ", "vu"]);
    }

    #[test]
    fn count_matches_tokenize() {
        let line = "I think, therefore I am.\n";
        assert_eq!(token_count(line), tokenize(line).len());
        assert_eq!(token_count(""), 0);
    }
}
