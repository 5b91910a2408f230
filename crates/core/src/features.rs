//! Per-chunk display features: stripped text, highlighted character, and
//! how long the chunk stays on screen.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ReaderSettings;

/// Chunks at least this long place the highlight as if they were exactly
/// this long.
pub const PIVOT_WINDOW: usize = 12;

/// What the presentation layer needs to show one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// The chunk with surrounding whitespace stripped.
    pub text: String,
    /// Char index of the highlighted character, measured on the raw chunk.
    pub highlight: usize,
    pub duration_secs: f64,
}

impl Features {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs)
    }

    /// Split `text` around the highlighted character.
    ///
    /// The highlight index is measured on the unstripped chunk, so it can
    /// point past the end of `text` (or be shifted by stripped leading
    /// whitespace). Returns `None` when it falls outside `text`.
    pub fn split_highlight(&self) -> Option<(&str, char, &str)> {
        let (byte_idx, ch) = self.text.char_indices().nth(self.highlight)?;
        let after = byte_idx + ch.len_utf8();
        Some((&self.text[..byte_idx], ch, &self.text[after..]))
    }
}

/// Highlight position for a raw chunk, in chars.
pub fn highlight_index(chunk: &str, ratio: f64) -> usize {
    let len = chunk.chars().count();
    if len <= 1 {
        return 0;
    }
    let span = len.min(PIVOT_WINDOW);
    let mut idx = (span as f64 * ratio).ceil() as usize;
    if chunk.chars().nth(idx) == Some(' ') {
        idx += 1;
    }
    idx
}

/// Seconds the chunk stays on screen: a fixed per-frame share of a minute
/// plus a term that grows with the chunk's length.
pub fn display_duration(chunk: &str, wpm: u32) -> f64 {
    let len = chunk.chars().count() as f64;
    60.0 / wpm as f64 + (len * 0.01).sqrt()
}

/// All display features for one chunk under the given settings.
pub fn extract(chunk: &str, settings: &ReaderSettings) -> Features {
    Features {
        text: chunk.trim().to_string(),
        highlight: highlight_index(chunk, settings.highlight_ratio),
        duration_secs: display_duration(chunk, settings.wpm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATIO: f64 = 0.25;

    #[test]
    fn single_char_highlights_first() {
        assert_eq!(highlight_index("a", RATIO), 0);
        assert_eq!(highlight_index("$", RATIO), 0);
    }

    #[test]
    fn short_chunk_uses_quarter_position() {
        // ceil(6 * 0.25) = 2 -> 'l'
        assert_eq!(highlight_index("hello ", RATIO), 2);
        // ceil(4 * 0.25) = 1
        assert_eq!(highlight_index("word", RATIO), 1);
        // ceil(11 * 0.25) = 3
        assert_eq!(highlight_index("abcdefghijk", RATIO), 3);
    }

    #[test]
    fn skips_a_space_at_the_pivot() {
        // len 5 -> ceil(1.25) = 2, which is a space
        assert_eq!(highlight_index("ab cd", RATIO), 3);
    }

    #[test]
    fn long_chunk_caps_at_pivot_window() {
        let idx = highlight_index("extraordinarily long chunk", RATIO);
        assert_eq!(idx, 3);
        // Space at index 3 moves it to 4.
        assert_eq!(highlight_index("The quick brown fox", RATIO), 4);
    }

    #[test]
    fn long_chunk_highlight_in_three_or_four() {
        let samples = [
            "It was the best of times",
            "abc defghijklmnop",
            "I travel the world ",
            "            leading spaces",
        ];
        for s in samples {
            assert!(s.chars().count() >= PIVOT_WINDOW);
            let idx = highlight_index(s, RATIO);
            assert!(idx == 3 || idx == 4, "{s:?} -> {idx}");
        }
    }

    #[test]
    fn ratio_near_one_can_point_past_the_chunk() {
        // ceil(2 * 0.99) = 2, one past the last char; no space check applies.
        assert_eq!(highlight_index("ab", 0.99), 2);
        // Long chunks cap the span at the pivot window: ceil(12 * 0.99) = 12.
        assert_eq!(highlight_index("abcdefghijkl", 0.99), 12);

        let settings = ReaderSettings::default().with_highlight_ratio(0.99).unwrap();
        let f = extract("ab", &settings);
        assert_eq!(f.highlight, 2);
        assert_eq!(f.split_highlight(), None);
    }

    #[test]
    fn highlight_counts_chars_not_bytes() {
        // 'é' is two bytes, but lengths and indices are in chars.
        assert_eq!(highlight_index("éléf", RATIO), 1);
        assert_eq!(highlight_index("caféx", RATIO), 2);
    }

    #[test]
    fn duration_documented_example() {
        let d = display_duration("abcd", 300);
        assert!((d - 0.4).abs() < 1e-9);
    }

    #[test]
    fn duration_monotonic() {
        let chunk = "monotonic";
        assert!(display_duration(chunk, 200) > display_duration(chunk, 400));
        assert!(display_duration("abcdef", 300) > display_duration("abc", 300));
    }

    #[test]
    fn extract_strips_but_indexes_raw() {
        let settings = ReaderSettings::default();
        let f = extract("hello ", &settings);
        assert_eq!(f.text, "hello");
        assert_eq!(f.highlight, 2);
        assert_eq!(f.split_highlight(), Some(("he", 'l', "lo")));
    }

    #[test]
    fn extract_is_pure() {
        let settings = ReaderSettings::default();
        assert_eq!(extract("repeat me ", &settings), extract("repeat me ", &settings));
    }

    #[test]
    fn split_highlight_out_of_range() {
        let f = Features {
            text: "a".into(),
            highlight: 2,
            duration_secs: 0.3,
        };
        assert_eq!(f.split_highlight(), None);
    }

    #[test]
    fn duration_converts() {
        let f = Features {
            text: "x".into(),
            highlight: 0,
            duration_secs: 0.25,
        };
        assert_eq!(f.duration(), Duration::from_millis(250));
    }

    #[test]
    fn features_serialize_to_json() {
        let f = extract("abcd", &ReaderSettings::default());
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["text"], "abcd");
        assert_eq!(json["highlight"], 1);
    }
}
