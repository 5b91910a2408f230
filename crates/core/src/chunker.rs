//! Groups word tokens into display chunks.

use std::ops::Range;

use tracing::debug;

use crate::tokenizer::tokenize;

/// Split `0..len` into `groups` contiguous ranges whose sizes differ by at
/// most one. The first `len % groups` ranges carry the extra element.
///
/// Returns an empty vector when `groups` is zero.
pub fn balanced_split(len: usize, groups: usize) -> Vec<Range<usize>> {
    if groups == 0 {
        return Vec::new();
    }
    let base = len / groups;
    let extra = len % groups;

    let mut ranges = Vec::with_capacity(groups);
    let mut start = 0;
    for i in 0..groups {
        let size = if i < extra { base + 1 } else { base };
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Chunk one line: `floor(count / wpf)` balanced groups of tokens, each
/// concatenated without a separator. Lines with fewer than `wpf` tokens
/// yield nothing.
pub fn chunk_line(line: &str, wpf: usize) -> Vec<String> {
    if wpf == 0 {
        return Vec::new();
    }
    let tokens = tokenize(line);
    if tokens.len() < wpf {
        return Vec::new();
    }
    balanced_split(tokens.len(), tokens.len() / wpf)
        .into_iter()
        .map(|range| tokens[range].concat())
        .collect()
}

/// Build the chunk list for a whole text. Lines never share a chunk.
pub fn build_chunks<S: AsRef<str>>(lines: &[S], wpf: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        let line_chunks = chunk_line(line.as_ref(), wpf);
        if line_chunks.is_empty() {
            skipped += 1;
        }
        chunks.extend(line_chunks);
    }

    debug!(
        lines = lines.len(),
        skipped_lines = skipped,
        chunks = chunks.len(),
        wpf,
        "Built chunk list"
    );
    chunks
}
