//! Splitting documents into overlapping chunks for embedding and retrieval.
//!
//! The splitter works on characters (Unicode scalar values), so chunk sizes
//! and overlaps are measured in chars and multi-byte text never splits
//! inside a code point. There is no semantic boundary guarantee: the
//! splitter prefers paragraph, line, and word boundaries when one falls
//! inside the window, but will cut mid-token when it has to.

use crate::error::{LeseError, Result};
use serde::{Deserialize, Serialize};

/// Separator hierarchy, highest priority first: paragraph, line, word.
const SEPARATORS: [&[char]; 3] = [&['\n', '\n'], &['\n'], &[' ']];

/// A contiguous slice of the source document, sized for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the document, 0-based and contiguous.
    pub id: usize,
    /// Text content of this chunk.
    pub text: String,
    /// Display label for citations, derived from the chunk id.
    pub source_tag: String,
}

impl Chunk {
    /// Create a new chunk. The source tag is derived from the id.
    pub fn new(id: usize, text: String) -> Self {
        Self {
            source_tag: format!("{}-pl", id),
            id,
            text,
        }
    }
}

/// Splits text into overlapping chunks of bounded size.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl TextSplitter {
    /// Create a splitter.
    ///
    /// Fails with a configuration error if `chunk_size` is zero or
    /// `overlap` is not strictly smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(LeseError::Config("chunk_size must be greater than zero".to_string()));
        }
        if overlap >= chunk_size {
            return Err(LeseError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Split `text` into chunk strings.
    ///
    /// Each chunk is at most `chunk_size` chars, consecutive chunks share
    /// exactly `overlap` chars of the source (the final chunk may be
    /// shorter), and the concatenation of chunks covers the whole input.
    /// Empty input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let hard_end = (start + self.chunk_size).min(len);
            if hard_end == len {
                chunks.push(chars[start..len].iter().collect());
                break;
            }

            let end = self.break_point(&chars, start, hard_end);
            chunks.push(chars[start..end].iter().collect());
            // The next chunk repeats the last `overlap` chars of this one.
            start = end - self.overlap;
        }

        chunks
    }

    /// Split `text` and wrap the pieces as ordered [`Chunk`]s.
    pub fn split_into_chunks(&self, text: &str) -> Vec<Chunk> {
        self.split(text)
            .into_iter()
            .enumerate()
            .map(|(i, piece)| Chunk::new(i, piece))
            .collect()
    }

    /// Pick where the current chunk ends.
    ///
    /// Scans backward from the window limit for the highest-priority
    /// separator whose end still leaves the next start strictly past the
    /// current one (otherwise the split would not make progress). Falls
    /// back to a hard cut at the window limit.
    fn break_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let min_end = start + self.overlap + 1;

        for sep in SEPARATORS {
            let mut end = hard_end;
            while end >= min_end && end >= sep.len() {
                if &chars[end - sep.len()..end] == sep {
                    return end;
                }
                end -= 1;
            }
        }

        hard_end
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        // Defaults match the documented reference configuration.
        Self { chunk_size: 1000, overlap: 100 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(chunk_size: usize, overlap: usize) -> TextSplitter {
        TextSplitter::new(chunk_size, overlap).unwrap()
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(10, 10).is_err());
        assert!(TextSplitter::new(10, 15).is_err());
        assert!(TextSplitter::new(10, 9).is_ok());
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(splitter(20, 5).split("").is_empty());
    }

    #[test]
    fn test_short_input_yields_one_chunk() {
        let chunks = splitter(100, 10).split("hello world");
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_fox_and_dog_scenario() {
        let text = "The quick brown fox. The lazy dog sleeps.";
        let chunks = splitter(20, 5).split(text);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20);
            assert!(!chunk.is_empty());
        }

        // The second chunk repeats the last 5 chars of the first.
        let tail: String = chunks[0]
            .chars()
            .rev()
            .take(5)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert!(chunks[1].starts_with(&tail));
    }

    #[test]
    fn test_chunks_overlap_exactly() {
        // No separators, so every cut is a hard cut.
        let text: String = ('a'..='z').cycle().take(95).collect();
        let chunks = splitter(10, 3).split(&text);

        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 3).collect();
            assert!(pair[1].starts_with(&tail));
        }

        // Chunks tile the input: step is chunk length minus overlap.
        let covered: usize = chunks.iter().map(|c| c.chars().count() - 3).sum::<usize>() + 3;
        assert_eq!(covered, 95);
    }

    #[test]
    fn test_prefers_paragraph_breaks() {
        let text = "first paragraph here\n\nsecond paragraph follows with more text";
        let chunks = splitter(30, 4).split(text);

        assert!(chunks[0].ends_with("\n\n"));
    }

    #[test]
    fn test_deterministic() {
        let text = "Some repeated text. ".repeat(50);
        let a = splitter(100, 20).split(&text);
        let b = splitter(100, 20).split(&text);
        assert_eq!(a, b);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "æøå ".repeat(30);
        let chunks = splitter(16, 4).split(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 16);
        }
    }

    #[test]
    fn test_chunk_ids_and_source_tags() {
        let chunks = splitter(20, 5).split_into_chunks("The quick brown fox. The lazy dog sleeps.");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.id, i);
            assert_eq!(chunk.source_tag, format!("{}-pl", i));
        }
    }
}
