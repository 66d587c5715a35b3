//! Retrieval-augmented question answering over one document.
//!
//! The engine decomposes a conversational retrieval turn into explicit
//! steps: embed the question, search the index, assemble a prompt from
//! history plus retrieved excerpts, call the model, and record the turn.

mod engine;
pub mod prompt;

pub use engine::{AnswerConfig, AnswerEngine};

use serde::{Deserialize, Serialize};

/// A source passage that grounded an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Citation label, `source_0`, `source_1`, ... in retrieval order.
    pub label: String,
    /// The exact retrieved chunk text.
    pub content: String,
}

/// An answer with the source passages used to ground it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The generated answer text.
    pub text: String,
    /// The chunks retrieved for this turn, whether or not the model
    /// cited them in prose.
    pub sources: Vec<Source>,
}

impl Answer {
    /// Format the answer for display, with a trailing source list.
    pub fn format_for_display(&self) -> String {
        if self.sources.is_empty() {
            return self.text.clone();
        }

        let names: Vec<&str> = self.sources.iter().map(|s| s.label.as_str()).collect();
        format!("{}\n\nSources: {}", self.text, names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_source_labels() {
        let answer = Answer {
            text: "It is a fox.".to_string(),
            sources: vec![
                Source { label: "source_0".to_string(), content: "a".to_string() },
                Source { label: "source_1".to_string(), content: "b".to_string() },
            ],
        };
        assert_eq!(
            answer.format_for_display(),
            "It is a fox.\n\nSources: source_0, source_1"
        );
    }

    #[test]
    fn test_display_without_sources_is_plain() {
        let answer = Answer { text: "Hello".to_string(), sources: Vec::new() };
        assert_eq!(answer.format_for_display(), "Hello");
    }
}
