//! Prompt templates for Lese.
//!
//! Prompts can be customized by loading a TOML file; anything not
//! overridden keeps its default.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub rag: RagPrompts,
}

/// Prompts for retrieval-augmented answer generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    pub system: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant that answers questions about a document the user has uploaded.

Guidelines:
- Ground your answers in the provided excerpts; each excerpt is tagged with a source label
- If the excerpts do not contain the answer, say so clearly instead of guessing
- Use the conversation so far to resolve follow-up questions and references
- Be concise but thorough"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, optionally overridden from a TOML file.
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        match custom_path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_system_prompt_mentions_sources() {
        let prompts = Prompts::default();
        assert!(prompts.rag.system.contains("source label"));
    }

    #[test]
    fn test_load_without_custom_file_uses_defaults() {
        let prompts = Prompts::load(None).unwrap();
        assert_eq!(prompts.rag.system, RagPrompts::default().system);
    }
}
