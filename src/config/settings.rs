//! Configuration settings for Lese.

use crate::error::{LeseError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub rag: RagSettings,
    pub upload: UploadSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

/// Document chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self { chunk_size: 1000, overlap: 100 }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// RAG (Retrieval-Augmented Generation) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// LLM model for answer generation.
    pub model: String,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Sampling temperature for answer generation.
    pub temperature: f32,
    /// Character budget for the assembled prompt. When a conversation
    /// outgrows it, the oldest turns are dropped from the prompt first.
    pub context_budget_chars: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            top_k: 4,
            temperature: 0.5,
            context_budget_chars: 24_000,
        }
    }
}

/// Document upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Maximum document size in megabytes.
    pub max_document_mb: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self { max_document_mb: 20 }
    }
}

impl UploadSettings {
    /// Maximum document size in bytes.
    pub fn max_document_bytes(&self) -> usize {
        self.max_document_mb * 1024 * 1024
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration. Violations are fatal at startup,
    /// never surfaced per-request.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(LeseError::Config("chunking.chunk_size must be greater than zero".to_string()));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(LeseError::Config(format!(
                "chunking.overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.rag.top_k == 0 {
            return Err(LeseError::Config("rag.top_k must be at least 1".to_string()));
        }
        if self.rag.context_budget_chars == 0 {
            return Err(LeseError::Config("rag.context_budget_chars must be greater than zero".to_string()));
        }
        if self.upload.max_document_mb == 0 {
            return Err(LeseError::Config("upload.max_document_mb must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| LeseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lese")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut settings = Settings::default();
        settings.chunking.overlap = settings.chunking.chunk_size;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_top_k_must_be_positive() {
        let mut settings = Settings::default();
        settings.rag.top_k = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parses_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [chunking]
            chunk_size = 500

            [rag]
            top_k = 2
            "#,
        )
        .unwrap();
        assert_eq!(settings.chunking.chunk_size, 500);
        assert_eq!(settings.chunking.overlap, 100);
        assert_eq!(settings.rag.top_k, 2);
        assert!(settings.validate().is_ok());
    }
}
