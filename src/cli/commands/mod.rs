//! Command implementations.

mod ask;
mod chat;
mod config;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use serve::run_serve;

use crate::completion::OpenAIChatModel;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::error::{LeseError, Result};
use crate::session::SessionRegistry;
use std::path::Path;
use std::sync::Arc;

/// Build a session registry backed by the OpenAI providers.
pub(crate) fn build_registry(settings: Settings) -> Result<Arc<SessionRegistry>> {
    let embedder = Arc::new(OpenAIEmbedder::from_settings(&settings.embedding));
    let model = Arc::new(OpenAIChatModel::from_settings(&settings.rag));
    Ok(Arc::new(SessionRegistry::new(settings, embedder, model)?))
}

/// Read a document from disk, rejecting anything that is not UTF-8 text.
pub(crate) fn read_document(path: &str) -> Result<(String, String)> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        LeseError::InvalidInput(format!("{} is not a valid UTF-8 text file", path))
    })?;

    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    Ok((name, text))
}
