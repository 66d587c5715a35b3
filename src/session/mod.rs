//! Per-document session registry.
//!
//! A session binds one uploaded document's vector index to one
//! conversation's memory. The registry map is the only process-wide
//! mutable state; everything else is owned per-session, so sessions never
//! contend with each other. Within a session, turns are serialized by a
//! per-session async mutex. Sessions are memory-resident only and vanish
//! with the process.

use crate::chunking::TextSplitter;
use crate::completion::CompletionModel;
use crate::config::{Prompts, Settings};
use crate::conversation::ConversationTurn;
use crate::embedding::Embedder;
use crate::error::{LeseError, Result};
use crate::index::VectorIndex;
use crate::rag::{Answer, AnswerConfig, AnswerEngine};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// Opaque session identifier.
pub type SessionId = Uuid;

/// One client's live document session.
pub struct Session {
    /// Session identifier.
    pub id: SessionId,
    /// Name of the uploaded document, for status messages.
    pub document_name: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Number of chunks indexed from the document.
    pub chunk_count: usize,
    engine: AnswerEngine,
}

impl Session {
    /// Answer a question within this session.
    pub async fn answer(&mut self, question: &str) -> Result<Answer> {
        self.engine.answer(question).await
    }

    /// The conversation so far.
    pub fn history(&self) -> &[ConversationTurn] {
        self.engine.history()
    }
}

/// Process-wide registry mapping session ids to live sessions.
pub struct SessionRegistry {
    settings: Settings,
    prompts: Prompts,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn CompletionModel>,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    /// Create a registry. Validates the settings up front so chunking or
    /// retrieval misconfiguration fails here, not per-upload.
    pub fn new(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn CompletionModel>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            prompts: Prompts::default(),
            embedder,
            model,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Replace the default prompt templates.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Process a document and register a fresh session for it.
    ///
    /// Splits the document, embeds the chunks in batch, and builds the
    /// vector index. The session is registered only once the whole build
    /// has succeeded; a failed build leaves no partial state behind.
    #[instrument(skip(self, text), fields(document = %document_name, bytes = text.len()))]
    pub async fn create(&self, document_name: &str, text: &str) -> Result<SessionId> {
        let max_bytes = self.settings.upload.max_document_bytes();
        if text.len() > max_bytes {
            return Err(LeseError::InvalidInput(format!(
                "Document is {} bytes, the maximum is {} MB",
                text.len(),
                self.settings.upload.max_document_mb
            )));
        }
        if text.trim().is_empty() {
            return Err(LeseError::InvalidInput("Document is empty".to_string()));
        }

        let splitter = TextSplitter::new(
            self.settings.chunking.chunk_size,
            self.settings.chunking.overlap,
        )?;
        let chunks = splitter.split_into_chunks(text);
        let chunk_count = chunks.len();

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut index = VectorIndex::new();
        index.build(chunks, embeddings)?;

        let engine = AnswerEngine::new(
            self.embedder.clone(),
            self.model.clone(),
            index,
            self.prompts.clone(),
            AnswerConfig::from(&self.settings.rag),
        );

        let id = Uuid::new_v4();
        let session = Session {
            id,
            document_name: document_name.to_string(),
            created_at: Utc::now(),
            chunk_count,
            engine,
        };

        self.sessions
            .write()
            .unwrap()
            .insert(id, Arc::new(Mutex::new(session)));

        info!("Created session {} with {} chunks", id, chunk_count);
        Ok(id)
    }

    /// Create a session, first destroying the client's previous one.
    /// A client has at most one live session; a new upload replaces it.
    pub async fn replace(
        &self,
        previous: Option<SessionId>,
        document_name: &str,
        text: &str,
    ) -> Result<SessionId> {
        if let Some(old) = previous {
            self.destroy(old);
        }
        self.create(document_name, text).await
    }

    /// Look up a live session.
    pub fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(LeseError::SessionNotFound(id))
    }

    /// Destroy a session, releasing its index and memory. Returns whether
    /// a session was actually removed.
    pub fn destroy(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().unwrap().remove(&id).is_some();
        if removed {
            info!("Destroyed session {}", id);
        }
        removed
    }

    /// Answer a question within a session. Turns within one session are
    /// serialized by the session mutex.
    pub async fn ask(&self, id: SessionId, question: &str) -> Result<Answer> {
        let session = self.get(id)?;
        let mut session = session.lock().await;
        session.answer(question).await
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ChatMessage;
    use async_trait::async_trait;

    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.chars().count() as f32, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    struct StubModel;

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok("stub answer".to_string())
        }
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Settings::default(), Arc::new(StubEmbedder), Arc::new(StubModel))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_ask_destroy() {
        let registry = registry();
        let id = registry
            .create("fox.txt", "The quick brown fox. The lazy dog sleeps.")
            .await
            .unwrap();
        assert_eq!(registry.len(), 1);

        let answer = registry.ask(id, "who sleeps?").await.unwrap();
        assert_eq!(answer.text, "stub answer");
        assert!(!answer.sources.is_empty());

        assert!(registry.destroy(id));
        assert!(registry.is_empty());
        assert!(matches!(
            registry.ask(id, "anyone?").await,
            Err(LeseError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_memory() {
        let registry = registry();
        let a = registry.create("a.txt", "Document a talks about apples.").await.unwrap();
        let b = registry.create("b.txt", "Document b talks about bears.").await.unwrap();

        registry.ask(a, "apples?").await.unwrap();

        let session_b = registry.get(b).unwrap();
        assert!(session_b.lock().await.history().is_empty());
        let session_a = registry.get(a).unwrap();
        assert_eq!(session_a.lock().await.history().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_destroys_previous_session() {
        let registry = registry();
        let first = registry.create("one.txt", "first document").await.unwrap();
        let second = registry
            .replace(Some(first), "two.txt", "second document")
            .await
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get(first).is_err());
        assert!(registry.get(second).is_ok());
    }

    #[tokio::test]
    async fn test_rejects_empty_document() {
        let registry = registry();
        assert!(matches!(
            registry.create("empty.txt", "   \n ").await,
            Err(LeseError::InvalidInput(_))
        ));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_oversize_document() {
        let mut settings = Settings::default();
        settings.upload.max_document_mb = 1;
        let registry =
            SessionRegistry::new(settings, Arc::new(StubEmbedder), Arc::new(StubModel)).unwrap();

        let big = "x".repeat(2 * 1024 * 1024);
        assert!(matches!(
            registry.create("big.txt", &big).await,
            Err(LeseError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_at_construction() {
        let mut settings = Settings::default();
        settings.chunking.overlap = settings.chunking.chunk_size;
        assert!(
            SessionRegistry::new(settings, Arc::new(StubEmbedder), Arc::new(StubModel)).is_err()
        );
    }
}
