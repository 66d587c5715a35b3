//! Retrieval-augmented answer engine.

use super::prompt::assemble_prompt;
use super::{Answer, Source};
use crate::completion::CompletionModel;
use crate::config::{Prompts, RagSettings};
use crate::conversation::{ConversationMemory, ConversationTurn};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Tunables for answer generation.
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Character budget for the assembled prompt.
    pub context_budget_chars: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self { top_k: 4, context_budget_chars: 24_000 }
    }
}

impl From<&RagSettings> for AnswerConfig {
    fn from(settings: &RagSettings) -> Self {
        Self {
            top_k: settings.top_k,
            context_budget_chars: settings.context_budget_chars,
        }
    }
}

/// Answers questions against one document's index, carrying the
/// conversation forward between calls.
pub struct AnswerEngine {
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn CompletionModel>,
    index: VectorIndex,
    memory: ConversationMemory,
    prompts: Prompts,
    config: AnswerConfig,
}

impl AnswerEngine {
    /// Create an engine over a built index, with a fresh empty memory.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn CompletionModel>,
        index: VectorIndex,
        prompts: Prompts,
        config: AnswerConfig,
    ) -> Self {
        Self {
            embedder,
            model,
            index,
            memory: ConversationMemory::new(),
            prompts,
            config,
        }
    }

    /// Answer one question.
    ///
    /// Embeds the question, retrieves the top chunks, assembles a prompt
    /// from history plus excerpts, and calls the model. The turn is
    /// appended to memory (question before answer) only when the model
    /// call succeeds, so a failed turn leaves the memory untouched.
    /// Sources are the retrieved chunks, labeled in retrieval order.
    #[instrument(skip(self, question), fields(question_chars = question.chars().count()))]
    pub async fn answer(&mut self, question: &str) -> Result<Answer> {
        let query = self.embedder.embed(question).await?;
        let hits = self.index.search(&query, self.config.top_k)?;
        debug!("Retrieved {} chunks", hits.len());

        let messages = assemble_prompt(
            &self.prompts.rag.system,
            self.memory.history(),
            &hits,
            question,
            self.config.context_budget_chars,
        );

        let text = self.model.complete(&messages).await?;

        self.memory.append(ConversationTurn::user(question));
        self.memory.append(ConversationTurn::assistant(text.clone()));

        info!("Answered with {} sources", hits.len());

        let sources = hits
            .into_iter()
            .enumerate()
            .map(|(i, hit)| Source {
                label: format!("source_{}", i),
                content: hit.chunk.text,
            })
            .collect();

        Ok(Answer { text, sources })
    }

    /// The conversation so far.
    pub fn history(&self) -> &[ConversationTurn] {
        self.memory.history()
    }

    /// The index this engine answers against.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}
