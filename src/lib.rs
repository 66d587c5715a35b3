//! Lese - Conversational Document Question Answering
//!
//! A local-first CLI tool for asking questions about text documents.
//!
//! The name "Lese" comes from the Norwegian/Scandinavian word for "read."
//!
//! # Overview
//!
//! Lese allows you to:
//! - Upload a plain-text document and chat with it
//! - Get AI-powered answers grounded in retrieved passages
//! - See the exact source excerpts behind every answer
//! - Serve the same question-answering flow over HTTP
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `chunking` - Splitting documents into overlapping chunks
//! - `embedding` - Embedding generation
//! - `index` - In-memory vector index for similarity retrieval
//! - `conversation` - Conversation memory for chat sessions
//! - `completion` - Chat completion abstraction
//! - `rag` - Retrieval-augmented answer engine
//! - `session` - Per-document session registry
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lese::config::Settings;
//! use lese::embedding::OpenAIEmbedder;
//! use lese::completion::OpenAIChatModel;
//! use lese::session::SessionRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let embedder = Arc::new(OpenAIEmbedder::from_settings(&settings.embedding));
//!     let model = Arc::new(OpenAIChatModel::from_settings(&settings.rag));
//!     let registry = SessionRegistry::new(settings, embedder, model)?;
//!
//!     let id = registry.create("notes.txt", "The quick brown fox.").await?;
//!     let answer = registry.ask(id, "What is quick?").await?;
//!     println!("{}", answer.text);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod completion;
pub mod config;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod rag;
pub mod session;

pub use error::{LeseError, Result};
