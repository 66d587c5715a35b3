//! Ask command implementation.

use super::{build_registry, read_document};
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: upload one document, ask one question.
pub async fn run_ask(
    file: &str,
    question: &str,
    model: Option<String>,
    top_k: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.rag.model = model;
    }
    if let Some(top_k) = top_k {
        settings.rag.top_k = top_k;
    }

    let (name, text) = read_document(file)?;
    let registry = build_registry(settings)?;

    let spinner = Output::spinner(&format!("Processing `{}`...", name));
    let session_id = match registry.create(&name, &text).await {
        Ok(id) => {
            spinner.finish_and_clear();
            id
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to process document: {}", e));
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Thinking...");
    match registry.ask(session_id, question).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer.text);

            if !answer.sources.is_empty() {
                Output::header("Sources");
                for source in &answer.sources {
                    Output::source(&source.label, &source.content);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            registry.destroy(session_id);
            return Err(e.into());
        }
    }

    registry.destroy(session_id);
    Ok(())
}
