//! Interactive chat command over one document.

use super::{build_registry, read_document};
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(file: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e);
    }

    if let Some(model) = model {
        settings.rag.model = model;
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
            return Err(e);
        }
    };

    Output::success(&format!("Processing `{}` done. You can now ask questions!", name));
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        match registry.ask(session_id, input).await {
            Ok(answer) => {
                println!("\n{} {}\n", style("Lese:").cyan().bold(), answer.text);
                for source in &answer.sources {
                    Output::source(&source.label, &source.content);
                }
                if !answer.sources.is_empty() {
                    println!();
                }
            }
            Err(e) => {
                // A failed turn is scoped to the turn; the session lives on.
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    registry.destroy(session_id);
    Ok(())
}
