//! Pre-flight checks for commands that call external services.

use crate::error::{LeseError, Result};

/// Verify that the OpenAI API key is available.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(LeseError::Config(
            "OPENAI_API_KEY is not set. Export it before running commands that call the OpenAI API."
                .to_string(),
        )),
    }
}
