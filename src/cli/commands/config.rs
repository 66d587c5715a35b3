//! Config command implementation.

use crate::cli::ConfigAction;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{LeseError, Result};

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content =
                toml::to_string_pretty(&settings).map_err(|e| LeseError::Config(e.to_string()))?;
            println!("{}", content);
        }
        ConfigAction::Path => {
            Output::kv(
                "Config file",
                &Settings::default_config_path().display().to_string(),
            );
        }
    }
    Ok(())
}
