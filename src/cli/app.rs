use std::io::{self, Write};

use clap::Parser;
use log::LevelFilter;

use crate::cli::diagnostics::{
    banner, footer, masked_key, render_outcome, KEY_TOO_SHORT_MESSAGE, NO_KEY_MESSAGE,
};
use crate::cli::errors::CLIError;
use crate::common::{setup_logger, Args};
use crate::constants::MIN_KEY_LENGTH;
use crate::llm::gemini::GeminiClient;

/// Run one credential check end to end: acquire the key, validate it, probe
/// the API, and print the diagnostic.
///
/// Check failures are reported, never returned; the process exits normally
/// after any completed check. Only I/O failures in the CLI itself surface as
/// errors.
pub async fn run() -> Result<(), CLIError> {
    let args = Args::parse();

    let level = args.log_level.parse().unwrap_or(LevelFilter::Off);
    let _ = setup_logger(level);

    println!("{}", banner());

    let key = match args.key {
        Some(key) => key,
        None => prompt_for_key()?,
    };
    let key = key.trim();

    if let Some(message) = validate_key(key) {
        println!("{message}");
        return Ok(());
    }

    println!("Testing Gemini API key {}...", masked_key(key));

    let client: GeminiClient = GeminiClient::new();
    let outcome = client.check_key(key).await;

    println!("{}", render_outcome(&outcome));
    println!("{}", footer());

    Ok(())
}

/// Read a key from an interactive prompt.
fn prompt_for_key() -> Result<String, CLIError> {
    print!("Enter your Gemini API key: ");
    io::stdout().flush()?;

    let mut key = String::new();
    io::stdin().read_line(&mut key)?;

    Ok(key)
}

/// Pre-network validation. `Some(message)` means the check is refused before
/// any request is made.
fn validate_key(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        return Some(NO_KEY_MESSAGE);
    }

    if key.chars().count() < MIN_KEY_LENGTH {
        return Some(KEY_TOO_SHORT_MESSAGE);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_refused() {
        assert_eq!(validate_key(""), Some(NO_KEY_MESSAGE));
    }

    #[test]
    fn test_short_key_is_refused() {
        assert_eq!(validate_key("AIzaShort"), Some(KEY_TOO_SHORT_MESSAGE));
    }

    #[test]
    fn test_plausible_key_is_accepted() {
        assert_eq!(validate_key("AIzaSyExampleKey1234"), None);
    }
}
