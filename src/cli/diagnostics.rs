//! User-facing copy for the checker: the masked key echo and one rendered
//! diagnostic per outcome category.

use crate::llm::gemini::KeyCheckOutcome;

/// Width of the banner rule lines
const BANNER_WIDTH: usize = 60;

/// Message printed when no key is provided at all.
pub const NO_KEY_MESSAGE: &str = "No API key provided.";

/// Message printed when the key fails the minimum-length check.
pub const KEY_TOO_SHORT_MESSAGE: &str =
    "The API key looks too short. Are you sure it is correct?";

/// The header printed before a check begins.
pub fn banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\nGEMINI API KEY TESTER\n{rule}")
}

/// The footer printed once a check has run to completion. Refused inputs do
/// not get one.
pub fn footer() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\nTest completed!\n{rule}")
}

/// Mask a key for display. Keeps at most the first 6 and last 4 characters;
/// anything short enough that this would reveal the whole key is fully
/// masked instead.
pub fn masked_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Render the diagnostic for a completed check.
///
/// # Arguments
///
/// * `outcome` - The categorized result of the probe request.
///
/// # Returns
///
/// * A multi-line, human-readable message for the outcome's category.
pub fn render_outcome(outcome: &KeyCheckOutcome) -> String {
    match outcome {
        KeyCheckOutcome::Valid { reply } => format!(
            "SUCCESS! Your API key is working.\nGemini replied: {reply}"
        ),
        KeyCheckOutcome::MalformedReply { body } => format!(
            "Got a 200 response, but the body had an unexpected format.\nResponse: {body}"
        ),
        KeyCheckOutcome::BadRequest { detail } => format!(
            "BAD REQUEST (400)\n\
             This usually means:\n\
             \x20 - The API key format is invalid\n\
             \x20 - The request was malformed\n\
             Error details: {detail}"
        ),
        KeyCheckOutcome::Forbidden { detail } => format!(
            "FORBIDDEN (403)\n\
             This usually means:\n\
             \x20 - The API key is invalid\n\
             \x20 - The API key does not have permission\n\
             \x20 - The Gemini API is not enabled for your account\n\
             Error details: {detail}"
        ),
        KeyCheckOutcome::RateLimited { detail } => format!(
            "TOO MANY REQUESTS (429)\n\
             You have hit the rate limit. Wait a bit and try again.\n\
             Error details: {detail}"
        ),
        KeyCheckOutcome::UnexpectedStatus { status, body } => format!(
            "UNEXPECTED STATUS ({status})\nResponse: {body}"
        ),
        KeyCheckOutcome::TimedOut => "TIMEOUT: the request took too long.".to_string(),
        KeyCheckOutcome::Unreachable => {
            "CONNECTION ERROR: could not reach the Gemini API.\nCheck your internet connection."
                .to_string()
        }
        KeyCheckOutcome::Failed { message } => format!("UNEXPECTED ERROR: {message}"),
    }
}
