//! Constants used throughout the key checker

/// Default Gemini model for the probe request. Overridable via `GEMINI_MODEL`.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Base URL for the Gemini generative language API
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Timeout for the probe request, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum plausible key length; shorter inputs are rejected before any request
pub const MIN_KEY_LENGTH: usize = 10;

/// The fixed prompt sent with the probe request
pub const PROBE_PROMPT: &str =
    "Say 'Hello! Your API key is working correctly.' in exactly those words.";
