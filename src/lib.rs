//! A command-line checker for Gemini API keys.
//!
//! The checker sends a single `generateContent` request with the key under
//! test and reports a human-readable diagnostic for each outcome category:
//! success, bad request, forbidden, rate-limited, other HTTP statuses,
//! timeouts, and connectivity failures.

pub mod cli;
pub mod common;
pub mod constants;
pub mod llm;

// Re-export the entry point for the binary
pub use cli::app::run;
