//! Completion-service adapters.
//!
//! Concrete [`dsd_ai::CompletionClient`] implementations. Failures surface as
//! `CompletionError`s and are absorbed by the advisors' fallbacks.

pub mod gemini;

pub use gemini::{GeminiCompletionClient, UnconfiguredCompletionClient, completion_client_from_config};
