//! LLM integration modules.
//!
//! This module provides the Ollama client used to index parsed test
//! results and answer free-text questions about them.

pub mod client;

pub use client::{LlmConfig, OllamaClient};
