//! AI integration for mood analysis of journal entries.
//!
//! This module provides integration with Ollama for local LLM inference:
//! the `MoodAnalyzer` trait the rest of the application depends on, the
//! Ollama-backed implementation, and the prompt/reply plumbing around it.
//!
//! # Module Structure
//!
//! - `ollama`: HTTP client for the Ollama API and the `OllamaAnalyzer`
//! - `prompts`: System prompt and message builder for analysis requests
//! - `analysis`: Parsing and validation of model replies
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use undertone::ai::{MoodAnalyzer, OllamaAnalyzer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = OllamaAnalyzer::new("http://127.0.0.1:11434", "llama3.2:3b", Duration::from_secs(30));
//! let analysis = analyzer.analyze("Today was a quiet, pleasant day.").await?;
//! println!("mood: {} ({})", analysis.score, analysis.emotion);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod ollama;
pub mod prompts;

use async_trait::async_trait;

use crate::errors::AnalysisError;
use crate::journal::MoodAnalysis;

// Re-export commonly used types
pub use analysis::parse_analysis;
pub use ollama::{Message, OllamaAnalyzer, OllamaClient};
pub use prompts::{build_analysis_messages, ANALYSIS_SYSTEM_PROMPT};

/// Produces a mood analysis for journal content.
///
/// The entry service depends on this trait rather than on a concrete
/// client, so tests can substitute a scripted analyzer and the HTTP
/// layer never knows which model is behind it.
#[async_trait]
pub trait MoodAnalyzer: Send + Sync {
    /// Analyzes the given journal content.
    ///
    /// # Errors
    ///
    /// Returns an `AnalysisError` when the backing service is unreachable
    /// or its reply cannot be interpreted. Callers are expected to treat
    /// failure as "no analysis available", not as a fatal condition.
    async fn analyze(&self, content: &str) -> Result<MoodAnalysis, AnalysisError>;
}
