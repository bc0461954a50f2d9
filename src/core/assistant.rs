//! Generative-AI assistant seam
//!
//! Mentor chat, opportunity search and university matching are answered by an
//! external model. This module only defines the boundary: the [`AiAssistant`]
//! trait, the prompt for university matching, and the mapping of failures to
//! a recoverable "temporarily unavailable" outcome. Nothing here retries.

use crate::core::models::ApsResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

/// Totals below this only qualify for higher-certificate pathways at most institutions
pub const HIGHER_CERTIFICATE_THRESHOLD: u32 = 21;

/// Message shown when the assistant cannot answer
pub const UNAVAILABLE_MESSAGE: &str =
    "University matching is temporarily unavailable. Please try again in a moment.";

/// Errors reported by an assistant backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    /// The backend is down, overloaded, or not configured
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
    /// The request did not reach the backend
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with no text
    #[error("assistant returned an empty response")]
    EmptyResponse,
}

/// A source the assistant cited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Link to the source
    pub uri: Option<String>,
    /// Title of the source page
    pub title: Option<String>,
}

/// Free-text answer plus the sources it was grounded on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAnswer {
    /// Answer text
    pub text: String,
    /// Cited sources, possibly empty
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Conversation context passed along with a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantContext {
    /// Instructions framing the conversation
    pub system_instruction: Option<String>,
    /// Language the answer should be written in (e.g. "isiZulu")
    pub language: Option<String>,
    /// Earlier turns as `(speaker, text)` pairs, oldest first
    pub history: Vec<(String, String)>,
}

/// External generative-AI collaborator
pub trait AiAssistant: Send + Sync {
    /// Answer a prompt in the given conversation context
    ///
    /// # Errors
    /// Returns an [`AssistantError`] when the backend cannot answer.
    fn respond(&self, prompt: &str, context: &AssistantContext) -> Result<String, AssistantError>;

    /// Answer a query with web-grounded sources
    ///
    /// # Errors
    /// Returns an [`AssistantError`] when the backend cannot answer.
    fn search(&self, query: &str) -> Result<SearchAnswer, AssistantError>;
}

/// Prompt asking the assistant which programmes a score qualifies for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityMatchRequest {
    /// Total APS
    pub total_score: u32,
    /// Subjects formatted as `Name (NN%)`
    pub subject_summary: String,
}

impl UniversityMatchRequest {
    /// Build the request from a computed result
    #[must_use]
    pub fn from_result(result: &ApsResult) -> Self {
        let subject_summary = result
            .subjects
            .iter()
            .map(|s| format!("{} ({}%)", s.name, s.percent))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            total_score: result.total_score,
            subject_summary,
        }
    }

    /// Whether the score is below the usual degree entry level
    #[must_use]
    pub const fn needs_alternative_pathways(&self) -> bool {
        self.total_score < HIGHER_CERTIFICATE_THRESHOLD
    }

    /// Prompt text sent to the assistant
    #[must_use]
    pub fn prompt(&self) -> String {
        let mut prompt = String::new();
        let _ = writeln!(
            prompt,
            "Analyze the current South African university prospectuses for a student with:"
        );
        let _ = writeln!(prompt, "- Total APS Score: {}", self.total_score);
        let _ = writeln!(prompt, "- Subjects: {}", self.subject_summary);
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Please provide:");
        let _ = writeln!(
            prompt,
            "1. Degree and diploma programmes they qualify for at public institutions."
        );
        let _ = writeln!(
            prompt,
            "2. \"Reach\" programmes they narrowly miss but could reach with an improved final mark."
        );
        if self.needs_alternative_pathways() {
            let _ = writeln!(
                prompt,
                "3. Higher Certificate pathways, since the APS is below {HIGHER_CERTIFICATE_THRESHOLD}."
            );
        } else {
            let _ = writeln!(
                prompt,
                "3. Alternative pathways (Higher Certificates) as a fallback."
            );
        }
        let _ = writeln!(prompt);
        let _ = write!(prompt, "Only suggest programmes from official South African institutions.");
        prompt
    }
}

/// Result of asking for university matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The assistant answered
    Answered(SearchAnswer),
    /// The assistant failed; show `message` and let the user retry
    Unavailable {
        /// User-facing explanation
        message: String,
    },
}

impl MatchOutcome {
    /// Text to display for this outcome
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Answered(answer) => &answer.text,
            Self::Unavailable { message } => message,
        }
    }

    /// Whether the user should be offered a retry
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Ask the assistant which programmes a computed score qualifies for.
///
/// Called once per request; a failure becomes [`MatchOutcome::Unavailable`].
pub fn request_matches(assistant: &dyn AiAssistant, result: &ApsResult) -> MatchOutcome {
    let request = UniversityMatchRequest::from_result(result);
    let answer = assistant.search(&request.prompt()).and_then(|answer| {
        if answer.text.trim().is_empty() {
            Err(AssistantError::EmptyResponse)
        } else {
            Ok(answer)
        }
    });

    match answer {
        Ok(answer) => {
            crate::debug!(
                "University match answered with {} citation(s)",
                answer.citations.len()
            );
            MatchOutcome::Answered(answer)
        }
        Err(err) => {
            crate::warn!("University match failed: {err}");
            MatchOutcome::Unavailable {
                message: UNAVAILABLE_MESSAGE.to_string(),
            }
        }
    }
}
