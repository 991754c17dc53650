//! Parsing and validation of model-produced analysis replies.
//!
//! Local models are told to answer with a bare JSON object, but in practice
//! they wrap it in Markdown fences or pad it with prose. This module digs
//! the object out of whatever came back and normalizes it into a
//! `MoodAnalysis`, so the rest of the application never sees raw model
//! output.

use serde::Deserialize;
use tracing::debug;

use crate::constants::{MOOD_SCORE_MAX, MOOD_SCORE_MIN};
use crate::errors::AnalysisError;
use crate::journal::{Emotion, MoodAnalysis};

/// The JSON shape the model is asked to produce.
///
/// `mood_score` is an `i64` on purpose: the model may go out of range in
/// either direction, and the clamp happens after parsing. A fractional
/// score is rejected outright rather than rounded.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    mood_score: i64,
    mood_emotion: String,
    summary: String,
}

/// Parses a chat reply into a validated `MoodAnalysis`.
///
/// Accepts the reply as-is, fenced in Markdown, or embedded in surrounding
/// prose. Out-of-range scores are clamped into 1..=10, and unrecognized
/// emotion labels fall back to `Emotion::Neutral`.
///
/// # Errors
///
/// Returns `AnalysisError::MalformedAnalysis` when no JSON object can be
/// found, when required fields are missing, or when the score is not an
/// integer.
///
/// # Examples
///
/// ```
/// use undertone::ai::parse_analysis;
/// use undertone::journal::Emotion;
///
/// let reply = r#"{"mood_score": 8, "mood_emotion": "happy", "summary": "A good day."}"#;
/// let analysis = parse_analysis(reply).unwrap();
/// assert_eq!(analysis.score, 8);
/// assert_eq!(analysis.emotion, Emotion::Happy);
/// ```
pub fn parse_analysis(reply: &str) -> Result<MoodAnalysis, AnalysisError> {
    let candidate = extract_json_object(reply)?;

    let raw: RawAnalysis = serde_json::from_str(candidate).map_err(|e| {
        AnalysisError::MalformedAnalysis(format!("reply is not a valid analysis object: {}", e))
    })?;

    let score = clamp_score(raw.mood_score);

    let emotion = match Emotion::from_label(&raw.mood_emotion) {
        Some(emotion) => emotion,
        None => {
            debug!(
                "Unrecognized emotion label {:?}, falling back to neutral",
                raw.mood_emotion
            );
            Emotion::Neutral
        }
    };

    Ok(MoodAnalysis {
        score,
        emotion,
        summary: raw.summary.trim().to_string(),
    })
}

/// Pulls the first JSON object out of a possibly decorated reply.
///
/// Strips Markdown code fences first, then takes everything from the first
/// `{` to the last `}`.
fn extract_json_object(reply: &str) -> Result<&str, AnalysisError> {
    let stripped = strip_code_fences(reply);

    let start = stripped.find('{');
    let end = stripped.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&stripped[start..=end]),
        _ => Err(AnalysisError::MalformedAnalysis(
            "no JSON object found in reply".to_string(),
        )),
    }
}

/// Removes a leading/trailing Markdown code fence if the reply is wrapped
/// in one (with or without a language tag).
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening fence, e.g. ```json
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

/// Clamps a model-produced score into the valid 1..=10 range.
///
/// Models occasionally return 0 or 11 despite the prompt; a clamped score
/// is more useful than a discarded analysis.
fn clamp_score(score: i64) -> u8 {
    let clamped = score.clamp(MOOD_SCORE_MIN as i64, MOOD_SCORE_MAX as i64) as u8;
    if clamped as i64 != score {
        debug!("Clamped out-of-range mood score {} to {}", score, clamped);
    }
    clamped
}
