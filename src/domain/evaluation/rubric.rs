//! Rubric prompt construction and model output parsing.
//!
//! The evaluator asks the model to grade one candidate response against a
//! fixed set of empathy dimensions and answer in a strict JSON shape. The
//! parser tolerates prose and code fences around the JSON object but rejects
//! output with no parseable object.

use serde::Deserialize;

use crate::domain::catalog::{Scenario, ScenarioKind};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::result::{EmpathyScore, EvaluationResult};

/// Dimensions every evaluation is graded on.
pub const RUBRIC_DIMENSIONS: [&str; 4] = [
    "validation of the partner's feeling",
    "validation of the partner's situation",
    "avoidance of unsolicited advice",
    "concreteness of the support offered",
];

/// Builds the rubric prompt for one candidate response.
///
/// Works for both scenario kinds: dialogue scenarios grade against their
/// persona context, worked examples against their situation context.
pub fn rubric_prompt(scenario: &Scenario, user_response: &str) -> String {
    let context = match &scenario.kind {
        ScenarioKind::AiDialogue(d) => d.context.as_str(),
        ScenarioKind::WorkedExample(w) => w.context.as_str(),
    };
    let dimensions = RUBRIC_DIMENSIONS
        .iter()
        .map(|d| format!("- {}", d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an empathy coach grading a single response in a relationship \
         communication exercise.\n\n\
         Scenario: {title}\n\
         Context: {context}\n\n\
         The user's response to their partner was:\n\
         \"{response}\"\n\n\
         Grade the response on these dimensions:\n{dimensions}\n\n\
         Answer with a single JSON object and nothing else, in this exact shape:\n\
         {{\n\
         \"empathy_score\": <number from 0 to 10>,\n\
         \"feedback\": \"<one paragraph of overall feedback>\",\n\
         \"improvements\": [\"<suggestion>\", ...],\n\
         \"alternative_responses\": [\"<alternative phrasing>\", ...],\n\
         \"emotional_awareness\": \"<what the response shows about emotional awareness>\",\n\
         \"next_level_tip\": \"<one tip for the next skill level>\"\n\
         }}",
        title = scenario.title(),
        context = context,
        response = user_response,
        dimensions = dimensions,
    )
}

/// Raw shape of the model's JSON answer.
#[derive(Debug, Deserialize)]
struct RawEvaluation {
    empathy_score: f32,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    alternative_responses: Vec<String>,
    #[serde(default)]
    emotional_awareness: String,
    #[serde(default)]
    next_level_tip: String,
}

/// Parses a model answer into an [`EvaluationResult`].
///
/// Extracts the first JSON object in the text, so surrounding prose or
/// markdown code fences do not break parsing. The score is clamped into
/// `[0, 10]` regardless of what the model produced.
///
/// # Errors
///
/// - `InvalidFormat` if no JSON object can be extracted or it does not
///   match the expected shape.
pub fn parse_evaluation(text: &str) -> Result<EvaluationResult, DomainError> {
    let json = extract_json_object(text).ok_or_else(|| {
        DomainError::new(
            ErrorCode::InvalidFormat,
            "Evaluator output contains no JSON object",
        )
    })?;

    let raw: RawEvaluation = serde_json::from_str(json).map_err(|e| {
        DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Evaluator output does not match rubric shape: {}", e),
        )
    })?;

    Ok(EvaluationResult {
        empathy_score: EmpathyScore::new(raw.empathy_score),
        feedback: raw.feedback,
        improvements: raw.improvements,
        alternative_responses: raw.alternative_responses,
        emotional_awareness: raw.emotional_awareness,
        next_level_tip: raw.next_level_tip,
    })
}

/// Finds the first balanced `{ ... }` block in the text.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
