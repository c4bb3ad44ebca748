//! Evaluation result value objects.

use serde::{Deserialize, Serialize};

/// Empathy score, always within `[0.0, 10.0]`.
///
/// Model output is untrusted; construction clamps into range and maps
/// non-finite values to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmpathyScore(f32);

impl EmpathyScore {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 10.0;

    /// Creates a score, clamping into `[0, 10]`.
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Structured feedback for one evaluated response.
///
/// Immutable, produced per evaluation call, not linked to any session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub empathy_score: EmpathyScore,
    /// Overall feedback paragraph.
    pub feedback: String,
    /// Concrete improvement suggestions.
    pub improvements: Vec<String>,
    /// Alternative phrasings the user could have tried.
    pub alternative_responses: Vec<String>,
    /// What the response reveals about the user's emotional awareness.
    pub emotional_awareness: String,
    /// One tip for reaching the next skill level.
    pub next_level_tip: String,
}
