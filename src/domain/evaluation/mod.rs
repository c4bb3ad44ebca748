//! Rubric-based empathy evaluation of single responses.

mod result;
mod rubric;

pub use result::{EmpathyScore, EvaluationResult};
pub use rubric::{parse_evaluation, rubric_prompt, RUBRIC_DIMENSIONS};
