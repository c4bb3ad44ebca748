//! Empathy evaluation handlers.

mod evaluate_response;

pub use evaluate_response::{
    EvaluateResponseCommand, EvaluateResponseError, EvaluateResponseHandler,
};
