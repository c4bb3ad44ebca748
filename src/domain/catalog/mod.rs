//! Content catalog: immutable stages and scenarios.

mod catalog;
mod stage;

pub use catalog::ContentCatalog;
pub use stage::{AiDialogue, Scenario, ScenarioKind, Stage, WorkedExample};
