//! Stage and scenario content types.
//!
//! Stages group scenarios into themed training units. Scenario content is
//! immutable after catalog load; all consumers share references into the
//! catalog.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ScenarioId, StageNumber};

/// A themed group of scenarios representing one training unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// One-based stage number, unique in the catalog.
    pub number: StageNumber,
    /// Display title.
    pub title: String,
    /// Short description of what the stage teaches.
    pub description: String,
    /// Scenarios in authoring order. Order is part of the content contract:
    /// free-tier truncation takes a prefix of this list.
    pub scenarios: Vec<Scenario>,
}

impl Stage {
    /// Looks up a scenario within this stage.
    pub fn scenario(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

/// A single situational prompt presented to the user.
///
/// Worked examples and AI-dialogue seeds share one id space; the kind tag
/// determines which operations accept the scenario. Only `AiDialogue`
/// scenarios can seed a training session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Catalog-wide unique id.
    pub id: ScenarioId,
    /// Scenario content, tagged by kind.
    pub kind: ScenarioKind,
}

impl Scenario {
    /// Creates a worked-example scenario.
    pub fn worked_example(id: u32, content: WorkedExample) -> Self {
        Self {
            id: ScenarioId::new(id),
            kind: ScenarioKind::WorkedExample(content),
        }
    }

    /// Creates an AI-dialogue scenario.
    pub fn ai_dialogue(id: u32, content: AiDialogue) -> Self {
        Self {
            id: ScenarioId::new(id),
            kind: ScenarioKind::AiDialogue(content),
        }
    }

    /// Returns the AI-dialogue content if this scenario is trainable.
    pub fn as_dialogue(&self) -> Option<&AiDialogue> {
        match &self.kind {
            ScenarioKind::AiDialogue(d) => Some(d),
            ScenarioKind::WorkedExample(_) => None,
        }
    }

    /// Display title for summaries. Worked examples use their situation line.
    pub fn title(&self) -> &str {
        match &self.kind {
            ScenarioKind::WorkedExample(w) => &w.situation,
            ScenarioKind::AiDialogue(d) => &d.title,
        }
    }
}

/// Scenario content variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// A graded example with a wrong and an ideal reaction shown side by side.
    WorkedExample(WorkedExample),
    /// A seed for a live multi-turn dialogue with the AI-simulated partner.
    AiDialogue(AiDialogue),
}

/// Static worked-example content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    /// The situation being presented.
    pub situation: String,
    /// Background context for the situation.
    pub context: String,
    /// An example of an unempathetic reaction.
    pub wrong_reaction: String,
    /// An example of an ideal empathetic reaction.
    pub ideal_reaction: String,
    /// The effect the ideal reaction has on the partner.
    pub effect: String,
}

/// Seed content for an AI-driven dialogue scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDialogue {
    /// Display title.
    pub title: String,
    /// Situation synopsis handed to the persona prompt.
    pub context: String,
    /// What the user should practice in this scenario.
    pub learning_goals: Vec<String>,
}
