//! HTTP DTOs for catalog endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::catalog::StageScenariosView;
use crate::domain::catalog::{Scenario, ScenarioKind};

/// Query parameters for listing stage scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct StageScenariosParams {
    /// Caller identity; absent or empty means anonymous browsing.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One scenario as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResponse {
    pub id: u32,
    pub kind: &'static str,
    pub title: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_reaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_reaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl From<&Scenario> for ScenarioResponse {
    fn from(scenario: &Scenario) -> Self {
        match &scenario.kind {
            ScenarioKind::WorkedExample(w) => Self {
                id: scenario.id.as_u32(),
                kind: "worked_example",
                title: w.situation.clone(),
                context: w.context.clone(),
                learning_goals: None,
                wrong_reaction: Some(w.wrong_reaction.clone()),
                ideal_reaction: Some(w.ideal_reaction.clone()),
                effect: Some(w.effect.clone()),
            },
            ScenarioKind::AiDialogue(d) => Self {
                id: scenario.id.as_u32(),
                kind: "ai_dialogue",
                title: d.title.clone(),
                context: d.context.clone(),
                learning_goals: Some(d.learning_goals.clone()),
                wrong_reaction: None,
                ideal_reaction: None,
                effect: None,
            },
        }
    }
}

/// One stage with its visible scenarios.
#[derive(Debug, Clone, Serialize)]
pub struct StageScenariosResponse {
    pub stage_number: u32,
    pub title: String,
    pub description: String,
    pub scenarios: Vec<ScenarioResponse>,
    pub total: usize,
    pub locked: usize,
}

impl From<StageScenariosView> for StageScenariosResponse {
    fn from(view: StageScenariosView) -> Self {
        Self {
            stage_number: view.stage_number.as_u32(),
            title: view.stage_title,
            description: view.stage_description,
            scenarios: view.scenarios.iter().map(Into::into).collect(),
            total: view.total,
            locked: view.locked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AiDialogue, WorkedExample};

    #[test]
    fn dialogue_scenario_serializes_with_goals_only() {
        let scenario = Scenario::ai_dialogue(
            3,
            AiDialogue {
                title: "Plans cancelled again".to_string(),
                context: "ctx".to_string(),
                learning_goals: vec!["goal".to_string()],
            },
        );
        let dto = ScenarioResponse::from(&scenario);
        let json = serde_json::to_string(&dto).unwrap();

        assert!(json.contains("\"kind\":\"ai_dialogue\""));
        assert!(json.contains("learning_goals"));
        assert!(!json.contains("wrong_reaction"));
    }

    #[test]
    fn worked_example_serializes_with_reactions() {
        let scenario = Scenario::worked_example(
            2,
            WorkedExample {
                situation: "s".to_string(),
                context: "c".to_string(),
                wrong_reaction: "w".to_string(),
                ideal_reaction: "i".to_string(),
                effect: "e".to_string(),
            },
        );
        let json = serde_json::to_string(&ScenarioResponse::from(&scenario)).unwrap();

        assert!(json.contains("\"kind\":\"worked_example\""));
        assert!(json.contains("ideal_reaction"));
        assert!(!json.contains("learning_goals"));
    }
}
