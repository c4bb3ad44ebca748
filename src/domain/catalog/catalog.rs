//! In-memory content catalog.
//!
//! The catalog is loaded once at process start and never mutated, so it is
//! freely shared read-only across concurrent requests. Tests construct
//! catalogs from arbitrary stages; production code uses [`ContentCatalog::seed`].

use once_cell::sync::Lazy;

use crate::domain::foundation::{ScenarioId, StageNumber};

use super::stage::{AiDialogue, Scenario, Stage, WorkedExample};

/// Immutable table of stages and their scenarios.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    stages: Vec<Stage>,
}

impl ContentCatalog {
    /// Builds a catalog from explicit stages.
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Returns the built-in production catalog.
    pub fn seed() -> Self {
        SEED.clone()
    }

    /// Looks up a stage by number.
    pub fn stage(&self, number: StageNumber) -> Option<&Stage> {
        self.stages.iter().find(|s| s.number == number)
    }

    /// Looks up a scenario by id, together with the stage that contains it.
    pub fn scenario(&self, id: ScenarioId) -> Option<(&Stage, &Scenario)> {
        self.stages
            .iter()
            .find_map(|stage| stage.scenario(id).map(|s| (stage, s)))
    }

    /// Returns all stages in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

static SEED: Lazy<ContentCatalog> = Lazy::new(|| ContentCatalog::new(seed_stages()));

fn seed_stages() -> Vec<Stage> {
    vec![
        Stage {
            number: StageNumber::new(1),
            title: "Hearing What Is Really Said".to_string(),
            description: "Recognizing feelings behind everyday complaints and \
                          responding without jumping to solutions."
                .to_string(),
            scenarios: vec![
                Scenario::ai_dialogue(
                    1,
                    AiDialogue {
                        title: "After a hard day at work".to_string(),
                        context: "Your partner comes home visibly drained. A project \
                                  deadline moved up again and their manager took the \
                                  frustration out on the team."
                            .to_string(),
                        learning_goals: vec![
                            "Acknowledge the feeling before anything else".to_string(),
                            "Resist offering solutions unless asked".to_string(),
                        ],
                    },
                ),
                Scenario::worked_example(
                    2,
                    WorkedExample {
                        situation: "Partner vents about a difficult colleague".to_string(),
                        context: "The same colleague has been dismissive in meetings \
                                  for weeks."
                            .to_string(),
                        wrong_reaction: "You should just talk to HR about it.".to_string(),
                        ideal_reaction: "Weeks of that would wear anyone down. That \
                                         sounds exhausting."
                            .to_string(),
                        effect: "Your partner feels the weight of the situation is \
                                 seen, not minimized."
                            .to_string(),
                    },
                ),
                Scenario::ai_dialogue(
                    3,
                    AiDialogue {
                        title: "Plans cancelled again".to_string(),
                        context: "Your partner had to cancel an evening with friends \
                                  for the third time this month because of overtime, \
                                  and is upset about it."
                            .to_string(),
                        learning_goals: vec![
                            "Name the disappointment you hear".to_string(),
                            "Avoid relativizing the loss".to_string(),
                        ],
                    },
                ),
                Scenario::worked_example(
                    4,
                    WorkedExample {
                        situation: "Partner worries before a medical appointment".to_string(),
                        context: "A routine check-up, but the waiting is hard.".to_string(),
                        wrong_reaction: "It's just a check-up, nothing will be wrong."
                            .to_string(),
                        ideal_reaction: "The waiting is the worst part. I'm here, \
                                         whatever comes."
                            .to_string(),
                        effect: "The worry is allowed to exist, which makes it \
                                 lighter to carry."
                            .to_string(),
                    },
                ),
                Scenario::ai_dialogue(
                    5,
                    AiDialogue {
                        title: "Argument with a parent".to_string(),
                        context: "Your partner just hung up after a tense phone call \
                                  with their mother and is torn between anger and \
                                  guilt."
                            .to_string(),
                        learning_goals: vec![
                            "Hold space for mixed feelings".to_string(),
                            "Ask open questions instead of taking sides".to_string(),
                        ],
                    },
                ),
                Scenario::ai_dialogue(
                    6,
                    AiDialogue {
                        title: "Feeling overlooked at home".to_string(),
                        context: "Your partner mentions, carefully, that they have \
                                  been doing most of the household planning lately \
                                  and feel invisible."
                            .to_string(),
                        learning_goals: vec![
                            "Listen without defending yourself".to_string(),
                            "Validate the experience even when it is about you".to_string(),
                        ],
                    },
                ),
            ],
        },
        Stage {
            number: StageNumber::new(2),
            title: "Staying Present in Conflict".to_string(),
            description: "Keeping connection alive when the conversation is about \
                          the two of you."
                .to_string(),
            scenarios: vec![
                Scenario::ai_dialogue(
                    7,
                    AiDialogue {
                        title: "The recurring money talk".to_string(),
                        context: "A larger purchase you made without discussing it \
                                  first has reopened an old disagreement about \
                                  spending."
                            .to_string(),
                        learning_goals: vec![
                            "Acknowledge impact before explaining intent".to_string(),
                            "Stay with your partner's feeling under the numbers".to_string(),
                        ],
                    },
                ),
                Scenario::ai_dialogue(
                    8,
                    AiDialogue {
                        title: "Jealousy after a party".to_string(),
                        context: "Your partner felt sidelined at last night's party \
                                  while you caught up with an old friend, and brings \
                                  it up the next morning."
                            .to_string(),
                        learning_goals: vec![
                            "Take the insecurity seriously without ridicule".to_string(),
                            "Offer concrete reassurance".to_string(),
                        ],
                    },
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_has_stage_one_with_scenarios() {
        let catalog = ContentCatalog::seed();
        let stage = catalog.stage(StageNumber::new(1)).unwrap();
        assert!(stage.scenarios.len() >= 5);
    }

    #[test]
    fn seed_scenario_ids_are_unique() {
        let catalog = ContentCatalog::seed();
        let mut ids: Vec<_> = catalog
            .stages()
            .iter()
            .flat_map(|s| s.scenarios.iter().map(|sc| sc.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn scenario_lookup_spans_stages() {
        let catalog = ContentCatalog::seed();
        let (stage, scenario) = catalog.scenario(ScenarioId::new(7)).unwrap();
        assert_eq!(stage.number, StageNumber::new(2));
        assert!(scenario.as_dialogue().is_some());
    }

    #[test]
    fn unknown_stage_returns_none() {
        let catalog = ContentCatalog::seed();
        assert!(catalog.stage(StageNumber::new(99)).is_none());
    }

    #[test]
    fn unknown_scenario_returns_none() {
        let catalog = ContentCatalog::seed();
        assert!(catalog.scenario(ScenarioId::new(999)).is_none());
    }

    #[test]
    fn seed_scenario_one_is_trainable() {
        let catalog = ContentCatalog::seed();
        let (_, scenario) = catalog.scenario(ScenarioId::new(1)).unwrap();
        assert!(scenario.as_dialogue().is_some());
    }
}
