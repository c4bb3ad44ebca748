//! Content policy configuration.
//!
//! The free-tier visibility table, the fallback partner line, and the
//! persona prompt template are configuration rather than module constants,
//! so the entitlement resolver and session engine can be exercised with
//! arbitrary policies.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::entitlement::EntitlementPolicy;
use crate::domain::foundation::StageNumber;
use crate::domain::session::{PersonaPromptTemplate, DEFAULT_PERSONA_TEMPLATE};

use super::error::ValidationError;

/// Fixed, scenario-agnostic line substituted when the AI provider fails.
/// The conversational flow must never stall on an empty reply.
pub const DEFAULT_FALLBACK_LINE: &str =
    "Sorry... I lost my train of thought for a moment. Can you say that again?";

/// Content policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Free scenarios per stage, keyed by stage number. Stages not listed
    /// are fully locked for free users.
    #[serde(default = "default_free_limits")]
    pub free_limits: HashMap<u32, usize>,

    /// Partner line substituted on provider failure
    #[serde(default = "default_fallback_line")]
    pub fallback_line: String,

    /// Persona system prompt template
    #[serde(default = "default_persona_template")]
    pub persona_template: String,
}

impl ContentConfig {
    /// Builds the entitlement policy from the configured limits.
    pub fn entitlement_policy(&self) -> EntitlementPolicy {
        let mut limits: Vec<(StageNumber, usize)> = self
            .free_limits
            .iter()
            .map(|(stage, limit)| (StageNumber::new(*stage), *limit))
            .collect();
        limits.sort_by_key(|(stage, _)| *stage);
        EntitlementPolicy::new(limits)
    }

    /// Builds the persona prompt template.
    pub fn persona_prompt_template(&self) -> PersonaPromptTemplate {
        PersonaPromptTemplate::new(&self.persona_template)
    }

    /// Validate content configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fallback_line.trim().is_empty() {
            return Err(ValidationError::EmptyFallbackLine);
        }
        for placeholder in ["{context}", "{partner_name}", "{user_name}"] {
            if !self.persona_template.contains(placeholder) {
                return Err(ValidationError::MissingTemplatePlaceholder(placeholder));
            }
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            free_limits: default_free_limits(),
            fallback_line: default_fallback_line(),
            persona_template: default_persona_template(),
        }
    }
}

fn default_free_limits() -> HashMap<u32, usize> {
    HashMap::from([(1, 5)])
}

fn default_fallback_line() -> String {
    DEFAULT_FALLBACK_LINE.to_string()
}

fn default_persona_template() -> String {
    DEFAULT_PERSONA_TEMPLATE.to_string()
}
