//! External dice-roller interface.
//!
//! The roller is an optional collaborator: when present, initiative is
//! resolved by handing it a formula string with the participant's modifier
//! substituted in; when absent or failing, the session falls back to the
//! deterministic local die so an encounter always ends up fully ordered.

use async_trait::async_trait;
use thiserror::Error;

/// Placeholder replaced with the participant's modifier in formula templates.
pub const MODIFIER_PLACEHOLDER: &str = "%mod%";

/// Failure reported by an external roller.
///
/// The trait returns an integer, so a malformed or non-finite service
/// response must be rejected here by the adapter; it can never reach the
/// encounter state.
#[derive(Debug, Error)]
pub enum RollError {
    #[error("roller unavailable: {0}")]
    Unavailable(String),

    #[error("malformed roll result: {0}")]
    Malformed(String),
}

/// Evaluates a dice formula asynchronously.
#[async_trait]
pub trait InitiativeRoller: Send + Sync {
    async fn roll(&self, formula: &str) -> std::result::Result<i32, RollError>;
}

/// Substitutes a participant's modifier into a formula template at every
/// [`MODIFIER_PLACEHOLDER`].
pub fn substitute_modifier(template: &str, modifier: i32) -> String {
    template.replace(MODIFIER_PLACEHOLDER, &modifier.to_string())
}

#[cfg(test)]
mod tests {
    use super::substitute_modifier;

    #[test]
    fn substitutes_every_placeholder() {
        assert_eq!(substitute_modifier("1d20 + %mod%", 3), "1d20 + 3");
        assert_eq!(
            substitute_modifier("%mod%d20 + %mod%", -1),
            "-1d20 + -1"
        );
    }

    #[test]
    fn leaves_templates_without_placeholder_alone() {
        assert_eq!(substitute_modifier("2d10", 5), "2d10");
    }
}
