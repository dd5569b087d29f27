//! Prioritized, human-actionable instruction records.

use serde::{Deserialize, Serialize};

/// What aspect of the shot an action corrects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AspectRatio,
    ShotType,
    SubjectSize,
    HorizontalMove,
    VerticalTilt,
    BottomSpace,
    Composition,
    Compression,
    Pose,
}

/// One concrete instruction for the photographer, created fresh per
/// comparison and returned to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAction {
    /// 1 is the most urgent; lower numbers are surfaced first.
    pub priority: u8,
    pub kind: ActionKind,
    pub action_text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<String>,
}

impl FeedbackAction {
    pub fn new(priority: u8, kind: ActionKind, action_text: impl Into<String>) -> Self {
        Self {
            priority,
            kind,
            action_text: action_text.into(),
            direction: None,
            amount: None,
            impact: None,
            current: None,
            target: None,
        }
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_current(mut self, current: impl Into<String>) -> Self {
        self.current = Some(current.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_optional_fields() {
        let action = FeedbackAction::new(1, ActionKind::HorizontalMove, "move the camera right")
            .with_direction("→")
            .with_amount("12%")
            .with_impact("subject re-centers");
        assert_eq!(action.priority, 1);
        assert_eq!(action.direction.as_deref(), Some("→"));
        assert_eq!(action.amount.as_deref(), Some("12%"));
        assert!(action.current.is_none());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let action = FeedbackAction::new(2, ActionKind::Compression, "step back and zoom in");
        let json = serde_json::to_string(&action).unwrap();
        assert!(!json.contains("direction"));
        assert!(json.contains("\"kind\":\"compression\""));
    }
}
