//! Validated step model
//!
//! [`Step`] values only exist inside a [`DecisionTree`](crate::DecisionTree).
//! Their shape is fixed by [`StepBody`]: a question owns its options, a
//! terminal step owns its resolution text, and nothing else is representable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable step identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Wrap an identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Option identifier, unique within its step
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Wrap an identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OptionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Step classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Branching question
    Question,
    /// Terminal step with a fix
    Solution,
    /// Terminal step for issues the guide cannot resolve
    Error,
}

impl StepKind {
    /// Solution and error steps accept no forward transition
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Solution | Self::Error)
    }

    /// Lowercase name as used in step tables
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Solution => "solution",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeled edge from a question to another step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOption {
    /// Option id, unique within the owning step
    pub id: OptionId,
    /// Display label
    pub label: String,
    /// Target step
    pub next_step_id: StepId,
    /// Arena slot of the target, resolved at validation
    #[serde(skip)]
    pub(crate) target: usize,
}

/// Kind-specific payload of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepBody {
    /// Question with at least one option
    Question {
        /// Options in authoring order
        options: Vec<StepOption>,
    },
    /// Resolution for a diagnosed issue
    Solution {
        /// Guidance text
        resolution: String,
    },
    /// Issue needing escalation or advanced diagnostics
    Error {
        /// Guidance text
        resolution: String,
    },
}

/// Node of a validated decision tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Stable identifier
    pub id: StepId,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Kind-specific payload
    #[serde(flatten)]
    pub body: StepBody,
}

impl Step {
    /// Kind of this step
    #[must_use]
    pub fn kind(&self) -> StepKind {
        match self.body {
            StepBody::Question { .. } => StepKind::Question,
            StepBody::Solution { .. } => StepKind::Solution,
            StepBody::Error { .. } => StepKind::Error,
        }
    }

    /// True for solution and error steps
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    /// Options of a question; empty for terminal steps
    #[must_use]
    pub fn options(&self) -> &[StepOption] {
        match &self.body {
            StepBody::Question { options } => options,
            StepBody::Solution { .. } | StepBody::Error { .. } => &[],
        }
    }

    /// Resolution text of a terminal step
    #[must_use]
    pub fn resolution(&self) -> Option<&str> {
        match &self.body {
            StepBody::Question { .. } => None,
            StepBody::Solution { resolution } | StepBody::Error { resolution } => {
                Some(resolution)
            }
        }
    }

    /// Look up an option by id
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&StepOption> {
        self.options().iter().find(|opt| &opt.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> Step {
        Step {
            id: StepId::from("fix"),
            title: "Fix".to_string(),
            description: String::new(),
            body: StepBody::Solution {
                resolution: "Restart the router".to_string(),
            },
        }
    }

    #[test]
    fn terminal_step_accessors() {
        let step = solution();
        assert_eq!(step.kind(), StepKind::Solution);
        assert!(step.is_terminal());
        assert!(step.options().is_empty());
        assert_eq!(step.resolution(), Some("Restart the router"));
    }

    #[test]
    fn question_step_accessors() {
        let step = Step {
            id: StepId::from("q"),
            title: "Q".to_string(),
            description: String::new(),
            body: StepBody::Question {
                options: vec![StepOption {
                    id: OptionId::from("a"),
                    label: "A".to_string(),
                    next_step_id: StepId::from("fix"),
                    target: 1,
                }],
            },
        };
        assert_eq!(step.kind(), StepKind::Question);
        assert!(!step.is_terminal());
        assert!(step.resolution().is_none());
        assert!(step.option(&OptionId::from("a")).is_some());
        assert!(step.option(&OptionId::from("b")).is_none());
    }

    #[test]
    fn kind_names() {
        assert_eq!(StepKind::Question.to_string(), "question");
        assert!(StepKind::Error.is_terminal());
        assert!(!StepKind::Question.is_terminal());
    }

    #[test]
    fn step_serializes_with_type_tag() {
        let json = serde_json::to_value(solution()).unwrap();
        assert_eq!(json["type"], "solution");
        assert_eq!(json["resolution"], "Restart the router");
        assert_eq!(json["id"], "fix");
    }
}
