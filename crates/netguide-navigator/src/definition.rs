//! Authoring-side step table
//!
//! Step tables arrive from files or code in a loose shape: every step may carry
//! options and resolution text regardless of its kind. Validation turns a
//! [`StepTable`] into a [`DecisionTree`](crate::DecisionTree) or rejects it.

use crate::step::{OptionId, StepId, StepKind};
use serde::{Deserialize, Serialize};

/// Root used when neither the caller nor the table names one
pub const DEFAULT_ROOT: &str = "start";

/// One authored step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// Unique step id
    pub id: StepId,
    /// Step kind
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Display title
    pub title: String,
    /// Display description
    #[serde(default)]
    pub description: String,
    /// Outgoing options; only valid on questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
    /// Resolution text; only valid on terminal steps
    #[serde(default, alias = "resolution", skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl StepDefinition {
    /// Question step without options
    #[must_use]
    pub fn question(id: impl Into<StepId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Question,
            title: title.into(),
            description: String::new(),
            options: Vec::new(),
            solution: None,
        }
    }

    /// Solution step with resolution text
    #[must_use]
    pub fn solution(
        id: impl Into<StepId>,
        title: impl Into<String>,
        resolution: impl Into<String>,
    ) -> Self {
        Self::terminal(StepKind::Solution, id, title, resolution)
    }

    /// Error step with resolution text
    #[must_use]
    pub fn error(
        id: impl Into<StepId>,
        title: impl Into<String>,
        resolution: impl Into<String>,
    ) -> Self {
        Self::terminal(StepKind::Error, id, title, resolution)
    }

    fn terminal(
        kind: StepKind,
        id: impl Into<StepId>,
        title: impl Into<String>,
        resolution: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: String::new(),
            options: Vec::new(),
            solution: Some(resolution.into()),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an option
    #[must_use]
    pub fn with_option(
        mut self,
        id: impl Into<OptionId>,
        text: impl Into<String>,
        next_step_id: impl Into<StepId>,
    ) -> Self {
        self.options.push(OptionDefinition {
            id: id.into(),
            text: text.into(),
            next_step_id: next_step_id.into(),
        });
        self
    }
}

/// One authored option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDefinition {
    /// Option id, unique within the step
    pub id: OptionId,
    /// Display label
    #[serde(alias = "label")]
    pub text: String,
    /// Target step id
    pub next_step_id: StepId,
}

/// Step table as supplied by a loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTable {
    /// Root declared by the table itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<StepId>,
    /// Steps in authoring order
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl StepTable {
    /// Table without a declared root
    #[must_use]
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        Self { root: None, steps }
    }

    /// Declare the root
    #[must_use]
    pub fn with_root(mut self, root: impl Into<StepId>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Root after applying precedence: override, declared root, [`DEFAULT_ROOT`]
    #[must_use]
    pub fn effective_root(&self, root_override: Option<&StepId>) -> StepId {
        root_override
            .or(self.root.as_ref())
            .cloned()
            .unwrap_or_else(|| StepId::from(DEFAULT_ROOT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_field_names() {
        let json = r#"{
            "id": "start",
            "type": "question",
            "title": "What is wrong?",
            "description": "Pick one",
            "options": [{ "id": "opt1", "text": "No internet", "nextStepId": "fix" }]
        }"#;
        let step: StepDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(step.kind, StepKind::Question);
        assert_eq!(step.options[0].next_step_id, StepId::from("fix"));
        assert!(step.solution.is_none());
    }

    #[test]
    fn accepts_label_and_resolution_aliases() {
        let json = r#"{
            "id": "fix",
            "type": "solution",
            "title": "Restart",
            "resolution": "Unplug it",
            "options": [{ "id": "o", "label": "x", "nextStepId": "y" }]
        }"#;
        let step: StepDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(step.solution.as_deref(), Some("Unplug it"));
        assert_eq!(step.options[0].text, "x");
        assert_eq!(step.description, "");
    }

    #[test]
    fn effective_root_precedence() {
        let table = StepTable::new(Vec::new());
        assert_eq!(table.effective_root(None).as_str(), DEFAULT_ROOT);

        let table = table.with_root("begin");
        assert_eq!(table.effective_root(None).as_str(), "begin");

        let forced = StepId::from("other");
        assert_eq!(table.effective_root(Some(&forced)).as_str(), "other");
    }

    #[test]
    fn builder_helpers() {
        let q = StepDefinition::question("q", "Question?")
            .with_description("desc")
            .with_option("a", "A", "s");
        assert_eq!(q.options.len(), 1);
        assert_eq!(q.description, "desc");

        let e = StepDefinition::error("e", "Escalate", "Call support");
        assert_eq!(e.kind, StepKind::Error);
        assert_eq!(e.solution.as_deref(), Some("Call support"));
    }
}
