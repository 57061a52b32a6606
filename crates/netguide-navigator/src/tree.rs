//! Validated decision tree
//!
//! Steps live in an arena and never move; an id index maps each [`StepId`] to
//! its slot. Options carry the slot of their target, so traversal never
//! searches.
//!
//! The type has no public constructor. Use [`DecisionTree::build`] or a
//! [`TreeValidator`].

use crate::definition::StepDefinition;
use crate::error::ValidationError;
use crate::step::{Step, StepId, StepKind};
use crate::validation::TreeValidator;
use serde::Serialize;
use std::collections::HashMap;

/// Immutable, validated step table
///
/// Safe to share across sessions behind an `Arc`; nothing in it changes after
/// validation.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    steps: Vec<Step>,
    index: HashMap<StepId, usize>,
    root: usize,
    unreachable: Vec<usize>,
    has_cycle: bool,
}

/// Structural summary of a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeReport {
    /// Root step
    pub root: StepId,
    /// Total steps
    pub step_count: usize,
    /// Question steps
    pub question_count: usize,
    /// Solution steps
    pub solution_count: usize,
    /// Error steps
    pub error_count: usize,
    /// Options across all questions
    pub option_count: usize,
    /// Steps no path from the root reaches, in table order
    pub unreachable: Vec<StepId>,
    /// At least one directed cycle exists
    pub has_cycle: bool,
}

impl DecisionTree {
    /// Validate steps with the default context and build the tree
    ///
    /// # Errors
    /// The first [`ValidationError`] found.
    pub fn build(steps: &[StepDefinition], root: &StepId) -> Result<Self, ValidationError> {
        TreeValidator::new().validate(steps, root)
    }

    pub(crate) fn assemble(
        steps: Vec<Step>,
        index: HashMap<StepId, usize>,
        root: usize,
        unreachable: Vec<usize>,
        has_cycle: bool,
    ) -> Self {
        Self {
            steps,
            index,
            root,
            unreachable,
            has_cycle,
        }
    }

    /// Designated root
    #[inline]
    #[must_use]
    pub fn root_step(&self) -> &Step {
        &self.steps[self.root]
    }

    /// Look up a step by id
    #[must_use]
    pub fn get(&self, id: &StepId) -> Option<&Step> {
        self.slot_of(id).map(|slot| &self.steps[slot])
    }

    /// True if a step with this id exists
    #[must_use]
    pub fn contains(&self, id: &StepId) -> bool {
        self.index.contains_key(id)
    }

    /// Steps in table order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated tree; present for API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Structural summary
    #[must_use]
    pub fn report(&self) -> TreeReport {
        let count = |kind: StepKind| self.steps().filter(|s| s.kind() == kind).count();
        TreeReport {
            root: self.root_step().id.clone(),
            step_count: self.steps.len(),
            question_count: count(StepKind::Question),
            solution_count: count(StepKind::Solution),
            error_count: count(StepKind::Error),
            option_count: self.steps().map(|s| s.options().len()).sum(),
            unreachable: self
                .unreachable
                .iter()
                .map(|&slot| self.steps[slot].id.clone())
                .collect(),
            has_cycle: self.has_cycle,
        }
    }

    #[inline]
    pub(crate) fn root_slot(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn slot_of(&self, id: &StepId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub(crate) fn step_at(&self, slot: usize) -> &Step {
        &self.steps[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DecisionTree {
        let steps = vec![
            StepDefinition::question("start", "Q")
                .with_option("a", "A", "fix")
                .with_option("b", "B", "escalate"),
            StepDefinition::solution("fix", "Fix", "Do it"),
            StepDefinition::error("escalate", "Escalate", "Call"),
        ];
        DecisionTree::build(&steps, &StepId::from("start")).unwrap()
    }

    #[test]
    fn lookup_by_id() {
        let tree = tree();
        assert!(tree.contains(&StepId::from("fix")));
        assert_eq!(tree.get(&StepId::from("escalate")).unwrap().kind(), StepKind::Error);
        assert!(tree.get(&StepId::from("nope")).is_none());
    }

    #[test]
    fn options_resolve_to_slots() {
        let tree = tree();
        for opt in tree.root_step().options() {
            assert_eq!(tree.step_at(opt.target).id, opt.next_step_id);
        }
    }

    #[test]
    fn report_counts() {
        let report = tree().report();
        assert_eq!(report.step_count, 3);
        assert_eq!(report.question_count, 1);
        assert_eq!(report.solution_count, 1);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.option_count, 2);
        assert!(report.unreachable.is_empty());
        assert!(!report.has_cycle);
    }

    #[test]
    fn steps_keep_table_order() {
        let t = tree();
        let ids: Vec<&str> = t.steps().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "fix", "escalate"]);
    }

    #[test]
    fn report_uses_camel_case_keys() {
        let json = serde_json::to_value(tree().report()).unwrap();
        assert_eq!(json["stepCount"], 3);
        assert_eq!(json["optionCount"], 2);
        assert_eq!(json["hasCycle"], false);
        assert!(json.get("step_count").is_none());
    }

    #[test]
    fn tree_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DecisionTree>();
    }
}
