//! Load-time validation
//!
//! All structural checks happen here, once, before any session starts. The
//! navigator itself never re-checks references: a [`DecisionTree`] can only be
//! obtained through [`TreeValidator::validate`], so holding one is proof that
//! every rule below passed.
//!
//! Checks run in a fixed order and the first violation wins:
//! 1. step ids are unique
//! 2. the root exists
//! 3. per step, in table order: kind/shape rules, option id uniqueness,
//!    option targets
//! 4. cycles, when [`CyclePolicy::Reject`] is in force

use crate::definition::{StepDefinition, StepTable};
use crate::error::ValidationError;
use crate::step::{Step, StepBody, StepId, StepKind, StepOption};
use crate::tree::DecisionTree;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How directed cycles in a tree are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Loops such as "try again" edges are legal
    #[default]
    Allow,
    /// Any directed cycle fails validation
    Reject,
}

/// Context for validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext {
    /// Cycle handling
    pub cycle_policy: CyclePolicy,
}

impl ValidationContext {
    /// Context that refuses cyclic trees
    #[must_use]
    pub fn rejecting_cycles() -> Self {
        Self {
            cycle_policy: CyclePolicy::Reject,
        }
    }
}

/// Load-time tree validator
#[derive(Debug, Clone, Default)]
pub struct TreeValidator {
    context: ValidationContext,
}

impl TreeValidator {
    /// Validator with the default context (cycles allowed)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with a custom context
    #[must_use]
    pub fn with_context(context: ValidationContext) -> Self {
        Self { context }
    }

    /// Validate a table against a root and build the immutable tree
    ///
    /// # Errors
    /// The first [`ValidationError`] found; nothing is built in that case.
    pub fn validate(
        &self,
        steps: &[StepDefinition],
        root: &StepId,
    ) -> Result<DecisionTree, ValidationError> {
        let index = Self::index_steps(steps)?;

        let root_slot = *index
            .get(root)
            .ok_or_else(|| ValidationError::UnknownRoot(root.clone()))?;

        let mut validated = Vec::with_capacity(steps.len());
        for def in steps {
            validated.push(Self::validate_step(def, &index)?);
        }

        let graph = Self::build_graph(&validated);
        let cycle_at = Self::find_cycle(&graph);
        if let Some(slot) = cycle_at {
            if self.context.cycle_policy == CyclePolicy::Reject {
                return Err(ValidationError::CycleDetected(validated[slot].id.clone()));
            }
        }

        let reachable = Self::reachable_from(&graph, root_slot);
        let unreachable: Vec<usize> = (0..validated.len())
            .filter(|slot| !reachable.contains(slot))
            .collect();

        let tree = DecisionTree::assemble(validated, index, root_slot, unreachable, cycle_at.is_some());

        let report = tree.report();
        tracing::info!(
            root = %root,
            steps = report.step_count,
            options = report.option_count,
            "validated troubleshooting tree"
        );
        for orphan in &report.unreachable {
            tracing::warn!(step = %orphan, "step is not reachable from the root");
        }
        if report.has_cycle {
            tracing::warn!("tree contains a cycle; history may repeat steps");
        }

        Ok(tree)
    }

    /// Validate a loaded table, resolving the root by precedence
    ///
    /// # Errors
    /// See [`TreeValidator::validate`].
    pub fn validate_table(
        &self,
        table: &StepTable,
        root_override: Option<&StepId>,
    ) -> Result<DecisionTree, ValidationError> {
        let root = table.effective_root(root_override);
        self.validate(&table.steps, &root)
    }

    fn index_steps(steps: &[StepDefinition]) -> Result<HashMap<StepId, usize>, ValidationError> {
        let mut index = HashMap::with_capacity(steps.len());
        for (slot, def) in steps.iter().enumerate() {
            if index.insert(def.id.clone(), slot).is_some() {
                return Err(ValidationError::DuplicateStepId(def.id.clone()));
            }
        }
        Ok(index)
    }

    fn validate_step(
        def: &StepDefinition,
        index: &HashMap<StepId, usize>,
    ) -> Result<Step, ValidationError> {
        let body = match def.kind {
            StepKind::Question => {
                if def.options.is_empty() {
                    return Err(ValidationError::EmptyOptionList(def.id.clone()));
                }
                if def.solution.is_some() {
                    return Err(ValidationError::QuestionWithResolution(def.id.clone()));
                }

                let mut seen = HashSet::with_capacity(def.options.len());
                let mut options = Vec::with_capacity(def.options.len());
                for opt in &def.options {
                    if !seen.insert(&opt.id) {
                        return Err(ValidationError::DuplicateOptionId {
                            step_id: def.id.clone(),
                            option_id: opt.id.clone(),
                        });
                    }
                    let target = *index.get(&opt.next_step_id).ok_or_else(|| {
                        ValidationError::DanglingReference {
                            step_id: def.id.clone(),
                            option_id: opt.id.clone(),
                        }
                    })?;
                    options.push(StepOption {
                        id: opt.id.clone(),
                        label: opt.text.clone(),
                        next_step_id: opt.next_step_id.clone(),
                        target,
                    });
                }
                StepBody::Question { options }
            }
            StepKind::Solution | StepKind::Error => {
                if !def.options.is_empty() {
                    return Err(ValidationError::TerminalWithOptions(def.id.clone()));
                }
                let resolution = def
                    .solution
                    .clone()
                    .ok_or_else(|| ValidationError::MissingResolution(def.id.clone()))?;
                if def.kind == StepKind::Solution {
                    StepBody::Solution { resolution }
                } else {
                    StepBody::Error { resolution }
                }
            }
        };

        Ok(Step {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            body,
        })
    }

    fn build_graph(steps: &[Step]) -> DiGraphMap<usize, ()> {
        let mut graph = DiGraphMap::with_capacity(steps.len(), steps.len());
        for slot in 0..steps.len() {
            graph.add_node(slot);
        }
        for (slot, step) in steps.iter().enumerate() {
            for opt in step.options() {
                graph.add_edge(slot, opt.target, ());
            }
        }
        graph
    }

    /// Slot of some step on a directed cycle
    fn find_cycle(graph: &DiGraphMap<usize, ()>) -> Option<usize> {
        toposort(graph, None).err().map(|cycle| cycle.node_id())
    }

    fn reachable_from(graph: &DiGraphMap<usize, ()>, root: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut dfs = Dfs::new(graph, root);
        while let Some(slot) = dfs.next(graph) {
            seen.insert(slot);
        }
        seen
    }
}
