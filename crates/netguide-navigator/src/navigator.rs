//! Session navigator
//!
//! A [`Navigator`] walks one [`DecisionTree`] for one user. State is a cursor
//! slot plus a history stack of slots:
//!
//! - `select` pushes the current slot and moves to the option's target
//! - `back` pops into the current slot
//! - `restart` clears history and returns to the session root
//!
//! Every failed operation leaves cursor and history untouched. Terminal steps
//! reject `select` but still accept `back` and `restart`.

use crate::definition::StepDefinition;
use crate::error::{NavigationError, ValidationError};
use crate::step::{OptionId, Step, StepId, StepOption};
use crate::tree::DecisionTree;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Snapshot of a session position, for presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorState {
    /// Active step
    pub current_step_id: StepId,
    /// Previously visited steps, oldest first
    pub history: Vec<StepId>,
}

/// Position within the troubleshooting process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// One-based step number: history length plus one
    pub step_number: usize,
    /// Current step is a solution or error
    pub at_resolution: bool,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of troubleshooting process", self.step_number)
    }
}

/// Undoable walker over a validated decision tree
#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Arc<DecisionTree>,
    root: usize,
    current: usize,
    history: Vec<usize>,
}

impl Navigator {
    /// Validate `steps` and start a session at `root`
    ///
    /// # Errors
    /// Any [`ValidationError`]; no navigator is produced.
    pub fn initialize(steps: &[StepDefinition], root: &StepId) -> Result<Self, ValidationError> {
        let tree = DecisionTree::build(steps, root)?;
        Ok(Self::from_tree(Arc::new(tree)))
    }

    /// Start a session at the tree's designated root
    #[must_use]
    pub fn from_tree(tree: Arc<DecisionTree>) -> Self {
        let root = tree.root_slot();
        Self {
            tree,
            root,
            current: root,
            history: Vec::new(),
        }
    }

    /// Start a session at another step; `restart` returns there
    ///
    /// # Errors
    /// [`NavigationError::UnknownStep`] if the tree has no such step.
    pub fn starting_at(tree: Arc<DecisionTree>, step_id: &StepId) -> Result<Self, NavigationError> {
        let root = tree
            .slot_of(step_id)
            .ok_or_else(|| NavigationError::UnknownStep(step_id.clone()))?;
        Ok(Self {
            tree,
            root,
            current: root,
            history: Vec::new(),
        })
    }

    /// Active step
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> &Step {
        self.tree.step_at(self.current)
    }

    /// Options of the active step; empty at a terminal step
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[StepOption] {
        self.current_step().options()
    }

    /// Follow an option of the active question
    ///
    /// # Errors
    /// - [`NavigationError::NoOptionsAtTerminal`] at a solution or error step
    /// - [`NavigationError::UnknownOption`] if the step has no such option
    pub fn select(&mut self, option_id: &OptionId) -> Result<(), NavigationError> {
        let step = self.current_step();
        if step.is_terminal() {
            tracing::debug!(step = %step.id, option = %option_id, "select rejected at terminal step");
            return Err(NavigationError::NoOptionsAtTerminal(step.id.clone()));
        }

        let target = step
            .option(option_id)
            .map(|opt| opt.target)
            .ok_or_else(|| {
                tracing::debug!(step = %step.id, option = %option_id, "select rejected: unknown option");
                NavigationError::UnknownOption {
                    step_id: step.id.clone(),
                    option_id: option_id.clone(),
                }
            })?;

        self.history.push(self.current);
        self.current = target;
        tracing::debug!(
            option = %option_id,
            to = %self.current_step().id,
            depth = self.history.len(),
            "advanced"
        );
        Ok(())
    }

    /// Follow the option at a zero-based position
    ///
    /// # Errors
    /// As [`Navigator::select`]; an out-of-range position is an unknown option.
    pub fn select_index(&mut self, position: usize) -> Result<(), NavigationError> {
        let step = self.current_step();
        if step.is_terminal() {
            return Err(NavigationError::NoOptionsAtTerminal(step.id.clone()));
        }
        let option_id = step
            .options()
            .get(position)
            .map(|opt| opt.id.clone())
            .ok_or_else(|| NavigationError::UnknownOption {
                step_id: step.id.clone(),
                option_id: OptionId::new(format!("#{}", position.saturating_add(1))),
            })?;
        self.select(&option_id)
    }

    /// Return to the previous step
    ///
    /// # Errors
    /// [`NavigationError::NoHistory`] when nothing has been selected since the
    /// session started or restarted.
    pub fn back(&mut self) -> Result<(), NavigationError> {
        let previous = self.history.pop().ok_or_else(|| {
            tracing::debug!(step = %self.current_step().id, "back rejected: empty history");
            NavigationError::NoHistory
        })?;
        self.current = previous;
        tracing::debug!(to = %self.current_step().id, depth = self.history.len(), "stepped back");
        Ok(())
    }

    /// Clear history and return to the session root
    pub fn restart(&mut self) {
        self.history.clear();
        self.current = self.root;
        tracing::debug!(to = %self.current_step().id, "restarted");
    }

    /// Clear history and return to `step_id`; later restarts still use the session root
    ///
    /// # Errors
    /// [`NavigationError::UnknownStep`] if the tree has no such step.
    pub fn restart_at(&mut self, step_id: &StepId) -> Result<(), NavigationError> {
        let slot = self
            .tree
            .slot_of(step_id)
            .ok_or_else(|| NavigationError::UnknownStep(step_id.clone()))?;
        self.history.clear();
        self.current = slot;
        tracing::debug!(to = %step_id, "restarted at explicit step");
        Ok(())
    }

    /// True when `back` would succeed
    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// True when the active step is a solution or error
    #[inline]
    #[must_use]
    pub fn is_at_terminal(&self) -> bool {
        self.current_step().is_terminal()
    }

    /// Visited step ids, oldest first
    pub fn history(&self) -> impl Iterator<Item = &StepId> + '_ {
        self.history.iter().map(|&slot| &self.tree.step_at(slot).id)
    }

    /// Number of steps on the history stack
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Session root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Step {
        self.tree.step_at(self.root)
    }

    /// Shared tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &Arc<DecisionTree> {
        &self.tree
    }

    /// Progress indicator for display
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            step_number: self.history.len() + 1,
            at_resolution: self.is_at_terminal(),
        }
    }

    /// Owned snapshot of the session position
    #[must_use]
    pub fn snapshot(&self) -> NavigatorState {
        NavigatorState {
            current_step_id: self.current_step().id.clone(),
            history: self.history().cloned().collect(),
        }
    }
}
