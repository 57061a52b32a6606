//! Testing utilities for NetGuide workspace
//!
//! Shared fixtures, tree builders, and assertions.

#![allow(missing_docs)]

use netguide_navigator::{
    DecisionTree, Navigator, OptionId, StepDefinition, StepId, StepTable, TreeValidator,
};
use std::sync::Arc;

/// Root step id used by every fixture
pub const ROOT: &str = "start";

/// Tree from the navigation walkthrough: start -> internet-issue -> router-restart
pub fn scenario_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::question(ROOT, "What type of network issue are you experiencing?")
            .with_option("opt1", "Cannot connect to the internet", "internet-issue")
            .with_option("opt2", "Slow connection speeds", "slow-connection"),
        StepDefinition::question("internet-issue", "Internet Connection Troubleshooting")
            .with_option("opt1", "Lights are off", "router-power")
            .with_option("opt2", "Lights are normal", "router-restart"),
        StepDefinition::solution("router-power", "Power Issue Detected", "Check the power"),
        StepDefinition::solution("router-restart", "Try Restarting Your Router", "Unplug, wait, replug"),
        StepDefinition::error("slow-connection", "Slow Connection", "Contact your ISP"),
    ]
}

/// `len` questions in a row, each with a single `next` option, ending in a solution
pub fn linear_chain(len: usize) -> Vec<StepDefinition> {
    let name = |i: usize| if i == 0 { ROOT.to_string() } else { format!("q{i}") };
    let mut steps: Vec<StepDefinition> = (0..len)
        .map(|i| {
            let next = if i + 1 == len { "end".to_string() } else { name(i + 1) };
            StepDefinition::question(name(i), format!("Question {i}")).with_option("next", "Next", next)
        })
        .collect();
    steps.push(StepDefinition::solution("end", "Done", "Resolved"));
    steps
}

/// Two questions pointing at each other through `again`, with an exit to a solution
pub fn retry_loop() -> Vec<StepDefinition> {
    vec![
        StepDefinition::question(ROOT, "Did restarting help?")
            .with_option("again", "No, try again", "retry")
            .with_option("yes", "Yes", "fixed"),
        StepDefinition::question("retry", "Restart once more")
            .with_option("again", "Done, check again", ROOT)
            .with_option("give-up", "Give up", "escalate"),
        StepDefinition::solution("fixed", "Fixed", "Enjoy"),
        StepDefinition::error("escalate", "Escalate", "Call support"),
    ]
}

/// Validate steps rooted at [`ROOT`]; panics on invalid fixtures
pub fn tree_from(steps: &[StepDefinition]) -> Arc<DecisionTree> {
    let table = StepTable::new(steps.to_vec()).with_root(ROOT);
    Arc::new(
        TreeValidator::new()
            .validate_table(&table, None)
            .expect("fixture tree must be valid"),
    )
}

/// Fresh navigator over the walkthrough tree
pub fn scenario_navigator() -> Navigator {
    Navigator::from_tree(tree_from(&scenario_steps()))
}

/// Shorthand for option ids
pub fn opt(id: &str) -> OptionId {
    OptionId::from(id)
}

/// Shorthand for step ids
pub fn sid(id: &str) -> StepId {
    StepId::from(id)
}

/// History as plain strings, oldest first
pub fn history_of(nav: &Navigator) -> Vec<String> {
    nav.history().map(|id| id.as_str().to_string()).collect()
}

/// Assert current step id and full history
pub fn assert_position(nav: &Navigator, current: &str, history: &[&str]) {
    assert_eq!(nav.current_step().id.as_str(), current, "current step");
    assert_eq!(history_of(nav), history, "history");
}
