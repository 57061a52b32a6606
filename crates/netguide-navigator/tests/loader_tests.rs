//! Loading step tables from files

use netguide_navigator::{
    catalog, load_tree, CyclePolicy, FileSource, GuideConfig, GuideError, LoadError, Navigator,
    StepSource, StepTable, ValidationContext, ValidationError,
};
use netguide_test_utils::{opt, scenario_steps, sid};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_json_round_trip_through_file() {
    let table = StepTable::new(scenario_steps()).with_root("start");
    let file = write_temp(".json", &serde_json::to_string_pretty(&table).unwrap());

    let loaded = FileSource::new(file.path()).load().unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn test_yaml_file_drives_a_session() {
    let yaml = "
root: begin
steps:
  - id: begin
    type: question
    title: Can you reach the router page?
    options:
      - id: 'yes'
        text: 'Yes'
        nextStepId: isp
      - id: 'no'
        label: 'No'
        nextStepId: cable
  - id: isp
    type: error
    title: ISP outage
    solution: Call your provider
  - id: cable
    type: solution
    title: Check cables
    resolution: Reseat the Ethernet cable
";
    let file = write_temp(".yaml", yaml);
    let tree = load_tree(&FileSource::new(file.path()), ValidationContext::default(), None).unwrap();
    let mut nav = Navigator::from_tree(Arc::new(tree));

    assert_eq!(nav.current_step().id.as_str(), "begin");
    nav.select(&opt("no")).unwrap();
    assert_eq!(nav.current_step().resolution(), Some("Reseat the Ethernet cable"));
}

#[test]
fn test_root_override_wins() {
    let table = StepTable::new(scenario_steps()).with_root("start");
    let file = write_temp(".json", &serde_json::to_string(&table).unwrap());

    let tree = load_tree(
        &FileSource::new(file.path()),
        ValidationContext::default(),
        Some(&sid("internet-issue")),
    )
    .unwrap();
    assert_eq!(tree.root_step().id.as_str(), "internet-issue");
    assert_eq!(tree.report().unreachable, vec![sid("start"), sid("slow-connection")]);
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let file = write_temp(".json", "{ not json");
    let err = load_tree(&FileSource::new(file.path()), ValidationContext::default(), None).unwrap_err();
    assert!(matches!(err, GuideError::Load(LoadError::Json(_))));
    assert!(err.is_configuration_error());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = FileSource::new(&path).load().unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_config_selects_cycle_policy() {
    let file = write_temp(".toml", "cycle_policy = \"reject\"\n");
    let config = GuideConfig::load(file.path()).unwrap();
    assert_eq!(config.cycle_policy, CyclePolicy::Reject);

    let err = load_tree(&catalog::network_source(), config.validation_context(), None).unwrap_err();
    assert!(matches!(err, GuideError::Validation(ValidationError::CycleDetected(_))));
}
