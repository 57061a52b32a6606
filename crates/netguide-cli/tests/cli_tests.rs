//! End-to-end command tests without a terminal

use netguide_cli::{build_cli, dispatch, env_filter, load_config, log_filter, session, Settings};
use netguide_navigator::{CyclePolicy, GuideConfig, StepDefinition, StepTable};
use netguide_test_utils::{scenario_navigator, scenario_steps, sid};
use pretty_assertions::assert_eq;
use std::io::{Cursor, Write};
use std::path::PathBuf;

fn run(args: &[&str], input: &str, config: &GuideConfig) -> anyhow::Result<String> {
    let matches = build_cli().try_get_matches_from(args)?;
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    dispatch(&matches, config, &mut input, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn scenario_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let table = StepTable::new(scenario_steps()).with_root("start");
    file.write_all(serde_json::to_string(&table).unwrap().as_bytes())
        .unwrap();
    file
}

#[test]
fn test_validate_built_in_guide() {
    let out = run(&["netguide", "validate"], "", &GuideConfig::default()).unwrap();
    assert!(out.contains("Root:        start"));
    assert!(out.contains("Cycles:      yes"));
    assert!(out.contains("Result:      VALID"));
}

#[test]
fn test_validate_json_report() {
    let file = scenario_file();
    let path = file.path().to_str().unwrap();
    let out = run(&["netguide", "validate", "--tree", path, "--json"], "", &GuideConfig::default()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["stepCount"], 5);
    assert_eq!(report["hasCycle"], false);
}

#[test]
fn test_validate_rejects_cycles_on_request() {
    let err = run(&["netguide", "validate", "--reject-cycles"], "", &GuideConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("cycle detected"));
}

#[test]
fn test_walk_reports_rejected_choices() {
    let file = scenario_file();
    let path = file.path().to_str().unwrap();
    let out = run(
        &[
            "netguide", "walk", "--tree", path, "--choose", "back", "--choose", "opt1", "--choose", "2",
            "--choose", "opt1",
        ],
        "",
        &GuideConfig::default(),
    )
    .unwrap();

    assert!(out.contains("! back: no previous step to return to"));
    assert!(out.contains("! opt1: step 'router-restart' is terminal"));
    assert!(out.contains("== Try Restarting Your Router =="));
    assert!(out.contains("Step 3 of troubleshooting process"));
}

#[test]
fn test_run_interactive_session() {
    let out = run(&["netguide", "run"], "1\nb\n1\n3\n3\nr\nq\n", &GuideConfig::default()).unwrap();

    assert!(out.contains("== What type of network issue are you experiencing? =="));
    assert!(out.contains("== Check Your Router Lights =="));
    assert!(out.contains("Step 4 of troubleshooting process"));
    assert!(out.contains("b = back"));
}

#[test]
fn test_run_stops_at_end_of_input() {
    let out = run(&["netguide", "run", "--root", "intermittent"], "", &GuideConfig::default()).unwrap();
    assert!(out.contains("[Complex issue detected]"));
    assert!(!out.contains("b = back"));
}

#[test]
fn test_interactive_diagnostics_leave_state() {
    let mut nav = scenario_navigator();
    let mut input = Cursor::new(b"9\nbogus\nb\n".to_vec());
    let mut out = Vec::new();
    session::run_interactive(&mut nav, &mut input, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("! ").count(), 3);
    assert_eq!(nav.current_step().id, sid("start"));
    assert_eq!(nav.history_len(), 0);
}

#[test]
fn test_settings_flags_override_config() {
    let config = GuideConfig::new()
        .with_tree("from-config.yaml")
        .with_root("start")
        .with_cycle_policy(CyclePolicy::Allow);

    let matches = build_cli()
        .try_get_matches_from(["netguide", "walk", "--root", "wifi-signal", "--reject-cycles"])
        .unwrap();
    let (_, args) = matches.subcommand().unwrap();
    let settings = Settings::resolve(&config, args);

    assert_eq!(settings.tree, Some(PathBuf::from("from-config.yaml")));
    assert_eq!(settings.root, Some(sid("wifi-signal")));
    assert_eq!(settings.cycle_policy, CyclePolicy::Reject);
}

#[test]
fn test_config_file_and_log_filter() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"log_filter = \"info\"\nroot = \"slow-connection\"\n").unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.root, Some(sid("slow-connection")));
    assert_eq!(log_filter(None, None, &config), "info");
    assert_eq!(log_filter(None, Some("trace"), &config), "trace");
    assert_eq!(log_filter(Some("debug"), Some("trace"), &config), "debug");
    assert_eq!(log_filter(None, None, &GuideConfig::default()), "warn");

    assert!(load_config(None).unwrap() == GuideConfig::default());
}

#[test]
fn test_walk_selects_numeric_option_ids_by_id() {
    let steps = vec![
        StepDefinition::question("start", "Which port?")
            .with_option("2", "Port two", "two")
            .with_option("1", "Port one", "one"),
        StepDefinition::solution("two", "Port Two Selected", "Reseat cable two"),
        StepDefinition::solution("one", "Port One Selected", "Reseat cable one"),
    ];
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let table = StepTable::new(steps).with_root("start");
    file.write_all(serde_json::to_string(&table).unwrap().as_bytes())
        .unwrap();
    let path = file.path().to_str().unwrap();

    let out = run(&["netguide", "walk", "--tree", path, "--choose", "2"], "", &GuideConfig::default()).unwrap();
    assert!(out.contains("== Port Two Selected =="));

    let out = run(&["netguide", "run", "--tree", path], "1\nq\n", &GuideConfig::default()).unwrap();
    assert!(out.contains("== Port One Selected =="));
    assert!(!out.contains("== Port Two Selected =="));
}

#[test]
fn test_invalid_log_filter_is_reported() {
    let mut notes = Vec::new();
    let _ = env_filter("netguide_navigator=loudest", &mut notes);
    let text = String::from_utf8(notes).unwrap();
    assert!(text.contains("invalid log filter 'netguide_navigator=loudest'"));
    assert!(text.contains("using 'warn'"));

    let mut notes = Vec::new();
    let _ = env_filter("netguide_navigator=debug", &mut notes);
    assert!(notes.is_empty());
}
