//! NetGuide command line front end
//!
//! Argument parsing, settings resolution and the three subcommands
//! (`validate`, `walk`, `run`). `main.rs` only wires these to the process.

pub mod session;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use netguide_navigator::{
    catalog, load_tree, CyclePolicy, DecisionTree, FileSource, GuideConfig, Navigator, StepId,
    StepSource, ValidationContext,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the argument parser
#[must_use]
pub fn build_cli() -> Command {
    let tree_args = [
        Arg::new("tree")
            .long("tree")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Step table file (.json, .yaml, .yml, .toml); defaults to the built-in guide"),
        Arg::new("root")
            .long("root")
            .help("Start at this step instead of the table's root"),
        Arg::new("reject-cycles")
            .long("reject-cycles")
            .action(ArgAction::SetTrue)
            .help("Fail validation if the tree contains a loop"),
    ];

    Command::new("netguide")
        .version(netguide_navigator::VERSION)
        .about("Guided network troubleshooting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("tracing filter, e.g. debug or netguide_navigator=trace"),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a troubleshooting tree and print its report")
                .args(tree_args.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("walk")
                .about("Apply a scripted sequence of choices and print where it ends")
                .args(tree_args.clone())
                .arg(
                    Arg::new("choose")
                        .long("choose")
                        .action(ArgAction::Append)
                        .help("Option id or number; 'back' and 'restart' are also accepted"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Start an interactive troubleshooting session")
                .args(tree_args),
        )
}

/// Where the tree comes from and how it is validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Step table file; built-in guide when `None`
    pub tree: Option<PathBuf>,
    /// Root override
    pub root: Option<StepId>,
    /// Cycle handling
    pub cycle_policy: CyclePolicy,
}

impl Settings {
    /// Merge config file values with command line flags; flags win
    #[must_use]
    pub fn resolve(config: &GuideConfig, args: &ArgMatches) -> Self {
        let cycle_policy = if args.get_flag("reject-cycles") {
            CyclePolicy::Reject
        } else {
            config.cycle_policy
        };
        Self {
            tree: args
                .get_one::<PathBuf>("tree")
                .cloned()
                .or_else(|| config.tree.clone()),
            root: args
                .get_one::<String>("root")
                .map(|r| StepId::from(r.as_str()))
                .or_else(|| config.root.clone()),
            cycle_policy,
        }
    }

    /// Load and validate the configured tree
    ///
    /// # Errors
    /// Load or validation failures, with the source named in the context.
    pub fn load_tree(&self) -> Result<DecisionTree> {
        let context = ValidationContext {
            cycle_policy: self.cycle_policy,
        };
        let source: Box<dyn StepSource> = match &self.tree {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(catalog::network_source()),
        };
        load_tree(source.as_ref(), context, self.root.as_ref())
            .with_context(|| format!("cannot start a guided session from {}", source.describe()))
    }
}

/// Read the config file if one was given
///
/// # Errors
/// Read or parse failures of an explicitly named file.
pub fn load_config(path: Option<&Path>) -> Result<GuideConfig> {
    match path {
        Some(path) => GuideConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GuideConfig::default()),
    }
}

/// Pick the log filter: flag, then `RUST_LOG`, then config, then [`DEFAULT_LOG_FILTER`]
#[must_use]
pub fn log_filter(flag: Option<&str>, env: Option<&str>, config: &GuideConfig) -> String {
    flag.or(env)
        .or(config.log_filter.as_deref())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string()
}

/// Parse a filter directive, falling back to [`DEFAULT_LOG_FILTER`]
///
/// A rejected directive is reported on `notes` so typos stay visible.
pub fn env_filter(filter: &str, notes: &mut impl Write) -> EnvFilter {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => env_filter,
        Err(err) => {
            let _ = writeln!(
                notes,
                "warning: invalid log filter '{filter}' ({err}); using '{DEFAULT_LOG_FILTER}'"
            );
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    }
}

/// Install the global subscriber, writing to stderr
pub fn init_tracing(filter: &str) {
    let filter_layer = env_filter(filter, &mut std::io::stderr());
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter_layer)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: tracing already initialised: {err}");
    }
}

/// `validate` subcommand
///
/// # Errors
/// Load/validation failures and write errors.
pub fn cmd_validate(settings: &Settings, json: bool, out: &mut impl Write) -> Result<()> {
    let tree = settings.load_tree()?;
    let report = tree.report();

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Troubleshooting Tree Report")?;
    writeln!(out, "===========================")?;
    writeln!(out, "Root:        {}", report.root)?;
    writeln!(out, "Steps:       {}", report.step_count)?;
    writeln!(out, "  questions: {}", report.question_count)?;
    writeln!(out, "  solutions: {}", report.solution_count)?;
    writeln!(out, "  errors:    {}", report.error_count)?;
    writeln!(out, "Options:     {}", report.option_count)?;
    writeln!(out, "Cycles:      {}", if report.has_cycle { "yes" } else { "no" })?;
    if report.unreachable.is_empty() {
        writeln!(out, "Unreachable: none")?;
    } else {
        let names: Vec<&str> = report.unreachable.iter().map(StepId::as_str).collect();
        writeln!(out, "Unreachable: {}", names.join(", "))?;
    }
    writeln!(out, "Result:      VALID")?;
    Ok(())
}

/// `walk` subcommand
///
/// Rejected choices are reported and skipped.
///
/// # Errors
/// Load/validation failures and write errors.
pub fn cmd_walk(settings: &Settings, choices: &[String], out: &mut impl Write) -> Result<()> {
    let mut nav = Navigator::from_tree(Arc::new(settings.load_tree()?));
    for choice in choices {
        let Some(cmd) = session::Command::parse(choice, nav.current_step()) else {
            continue;
        };
        if let Err(err) = cmd.apply(&mut nav) {
            writeln!(out, "! {choice}: {err}")?;
        }
    }
    session::render(&nav, out)?;
    Ok(())
}

/// `run` subcommand
///
/// # Errors
/// Load/validation failures and I/O errors.
pub fn cmd_run(settings: &Settings, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut nav = Navigator::from_tree(Arc::new(settings.load_tree()?));
    session::run_interactive(&mut nav, input, out)?;
    Ok(())
}

/// Dispatch parsed arguments
///
/// # Errors
/// Anything the selected subcommand reports.
pub fn dispatch(
    matches: &ArgMatches,
    config: &GuideConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match matches.subcommand() {
        Some(("validate", args)) => {
            cmd_validate(&Settings::resolve(config, args), args.get_flag("json"), out)
        }
        Some(("walk", args)) => {
            let choices: Vec<String> = args
                .get_many::<String>("choose")
                .map(|vals| vals.cloned().collect())
                .unwrap_or_default();
            cmd_walk(&Settings::resolve(config, args), &choices, out)
        }
        Some(("run", args)) => cmd_run(&Settings::resolve(config, args), input, out),
        _ => Ok(()),
    }
}
