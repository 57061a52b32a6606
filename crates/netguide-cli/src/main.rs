//! `netguide` binary entry point

use netguide_cli::{build_cli, dispatch, init_tracing, load_config, log_filter};
use netguide_navigator::GuideError;
use std::path::PathBuf;

fn main() {
    let matches = build_cli().get_matches();
    let sub = matches.subcommand().map_or(&matches, |(_, args)| args);

    let config = match load_config(sub.get_one::<PathBuf>("config").map(PathBuf::as_path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    };

    let env = std::env::var("RUST_LOG").ok();
    init_tracing(&log_filter(
        sub.get_one::<String>("log-level").map(String::as_str),
        env.as_deref(),
        &config,
    ));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    if let Err(err) = dispatch(&matches, &config, &mut input, &mut out) {
        tracing::error!(error = %format!("{err:#}"), "session aborted");
        let is_config = err
            .downcast_ref::<GuideError>()
            .is_some_and(GuideError::is_configuration_error);
        if is_config {
            eprintln!("Configuration error: {err:#}");
        } else {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}
