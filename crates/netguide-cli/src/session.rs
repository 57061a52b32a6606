//! Terminal rendering and the interactive loop
//!
//! Written against `BufRead`/`Write` so sessions can be driven from tests.

use netguide_navigator::{NavigationError, Navigator, OptionId, Step, StepKind};
use std::io::{self, BufRead, Write};

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One-based option number
    Number(usize),
    /// Option id
    Option(OptionId),
    /// Step back
    Back,
    /// Start over
    Restart,
    /// Leave the session
    Quit,
}

impl Command {
    /// Parse a line typed at `step`; `None` for blank input
    ///
    /// An option id offered by `step` wins over keywords and option numbers.
    #[must_use]
    pub fn parse(line: &str, step: &Step) -> Option<Self> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        let id = OptionId::from(word);
        if step.option(&id).is_some() {
            return Some(Self::Option(id));
        }
        let cmd = match word.to_ascii_lowercase().as_str() {
            "b" | "back" => Self::Back,
            "r" | "restart" => Self::Restart,
            "q" | "quit" | "exit" => Self::Quit,
            _ => match word.parse::<usize>() {
                Ok(n) => Self::Number(n),
                Err(_) => Self::Option(OptionId::from(word)),
            },
        };
        Some(cmd)
    }

    /// Apply to a navigator; `Quit` is a no-op here
    ///
    /// # Errors
    /// Whatever the navigator rejects.
    pub fn apply(&self, nav: &mut Navigator) -> Result<(), NavigationError> {
        match self {
            Self::Number(n) => match n.checked_sub(1) {
                Some(position) => nav.select_index(position),
                None => Err(NavigationError::UnknownOption {
                    step_id: nav.current_step().id.clone(),
                    option_id: OptionId::from("#0"),
                }),
            },
            Self::Option(id) => nav.select(id),
            Self::Back => nav.back(),
            Self::Restart => {
                nav.restart();
                Ok(())
            }
            Self::Quit => Ok(()),
        }
    }
}

/// Render the current step
///
/// # Errors
/// Write failures.
pub fn render(nav: &Navigator, out: &mut impl Write) -> io::Result<()> {
    let step = nav.current_step();
    writeln!(out)?;
    writeln!(out, "== {} ==", step.title)?;
    if !step.description.is_empty() {
        writeln!(out, "{}", step.description)?;
    }
    render_body(step, out)?;
    writeln!(out, "{}", nav.progress())?;
    Ok(())
}

fn render_body(step: &Step, out: &mut impl Write) -> io::Result<()> {
    match step.kind() {
        StepKind::Question => {
            for (i, opt) in step.options().iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, opt.label)?;
            }
        }
        StepKind::Solution => {
            writeln!(out, "[Solution found] Follow these steps to resolve your issue.")?;
            writeln!(out, "{}", step.resolution().unwrap_or_default())?;
            writeln!(
                out,
                "Still having issues? Try the diagnostic tools or ask the community."
            )?;
        }
        StepKind::Error => {
            writeln!(out, "[Complex issue detected] This issue may require advanced troubleshooting.")?;
            writeln!(out, "{}", step.resolution().unwrap_or_default())?;
        }
    }
    Ok(())
}

fn prompt(nav: &Navigator) -> String {
    let mut parts = Vec::new();
    if !nav.is_at_terminal() {
        parts.push("option number or id");
    }
    if nav.can_go_back() {
        parts.push("b = back");
    }
    parts.push("r = restart");
    parts.push("q = quit");
    format!("[{}] > ", parts.join(", "))
}

/// Run an interactive session until `q` or end of input
///
/// Rejected commands print a diagnostic and leave the session where it was.
///
/// # Errors
/// I/O failures on `input` or `out`.
pub fn run_interactive(
    nav: &mut Navigator,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    render(nav, out)?;
    loop {
        write!(out, "{}", prompt(nav))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let Some(cmd) = Command::parse(&line, nav.current_step()) else {
            continue;
        };
        if cmd == Command::Quit {
            return Ok(());
        }
        match cmd.apply(nav) {
            Ok(()) => render(nav, out)?,
            Err(err) => {
                tracing::debug!(error = %err, "command rejected");
                writeln!(out, "! {err}")?;
            }
        }
    }
}
