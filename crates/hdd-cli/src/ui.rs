use std::io::{IsTerminal, Write};
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
    pub interactive: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stdin().is_terminal(),
    ));
}

fn prefs_for(flags: &GlobalFlags, stdout_tty: bool, stdin_tty: bool) -> UiPrefs {
    UiPrefs {
        progress: stdout_tty && !flags.quiet && flags.format != OutputFormat::Json,
        interactive: stdin_tty && stdout_tty,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        interactive: false,
    })
}

/// Ask a question on stderr and read one trimmed line from stdin.
///
/// Returns `None` without prompting when the session is not interactive or
/// the answer is blank.
pub fn prompt(question: &str) -> anyhow::Result<Option<String>> {
    if !prefs().interactive {
        return Ok(None);
    }
    eprint!("{question}: ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}
