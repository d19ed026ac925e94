//! Step outputs and failure annotations for the workflow runner.

use std::io::Write;

/// Set a step output: appended to `$GITHUB_OUTPUT` when present, printed otherwise.
pub(crate) fn set_output(name: &str, value: &str) -> anyhow::Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            writeln!(file, "{name}={value}")?;
            tracing::debug!(name, value, "step output written");
        }
        _ => println!("{name}={value}"),
    }
    Ok(())
}

/// Surface a fatal error through the runner's annotation channel.
pub fn report_failure(error: &anyhow::Error) {
    if running_in_actions() {
        // Workflow commands are single-line; escape per the runner's rules.
        println!("::error::{}", escape_data(&format!("{error:#}")));
    }
}

fn running_in_actions() -> bool {
    // arch-lint: allow(no-silent-result-drop) reason="an unset variable means we are not inside a runner"
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
