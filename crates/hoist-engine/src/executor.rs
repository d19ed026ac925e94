use crate::command::redact_args;
use crate::exec::ExecError;
use std::process::Stdio;

/// Abstraction over external CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Execute a command and capture stdout.
    async fn exec(&self, program: &str, args: &[String]) -> Result<String, ExecError>;

    /// Execute a command, streaming output to the terminal.
    async fn exec_streaming(&self, program: &str, args: &[String]) -> Result<(), ExecError>;

    /// Execute a command with data piped to stdin.
    async fn exec_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, ExecError>;
}

/// Spawns real child processes.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn exec(&self, program: &str, args: &[String]) -> Result<String, ExecError> {
        tracing::debug!(program, args = ?redact_args(args), "exec");

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| not_found(program, e))?;

        captured(program, args, output)
    }

    async fn exec_streaming(&self, program: &str, args: &[String]) -> Result<(), ExecError> {
        tracing::debug!(program, args = ?redact_args(args), "exec (streaming)");

        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| not_found(program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::CommandFailed {
                program: program.to_owned(),
                args: redact_args(args),
                stderr: format!("exit code: {status}"),
            })
        }
    }

    async fn exec_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, ExecError> {
        use tokio::io::AsyncWriteExt;

        tracing::debug!(program, args = ?redact_args(args), "exec (stdin)");

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| not_found(program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(stdin_data)
                .await
                .map_err(|e| stdin_write(program, e))?;
            stdin
                .shutdown()
                .await
                .map_err(|e| stdin_write(program, e))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| not_found(program, e))?;

        captured(program, args, output)
    }
}

fn captured(
    program: &str,
    args: &[String],
    output: std::process::Output,
) -> Result<String, ExecError> {
    if output.status.success() {
        String::from_utf8(output.stdout).map_err(|e| ExecError::InvalidUtf8 {
            program: program.to_owned(),
            source: e,
        })
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        Err(ExecError::CommandFailed {
            program: program.to_owned(),
            args: redact_args(args),
            stderr,
        })
    }
}

fn not_found(program: &str, source: std::io::Error) -> ExecError {
    ExecError::NotFound {
        program: program.to_owned(),
        source,
    }
}

fn stdin_write(program: &str, source: std::io::Error) -> ExecError {
    ExecError::StdinWrite {
        program: program.to_owned(),
        source,
    }
}
