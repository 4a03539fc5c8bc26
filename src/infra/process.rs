//! External command execution
//!
//! Runs build commands with captured output. In dry-run mode the command
//! line is logged and reported as successful without being spawned.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::config::defaults::OUTPUT_TAIL_LINES;

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status was zero (always true in dry-run)
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Captured stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    fn dry_run() -> Self {
        Self {
            success: true,
            code: Some(0),
            output: String::new(),
        }
    }

    /// Last lines of the captured output
    pub fn tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self.output.lines().collect();
        all[all.len().saturating_sub(lines)..].join("\n")
    }
}

/// Check if a command is available on `PATH`
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Quote one argument for display in a POSIX shell
pub fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%_=+,-./:".contains(c))
    {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Render an argument vector as a copy-pasteable command line
pub fn readable_cmd(cmd: &[String]) -> String {
    cmd.iter()
        .map(|part| shell_quote(part))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `cmd` in `cwd`, or only log it when `dry_run` is set
pub fn run_command(cmd: &[String], cwd: Option<&Path>, dry_run: bool) -> io::Result<CommandOutput> {
    let Some((program, args)) = cmd.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    match cwd {
        Some(dir) => tracing::info!("→ {} (cwd={})", readable_cmd(cmd), dir.display()),
        None => tracing::info!("→ {}", readable_cmd(cmd)),
    }

    if dry_run {
        return Ok(CommandOutput::dry_run());
    }

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    for line in text.lines() {
        tracing::debug!("  {line}");
    }
    if !output.status.success() {
        tracing::warn!(
            "Command exited with {}: {}",
            output.status,
            readable_cmd(cmd)
        );
    }

    Ok(CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        output: text,
    })
}

/// Human-readable explanation of a failed command
pub fn failure_details(cmd: &[String], result: &CommandOutput) -> String {
    let mut details = match result.code {
        Some(code) => format!("`{}` exited with code {code}", readable_cmd(cmd)),
        None => format!("`{}` was terminated by a signal", readable_cmd(cmd)),
    };
    let tail = result.tail(OUTPUT_TAIL_LINES);
    if !tail.is_empty() {
        details.push('\n');
        details.push_str(&tail);
    }
    details
}
