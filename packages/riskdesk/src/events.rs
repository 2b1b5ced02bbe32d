//! Interactive session event loop
//!
//! Reacts to two kinds of events on a single task: lines typed by the user
//! and analysis submissions resolving in the background. Every state change
//! re-renders the dashboard.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{AnalysisService, PortfolioUpload};
use crate::i18n::I18n;
use crate::state::{AnalysisState, WorkflowController};
use crate::theme::Theme;
use crate::views;

/// A parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Pick a file, as from a file dialog
    Open(PathBuf),
    /// Drop a file onto the dashboard
    Drop(PathBuf),
    Reset,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "open" | "o" if !rest.is_empty() => ShellCommand::Open(unquote(rest).into()),
            "drop" | "d" if !rest.is_empty() => ShellCommand::Drop(unquote(rest).into()),
            "reset" | "r" => ShellCommand::Reset,
            "status" | "s" => ShellCommand::Status,
            "help" | "h" | "?" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

/// Terminals paste dragged files as quoted paths
fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

/// One-word summary of the workflow state
pub fn status_label<'a>(state: &AnalysisState, i18n: &'a I18n) -> &'a str {
    match state {
        AnalysisState::Idle => i18n.t("status.idle"),
        AnalysisState::Loading { .. } => i18n.t("status.loading"),
        AnalysisState::Error(_) => i18n.t("status.error"),
        AnalysisState::Ready(_) => i18n.t("status.ready"),
    }
}

/// Run the interactive dashboard until `quit` or end of input
pub async fn run_shell<S: AnalysisService>(
    mut controller: WorkflowController<S>,
    i18n: &I18n,
    theme: &Theme,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!("Starting interactive session");
    redraw(&controller, i18n, theme);
    println!("{}", theme.text_muted.paint(&i18n.t("shell.help")));
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match ShellCommand::parse(&line) {
                    ShellCommand::Open(path) | ShellCommand::Drop(path) => {
                        submit_path(&mut controller, &path, i18n, theme).await;
                    }
                    ShellCommand::Reset => {
                        if controller.reset() {
                            redraw(&controller, i18n, theme);
                        } else if controller.state().is_loading() {
                            tracing::debug!(
                                submission = ?controller.current_submission(),
                                "Reset ignored while loading"
                            );
                            println!("{}", i18n.t("shell.reset_ignored"));
                        }
                    }
                    ShellCommand::Status => {
                        println!("{}", status_label(controller.state(), i18n));
                    }
                    ShellCommand::Help => println!("{}", i18n.t("shell.help")),
                    ShellCommand::Quit => break,
                    ShellCommand::Unknown(input) => {
                        println!("{}", i18n.format("shell.unknown", &[("command", &input)]));
                    }
                    ShellCommand::Empty => {}
                }
                prompt();
            }
            applied = controller.next_completion() => {
                if applied {
                    redraw(&controller, i18n, theme);
                    prompt();
                }
            }
        }
    }

    tracing::info!("Interactive session ended");
    Ok(())
}

/// Read a picked or dropped file and hand it to the controller.
///
/// A file that cannot be read never becomes a submission.
async fn submit_path<S: AnalysisService>(
    controller: &mut WorkflowController<S>,
    path: &Path,
    i18n: &I18n,
    theme: &Theme,
) {
    match PortfolioUpload::from_path(path).await {
        Ok(upload) => {
            if upload.is_empty() {
                tracing::warn!("{} is empty", path.display());
            }
            controller.submit(upload);
            redraw(controller, i18n, theme);
        }
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", path.display(), e);
            let message = i18n.format(
                "shell.open_failed",
                &[("path", &path.display().to_string()), ("error", &e.to_string())],
            );
            println!("{}", theme.error.paint(&message));
        }
    }
}

fn redraw<S: AnalysisService>(controller: &WorkflowController<S>, i18n: &I18n, theme: &Theme) {
    println!();
    print!("{}", views::render(controller.state(), i18n, theme));
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
