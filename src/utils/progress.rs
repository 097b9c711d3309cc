//! Progress indicators and status output
//!
//! Every long-running workflow step gets its own spinner from a [`Reporter`]
//! handed down by the command. Nothing here is process-global: the reporter
//! is a small `Copy` value carrying the [`OutputMode`], and each step owns the
//! [`ProgressBar`] it created until it finishes it.
//!
//! # Output Modes
//!
//! - [`OutputMode::Animated`]: braille-dot spinners on an interactive terminal
//! - [`OutputMode::Plain`]: one line when a step starts and one when it ends, for
//!   pipes, CI logs and `--no-progress`
//! - [`OutputMode::Silent`]: nothing but errors (`--quiet`)
//!
//! # Examples
//!
//! ```rust,no_run
//! use svelte_accmod_patch::utils::progress::{OutputMode, Reporter};
//!
//! let reporter = Reporter::new(OutputMode::Plain);
//! let spinner = reporter.step("installing svelte-accmod@4.0.0 ...");
//! // ... run npm ...
//! spinner.succeed("installed svelte-accmod@4.0.0 ...");
//! ```

use colored::Colorize;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::io::IsTerminal;
use std::time::Duration;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How status output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Animated spinners (interactive terminal)
    #[default]
    Animated,
    /// Plain status lines, no cursor movement
    Plain,
    /// No status output at all
    Silent,
}

impl OutputMode {
    /// Pick a mode from the CLI flags and whether stdout is a terminal.
    ///
    /// `quiet` wins over everything; `no_progress` or a non-TTY stdout fall
    /// back to plain lines.
    #[must_use]
    pub fn detect(quiet: bool, no_progress: bool) -> Self {
        Self::from_flags(quiet, no_progress, std::io::stdout().is_terminal())
    }

    #[must_use]
    pub const fn from_flags(quiet: bool, no_progress: bool, is_terminal: bool) -> Self {
        if quiet {
            Self::Silent
        } else if no_progress || !is_terminal {
            Self::Plain
        } else {
            Self::Animated
        }
    }
}

/// A single-step spinner that knows how to render itself in every [`OutputMode`].
///
/// In [`OutputMode::Animated`] this wraps an `indicatif` spinner. In the other
/// modes the inner bar is hidden and the finishing calls print plain lines
/// instead (or nothing, when silent).
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
    mode: OutputMode,
}

impl ProgressBar {
    /// Create and start a spinner showing `msg`.
    pub fn new_spinner(mode: OutputMode, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let inner = match mode {
            OutputMode::Animated => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(spinner_style());
                bar.set_message(msg);
                bar.enable_steady_tick(Duration::from_millis(80));
                bar
            }
            OutputMode::Plain => {
                println!("- {msg}");
                IndicatifBar::hidden()
            }
            OutputMode::Silent => IndicatifBar::hidden(),
        };
        Self {
            inner,
            mode,
        }
    }

    /// Print a line above the spinner without disturbing it.
    pub fn println(&self, line: impl AsRef<str>) {
        match self.mode {
            OutputMode::Animated => self.inner.println(line.as_ref()),
            OutputMode::Plain => println!("{}", line.as_ref()),
            OutputMode::Silent => {}
        }
    }

    /// Print an error line above the spinner. Shown in every mode except silent.
    pub fn eprintln(&self, line: impl AsRef<str>) {
        match self.mode {
            OutputMode::Animated => self.inner.suspend(|| eprintln!("{}", line.as_ref())),
            OutputMode::Plain => eprintln!("{}", line.as_ref()),
            OutputMode::Silent => {}
        }
    }

    /// Finish with a green check mark.
    pub fn succeed(&self, msg: impl Into<String>) {
        self.finish_with_symbol(&"✔".green().to_string(), msg.into(), false);
    }

    /// Finish with a red cross.
    pub fn fail(&self, msg: impl Into<String>) {
        self.finish_with_symbol(&"✖".red().to_string(), msg.into(), true);
    }

    /// Finish with an informational marker.
    pub fn info(&self, msg: impl Into<String>) {
        self.finish_with_symbol(&"ℹ".blue().to_string(), msg.into(), false);
    }

    fn finish_with_symbol(&self, symbol: &str, msg: String, is_error: bool) {
        match self.mode {
            OutputMode::Animated => {
                self.inner.set_style(finished_style());
                self.inner.finish_with_message(format!("{symbol} {msg}"));
            }
            OutputMode::Plain if is_error => eprintln!("{symbol} {msg}"),
            OutputMode::Plain => println!("{symbol} {msg}"),
            OutputMode::Silent => self.inner.finish_and_clear(),
        }
    }
}

/// Hands out one [`ProgressBar`] per workflow step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    mode: OutputMode,
}

impl Reporter {
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self {
            mode,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start a spinner for one step.
    pub fn step(&self, msg: impl Into<String>) -> ProgressBar {
        ProgressBar::new_spinner(self.mode, msg)
    }

    /// Print a status line (suppressed when silent).
    pub fn message(&self, msg: impl AsRef<str>) {
        if self.mode != OutputMode::Silent {
            println!("{}", msg.as_ref());
        }
    }

    /// Print the final green success banner of a workflow.
    pub fn done(&self, msg: impl AsRef<str>) {
        if self.mode != OutputMode::Silent {
            println!("{} {}", "✔".green(), msg.as_ref().green());
        }
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(SPINNER_FRAMES)
}

fn finished_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
}
