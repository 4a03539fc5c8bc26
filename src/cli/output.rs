//! Output formatting and progress indicators
//!
//! This module provides the output preferences for a run, progress
//! spinners shown while components are processed, and error display.

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::component::Component;
use crate::core::pipeline::PipelineObserver;
use crate::core::status::BuildRecord;

/// Output preferences for one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Only errors are printed
    pub quiet: bool,
    /// Machine-readable output on stdout
    pub json: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Human-readable text may be printed
    pub fn is_text(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Spinners may be drawn
    pub fn show_progress(&self) -> bool {
        self.is_text()
    }

    /// Log filter directive for the verbosity level
    pub fn log_level(verbose: u8) -> tracing::Level {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Pipeline observer drawing one spinner per component
#[derive(Default)]
pub struct ProgressObserver {
    current: Option<ProgressBar>,
}

impl PipelineObserver for ProgressObserver {
    fn component_started(&mut self, component: &Component, index: usize, total: usize) {
        self.current = Some(create_spinner(&format!(
            "[{}/{total}] {} ({})",
            index + 1,
            component.name(),
            component.kind()
        )));
    }

    fn component_finished(&mut self, record: &BuildRecord) {
        if let Some(pb) = self.current.take() {
            pb.finish_with_message(format!(
                "{} {} ({})",
                record.status().icon(),
                record.component().name(),
                record.status().label()
            ));
        }
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
