//! Run-wide reporting: banner, per-finding blocks, progress, and summary.
//!
//! `RunReporter` is a value the driver owns for exactly one run. Every
//! `report_finding` call latches the run into the failed state; the latch has
//! no reset path. `finish` consumes the reporter, so a finished run cannot
//! report again.

use crate::models::Finding;
use crate::palette;
use crate::sink::{Ink, ReportSink, Span};
use crate::snippet;
use crate::utils::{format_duration, format_memory};
use std::time::Duration;

/// Per-run display switches supplied by the driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayOptions {
    /// Suppress all progress bar output.
    pub no_progress: bool,
}

/// Stateful aggregator writing one run's report to a borrowed sink.
pub struct RunReporter<'a, S: ReportSink> {
    sink: &'a mut S,
    options: DisplayOptions,
    finding_count: u32,
    success: bool,
}

impl<'a, S: ReportSink> RunReporter<'a, S> {
    pub fn new(sink: &'a mut S, options: DisplayOptions) -> Self {
        RunReporter {
            sink,
            options,
            finding_count: 0,
            success: true,
        }
    }

    /// Number of findings reported so far.
    pub fn finding_count(&self) -> u32 {
        self.finding_count
    }

    /// Print the invocation echo and the application banner.
    pub fn start_run(&mut self, command_line: &str, runtime: &str) {
        self.sink.line(&[Span::plain(format!("> {command_line}"))]);
        self.sink.line(&[
            Span::bold("Ph", Ink::Blue),
            Span::bold("lint", Ink::Yellow),
            Span::plain(format!(
                " {} - current PHP version: {}",
                env!("CARGO_PKG_VERSION"),
                runtime
            )),
        ]);
        self.sink.blank();
    }

    /// Render one finding block: header, severity line, snippet, separator.
    pub fn report_finding(&mut self, finding: &Finding) {
        let colors = palette::color_for(finding.status);
        self.finding_count += 1;

        self.sink.line(&[
            Span::bold(
                format!("#{} - line {} ", self.finding_count, finding.line),
                Ink::White,
            ),
            Span::bold(format!("[{}]", finding.path.display()), Ink::Gray),
        ]);
        self.sink.line(&[
            Span::bold(finding.status.label(), colors.bright),
            Span::plain(": "),
            Span::colored(finding.message.clone(), colors.base),
        ]);
        snippet::render(self.sink, &finding.path, finding.line, colors);
        self.sink.blank();

        self.success = false;
    }

    pub fn progress_start(&mut self, count: u64) {
        if self.options.no_progress {
            return;
        }
        self.sink.line(&[Span::plain("Linting files...")]);
        self.sink.blank();
        self.sink.progress_start(count);
    }

    pub fn progress_advance(&mut self) {
        if self.options.no_progress {
            return;
        }
        self.sink.progress_advance();
    }

    pub fn progress_finish(&mut self) {
        if self.options.no_progress {
            return;
        }
        self.sink.progress_finish();
    }

    /// Print resource usage and the closing banner. Returns `true` when the
    /// run failed.
    pub fn finish(self, elapsed: Duration) -> bool {
        if let Some(bytes) = resident_memory() {
            self.sink.line(&[Span::plain(format!(
                "Memory usage: {}",
                format_memory(bytes)
            ))]);
        }
        let message = format!(" Finished in {}", format_duration(elapsed));
        self.sink.blank();
        if !self.success {
            self.sink.line(&[
                Span::bold("[ERROR]", Ink::BrightRed),
                Span::colored(message, Ink::Red),
            ]);
            self.sink.blank();
            return true;
        }
        self.sink.line(&[
            Span::bold("[OK]", Ink::BrightGreen),
            Span::colored(message, Ink::Green),
        ]);
        self.sink.blank();
        false
    }
}

/// Resident set size in bytes, where the platform exposes it.
#[cfg(target_os = "linux")]
fn resident_memory() -> Option<u64> {
    // /proc/self/statm: size resident shared ..., in 4 KiB pages
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory() -> Option<u64> {
    None
}
