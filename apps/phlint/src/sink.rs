//! Styled line output surfaces for the reporter.
//!
//! The reporting core describes styling semantically (a logical `Ink` plus a
//! bold flag) and leaves the textual encoding to the sink adapter.
//! `ConsoleSink` encodes spans as ANSI sequences via `owo-colors` and drives
//! an `indicatif` bar for the progress primitive; `RecordingSink` captures
//! spans and progress events verbatim for assertions.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};

/// Logical foreground colors the reporter is allowed to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    Default,
    White,
    Gray,
    Green,
    BrightGreen,
    Blue,
    BrightBlue,
    Yellow,
    BrightYellow,
    Red,
    BrightRed,
}

/// Semantic text style: a logical ink plus a bold flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub ink: Ink,
    pub bold: bool,
}

/// A run of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            style: Style {
                ink: Ink::Default,
                bold: false,
            },
        }
    }

    pub fn colored(text: impl Into<String>, ink: Ink) -> Self {
        Span {
            text: text.into(),
            style: Style { ink, bold: false },
        }
    }

    pub fn bold(text: impl Into<String>, ink: Ink) -> Self {
        Span {
            text: text.into(),
            style: Style { ink, bold: true },
        }
    }
}

/// Line-oriented, style-aware output surface.
///
/// Lines must be written in the exact order produced; snippet alignment and
/// highlighting depend on adjacency.
pub trait ReportSink {
    fn line(&mut self, spans: &[Span]);
    fn blank(&mut self);
    fn progress_start(&mut self, total: u64);
    fn progress_advance(&mut self);
    fn progress_finish(&mut self);
}

/// Terminal adapter: ANSI styling plus an indicatif progress bar.
pub struct ConsoleSink {
    color: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        ConsoleSink { color, bar: None }
    }

    fn render(&self, spans: &[Span]) -> String {
        let mut out = String::new();
        for span in spans {
            if self.color {
                out.push_str(&paint(span));
            } else {
                out.push_str(&span.text);
            }
        }
        out
    }
}

impl ReportSink for ConsoleSink {
    fn line(&mut self, spans: &[Span]) {
        let text = self.render(spans);
        match &self.bar {
            Some(bar) => bar.println(text),
            None => println!("{text}"),
        }
    }

    fn blank(&mut self) {
        match &self.bar {
            Some(bar) => bar.println(""),
            None => println!(),
        }
    }

    fn progress_start(&mut self, total: u64) {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(" {pos}/{len} [{bar:28}] {percent:>3}%")
                .unwrap()
                .progress_chars("=>-"),
        );
        self.bar = Some(bar);
    }

    fn progress_advance(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn progress_finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

fn ansi(ink: Ink) -> Option<AnsiColors> {
    match ink {
        Ink::Default => None,
        Ink::White => Some(AnsiColors::White),
        Ink::Gray => Some(AnsiColors::BrightBlack),
        Ink::Green => Some(AnsiColors::Green),
        Ink::BrightGreen => Some(AnsiColors::BrightGreen),
        Ink::Blue => Some(AnsiColors::Blue),
        Ink::BrightBlue => Some(AnsiColors::BrightBlue),
        Ink::Yellow => Some(AnsiColors::Yellow),
        Ink::BrightYellow => Some(AnsiColors::BrightYellow),
        Ink::Red => Some(AnsiColors::Red),
        Ink::BrightRed => Some(AnsiColors::BrightRed),
    }
}

fn paint(span: &Span) -> String {
    let painted = match ansi(span.style.ink) {
        Some(color) => span.text.color(color).to_string(),
        None => span.text.clone(),
    };
    if span.style.bold {
        painted.bold().to_string()
    } else {
        painted
    }
}

/// Progress lifecycle calls seen by a [`RecordingSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Start(u64),
    Advance,
    Finish,
}

/// Sink that records every span and progress event, styling preserved.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<Vec<Span>>,
    pub progress: Vec<ProgressEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text of every emitted line, styling stripped.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|spans| spans.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }
}

impl ReportSink for RecordingSink {
    fn line(&mut self, spans: &[Span]) {
        self.lines.push(spans.to_vec());
    }

    fn blank(&mut self) {
        self.lines.push(Vec::new());
    }

    fn progress_start(&mut self, total: u64) {
        self.progress.push(ProgressEvent::Start(total));
    }

    fn progress_advance(&mut self) {
        self.progress.push(ProgressEvent::Advance);
    }

    fn progress_finish(&mut self) {
        self.progress.push(ProgressEvent::Finish);
    }
}
