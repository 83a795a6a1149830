//! Source snippet rendering around a finding's line.
//!
//! A finding renders a window of numbered source lines (up to four above and
//! four below the target) behind a fixed five-column gutter. A missing or
//! unreadable file skips the snippet silently and the run continues; that
//! degradation is documented behavior, not an oversight.

use crate::palette::ColorPair;
use crate::sink::{Ink, ReportSink, Span};
use std::fs;
use std::path::Path;

/// Context lines requested on each side of the target.
const WINDOW: i64 = 5;
/// Gutter width; line numbers are zero-padded to this many columns.
const GUTTER: usize = 5;

/// Render the window of source lines around `line` (1-based), highlighting
/// the target row with the severity colors.
pub fn render<S: ReportSink>(sink: &mut S, path: &Path, line: u32, colors: ColorPair) {
    let Ok(bytes) = fs::read(path) else {
        return;
    };
    let content = String::from_utf8_lossy(&bytes);

    let target = i64::from(line);
    let start = target - WINDOW;
    let end = target + WINDOW - 1;

    for (index, text) in content.split('\n').enumerate() {
        let index = index as i64;
        if index < start || index >= end {
            continue;
        }
        let number = index + 1;
        sink.line(&gutter_row(number, text, number == target, colors));
    }
}

/// One snippet row: dim zero prefix, bold line number, gray pipe, source
/// text. The prefix and number always occupy `GUTTER` columns together.
fn gutter_row(number: i64, text: &str, highlighted: bool, colors: ColorPair) -> Vec<Span> {
    let digits = number.to_string();
    let prefix = "0".repeat(GUTTER.saturating_sub(digits.len()));

    if highlighted {
        vec![
            Span::colored(prefix, colors.bright),
            Span::bold(digits, colors.base),
            Span::colored("|", Ink::Gray),
            Span::colored(format!(" {text}"), colors.base),
        ]
    } else {
        vec![
            Span::colored(prefix, Ink::Gray),
            Span::bold(digits, Ink::White),
            Span::colored("|", Ink::Gray),
            Span::colored(format!(" {text}"), Ink::White),
        ]
    }
}
