//! End-to-end reporting flow over a recorded sink: banner, progress,
//! finding blocks with snippets, and the closing summary.

use phlint::models::{Finding, Status};
use phlint::reporter::{DisplayOptions, RunReporter};
use phlint::sink::{Ink, ProgressEvent, RecordingSink};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn write_numbered_file(dir: &Path, name: &str, lines: usize) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    for i in 1..=lines {
        writeln!(f, "echo {i};").unwrap();
    }
    path
}

fn finding(status: Status, path: &Path, line: u32, message: &str) -> Finding {
    Finding {
        status,
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    }
}

#[test]
fn full_run_with_three_findings_fails() {
    let dir = tempdir().unwrap();
    let path = write_numbered_file(dir.path(), "broken.php", 20);

    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions::default());

    reporter.start_run("phlint lint src", "8.3.1");
    reporter.progress_start(3);
    for _ in 0..3 {
        reporter.progress_advance();
    }
    reporter.progress_finish();

    reporter.report_finding(&finding(Status::Warning, &path, 10, "first problem"));
    reporter.report_finding(&finding(Status::Error, &path, 2, "second problem"));
    reporter.report_finding(&finding(Status::Notice, &path, 18, "third problem"));

    assert_eq!(reporter.finding_count(), 3);
    assert!(reporter.finish(Duration::from_secs(3)));

    let lines = sink.plain_lines();

    // headers numbered in call order
    let headers: Vec<&String> = lines.iter().filter(|l| l.starts_with('#')).collect();
    assert_eq!(headers.len(), 3);
    assert!(headers[0].starts_with("#1 - line 10 "));
    assert!(headers[1].starts_with("#2 - line 2 "));
    assert!(headers[2].starts_with("#3 - line 18 "));

    // severity lines carry the capitalized label and the message
    assert!(lines.iter().any(|l| l == "Warning: first problem"));
    assert!(lines.iter().any(|l| l == "Error: second problem"));
    assert!(lines.iter().any(|l| l == "Notice: third problem"));

    // progress ran through its full lifecycle
    assert_eq!(
        sink.progress,
        vec![
            ProgressEvent::Start(3),
            ProgressEvent::Advance,
            ProgressEvent::Advance,
            ProgressEvent::Advance,
            ProgressEvent::Finish,
        ]
    );

    // the run failed
    assert!(lines.iter().any(|l| l == "[ERROR] Finished in 3 secs"));
    assert!(!lines.iter().any(|l| l.starts_with("[OK]")));
}

#[test]
fn snippet_window_mid_file_highlights_target() {
    let dir = tempdir().unwrap();
    let path = write_numbered_file(dir.path(), "sample.php", 20);

    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions::default());
    reporter.report_finding(&finding(Status::Error, &path, 10, "boom"));

    // gutter rows sit between the severity line and the trailing blank
    let rows: Vec<&Vec<_>> = sink.lines[2..sink.lines.len() - 1].iter().collect();
    let numbers: Vec<i64> = rows
        .iter()
        .map(|spans| {
            format!("{}{}", spans[0].text, spans[1].text)
                .parse()
                .unwrap()
        })
        .collect();
    assert_eq!(numbers, (6..=14).collect::<Vec<i64>>());

    for spans in rows {
        let number: i64 = format!("{}{}", spans[0].text, spans[1].text).parse().unwrap();
        if number == 10 {
            assert_eq!(spans[0].style.ink, Ink::BrightRed);
            assert_eq!(spans[3].style.ink, Ink::Red);
            assert!(spans[3].text.ends_with("echo 10;"));
        } else {
            assert_eq!(spans[0].style.ink, Ink::Gray);
            assert_eq!(spans[3].style.ink, Ink::White);
        }
    }
}

#[test]
fn snippet_window_clamps_at_file_start() {
    let dir = tempdir().unwrap();
    let path = write_numbered_file(dir.path(), "sample.php", 20);

    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions::default());
    reporter.report_finding(&finding(Status::Error, &path, 2, "boom"));

    let numbers: Vec<i64> = sink.lines[2..sink.lines.len() - 1]
        .iter()
        .map(|spans| {
            format!("{}{}", spans[0].text, spans[1].text)
                .parse()
                .unwrap()
        })
        .collect();
    assert_eq!(numbers, (1..=6).collect::<Vec<i64>>());
}

#[test]
fn missing_file_skips_snippet_but_reports_finding() {
    let dir = tempdir().unwrap();
    let absent = dir.path().join("gone.php");

    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions::default());
    reporter.report_finding(&finding(Status::Error, &absent, 10, "cannot open"));
    assert!(reporter.finish(Duration::from_secs(1)));

    // header, severity line, separator — no snippet rows in between
    let lines = sink.plain_lines();
    assert!(lines[0].starts_with("#1 - line 10 "));
    assert_eq!(lines[1], "Error: cannot open");
    assert_eq!(lines[2], "");
}

#[test]
fn suppressed_progress_produces_no_output_at_all() {
    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions { no_progress: true });

    reporter.progress_start(100);
    for _ in 0..100 {
        reporter.progress_advance();
    }
    reporter.progress_finish();

    assert!(sink.progress.is_empty());
    assert!(sink.lines.is_empty());
}

#[test]
fn clean_run_reports_success() {
    let mut sink = RecordingSink::new();
    let mut reporter = RunReporter::new(&mut sink, DisplayOptions::default());

    reporter.start_run("phlint lint", "8.2.7");
    reporter.progress_start(2);
    reporter.progress_advance();
    reporter.progress_advance();
    reporter.progress_finish();

    assert_eq!(reporter.finding_count(), 0);
    assert!(!reporter.finish(Duration::from_millis(640)));

    let lines = sink.plain_lines();
    assert!(lines.iter().any(|l| l == "[OK] Finished in < 1 sec"));
    assert!(!lines.iter().any(|l| l.starts_with("[ERROR]")));
}
