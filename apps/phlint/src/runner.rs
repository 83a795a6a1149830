//! PHP process orchestration: probing the interpreter and linting files.
//!
//! Each file is checked with `php -l`. Work fans out on the rayon pool and
//! results funnel back over a channel, so the caller consumes them one at a
//! time on its own thread and rendering stays sequential.

use crate::models::{Finding, Status};
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc;
use std::sync::OnceLock;

fn issue_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^(?:PHP\s+)?(Parse error|Fatal error|Warning|Deprecated|Notice):\s+(.+?)(?:\s+in\s+.+?)?\s+on line\s+(\d+)\s*$",
        )
        .expect("issue pattern is valid")
    })
}

/// A probed PHP interpreter.
pub struct PhpEngine {
    binary: String,
    version: String,
}

impl PhpEngine {
    /// Run `<binary> -v` once and capture the interpreter version.
    pub fn probe(binary: &str) -> io::Result<PhpEngine> {
        let output = Command::new(binary).arg("-v").output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{binary} -v exited with {}",
                output.status
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = parse_version(&stdout).unwrap_or_else(|| "unknown".to_string());
        Ok(PhpEngine {
            binary: binary.to_string(),
            version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Syntax-check one file and classify the interpreter's verdict.
    pub fn lint_file(&self, path: &Path) -> Finding {
        let output = Command::new(&self.binary)
            .args(["-d", "display_errors=1", "-d", "error_reporting=E_ALL", "-l"])
            .arg(path)
            .output();
        match output {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                if text.trim().is_empty() {
                    text = String::from_utf8_lossy(&output.stderr).into_owned();
                }
                classify(&text, output.status.success(), path)
            }
            Err(err) => Finding {
                status: Status::Error,
                path: path.to_path_buf(),
                line: 0,
                message: format!("failed to run {}: {err}", self.binary),
            },
        }
    }
}

/// First version token in `php -v` output (`PHP 8.3.1 (cli) ...`).
fn parse_version(output: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"PHP\s+(\S+)").expect("version pattern is valid"));
    re.captures(output).map(|c| c[1].to_string())
}

/// Map lint output onto a `Finding` for `path`.
///
/// Issue lines win over the `No syntax errors detected` verdict so that
/// deprecations and warnings surface even when the syntax check passes.
fn classify(output: &str, exited_ok: bool, path: &Path) -> Finding {
    if let Some(caps) = issue_pattern().captures(output) {
        let status = match &caps[1] {
            "Parse error" | "Fatal error" => Status::Error,
            "Warning" => Status::Warning,
            _ => Status::Notice,
        };
        let line = caps[3].parse().unwrap_or(0);
        return Finding {
            status,
            path: path.to_path_buf(),
            line,
            message: caps[2].to_string(),
        };
    }
    if exited_ok || output.contains("No syntax errors detected") {
        return Finding {
            status: Status::Ok,
            path: path.to_path_buf(),
            line: 0,
            message: String::new(),
        };
    }
    let message = output
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("php -l produced no output")
        .trim()
        .to_string();
    Finding {
        status: Status::Error,
        path: path.to_path_buf(),
        line: 0,
        message,
    }
}

/// Lint `files` on the rayon pool, delivering each `Finding` to `on_result`
/// on the calling thread in completion order.
pub fn lint_files<F>(files: &[PathBuf], engine: &PhpEngine, mut on_result: F)
where
    F: FnMut(Finding) + Send,
{
    let (tx, rx) = mpsc::channel();
    rayon::scope(|scope| {
        for path in files {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let _ = tx.send(engine.lint_file(path));
            });
        }
        drop(tx);
        for finding in rx {
            on_result(finding);
        }
    });
}
