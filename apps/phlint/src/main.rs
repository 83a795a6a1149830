//! Phlint CLI binary entry point.
//! Delegates to modules for discovery and linting and reports results.

use clap::Parser;
use phlint::cli::{Cli, Commands};
use phlint::config;
use phlint::discover;
use phlint::models::Status;
use phlint::reporter::{DisplayOptions, RunReporter};
use phlint::runner::{self, PhpEngine};
use phlint::sink::ConsoleSink;
use phlint::utils;
use std::path::Path;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Init => match config::write_starter_config(Path::new(".")) {
            Ok(true) => println!("created phlint.toml"),
            Ok(false) => {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "phlint.toml already exists; leaving it untouched."
                );
            }
            Err(err) => {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("could not write phlint.toml: {err}")
                );
                std::process::exit(2);
            }
        },
        Commands::Lint {
            paths,
            repo_root,
            php,
            jobs,
            no_progress,
        } => {
            run_lint(paths, repo_root, php, jobs, no_progress);
        }
    }
}

fn run_lint(
    paths: Vec<String>,
    repo_root: Option<String>,
    php: Option<String>,
    jobs: Option<usize>,
    no_progress: bool,
) {
    let started = Instant::now();
    let eff = config::resolve_effective(
        repo_root.as_deref(),
        &paths,
        php.as_deref(),
        jobs,
        no_progress,
    );

    if config::load_config(&eff.repo_root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No phlint.toml found; using defaults."
        );
    }

    let engine = match PhpEngine::probe(&eff.php) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!(
                "{} {}",
                utils::error_prefix(),
                format!("PHP binary '{}' is not usable: {err}", eff.php)
            );
            std::process::exit(2);
        }
    };

    if eff.jobs > 0 {
        // best-effort; build_global fails if a pool already exists
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(eff.jobs)
            .build_global();
    }

    let files = discover::php_files(&eff.repo_root, &eff.paths, &eff.skip);
    if files.is_empty() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No PHP files found under the configured paths."
        );
    }

    let mut sink = ConsoleSink::new(utils::use_colors());
    let options = DisplayOptions {
        no_progress: eff.no_progress,
    };
    let mut reporter = RunReporter::new(&mut sink, options);

    let command_line = std::env::args().collect::<Vec<_>>().join(" ");
    reporter.start_run(&command_line, engine.version());

    reporter.progress_start(files.len() as u64);
    let mut findings = Vec::new();
    runner::lint_files(&files, &engine, |finding| {
        reporter.progress_advance();
        if finding.status != Status::Ok {
            findings.push(finding);
        }
    });
    reporter.progress_finish();

    for finding in &findings {
        reporter.report_finding(finding);
    }

    let failed = reporter.finish(started.elapsed());
    if failed {
        std::process::exit(1);
    }
}
