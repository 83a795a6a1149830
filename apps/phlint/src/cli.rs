//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phlint",
    version,
    about = "Phlint (Rust)",
    long_about = "Phlint — a fast CLI that syntax-checks PHP files with `php -l` and renders findings with colored source snippets.\n\nConfiguration precedence: CLI > phlint.toml > defaults.",
    after_help = "Examples:\n  phlint lint\n  phlint lint src tests --no-progress\n  phlint lint --php /usr/bin/php8.3 --jobs 8\n  phlint init",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and scaffolding.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current phlint version."
    )]
    Version,
    /// Syntax-check PHP files
    #[command(
        about = "Run the PHP syntax check",
        long_about = "Discover PHP files under the configured paths and syntax-check each with `php -l`. Findings are rendered with colored source snippets; any finding fails the run.",
        after_help = "Examples:\n  phlint lint\n  phlint lint app module --no-progress"
    )]
    Lint {
        #[arg(help = "Paths to lint (override configured paths)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "PHP binary used for syntax checks (default: php)")]
        php: Option<String>,
        #[arg(long, help = "Worker threads; 0 = rayon default")]
        jobs: Option<usize>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Suppress the progress bar")]
        no_progress: bool,
    },
    /// Write a starter phlint.toml
    #[command(
        about = "Write a starter config",
        long_about = "Create phlint.toml with commented defaults in the current directory. An existing file is left untouched."
    )]
    Init,
}
