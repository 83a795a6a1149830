//! Configuration discovery and effective settings resolution.
//!
//! Phlint reads `phlint.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `paths`: `["."]`
//! - `skip`: none
//! - `lint.php`: `php`
//! - `lint.jobs`: `0` (rayon default)
//! - `lint.noProgress`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Lint-related configuration section under `[lint]`.
pub struct LintCfg {
    pub php: Option<String>,
    pub jobs: Option<usize>,
    #[serde(rename = "noProgress")]
    pub no_progress: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `phlint.toml|yaml`.
pub struct PhlintConfig {
    pub paths: Option<Vec<String>>,
    pub skip: Option<Vec<String>>,
    #[serde(default)]
    pub lint: Option<LintCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub paths: Vec<String>,
    pub skip: Vec<String>,
    pub php: String,
    pub jobs: usize,
    pub no_progress: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `phlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("phlint.toml").exists()
            || cur.join("phlint.yaml").exists()
            || cur.join("phlint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `PhlintConfig` from `phlint.toml` or `phlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<PhlintConfig> {
    let toml_path = root.join("phlint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: PhlintConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["phlint.yaml", "phlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: PhlintConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_paths: &[String],
    cli_php: Option<&str>,
    cli_jobs: Option<usize>,
    cli_no_progress: bool,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let paths = if cli_paths.is_empty() {
        cfg.paths.unwrap_or_else(|| vec![".".to_string()])
    } else {
        cli_paths.to_vec()
    };
    let skip = cfg.skip.unwrap_or_default();
    let php = cli_php
        .map(|s| s.to_string())
        .or_else(|| cfg.lint.as_ref().and_then(|l| l.php.clone()))
        .unwrap_or_else(|| "php".to_string());
    let jobs = cli_jobs
        .or_else(|| cfg.lint.as_ref().and_then(|l| l.jobs))
        .unwrap_or(0);
    let no_progress = cli_no_progress
        || cfg
            .lint
            .as_ref()
            .and_then(|l| l.no_progress)
            .unwrap_or(false);

    Effective {
        repo_root,
        paths,
        skip,
        php,
        jobs,
        no_progress,
    }
}

/// Contents written by `phlint init`.
pub const STARTER_CONFIG: &str = r#"# Directories or files to lint.
paths = ["src"]

# Glob patterns (or leading path components) excluded from discovery.
skip = ["vendor"]

[lint]
# PHP interpreter used for syntax checks.
php = "php"
# Worker threads; 0 uses the rayon default.
jobs = 0
# Suppress the progress bar.
noProgress = false
"#;

/// Write a starter `phlint.toml` in `dir` unless one already exists.
///
/// Returns `false` when a config was already present and left untouched.
pub fn write_starter_config(dir: &Path) -> std::io::Result<bool> {
    let path = dir.join("phlint.toml");
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, STARTER_CONFIG)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("phlint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
paths = ["app", "module"]
skip = ["vendor"]
[lint]
php = "php8.3"
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), &[], None, None, false);
        assert_eq!(eff.paths, vec!["app".to_string(), "module".to_string()]);
        assert_eq!(eff.skip, vec!["vendor".to_string()]);
        assert_eq!(eff.php, "php8.3");
        assert!(!eff.no_progress);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("phlint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
paths:
  - src
lint:
  noProgress: true
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], None, None, false);
        assert_eq!(eff.paths, vec!["src".to_string()]);
        assert!(eff.no_progress);
        // unset keys fall back to defaults
        assert_eq!(eff.php, "php");
        assert_eq!(eff.jobs, 0);
        assert!(eff.skip.is_empty());
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("phlint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
paths = ["app"]
[lint]
php = "php8.2"
jobs = 2
            "#
        )
        .unwrap();

        let cli_paths = vec!["tests".to_string()];
        let eff = resolve_effective(root.to_str(), &cli_paths, Some("php8.4"), Some(8), true);
        assert_eq!(eff.paths, vec!["tests".to_string()]);
        assert_eq!(eff.php, "php8.4");
        assert_eq!(eff.jobs, 8);
        assert!(eff.no_progress);
    }

    #[test]
    fn test_repo_root_detected_from_subdirectory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("phlint.toml"), "paths = [\"src\"]\n").unwrap();
        let nested = root.join("src/deeply/nested");
        fs::create_dir_all(&nested).unwrap();

        let eff = resolve_effective(nested.to_str(), &[], None, None, false);
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.paths, vec!["src".to_string()]);
    }

    #[test]
    fn test_git_dir_marks_repo_root_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        let nested = root.join("lib");
        fs::create_dir_all(&nested).unwrap();

        let eff = resolve_effective(nested.to_str(), &[], None, None, false);
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.paths, vec![".".to_string()]);
    }

    #[test]
    fn test_starter_config_written_once() {
        let dir = tempdir().unwrap();
        assert!(write_starter_config(dir.path()).unwrap());
        let written = fs::read_to_string(dir.path().join("phlint.toml")).unwrap();
        let parsed: PhlintConfig = toml::from_str(&written).unwrap();
        assert_eq!(parsed.paths, Some(vec!["src".to_string()]));

        // second call refuses to overwrite
        fs::write(dir.path().join("phlint.toml"), "paths = [\"x\"]\n").unwrap();
        assert!(!write_starter_config(dir.path()).unwrap());
        let kept = fs::read_to_string(dir.path().join("phlint.toml")).unwrap();
        assert_eq!(kept, "paths = [\"x\"]\n");
    }
}
