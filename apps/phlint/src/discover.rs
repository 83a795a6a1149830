//! PHP file discovery from configured paths and skip patterns.

use glob::{glob, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Collect `.php` files under the configured paths, honoring skip entries.
///
/// A configured path that is a `.php` file is taken verbatim; a directory is
/// expanded through `<dir>/**/*.php`. Skip entries match either as glob
/// patterns or as leading path components, both against the repo-relative
/// path. Results are deduplicated, sorted, and made relative to the current
/// working directory when they live below it.
pub fn php_files(root: &Path, paths: &[String], skip: &[String]) -> Vec<PathBuf> {
    let skip_globs: Vec<Pattern> = skip.iter().filter_map(|s| Pattern::new(s).ok()).collect();
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for entry in paths {
        let base = root.join(entry);
        if base.is_file() {
            if base.extension().is_some_and(|e| e == "php") {
                found.insert(base);
            }
            continue;
        }
        let pattern = base.join("**/*.php").to_string_lossy().to_string();
        if let Ok(matches) = glob(&pattern) {
            for path in matches.flatten() {
                found.insert(path);
            }
        }
    }

    found
        .into_iter()
        .filter(|path| {
            let rel = path.strip_prefix(root).unwrap_or(path);
            !is_skipped(rel, &skip_globs, skip)
        })
        .map(relative_to_cwd)
        .collect()
}

fn is_skipped(rel: &Path, skip_globs: &[Pattern], skip_raw: &[String]) -> bool {
    skip_globs.iter().any(|p| p.matches_path(rel)) || skip_raw.iter().any(|s| rel.starts_with(s))
}

fn relative_to_cwd(path: PathBuf) -> PathBuf {
    let Ok(cwd) = std::env::current_dir() else {
        return path;
    };
    match pathdiff::diff_paths(&path, &cwd) {
        Some(rel) if !rel.starts_with("..") => rel,
        _ => path,
    }
}
