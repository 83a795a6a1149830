//! Supporting helpers: color gating, stderr prefixes, and the formatting
//! used by the run summary.

use owo_colors::OwoColorize;

/// Whether colored output is enabled for this process.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Colored `error:` prefix for early CLI failures.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Colored `note:` prefix for friendly hints.
pub fn note_prefix() -> String {
    if use_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Format a byte count for the summary: B, KiB, MiB, or GiB.
pub fn format_memory(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Format an execution time for the closing banner.
pub fn format_duration(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 1 {
        return "< 1 sec".to_string();
    }
    if secs < 60 {
        return format!("{} {}", secs, plural(secs, "sec"));
    }
    let mins = secs / 60;
    let rest = secs % 60;
    if rest == 0 {
        format!("{} {}", mins, plural(mins, "min"))
    } else {
        format!(
            "{} {} {} {}",
            mins,
            plural(mins, "min"),
            rest,
            plural(rest, "sec")
        )
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
