//! Log file location, terminal width, ANSI stripping, and timestamps.
use std::path::PathBuf;

/// Remove ANSI CSI sequences (colours, cursor movement) from `s`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((plain, escaped)) = rest.split_once('\x1b') {
        out.push_str(plain);
        rest = escaped.strip_prefix('[').map_or(escaped, |csi| {
            csi.find(|c: char| ('@'..='~').contains(&c))
                .and_then(|end| csi.get(end + 1..))
                .unwrap_or("")
        });
    }
    out.push_str(rest);
    out
}

/// Width of the attached terminal, else `$COLUMNS`, else 80.
#[must_use]
pub fn terminal_columns() -> usize {
    const FALLBACK: usize = 80;
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size()
        && w > 0
    {
        return usize::from(w);
    }
    columns_from_env(std::env::var("COLUMNS").ok().as_deref()).unwrap_or(FALLBACK)
}

fn columns_from_env(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok().filter(|&n: &usize| n > 0)
}

/// `$XDG_CACHE_HOME/modder`, or `.cache/modder` under the home directory.
fn cache_dir<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(xdg) = env("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join("modder"));
    }
    let home = env("HOME").or_else(|| env("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".cache").join("modder"))
}

/// `<cache dir>/<command>.log`, creating the cache directory.
///
/// `None` when no home directory is known or the directory cannot be created.
#[must_use]
pub fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_dir(|name| std::env::var(name).ok())?;
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC date and time, `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%F %T").to_string()
}

/// Current UTC time of day, `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%T").to_string()
}
