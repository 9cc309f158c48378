//! The console/file logger used by the binary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{EntryStatus, Log, SummaryEntry, Tally};

/// [`Log`] implementation that emits `tracing` events and remembers per-item
/// results for the closing summary.
///
/// Where the events end up is decided by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber). `log_file` is only
/// echoed at the end of the summary.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<SummaryEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger that mentions `log_file` in its summary.
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Snapshot of the recorded entries, in recording order.
    #[must_use]
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Counts per status of the recorded entries.
    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally::of(&self.entries())
    }

    /// Print one line per recorded entry followed by the totals. Does nothing
    /// when nothing was recorded.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");
        for entry in &entries {
            let detail = entry
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default();
            self.info(&format!(
                "{}{} {}{detail}\x1b[0m",
                entry.status.color(),
                entry.status.icon(),
                entry.name
            ));
        }

        let t = Tally::of(&entries);
        self.info(&format!(
            "{} mod(s): \x1b[32m{} installed\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[31m{} failed\x1b[0m",
            t.total(),
            t.ok,
            t.skipped,
            t.failed
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(SummaryEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn new_logger_is_empty() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entries().is_empty());
        assert_eq!(log.tally(), Tally::default());
    }

    #[test]
    fn record_keeps_reason() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record("sodium", EntryStatus::Skipped, Some("already installed"));
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "sodium");
        assert_eq!(entries[0].message.as_deref(), Some("already installed"));
    }

    #[test]
    fn tally_counts_each_status() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record("a", EntryStatus::Ok, None);
        log.record("b", EntryStatus::Failed, Some("not found"));
        log.record("c", EntryStatus::Failed, Some("no file"));
        log.record("d", EntryStatus::Skipped, None);
        let t = log.tally();
        assert_eq!((t.ok, t.skipped, t.failed, t.total()), (1, 1, 2, 4));
    }

    #[test]
    fn debug_reaches_file() {
        let (log, tmp, _guard) = isolated_logger();
        log.debug("resolved release 0.5.3");
        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        assert!(contents.contains("[debug] resolved release 0.5.3"));
    }

    #[test]
    fn stage_reaches_file_with_arrow() {
        let (log, tmp, _guard) = isolated_logger();
        log.stage("Linking profile 'demo'");
        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        assert!(contents.contains("==> Linking profile 'demo'"));
    }

    #[test]
    fn summary_is_written_without_colour() {
        let (log, tmp, _guard) = isolated_logger();
        log.record("sodium", EntryStatus::Ok, None);
        log.record("lithium", EntryStatus::Failed, Some("Lithium does not support forge"));
        log.print_summary();
        let contents = fs::read_to_string(tmp.path().join("test.log")).unwrap();
        assert!(contents.contains("✗ lithium (Lithium does not support forge)"));
        assert!(contents.contains("2 mod(s): 1 installed, 0 skipped, 1 failed"));
        assert!(!contents.contains('\x1b'));
    }
}
