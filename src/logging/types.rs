//! Summary entries and the [`Log`] trait the engine writes to.

/// One item of the closing summary.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    /// Mod slug.
    pub name: String,
    /// How the item ended.
    pub status: EntryStatus,
    /// Skip or failure reason.
    pub message: Option<String>,
}

/// How a summarized item ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Downloaded into the cache.
    Ok,
    /// Already cached, or left alone on purpose.
    Skipped,
    /// Could not be installed.
    Failed,
}

impl EntryStatus {
    pub(super) const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Skipped => "○",
            Self::Failed => "✗",
        }
    }

    pub(super) const fn color(self) -> &'static str {
        match self {
            Self::Ok => "\x1b[32m",
            Self::Skipped => "\x1b[33m",
            Self::Failed => "\x1b[31m",
        }
    }
}

/// Number of entries per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Entries that completed.
    pub ok: usize,
    /// Entries that were skipped.
    pub skipped: usize,
    /// Entries that failed.
    pub failed: usize,
}

impl Tally {
    /// Count `entries` by status.
    #[must_use]
    pub fn of(entries: &[SummaryEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut t, e| {
            match e.status {
                EntryStatus::Ok => t.ok += 1,
                EntryStatus::Skipped => t.skipped += 1,
                EntryStatus::Failed => t.failed += 1,
            }
            t
        })
    }

    /// All entries.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ok + self.skipped + self.failed
    }
}

/// Sink for user-facing progress output.
///
/// [`Logger`](super::logger::Logger) writes through `tracing`; unit tests use
/// an in-memory recorder instead.
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Normal progress output.
    fn info(&self, msg: &str);
    /// Detail shown only with `--verbose` (always kept in the log file).
    fn debug(&self, msg: &str);
    /// Something the user should look at.
    fn warn(&self, msg: &str);
    /// A failure.
    fn error(&self, msg: &str);
    /// Remember an item result for the summary.
    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>);
}
