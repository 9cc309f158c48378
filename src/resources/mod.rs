//! On-disk state the tool manages: cached artifacts and the links pointing
//! at them.
pub mod artifact;
pub mod helpers;
pub mod symlink;

use anyhow::Result;

/// What occupies a managed path compared to what should be there.
///
/// # Examples
///
/// ```
/// use modder::resources::ResourceState;
///
/// let stale = ResourceState::Incorrect { current: "points to /old.jar".into() };
/// assert!(stale.is_fixable());
/// assert!(!ResourceState::Correct.is_fixable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing is there.
    Missing,
    /// The desired entry is there.
    Correct,
    /// Something else is there.
    Incorrect {
        /// Description of the current entry.
        current: String,
    },
    /// The entry cannot be created, e.g. its source is gone.
    Invalid {
        /// Why not.
        reason: String,
    },
}

impl ResourceState {
    /// Whether [`Resource::apply`] would change something.
    #[must_use]
    pub const fn is_fixable(&self) -> bool {
        matches!(self, Self::Missing | Self::Incorrect { .. })
    }
}

/// What [`Resource::apply`] or [`Resource::remove`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The path was changed.
    Applied,
    /// The path was already as requested.
    AlreadyCorrect,
}

/// A single managed path that can inspect and converge its own state.
pub trait Resource {
    /// Short human-readable form, used in log lines.
    fn description(&self) -> String;

    /// Inspect the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected.
    fn current_state(&self) -> Result<ResourceState>;

    /// Make the path match, replacing whatever is there.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the managed entry if present.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    fn remove(&self) -> Result<ResourceChange>;

    /// Whether [`apply`](Self::apply) has work to do.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(self.current_state()?.is_fixable())
    }
}
