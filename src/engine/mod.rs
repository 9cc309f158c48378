//! Reconciliation engine: link projection and install resolution.
pub mod projector;
pub mod resolver;

pub use projector::LinkProjector;
pub use resolver::{InstallOptions, InstallReport, Outcome, Resolver, Verdict};
