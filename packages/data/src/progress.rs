//! Step reporting while the two input tables are read.
//!
//! [`crate::load_dataset`] reports one step per table. The CLI shows the
//! steps on a terminal spinner; the server starts silently.

use std::sync::Arc;

/// Receives loading steps. Shared across threads behind an `Arc`.
pub trait ProgressCallback: Send + Sync {
    /// Number of steps the load will take.
    fn set_total(&self, total: u64);

    /// `delta` more steps are done.
    fn inc(&self, delta: u64);

    /// What is being read right now.
    fn set_message(&self, msg: String);

    /// Loading is done; `msg` summarizes the result.
    fn finish(&self, msg: String);
}

/// Discards every step.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// A [`SilentProgress`] ready to pass to the loader.
#[must_use]
pub fn silent() -> Arc<dyn ProgressCallback> {
    Arc::new(SilentProgress)
}
