//! Detached background persistence.
//!
//! A repository that has already produced its result hands the follow-up
//! write to [`WriteBehind::spawn`] and returns without awaiting it. The write
//! runs on its own Tokio task; nothing is retried and a crash loses it.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span, warn};

/// Spawns best-effort writes onto the current Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteBehind;

impl WriteBehind {
    /// Run `write` on a detached task tagged with `concept`.
    ///
    /// Returns `None` when called outside a Tokio runtime; the write is then
    /// dropped with a warning. Callers normally discard the handle.
    pub fn spawn<F>(&self, concept: &'static str, write: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!(concept, "no async runtime available, dropping write-behind");
            return None;
        };

        let span = info_span!("write_behind", concept);
        Some(runtime.spawn(
            async move {
                write.await;
                debug!("write-behind finished");
            }
            .instrument(span),
        ))
    }
}
