//! Local-then-remote read strategy shared by the repositories.

use std::future::Future;

use tracing::debug;

use crate::domain::Outcome;

/// Which media a repository read may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Local medium first; the remote only on a local miss.
    #[default]
    PreferLocal,
    /// Skip the local medium.
    RemoteOnly,
    /// Never reach the remote.
    LocalOnly,
}

/// Medium that produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Local,
    Remote,
}

/// A value together with the medium it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Fetched<T> {
    pub const fn is_remote(&self) -> bool {
        matches!(self.origin, Origin::Remote)
    }
}

/// Read through `local` into `remote` according to `policy`.
///
/// Only a local-storage miss moves on to the remote. Any other local
/// failure, and every remote failure, is returned unchanged.
pub async fn read_through<T, L, LF, R, RF>(
    policy: AccessPolicy,
    concept: &'static str,
    local: L,
    remote: R,
) -> Outcome<Fetched<T>>
where
    L: FnOnce() -> LF,
    LF: Future<Output = Outcome<T>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Outcome<T>>,
{
    if policy != AccessPolicy::RemoteOnly {
        match local().await {
            Ok(value) => {
                return Ok(Fetched {
                    value,
                    origin: Origin::Local,
                });
            }
            Err(failure) if failure.is_local_miss() && policy == AccessPolicy::PreferLocal => {
                debug!(concept, %failure, "local miss, reading from network");
            }
            Err(failure) => return Err(failure),
        }
    }

    remote().await.map(|value| Fetched {
        value,
        origin: Origin::Remote,
    })
}
