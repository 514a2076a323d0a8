//! Storage media a data source can be bound to, and the abort used when an
//! operation is invoked against a medium that cannot serve it.

/// Storage medium backing one data-source implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    /// Remote REST API.
    Network,
    /// Persistent key-value cache.
    Cache,
    /// Process-local memory.
    Memory,
    /// Local relational database.
    Database,
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Network => "network",
            Self::Cache => "cache",
            Self::Memory => "memory",
            Self::Database => "database",
        })
    }
}

/// Abort because `operation` was routed to a source bound to `medium`.
///
/// Callers statically know which medium serves which operation, so reaching
/// this is a wiring bug rather than a runtime condition. It never returns a
/// [`Failure`](crate::domain::Failure).
///
/// # Panics
///
/// Always.
#[track_caller]
pub fn unsupported_on(medium: Medium, operation: &'static str) -> ! {
    unimplemented!("`{operation}` is not implemented for the {medium} source")
}
