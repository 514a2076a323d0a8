//! Supersession of in-flight queries.
//!
//! Each query takes a ticket before it starts. When it completes, its result
//! is only honoured if no newer ticket was issued meanwhile; otherwise it
//! resolves to [`Failure::Cancellation`].

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::{Failure, Outcome};

/// Generation counter shared by the queries of one kind.
#[derive(Debug, Default)]
pub struct QueryGate {
    latest: AtomicU64,
}

/// Generation a query was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

impl QueryGate {
    /// Start a query, superseding every earlier one.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `outcome` through if `ticket` is still the newest query.
    pub fn settle<T>(&self, ticket: QueryTicket, outcome: Outcome<T>) -> Outcome<T> {
        if self.is_current(ticket) {
            return outcome;
        }
        debug!(generation = ticket.0, "discarding superseded query result");
        Err(Failure::Cancellation)
    }
}
