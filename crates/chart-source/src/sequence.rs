// File: crates/chart-source/src/sequence.rs
// Summary: Latest-request-wins guard for responses that may arrive out of order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tag handed out when a request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 { self.0 }
}

/// Numbers requests monotonically; only the response to the most recently
/// issued request may be applied. Shareable across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    /// Tickets at or below this were invalidated.
    floor: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self { Self::default() }

    /// Tag a new request. Every earlier ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn latest(&self) -> Option<Ticket> {
        match self.issued.load(Ordering::Acquire) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued.load(Ordering::Acquire) && ticket.0 > self.floor.load(Ordering::Acquire)
    }

    /// Store `value` in `slot` when `ticket` is still current. Returns whether
    /// it was applied; stale values are dropped.
    pub fn accept<T>(&self, ticket: Ticket, value: T, slot: &mut Option<T>) -> bool {
        if self.is_current(ticket) {
            *slot = Some(value);
            true
        } else {
            tracing::warn!(ticket = ticket.0, latest = self.issued.load(Ordering::Acquire), "discarding stale response");
            false
        }
    }

    /// Make every outstanding ticket stale, e.g. when the consuming view goes away.
    pub fn invalidate(&self) {
        self.floor.store(self.issued.load(Ordering::Acquire), Ordering::Release);
    }
}
