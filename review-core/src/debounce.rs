//! Coalescing of table-rebuild notifications.
//!
//! A rebuild arrives as a burst of structural changes (one per inserted row).
//! Each change cancels the pending timer and starts a new one, so only the last
//! change of a burst leads to a re-apply, once the table has been quiet for the
//! configured delay.

/// Identifies one scheduled timer.
pub type Ticket = u64;

/// Cancellable one-shot timers. The owner of the queue calls back into the
/// session with the ticket when the delay elapses.
pub trait TimerQueue {
    fn start(&self, ticket: Ticket, delay_ms: u32);
    fn cancel(&self, ticket: Ticket);
}

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u32,
    last_ticket: Ticket,
    pending: Option<Ticket>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, last_ticket: 0, pending: None }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the quiet period, cancelling whatever was pending.
    pub fn trigger(&mut self, timers: &dyn TimerQueue) -> Ticket {
        if let Some(stale) = self.pending.take() {
            timers.cancel(stale);
        }
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.pending = Some(ticket);
        timers.start(ticket, self.delay_ms);
        ticket
    }

    /// A timer fired. True only for the current ticket; stale tickets (whose
    /// cancel raced the callback) are ignored.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &dyn TimerQueue) {
        if let Some(stale) = self.pending.take() {
            timers.cancel(stale);
        }
    }
}
