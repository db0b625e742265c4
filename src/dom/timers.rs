//! `setTimeout`-backed timer queue for the reapply debounce.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use leptos::prelude::*;
use spectro_review_core::debounce::{Ticket, TimerQueue};
use crate::dom::session;

thread_local! {
    static HANDLES: RefCell<HashMap<Ticket, TimeoutHandle>> = RefCell::new(HashMap::new());
}

pub struct BrowserTimers;

impl TimerQueue for BrowserTimers {
    fn start(&self, ticket: Ticket, delay_ms: u32) {
        let fired = move || {
            HANDLES.with(|h| h.borrow_mut().remove(&ticket));
            session::with_session(|s| s.on_timer_fired(ticket));
        };
        match set_timeout_with_handle(fired, Duration::from_millis(delay_ms as u64)) {
            Ok(handle) => {
                HANDLES.with(|h| h.borrow_mut().insert(ticket, handle));
            }
            Err(e) => log::error!("filter reapply: setTimeout failed: {e:?}"),
        }
    }

    fn cancel(&self, ticket: Ticket) {
        if let Some(handle) = HANDLES.with(|h| h.borrow_mut().remove(&ticket)) {
            handle.clear();
        }
    }
}
