//! Synchronous, in-process event dispatcher.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use super::events::{DownloadEvent, EventKind};

/// Listener callback invoked with a borrowed event.
pub type Listener = Box<dyn Fn(&DownloadEvent) + Send + Sync>;

struct Registration {
    priority: i32,
    listener: Listener,
}

/// Ordered listener registry with synchronous dispatch.
///
/// Listeners for an event kind run on the calling task, in descending
/// priority order (registration order for equal priority), before the
/// downloader proceeds to its next step. A panicking listener is logged
/// and skipped; it never aborts the transfer or masks the error that
/// triggered a failure event.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Registration>>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for an event kind at priority 0.
    pub fn on(&mut self, kind: EventKind, listener: impl Fn(&DownloadEvent) + Send + Sync + 'static) {
        self.on_with_priority(kind, listener, 0);
    }

    /// Registers a listener with an explicit priority (higher runs earlier).
    pub fn on_with_priority(
        &mut self,
        kind: EventKind,
        listener: impl Fn(&DownloadEvent) + Send + Sync + 'static,
        priority: i32,
    ) {
        let registrations = self.listeners.entry(kind).or_default();
        registrations.push(Registration {
            priority,
            listener: Box::new(listener),
        });
        // Stable sort keeps registration order among equal priorities.
        registrations.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Number of listeners registered for a kind.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Dispatches an event to its listeners, in order.
    pub fn dispatch(&self, event: &DownloadEvent) {
        let Some(registrations) = self.listeners.get(&event.kind()) else {
            return;
        };

        for registration in registrations {
            let outcome = catch_unwind(AssertUnwindSafe(|| (registration.listener)(event)));
            if outcome.is_err() {
                warn!(kind = ?event.kind(), "event listener panicked during dispatch");
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<EventKind, usize> = self
            .listeners
            .iter()
            .map(|(kind, registrations)| (*kind, registrations.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use crate::download::events::DownloadProgress;

    fn progress_event() -> DownloadEvent {
        DownloadEvent::Progress(DownloadProgress {
            video_id: "video-1".to_string(),
            file_path: "/tmp/video-1.mp4".into(),
            bytes_written: 1024 * 1024,
            size_bytes: 2 * 1024 * 1024,
            percent: Some(50.0),
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn test_dispatch_without_listeners_is_a_no_op() {
        let bus = EventBus::new();
        bus.dispatch(&progress_event());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.on(EventKind::Progress, move |_| {
                order.lock().unwrap().push(label);
            });
        }

        bus.dispatch(&progress_event());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_higher_priority_runs_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let o = Arc::clone(&order);
        bus.on_with_priority(EventKind::Progress, move |_| o.lock().unwrap().push("low"), -5);
        let o = Arc::clone(&order);
        bus.on(EventKind::Progress, move |_| o.lock().unwrap().push("default"));
        let o = Arc::clone(&order);
        bus.on_with_priority(EventKind::Progress, move |_| o.lock().unwrap().push("high"), 10);

        bus.dispatch(&progress_event());
        assert_eq!(*order.lock().unwrap(), vec!["high", "default", "low"]);
    }

    #[test]
    fn test_listeners_only_receive_their_kind() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();

        let c = Arc::clone(&count);
        bus.on(EventKind::Completed, move |_| *c.lock().unwrap() += 1);

        bus.dispatch(&progress_event());
        assert_eq!(*count.lock().unwrap(), 0);
        assert_eq!(bus.listener_count(EventKind::Completed), 1);
        assert_eq!(bus.listener_count(EventKind::Progress), 0);
    }

    #[test]
    fn test_panicking_listener_does_not_stop_dispatch() {
        let reached = Arc::new(Mutex::new(false));
        let mut bus = EventBus::new();

        bus.on(EventKind::Progress, |_| panic!("listener bug"));
        let r = Arc::clone(&reached);
        bus.on(EventKind::Progress, move |_| *r.lock().unwrap() = true);

        bus.dispatch(&progress_event());
        assert!(
            *reached.lock().unwrap(),
            "later listeners must still run after a panic"
        );
    }
}
