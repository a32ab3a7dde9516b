// crates/geocoder-core/src/events.rs

//! Publish/subscribe for the control's public events.
//!
//! Listeners run synchronously, in registration order, on the thread that
//! emits. The listener list is snapshotted before dispatch, so a listener
//! may subscribe or unsubscribe (itself included) while being called.

use crate::api::ApiConfig;
use crate::error::GeocoderError;
use crate::model::{Feature, ResultItem};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Clear,
    Loading,
    Results,
    Result,
    Error,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Clear => "clear",
            EventKind::Loading => "loading",
            EventKind::Results => "results",
            EventKind::Result => "result",
            EventKind::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "clear" => EventKind::Clear,
            "loading" => EventKind::Loading,
            "results" => EventKind::Results,
            "result" => EventKind::Result,
            "error" => EventKind::Error,
            _ => return None,
        })
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub enum GeocoderEvent {
    /// The input was cleared.
    Clear,
    /// A request is about to be dispatched.
    Loading { query: String },
    /// A response was reconciled; `results` is what the dropdown shows.
    Results {
        query: String,
        config: ApiConfig,
        results: Vec<ResultItem>,
    },
    /// A feature was selected.
    Result { result: Feature },
    Error { error: Rc<GeocoderError> },
}

impl GeocoderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GeocoderEvent::Clear => EventKind::Clear,
            GeocoderEvent::Loading { .. } => EventKind::Loading,
            GeocoderEvent::Results { .. } => EventKind::Results,
            GeocoderEvent::Result { .. } => EventKind::Result,
            GeocoderEvent::Error { .. } => EventKind::Error,
        }
    }
}

/// Handle returned by [`EventEmitter::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&GeocoderEvent)>;

struct Entry {
    kind: EventKind,
    id: ListenerId,
    once: bool,
    listener: Listener,
}

#[derive(Default)]
pub struct EventEmitter {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&GeocoderEvent) + 'static,
    {
        self.push(kind, false, Rc::new(listener))
    }

    /// Resolves with the next event of `kind`; `None` if the emitter is
    /// dropped first.
    pub fn once(&self, kind: EventKind) -> impl Future<Output = Option<GeocoderEvent>> + 'static {
        let (tx, rx) = oneshot::channel();
        let tx = RefCell::new(Some(tx));
        self.push(
            kind,
            true,
            Rc::new(move |event: &GeocoderEvent| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(event.clone());
                }
            }),
        );
        async move { rx.await.ok() }
    }

    /// Returns `false` if no such listener was registered for `kind`.
    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| !(e.kind == kind && e.id == id));
        entries.len() != before
    }

    pub fn emit(&self, event: &GeocoderEvent) {
        let kind = event.kind();
        let snapshot: Vec<Listener> = {
            let mut entries = self.entries.borrow_mut();
            let matching = entries
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| e.listener.clone())
                .collect();
            entries.retain(|e| !(e.kind == kind && e.once));
            matching
        };
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    fn push(&self, kind: EventKind, once: bool, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry {
            kind,
            id,
            once,
            listener,
        });
        id
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn listeners_run_in_registration_order() {
        let emitter = EventEmitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let log = log.clone();
            emitter.on(EventKind::Clear, move |_| log.borrow_mut().push(n));
        }
        emitter.emit(&GeocoderEvent::Clear);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn off_removes_only_the_given_listener() {
        let emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = emitter.on(EventKind::Clear, move |_| h.set(h.get() + 1));
        let h = hits.clone();
        emitter.on(EventKind::Clear, move |_| h.set(h.get() + 10));

        assert!(emitter.off(EventKind::Clear, id));
        assert!(!emitter.off(EventKind::Clear, id));
        assert!(!emitter.off(EventKind::Loading, id));
        emitter.emit(&GeocoderEvent::Clear);
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn events_only_reach_their_kind() {
        let emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        emitter.on(EventKind::Loading, move |_| h.set(h.get() + 1));
        emitter.emit(&GeocoderEvent::Clear);
        emitter.emit(&GeocoderEvent::Loading {
            query: "x".into(),
        });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn once_resolves_with_the_next_event_and_unregisters() {
        let emitter = EventEmitter::new();
        let next = emitter.once(EventKind::Loading);
        assert_eq!(emitter.listener_count(EventKind::Loading), 1);

        emitter.emit(&GeocoderEvent::Loading {
            query: "paris".into(),
        });
        assert_eq!(emitter.listener_count(EventKind::Loading), 0);

        match block_on(next) {
            Some(GeocoderEvent::Loading { query }) => assert_eq!(query, "paris"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn once_yields_none_when_emitter_dropped() {
        let emitter = EventEmitter::new();
        let next = emitter.once(EventKind::Result);
        drop(emitter);
        assert!(block_on(next).is_none());
    }

    #[test]
    fn listener_may_unsubscribe_during_dispatch() {
        let emitter = Rc::new(EventEmitter::new());
        let id_slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let e = emitter.clone();
        let slot = id_slot.clone();
        let id = emitter.on(EventKind::Clear, move |_| {
            if let Some(id) = slot.get() {
                e.off(EventKind::Clear, id);
            }
        });
        id_slot.set(Some(id));
        emitter.emit(&GeocoderEvent::Clear);
        assert_eq!(emitter.listener_count(EventKind::Clear), 0);
    }
}
