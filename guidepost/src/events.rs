// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed listener registration.
//!
//! Configs stay free of closures: components own a [`Listeners`] registry, hosts subscribe to
//! an [`EventKind`] and keep the returned [`ListenerId`] to unsubscribe later.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

/// Events emitted by interactive guides.
#[derive(Clone, Debug, PartialEq)]
pub enum GuideEvent {
    /// A category legend item was picked.
    ItemClick {
        /// Index of the item in the legend's item list.
        index: usize,
        /// The item's stable id, if it has one.
        id: Option<String>,
    },
    /// A continuous legend selection changed.
    ValueChanged {
        /// The new selection (one threshold or a `[lo, hi]` pair).
        value: SmallVec<[f64; 2]>,
    },
    /// A following tooltip moved to a new anchor.
    TooltipMoved {
        /// The new anchor point.
        anchor: Point,
    },
}

impl GuideEvent {
    /// Returns the event's kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ItemClick { .. } => EventKind::ItemClick,
            Self::ValueChanged { .. } => EventKind::ValueChanged,
            Self::TooltipMoved { .. } => EventKind::TooltipMoved,
        }
    }
}

/// The discriminant of a [`GuideEvent`], used for subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`GuideEvent::ItemClick`].
    ItemClick,
    /// See [`GuideEvent::ValueChanged`].
    ValueChanged,
    /// See [`GuideEvent::TooltipMoved`].
    TooltipMoved,
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&GuideEvent)>;

/// A registry of event listeners owned by one component.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Callback)>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|(id, kind, _)| (*id, *kind))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Listeners {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&GuideEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, Box::new(callback)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls every listener subscribed to the event's kind, in subscription order.
    ///
    /// Returns how many listeners were called.
    pub fn emit(&mut self, event: &GuideEvent) -> usize {
        let kind = event.kind();
        let mut called = 0;
        for (_, entry_kind, callback) in &mut self.entries {
            if *entry_kind == kind {
                callback(event);
                called += 1;
            }
        }
        log::trace!(kind:? = kind, listeners = called; "emitted guide event");
        called
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::RefCell;

    use smallvec::smallvec;

    use super::*;

    #[test]
    fn only_matching_kinds_are_notified() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let sink = Rc::clone(&seen);
        listeners.subscribe(EventKind::ValueChanged, move |ev| {
            sink.borrow_mut().push(ev.clone());
        });

        let called = listeners.emit(&GuideEvent::ItemClick { index: 0, id: None });
        assert_eq!(called, 0);

        let ev = GuideEvent::ValueChanged {
            value: smallvec![1.0, 2.0],
        };
        assert_eq!(listeners.emit(&ev), 1);
        assert_eq!(seen.borrow().as_slice(), &[ev]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let count = Rc::new(RefCell::new(0_u32));
        let mut listeners = Listeners::new();

        let a = Rc::clone(&count);
        let first = listeners.subscribe(EventKind::TooltipMoved, move |_| *a.borrow_mut() += 1);
        let b = Rc::clone(&count);
        listeners.subscribe(EventKind::TooltipMoved, move |_| *b.borrow_mut() += 10);

        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        assert_eq!(listeners.len(), 1);

        listeners.emit(&GuideEvent::TooltipMoved {
            anchor: Point::ZERO,
        });
        assert_eq!(*count.borrow(), 10);
    }
}
