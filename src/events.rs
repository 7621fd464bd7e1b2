//! In-process publish/subscribe bus shared by the round store, projectors and accounts.
//!
//! Delivery is synchronous and in registration order. An event published while another is
//! being delivered is queued and delivered once the current one finishes, so handlers may
//! publish freely. Subscriptions added or removed during delivery apply from the next event.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::account::UserSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A persisted document changed; carries the storage key that was written.
    DataUpdated { key: String },
    /// Request to expand and scroll to a zero-based hole index.
    SelectHole(usize),
    AuthChanged(Option<UserSummary>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&AppEvent) + Send>;

struct Subscriber {
    id: SubscriptionId,
    handler: Handler,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
    queue: VecDeque<AppEvent>,
    dispatching: bool,
    removed_while_dispatching: HashSet<SubscriptionId>,
}

#[derive(Default)]
pub struct EventBus {
    state: Mutex<BusState>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: FnMut(&AppEvent) + Send + 'static,
    {
        let mut state = self.lock();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.subscribers.push(Subscriber {
            id,
            handler: Box::new(handler),
        });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.lock();
        state.subscribers.retain(|s| s.id != id);
        if state.dispatching {
            state.removed_while_dispatching.insert(id);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn publish(&self, event: AppEvent) {
        {
            let mut state = self.lock();
            state.queue.push_back(event);
            if state.dispatching {
                return;
            }
            state.dispatching = true;
        }

        loop {
            // Handlers run without the lock held so they can publish or (un)subscribe.
            let (event, taken) = {
                let mut state = self.lock();
                let Some(event) = state.queue.pop_front() else {
                    state.dispatching = false;
                    state.removed_while_dispatching.clear();
                    return;
                };
                (event, std::mem::take(&mut state.subscribers))
            };

            let mut delivery = Delivery {
                bus: self,
                subscribers: taken,
            };
            for subscriber in &mut delivery.subscribers {
                let skip = self
                    .lock()
                    .removed_while_dispatching
                    .contains(&subscriber.id);
                if !skip {
                    (subscriber.handler)(&event);
                }
            }
        }
    }
}

/// Subscribers taken out of the bus for one event. Dropping puts them back, also on panic.
struct Delivery<'a> {
    bus: &'a EventBus,
    subscribers: Vec<Subscriber>,
}

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        let mut state = self.bus.lock();
        let removed = std::mem::take(&mut state.removed_while_dispatching);
        let mut current = std::mem::take(&mut self.subscribers);
        current.retain(|s| !removed.contains(&s.id));
        current.extend(std::mem::take(&mut state.subscribers));
        state.subscribers = current;
        if std::thread::panicking() {
            // The publishing loop is unwinding; let the next publish deliver.
            state.dispatching = false;
        }
    }
}
