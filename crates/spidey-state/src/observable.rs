//! Observable cells with explicit subscriber lists.
//!
//! # Delivery rules
//!
//! 1. `subscribe` invokes the callback once with the current value before it
//!    returns.
//! 2. A mutation targets the subscribers registered at the moment the value
//!    is replaced, notified in registration order.
//! 3. A subscriber added while a notification is running only sees later
//!    mutations.
//! 4. A subscriber removed while a notification is running is not invoked
//!    again, not even later in the same pass.
//! 5. Every notification caused by a mutation has been delivered by the time
//!    the outermost mutating call returns. A mutation made from inside a
//!    callback is queued behind the pass in progress, so subscribers always
//!    observe values in mutation order.
//! 6. If a callback panics, the rest of that pass is abandoned. Mutations it
//!    had already queued are delivered, in order, ahead of the next mutation.
//!
//! Mutations and their delivery are serialized per cell by a reentrant writer
//! gate, so callbacks may read, mutate, subscribe or unsubscribe on the cell
//! that is notifying them. The value itself is never locked while a callback
//! runs.

use parking_lot::{Mutex, ReentrantMutex};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            callback: Arc::clone(&self.callback),
        }
    }
}

struct Slot<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

/// A value paired with the subscribers that were registered when it was set.
struct Delivery<T> {
    value: T,
    targets: Vec<Subscriber<T>>,
}

struct Queue<T> {
    pending: VecDeque<Delivery<T>>,
    draining: bool,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    gate: ReentrantMutex<RefCell<Queue<T>>>,
}

/// Type-erased removal hook so [`Subscription`] doesn't carry the value type.
trait Unregister: Send + Sync {
    fn unregister(&self, id: u64, active: &AtomicBool);
}

impl<T: Send + 'static> Unregister for Shared<T> {
    fn unregister(&self, id: u64, active: &AtomicBool) {
        // Waits out a delivery running on another thread; reentrant on this one.
        let _gate = self.gate.lock();
        if !active.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut slot = self.slot.lock();
        slot.subscribers.retain(|s| s.id != id);
        tracing::debug!(id, remaining = slot.subscribers.len(), "subscriber removed");
    }
}

/// Resets the draining flag even if a callback panics mid-pass. Deliveries
/// still queued at that point stay queued for the next pass.
struct DrainGuard<'a, T> {
    queue: &'a RefCell<Queue<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        self.queue.borrow_mut().draining = false;
    }
}

/// A shared, mutable value that notifies subscribers on every mutation.
///
/// Cloning an `Observable` yields another handle to the same cell.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cell holding `initial` with no subscribers.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    value: initial,
                    subscribers: Vec::new(),
                    next_id: 0,
                }),
                gate: ReentrantMutex::new(RefCell::new(Queue {
                    pending: VecDeque::new(),
                    draining: false,
                })),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.slot.lock().value.clone()
    }

    /// Run `f` against the current value without cloning it.
    ///
    /// Like [`Observable::update`], `f` must not call back into this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.slot.lock().value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(move |current| *current = value);
    }

    /// Mutate the value in place and notify subscribers.
    ///
    /// `f` runs while the value is locked and must not call back into this
    /// cell.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let gate = self.shared.gate.lock();

        let delivery = {
            let mut slot = self.shared.slot.lock();
            f(&mut slot.value);
            if slot.subscribers.is_empty() {
                None
            } else {
                Some(Delivery {
                    value: slot.value.clone(),
                    targets: slot.subscribers.clone(),
                })
            }
        };
        let Some(delivery) = delivery else {
            tracing::trace!("value changed, no subscribers");
            return;
        };
        tracing::trace!(targets = delivery.targets.len(), "value changed");

        let queue: &RefCell<Queue<T>> = &gate;
        queue.borrow_mut().pending.push_back(delivery);
        if queue.borrow().draining {
            // An outer call on this thread is mid-pass and will deliver it.
            return;
        }

        queue.borrow_mut().draining = true;
        let _guard = DrainGuard { queue };
        loop {
            let next = queue.borrow_mut().pending.pop_front();
            let Some(delivery) = next else {
                break;
            };
            for subscriber in &delivery.targets {
                if subscriber.active.load(Ordering::Acquire) {
                    (subscriber.callback)(&delivery.value);
                }
            }
        }
    }

    /// Register `callback`, invoke it with the current value, then again on
    /// every subsequent mutation until the returned handle is unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _gate = self.shared.gate.lock();

        let active = Arc::new(AtomicBool::new(true));
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut slot = self.shared.slot.lock();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.subscribers.push(Subscriber {
                id,
                active: Arc::clone(&active),
                callback: Arc::clone(&callback),
            });
            (id, slot.value.clone())
        };
        tracing::debug!(id, "subscriber added");

        let owner: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        let owner: Weak<dyn Unregister> = owner;
        let subscription = Subscription { id, active, owner };

        callback(&current);
        subscription
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.slot.lock().subscribers.len()
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot.lock();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("subscribers", &slot.subscribers.len())
            .finish()
    }
}

/// Handle returned by [`Observable::subscribe`].
///
/// Dropping the handle leaves the subscription in place; call
/// [`Subscription::unsubscribe`] to remove it. Clones refer to the same
/// registration.
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    owner: Weak<dyn Unregister>,
}

impl Subscription {
    /// Permanently stop notifications to this subscriber.
    ///
    /// Repeated calls, and calls after the cell has been dropped, do nothing.
    pub fn unsubscribe(&self) {
        match self.owner.upgrade() {
            Some(owner) => owner.unregister(self.id, &self.active),
            None => self.active.store(false, Ordering::Release),
        }
    }

    /// Whether the subscriber is still registered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.owner.strong_count() > 0
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
