//! Replay-latest, multicast state streams.
//!
//! A [`StateStream`] always holds a current value. Subscribing replays that
//! value to the new subscriber synchronously, and every later
//! [`StateStream::publish`] is delivered to each live subscriber exactly once,
//! in registration order. Everything is single-threaded (`Rc<RefCell<..>>`);
//! the simulation and its renderers share one execution context.
//!
//! Subscribers added while a notification is in progress receive only the
//! replay of the value being published, never a duplicate. Subscribers
//! removed mid-notification are not called again.

use std::cell::{Cell as FlagCell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T> {
    id: u64,
    active: Rc<FlagCell<bool>>,
    callback: Callback<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

struct Inner<T> {
    latest: T,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

/// Shared handle to a stream. Clones observe the same value and
/// subscriber list.
pub struct StateStream<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for StateStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> StateStream<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                latest: initial,
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Current value
    pub fn latest(&self) -> T {
        self.inner.borrow().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Register `callback` and immediately replay the current value to it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        let active = Rc::new(FlagCell::new(true));

        let (id, replay) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                active: Rc::clone(&active),
                callback: Rc::clone(&callback),
            });
            (id, inner.latest.clone())
        };

        (*callback.borrow_mut())(&replay);

        let inner = Rc::downgrade(&self.inner);
        Subscription {
            active,
            detach: Some(Box::new(move || detach(&inner, id))),
        }
    }

    /// Replace the current value and notify every subscriber.
    pub(crate) fn publish(&self, value: T) {
        self.stage(value).deliver();
    }

    /// Replace the current value without notifying anyone yet. The
    /// returned [`Pending`] delivers to the subscribers registered now.
    pub(crate) fn stage(&self, value: T) -> Pending<T> {
        let mut inner = self.inner.borrow_mut();
        inner.latest = value.clone();
        Pending {
            value,
            entries: inner.entries.clone(),
        }
    }

    /// Read-only view for collaborators that must not publish
    pub fn observer(&self) -> StateObserver<T> {
        StateObserver {
            stream: self.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> StateStream<T> {
    /// Publish only when the value differs from the current one.
    /// Returns whether anything was published.
    pub(crate) fn publish_if_changed(&self, value: T) -> bool {
        match self.stage_if_changed(value) {
            Some(pending) => {
                pending.deliver();
                true
            }
            None => false,
        }
    }

    pub(crate) fn stage_if_changed(&self, value: T) -> Option<Pending<T>> {
        if self.inner.borrow().latest == value {
            return None;
        }
        Some(self.stage(value))
    }
}

/// A value already stored as latest, waiting to be delivered
#[must_use = "a staged value reaches no subscriber until delivered"]
pub(crate) struct Pending<T> {
    value: T,
    entries: Vec<Entry<T>>,
}

impl<T> Pending<T> {
    pub(crate) fn deliver(self) {
        for entry in self.entries {
            if entry.active.get() {
                (*entry.callback.borrow_mut())(&self.value);
            }
        }
    }
}

/// Subscribe-only view of a [`StateStream`].
///
/// Frontends receive these from a `GameHandle`; nothing reachable from an
/// observer can change the value:
///
/// ```compile_fail
/// use life_stream::{Game, GameOptions, Grid};
///
/// let game = Game::new(Grid::dead(3, 3), GameOptions::default());
/// game.handle().is_running().publish(true);
/// ```
pub struct StateObserver<T> {
    stream: StateStream<T>,
}

impl<T> Clone for StateObserver<T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

impl<T: Clone + 'static> StateObserver<T> {
    pub fn latest(&self) -> T {
        self.stream.latest()
    }

    pub fn subscriber_count(&self) -> usize {
        self.stream.subscriber_count()
    }

    /// Register `callback` and immediately replay the current value to it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        self.stream.subscribe(callback)
    }
}

fn detach<T>(inner: &Weak<RefCell<Inner<T>>>, id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner.borrow_mut().entries.retain(|entry| entry.id != id);
    }
}

/// RAII guard for one subscriber. Dropping it (or calling
/// [`Subscription::unsubscribe`]) detaches the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    active: Rc<FlagCell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    fn release(&mut self) {
        self.active.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Collects subscriptions so an owner can release all of them at once.
#[derive(Default)]
pub struct DisposeBag {
    subscriptions: Vec<Subscription>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn dispose(&mut self) {
        self.subscriptions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_subscribe_replays_latest() {
        let stream = StateStream::new(1);
        stream.publish(2);

        let (seen, callback) = recorder();
        let _sub = stream.subscribe(callback);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_every_publish_delivered_once_in_order() {
        let stream = StateStream::new(0);
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        let _a = stream.subscribe(cb1);
        let _b = stream.subscribe(cb2);

        for value in 1..=3 {
            stream.publish(value);
        }

        assert_eq!(*first.borrow(), vec![0, 1, 2, 3]);
        assert_eq!(*second.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let stream = StateStream::new(0);
        let (seen, callback) = recorder();
        let sub = stream.subscribe(callback);
        assert_eq!(stream.subscriber_count(), 1);

        drop(sub);
        stream.publish(5);
        assert_eq!(stream.subscriber_count(), 0);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_publish_if_changed_skips_duplicates() {
        let stream = StateStream::new(false);
        let (seen, callback) = recorder();
        let _sub = stream.subscribe(callback);

        assert!(!stream.publish_if_changed(false));
        assert!(stream.publish_if_changed(true));
        assert!(!stream.publish_if_changed(true));
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_subscribe_during_notification_gets_only_replay() {
        let stream = StateStream::new(0);
        let late: Rc<RefCell<Vec<i32>>> = Rc::default();
        let late_subs: Rc<RefCell<Vec<Subscription>>> = Rc::default();

        let outer_stream = stream.clone();
        let outer_late = Rc::clone(&late);
        let outer_subs = Rc::clone(&late_subs);
        let _sub = stream.subscribe(move |value| {
            if *value == 1 {
                let sink = Rc::clone(&outer_late);
                let sub = outer_stream.subscribe(move |v| sink.borrow_mut().push(*v));
                outer_subs.borrow_mut().push(sub);
            }
        });

        stream.publish(1);
        stream.publish(2);
        assert_eq!(*late.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_during_notification_stops_delivery() {
        let stream = StateStream::new(0);
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let (seen, callback) = recorder();

        let killer_victim = Rc::clone(&victim);
        let _killer = stream.subscribe(move |value| {
            if *value == 1 {
                killer_victim.borrow_mut().take();
            }
        });
        *victim.borrow_mut() = Some(stream.subscribe(callback));

        stream.publish(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_staged_values_are_latest_before_delivery() {
        let running = StateStream::new(false);
        let level = StateStream::new(0);
        let seen: Rc<RefCell<Vec<i32>>> = Rc::default();

        let sink = Rc::clone(&seen);
        let level_view = level.observer();
        let _sub = running.subscribe(move |_| sink.borrow_mut().push(level_view.latest()));

        let first = running.stage(true);
        let second = level.stage_if_changed(7);
        first.deliver();
        second.into_iter().for_each(Pending::deliver);

        assert_eq!(*seen.borrow(), vec![0, 7]);
        assert!(level.stage_if_changed(7).is_none());
    }

    #[test]
    fn test_observer_shares_value_and_subscribers() {
        let stream = StateStream::new(1);
        let observer = stream.observer();
        let (seen, callback) = recorder();
        let _sub = observer.subscribe(callback);

        stream.publish(2);
        assert_eq!(observer.latest(), 2);
        assert_eq!(stream.subscriber_count(), observer.subscriber_count());
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_dispose_bag_releases_everything() {
        let stream = StateStream::new(0);
        let mut bag = DisposeBag::new();
        bag.add(stream.subscribe(|_| {}));
        bag.add(stream.subscribe(|_| {}));
        assert_eq!(stream.subscriber_count(), 2);

        bag.dispose();
        assert!(bag.is_empty());
        assert_eq!(stream.subscriber_count(), 0);
    }
}
