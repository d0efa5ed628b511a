//! Push-style subscription channel
//!
//! A single-threaded stand-in for the hosted backend's realtime feed:
//! `subscribe` registers a handler and returns a [`Subscription`]; every
//! `publish` redelivers the payload to each live handler. Dropping the
//! subscription releases it, so a view that owns its subscriptions stops
//! receiving updates when it is torn down.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    /// Slot is `None` while its handler is running
    handlers: Vec<(u64, Option<Handler<T>>)>,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: u64) {
        self.handlers.retain(|(slot, _)| *slot != id);
    }
}

/// A named broadcast channel
pub struct Channel<T> {
    name: String,
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Channel<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Rc::new(RefCell::new(Registry {
                next_id: 1,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a handler for every future publish
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.handlers.push((id, Some(Box::new(handler))));
            id
        };
        log::debug!("channel '{}': subscriber {} joined", self.name, id);

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Deliver `message` to every live handler. Returns the delivery count.
    ///
    /// Handlers may subscribe or unsubscribe from inside a delivery;
    /// subscribers added during a publish first see the next one.
    pub fn publish(&self, message: &T) -> usize {
        let ids: Vec<u64> = self.registry.borrow().handlers.iter().map(|(id, _)| *id).collect();
        let mut delivered = 0;

        for id in ids {
            let taken = {
                let mut reg = self.registry.borrow_mut();
                reg.handlers
                    .iter_mut()
                    .find(|(slot, _)| *slot == id)
                    .and_then(|(_, handler)| handler.take())
            };
            let Some(mut handler) = taken else { continue };

            handler(message);
            delivered += 1;

            let mut reg = self.registry.borrow_mut();
            if let Some((_, slot)) = reg.handlers.iter_mut().find(|(slot, _)| *slot == id) {
                *slot = Some(handler);
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Live registration on a [`Channel`]; released on drop
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Release explicitly (same as dropping)
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let channel = Channel::<u32>::new("scores");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = seen.clone();
            channel.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = seen.clone();
            channel.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };

        assert_eq!(channel.publish(&7), 2);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let channel = Channel::<u32>::new("scores");
        let count = Rc::new(RefCell::new(0));
        let sub = {
            let count = count.clone();
            channel.subscribe(move |_| *count.borrow_mut() += 1)
        };
        channel.publish(&1);
        drop(sub);
        assert_eq!(channel.subscriber_count(), 0);
        assert_eq!(channel.publish(&2), 0);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let channel = Channel::<()>::new("ping");
        let sub = channel.subscribe(|_| {});
        assert_eq!(channel.subscriber_count(), 1);
        sub.unsubscribe();
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_channel() {
        let channel = Channel::<u8>::new("gone");
        let sub = channel.subscribe(|_| {});
        drop(channel);
        drop(sub);
    }

    #[test]
    fn test_handler_can_unsubscribe_itself() {
        let channel = Rc::new(Channel::<u32>::new("once"));
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let sub = {
            let holder = holder.clone();
            let calls = calls.clone();
            channel.subscribe(move |_| {
                *calls.borrow_mut() += 1;
                holder.borrow_mut().take();
            })
        };
        *holder.borrow_mut() = Some(sub);

        channel.publish(&1);
        channel.publish(&2);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_during_publish_waits_for_next() {
        let channel = Rc::new(Channel::<u32>::new("grow"));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let _first = {
            let channel = channel.clone();
            let late = late.clone();
            channel.clone().subscribe(move |_| {
                if late.borrow().is_empty() {
                    let sub = channel.subscribe(|_| {});
                    late.borrow_mut().push(sub);
                }
            })
        };
        assert_eq!(channel.publish(&1), 1);
        assert_eq!(channel.publish(&2), 2);
    }
}
