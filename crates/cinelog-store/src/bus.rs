use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// Topics carried by the change bus. A publish carries no payload beyond
/// "something under this topic changed, re-fetch".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Reviews,
    Watchlist,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Reviews => "reviews-changed",
            Topic::Watchlist => "watchlist-changed",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: HashMap<Topic, Vec<(u64, Callback)>>,
}

/// In-process broadcast signal decoupling collection writers from the views
/// that render them. Cloning yields another handle to the same registry, so
/// every store and view can hold one.
///
/// Publish is synchronous; callbacks run after the registry lock is released,
/// so a subscriber may itself query stores or publish.
#[derive(Clone, Default)]
pub struct ChangeBus {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `topic`. The subscription lasts as long as the
    /// returned guard is held; dropping it unsubscribes.
    pub fn subscribe(&self, topic: Topic, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .subscribers
            .entry(topic)
            .or_default()
            .push((id, Arc::new(callback)));
        debug!("Subscribed #{} to {}", id, topic);
        Subscription {
            registry: Arc::downgrade(&self.registry),
            topic,
            id,
        }
    }

    /// Notify every current subscriber of `topic`. Fire-and-forget: no payload,
    /// no delivery report.
    pub fn publish(&self, topic: Topic) {
        let callbacks: Vec<Callback> = {
            let registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            registry
                .subscribers
                .get(&topic)
                .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default()
        };
        debug!("Publishing {} to {} subscriber(s)", topic, callbacks.len());
        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        let registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        registry.subscribers.get(&topic).map_or(0, Vec::len)
    }
}

/// RAII guard for one subscription. Unsubscribes on drop, so a view that goes
/// away stops receiving re-fetch signals with it.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    topic: Topic,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(subs) = registry.subscribers.get_mut(&self.topic) {
                subs.retain(|(id, _)| *id != self.id);
            }
            debug!("Unsubscribed #{} from {}", self.id, self.topic);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let _sub = bus.subscribe(Topic::Reviews, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(Topic::Reviews);
        bus.publish(Topic::Reviews);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_topics_are_isolated() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let _sub = bus.subscribe(Topic::Watchlist, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(Topic::Reviews);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        bus.publish(Topic::Watchlist);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_stops_receiving() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let sub = bus.subscribe(Topic::Reviews, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(Topic::Reviews);
        drop(sub);
        bus.publish(Topic::Reviews);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(Topic::Reviews), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_notified() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = Arc::clone(&hits);
        let b = Arc::clone(&hits);
        let _sub_a = bus.subscribe(Topic::Reviews, move || {
            a.fetch_add(1, Ordering::SeqCst);
        });
        let _sub_b = bus.subscribe(Topic::Reviews, move || {
            b.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(Topic::Reviews);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_callback_may_publish_again() {
        // A subscriber re-reading through the stores must not deadlock even if
        // that path publishes to another topic.
        let bus = ChangeBus::new();
        let bus_in_cb = bus.clone();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_cb = Arc::clone(&hits);
        let _watch = bus.subscribe(Topic::Watchlist, move || {
            hits_in_cb.fetch_add(1, Ordering::SeqCst);
        });
        let _rev = bus.subscribe(Topic::Reviews, move || {
            bus_in_cb.publish(Topic::Watchlist);
        });

        bus.publish(Topic::Reviews);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
