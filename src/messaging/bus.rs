/// Event bus for sound plugin notifications
///
/// Subscribers get their own unbounded channel; publishing never blocks the
/// native worker.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;

use super::events::SoundEvent;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<SoundEvent>,
}

#[derive(Default)]
struct BusInner {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicUsize,
}

/// Broadcasts [`SoundEvent`]s to every subscriber. Clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<SoundEvent>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        self.inner
            .subscribers
            .write()
            .push(Subscriber { id, sender: tx });

        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers.
    ///
    /// Subscribers whose receiver was dropped are removed.
    pub fn publish(&self, event: SoundEvent) {
        let mut disconnected = Vec::new();
        {
            let subscribers = self.inner.subscribers.read();
            for subscriber in subscribers.iter() {
                if let Err(TrySendError::Disconnected(_)) =
                    subscriber.sender.try_send(event.clone())
                {
                    disconnected.push(subscriber.id);
                }
            }
        }

        if !disconnected.is_empty() {
            self.inner
                .subscribers
                .write()
                .retain(|s| !disconnected.contains(&s.id));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(path: &str) -> SoundEvent {
        SoundEvent::AssetLoaded {
            asset_path: path.to_string(),
        }
    }

    #[test]
    fn test_event_bus_subscribe_unsubscribe() {
        let bus = EventBus::new();
        let (_rx, id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.unsubscribe(id);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_bus_publish_to_all() {
        let bus = EventBus::new();
        let (rx1, _id1) = bus.subscribe();
        let (rx2, _id2) = bus.subscribe();

        bus.publish(loaded("click.wav"));

        assert_eq!(rx1.try_recv().unwrap(), loaded("click.wav"));
        assert_eq!(rx2.try_recv().unwrap(), loaded("click.wav"));
    }

    #[test]
    fn test_event_bus_prunes_dropped_receivers() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        let (_kept, _id) = bus.subscribe();
        drop(rx);

        bus.publish(SoundEvent::Shutdown);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let (rx, _id) = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);

        bus2.publish(SoundEvent::Shutdown);
        assert_eq!(rx.try_recv().unwrap(), SoundEvent::Shutdown);
    }

    #[test]
    fn test_subscriber_ids_are_unique() {
        let bus = EventBus::new();
        let (_rx1, id1) = bus.subscribe();
        let (_rx2, id2) = bus.subscribe();
        assert_ne!(id1, id2);
    }
}
