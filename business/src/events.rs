//! Fan-out of view events to any number of subscribers.

use std::sync::Mutex;

use crate::locked;

/// One channel per subscriber. Publishing clones the event into each live
/// channel and forgets subscribers whose receiver was dropped, so nothing is
/// queued when nobody listens.
pub(crate) struct Subscribers<T> {
    senders: Mutex<Vec<flume::Sender<T>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> Subscribers<T> {
    /// Receiver of every event published from now on.
    pub(crate) fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        locked(&self.senders).push(sender);
        receiver
    }

    pub(crate) fn publish(&self, event: &T) {
        locked(&self.senders).retain(|sender| sender.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        locked(&self.senders).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_sees_every_event() {
        let subscribers = Subscribers::default();
        let first = subscribers.subscribe();
        let second = subscribers.subscribe();

        subscribers.publish(&1);
        subscribers.publish(&2);

        assert_eq!(first.try_iter().collect::<Vec<i32>>(), vec![1, 2]);
        assert_eq!(second.try_iter().collect::<Vec<i32>>(), vec![1, 2]);
    }

    #[test]
    fn test_nothing_is_kept_without_subscribers() {
        let subscribers = Subscribers::default();
        for n in 0..1000 {
            subscribers.publish(&n);
        }
        assert_eq!(subscribers.len(), 0);

        let late = subscribers.subscribe();
        subscribers.publish(&7);
        assert_eq!(late.try_iter().collect::<Vec<i32>>(), vec![7]);
    }

    #[test]
    fn test_dropped_receiver_is_forgotten() {
        let subscribers = Subscribers::default();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());

        subscribers.publish(&"shown");
        assert_eq!(subscribers.len(), 1);
        assert_eq!(kept.len(), 1);
    }
}
