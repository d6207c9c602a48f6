//! Pull-style iteration over published events
//!
//! [`Channel::iter`](crate::Channel::iter) installs a tap listener that copies
//! every event of one kind into a queue. `EventIterator` drains that queue:
//! - Blocking: `recv()`, `for event in iter`
//! - Non-blocking: `try_recv()`, `try_iter()`
//! - Timeout: `recv_timeout()`, `timeout_iter()`

use std::sync::mpsc;
use std::time::Duration;

use crate::channel::WeakChannel;
use crate::event::{Event, SubscriptionId};

/// Iterator over events of one kind, fed by a tap on the channel
///
/// Dropping the iterator (or calling [`close`](Self::close)) removes the tap.
///
/// # Example
///
/// ```rust,ignore
/// let started = channel.iter(PlayerKind::Started);
///
/// channel.publish(&PlayerEvent::Started("item1".into()))?;
///
/// for event in started.try_iter() {
///     println!("started: {:?}", event);
/// }
/// ```
pub struct EventIterator<E: Event> {
    rx: mpsc::Receiver<E>,
    id: SubscriptionId,
    channel: WeakChannel<E>,
    closed: bool,
}

impl<E: Event> EventIterator<E> {
    pub(crate) fn new(rx: mpsc::Receiver<E>, id: SubscriptionId, channel: WeakChannel<E>) -> Self {
        Self {
            rx,
            id,
            channel,
            closed: false,
        }
    }

    /// Handle of the tap listener backing this iterator
    pub fn subscription_id(&self) -> SubscriptionId {
        self.id
    }

    /// Block until the next event is available
    ///
    /// Returns `None` once the tap is closed or the channel is gone and the
    /// queue has been drained.
    pub fn recv(&self) -> Option<E> {
        self.rx.recv().ok()
    }

    /// Block until the next event or timeout expires
    pub fn recv_timeout(&self, timeout: Duration) -> Option<E> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Take the next queued event without blocking
    pub fn try_recv(&self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    /// Non-blocking iterator over the events queued so far
    pub fn try_iter(&self) -> TryIter<'_, E> {
        TryIter { inner: self }
    }

    /// Iterator that waits up to `timeout` for each event
    pub fn timeout_iter(&self, timeout: Duration) -> TimeoutIter<'_, E> {
        TimeoutIter {
            inner: self,
            timeout,
        }
    }

    /// Remove the tap from the channel
    ///
    /// Events already queued can still be drained with `try_recv`.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(channel) = self.channel.upgrade() {
            channel.unsubscribe(self.id);
        }
    }
}

impl<E: Event> Iterator for EventIterator<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

impl<E: Event> Drop for EventIterator<E> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Non-blocking iterator over queued events
pub struct TryIter<'a, E: Event> {
    inner: &'a EventIterator<E>,
}

impl<'a, E: Event> Iterator for TryIter<'a, E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

/// Blocking iterator with timeout
pub struct TimeoutIter<'a, E: Event> {
    inner: &'a EventIterator<E>,
    timeout: Duration,
}

impl<'a, E: Event> Iterator for TimeoutIter<'a, E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv_timeout(self.timeout)
    }
}
