//! Listener registry and synchronous dispatch
//!
//! This module provides the core pub/sub primitive:
//! - `Channel<E>`: kind -> ordered listener list, with publish/subscribe/unsubscribe
//! - `WeakChannel<E>`: non-owning handle for listeners that need to publish back
//! - `DispatchPolicy`: what happens when a listener returns an error

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{ChannelError, ListenerResult, Result};
use crate::event::{Event, SubscriptionId};
use crate::iter::EventIterator;

type Callback<E> = Arc<dyn Fn(&E) -> ListenerResult + Send + Sync>;
type Registry<E> = HashMap<<E as Event>::Kind, Vec<ListenerRecord<E>>>;

// ============================================================================
// DispatchPolicy
// ============================================================================

/// How `publish` reacts to a failing listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Stop at the first failing listener and return its error.
    /// Listeners registered after it are not invoked.
    #[default]
    FailFast,
    /// Log each failure and keep dispatching to the remaining listeners.
    Isolate,
}

// ============================================================================
// ListenerRecord
// ============================================================================

struct ListenerRecord<E: Event> {
    id: SubscriptionId,
    callback: Callback<E>,
}

// ============================================================================
// Channel<E>
// ============================================================================

/// In-process publish/subscribe channel
///
/// Listeners are closures registered per event kind. `publish` invokes every
/// listener of the event's kind synchronously, in registration order, on the
/// caller's thread. Clones share the same registry.
///
/// Dispatch iterates over a snapshot of the listener list, and the registry
/// lock is never held while a listener runs. Listeners can therefore publish,
/// subscribe or unsubscribe re-entrantly; registry changes made during a
/// dispatch apply from the next `publish` on.
///
/// # Example
///
/// ```rust,ignore
/// let channel = Channel::<PlayerEvent>::new();
///
/// let id = channel.subscribe(PlayerKind::Started, |event| {
///     println!("started: {:?}", event);
///     Ok(())
/// });
///
/// channel.publish(&PlayerEvent::Started("item1".into()))?;
/// channel.unsubscribe(id);
/// ```
pub struct Channel<E: Event> {
    listeners: Arc<RwLock<Registry<E>>>,
    next_id: Arc<AtomicU64>,
    policy: DispatchPolicy,
}

impl<E: Event> Channel<E> {
    /// Create an empty channel with the fail-fast policy
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Create an empty channel with an explicit dispatch policy
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            policy,
        }
    }

    /// The dispatch policy in effect
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Register a listener for `kind`
    ///
    /// The listener is appended after every listener already registered for
    /// that kind. Registering the same closure twice is allowed and results in
    /// two invocations per publish.
    pub fn subscribe<F>(&self, kind: E::Kind, callback: F) -> SubscriptionId
    where
        F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = ListenerRecord {
            id,
            callback: Arc::new(callback),
        };

        self.listeners.write().entry(kind).or_default().push(record);

        debug!("Subscribed to {} with {}", kind, id);
        id
    }

    /// Remove the listener registered under `id`
    ///
    /// Only that exact registration is removed; other registrations of the
    /// same closure stay in place. Returns `false` if the handle is unknown
    /// (never issued, or already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();

        for (kind, records) in listeners.iter_mut() {
            if let Some(pos) = records.iter().position(|r| r.id == id) {
                records.remove(pos);
                debug!("Unsubscribed from {} with {}", kind, id);
                return true;
            }
        }

        debug!("Unsubscribe with unknown handle {}", id);
        false
    }

    /// Remove every listener registered for `kind`, returning how many were removed
    pub fn unsubscribe_kind(&self, kind: E::Kind) -> usize {
        let removed = self
            .listeners
            .write()
            .remove(&kind)
            .map(|records| records.len())
            .unwrap_or(0);

        debug!("Removed {} listener(s) from {}", removed, kind);
        removed
    }

    /// Remove every listener for every kind
    pub fn clear(&self) {
        self.listeners.write().clear();
        debug!("Channel cleared");
    }

    /// Publish an event to every listener registered for its kind
    ///
    /// Returns the number of listeners invoked. Publishing a kind that has no
    /// listeners is not an error: it is logged as unhandled and returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Under [`DispatchPolicy::FailFast`], the first listener error aborts
    /// dispatch and is returned as [`ChannelError::Listener`].
    pub fn publish(&self, event: &E) -> Result<usize> {
        let kind = event.kind();
        debug!("Published {} with {:?}", kind, event);

        let snapshot: Vec<Callback<E>> = {
            let listeners = self.listeners.read();
            match listeners.get(&kind) {
                Some(records) if !records.is_empty() => {
                    records.iter().map(|r| Arc::clone(&r.callback)).collect()
                }
                _ => {
                    debug!("Unhandled event {}", kind);
                    return Ok(0);
                }
            }
        };

        let mut invoked = 0;
        for callback in snapshot {
            invoked += 1;
            if let Err(source) = callback(event) {
                match self.policy {
                    DispatchPolicy::FailFast => {
                        return Err(ChannelError::Listener {
                            kind: kind.to_string(),
                            source,
                        });
                    }
                    DispatchPolicy::Isolate => {
                        warn!("Listener for {} failed: {}", kind, source);
                    }
                }
            }
        }

        Ok(invoked)
    }

    /// Number of listeners registered for `kind`
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners
            .read()
            .get(&kind)
            .map(|records| records.len())
            .unwrap_or(0)
    }

    /// Check if `kind` has at least one listener
    pub fn has_listeners(&self, kind: E::Kind) -> bool {
        self.listener_count(kind) > 0
    }

    /// Kinds that currently have at least one listener
    pub fn kinds(&self) -> Vec<E::Kind> {
        self.listeners
            .read()
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Tap every future event of `kind` into a pull-style iterator
    ///
    /// The tap is an ordinary listener, placed after those already registered.
    /// It is removed when the iterator is closed or dropped.
    pub fn iter(&self, kind: E::Kind) -> EventIterator<E> {
        let (tx, rx) = std::sync::mpsc::channel();
        let id = self.subscribe(kind, move |event: &E| {
            // A closed receiver only means the tap is being torn down.
            let _ = tx.send(event.clone());
            Ok(())
        });

        EventIterator::new(rx, id, self.downgrade())
    }

    /// Create a non-owning handle to this channel
    ///
    /// Listeners that publish back into the channel should capture a
    /// `WeakChannel` so the registry does not keep itself alive.
    pub fn downgrade(&self) -> WeakChannel<E> {
        WeakChannel {
            listeners: Arc::downgrade(&self.listeners),
            next_id: Arc::downgrade(&self.next_id),
            policy: self.policy,
        }
    }
}

impl<E: Event> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Clone for Channel<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
            policy: self.policy,
        }
    }
}

impl<E: Event> std::fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read();
        f.debug_struct("Channel")
            .field("kinds", &listeners.len())
            .field("listeners", &listeners.values().map(Vec::len).sum::<usize>())
            .field("policy", &self.policy)
            .finish()
    }
}

// ============================================================================
// WeakChannel<E>
// ============================================================================

/// Non-owning handle to a [`Channel`]
pub struct WeakChannel<E: Event> {
    listeners: Weak<RwLock<Registry<E>>>,
    next_id: Weak<AtomicU64>,
    policy: DispatchPolicy,
}

impl<E: Event> WeakChannel<E> {
    /// Recover the channel, or `None` if every owning handle was dropped
    pub fn upgrade(&self) -> Option<Channel<E>> {
        Some(Channel {
            listeners: self.listeners.upgrade()?,
            next_id: self.next_id.upgrade()?,
            policy: self.policy,
        })
    }
}

impl<E: Event> Clone for WeakChannel<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Weak::clone(&self.listeners),
            next_id: Weak::clone(&self.next_id),
            policy: self.policy,
        }
    }
}
