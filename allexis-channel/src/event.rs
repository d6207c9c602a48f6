//! Event contract and subscription handles
//!
//! An `Event` is one variant of a closed set of notifications. Its `Kind`
//! plays the role of the event name: listeners subscribe to a kind and are
//! handed every published event of that kind.
//!
//! # Example
//!
//! ```rust
//! use allexis_channel::Event;
//! use std::fmt;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum DoorKind {
//!     Opened,
//!     Closed,
//! }
//!
//! impl fmt::Display for DoorKind {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         match self {
//!             DoorKind::Opened => write!(f, "door:opened"),
//!             DoorKind::Closed => write!(f, "door:closed"),
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! enum DoorEvent {
//!     Opened(u32),
//!     Closed(u32),
//! }
//!
//! impl Event for DoorEvent {
//!     type Kind = DoorKind;
//!
//!     fn kind(&self) -> DoorKind {
//!         match self {
//!             DoorEvent::Opened(_) => DoorKind::Opened,
//!             DoorEvent::Closed(_) => DoorKind::Closed,
//!         }
//!     }
//! }
//!
//! assert_eq!(DoorEvent::Opened(3).kind().to_string(), "door:opened");
//! ```

use std::fmt;
use std::hash::Hash;

/// A notification that can travel over a [`Channel`](crate::Channel)
///
/// Events must be:
/// - Clone: taps and pull-style consumers keep their own copy
/// - Debug: every publish is logged with its payload
/// - Send + Sync + 'static: the registry is shareable across threads
///
/// `Kind` is the routing key. Its `Display` output is the human-readable
/// event name used in logs and errors.
pub trait Event: Clone + fmt::Debug + Send + Sync + 'static {
    /// Discriminant used to route events to listeners
    type Kind: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// The kind this event is published under
    fn kind(&self) -> Self::Kind;
}

/// Opaque handle identifying one subscription
///
/// Returned by [`Channel::subscribe`](crate::Channel::subscribe) and used for
/// exact removal. Handles are never reused within a channel, so subscribing
/// the same closure twice yields two distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, mostly useful for logging
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct Ping;

    impl fmt::Display for Ping {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "ping")
        }
    }

    #[derive(Clone, Debug)]
    struct PingEvent(u8);

    impl Event for PingEvent {
        type Kind = Ping;

        fn kind(&self) -> Ping {
            Ping
        }
    }

    #[test]
    fn test_event_kind_display() {
        let event = PingEvent(1);
        assert_eq!(event.kind(), Ping);
        assert_eq!(event.kind().to_string(), "ping");
        assert_eq!(event.0, 1);
    }

    #[test]
    fn test_subscription_id_display_and_order() {
        let first = SubscriptionId::new(1);
        let second = SubscriptionId::new(2);

        assert_eq!(first.to_string(), "sub-1");
        assert_eq!(second.as_u64(), 2);
        assert!(first < second);
        assert_ne!(first, second);
    }
}
