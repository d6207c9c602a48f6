//! Allexis Channel
//!
//! An in-process publish/subscribe channel that decouples event producers
//! from consumers. Widgets written with different technologies, and the SDK
//! they talk to, communicate by publishing typed events to a shared channel.
//!
//! # Features
//!
//! - **Typed events**: a closed set of event variants, routed by kind
//! - **Synchronous dispatch**: listeners run on the publisher's thread, in registration order
//! - **Exact unsubscription**: every `subscribe` returns a handle used for removal
//! - **Dispatch policy**: fail fast on the first listener error, or isolate failures
//! - **Pull-style taps**: consume events through blocking or non-blocking iterators
//!
//! # Quick Start
//!
//! ```rust
//! use allexis_channel::{Channel, Event};
//! use std::fmt;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! struct Greeting;
//!
//! impl fmt::Display for Greeting {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "greeting")
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Hello(String);
//!
//! impl Event for Hello {
//!     type Kind = Greeting;
//!     fn kind(&self) -> Greeting {
//!         Greeting
//!     }
//! }
//!
//! let channel = Channel::<Hello>::new();
//!
//! let id = channel.subscribe(Greeting, |event| {
//!     println!("hello, {}", event.0);
//!     Ok(())
//! });
//!
//! assert_eq!(channel.publish(&Hello("world".to_string())).unwrap(), 1);
//!
//! assert!(channel.unsubscribe(id));
//! assert_eq!(channel.publish(&Hello("nobody".to_string())).unwrap(), 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! Channel<E>
//!     │
//!     ├── listeners: RwLock<HashMap<E::Kind, Vec<ListenerRecord>>>
//!     │       │
//!     │       └── ListenerRecord { id: SubscriptionId, callback: Arc<dyn Fn(&E)> }
//!     │
//!     ├── next_id: AtomicU64
//!     │
//!     └── iter(kind) ── tap listener ── mpsc ── EventIterator<E>
//! ```

// Modules
pub mod channel;
pub mod error;
pub mod event;
pub mod iter;

// Re-exports - Public API
pub use channel::{Channel, DispatchPolicy, WeakChannel};
pub use error::{ChannelError, ListenerError, ListenerResult, Result};
pub use event::{Event, SubscriptionId};
pub use iter::{EventIterator, TimeoutIter, TryIter};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::channel::{Channel, DispatchPolicy, WeakChannel};
    pub use crate::error::{ChannelError, ListenerResult};
    pub use crate::event::{Event, SubscriptionId};
    pub use crate::iter::EventIterator;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Topic {
        Volume,
        Mute,
    }

    impl fmt::Display for Topic {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Topic::Volume => write!(f, "volume"),
                Topic::Mute => write!(f, "mute"),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Update {
        Volume(u8),
        Mute(bool),
    }

    impl Event for Update {
        type Kind = Topic;

        fn kind(&self) -> Topic {
            match self {
                Update::Volume(_) => Topic::Volume,
                Update::Mute(_) => Topic::Mute,
            }
        }
    }

    #[test]
    fn test_full_workflow() {
        let channel = Channel::<Update>::new();
        let volume_hits = Arc::new(AtomicUsize::new(0));

        let id = {
            let hits = Arc::clone(&volume_hits);
            channel.subscribe(Topic::Volume, move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };
        let mutes = channel.iter(Topic::Mute);

        channel.publish(&Update::Volume(50)).unwrap();
        channel.publish(&Update::Mute(true)).unwrap();

        assert_eq!(volume_hits.load(Ordering::SeqCst), 1);
        assert_eq!(mutes.try_recv(), Some(Update::Mute(true)));

        channel.unsubscribe(id);
        channel.publish(&Update::Volume(75)).unwrap();
        assert_eq!(volume_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Channel<Update>>();
        assert_send_sync::<WeakChannel<Update>>();
    }
}
