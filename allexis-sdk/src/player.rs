//! Exclusive playback
//!
//! Only one item plays at a time. The handlers registered here react to
//! `play` / `stop` / `buy` requests on the channel, keep `PlayerState` up to
//! date and announce transitions as `player:started` / `player:stopped`.

use std::sync::Arc;

use allexis_channel::{Channel, ListenerResult, SubscriptionId, WeakChannel};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::event::{EventKind, ItemId, SdkEvent};

/// The item currently considered playing, if any
#[derive(Debug, Default)]
pub struct PlayerState {
    played_item: Mutex<Option<ItemId>>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently playing item
    pub fn played_item(&self) -> Option<ItemId> {
        self.played_item.lock().clone()
    }

    fn set_played(&self, id: ItemId) {
        *self.played_item.lock() = Some(id);
    }

    /// Clear the played item if it is `id`, returning whether it was
    fn clear_if_playing(&self, id: &ItemId) -> bool {
        let mut played = self.played_item.lock();
        if played.as_ref() == Some(id) {
            *played = None;
            true
        } else {
            false
        }
    }
}

/// Handles of the built-in request handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandlers {
    pub play: SubscriptionId,
    pub stop: SubscriptionId,
    pub buy: SubscriptionId,
}

/// Wire the `play`, `stop` and `buy` handlers onto `channel`
pub(crate) fn register_handlers(channel: &Channel<SdkEvent>, state: &Arc<PlayerState>) -> PlayerHandlers {
    let play = {
        let weak = channel.downgrade();
        let state = Arc::clone(state);
        channel.subscribe(EventKind::Play, move |event| match event {
            SdkEvent::Play(id) => on_play(&weak, &state, id),
            _ => Ok(()),
        })
    };

    let stop = {
        let weak = channel.downgrade();
        let state = Arc::clone(state);
        channel.subscribe(EventKind::Stop, move |event| match event {
            SdkEvent::Stop(id) => on_stop(&weak, &state, id),
            _ => Ok(()),
        })
    };

    let buy = channel.subscribe(EventKind::Buy, |event| match event {
        SdkEvent::Buy(id) => on_buy(id),
        _ => Ok(()),
    });

    PlayerHandlers { play, stop, buy }
}

fn on_play(channel: &WeakChannel<SdkEvent>, state: &PlayerState, id: &ItemId) -> ListenerResult {
    let Some(channel) = channel.upgrade() else {
        return Ok(());
    };

    let previous = state.played_item();
    if previous.as_ref() == Some(id) {
        debug!("Already playing {}", id);
        return Ok(());
    }

    // The stop of the previous item is announced while it is still current.
    if let Some(previous) = previous {
        info!("Channel stopped playing {}", previous);
        channel.publish(&SdkEvent::PlayerStopped(previous))?;
    }

    state.set_played(id.clone());
    info!("Channel started playing {}", id);
    channel.publish(&SdkEvent::PlayerStarted(id.clone()))?;
    Ok(())
}

fn on_stop(channel: &WeakChannel<SdkEvent>, state: &PlayerState, id: &ItemId) -> ListenerResult {
    let Some(channel) = channel.upgrade() else {
        return Ok(());
    };

    if !state.clear_if_playing(id) {
        debug!("Ignoring stop for {}, not playing", id);
        return Ok(());
    }

    info!("Channel stopped playing {}", id);
    channel.publish(&SdkEvent::PlayerStopped(id.clone()))?;
    Ok(())
}

fn on_buy(id: &ItemId) -> ListenerResult {
    // Validation and the backend call belong here once a backend exists.
    info!("Channel received a call to buy {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Channel<SdkEvent>, Arc<PlayerState>) {
        let channel = Channel::new();
        let state = Arc::new(PlayerState::new());
        register_handlers(&channel, &state);
        (channel, state)
    }

    #[test]
    fn test_state_starts_empty() {
        let state = PlayerState::new();
        assert_eq!(state.played_item(), None);
    }

    #[test]
    fn test_clear_if_playing() {
        let state = PlayerState::new();
        state.set_played("a".into());

        assert!(!state.clear_if_playing(&"b".into()));
        assert_eq!(state.played_item(), Some("a".into()));

        assert!(state.clear_if_playing(&"a".into()));
        assert_eq!(state.played_item(), None);
        assert!(!state.clear_if_playing(&"a".into()));
    }

    #[test]
    fn test_handlers_registered_once_per_kind() {
        let (channel, _) = setup();

        assert_eq!(channel.listener_count(EventKind::Play), 1);
        assert_eq!(channel.listener_count(EventKind::Stop), 1);
        assert_eq!(channel.listener_count(EventKind::Buy), 1);
        assert!(!channel.has_listeners(EventKind::PlayerStarted));
    }

    #[test]
    fn test_play_then_switch() {
        let (channel, state) = setup();
        let notifications = channel.iter(EventKind::PlayerStarted);

        channel.publish(&SdkEvent::Play("item1".into())).unwrap();
        channel.publish(&SdkEvent::Play("item2".into())).unwrap();

        assert_eq!(state.played_item(), Some("item2".into()));
        let started: Vec<_> = notifications.try_iter().collect();
        assert_eq!(
            started,
            vec![
                SdkEvent::PlayerStarted("item1".into()),
                SdkEvent::PlayerStarted("item2".into()),
            ]
        );
    }

    #[test]
    fn test_stopped_listener_sees_previous_item_as_current() {
        let (channel, state) = setup();
        channel.publish(&SdkEvent::Play("item1".into())).unwrap();

        let seen = Arc::new(Mutex::new(None));
        {
            let seen = Arc::clone(&seen);
            let state = Arc::clone(&state);
            channel.subscribe(EventKind::PlayerStopped, move |_| {
                *seen.lock() = state.played_item();
                Ok(())
            });
        }

        channel.publish(&SdkEvent::Play("item2".into())).unwrap();
        assert_eq!(*seen.lock(), Some("item1".into()));
    }

    #[test]
    fn test_buy_has_no_state_effect() {
        let (channel, state) = setup();

        assert_eq!(channel.publish(&SdkEvent::Buy("sku".into())).unwrap(), 1);
        assert_eq!(state.played_item(), None);
    }
}
