//! SDK events and item identifiers
//!
//! The five event kinds below are the whole protocol spoken between widgets
//! and the SDK. Widgets publish requests (`play`, `stop`, `buy`); the SDK
//! answers with notifications (`player:started`, `player:stopped`).

use std::fmt;
use std::str::FromStr;

use allexis_channel::Event;
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Identifier of a playable / purchasable item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Event name, used to route events to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "play")]
    Play,
    #[serde(rename = "stop")]
    Stop,
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "player:started")]
    PlayerStarted,
    #[serde(rename = "player:stopped")]
    PlayerStopped,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Play,
        EventKind::Stop,
        EventKind::Buy,
        EventKind::PlayerStarted,
        EventKind::PlayerStopped,
    ];

    /// The event name as widgets know it
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Play => "play",
            EventKind::Stop => "stop",
            EventKind::Buy => "buy",
            EventKind::PlayerStarted => "player:started",
            EventKind::PlayerStopped => "player:stopped",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = SdkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| SdkError::UnknownEvent(name.to_string()))
    }
}

/// An event travelling over the SDK channel
///
/// Serialized as `{"event": "<name>", "id": "<item>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "id")]
pub enum SdkEvent {
    /// Request to start playing an item
    #[serde(rename = "play")]
    Play(ItemId),
    /// Request to stop playing an item
    #[serde(rename = "stop")]
    Stop(ItemId),
    /// Request to buy an item
    #[serde(rename = "buy")]
    Buy(ItemId),
    /// Playback of an item started
    #[serde(rename = "player:started")]
    PlayerStarted(ItemId),
    /// Playback of an item stopped
    #[serde(rename = "player:stopped")]
    PlayerStopped(ItemId),
}

impl SdkEvent {
    /// Build the event of `kind` carrying `id`
    pub fn new(kind: EventKind, id: impl Into<ItemId>) -> Self {
        let id = id.into();
        match kind {
            EventKind::Play => SdkEvent::Play(id),
            EventKind::Stop => SdkEvent::Stop(id),
            EventKind::Buy => SdkEvent::Buy(id),
            EventKind::PlayerStarted => SdkEvent::PlayerStarted(id),
            EventKind::PlayerStopped => SdkEvent::PlayerStopped(id),
        }
    }

    /// The item this event is about
    pub fn item_id(&self) -> &ItemId {
        match self {
            SdkEvent::Play(id)
            | SdkEvent::Stop(id)
            | SdkEvent::Buy(id)
            | SdkEvent::PlayerStarted(id)
            | SdkEvent::PlayerStopped(id) => id,
        }
    }
}

impl Event for SdkEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            SdkEvent::Play(_) => EventKind::Play,
            SdkEvent::Stop(_) => EventKind::Stop,
            SdkEvent::Buy(_) => EventKind::Buy,
            SdkEvent::PlayerStarted(_) => EventKind::PlayerStarted,
            SdkEvent::PlayerStopped(_) => EventKind::PlayerStopped,
        }
    }
}
