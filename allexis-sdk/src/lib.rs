//! # Allexis SDK - mock SDK over a shared event channel
//!
//! Stands in for the third-party Allexis SDK. Widgets built with different
//! technologies talk to it, and to each other, through one shared channel:
//!
//! ```rust,no_run
//! use allexis_sdk::{AllexisSdk, EventKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), allexis_sdk::SdkError> {
//!     let sdk = AllexisSdk::new()?;
//!
//!     // Play buttons listen for notifications
//!     sdk.channel().subscribe(EventKind::PlayerStopped, |event| {
//!         println!("{} stopped", event.item_id());
//!         Ok(())
//!     });
//!
//!     // ...and publish requests
//!     sdk.play("item1")?;
//!     sdk.play("item2")?; // item1 is stopped first
//!
//!     let feed = sdk.get_feed("home").await?;
//!     println!("feed: {}", feed);
//!     println!("price: {}", sdk.get_price_for_product("item2"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Events
//!
//! | Event            | Published by | Meaning                        |
//! |------------------|--------------|--------------------------------|
//! | `play`           | widgets      | request to start playing an item |
//! | `stop`           | widgets      | request to stop playing an item  |
//! | `buy`            | widgets      | request to buy an item           |
//! | `player:started` | SDK          | playback of an item started      |
//! | `player:stopped` | SDK          | playback of an item stopped      |
//!
//! Only one item plays at a time: playing a new item stops the current one
//! first, replaying the current item does nothing, and stopping anything
//! other than the current item does nothing.
//!
//! ## Architecture
//!
//! ```text
//! widgets ── publish/subscribe ──┐
//!                                ↓
//! AllexisSdk ── Channel<SdkEvent> (allexis-channel)
//!     │              └── play / stop / buy handlers ── PlayerState
//!     └── FeedClient (reqwest)
//! ```

// Main exports
pub use config::SdkConfig;
pub use error::{Result, SdkError};
pub use event::{EventKind, ItemId, SdkEvent};
pub use feed::FeedClient;
pub use player::{PlayerHandlers, PlayerState};
pub use sdk::AllexisSdk;

// Re-export channel types widgets need to subscribe
pub use allexis_channel::{Channel, DispatchPolicy, EventIterator, ListenerResult, SubscriptionId};

pub mod config;
mod error;
mod event;
mod feed;
pub mod logging;
mod player;
mod sdk;
