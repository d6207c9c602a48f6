//! AllexisSdk - Main entry point for the SDK
//!
//! One `AllexisSdk` is built at process start and handed to every widget
//! that needs it. Clones share the channel and the player state.

use std::sync::Arc;

use allexis_channel::Channel;
use serde_json::Value;
use tracing::debug;

use crate::config::SdkConfig;
use crate::error::Result;
use crate::event::{EventKind, ItemId, SdkEvent};
use crate::feed::FeedClient;
use crate::player::{register_handlers, PlayerHandlers, PlayerState};

/// Shared SDK context: channel, playback state and feed access
///
/// # Example
///
/// ```rust,ignore
/// use allexis_sdk::{AllexisSdk, EventKind};
///
/// let sdk = AllexisSdk::new()?;
///
/// // A widget reacting to playback notifications
/// sdk.channel().subscribe(EventKind::PlayerStarted, |event| {
///     println!("now playing {}", event.item_id());
///     Ok(())
/// });
///
/// // Another widget asking for playback
/// sdk.play("item1")?;
/// assert_eq!(sdk.played_item().map(|id| id.to_string()), Some("item1".to_string()));
/// ```
#[derive(Clone)]
pub struct AllexisSdk {
    /// Channel shared with every widget
    channel: Channel<SdkEvent>,

    /// Exclusive playback state, mutated only by the play/stop handlers
    player: Arc<PlayerState>,

    /// Handles of the built-in handlers
    handlers: PlayerHandlers,

    /// HTTP client for the product feed
    feed: FeedClient,

    config: SdkConfig,
}

impl AllexisSdk {
    /// Create an SDK with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(SdkConfig::default())
    }

    /// Create an SDK with configuration read from the environment
    ///
    /// See [`SdkConfig::from_env`] for the variables consulted.
    pub fn from_env() -> Result<Self> {
        Self::with_config(SdkConfig::from_env()?)
    }

    /// Create an SDK with custom configuration
    ///
    /// This creates the channel and wires the `play`, `stop` and `buy`
    /// handlers onto it.
    pub fn with_config(config: SdkConfig) -> Result<Self> {
        let feed = FeedClient::new(&config)?;
        let channel = Channel::with_policy(config.dispatch_policy);
        let player = Arc::new(PlayerState::new());
        let handlers = register_handlers(&channel, &player);

        debug!(
            "AllexisSdk ready (feed: {}, policy: {:?})",
            feed.endpoint(),
            config.dispatch_policy
        );

        Ok(Self {
            channel,
            player,
            handlers,
            feed,
            config,
        })
    }

    /// The shared channel
    pub fn channel(&self) -> &Channel<SdkEvent> {
        &self.channel
    }

    /// Item currently playing, if any
    pub fn played_item(&self) -> Option<ItemId> {
        self.player.played_item()
    }

    /// Subscription handles of the built-in `play` / `stop` / `buy` handlers
    pub fn handlers(&self) -> PlayerHandlers {
        self.handlers
    }

    /// Active configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Publish a `play` request for `id`
    pub fn play(&self, id: impl Into<ItemId>) -> Result<usize> {
        self.publish(EventKind::Play, id)
    }

    /// Publish a `stop` request for `id`
    pub fn stop(&self, id: impl Into<ItemId>) -> Result<usize> {
        self.publish(EventKind::Stop, id)
    }

    /// Publish a `buy` request for `id`
    pub fn buy(&self, id: impl Into<ItemId>) -> Result<usize> {
        self.publish(EventKind::Buy, id)
    }

    /// Publish the event of `kind` for `id`, returning how many listeners ran
    pub fn publish(&self, kind: EventKind, id: impl Into<ItemId>) -> Result<usize> {
        Ok(self.channel.publish(&SdkEvent::new(kind, id))?)
    }

    /// Publish by event name, for callers that only know the string form
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownEvent` if `name` is not one of the five
    /// event names.
    pub fn publish_named(&self, name: &str, id: impl Into<ItemId>) -> Result<usize> {
        self.publish(name.parse()?, id)
    }

    /// Fetch the product feed
    ///
    /// Issues one request to the configured endpoint. No retry, no timeout.
    pub async fn get_feed(&self, feed_id: &str) -> Result<Value> {
        self.feed.get_feed(feed_id).await
    }

    /// Price of a product, as a display string
    ///
    /// Always the configured placeholder, whatever `product_id` is.
    pub fn get_price_for_product(&self, product_id: &str) -> String {
        debug!("Quoting placeholder price for {}", product_id);
        self.config.placeholder_price.clone()
    }
}

impl std::fmt::Debug for AllexisSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllexisSdk")
            .field("channel", &self.channel)
            .field("played_item", &self.played_item())
            .field("feed_endpoint", &self.feed.endpoint().as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use allexis_channel::DispatchPolicy;

    #[test]
    fn test_new_wires_handlers() {
        let sdk = AllexisSdk::new().unwrap();
        let handlers = sdk.handlers();

        assert_eq!(sdk.played_item(), None);
        assert_eq!(sdk.channel().listener_count(EventKind::Play), 1);
        assert_eq!(sdk.channel().listener_count(EventKind::Stop), 1);
        assert_eq!(sdk.channel().listener_count(EventKind::Buy), 1);
        assert_ne!(handlers.play, handlers.stop);
        assert_ne!(handlers.stop, handlers.buy);
    }

    #[test]
    fn test_with_config_rejects_bad_endpoint() {
        let config = SdkConfig::new().with_feed_endpoint("not a url");
        assert!(matches!(
            AllexisSdk::with_config(config),
            Err(SdkError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_config_policy_reaches_channel() {
        let config = SdkConfig::new().with_dispatch_policy(DispatchPolicy::Isolate);
        let sdk = AllexisSdk::with_config(config).unwrap();

        assert_eq!(sdk.channel().policy(), DispatchPolicy::Isolate);
    }

    #[test]
    fn test_clones_share_state() {
        let sdk = AllexisSdk::new().unwrap();
        let widget_view = sdk.clone();

        sdk.play("item1").unwrap();
        assert_eq!(widget_view.played_item(), Some("item1".into()));
    }

    #[test]
    fn test_price_is_placeholder() {
        let sdk = AllexisSdk::new().unwrap();

        assert_eq!(sdk.get_price_for_product("sku-1"), "R 20,00");
        assert_eq!(sdk.get_price_for_product(""), "R 20,00");
    }

    #[test]
    fn test_publish_named() {
        let sdk = AllexisSdk::new().unwrap();

        assert_eq!(sdk.publish_named("play", "item9").unwrap(), 1);
        assert_eq!(sdk.played_item(), Some("item9".into()));
        assert!(matches!(
            sdk.publish_named("rewind", "item9"),
            Err(SdkError::UnknownEvent(_))
        ));
    }

    #[test]
    fn test_detaching_play_handler() {
        let sdk = AllexisSdk::new().unwrap();

        assert!(sdk.channel().unsubscribe(sdk.handlers().play));
        assert_eq!(sdk.play("item1").unwrap(), 0);
        assert_eq!(sdk.played_item(), None);
    }
}
