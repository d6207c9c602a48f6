//! Two play-button widgets sharing one SDK
//!
//! Each widget tracks whether its own item is playing by listening to the
//! player notifications, and asks the SDK to play or stop through the channel.
//!
//! Run: ALLEXIS_LOG_MODE=development cargo run -p allexis-sdk --example widgets

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use allexis_sdk::logging::init_logging_from_env;
use allexis_sdk::{AllexisSdk, EventKind, ItemId, SdkError, SubscriptionId};

struct PlayButton {
    item: ItemId,
    playing: Arc<AtomicBool>,
    subscriptions: Vec<SubscriptionId>,
}

impl PlayButton {
    fn mount(sdk: &AllexisSdk, item: &str) -> Self {
        let item = ItemId::from(item);
        let playing = Arc::new(AtomicBool::new(false));

        let subscriptions = [(EventKind::PlayerStarted, true), (EventKind::PlayerStopped, false)]
            .into_iter()
            .map(|(kind, now_playing)| {
                let item = item.clone();
                let playing = Arc::clone(&playing);
                sdk.channel().subscribe(kind, move |event| {
                    if event.item_id() == &item {
                        playing.store(now_playing, Ordering::SeqCst);
                    }
                    Ok(())
                })
            })
            .collect();

        Self {
            item,
            playing,
            subscriptions,
        }
    }

    fn click(&self, sdk: &AllexisSdk) -> Result<(), SdkError> {
        if self.is_playing() {
            sdk.stop(self.item.clone())?;
        } else {
            sdk.play(self.item.clone())?;
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn unmount(self, sdk: &AllexisSdk) {
        for id in self.subscriptions {
            sdk.channel().unsubscribe(id);
        }
    }
}

fn print_state(sdk: &AllexisSdk, buttons: &[&PlayButton]) {
    let states: Vec<String> = buttons
        .iter()
        .map(|b| format!("{}={}", b.item, if b.is_playing() { "playing" } else { "idle" }))
        .collect();
    println!(
        "played_item={:?}  {}",
        sdk.played_item().map(|id| id.to_string()),
        states.join("  ")
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let sdk = AllexisSdk::from_env()?;
    let track_a = PlayButton::mount(&sdk, "track-a");
    let track_b = PlayButton::mount(&sdk, "track-b");

    track_a.click(&sdk)?;
    print_state(&sdk, &[&track_a, &track_b]);

    track_b.click(&sdk)?;
    print_state(&sdk, &[&track_a, &track_b]);

    track_b.click(&sdk)?;
    print_state(&sdk, &[&track_a, &track_b]);

    sdk.buy("track-a")?;
    println!("track-a costs {}", sdk.get_price_for_product("track-a"));

    match sdk.get_feed("home").await {
        Ok(feed) => println!("feed: {}", feed),
        Err(e) => println!("feed unavailable: {}", e),
    }

    track_a.unmount(&sdk);
    track_b.unmount(&sdk);
    Ok(())
}
