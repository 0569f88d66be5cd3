use crate::{
    cache::FileCache,
    dbus::Notifier,
    mixer::{self, MixerControl},
    presentation::Presentation,
};
use anyhow::Result;
use std::time::Duration;

const PREVIOUS_ID_KEY: &str = "previous-id";

/// Id that asks the notification server for a brand new notification.
const NO_PREVIOUS_ID: u32 = 0;

/// Adjusts the mixer, then shows (or replaces) the volume notification.
/// Returns the id of the shown notification.
pub(crate) async fn run(
    args: &[String],
    mixer: &impl MixerControl,
    notifier: &impl Notifier,
    cache: &FileCache,
    cache_timeout: Duration,
) -> Result<u32> {
    let report = mixer::adjust(mixer, args).await?;
    let presentation = Presentation::from(&report);
    log::info!(
        "{}: {} ({})",
        presentation.title,
        presentation.body,
        presentation.icon
    );

    let previous_id = previous_id(cache, cache_timeout).await;
    let id = notifier
        .notify(previous_id, &presentation, report.volume_percent)
        .await?;
    log::info!("notification id: {previous_id} -> {id}");

    cache.put(PREVIOUS_ID_KEY, &id.to_string()).await?;

    Ok(id)
}

async fn previous_id(cache: &FileCache, cache_timeout: Duration) -> u32 {
    let Some(value) = cache.get(PREVIOUS_ID_KEY, Some(cache_timeout)).await else {
        return NO_PREVIOUS_ID;
    };

    value.parse().unwrap_or_else(|err| {
        log::warn!("ignoring cached notification id {value:?}: {err}");
        NO_PREVIOUS_ID
    })
}
