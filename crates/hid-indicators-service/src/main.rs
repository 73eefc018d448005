//! HID Indicators service entry point.
//!
//! Wires the indicator store, endpoint manager, event bus and split link
//! together and runs the notifier on the Tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()             -- device layout, split role, log level
//!  └─ HidIndicators::new()      -- per-endpoint indicator table
//!  └─ spawn tasks
//!       ├─ NotifierWorker::run      (publishes the active endpoint's indicators)
//!       ├─ run_endpoint_listener    (re-publishes on host switches)
//!       ├─ status display           (logs every IndicatorsChanged)
//!       └─ split link               (central only: drains forwarded masks)
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use hid_indicators_service::application::{
    endpoint_events::{run_endpoint_listener, Subscriptions},
    notify_changes::{
        serve_until, IndicatorEventPublisher, NotifierWorker, SplitIndicatorSync, SplitRole,
    },
    track_indicators::{EndpointSelector, HidIndicators},
};
use hid_indicators_service::infrastructure::{
    endpoints::EndpointManager,
    events::BroadcastEventBus,
    split::ChannelSplitSync,
    storage::config::{config_file_path, load_config, write_default_if_missing, IndicatorConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (IndicatorConfig::default(), Some(e)),
    };

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.service.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match config_error {
        Some(e) => warn!("using default configuration: {e}"),
        None => write_first_run_config(),
    }

    let layout = config.device.slot_layout();
    info!(
        "HID indicators service starting: wired={}, wireless_profiles={}, split={:?}",
        layout.supports_wired(),
        layout.wireless_profiles(),
        config.split.role
    );

    // ── Core state ────────────────────────────────────────────────────────────
    let (endpoints, endpoint_rx) =
        EndpointManager::new(layout, config.device.preferred_transport);
    let endpoints = Arc::new(endpoints);
    let indicators = Arc::new(HidIndicators::new(
        layout,
        Arc::clone(&endpoints) as Arc<dyn EndpointSelector>,
    ));
    let bus = Arc::new(BroadcastEventBus::new(config.service.event_capacity));

    // ── Notifier worker ───────────────────────────────────────────────────────
    let mut worker = NotifierWorker::new(
        Arc::clone(&indicators),
        Arc::clone(&bus) as Arc<dyn IndicatorEventPublisher>,
    );
    if config.split.role == SplitRole::Central {
        let (split, mut link_rx) = ChannelSplitSync::new(config.split.link_capacity);
        worker = worker.with_split(
            config.split.role,
            Arc::new(split) as Arc<dyn SplitIndicatorSync>,
            config.split.forward_timeout(),
        );
        tokio::spawn(async move {
            while let Some(mask) = link_rx.recv().await {
                info!("split link: peripheral indicators -> {mask}");
            }
        });
    }
    let worker = Arc::new(worker);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker_handle = tokio::spawn({
        let worker = Arc::clone(&worker);
        async move { worker.run(shutdown_rx).await }
    });

    // ── Endpoint event pump ───────────────────────────────────────────────────
    tokio::spawn(run_endpoint_listener(
        endpoint_rx,
        Subscriptions::for_layout(layout),
        Arc::clone(indicators.notifier()),
    ));

    // ── Status display ────────────────────────────────────────────────────────
    let mut status_rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match status_rx.recv().await {
                Ok(event) => {
                    let mask = event.indicators;
                    info!(
                        "indicators {mask}: num={} caps={} scroll={}",
                        mask.num_lock(),
                        mask.caps_lock(),
                        mask.scroll_lock()
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("status display skipped {n} stale event(s)");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Publish the initial (all-off) state for the selected endpoint.
    indicators.notifier().schedule();

    info!(
        "HID indicators service ready on {}, {} status subscriber(s).  Press Ctrl-C to exit.",
        endpoints.selected(),
        bus.subscriber_count()
    );

    serve_until(worker_handle, shutdown_tx, tokio::signal::ctrl_c()).await;

    info!("HID indicators service stopped");
    Ok(())
}

/// Writes the default config file on first run so it can be edited.
fn write_first_run_config() {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            debug!("no config file location: {e}");
            return;
        }
    };
    match write_default_if_missing(&path) {
        Ok(true) => info!("wrote default configuration to {}", path.display()),
        Ok(false) => {}
        Err(e) => warn!("could not write default configuration: {e}"),
    }
}
