//! Change notification: republishes the active endpoint's indicators.
//!
//! Updates arrive on hot paths (transport report handlers) and from
//! endpoint-selection events. None of them publish directly; they only
//! [`ChangeNotifier::schedule`] a single deferred cycle which the
//! [`NotifierWorker`] runs on its own task.
//!
//! # Coalescing
//!
//! The notifier is one pending flag, not a queue:
//!
//! ```text
//!            schedule()                    worker wakes
//!   idle ──────────────────► pending ───────────────────► idle ──► read + publish
//!                             │    ▲                                    │
//!                             └────┘ schedule() is a no-op              │
//!                                                                       ▼
//!                                     schedule() during the cycle re-arms pending
//! ```
//!
//! A burst of triggers before the worker runs yields exactly one cycle, and
//! that cycle reads whatever state is current when it runs. The claim is
//! released before the state is read, so a trigger that lands during a cycle
//! always causes a follow-up cycle instead of being absorbed by a stale one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hid_indicators_core::IndicatorMask;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use super::track_indicators::HidIndicators;

/// Event published once per notification cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorsChanged {
    pub indicators: IndicatorMask,
}

/// Sink for [`IndicatorsChanged`] events (UI, status LEDs).
///
/// Fire-and-forget: implementations must not block.
pub trait IndicatorEventPublisher: Send + Sync {
    fn publish(&self, event: IndicatorsChanged);
}

/// Errors reported by a split-link forwarder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitSyncError {
    /// The link cannot accept another update right now.
    #[error("split link busy")]
    LinkBusy,
    /// The peripheral link has gone away.
    #[error("split link closed")]
    LinkClosed,
}

/// Forwards indicator state to the peripheral half of a split keyboard.
#[async_trait]
pub trait SplitIndicatorSync: Send + Sync {
    async fn forward_indicator_state(&self, indicators: IndicatorMask) -> Result<(), SplitSyncError>;
}

/// Which half of a split keyboard this device is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitRole {
    /// Not a split keyboard.
    #[default]
    None,
    /// The half connected to hosts; forwards indicators to the peripheral.
    Central,
    /// The half that receives forwarded indicators.
    Peripheral,
}

/// The coalescing "cycle pending" flag plus the worker wakeup.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    pending: AtomicBool,
    wake: Notify,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a notification cycle.
    ///
    /// Claims the pending flag if it is idle and wakes the worker. Returns
    /// `false` if a cycle was already pending, in which case nothing else
    /// happens. Never blocks.
    pub fn schedule(&self) -> bool {
        let claimed = self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if claimed {
            self.wake.notify_one();
        } else {
            trace!("indicator notification already pending");
        }
        claimed
    }

    /// Returns `true` if a cycle is scheduled but has not started yet.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Releases the claim, returning whether one was held.
    fn release(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

/// Split forwarding target and its per-call bound.
struct SplitForwarder {
    sync: Arc<dyn SplitIndicatorSync>,
    timeout: Duration,
}

/// Runs notification cycles on behalf of a [`ChangeNotifier`].
pub struct NotifierWorker {
    indicators: Arc<HidIndicators>,
    notifier: Arc<ChangeNotifier>,
    publisher: Arc<dyn IndicatorEventPublisher>,
    split: Option<SplitForwarder>,
    cycles: AtomicU64,
}

impl NotifierWorker {
    pub fn new(indicators: Arc<HidIndicators>, publisher: Arc<dyn IndicatorEventPublisher>) -> Self {
        let notifier = Arc::clone(indicators.notifier());
        Self {
            indicators,
            notifier,
            publisher,
            split: None,
            cycles: AtomicU64::new(0),
        }
    }

    /// Enables forwarding to the split peripheral.
    ///
    /// Forwarding only happens on the central half of a split keyboard that
    /// supports wireless hosts; for any other configuration this is a no-op.
    /// Each forward is abandoned after `timeout`.
    pub fn with_split(
        mut self,
        role: SplitRole,
        sync: Arc<dyn SplitIndicatorSync>,
        timeout: Duration,
    ) -> Self {
        if role == SplitRole::Central && self.indicators.layout().supports_wireless() {
            self.split = Some(SplitForwarder { sync, timeout });
        } else {
            debug!("split indicator forwarding disabled (role {role:?})");
        }
        self
    }

    /// Returns `true` if cycles forward indicators to a split peripheral.
    pub fn forwards_to_split(&self) -> bool {
        self.split.is_some()
    }

    /// Number of cycles executed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Runs one cycle if one is pending. Returns whether a cycle ran.
    pub async fn run_pending(&self) -> bool {
        if !self.notifier.release() {
            return false;
        }
        self.run_cycle().await;
        true
    }

    /// Reads the active endpoint's indicators, publishes them and forwards
    /// them to the split peripheral when enabled.
    ///
    /// Does not touch the pending flag; use [`run_pending`](Self::run_pending)
    /// to drain scheduled work.
    pub async fn run_cycle(&self) -> IndicatorMask {
        let indicators = self.indicators.get_current_profile_indicators();

        self.publisher.publish(IndicatorsChanged { indicators });

        if let Some(split) = &self.split {
            match tokio::time::timeout(split.timeout, split.sync.forward_indicator_state(indicators))
                .await
            {
                Ok(Ok(())) => trace!("forwarded indicators {indicators} to split peripheral"),
                Ok(Err(e)) => warn!("failed to forward indicators {indicators}: {e}"),
                Err(_) => warn!(
                    "forwarding indicators {indicators} timed out after {:?}",
                    split.timeout
                ),
            }
        }

        self.cycles.fetch_add(1, Ordering::Relaxed);
        indicators
    }

    /// Worker loop: waits for scheduled cycles and runs them until
    /// `shutdown` becomes `true` or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("indicator notifier started");
        loop {
            tokio::select! {
                _ = self.notifier.wake.notified() => {
                    self.run_pending().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("indicator notifier stopped after {} cycle(s)", self.cycles());
    }
}

/// Keeps the worker alive until `signal` resolves, then asks it to stop and
/// waits for it to finish.
///
/// If the signal source itself fails, no shutdown is requested and the
/// worker runs until it exits on its own.
pub async fn serve_until<F>(
    worker: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
    signal: F,
) where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("shutdown signal received");
            if let Err(e) = shutdown.send(true) {
                debug!("notifier already stopped: {e}");
            }
        }
        Err(e) => error!("failed to listen for shutdown signal, running until the notifier exits: {e}"),
    }

    if let Err(e) = worker.await {
        error!("notifier worker panicked: {e}");
    }
}
