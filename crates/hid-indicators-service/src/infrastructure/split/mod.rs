//! Split-keyboard link: carries indicator state from the central half to the
//! peripheral half.
//!
//! The actual radio/serial link lives behind a bounded channel; the task that
//! owns the link drains [`ChannelSplitSync`]'s receiver and owns its own
//! retry semantics. Forwarding here never waits for the link.

use async_trait::async_trait;
use hid_indicators_core::IndicatorMask;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::application::notify_changes::{SplitIndicatorSync, SplitSyncError};

/// Channel-backed [`SplitIndicatorSync`].
#[derive(Debug, Clone)]
pub struct ChannelSplitSync {
    tx: mpsc::Sender<IndicatorMask>,
}

impl ChannelSplitSync {
    /// Creates the forwarder and the receiver the link task drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<IndicatorMask>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl SplitIndicatorSync for ChannelSplitSync {
    async fn forward_indicator_state(&self, indicators: IndicatorMask) -> Result<(), SplitSyncError> {
        self.tx.try_send(indicators).map_err(|e| match e {
            TrySendError::Full(_) => SplitSyncError::LinkBusy,
            TrySendError::Closed(_) => SplitSyncError::LinkClosed,
        })
    }
}
