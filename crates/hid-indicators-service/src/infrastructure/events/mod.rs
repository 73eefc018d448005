//! Broadcast event bus for [`IndicatorsChanged`].
//!
//! Status displays (indicator LEDs, an OLED widget, a tray icon) each hold a
//! receiver from [`BroadcastEventBus::subscribe`]. A slow subscriber only
//! lags itself; publishing never blocks the notifier worker.

use tokio::sync::broadcast;
use tracing::trace;

use crate::application::notify_changes::{IndicatorEventPublisher, IndicatorsChanged};

/// `tokio::sync::broadcast`-backed event publisher.
#[derive(Debug, Clone)]
pub struct BroadcastEventBus {
    tx: broadcast::Sender<IndicatorsChanged>,
}

impl BroadcastEventBus {
    /// Creates a bus that buffers up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<IndicatorsChanged> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl IndicatorEventPublisher for BroadcastEventBus {
    fn publish(&self, event: IndicatorsChanged) {
        if self.tx.send(event).is_err() {
            trace!("no subscribers for {event:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use hid_indicators_core::IndicatorMask;

    use super::*;

    fn event(bits: u8) -> IndicatorsChanged {
        IndicatorsChanged {
            indicators: IndicatorMask(bits),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = BroadcastEventBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(event(0x01));
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_event() {
        // Arrange
        let bus = BroadcastEventBus::new(4);
        let mut display = bus.subscribe();
        let mut leds = bus.subscribe();

        // Act
        bus.publish(event(0x02));

        // Assert
        assert_eq!(display.recv().await.unwrap(), event(0x02));
        assert_eq!(leds.recv().await.unwrap(), event(0x02));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let bus = BroadcastEventBus::new(0);
        let mut rx = bus.subscribe();
        bus.publish(event(0x04));
        assert_eq!(rx.try_recv().unwrap(), event(0x04));
    }
}
