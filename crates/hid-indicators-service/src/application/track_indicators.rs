//! HidIndicators: the public indicator API consumed by transports and
//! status displays.
//!
//! Transports call [`HidIndicators::process_indicator_report`] (or
//! [`HidIndicators::set_profile_indicators`]) whenever a host sends an LED
//! output report, possibly from a driver thread that is not the service's
//! own. Status displays call [`HidIndicators::get_current_profile_indicators`]
//! to learn what to show for whichever host is active right now.
//!
//! Addressing errors never reach callers: reads of an unknown endpoint return
//! [`IndicatorMask::NONE`] and writes to one are dropped without scheduling a
//! notification.

use std::sync::Arc;

use hid_indicators_core::{
    Endpoint, IndicatorMask, IndicatorStore, LedReport, Profile, SlotLayout, Transport,
};
use tracing::{debug, warn};

use super::notify_changes::ChangeNotifier;

/// Answers "which host connection is active right now".
///
/// Implemented by the connection manager; tests use mocks.
pub trait EndpointSelector: Send + Sync {
    /// The currently selected endpoint. For wireless selections the profile
    /// is the active pairing profile; for wired it is 0.
    fn selected(&self) -> Endpoint;
}

/// Per-endpoint indicator state plus change scheduling.
pub struct HidIndicators {
    store: IndicatorStore,
    selector: Arc<dyn EndpointSelector>,
    notifier: Arc<ChangeNotifier>,
}

impl HidIndicators {
    /// Creates an all-off indicator table sized for `layout`.
    pub fn new(layout: SlotLayout, selector: Arc<dyn EndpointSelector>) -> Self {
        Self {
            store: IndicatorStore::new(layout),
            selector,
            notifier: Arc::new(ChangeNotifier::new()),
        }
    }

    /// The notifier scheduled by every accepted update.
    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    pub fn layout(&self) -> SlotLayout {
        self.store.layout()
    }

    /// Every endpoint and its current mask, in slot order.
    pub fn snapshot(&self) -> Vec<(Endpoint, IndicatorMask)> {
        self.store.snapshot()
    }

    /// Indicators for whichever endpoint the connection manager reports as
    /// selected.
    pub fn get_current_profile_indicators(&self) -> IndicatorMask {
        let selected = self.selector.selected();
        self.get_profile_indicators(selected.transport, selected.profile)
    }

    /// Indicators for an explicit endpoint; zero mask if it has no slot.
    pub fn get_profile_indicators(&self, transport: Transport, profile: Profile) -> IndicatorMask {
        self.store.get(Endpoint::new(transport, profile))
    }

    /// Stores `mask` for the endpoint and schedules a change notification.
    ///
    /// Silently ignored if the endpoint has no slot. Safe to call from any
    /// thread; never blocks.
    pub fn set_profile_indicators(&self, mask: IndicatorMask, transport: Transport, profile: Profile) {
        if self.store.set(Endpoint::new(transport, profile), mask) {
            self.notifier.schedule();
        }
    }

    /// Applies an inbound LED output report for the endpoint.
    pub fn process_indicator_report(&self, report: &LedReport, transport: Transport, profile: Profile) {
        self.set_profile_indicators(report.leds, transport, profile);
        debug!(
            "update HID indicators: endpoint={}, indicators={}",
            Endpoint::new(transport, profile),
            report.leds
        );
    }

    /// Parses a raw LED report body and applies it.
    ///
    /// Malformed payloads are logged and dropped.
    pub fn process_raw_report(&self, body: &[u8], transport: Transport, profile: Profile) {
        match LedReport::from_body(body) {
            Ok(report) => self.process_indicator_report(&report, transport, profile),
            Err(e) => warn!(
                "dropping LED report from {}: {e}",
                Endpoint::new(transport, profile)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Selector whose answer tests can change.
    struct FixedSelector(Mutex<Endpoint>);

    impl EndpointSelector for FixedSelector {
        fn selected(&self) -> Endpoint {
            *self.0.lock().unwrap()
        }
    }

    fn make_indicators(active: Endpoint) -> (HidIndicators, Arc<FixedSelector>) {
        let selector = Arc::new(FixedSelector(Mutex::new(active)));
        let indicators = HidIndicators::new(
            SlotLayout::new(true, 3),
            Arc::clone(&selector) as Arc<dyn EndpointSelector>,
        );
        (indicators, selector)
    }

    #[test]
    fn test_set_then_get_round_trips_for_every_supported_endpoint() {
        let (indicators, _) = make_indicators(Endpoint::wired());
        let endpoints = [
            Endpoint::wired(),
            Endpoint::wireless(0),
            Endpoint::wireless(1),
            Endpoint::wireless(2),
        ];
        for (i, ep) in endpoints.iter().enumerate() {
            let mask = IndicatorMask(0x11 + i as u8);
            indicators.set_profile_indicators(mask, ep.transport, ep.profile);
            assert_eq!(indicators.get_profile_indicators(ep.transport, ep.profile), mask);
        }
    }

    #[test]
    fn test_set_schedules_notification() {
        let (indicators, _) = make_indicators(Endpoint::wired());
        assert!(!indicators.notifier().is_pending());

        indicators.set_profile_indicators(IndicatorMask(0x01), Transport::Wired, 0);

        assert!(indicators.notifier().is_pending());
    }

    #[test]
    fn test_out_of_range_set_is_noop_and_schedules_nothing() {
        // Arrange
        let (indicators, _) = make_indicators(Endpoint::wired());
        let before = indicators.snapshot();

        // Act
        indicators.set_profile_indicators(IndicatorMask(0x01), Transport::Wireless, 5);

        // Assert
        assert_eq!(indicators.snapshot(), before);
        assert!(!indicators.notifier().is_pending());
        assert_eq!(
            indicators.get_profile_indicators(Transport::Wireless, 5),
            IndicatorMask::NONE
        );
    }

    #[test]
    fn test_current_profile_follows_selector() {
        // Arrange
        let (indicators, selector) = make_indicators(Endpoint::wireless(0));
        indicators.set_profile_indicators(IndicatorMask(0x04), Transport::Wireless, 1);
        assert_eq!(indicators.get_current_profile_indicators(), IndicatorMask::NONE);

        // Act
        *selector.0.lock().unwrap() = Endpoint::wireless(1);

        // Assert
        assert_eq!(indicators.get_current_profile_indicators(), IndicatorMask(0x04));
    }

    #[test]
    fn test_current_profile_ignores_profile_for_wired() {
        let odd = Endpoint {
            transport: Transport::Wired,
            profile: 2,
        };
        let (indicators, _) = make_indicators(odd);
        indicators.set_profile_indicators(IndicatorMask(0x02), Transport::Wired, 0);
        assert_eq!(indicators.get_current_profile_indicators(), IndicatorMask(0x02));
    }

    #[test]
    fn test_process_indicator_report_stores_led_byte() {
        let (indicators, _) = make_indicators(Endpoint::wired());
        let report = LedReport::new(IndicatorMask(0x03));
        indicators.process_indicator_report(&report, Transport::Wireless, 2);
        assert_eq!(
            indicators.get_profile_indicators(Transport::Wireless, 2),
            IndicatorMask(0x03)
        );
    }

    #[test]
    fn test_process_raw_report_drops_empty_payload() {
        let (indicators, _) = make_indicators(Endpoint::wired());
        indicators.process_raw_report(&[], Transport::Wired, 0);
        assert!(!indicators.notifier().is_pending());

        indicators.process_raw_report(&[0x01], Transport::Wired, 0);
        assert_eq!(
            indicators.get_profile_indicators(Transport::Wired, 0),
            IndicatorMask(0x01)
        );
    }
}
