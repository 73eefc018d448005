//! EndpointManager: tracks the selected transport and active wireless profile.
//!
//! This is the in-process stand-in for the keyboard's connection manager.
//! It answers [`EndpointSelector::selected`] for the indicator API and emits
//! an [`EndpointEvent`] whenever the selection actually changes.

use std::sync::RwLock;

use hid_indicators_core::{Endpoint, Profile, SlotLayout, Transport};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::application::{endpoint_events::EndpointEvent, track_indicators::EndpointSelector};

/// Capacity of the endpoint event channel.
const EVENT_CAPACITY: usize = 64;

/// Error type for endpoint selection operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("transport not supported: {0}")]
    TransportUnsupported(Transport),
    #[error("wireless profile {profile} out of range; {count} profile(s) configured")]
    ProfileOutOfRange { profile: Profile, count: u8 },
}

#[derive(Debug, Clone, Copy)]
struct Selection {
    transport: Transport,
    active_profile: Profile,
}

/// The endpoint manager.
pub struct EndpointManager {
    layout: SlotLayout,
    selection: RwLock<Selection>,
    event_tx: mpsc::Sender<EndpointEvent>,
}

impl EndpointManager {
    /// Creates a manager and returns it together with the event receiver.
    ///
    /// Starts on `preferred` if the layout supports it, otherwise on the
    /// other transport.
    pub fn new(layout: SlotLayout, preferred: Transport) -> (Self, mpsc::Receiver<EndpointEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CAPACITY);
        let transport = match preferred {
            Transport::Wired if !layout.supports_wired() && layout.supports_wireless() => {
                Transport::Wireless
            }
            Transport::Wireless if !layout.supports_wireless() => Transport::Wired,
            other => other,
        };
        if transport != preferred {
            info!("preferred transport {preferred} unsupported; starting on {transport}");
        }
        let mgr = Self {
            layout,
            selection: RwLock::new(Selection {
                transport,
                active_profile: 0,
            }),
            event_tx: tx,
        };
        (mgr, rx)
    }

    pub fn selected_transport(&self) -> Transport {
        self.read().transport
    }

    pub fn active_profile(&self) -> Profile {
        self.read().active_profile
    }

    /// Selects the transport used for host traffic.
    ///
    /// Returns `true` and emits [`EndpointEvent::SelectionChanged`] if the
    /// selection changed.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::TransportUnsupported`] if the layout has no
    /// slot for `transport`.
    pub fn select_transport(&self, transport: Transport) -> Result<bool, EndpointError> {
        let supported = match transport {
            Transport::Wired => self.layout.supports_wired(),
            Transport::Wireless => self.layout.supports_wireless(),
        };
        if !supported {
            return Err(EndpointError::TransportUnsupported(transport));
        }

        let endpoint = {
            let mut sel = self.write();
            if sel.transport == transport {
                return Ok(false);
            }
            sel.transport = transport;
            Endpoint::new(sel.transport, sel.active_profile)
        };
        info!("selected endpoint {endpoint}");
        self.emit(EndpointEvent::SelectionChanged(endpoint));
        Ok(true)
    }

    /// Switches the active wireless pairing profile.
    ///
    /// Returns `true` and emits [`EndpointEvent::ActiveProfileChanged`] if the
    /// profile changed. The profile is tracked even while wired is selected.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::ProfileOutOfRange`] for profiles past the
    /// last configured one.
    pub fn set_active_profile(&self, profile: Profile) -> Result<bool, EndpointError> {
        let count = self.layout.wireless_profiles();
        if profile >= count {
            return Err(EndpointError::ProfileOutOfRange { profile, count });
        }

        {
            let mut sel = self.write();
            if sel.active_profile == profile {
                return Ok(false);
            }
            sel.active_profile = profile;
        }
        info!("active wireless profile {profile}");
        self.emit(EndpointEvent::ActiveProfileChanged(profile));
        Ok(true)
    }

    fn emit(&self, event: EndpointEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            // Queued events already schedule a cycle that re-reads the selection.
            Err(TrySendError::Full(event)) => debug!("endpoint event queue full; dropping {event:?}"),
            Err(TrySendError::Closed(event)) => warn!("no endpoint listener; dropping {event:?}"),
        }
    }

    fn read(&self) -> Selection {
        *self.selection.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Selection> {
        self.selection
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EndpointSelector for EndpointManager {
    fn selected(&self) -> Endpoint {
        let sel = self.read();
        Endpoint::new(sel.transport, sel.active_profile)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager() -> (EndpointManager, mpsc::Receiver<EndpointEvent>) {
        EndpointManager::new(SlotLayout::new(true, 3), Transport::Wired)
    }

    #[test]
    fn test_starts_on_preferred_transport() {
        let (mgr, _rx) = make_manager();
        assert_eq!(mgr.selected(), Endpoint::wired());
    }

    #[test]
    fn test_falls_back_when_preferred_transport_unsupported() {
        let (mgr, _rx) = EndpointManager::new(SlotLayout::new(false, 2), Transport::Wired);
        assert_eq!(mgr.selected_transport(), Transport::Wireless);

        let (mgr, _rx) = EndpointManager::new(SlotLayout::new(true, 0), Transport::Wireless);
        assert_eq!(mgr.selected_transport(), Transport::Wired);
    }

    #[test]
    fn test_select_transport_emits_selection_changed() {
        // Arrange
        let (mgr, mut rx) = make_manager();
        mgr.set_active_profile(2).unwrap();
        let _ = rx.try_recv();

        // Act
        let changed = mgr.select_transport(Transport::Wireless).unwrap();

        // Assert
        assert!(changed);
        assert_eq!(mgr.selected(), Endpoint::wireless(2));
        assert_eq!(
            rx.try_recv().unwrap(),
            EndpointEvent::SelectionChanged(Endpoint::wireless(2))
        );
    }

    #[test]
    fn test_reselecting_same_transport_emits_nothing() {
        let (mgr, mut rx) = make_manager();
        assert_eq!(mgr.select_transport(Transport::Wired), Ok(false));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_select_unsupported_transport_is_rejected() {
        let (mgr, _rx) = EndpointManager::new(SlotLayout::new(true, 0), Transport::Wired);
        assert_eq!(
            mgr.select_transport(Transport::Wireless),
            Err(EndpointError::TransportUnsupported(Transport::Wireless))
        );
    }

    #[test]
    fn test_set_active_profile_emits_profile_changed() {
        let (mgr, mut rx) = make_manager();
        assert_eq!(mgr.set_active_profile(1), Ok(true));
        assert_eq!(mgr.active_profile(), 1);
        assert_eq!(rx.try_recv().unwrap(), EndpointEvent::ActiveProfileChanged(1));
    }

    #[test]
    fn test_set_active_profile_out_of_range_is_rejected() {
        let (mgr, mut rx) = make_manager();
        assert_eq!(
            mgr.set_active_profile(3),
            Err(EndpointError::ProfileOutOfRange { profile: 3, count: 3 })
        );
        assert_eq!(mgr.active_profile(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_wired_selection_reports_profile_zero() {
        let (mgr, _rx) = make_manager();
        mgr.set_active_profile(2).unwrap();
        assert_eq!(mgr.selected(), Endpoint::wired());
    }

    #[test]
    fn test_emit_without_listener_does_not_fail() {
        let (mgr, rx) = make_manager();
        drop(rx);
        assert_eq!(mgr.set_active_profile(1), Ok(true));
    }
}
