//! Endpoint events: re-publish indicators when the active host changes.
//!
//! Switching the active host changes which endpoint's indicators should be
//! shown even though no new LED report arrived. The connection manager
//! announces such switches as [`EndpointEvent`]s; this listener turns each
//! one it is subscribed to into a [`ChangeNotifier::schedule`] call. Events
//! carry no state into the cycle; it always re-reads the current selection.

use std::sync::Arc;

use hid_indicators_core::{Endpoint, Profile, SlotLayout};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::notify_changes::ChangeNotifier;

/// Selection changes announced by the connection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointEvent {
    /// The selected transport (and with it the endpoint) changed.
    SelectionChanged(Endpoint),
    /// The active wireless pairing profile changed.
    ActiveProfileChanged(Profile),
}

/// Kinds of [`EndpointEvent`] a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointEventKind {
    SelectionChanged,
    ActiveProfileChanged,
}

impl EndpointEvent {
    pub fn kind(&self) -> EndpointEventKind {
        match self {
            EndpointEvent::SelectionChanged(_) => EndpointEventKind::SelectionChanged,
            EndpointEvent::ActiveProfileChanged(_) => EndpointEventKind::ActiveProfileChanged,
        }
    }
}

/// Event kinds the indicator listener reacts to, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriptions {
    kinds: Vec<EndpointEventKind>,
}

impl Subscriptions {
    /// Selection changes are always subscribed; active-profile changes only
    /// when the layout has wireless profiles.
    pub fn for_layout(layout: SlotLayout) -> Self {
        let mut kinds = vec![EndpointEventKind::SelectionChanged];
        if layout.supports_wireless() {
            kinds.push(EndpointEventKind::ActiveProfileChanged);
        }
        Self { kinds }
    }

    pub fn is_subscribed(&self, kind: EndpointEventKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Pumps endpoint events into `notifier` until the channel closes.
///
/// Returns the number of events that matched a subscription.
pub async fn run_endpoint_listener(
    mut rx: mpsc::Receiver<EndpointEvent>,
    subscriptions: Subscriptions,
    notifier: Arc<ChangeNotifier>,
) -> usize {
    let mut handled = 0;
    while let Some(event) = rx.recv().await {
        if !subscriptions.is_subscribed(event.kind()) {
            trace!("ignoring unsubscribed endpoint event {event:?}");
            continue;
        }
        debug!("endpoint event {event:?}; scheduling indicator notification");
        notifier.schedule();
        handled += 1;
    }
    debug!("endpoint event channel closed");
    handled
}
