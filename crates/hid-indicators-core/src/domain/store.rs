//! Indicator state table: one mask per supported endpoint.
//!
//! The table is sized once from a [`SlotLayout`] and never grows or shrinks.
//! Writes may come from any thread (e.g. a transport driver's report
//! handler), so every slot is an independent [`AtomicU8`]. Each write fully
//! replaces one slot and nothing spans two slots, so there is no table-wide
//! lock: writers on different endpoints never contend.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::trace;

use super::endpoint::Endpoint;
use super::mask::IndicatorMask;
use super::slot::{Slot, SlotLayout};

/// Fixed-capacity store of the last indicator mask reported per endpoint.
///
/// All slots start at [`IndicatorMask::NONE`].
#[derive(Debug)]
pub struct IndicatorStore {
    layout: SlotLayout,
    slots: Box<[AtomicU8]>,
}

impl IndicatorStore {
    pub fn new(layout: SlotLayout) -> Self {
        let slots = (0..layout.capacity()).map(|_| AtomicU8::new(0)).collect();
        Self { layout, slots }
    }

    /// The addressing layout this store was built with.
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// Returns the mask stored for `endpoint`, or the zero mask if the
    /// endpoint has no slot.
    pub fn get(&self, endpoint: Endpoint) -> IndicatorMask {
        match self.layout.index(endpoint) {
            Ok(slot) => self.load(slot),
            Err(_) => IndicatorMask::NONE,
        }
    }

    /// Replaces the mask stored for `endpoint`.
    ///
    /// Returns `false` (and leaves every slot untouched) if the endpoint has
    /// no slot.
    pub fn set(&self, endpoint: Endpoint, mask: IndicatorMask) -> bool {
        match self.layout.index(endpoint) {
            Ok(Slot(i)) => {
                self.slots[i].store(mask.bits(), Ordering::Release);
                true
            }
            Err(e) => {
                trace!("dropping indicator write: {e}");
                false
            }
        }
    }

    /// Every endpoint and its current mask, in slot order.
    pub fn snapshot(&self) -> Vec<(Endpoint, IndicatorMask)> {
        (0..self.slots.len())
            .filter_map(|i| {
                self.layout
                    .endpoint_at(Slot(i))
                    .map(|endpoint| (endpoint, self.load(Slot(i))))
            })
            .collect()
    }

    fn load(&self, slot: Slot) -> IndicatorMask {
        IndicatorMask(self.slots[slot.0].load(Ordering::Acquire))
    }
}
