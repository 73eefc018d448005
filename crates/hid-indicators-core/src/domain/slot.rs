//! Slot addressing: maps an [`Endpoint`] to its fixed position in the
//! indicator table.
//!
//! The table holds one slot per supported connection. When the wired
//! transport is supported it always occupies slot 0; wireless profile `p`
//! occupies slot `wired_count() + p`.
//!
//! ```text
//! wired = true, wireless_profiles = 3
//!
//!   slot:      0        1            2            3
//!            wired  wireless:0  wireless:1  wireless:2
//! ```

use thiserror::Error;

use super::endpoint::{Endpoint, Profile, Transport};

/// Index into the indicator table, `0 <= slot < capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub usize);

/// Addressing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    /// The transport is not supported by this layout, or the wireless
    /// profile number is past the last configured profile.
    #[error("no indicator slot for {transport} profile {profile}")]
    OutOfRange {
        transport: Transport,
        profile: Profile,
    },
}

/// Static description of which transports (and how many wireless profiles)
/// this device supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    wired: bool,
    wireless_profiles: u8,
}

impl SlotLayout {
    pub const fn new(wired: bool, wireless_profiles: u8) -> Self {
        Self {
            wired,
            wireless_profiles,
        }
    }

    /// Returns `true` if the wired transport has a slot.
    pub const fn supports_wired(&self) -> bool {
        self.wired
    }

    /// Returns `true` if at least one wireless profile has a slot.
    pub const fn supports_wireless(&self) -> bool {
        self.wireless_profiles > 0
    }

    /// Number of wireless profiles with a slot.
    pub const fn wireless_profiles(&self) -> u8 {
        self.wireless_profiles
    }

    /// Slots taken by the wired transport (0 or 1).
    pub const fn wired_count(&self) -> usize {
        if self.wired {
            1
        } else {
            0
        }
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        self.wired_count() + self.wireless_profiles as usize
    }

    /// Resolves the slot for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::OutOfRange`] if the transport is unsupported or
    /// the wireless profile is `>= wireless_profiles`.
    pub fn index(&self, endpoint: Endpoint) -> Result<Slot, SlotError> {
        match endpoint.transport {
            Transport::Wired if self.wired => Ok(Slot(0)),
            Transport::Wireless if endpoint.profile < self.wireless_profiles => {
                Ok(Slot(self.wired_count() + endpoint.profile as usize))
            }
            transport => Err(SlotError::OutOfRange {
                transport,
                profile: endpoint.profile,
            }),
        }
    }

    /// Inverse of [`index`](Self::index): the endpoint stored at `slot`.
    pub fn endpoint_at(&self, slot: Slot) -> Option<Endpoint> {
        if slot.0 >= self.capacity() {
            return None;
        }
        if self.wired && slot.0 == 0 {
            return Some(Endpoint::wired());
        }
        let profile = slot.0 - self.wired_count();
        Profile::try_from(profile).ok().map(Endpoint::wireless)
    }
}
