//! Host connection identity: transport kind plus wireless pairing profile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numbered pairing slot of a wireless transport.
///
/// Meaningless for [`Transport::Wired`], where it is always treated as 0.
pub type Profile = u8;

/// Kind of logical connection to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// The single wired (USB) connection.
    Wired,
    /// A wireless (BLE) connection, numbered by profile.
    Wireless,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Wired => f.write_str("wired"),
            Transport::Wireless => f.write_str("wireless"),
        }
    }
}

/// One logical host connection: a transport and, for wireless, its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub transport: Transport,
    #[serde(default)]
    pub profile: Profile,
}

impl Endpoint {
    /// Builds an endpoint, normalising the profile to 0 for wired transports.
    pub fn new(transport: Transport, profile: Profile) -> Self {
        match transport {
            Transport::Wired => Self::wired(),
            Transport::Wireless => Self::wireless(profile),
        }
    }

    /// The wired endpoint.
    pub const fn wired() -> Self {
        Self {
            transport: Transport::Wired,
            profile: 0,
        }
    }

    /// The wireless endpoint for pairing profile `profile`.
    pub const fn wireless(profile: Profile) -> Self {
        Self {
            transport: Transport::Wireless,
            profile,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transport {
            Transport::Wired => f.write_str("wired"),
            Transport::Wireless => write!(f, "wireless:{}", self.profile),
        }
    }
}
