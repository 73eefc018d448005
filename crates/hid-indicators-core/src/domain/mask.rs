//! Host-reported lock-key indicator bits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit indicator flags as reported by a host in the boot-keyboard LED
/// output report.
///
/// Only the five standard bits have accessors; the reserved upper bits are
/// stored verbatim and never interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorMask(pub u8);

impl IndicatorMask {
    pub const NUM_LOCK: u8 = 1 << 0;
    pub const CAPS_LOCK: u8 = 1 << 1;
    pub const SCROLL_LOCK: u8 = 1 << 2;
    pub const COMPOSE: u8 = 1 << 3;
    pub const KANA: u8 = 1 << 4;

    /// All indicators off.
    pub const NONE: IndicatorMask = IndicatorMask(0);

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if no indicator bit (reserved bits included) is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn num_lock(self) -> bool {
        self.0 & Self::NUM_LOCK != 0
    }

    pub fn caps_lock(self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }

    pub fn scroll_lock(self) -> bool {
        self.0 & Self::SCROLL_LOCK != 0
    }

    pub fn compose(self) -> bool {
        self.0 & Self::COMPOSE != 0
    }

    pub fn kana(self) -> bool {
        self.0 & Self::KANA != 0
    }
}

impl From<u8> for IndicatorMask {
    fn from(bits: u8) -> Self {
        IndicatorMask(bits)
    }
}

impl From<IndicatorMask> for u8 {
    fn from(mask: IndicatorMask) -> Self {
        mask.0
    }
}

impl fmt::Display for IndicatorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_off() {
        let mask = IndicatorMask::default();
        assert_eq!(mask, IndicatorMask::NONE);
        assert!(mask.is_empty());
        assert!(!mask.num_lock() && !mask.caps_lock() && !mask.scroll_lock());
    }

    #[test]
    fn test_accessors_follow_boot_report_bit_layout() {
        assert!(IndicatorMask(0x01).num_lock());
        assert!(IndicatorMask(0x02).caps_lock());
        assert!(IndicatorMask(0x04).scroll_lock());
        assert!(IndicatorMask(0x08).compose());
        assert!(IndicatorMask(0x10).kana());
        assert!(!IndicatorMask(0x02).num_lock());
    }

    #[test]
    fn test_reserved_bits_are_preserved() {
        let mask = IndicatorMask::from(0xE0);
        assert_eq!(mask.bits(), 0xE0);
        assert!(!mask.is_empty());
        assert!(!mask.kana());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(IndicatorMask(0x02).to_string(), "0x02");
        assert_eq!(IndicatorMask(0xff).to_string(), "0xff");
    }
}
