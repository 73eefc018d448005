//! HID keyboard LED output report parsing.
//!
//! Hosts toggle lock-key indicators by sending an output report to the
//! keyboard. For the boot keyboard the report body is a single byte whose
//! low five bits are NumLock, CapsLock, ScrollLock, Compose and Kana; the
//! remaining bits are padding. Transports that multiplex several reports on
//! one endpoint prefix the body with a report ID.
//!
//! ```text
//! body only:        [ leds ]
//! with report ID:   [ id | leds ]
//! ```
//!
//! Anything after the LED byte is ignored.

use thiserror::Error;

use crate::domain::mask::IndicatorMask;

/// Errors that can occur while parsing an LED output report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The payload does not contain an LED byte.
    #[error("LED report payload is empty")]
    Empty,

    /// The leading report ID does not match the keyboard's LED report ID.
    #[error("unexpected report ID: expected 0x{expected:02X}, found 0x{found:02X}")]
    UnexpectedReportId { expected: u8, found: u8 },
}

/// A parsed LED output report body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedReport {
    pub leds: IndicatorMask,
}

impl LedReport {
    pub const fn new(leds: IndicatorMask) -> Self {
        Self { leds }
    }

    /// Parses a report body with no report ID prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Empty`] if `body` has no bytes.
    pub fn from_body(body: &[u8]) -> Result<Self, ReportError> {
        let leds = *body.first().ok_or(ReportError::Empty)?;
        Ok(Self::new(IndicatorMask(leds)))
    }

    /// Parses a report whose first byte is the report ID.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Empty`] if either the ID or the LED byte is
    /// missing, and [`ReportError::UnexpectedReportId`] if the ID differs
    /// from `report_id`.
    pub fn from_report(payload: &[u8], report_id: u8) -> Result<Self, ReportError> {
        let (&found, body) = payload.split_first().ok_or(ReportError::Empty)?;
        if found != report_id {
            return Err(ReportError::UnexpectedReportId {
                expected: report_id,
                found,
            });
        }
        Self::from_body(body)
    }
}
