//! # hid-indicators-core
//!
//! Domain types for tracking keyboard lock-key indicators (NumLock, CapsLock,
//! ScrollLock, Compose, Kana) per host connection.
//!
//! A keyboard may be connected to several hosts at once: one wired host and
//! a numbered set of wireless pairing profiles. Each host sends its own LED
//! output report, so indicator state is kept per connection ("endpoint") and
//! whoever displays it asks for the state of the endpoint that is currently
//! active.
//!
//! - **`domain`** – [`Endpoint`] addressing, the opaque [`IndicatorMask`],
//!   the [`SlotLayout`] addressing rule and the lock-free [`IndicatorStore`].
//! - **`report`** – Parsing of inbound HID LED output reports.
//!
//! This crate has no async runtime or OS dependencies; change notification
//! lives in `hid-indicators-service`.

pub mod domain;
pub mod report;

pub use domain::endpoint::{Endpoint, Profile, Transport};
pub use domain::mask::IndicatorMask;
pub use domain::slot::{Slot, SlotError, SlotLayout};
pub use domain::store::IndicatorStore;
pub use report::{LedReport, ReportError};
