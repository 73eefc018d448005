//! Application layer: indicator tracking and change notification.
//!
//! Use cases here depend only on `hid_indicators_core` and on collaborator
//! traits ([`track_indicators::EndpointSelector`],
//! [`notify_changes::IndicatorEventPublisher`],
//! [`notify_changes::SplitIndicatorSync`]). Concrete implementations are
//! injected from the infrastructure layer or from tests.
//!
//! # Sub-modules
//!
//! - **`track_indicators`** – The public indicator API: per-endpoint get/set
//!   and LED report processing.
//! - **`notify_changes`** – The coalescing notifier and the worker that
//!   publishes the active endpoint's indicators.
//! - **`endpoint_events`** – Subscriptions that re-publish when the active
//!   host changes.

pub mod endpoint_events;
pub mod notify_changes;
pub mod track_indicators;
