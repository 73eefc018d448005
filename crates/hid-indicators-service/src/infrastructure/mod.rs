//! Infrastructure layer for the indicator service.
//!
//! Concrete adapters for the application layer's collaborator traits:
//! endpoint selection, event publication, split-link forwarding, and config
//! storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `hid_indicators_core`, but MUST NOT be imported by the `application` layer.

pub mod endpoints;
pub mod events;
pub mod split;
pub mod storage;
