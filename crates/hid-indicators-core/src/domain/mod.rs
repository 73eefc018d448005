//! Domain entities for indicator tracking.
//!
//! Pure state and addressing rules with no async runtime, OS, or transport
//! dependencies. Everything here can be unit-tested on any host.

/// Transport kinds, pairing profiles and the [`endpoint::Endpoint`] pair.
pub mod endpoint;
/// The 8-bit [`mask::IndicatorMask`].
pub mod mask;
/// Endpoint-to-slot addressing.
pub mod slot;
/// The per-endpoint [`store::IndicatorStore`].
pub mod store;
