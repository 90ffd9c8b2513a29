//! Hardware Abstraction Layer
//!
//! Bus transports the mediator sits on.
//!
//! # Modules
//!
//! - [`mdio`]: MDIO/SMI bus trait and a bounded polling wrapper
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod mdio;

// Re-export commonly used types
pub use mdio::{MdioBus, PolledMdio, wait_idle};
