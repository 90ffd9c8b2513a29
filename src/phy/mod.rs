//! Ethernet PHY Drivers
//!
//! This module provides a PHY driver trait and a driver for any IEEE 802.3
//! Clause 22 compliant PHY.
//!
//! # Architecture
//!
//! The PHY layer never talks to the MAC. Every register access, and every
//! link change it reports, goes through a [`Mediator`](crate::Mediator)
//! lent to it by the MAC driver. This allows:
//!
//! - Reuse across different MAC implementations
//! - Easy addition of new PHY drivers
//! - Testing with mock mediators
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_mediator::phy::{GenericPhy, PhyDriver};
//! use ph_eth_mediator::PhyConfig;
//!
//! // Address is detected on init
//! let mut phy = GenericPhy::new(PhyConfig::new());
//! phy.init(&mut mediator)?;
//!
//! // Poll periodically; changes are notified through the mediator
//! loop {
//!     if phy.poll_link(&mut mediator)?.is_up() {
//!         break;
//!     }
//! }
//! ```

pub mod generic;
pub mod regs;

pub use generic::{BoundPhy, GenericPhy, LinkStatus, PhyDriver, ieee802_3, wait_for_link};
pub use regs::{anar, bmcr, bmsr, phy_reg};
