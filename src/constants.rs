//! Centralized Constants
//!
//! This module provides a single source of truth for the Ethernet framing
//! constants and the PHY management address space.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: IEEE 802.3 frame dimensions
//! - **PHY management**: Clause 22 address space and probing defaults
//! - **Timing**: Bounded wait defaults
//!
//! # Note
//!
//! PHY register bit definitions live in [`phy::regs`](crate::phy::regs).

// =============================================================================
// Frame Sizes
// =============================================================================

/// Maximum Ethernet payload size
pub const ETH_MAX_PAYLOAD_LEN: usize = 1500;

/// Minimum Ethernet payload size
pub const ETH_MIN_PAYLOAD_LEN: usize = 46;

/// Ethernet header size: dst MAC (6) + src MAC (6) + EtherType (2)
pub const ETH_HEADER_LEN: usize = 14;

/// Optional 802.1Q VLAN tag length
pub const ETH_VLAN_TAG_LEN: usize = 4;

/// Jumbo frame payload size
pub const ETH_JUMBO_FRAME_PAYLOAD_LEN: usize = 9000;

/// CRC/FCS trailer size
pub const ETH_CRC_LEN: usize = 4;

/// Maximum frame size (1522 bytes)
pub const ETH_MAX_PACKET_SIZE: usize =
    ETH_HEADER_LEN + ETH_VLAN_TAG_LEN + ETH_MAX_PAYLOAD_LEN + ETH_CRC_LEN;

/// Minimum frame size (64 bytes)
pub const ETH_MIN_PACKET_SIZE: usize = ETH_HEADER_LEN + ETH_MIN_PAYLOAD_LEN + ETH_CRC_LEN;

/// Maximum jumbo frame size (9022 bytes)
pub const ETH_JUMBO_MAX_PACKET_SIZE: usize =
    ETH_HEADER_LEN + ETH_VLAN_TAG_LEN + ETH_JUMBO_FRAME_PAYLOAD_LEN + ETH_CRC_LEN;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

// =============================================================================
// PHY Management (IEEE 802.3 Clause 22)
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register index (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

/// Number of addresses on a management bus
pub const PHY_ADDR_COUNT: usize = MAX_PHY_ADDR as usize + 1;

/// Value read back from an address with no device behind it
pub const NO_DEVICE_SENTINEL: u16 = 0xFFFF;

// =============================================================================
// Timing
// =============================================================================

/// Default bus idle timeout in microseconds
pub const MDIO_TIMEOUT_US: u32 = 1_000;

/// Poll interval used while waiting for the bus in microseconds
pub const MDIO_POLL_INTERVAL_US: u32 = 10;

/// Default number of BMCR reads while waiting for a soft reset to clear
pub const PHY_RESET_ATTEMPTS: u32 = 100;

/// Interval between link polls in [`wait_for_link`](crate::phy::wait_for_link)
pub const LINK_POLL_INTERVAL_MS: u32 = 10;
