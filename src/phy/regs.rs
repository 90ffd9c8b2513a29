//! IEEE 802.3 PHY Register Definitions
//!
//! Standard Clause 22 register indices and the bit fields the generic PHY
//! driver and the detection probes use.
//!
//! | Register | Name | Description |
//! |----------|------|-------------|
//! | 0 | BMCR | Basic Mode Control |
//! | 1 | BMSR | Basic Mode Status |
//! | 2 | PHYIDR1 | PHY Identifier 1 |
//! | 3 | PHYIDR2 | PHY Identifier 2 |
//! | 4 | ANAR | Auto-Negotiation Advertisement |
//! | 5 | ANLPAR | Link Partner Ability |

// =============================================================================
// Standard PHY Register Indices
// =============================================================================

/// Standard PHY register indices (IEEE 802.3 Clause 22)
pub mod phy_reg {
    use crate::mediator::RegisterIndex;

    /// Basic Mode Control Register
    pub const BMCR: RegisterIndex = RegisterIndex::from_const(0);
    /// Basic Mode Status Register
    pub const BMSR: RegisterIndex = RegisterIndex::from_const(1);
    /// PHY Identifier 1
    pub const PHYIDR1: RegisterIndex = RegisterIndex::from_const(2);
    /// PHY Identifier 2
    pub const PHYIDR2: RegisterIndex = RegisterIndex::from_const(3);
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: RegisterIndex = RegisterIndex::from_const(4);
    /// Auto-Negotiation Link Partner Ability Register
    pub const ANLPAR: RegisterIndex = RegisterIndex::from_const(5);
}

// =============================================================================
// BMCR - Basic Mode Control Register (Register 0)
// =============================================================================

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Soft reset - self-clearing
    pub const RESET: u16 = 1 << 15;
    /// Loopback mode
    pub const LOOPBACK: u16 = 1 << 14;
    /// Speed select (100 Mbps if set, 10 Mbps if clear)
    pub const SPEED_100: u16 = 1 << 13;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Power down
    pub const POWER_DOWN: u16 = 1 << 11;
    /// Isolate PHY from RMII/MII
    pub const ISOLATE: u16 = 1 << 10;
    /// Restart auto-negotiation - self-clearing
    pub const AN_RESTART: u16 = 1 << 9;
    /// Duplex mode (full duplex if set)
    pub const DUPLEX_FULL: u16 = 1 << 8;
}

// =============================================================================
// BMSR - Basic Mode Status Register (Register 1)
// =============================================================================

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// 100BASE-TX full duplex capable
    pub const TX_FD_CAPABLE: u16 = 1 << 14;
    /// 100BASE-TX half duplex capable
    pub const TX_HD_CAPABLE: u16 = 1 << 13;
    /// 10BASE-T full duplex capable
    pub const T10_FD_CAPABLE: u16 = 1 << 12;
    /// 10BASE-T half duplex capable
    pub const T10_HD_CAPABLE: u16 = 1 << 11;
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 5;
    /// Auto-negotiation ability
    pub const AN_ABILITY: u16 = 1 << 3;
    /// Link status (1 = link up, 0 = link down)
    pub const LINK_STATUS: u16 = 1 << 2;
    /// Extended register capabilities
    pub const EXT_CAPABLE: u16 = 1 << 0;
}

// =============================================================================
// ANAR / ANLPAR - Auto-Negotiation Ability (Registers 4 and 5)
// =============================================================================

/// ANAR and ANLPAR bits (same layout in both registers)
pub mod anar {
    /// Pause capable
    pub const PAUSE: u16 = 1 << 10;
    /// 100BASE-TX full duplex
    pub const TX_FD: u16 = 1 << 8;
    /// 100BASE-TX half duplex
    pub const TX_HD: u16 = 1 << 7;
    /// 10BASE-T full duplex
    pub const T10_FD: u16 = 1 << 6;
    /// 10BASE-T half duplex
    pub const T10_HD: u16 = 1 << 5;
    /// IEEE 802.3 selector value
    pub const SELECTOR_IEEE802_3: u16 = 0x0001;
    /// All four technology abilities
    pub const ALL_10_100: u16 = TX_FD | TX_HD | T10_FD | T10_HD;
}
