//! Configuration types for the mediator and the generic PHY driver

use crate::constants::PHY_RESET_ATTEMPTS;
use crate::frame::{FrameMode, FramePolicy};
use crate::mediator::PhyAddress;

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// Which probe the PHY driver uses when its address is detected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeKind {
    /// Read BMCR, treat 0xFFFF as "no device"
    #[default]
    BasicControl,
    /// Read PHYIDR1, treat 0xFFFF and 0x0000 as "no device"
    PhyId,
}

// =============================================================================
// Mediator Configuration
// =============================================================================

/// Mediator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MediatorConfig {
    /// Frame size bound applied to every delivered frame
    pub frame_mode: FrameMode,
}

impl MediatorConfig {
    /// Create a new configuration with defaults (standard frames)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame_mode: FrameMode::Standard,
        }
    }

    /// Set the frame mode
    #[must_use]
    pub const fn with_frame_mode(mut self, mode: FrameMode) -> Self {
        self.frame_mode = mode;
        self
    }

    /// Accept jumbo frames up to 9000 bytes of payload
    #[must_use]
    pub const fn with_jumbo_frames(self, enabled: bool) -> Self {
        self.with_frame_mode(if enabled {
            FrameMode::Jumbo
        } else {
            FrameMode::Standard
        })
    }

    /// Frame policy derived from this configuration
    #[must_use]
    pub const fn frame_policy(&self) -> FramePolicy {
        FramePolicy::new(self.frame_mode)
    }
}

// =============================================================================
// PHY Configuration
// =============================================================================

/// Generic PHY driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// Fixed PHY address, or `None` to detect it on init
    pub address: Option<PhyAddress>,
    /// Probe used for detection when `address` is `None`
    pub probe: ProbeKind,
    /// BMCR reads while waiting for a soft reset to self-clear
    pub reset_attempts: u32,
    /// Enable auto-negotiation on init (otherwise clear it after the reset)
    pub auto_negotiation: bool,
    /// Advertise PAUSE ability on init
    pub advertise_pause: bool,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhyConfig {
    /// Create a new configuration: auto-detected address, auto-negotiation on
    #[must_use]
    pub const fn new() -> Self {
        Self {
            address: None,
            probe: ProbeKind::BasicControl,
            reset_attempts: PHY_RESET_ATTEMPTS,
            auto_negotiation: true,
            advertise_pause: false,
        }
    }

    /// Use a fixed PHY address instead of detecting it
    #[must_use]
    pub const fn with_address(mut self, address: PhyAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Detect the PHY address on init using the given probe
    #[must_use]
    pub const fn with_auto_address(mut self, probe: ProbeKind) -> Self {
        self.address = None;
        self.probe = probe;
        self
    }

    /// Set the number of soft reset polls
    #[must_use]
    pub const fn with_reset_attempts(mut self, attempts: u32) -> Self {
        self.reset_attempts = attempts;
        self
    }

    /// Enable or disable auto-negotiation on init
    #[must_use]
    pub const fn with_auto_negotiation(mut self, enabled: bool) -> Self {
        self.auto_negotiation = enabled;
        self
    }

    /// Advertise PAUSE ability on init
    #[must_use]
    pub const fn with_pause_advertisement(mut self, enabled: bool) -> Self {
        self.advertise_pause = enabled;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
