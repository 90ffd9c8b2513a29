//! Frame size policy
//!
//! Pure validation of frame and payload lengths against the IEEE 802.3
//! framing constants. Out-of-range lengths are rejected, never rounded,
//! padded or truncated.

use crate::constants::{
    ETH_JUMBO_FRAME_PAYLOAD_LEN, ETH_JUMBO_MAX_PACKET_SIZE, ETH_MAX_PACKET_SIZE,
    ETH_MAX_PAYLOAD_LEN, ETH_MIN_PACKET_SIZE, ETH_MIN_PAYLOAD_LEN,
};
use crate::error::{ArgumentError, Result};

/// Upper frame bound in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameMode {
    /// Up to 1500 bytes of payload
    #[default]
    Standard,
    /// Up to 9000 bytes of payload
    Jumbo,
}

impl FrameMode {
    /// Largest accepted payload in bytes
    pub const fn max_payload_len(self) -> usize {
        match self {
            FrameMode::Standard => ETH_MAX_PAYLOAD_LEN,
            FrameMode::Jumbo => ETH_JUMBO_FRAME_PAYLOAD_LEN,
        }
    }

    /// Largest accepted frame (header, VLAN tag, payload and CRC) in bytes
    pub const fn max_packet_size(self) -> usize {
        match self {
            FrameMode::Standard => ETH_MAX_PACKET_SIZE,
            FrameMode::Jumbo => ETH_JUMBO_MAX_PACKET_SIZE,
        }
    }
}

/// Validate a complete frame length against the standard bounds
///
/// Valid range is `[ETH_MIN_PACKET_SIZE, ETH_MAX_PACKET_SIZE]` (64..=1522).
pub const fn validate_frame_length(total_length: usize) -> Result<()> {
    validate_frame_length_for(FrameMode::Standard, total_length)
}

/// Validate a complete frame length for the given mode
pub const fn validate_frame_length_for(mode: FrameMode, total_length: usize) -> Result<()> {
    if total_length < ETH_MIN_PACKET_SIZE || total_length > mode.max_packet_size() {
        return Err(crate::Error::InvalidArgument(ArgumentError::InvalidFrameLength));
    }
    Ok(())
}

/// Validate a payload length for the given mode
pub const fn validate_payload_length(mode: FrameMode, payload_length: usize) -> Result<()> {
    if payload_length < ETH_MIN_PAYLOAD_LEN || payload_length > mode.max_payload_len() {
        return Err(crate::Error::InvalidArgument(ArgumentError::InvalidFrameLength));
    }
    Ok(())
}

/// Frame policy bound to a configured mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramePolicy {
    mode: FrameMode,
}

impl FramePolicy {
    /// Create a policy for the given mode
    pub const fn new(mode: FrameMode) -> Self {
        Self { mode }
    }

    /// Configured mode
    pub const fn mode(&self) -> FrameMode {
        self.mode
    }

    /// Smallest accepted frame in bytes
    pub const fn min_packet_size(&self) -> usize {
        ETH_MIN_PACKET_SIZE
    }

    /// Largest accepted frame in bytes
    pub const fn max_packet_size(&self) -> usize {
        self.mode.max_packet_size()
    }

    /// Largest accepted payload in bytes (the MTU seen by the stack)
    pub const fn max_payload_len(&self) -> usize {
        self.mode.max_payload_len()
    }

    /// Validate a complete frame length
    pub const fn check_frame(&self, total_length: usize) -> Result<()> {
        validate_frame_length_for(self.mode, total_length)
    }

    /// Validate a payload length
    pub const fn check_payload(&self, payload_length: usize) -> Result<()> {
        validate_payload_length(self.mode, payload_length)
    }
}
