//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Helpers for wiring the mediator's frame path into a
//! [smoltcp](https://docs.rs/smoltcp) interface: device capabilities derived
//! from the configured [`FramePolicy`], the interface hardware address, and
//! a [`StackInput`] wrapper that only forwards frames whose Ethernet header
//! parses.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface};
//!
//! let caps = device_capabilities(mediator.frame_policy());
//! let config = Config::new(ethernet_address(mac).into());
//! ```
//!
//! # Features
//!
//! This module is only available when the `smoltcp` feature is enabled in Cargo.toml:
//! ```toml
//! [dependencies]
//! ph-eth-mediator = { version = "0.1", features = ["smoltcp"] }
//! ```

use smoltcp::phy::{Checksum, ChecksumCapabilities, DeviceCapabilities, Medium};
use smoltcp::wire::{EthernetAddress, EthernetFrame};

use crate::constants::ETH_HEADER_LEN;
use crate::error::{Result, TransportError};
use crate::frame::FramePolicy;
use crate::mediator::{MacAddress, StackInput};

/// smoltcp device capabilities for a frame policy
///
/// For an Ethernet medium smoltcp counts the header in the MTU, but not
/// the FCS.
pub fn device_capabilities(policy: FramePolicy) -> DeviceCapabilities {
    let mut caps = DeviceCapabilities::default();

    caps.medium = Medium::Ethernet;
    caps.max_transmission_unit = policy.max_payload_len() + ETH_HEADER_LEN;

    // Single frame at a time
    caps.max_burst_size = Some(1);

    // Software checksums in both directions
    caps.checksum = ChecksumCapabilities::default();
    caps.checksum.ipv4 = Checksum::Both;
    caps.checksum.udp = Checksum::Both;
    caps.checksum.tcp = Checksum::Both;
    caps.checksum.icmpv4 = Checksum::Both;

    caps
}

/// Get the smoltcp hardware address for a MAC address
pub fn ethernet_address(mac: MacAddress) -> EthernetAddress {
    EthernetAddress(mac)
}

/// Stack input that rejects frames without a parseable Ethernet header
#[derive(Debug)]
pub struct CheckedInput<S: StackInput> {
    inner: S,
}

impl<S: StackInput> CheckedInput<S> {
    /// Wrap a stack input
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped input
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: StackInput> StackInput for CheckedInput<S> {
    fn input(&mut self, frame: &[u8]) -> Result<()> {
        match EthernetFrame::new_checked(frame) {
            Ok(eth) => {
                debug!("rx ethertype {}", u16::from(eth.ethertype()));
                self.inner.input(frame)
            }
            Err(_) => Err(TransportError::StackRejected.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::frame::FrameMode;
    use crate::testing::MockStack;

    #[test]
    fn capabilities_follow_frame_policy() {
        let caps = device_capabilities(FramePolicy::default());
        assert_eq!(caps.medium, Medium::Ethernet);
        assert_eq!(caps.max_transmission_unit, 1514);
        assert_eq!(caps.max_burst_size, Some(1));

        let caps = device_capabilities(FramePolicy::new(FrameMode::Jumbo));
        assert_eq!(caps.max_transmission_unit, 9014);
    }

    #[test]
    fn ethernet_address_wraps_mac() {
        let mac = [0x02, 0x00, 0x00, 0x12, 0x34, 0x56];
        assert_eq!(ethernet_address(mac).as_bytes(), &mac);
    }

    #[test]
    fn checked_input_forwards_valid_frames() {
        let mut input = CheckedInput::new(MockStack::new());
        let mut frame = [0u8; 64];
        frame[12] = 0x08; // IPv4

        input.input(&frame).unwrap();
        assert_eq!(input.inner().frames().len(), 1);
    }

    #[test]
    fn checked_input_rejects_truncated_header() {
        let mut input = CheckedInput::new(MockStack::new());

        assert_eq!(
            input.input(&[0u8; 10]),
            Err(Error::Transport(TransportError::StackRejected))
        );
        assert!(input.inner().frames().is_empty());
    }
}
