//! PHY address detection
//!
//! Scans the 32 management bus addresses in ascending order, one probe read
//! per address, and reports the first address where a device answers. An
//! absent device reads back as all ones because the data line is pulled up.
//!
//! # Example
//!
//! ```ignore
//! match detect_phy_address(&mut mediator) {
//!     Ok(addr) => phy.set_address(addr),
//!     Err(Error::NotFound) => { /* check strapping and power */ }
//!     Err(e) => return Err(e),
//! }
//! ```

use crate::config::ProbeKind;
use crate::constants::NO_DEVICE_SENTINEL;
use crate::error::{ArgumentError, Error, Result};
use crate::mediator::{Mediator, PhyAddress, PhyAddressSet, RegisterIndex};
use crate::phy::regs::phy_reg;

// =============================================================================
// Probes
// =============================================================================

/// How presence is decided at one address
pub trait PhyProbe {
    /// Register read at each address
    fn register(&self) -> RegisterIndex;

    /// Whether `value`, read from [`register`](Self::register), indicates a device
    fn is_present(&self, value: u16) -> bool;
}

/// Reads BMCR; any value but all ones is a device
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicControlProbe;

impl PhyProbe for BasicControlProbe {
    fn register(&self) -> RegisterIndex {
        phy_reg::BMCR
    }

    fn is_present(&self, value: u16) -> bool {
        value != NO_DEVICE_SENTINEL
    }
}

/// Reads PHYIDR1; all ones and all zeros are both "no device"
#[derive(Debug, Clone, Copy, Default)]
pub struct PhyIdProbe;

impl PhyProbe for PhyIdProbe {
    fn register(&self) -> RegisterIndex {
        phy_reg::PHYIDR1
    }

    fn is_present(&self, value: u16) -> bool {
        value != NO_DEVICE_SENTINEL && value != 0x0000
    }
}

impl PhyProbe for ProbeKind {
    fn register(&self) -> RegisterIndex {
        match self {
            ProbeKind::BasicControl => BasicControlProbe.register(),
            ProbeKind::PhyId => PhyIdProbe.register(),
        }
    }

    fn is_present(&self, value: u16) -> bool {
        match self {
            ProbeKind::BasicControl => BasicControlProbe.is_present(value),
            ProbeKind::PhyId => PhyIdProbe.is_present(value),
        }
    }
}

// =============================================================================
// Detection
// =============================================================================

/// Find the lowest responding PHY address using [`BasicControlProbe`]
///
/// # Errors
///
/// - [`ArgumentError::Unbound`] if the mediator is unbound (no bus traffic)
/// - [`Error::NotFound`] after all 32 addresses were probed without a device
/// - the transport error of the first probe that failed
pub fn detect_phy_address<M: Mediator + ?Sized>(mediator: &mut M) -> Result<PhyAddress> {
    detect_phy_address_with(mediator, &BasicControlProbe)
}

/// Find the lowest responding PHY address with a custom probe
pub fn detect_phy_address_with<M, P>(mediator: &mut M, probe: &P) -> Result<PhyAddress>
where
    M: Mediator + ?Sized,
    P: PhyProbe + ?Sized,
{
    ensure_bound(mediator)?;

    let reg = probe.register();
    for addr in PhyAddress::all() {
        let value = mediator.read_phy_register(addr, reg)?;
        if probe.is_present(value) {
            info!("PHY found at address {}", addr.value());
            return Ok(addr);
        }
    }

    warn!("no PHY answered on any address");
    Err(Error::NotFound)
}

/// Probe all 32 addresses and collect every responding one
///
/// An empty set is a valid result; use [`detect_phy_address`] for the
/// "exactly one expected" case.
pub fn scan_phy_addresses<M, P>(mediator: &mut M, probe: &P) -> Result<PhyAddressSet>
where
    M: Mediator + ?Sized,
    P: PhyProbe + ?Sized,
{
    ensure_bound(mediator)?;

    let reg = probe.register();
    let mut found = PhyAddressSet::new();
    for addr in PhyAddress::all() {
        if probe.is_present(mediator.read_phy_register(addr, reg)?) {
            found.insert(addr);
        }
    }

    debug!("PHY scan presence map {:?}", found.bits());
    Ok(found)
}

fn ensure_bound<M: Mediator + ?Sized>(mediator: &M) -> Result<()> {
    if mediator.is_bound() {
        Ok(())
    } else {
        Err(ArgumentError::Unbound.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;
    use crate::error::TransportError;
    use crate::state::StateEvent;
    use crate::testing::{MockMdioBus, test_mediator, test_mediator_with};

    #[test]
    fn finds_phy_at_address_one() {
        let bus = MockMdioBus::new();
        bus.set_register(1, 0, 0x3100);
        let mut eth = test_mediator_with(bus);

        assert_eq!(detect_phy_address(&mut eth), Ok(PhyAddress::new(1).unwrap()));

        let probed: Vec<(u8, u8)> = eth.bus().get_reads();
        assert_eq!(probed, [(0, 0), (1, 0)]);
    }

    #[test]
    fn lowest_address_wins() {
        let bus = MockMdioBus::new();
        bus.set_register(3, 0, 0x1000);
        bus.set_register(17, 0, 0x1000);
        let mut eth = test_mediator_with(bus);

        assert_eq!(detect_phy_address(&mut eth), Ok(PhyAddress::new(3).unwrap()));
        assert_eq!(eth.bus().get_reads().len(), 4);
    }

    #[test]
    fn not_found_after_exactly_32_probes() {
        let mut eth = test_mediator();

        assert_eq!(detect_phy_address(&mut eth), Err(Error::NotFound));

        let probed: Vec<u8> = eth.bus().get_reads().iter().map(|(addr, _)| *addr).collect();
        assert_eq!(probed, (0..32).collect::<Vec<u8>>());
        assert!(eth.bus().get_writes().is_empty());
    }

    #[test]
    fn zero_reads_as_present_for_basic_control() {
        let bus = MockMdioBus::new();
        bus.set_register(0, 0, 0x0000);
        let mut eth = test_mediator_with(bus);

        assert_eq!(detect_phy_address(&mut eth), Ok(PhyAddress::MIN));
    }

    #[test]
    fn phy_id_probe_skips_zero() {
        let bus = MockMdioBus::new();
        bus.set_register(0, 2, 0x0000);
        bus.set_register(9, 2, 0x0007);
        let mut eth = test_mediator_with(bus);

        assert_eq!(
            detect_phy_address_with(&mut eth, &PhyIdProbe),
            Ok(PhyAddress::new(9).unwrap())
        );
        assert!(eth.bus().get_reads().iter().all(|(_, reg)| *reg == 2));
    }

    #[test]
    fn transport_failure_aborts_scan() {
        let bus = MockMdioBus::new();
        bus.fail_on(2, 0, TransportError::Timeout);
        bus.set_register(5, 0, 0x1000);
        let mut eth = test_mediator_with(bus);

        assert_eq!(
            detect_phy_address(&mut eth),
            Err(Error::Transport(TransportError::Timeout))
        );
        assert_eq!(eth.bus().get_reads().len(), 3);
    }

    #[test]
    fn unbound_mediator_issues_no_transaction() {
        let mut eth = test_mediator();
        eth.notify_state(StateEvent::LowLevelInitialized).unwrap();
        eth.notify_state(StateEvent::Deinitialized).unwrap();

        assert_eq!(
            detect_phy_address(&mut eth),
            Err(Error::InvalidArgument(ArgumentError::Unbound))
        );
        assert_eq!(
            scan_phy_addresses(&mut eth, &BasicControlProbe),
            Err(Error::InvalidArgument(ArgumentError::Unbound))
        );
        assert_eq!(eth.bus().transaction_count(), 0);
    }

    #[test]
    fn scan_collects_every_responder() {
        let bus = MockMdioBus::new();
        bus.set_register(0, 0, 0x3100);
        bus.set_register(31, 0, 0x3100);
        let mut eth = test_mediator_with(bus);

        let found = scan_phy_addresses(&mut eth, &ProbeKind::BasicControl).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(PhyAddress::MIN));
        assert!(found.contains(PhyAddress::MAX));
        assert_eq!(eth.bus().get_reads().len(), 32);
    }

    #[test]
    fn empty_scan_is_not_an_error() {
        let mut eth = test_mediator();
        assert!(scan_phy_addresses(&mut eth, &PhyIdProbe).unwrap().is_empty());
    }

    #[test]
    fn probe_kind_dispatch() {
        assert_eq!(ProbeKind::BasicControl.register(), phy_reg::BMCR);
        assert_eq!(ProbeKind::PhyId.register(), phy_reg::PHYIDR1);
        assert!(ProbeKind::BasicControl.is_present(0));
        assert!(!ProbeKind::PhyId.is_present(0));
        assert!(!ProbeKind::PhyId.is_present(0xFFFF));
    }
}
