//! MDIO (Management Data Input/Output) transport
//!
//! [`MdioBus`] is the raw register transport the mediator forwards PHY
//! register access to. [`PolledMdio`] wraps any transport with a bounded
//! busy-wait, so a stuck bus surfaces as [`TransportError::Timeout`] instead
//! of blocking forever.

use embedded_hal::delay::DelayNs;

use crate::constants::{MAX_PHY_ADDR, MAX_REG_ADDR, MDIO_POLL_INTERVAL_US, MDIO_TIMEOUT_US};
use crate::error::{ArgumentError, Result, TransportError};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends (a MAC's SMI block,
/// a bit-banged GPIO pair, a test double). Implementations report their own
/// failures as [`TransportError`] values.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if the MDIO bus is busy
    fn is_busy(&self) -> bool;
}

impl<B: MdioBus + ?Sized> MdioBus for &mut B {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
}

/// Wait for the bus to go idle, polling every [`MDIO_POLL_INTERVAL_US`]
///
/// Returns [`TransportError::Timeout`] once `timeout_us` has elapsed with the
/// bus still busy.
pub fn wait_idle<B: MdioBus + ?Sized, D: DelayNs>(
    bus: &B,
    delay: &mut D,
    timeout_us: u32,
) -> Result<()> {
    let mut elapsed = 0u32;
    while bus.is_busy() {
        if elapsed >= timeout_us {
            return Err(TransportError::Timeout.into());
        }
        delay.delay_us(MDIO_POLL_INTERVAL_US);
        elapsed = elapsed.saturating_add(MDIO_POLL_INTERVAL_US);
    }
    Ok(())
}

// =============================================================================
// Polled MDIO
// =============================================================================

/// MDIO transport with bounded busy-waits around every transaction
#[derive(Debug)]
pub struct PolledMdio<B: MdioBus, D: DelayNs> {
    /// Raw transport
    bus: B,
    /// Delay provider for timeout handling
    delay: D,
    /// Operation timeout in microseconds
    timeout_us: u32,
}

impl<B: MdioBus, D: DelayNs> PolledMdio<B, D> {
    /// Wrap a transport with the default timeout
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            timeout_us: MDIO_TIMEOUT_US,
        }
    }

    /// Set the operation timeout
    pub fn set_timeout_us(&mut self, timeout_us: u32) {
        self.timeout_us = timeout_us;
    }

    /// Operation timeout in microseconds
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// Borrow the raw transport
    pub fn inner(&self) -> &B {
        &self.bus
    }

    /// Release the raw transport and the delay provider
    pub fn into_inner(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn check_addresses(phy_addr: u8, reg_addr: u8) -> Result<()> {
        if phy_addr > MAX_PHY_ADDR {
            return Err(ArgumentError::InvalidPhyAddress.into());
        }
        if reg_addr > MAX_REG_ADDR {
            return Err(ArgumentError::InvalidRegister.into());
        }
        Ok(())
    }
}

impl<B: MdioBus, D: DelayNs> MdioBus for PolledMdio<B, D> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        Self::check_addresses(phy_addr, reg_addr)?;

        // Wait for any pending operation
        wait_idle(&self.bus, &mut self.delay, self.timeout_us)?;
        let value = self.bus.read(phy_addr, reg_addr)?;
        wait_idle(&self.bus, &mut self.delay, self.timeout_us)?;

        Ok(value)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        Self::check_addresses(phy_addr, reg_addr)?;

        wait_idle(&self.bus, &mut self.delay, self.timeout_us)?;
        self.bus.write(phy_addr, reg_addr, value)?;
        wait_idle(&self.bus, &mut self.delay, self.timeout_us)
    }

    fn is_busy(&self) -> bool {
        self.bus.is_busy()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::testing::{MockDelay, MockMdioBus};

    #[test]
    fn wait_idle_returns_immediately_when_idle() {
        let bus = MockMdioBus::new();
        let mut delay = MockDelay::new();

        wait_idle(&bus, &mut delay, 100).unwrap();
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn wait_idle_times_out_on_stuck_bus() {
        let bus = MockMdioBus::new();
        bus.set_busy(true);
        let mut delay = MockDelay::new();

        assert_eq!(
            wait_idle(&bus, &mut delay, 100),
            Err(Error::Transport(TransportError::Timeout))
        );
        assert_eq!(delay.total_us(), 100);
    }

    #[test]
    fn polled_read_forwards_to_bus() {
        let bus = MockMdioBus::new();
        bus.set_register(3, 2, 0x0007);
        let mut mdio = PolledMdio::new(bus, MockDelay::new());

        assert_eq!(mdio.read(3, 2), Ok(0x0007));
        mdio.write(3, 4, 0x01E1).unwrap();
        assert_eq!(mdio.inner().get_register(3, 4), Some(0x01E1));
    }

    #[test]
    fn polled_rejects_out_of_range_addresses() {
        let bus = MockMdioBus::new();
        let mut mdio = PolledMdio::new(bus, MockDelay::new());

        assert_eq!(
            mdio.read(32, 0),
            Err(Error::InvalidArgument(ArgumentError::InvalidPhyAddress))
        );
        assert_eq!(
            mdio.write(0, 32, 0),
            Err(Error::InvalidArgument(ArgumentError::InvalidRegister))
        );
        assert_eq!(mdio.inner().transaction_count(), 0);
    }

    #[test]
    fn polled_busy_bus_is_not_touched() {
        let bus = MockMdioBus::new();
        bus.set_busy(true);
        let mut mdio = PolledMdio::new(bus, MockDelay::new());
        mdio.set_timeout_us(50);

        assert_eq!(mdio.read(0, 0), Err(Error::Transport(TransportError::Timeout)));
        assert_eq!(mdio.inner().transaction_count(), 0);
        assert_eq!(mdio.inner().collisions(), 0);
    }

    #[test]
    fn unserialized_access_is_detected() {
        let mut bus = MockMdioBus::new();
        bus.set_busy(true);

        // Raw access ignores the in-flight transaction
        bus.read(0, 0).unwrap();
        assert_eq!(bus.collisions(), 1);
    }
}
