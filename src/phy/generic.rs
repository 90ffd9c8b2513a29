//! Generic PHY Driver
//!
//! This module defines the common interface for Ethernet PHY drivers and a
//! driver for any IEEE 802.3 Clause 22 compliant PHY. All register access
//! goes through a [`Mediator`]; the driver never sees the MAC.

use embedded_hal::delay::DelayNs;

use crate::command::{Command, CommandHandler, Response};
use crate::config::{Duplex, PhyConfig, Speed};
use crate::constants::LINK_POLL_INTERVAL_MS;
use crate::detect::detect_phy_address_with;
use crate::error::{ArgumentError, Result, TransportError};
use crate::mediator::{Mediator, PhyAddress};
use crate::phy::regs::{anar, bmcr, phy_reg};
use crate::state::{LinkState, StateEvent};

// =============================================================================
// Link Status
// =============================================================================

/// Negotiated or configured link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Both ends advertise PAUSE
    pub pause: bool,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex, pause: bool) -> Self {
        Self {
            speed,
            duplex,
            pause,
        }
    }
}

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Trait for Ethernet PHY drivers
///
/// Every method takes the mediator explicitly: the mediator is owned by the
/// MAC driver and only lent to the PHY driver for the duration of a call.
///
/// # Example Implementation
///
/// ```ignore
/// struct MyPhy {
///     addr: PhyAddress,
/// }
///
/// impl PhyDriver for MyPhy {
///     fn address(&self) -> Option<PhyAddress> { Some(self.addr) }
///
///     fn init<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<()> {
///         self.soft_reset(eth)?;
///         self.set_auto_negotiation(eth, true)
///     }
///
///     // ... other methods
/// }
/// ```
pub trait PhyDriver {
    /// PHY address, once known
    fn address(&self) -> Option<PhyAddress>;

    /// Use a fixed PHY address
    fn set_address(&mut self, addr: PhyAddress);

    /// Initialize the PHY
    ///
    /// Detects the address if none is configured, resets the PHY and applies
    /// the configured advertisement.
    fn init<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<()>;

    /// Perform a soft reset
    ///
    /// Writes BMCR.RESET and waits for it to self-clear.
    fn soft_reset<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<()>;

    /// Poll the link and notify the mediator of every change
    ///
    /// Returns the current link state.
    fn poll_link<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<LinkState>;

    /// Enable (and restart) or disable auto-negotiation
    fn set_auto_negotiation<M: Mediator + ?Sized>(&mut self, eth: &mut M, enable: bool)
    -> Result<()>;

    /// Whether auto-negotiation is enabled
    fn auto_negotiation<M: Mediator + ?Sized>(&self, eth: &mut M) -> Result<bool>;

    /// Force the link speed (disables auto-negotiation)
    fn set_speed<M: Mediator + ?Sized>(&mut self, eth: &mut M, speed: Speed) -> Result<()>;

    /// Force the duplex mode (disables auto-negotiation)
    fn set_duplex<M: Mediator + ?Sized>(&mut self, eth: &mut M, duplex: Duplex) -> Result<()>;

    /// Enable or disable PHY loopback
    fn set_loopback<M: Mediator + ?Sized>(&mut self, eth: &mut M, enable: bool) -> Result<()>;

    /// Advertise (or stop advertising) PAUSE ability
    fn advertise_pause<M: Mediator + ?Sized>(&mut self, eth: &mut M, enable: bool) -> Result<()>;

    /// Read the PHY identifier (OUI + model + revision)
    ///
    /// Returns a 32-bit value: `(PHYIDR1 << 16) | PHYIDR2`
    fn phy_id<M: Mediator + ?Sized>(&self, eth: &mut M) -> Result<u32>;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::phy::regs::bmsr;

    /// Read-modify-write BMCR
    pub fn update_bmcr<M: Mediator + ?Sized>(
        eth: &mut M,
        addr: PhyAddress,
        clear: u16,
        set: u16,
    ) -> Result<()> {
        let value = eth.read_phy_register(addr, phy_reg::BMCR)?;
        eth.write_phy_register(addr, phy_reg::BMCR, (value & !clear) | set)
    }

    /// Read BMSR and check link status bit
    pub fn is_link_up<M: Mediator + ?Sized>(eth: &mut M, addr: PhyAddress) -> Result<bool> {
        let bmsr_val = eth.read_phy_register(addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
    }

    /// Perform soft reset via BMCR
    ///
    /// Fails with [`TransportError::Timeout`] if the reset bit is still set
    /// after `max_attempts` reads.
    pub fn soft_reset<M: Mediator + ?Sized>(
        eth: &mut M,
        addr: PhyAddress,
        max_attempts: u32,
    ) -> Result<()> {
        eth.write_phy_register(addr, phy_reg::BMCR, bmcr::RESET)?;

        for _ in 0..max_attempts {
            let bmcr_val = eth.read_phy_register(addr, phy_reg::BMCR)?;
            if (bmcr_val & bmcr::RESET) == 0 {
                return Ok(());
            }
        }

        warn!("PHY {} reset did not complete", addr.value());
        Err(TransportError::Timeout.into())
    }

    /// Enable auto-negotiation and restart
    pub fn enable_auto_negotiation<M: Mediator + ?Sized>(
        eth: &mut M,
        addr: PhyAddress,
    ) -> Result<()> {
        update_bmcr(
            eth,
            addr,
            bmcr::ISOLATE,
            bmcr::AN_ENABLE | bmcr::AN_RESTART,
        )
    }

    /// Read PHY ID from PHYIDR1 and PHYIDR2
    pub fn read_phy_id<M: Mediator + ?Sized>(eth: &mut M, addr: PhyAddress) -> Result<u32> {
        let id1 = eth.read_phy_register(addr, phy_reg::PHYIDR1)? as u32;
        let id2 = eth.read_phy_register(addr, phy_reg::PHYIDR2)? as u32;
        Ok((id1 << 16) | id2)
    }

    /// Resolve the negotiated link from ANAR and ANLPAR
    ///
    /// Picks the highest common ability (100FD, 100HD, 10FD, 10HD). Returns
    /// `None` when the two ends share no ability.
    pub fn resolve_negotiated(local: u16, partner: u16) -> Option<LinkStatus> {
        let common = local & partner;
        let pause = (common & anar::PAUSE) != 0;

        let (speed, duplex) = if common & anar::TX_FD != 0 {
            (Speed::Mbps100, Duplex::Full)
        } else if common & anar::TX_HD != 0 {
            (Speed::Mbps100, Duplex::Half)
        } else if common & anar::T10_FD != 0 {
            (Speed::Mbps10, Duplex::Full)
        } else if common & anar::T10_HD != 0 {
            (Speed::Mbps10, Duplex::Half)
        } else {
            return None;
        };

        Some(LinkStatus::new(speed, duplex, pause))
    }

    /// Get link parameters from BMCR (forced mode)
    pub fn link_status_from_bmcr<M: Mediator + ?Sized>(
        eth: &mut M,
        addr: PhyAddress,
    ) -> Result<LinkStatus> {
        let bmcr_val = eth.read_phy_register(addr, phy_reg::BMCR)?;

        let speed = if (bmcr_val & bmcr::SPEED_100) != 0 {
            Speed::Mbps100
        } else {
            Speed::Mbps10
        };

        let duplex = if (bmcr_val & bmcr::DUPLEX_FULL) != 0 {
            Duplex::Full
        } else {
            Duplex::Half
        };

        Ok(LinkStatus::new(speed, duplex, false))
    }

    /// Current link parameters: negotiated if AN completed, forced otherwise
    pub fn read_link_status<M: Mediator + ?Sized>(
        eth: &mut M,
        addr: PhyAddress,
    ) -> Result<LinkStatus> {
        let bmcr_val = eth.read_phy_register(addr, phy_reg::BMCR)?;
        let bmsr_val = eth.read_phy_register(addr, phy_reg::BMSR)?;

        if (bmcr_val & bmcr::AN_ENABLE) != 0 && (bmsr_val & bmsr::AN_COMPLETE) != 0 {
            let local = eth.read_phy_register(addr, phy_reg::ANAR)?;
            let partner = eth.read_phy_register(addr, phy_reg::ANLPAR)?;
            if let Some(status) = resolve_negotiated(local, partner) {
                return Ok(status);
            }
        }

        link_status_from_bmcr(eth, addr)
    }
}

// =============================================================================
// Generic PHY
// =============================================================================

/// Driver for any Clause 22 compliant PHY
#[derive(Debug, Clone)]
pub struct GenericPhy {
    config: PhyConfig,
    addr: Option<PhyAddress>,
    link: LinkState,
    reported: Option<LinkStatus>,
}

impl GenericPhy {
    /// Create a driver from its configuration
    pub const fn new(config: PhyConfig) -> Self {
        Self {
            addr: config.address,
            config,
            link: LinkState::Down,
            reported: None,
        }
    }

    /// Configuration in use
    pub const fn config(&self) -> &PhyConfig {
        &self.config
    }

    /// Last link state seen by [`poll_link`](PhyDriver::poll_link)
    pub const fn link_state(&self) -> LinkState {
        self.link
    }

    /// Lend the mediator to the driver so it can execute PHY commands
    pub fn with_mediator<'a, M: Mediator + ?Sized>(
        &'a mut self,
        eth: &'a mut M,
    ) -> BoundPhy<'a, Self, M> {
        BoundPhy { phy: self, eth }
    }

    fn require_address(&self) -> Result<PhyAddress> {
        self.addr.ok_or(ArgumentError::NotInitialized.into())
    }

    // Forced settings invalidate the link; the next poll re-reports it.
    fn forget_link(&mut self) {
        self.link = LinkState::Down;
        self.reported = None;
    }
}

impl PhyDriver for GenericPhy {
    fn address(&self) -> Option<PhyAddress> {
        self.addr
    }

    fn set_address(&mut self, addr: PhyAddress) {
        self.addr = Some(addr);
    }

    fn init<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<()> {
        let addr = match self.addr {
            Some(addr) => addr,
            None => {
                let addr = detect_phy_address_with(eth, &self.config.probe)?;
                self.addr = Some(addr);
                addr
            }
        };

        self.soft_reset(eth)?;
        self.forget_link();

        if self.config.advertise_pause {
            self.advertise_pause(eth, true)?;
        }
        // Reset restores the PHY default, which is usually auto-negotiation on
        if self.config.auto_negotiation {
            ieee802_3::enable_auto_negotiation(eth, addr)?;
        } else {
            ieee802_3::update_bmcr(eth, addr, bmcr::AN_ENABLE, 0)?;
        }

        info!("PHY {} initialized", addr.value());
        Ok(())
    }

    fn soft_reset<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<()> {
        let addr = self.require_address()?;
        ieee802_3::soft_reset(eth, addr, self.config.reset_attempts)
    }

    fn poll_link<M: Mediator + ?Sized>(&mut self, eth: &mut M) -> Result<LinkState> {
        let addr = self.require_address()?;
        let link = LinkState::from(ieee802_3::is_link_up(eth, addr)?);

        if link == self.link {
            return Ok(link);
        }

        if link.is_up() {
            let status = ieee802_3::read_link_status(eth, addr)?;
            let previous = self.reported;

            if previous.map(|p| p.speed) != Some(status.speed) {
                eth.notify_state(StateEvent::SpeedChanged(status.speed))?;
            }
            if previous.map(|p| p.duplex) != Some(status.duplex) {
                eth.notify_state(StateEvent::DuplexChanged(status.duplex))?;
            }
            if previous.map(|p| p.pause) != Some(status.pause) {
                eth.notify_state(StateEvent::PauseAbilityChanged(status.pause))?;
            }
            self.reported = Some(status);
        }

        eth.notify_state(StateEvent::LinkChanged(link))?;
        self.link = link;
        debug!("PHY {} link {:?}", addr.value(), link);

        Ok(link)
    }

    fn set_auto_negotiation<M: Mediator + ?Sized>(
        &mut self,
        eth: &mut M,
        enable: bool,
    ) -> Result<()> {
        let addr = self.require_address()?;
        if enable {
            ieee802_3::enable_auto_negotiation(eth, addr)?;
        } else {
            ieee802_3::update_bmcr(eth, addr, bmcr::AN_ENABLE, 0)?;
        }
        self.config.auto_negotiation = enable;
        Ok(())
    }

    fn auto_negotiation<M: Mediator + ?Sized>(&self, eth: &mut M) -> Result<bool> {
        let addr = self.require_address()?;
        let value = eth.read_phy_register(addr, phy_reg::BMCR)?;
        Ok((value & bmcr::AN_ENABLE) != 0)
    }

    fn set_speed<M: Mediator + ?Sized>(&mut self, eth: &mut M, speed: Speed) -> Result<()> {
        let addr = self.require_address()?;
        let set = match speed {
            Speed::Mbps100 => bmcr::SPEED_100,
            Speed::Mbps10 => 0,
        };
        ieee802_3::update_bmcr(eth, addr, bmcr::AN_ENABLE | bmcr::SPEED_100, set)?;
        self.config.auto_negotiation = false;
        self.forget_link();
        Ok(())
    }

    fn set_duplex<M: Mediator + ?Sized>(&mut self, eth: &mut M, duplex: Duplex) -> Result<()> {
        let addr = self.require_address()?;
        let set = match duplex {
            Duplex::Full => bmcr::DUPLEX_FULL,
            Duplex::Half => 0,
        };
        ieee802_3::update_bmcr(eth, addr, bmcr::AN_ENABLE | bmcr::DUPLEX_FULL, set)?;
        self.config.auto_negotiation = false;
        self.forget_link();
        Ok(())
    }

    fn set_loopback<M: Mediator + ?Sized>(&mut self, eth: &mut M, enable: bool) -> Result<()> {
        let addr = self.require_address()?;
        let (clear, set) = if enable {
            (0, bmcr::LOOPBACK)
        } else {
            (bmcr::LOOPBACK, 0)
        };
        ieee802_3::update_bmcr(eth, addr, clear, set)
    }

    fn advertise_pause<M: Mediator + ?Sized>(&mut self, eth: &mut M, enable: bool) -> Result<()> {
        let addr = self.require_address()?;
        let value = eth.read_phy_register(addr, phy_reg::ANAR)?;
        let value = if enable {
            value | anar::PAUSE
        } else {
            value & !anar::PAUSE
        };
        eth.write_phy_register(addr, phy_reg::ANAR, value)?;
        self.config.advertise_pause = enable;

        // New advertisement only takes effect on renegotiation
        if self.config.auto_negotiation {
            ieee802_3::enable_auto_negotiation(eth, addr)?;
        }
        Ok(())
    }

    fn phy_id<M: Mediator + ?Sized>(&self, eth: &mut M) -> Result<u32> {
        let addr = self.require_address()?;
        ieee802_3::read_phy_id(eth, addr)
    }
}

/// Poll until the link comes up or `timeout_ms` elapses
///
/// Every poll notifies changes through the mediator exactly like a direct
/// [`poll_link`](PhyDriver::poll_link) call. Fails with
/// [`TransportError::Timeout`] if the link stays down.
pub fn wait_for_link<P, M, D>(
    phy: &mut P,
    eth: &mut M,
    delay: &mut D,
    timeout_ms: u32,
) -> Result<LinkStatus>
where
    P: PhyDriver + ?Sized,
    M: Mediator + ?Sized,
    D: DelayNs,
{
    let addr = phy.address().ok_or(ArgumentError::NotInitialized)?;
    let mut elapsed = 0u32;
    loop {
        if phy.poll_link(eth)?.is_up() {
            return ieee802_3::read_link_status(eth, addr);
        }
        if elapsed >= timeout_ms {
            return Err(TransportError::Timeout.into());
        }
        delay.delay_ms(LINK_POLL_INTERVAL_MS);
        elapsed = elapsed.saturating_add(LINK_POLL_INTERVAL_MS);
    }
}

// =============================================================================
// Command Handling
// =============================================================================

/// A PHY driver together with a borrowed mediator
///
/// Implements [`CommandHandler`] for the PHY-owned commands.
#[derive(Debug)]
pub struct BoundPhy<'a, P: PhyDriver, M: Mediator + ?Sized> {
    phy: &'a mut P,
    eth: &'a mut M,
}

impl<P: PhyDriver, M: Mediator + ?Sized> CommandHandler for BoundPhy<'_, P, M> {
    fn handle(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::GetPhyAddress => self
                .phy
                .address()
                .map(Response::PhyAddress)
                .ok_or(ArgumentError::NotInitialized.into()),
            Command::SetPhyAddress(addr) => {
                self.phy.set_address(addr);
                Ok(Response::Done)
            }
            Command::GetAutoNegotiation => {
                self.phy.auto_negotiation(&mut *self.eth).map(Response::AutoNegotiation)
            }
            Command::SetAutoNegotiation(enable) => {
                self.phy.set_auto_negotiation(&mut *self.eth, enable)?;
                Ok(Response::Done)
            }
            Command::SetSpeed(speed) => {
                self.phy.set_speed(&mut *self.eth, speed)?;
                Ok(Response::Done)
            }
            Command::SetDuplex(duplex) => {
                self.phy.set_duplex(&mut *self.eth, duplex)?;
                Ok(Response::Done)
            }
            Command::SetPhyLoopback(enable) => {
                self.phy.set_loopback(&mut *self.eth, enable)?;
                Ok(Response::Done)
            }
            Command::SetFlowControl(enable) => {
                self.phy.advertise_pause(&mut *self.eth, enable)?;
                Ok(Response::Done)
            }
            Command::GetMacAddress
            | Command::SetMacAddress(_)
            | Command::GetSpeed
            | Command::SetPromiscuous(_)
            | Command::GetDuplex => Err(ArgumentError::UnknownCommand.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
