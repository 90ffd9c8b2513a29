//! Testing utilities and mock implementations
//!
//! Mock collaborators for exercising the mediator, the detection scan and
//! the PHY driver on the host without hardware.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::vec::Vec;

use crate::command::{Command, CommandHandler, Response};
use crate::config::MediatorConfig;
use crate::error::{Error, Result, TransportError};
use crate::events::{EthEvent, EventSink};
use crate::hal::mdio::MdioBus;
use crate::mediator::{EthMediator, StackInput, StateListener};
use crate::phy::regs::{anar, bmcr, bmsr, phy_reg};
use crate::state::StateEvent;

/// Value read back from an address with nothing attached
const PULLED_UP: u16 = 0xFFFF;

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing without hardware
///
/// Unset registers read as `0xFFFF`, like an empty bus with its pull-up.
/// Addresses set up with [`setup_generic_phy`](Self::setup_generic_phy)
/// also self-clear BMCR's restart bit on write, and a BMCR reset restores
/// the power-on value (auto-negotiation enabled).
///
/// # Example
///
/// ```ignore
/// let bus = MockMdioBus::new();
/// bus.setup_generic_phy(1);
/// bus.simulate_link_up_100_fd(1);
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of reads: (phy_addr, reg_addr)
    read_log: RefCell<Vec<(u8, u8)>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Injected transaction failures
    failures: RefCell<HashMap<(u8, u8), TransportError>>,
    /// Bits that never clear: (phy_addr, reg_addr) -> mask
    sticky: RefCell<HashMap<(u8, u8), u16>>,
    /// Addresses emulating a PHY
    phys: RefCell<HashSet<u8>>,
    /// Whether the bus should report as busy
    busy: Cell<bool>,
    /// Transactions issued while the bus was busy
    collisions: Cell<usize>,
}

impl MockMdioBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&(phy_addr, reg_addr)).copied()
    }

    pub fn get_reads(&self) -> Vec<(u8, u8)> {
        self.read_log.borrow().clone()
    }

    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Reads plus writes issued so far, failed ones included
    pub fn transaction_count(&self) -> usize {
        self.read_log.borrow().len() + self.write_log.borrow().len()
    }

    /// Make every transaction on one register fail
    pub fn fail_on(&self, phy_addr: u8, reg_addr: u8, error: TransportError) {
        self.failures
            .borrow_mut()
            .insert((phy_addr, reg_addr), error);
    }

    /// Keep `bits` set on every read of one register
    pub fn stick_bits(&self, phy_addr: u8, reg_addr: u8, bits: u16) {
        self.sticky.borrow_mut().insert((phy_addr, reg_addr), bits);
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    /// Transactions issued while another one was still in flight
    pub fn collisions(&self) -> usize {
        self.collisions.get()
    }

    fn record_access(&self) {
        if self.busy.get() {
            self.collisions.set(self.collisions.get() + 1);
        }
    }

    /// Emulate a 10/100 PHY with auto-negotiation, link down
    pub fn setup_generic_phy(&self, phy_addr: u8) {
        self.phys.borrow_mut().insert(phy_addr);

        self.set_register(phy_addr, phy_reg::PHYIDR1.value(), 0x0007);
        self.set_register(phy_addr, phy_reg::PHYIDR2.value(), 0xC0F1);

        let bmsr_value = bmsr::TX_FD_CAPABLE
            | bmsr::TX_HD_CAPABLE
            | bmsr::T10_FD_CAPABLE
            | bmsr::T10_HD_CAPABLE
            | bmsr::AN_ABILITY
            | bmsr::EXT_CAPABLE;
        self.set_register(phy_addr, phy_reg::BMSR.value(), bmsr_value);
        self.set_register(phy_addr, phy_reg::BMCR.value(), bmcr::AN_ENABLE);
        self.set_register(
            phy_addr,
            phy_reg::ANAR.value(),
            anar::ALL_10_100 | anar::SELECTOR_IEEE802_3,
        );
        self.set_register(phy_addr, phy_reg::ANLPAR.value(), 0x0000);
    }

    /// Simulate link coming up with 100 Mbps Full Duplex
    pub fn simulate_link_up_100_fd(&self, phy_addr: u8) {
        self.set_link_bits(phy_addr, true);
        self.set_register(
            phy_addr,
            phy_reg::ANLPAR.value(),
            anar::SELECTOR_IEEE802_3 | anar::ALL_10_100,
        );
    }

    /// Simulate link coming up with 10 Mbps Half Duplex
    pub fn simulate_link_up_10_hd(&self, phy_addr: u8) {
        self.set_link_bits(phy_addr, true);
        self.set_register(
            phy_addr,
            phy_reg::ANLPAR.value(),
            anar::SELECTOR_IEEE802_3 | anar::T10_HD,
        );
    }

    /// Simulate link going down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        self.set_link_bits(phy_addr, false);
        self.set_register(phy_addr, phy_reg::ANLPAR.value(), 0x0000);
    }

    fn set_link_bits(&self, phy_addr: u8, up: bool) {
        let reg = phy_reg::BMSR.value();
        let mut value = self.get_register(phy_addr, reg).unwrap_or(0);
        if up {
            value |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        } else {
            value &= !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        }
        self.set_register(phy_addr, reg, value);
    }

    fn injected_failure(&self, phy_addr: u8, reg_addr: u8) -> Result<()> {
        match self.failures.borrow().get(&(phy_addr, reg_addr)) {
            Some(error) => Err(Error::Transport(*error)),
            None => Ok(()),
        }
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.read_log.borrow_mut().push((phy_addr, reg_addr));
        self.record_access();
        self.injected_failure(phy_addr, reg_addr)?;

        let value = self
            .get_register(phy_addr, reg_addr)
            .unwrap_or(PULLED_UP);
        let sticky = self
            .sticky
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0);
        Ok(value | sticky)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));
        self.record_access();
        self.injected_failure(phy_addr, reg_addr)?;

        let mut stored = value;
        if reg_addr == phy_reg::BMCR.value() && self.phys.borrow().contains(&phy_addr) {
            stored = if value & bmcr::RESET != 0 {
                bmcr::AN_ENABLE
            } else {
                value & !bmcr::AN_RESTART
            };
        }
        self.set_register(phy_addr, reg_addr, stored);
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

// =============================================================================
// Mock Collaborators
// =============================================================================

/// Stack input recording every frame it accepts
#[derive(Debug, Default)]
pub struct MockStack {
    frames: RefCell<Vec<Vec<u8>>>,
    reject: Cell<bool>,
}

impl MockStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.borrow().clone()
    }

    /// Refuse the next frame
    pub fn reject_next(&self) {
        self.reject.set(true);
    }
}

impl StackInput for MockStack {
    fn input(&mut self, frame: &[u8]) -> Result<()> {
        if self.reject.take() {
            return Err(TransportError::StackRejected.into());
        }
        self.frames.borrow_mut().push(frame.to_vec());
        Ok(())
    }
}

/// State listener recording every notification it accepts
#[derive(Debug, Default)]
pub struct MockListener {
    events: RefCell<Vec<StateEvent>>,
    fail: Cell<bool>,
}

impl MockListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StateEvent> {
        self.events.borrow().clone()
    }

    /// Fail the next notification
    pub fn fail_next(&self) {
        self.fail.set(true);
    }
}

impl StateListener for MockListener {
    fn on_state_changed(&mut self, event: StateEvent) -> Result<()> {
        if self.fail.take() {
            return Err(TransportError::ListenerFailed.into());
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

/// Event sink recording every posted event
#[derive(Debug, Default)]
pub struct MockEventSink {
    events: RefCell<Vec<EthEvent>>,
    fail: Cell<bool>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EthEvent> {
        self.events.borrow().clone()
    }

    pub fn fail_next(&self) {
        self.fail.set(true);
    }
}

impl EventSink for MockEventSink {
    fn post(&mut self, event: EthEvent) -> Result<()> {
        if self.fail.take() {
            return Err(TransportError::ListenerFailed.into());
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

/// Command handler recording every command and answering with a fixed response
#[derive(Debug)]
pub struct MockCommandHandler {
    handled: Vec<Command>,
    response: Response,
    failure: Option<Error>,
}

impl Default for MockCommandHandler {
    fn default() -> Self {
        Self {
            handled: Vec::new(),
            response: Response::Done,
            failure: None,
        }
    }
}

impl MockCommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handled(&self) -> Vec<Command> {
        self.handled.clone()
    }

    pub fn respond_with(&mut self, response: Response) {
        self.response = response;
    }

    pub fn fail_with(&mut self, error: Error) {
        self.failure = Some(error);
    }
}

impl CommandHandler for MockCommandHandler {
    fn handle(&mut self, command: Command) -> Result<Response> {
        self.handled.push(command);
        match self.failure {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}

// =============================================================================
// Mediator Fixtures
// =============================================================================

pub type TestMediator = EthMediator<MockMdioBus, MockStack, MockListener>;

/// Mediator on an empty bus, standard frames
pub fn test_mediator() -> TestMediator {
    test_mediator_with(MockMdioBus::new())
}

/// Mediator on the given bus, standard frames
pub fn test_mediator_with(bus: MockMdioBus) -> TestMediator {
    EthMediator::new(bus, MockStack::new(), MockListener::new(), MediatorConfig::new())
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: Cell<u64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_registers_read_pulled_up() {
        let mut bus = MockMdioBus::new();
        assert_eq!(bus.read(7, 1), Ok(0xFFFF));
        assert_eq!(bus.get_reads(), [(7, 1)]);
    }

    #[test]
    fn emulated_phy_self_clears_reset() {
        let mut bus = MockMdioBus::new();
        bus.setup_generic_phy(0);

        bus.write(0, 0, bmcr::RESET | bmcr::LOOPBACK).unwrap();
        assert_eq!(bus.read(0, 0), Ok(bmcr::AN_ENABLE));
        assert_eq!(bus.get_writes(), [(0, 0, bmcr::RESET | bmcr::LOOPBACK)]);
    }

    #[test]
    fn injected_failure_is_logged() {
        let mut bus = MockMdioBus::new();
        bus.fail_on(1, 1, TransportError::BusFault);

        assert_eq!(bus.read(1, 1), Err(Error::Transport(TransportError::BusFault)));
        assert_eq!(bus.transaction_count(), 1);
    }
}
