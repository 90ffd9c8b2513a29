//! Ethernet Mediator
//!
//! The mediator is the only path between a MAC driver, a PHY driver and the
//! network stack. Neither driver names the other's concrete type:
//!
//! ```text
//!   ┌────────────┐  read/write PHY reg   ┌──────────┐   MdioBus   ┌──────┐
//!   │ PHY driver │ ────────────────────► │          │ ──────────► │ MDIO │
//!   └────────────┘  notify_state         │ Mediator │             └──────┘
//!   ┌────────────┐ ────────────────────► │          │  StackInput ┌───────┐
//!   │ MAC driver │  deliver_frame        │          │ ──────────► │ stack │
//!   └────────────┘                       └──────────┘             └───────┘
//!                                              │ StateListener
//!                                              ▼
//!                                        driver owner / EventBridge
//! ```
//!
//! [`Mediator`] is the contract. [`EthMediator`] is the provided
//! implementation: it is built from a bus transport, a stack input and a
//! state listener, and it enforces the frame policy and the notification
//! ordering before any collaborator is reached.
//!
//! # Exclusive Access
//!
//! Every operation takes `&mut self`. Whoever holds the mediator mutably
//! holds the bus and the frame path; sharing across interrupt and task
//! contexts goes through [`SharedMediator`](crate::sync::SharedMediator)
//! (feature `critical-section`) or an equivalent lock owned by the MAC driver.

mod eth;
mod types;

pub use eth::EthMediator;
pub use types::{MacAddress, PhyAddress, PhyAddressSet, RegisterIndex};

use crate::error::Result;
use crate::state::StateEvent;

// =============================================================================
// Mediator Trait
// =============================================================================

/// Capability connecting a MAC driver, a PHY driver and the network stack
///
/// All operations are synchronous and complete in bounded time; bus waits
/// are bounded by the transport and surface as
/// [`TransportError`](crate::TransportError). No operation is idempotent.
///
/// # Example Implementation
///
/// ```ignore
/// struct MyMacMediator<'a> {
///     mac: &'a mut MyMac,
/// }
///
/// impl Mediator for MyMacMediator<'_> {
///     fn read_phy_register(&mut self, addr: PhyAddress, reg: RegisterIndex) -> Result<u16> {
///         self.mac.smi_read(addr.value(), reg.value())
///     }
///     // ... other methods
/// }
/// ```
pub trait Mediator {
    /// Read a PHY register (one bus transaction)
    fn read_phy_register(&mut self, addr: PhyAddress, reg: RegisterIndex) -> Result<u16>;

    /// Write a PHY register (one bus transaction)
    fn write_phy_register(&mut self, addr: PhyAddress, reg: RegisterIndex, value: u16)
    -> Result<()>;

    /// Hand a received frame to the network stack
    ///
    /// The stack borrows `frame` for the duration of the call. Frames outside
    /// the configured size bounds fail with
    /// [`ArgumentError::InvalidFrameLength`](crate::ArgumentError::InvalidFrameLength)
    /// before the stack is reached.
    fn deliver_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Report a state change to the mediator's owner
    fn notify_state(&mut self, event: StateEvent) -> Result<()>;

    /// Whether the mediator is still bound to a live driver
    ///
    /// Unbound mediators must not be used for bus transactions.
    fn is_bound(&self) -> bool {
        true
    }
}

impl<M: Mediator + ?Sized> Mediator for &mut M {
    #[inline]
    fn read_phy_register(&mut self, addr: PhyAddress, reg: RegisterIndex) -> Result<u16> {
        (**self).read_phy_register(addr, reg)
    }

    #[inline]
    fn write_phy_register(
        &mut self,
        addr: PhyAddress,
        reg: RegisterIndex,
        value: u16,
    ) -> Result<()> {
        (**self).write_phy_register(addr, reg, value)
    }

    #[inline]
    fn deliver_frame(&mut self, frame: &[u8]) -> Result<()> {
        (**self).deliver_frame(frame)
    }

    #[inline]
    fn notify_state(&mut self, event: StateEvent) -> Result<()> {
        (**self).notify_state(event)
    }

    #[inline]
    fn is_bound(&self) -> bool {
        (**self).is_bound()
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Network stack frame consumer
pub trait StackInput {
    /// Consume one received frame
    ///
    /// The frame has already been validated against the frame policy.
    fn input(&mut self, frame: &[u8]) -> Result<()>;
}

/// Owner-side handler for state notifications (the MAC driver)
pub trait StateListener {
    /// Process one notification
    ///
    /// Only notifications that passed the ordering checks reach the listener.
    fn on_state_changed(&mut self, event: StateEvent) -> Result<()>;
}

impl<S: StackInput + ?Sized> StackInput for &mut S {
    fn input(&mut self, frame: &[u8]) -> Result<()> {
        (**self).input(frame)
    }
}

impl<L: StateListener + ?Sized> StateListener for &mut L {
    fn on_state_changed(&mut self, event: StateEvent) -> Result<()> {
        (**self).on_state_changed(event)
    }
}
