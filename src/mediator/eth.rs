//! Provided mediator implementation

use super::{Mediator, PhyAddress, RegisterIndex, StackInput, StateListener};
use crate::config::MediatorConfig;
use crate::error::{ArgumentError, Result};
use crate::frame::FramePolicy;
use crate::hal::mdio::MdioBus;
use crate::state::{Lifecycle, Phase, StateEvent};

/// Mediator built from a bus transport, a stack input and a state listener
///
/// - Register access is forwarded to `B` unchanged, one transaction each.
/// - Frames are checked against the configured [`FramePolicy`] before `S`
///   sees them; rejected frames never reach the stack.
/// - Notifications are checked against the [`Lifecycle`] before `L` sees
///   them; a notification counts only once `L` has accepted it.
/// - After `Deinitialized` the mediator is unbound: every operation fails
///   with [`ArgumentError::Unbound`] or the lifecycle error, without touching
///   the bus or the stack.
#[derive(Debug)]
pub struct EthMediator<B: MdioBus, S: StackInput, L: StateListener> {
    bus: B,
    stack: S,
    listener: L,
    policy: FramePolicy,
    lifecycle: Lifecycle,
}

impl<B: MdioBus, S: StackInput, L: StateListener> EthMediator<B, S, L> {
    /// Create a mediator in the fresh phase
    pub fn new(bus: B, stack: S, listener: L, config: MediatorConfig) -> Self {
        Self {
            bus,
            stack,
            listener,
            policy: config.frame_policy(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Frame policy applied to delivered frames
    pub fn frame_policy(&self) -> FramePolicy {
        self.policy
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Borrow the bus transport
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Borrow the stack input
    pub fn stack(&self) -> &S {
        &self.stack
    }

    /// Borrow the state listener
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutably borrow the state listener
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Release the collaborators
    pub fn into_parts(self) -> (B, S, L) {
        (self.bus, self.stack, self.listener)
    }

    fn ensure_bound(&self) -> Result<()> {
        if self.lifecycle.is_bound() {
            Ok(())
        } else {
            Err(ArgumentError::Unbound.into())
        }
    }
}

impl<B: MdioBus, S: StackInput, L: StateListener> Mediator for EthMediator<B, S, L> {
    fn read_phy_register(&mut self, addr: PhyAddress, reg: RegisterIndex) -> Result<u16> {
        self.ensure_bound()?;
        self.bus.read(addr.value(), reg.value())
    }

    fn write_phy_register(
        &mut self,
        addr: PhyAddress,
        reg: RegisterIndex,
        value: u16,
    ) -> Result<()> {
        self.ensure_bound()?;
        self.bus.write(addr.value(), reg.value(), value)
    }

    fn deliver_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_bound()?;
        if let Err(e) = self.policy.check_frame(frame.len()) {
            debug!("dropping frame of {} bytes", frame.len());
            return Err(e);
        }
        self.stack.input(frame)
    }

    fn notify_state(&mut self, event: StateEvent) -> Result<()> {
        let state = event.state();
        if let Err(e) = self.lifecycle.check(state) {
            warn!("rejected {:?} in phase {:?}", state, self.lifecycle.phase());
            return Err(e);
        }

        self.listener.on_state_changed(event)?;
        self.lifecycle.commit(state);
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.lifecycle.is_bound()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
