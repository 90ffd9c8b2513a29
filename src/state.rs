//! Driver state notification protocol
//!
//! MAC and PHY drivers report lifecycle and link-layer changes through
//! [`Mediator::notify_state`](crate::Mediator::notify_state). This module
//! defines what a notification carries and which orderings are legal:
//!
//! 1. [`DriverState::LowLevelInitialized`] is the first notification.
//! 2. Link, speed, duplex and pause notifications recur freely after it.
//! 3. [`DriverState::Deinitialized`] is the last notification.
//!
//! ```text
//!            LowLevelInitialized              Deinitialized
//!   Fresh ─────────────────────────► Active ─────────────────► Deinitialized
//!                                    │    ▲
//!                                    └────┘ Link/Speed/Duplex/Pause
//! ```
//!
//! [`Lifecycle`] enforces this ordering; it does not track link state, which
//! belongs to the listener (see [`EventBridge`](crate::events::EventBridge)).

use crate::config::{Duplex, Speed};
use crate::error::{ArgumentError, Result};

// =============================================================================
// Driver State
// =============================================================================

/// Kind of a state notification, with stable numeric identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriverState {
    /// Low-level init done
    LowLevelInitialized = 0,
    /// Deinit done, hardware released
    Deinitialized = 1,
    /// Link status changed
    LinkChanged = 2,
    /// Speed updated
    SpeedChanged = 3,
    /// Duplex updated
    DuplexChanged = 4,
    /// Pause ability updated
    PauseAbilityChanged = 5,
}

impl DriverState {
    /// Whether this kind may recur between init and deinit
    pub const fn is_level(self) -> bool {
        !matches!(
            self,
            DriverState::LowLevelInitialized | DriverState::Deinitialized
        )
    }
}

/// Physical link status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No link partner
    #[default]
    Down,
    /// Valid link established
    Up,
}

impl LinkState {
    /// Whether the link is up
    pub const fn is_up(self) -> bool {
        matches!(self, LinkState::Up)
    }
}

impl From<bool> for LinkState {
    fn from(up: bool) -> Self {
        if up { LinkState::Up } else { LinkState::Down }
    }
}

// =============================================================================
// State Events
// =============================================================================

/// Untyped auxiliary argument, as carried by a raw notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateArg {
    /// Link status
    Link(LinkState),
    /// Link speed
    Speed(Speed),
    /// Duplex mode
    Duplex(Duplex),
    /// Boolean flag (pause ability)
    Flag(bool),
}

/// A state notification with its typed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateEvent {
    /// Low-level init done
    LowLevelInitialized,
    /// Deinit done
    Deinitialized,
    /// Link went up or down
    LinkChanged(LinkState),
    /// New link speed
    SpeedChanged(Speed),
    /// New duplex mode
    DuplexChanged(Duplex),
    /// Link partner pause ability
    PauseAbilityChanged(bool),
}

impl StateEvent {
    /// Build an event from a kind and an optional raw argument
    ///
    /// Fails with [`ArgumentError::PayloadMismatch`] if the argument is
    /// missing, superfluous or of the wrong type for `state`.
    pub fn from_parts(state: DriverState, arg: Option<StateArg>) -> Result<Self> {
        let event = match (state, arg) {
            (DriverState::LowLevelInitialized, None) => StateEvent::LowLevelInitialized,
            (DriverState::Deinitialized, None) => StateEvent::Deinitialized,
            (DriverState::LinkChanged, Some(StateArg::Link(link))) => StateEvent::LinkChanged(link),
            (DriverState::LinkChanged, Some(StateArg::Flag(up))) => {
                StateEvent::LinkChanged(LinkState::from(up))
            }
            (DriverState::SpeedChanged, Some(StateArg::Speed(speed))) => {
                StateEvent::SpeedChanged(speed)
            }
            (DriverState::DuplexChanged, Some(StateArg::Duplex(duplex))) => {
                StateEvent::DuplexChanged(duplex)
            }
            (DriverState::PauseAbilityChanged, Some(StateArg::Flag(pause))) => {
                StateEvent::PauseAbilityChanged(pause)
            }
            _ => return Err(ArgumentError::PayloadMismatch.into()),
        };
        Ok(event)
    }

    /// Kind of this event
    pub const fn state(&self) -> DriverState {
        match self {
            StateEvent::LowLevelInitialized => DriverState::LowLevelInitialized,
            StateEvent::Deinitialized => DriverState::Deinitialized,
            StateEvent::LinkChanged(_) => DriverState::LinkChanged,
            StateEvent::SpeedChanged(_) => DriverState::SpeedChanged,
            StateEvent::DuplexChanged(_) => DriverState::DuplexChanged,
            StateEvent::PauseAbilityChanged(_) => DriverState::PauseAbilityChanged,
        }
    }

    /// Payload of this event, if any
    pub const fn arg(&self) -> Option<StateArg> {
        match *self {
            StateEvent::LowLevelInitialized | StateEvent::Deinitialized => None,
            StateEvent::LinkChanged(link) => Some(StateArg::Link(link)),
            StateEvent::SpeedChanged(speed) => Some(StateArg::Speed(speed)),
            StateEvent::DuplexChanged(duplex) => Some(StateArg::Duplex(duplex)),
            StateEvent::PauseAbilityChanged(pause) => Some(StateArg::Flag(pause)),
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Lifecycle phase of one mediator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Created, no notification yet
    #[default]
    Fresh,
    /// Between `LowLevelInitialized` and `Deinitialized`
    Active,
    /// `Deinitialized` was notified
    Deinitialized,
}

/// Enforces notification ordering for one mediator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    /// Create a tracker in the [`Phase::Fresh`] phase
    pub const fn new() -> Self {
        Self { phase: Phase::Fresh }
    }

    /// Current phase
    #[inline(always)]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the owning driver still holds its hardware
    #[inline(always)]
    pub const fn is_bound(&self) -> bool {
        !matches!(self.phase, Phase::Deinitialized)
    }

    /// Check that `state` may be notified now, without advancing
    pub const fn check(&self, state: DriverState) -> Result<()> {
        let violation = match (self.phase, state) {
            (Phase::Fresh, DriverState::LowLevelInitialized) => return Ok(()),
            (Phase::Fresh, _) => ArgumentError::NotInitialized,
            (Phase::Active, DriverState::LowLevelInitialized) => ArgumentError::AlreadyInitialized,
            (Phase::Active, _) => return Ok(()),
            (Phase::Deinitialized, _) => ArgumentError::AlreadyDeinitialized,
        };
        Err(crate::Error::InvalidArgument(violation))
    }

    /// Record that `state` was delivered
    ///
    /// Call only after [`check`](Self::check) succeeded and the listener
    /// accepted the notification.
    pub fn commit(&mut self, state: DriverState) {
        match state {
            DriverState::LowLevelInitialized => self.phase = Phase::Active,
            DriverState::Deinitialized => self.phase = Phase::Deinitialized,
            _ => {}
        }
    }

    /// Check and advance in one step
    pub fn advance(&mut self, state: DriverState) -> Result<()> {
        if let Err(e) = self.check(state) {
            warn!("rejected {:?} in phase {:?}", state, self.phase);
            return Err(e);
        }
        self.commit(state);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
