//! Driver events for the application
//!
//! State notifications are low level: they report every speed, duplex and
//! link change as the PHY driver sees it. Applications usually want four
//! coarse events instead: the driver started, stopped, got a link or lost
//! it. [`EventBridge`] is a [`StateListener`] that folds notifications into
//! a cached [`LinkInfo`] and posts [`EthEvent`]s to an [`EventSink`] on
//! transitions only.

use crate::config::{Duplex, Speed};
use crate::error::Result;
use crate::mediator::StateListener;
use crate::state::{LinkState, StateEvent};

// =============================================================================
// Events
// =============================================================================

/// Application-level driver event, with stable numeric identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EthEvent {
    /// Driver started
    Start = 0,
    /// Driver stopped
    Stop = 1,
    /// Link came up
    Connected = 2,
    /// Link went down
    Disconnected = 3,
}

/// Destination for [`EthEvent`]s (an event loop, a channel, a flag set)
pub trait EventSink {
    /// Post one event
    fn post(&mut self, event: EthEvent) -> Result<()>;
}

impl<E: EventSink + ?Sized> EventSink for &mut E {
    fn post(&mut self, event: EthEvent) -> Result<()> {
        (**self).post(event)
    }
}

// =============================================================================
// Link Info
// =============================================================================

/// Last reported link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkInfo {
    /// Link status
    pub link: LinkState,
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Link partner pause ability
    pub pause: bool,
}

impl LinkInfo {
    /// Link down, 100 Mbps full duplex, no pause
    pub const fn new() -> Self {
        Self {
            link: LinkState::Down,
            speed: Speed::Mbps100,
            duplex: Duplex::Full,
            pause: false,
        }
    }

    /// Fold one notification into the cached parameters
    ///
    /// Returns the previous link state when `event` changes it.
    /// Deinitialized drops a link that is still up.
    pub fn apply(&mut self, event: StateEvent) -> Option<LinkState> {
        match event {
            StateEvent::LinkChanged(link) if link != self.link => {
                let previous = self.link;
                self.link = link;
                return Some(previous);
            }
            StateEvent::Deinitialized if self.link.is_up() => {
                self.link = LinkState::Down;
                return Some(LinkState::Up);
            }
            StateEvent::SpeedChanged(speed) => self.speed = speed,
            StateEvent::DuplexChanged(duplex) => self.duplex = duplex,
            StateEvent::PauseAbilityChanged(pause) => self.pause = pause,
            StateEvent::LowLevelInitialized
            | StateEvent::Deinitialized
            | StateEvent::LinkChanged(_) => {}
        }
        None
    }
}

// =============================================================================
// Event Bridge
// =============================================================================

/// State listener translating notifications into [`EthEvent`]s
#[derive(Debug)]
pub struct EventBridge<E: EventSink> {
    sink: E,
    link: LinkInfo,
}

impl<E: EventSink> EventBridge<E> {
    /// Create a bridge posting to `sink`
    pub fn new(sink: E) -> Self {
        Self {
            sink,
            link: LinkInfo::new(),
        }
    }

    /// Post [`EthEvent::Start`]
    pub fn start(&mut self) -> Result<()> {
        self.sink.post(EthEvent::Start)
    }

    /// Post [`EthEvent::Stop`], preceded by a disconnect if the link was up
    ///
    /// The cached link only drops once the disconnect was posted, so a
    /// failed call can be repeated.
    pub fn stop(&mut self) -> Result<()> {
        if self.link.link.is_up() {
            self.sink.post(EthEvent::Disconnected)?;
            self.link.link = LinkState::Down;
        }
        self.sink.post(EthEvent::Stop)
    }

    /// Last reported link parameters
    pub fn link_info(&self) -> LinkInfo {
        self.link
    }

    /// Borrow the sink
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Release the sink
    pub fn into_inner(self) -> E {
        self.sink
    }
}

impl<E: EventSink> StateListener for EventBridge<E> {
    fn on_state_changed(&mut self, event: StateEvent) -> Result<()> {
        if matches!(event, StateEvent::LowLevelInitialized) {
            self.link = LinkInfo::new();
            return Ok(());
        }

        // Commit to the cache only after the sink took the event
        let mut next = self.link;
        match next.apply(event) {
            Some(LinkState::Down) => {
                info!(
                    "link up: {:?} {:?} pause={}",
                    next.speed, next.duplex, next.pause
                );
                self.sink.post(EthEvent::Connected)?;
            }
            Some(LinkState::Up) => {
                info!("link down");
                self.sink.post(EthEvent::Disconnected)?;
            }
            None => {}
        }
        self.link = next;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
