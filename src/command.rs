//! Driver control commands
//!
//! The thirteen configuration commands a driver owner can issue, with
//! stable numeric tags and typed payloads. [`dispatch`] routes a command to
//! the driver that owns the setting:
//!
//! | Command | Handled by |
//! |---------|------------|
//! | `GetMacAddress`, `SetMacAddress`, `SetPromiscuous` | MAC |
//! | `GetPhyAddress`, `SetPhyAddress`, `GetAutoNegotiation`, `SetAutoNegotiation`, `SetSpeed`, `SetDuplex`, `SetPhyLoopback` | PHY |
//! | `SetFlowControl` | MAC, then PHY (pause advertisement) |
//! | `GetSpeed`, `GetDuplex` | cached [`LinkInfo`] |

use crate::config::{Duplex, Speed};
use crate::error::{ArgumentError, Result};
use crate::events::LinkInfo;
use crate::mediator::{MacAddress, PhyAddress};

// =============================================================================
// Command Tags
// =============================================================================

/// Command identifier with a stable numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum CommandTag {
    /// Get MAC address
    GetMacAddress = 0,
    /// Set MAC address
    SetMacAddress = 1,
    /// Get PHY address
    GetPhyAddress = 2,
    /// Set PHY address
    SetPhyAddress = 3,
    /// Get auto-negotiation status
    GetAutoNegotiation = 4,
    /// Enable or disable auto-negotiation
    SetAutoNegotiation = 5,
    /// Get link speed
    GetSpeed = 6,
    /// Force link speed
    SetSpeed = 7,
    /// Enable or disable promiscuous mode
    SetPromiscuous = 8,
    /// Enable or disable flow control
    SetFlowControl = 9,
    /// Get duplex mode
    GetDuplex = 10,
    /// Force duplex mode
    SetDuplex = 11,
    /// Enable or disable PHY loopback
    SetPhyLoopback = 12,
}

impl CommandTag {
    /// All tags in numeric order
    pub const ALL: [CommandTag; 13] = [
        CommandTag::GetMacAddress,
        CommandTag::SetMacAddress,
        CommandTag::GetPhyAddress,
        CommandTag::SetPhyAddress,
        CommandTag::GetAutoNegotiation,
        CommandTag::SetAutoNegotiation,
        CommandTag::GetSpeed,
        CommandTag::SetSpeed,
        CommandTag::SetPromiscuous,
        CommandTag::SetFlowControl,
        CommandTag::GetDuplex,
        CommandTag::SetDuplex,
        CommandTag::SetPhyLoopback,
    ];

    /// Which driver owns this setting
    pub const fn target(self) -> CommandTarget {
        match self {
            CommandTag::GetMacAddress | CommandTag::SetMacAddress | CommandTag::SetPromiscuous => {
                CommandTarget::Mac
            }
            CommandTag::SetFlowControl => CommandTarget::MacAndPhy,
            CommandTag::GetSpeed | CommandTag::GetDuplex => CommandTarget::LinkInfo,
            CommandTag::GetPhyAddress
            | CommandTag::SetPhyAddress
            | CommandTag::GetAutoNegotiation
            | CommandTag::SetAutoNegotiation
            | CommandTag::SetSpeed
            | CommandTag::SetDuplex
            | CommandTag::SetPhyLoopback => CommandTarget::Phy,
        }
    }
}

impl TryFrom<u32> for CommandTag {
    type Error = crate::Error;

    fn try_from(raw: u32) -> Result<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|index| CommandTag::ALL.get(index).copied())
            .ok_or_else(|| ArgumentError::UnknownCommand.into())
    }
}

impl From<CommandTag> for u32 {
    fn from(tag: CommandTag) -> Self {
        tag as u32
    }
}

/// Driver that handles a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandTarget {
    /// MAC driver
    Mac,
    /// PHY driver
    Phy,
    /// MAC driver first, then PHY driver
    MacAndPhy,
    /// Answered from cached link parameters
    LinkInfo,
}

// =============================================================================
// Commands
// =============================================================================

/// Untyped command payload, as carried by a raw request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandPayload {
    /// No payload (getters)
    None,
    /// MAC address
    MacAddress(MacAddress),
    /// PHY address
    PhyAddress(PhyAddress),
    /// Boolean flag
    Flag(bool),
    /// Link speed
    Speed(Speed),
    /// Duplex mode
    Duplex(Duplex),
}

/// A control command with its typed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Get MAC address
    GetMacAddress,
    /// Set MAC address
    SetMacAddress(MacAddress),
    /// Get PHY address
    GetPhyAddress,
    /// Set PHY address
    SetPhyAddress(PhyAddress),
    /// Get auto-negotiation status
    GetAutoNegotiation,
    /// Enable or disable auto-negotiation
    SetAutoNegotiation(bool),
    /// Get link speed
    GetSpeed,
    /// Force link speed
    SetSpeed(Speed),
    /// Enable or disable promiscuous mode
    SetPromiscuous(bool),
    /// Enable or disable flow control
    SetFlowControl(bool),
    /// Get duplex mode
    GetDuplex,
    /// Force duplex mode
    SetDuplex(Duplex),
    /// Enable or disable PHY loopback
    SetPhyLoopback(bool),
}

impl Command {
    /// Decode a raw tag and payload
    ///
    /// Fails with [`ArgumentError::UnknownCommand`] for an undefined tag and
    /// [`ArgumentError::PayloadMismatch`] when the payload does not fit it.
    pub fn from_raw(tag: u32, payload: CommandPayload) -> Result<Self> {
        let tag = CommandTag::try_from(tag)?;
        let command = match (tag, payload) {
            (CommandTag::GetMacAddress, CommandPayload::None) => Command::GetMacAddress,
            (CommandTag::SetMacAddress, CommandPayload::MacAddress(mac)) => {
                Command::SetMacAddress(mac)
            }
            (CommandTag::GetPhyAddress, CommandPayload::None) => Command::GetPhyAddress,
            (CommandTag::SetPhyAddress, CommandPayload::PhyAddress(addr)) => {
                Command::SetPhyAddress(addr)
            }
            (CommandTag::GetAutoNegotiation, CommandPayload::None) => Command::GetAutoNegotiation,
            (CommandTag::SetAutoNegotiation, CommandPayload::Flag(on)) => {
                Command::SetAutoNegotiation(on)
            }
            (CommandTag::GetSpeed, CommandPayload::None) => Command::GetSpeed,
            (CommandTag::SetSpeed, CommandPayload::Speed(speed)) => Command::SetSpeed(speed),
            (CommandTag::SetPromiscuous, CommandPayload::Flag(on)) => Command::SetPromiscuous(on),
            (CommandTag::SetFlowControl, CommandPayload::Flag(on)) => Command::SetFlowControl(on),
            (CommandTag::GetDuplex, CommandPayload::None) => Command::GetDuplex,
            (CommandTag::SetDuplex, CommandPayload::Duplex(duplex)) => Command::SetDuplex(duplex),
            (CommandTag::SetPhyLoopback, CommandPayload::Flag(on)) => Command::SetPhyLoopback(on),
            _ => return Err(ArgumentError::PayloadMismatch.into()),
        };
        Ok(command)
    }

    /// Tag of this command
    pub const fn tag(&self) -> CommandTag {
        match self {
            Command::GetMacAddress => CommandTag::GetMacAddress,
            Command::SetMacAddress(_) => CommandTag::SetMacAddress,
            Command::GetPhyAddress => CommandTag::GetPhyAddress,
            Command::SetPhyAddress(_) => CommandTag::SetPhyAddress,
            Command::GetAutoNegotiation => CommandTag::GetAutoNegotiation,
            Command::SetAutoNegotiation(_) => CommandTag::SetAutoNegotiation,
            Command::GetSpeed => CommandTag::GetSpeed,
            Command::SetSpeed(_) => CommandTag::SetSpeed,
            Command::SetPromiscuous(_) => CommandTag::SetPromiscuous,
            Command::SetFlowControl(_) => CommandTag::SetFlowControl,
            Command::GetDuplex => CommandTag::GetDuplex,
            Command::SetDuplex(_) => CommandTag::SetDuplex,
            Command::SetPhyLoopback(_) => CommandTag::SetPhyLoopback,
        }
    }

    /// Payload of this command
    pub const fn payload(&self) -> CommandPayload {
        match *self {
            Command::GetMacAddress
            | Command::GetPhyAddress
            | Command::GetAutoNegotiation
            | Command::GetSpeed
            | Command::GetDuplex => CommandPayload::None,
            Command::SetMacAddress(mac) => CommandPayload::MacAddress(mac),
            Command::SetPhyAddress(addr) => CommandPayload::PhyAddress(addr),
            Command::SetAutoNegotiation(on)
            | Command::SetPromiscuous(on)
            | Command::SetFlowControl(on)
            | Command::SetPhyLoopback(on) => CommandPayload::Flag(on),
            Command::SetSpeed(speed) => CommandPayload::Speed(speed),
            Command::SetDuplex(duplex) => CommandPayload::Duplex(duplex),
        }
    }

    /// Which driver owns this setting
    pub const fn target(&self) -> CommandTarget {
        self.tag().target()
    }
}

/// Result of a handled command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Setter completed
    Done,
    /// MAC address
    MacAddress(MacAddress),
    /// PHY address
    PhyAddress(PhyAddress),
    /// Auto-negotiation enabled
    AutoNegotiation(bool),
    /// Link speed
    Speed(Speed),
    /// Duplex mode
    Duplex(Duplex),
}

impl Response {
    /// Whether this response has the shape `tag` expects
    pub const fn fits(&self, tag: CommandTag) -> bool {
        matches!(
            (tag, self),
            (CommandTag::GetMacAddress, Response::MacAddress(_))
                | (CommandTag::GetPhyAddress, Response::PhyAddress(_))
                | (CommandTag::GetAutoNegotiation, Response::AutoNegotiation(_))
                | (CommandTag::GetSpeed, Response::Speed(_))
                | (CommandTag::GetDuplex, Response::Duplex(_))
                | (
                    CommandTag::SetMacAddress
                        | CommandTag::SetPhyAddress
                        | CommandTag::SetAutoNegotiation
                        | CommandTag::SetSpeed
                        | CommandTag::SetPromiscuous
                        | CommandTag::SetFlowControl
                        | CommandTag::SetDuplex
                        | CommandTag::SetPhyLoopback,
                    Response::Done
                )
        )
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// A driver that executes the commands it owns
///
/// Commands owned by another driver fail with
/// [`ArgumentError::UnknownCommand`].
pub trait CommandHandler {
    /// Execute one command
    fn handle(&mut self, command: Command) -> Result<Response>;
}

impl<H: CommandHandler + ?Sized> CommandHandler for &mut H {
    fn handle(&mut self, command: Command) -> Result<Response> {
        (**self).handle(command)
    }
}

/// Route a command to the driver that owns it
///
/// The handler's response is checked against the command's expected shape;
/// a mismatch fails with [`ArgumentError::PayloadMismatch`].
pub fn dispatch<A, P>(command: Command, mac: &mut A, phy: &mut P, link: &LinkInfo) -> Result<Response>
where
    A: CommandHandler + ?Sized,
    P: CommandHandler + ?Sized,
{
    debug!("dispatching {:?}", command.tag());

    let response = match command.target() {
        CommandTarget::Mac => mac.handle(command)?,
        CommandTarget::Phy => phy.handle(command)?,
        CommandTarget::MacAndPhy => {
            let response = mac.handle(command)?;
            check_shape(command.tag(), response)?;
            phy.handle(command)?
        }
        CommandTarget::LinkInfo => match command {
            Command::GetSpeed => Response::Speed(link.speed),
            _ => Response::Duplex(link.duplex),
        },
    };

    check_shape(command.tag(), response)
}

/// Decode a raw request and [`dispatch`] it
///
/// Undefined tags and mismatched payloads fail before any handler runs.
pub fn dispatch_raw<A, P>(
    tag: u32,
    payload: CommandPayload,
    mac: &mut A,
    phy: &mut P,
    link: &LinkInfo,
) -> Result<Response>
where
    A: CommandHandler + ?Sized,
    P: CommandHandler + ?Sized,
{
    dispatch(Command::from_raw(tag, payload)?, mac, phy, link)
}

fn check_shape(tag: CommandTag, response: Response) -> Result<Response> {
    if response.fits(tag) {
        Ok(response)
    } else {
        Err(ArgumentError::PayloadMismatch.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
