//! Ethernet MAC/PHY Mediator
//!
//! A `no_std`, `no_alloc` mediator connecting an Ethernet MAC driver, a PHY
//! driver and a network stack without either driver knowing the other.
//!
//! # Architecture
//!
//! The crate is organized into four layers:
//!
//! 1. **Mediator** ([`mediator`]): the [`Mediator`] contract and the provided
//!    [`EthMediator`]. PHY register access, frame delivery and state
//!    notification all go through it.
//! 2. **Protocol** ([`state`], [`frame`], [`command`], [`events`]): what a
//!    notification, a frame and a control command may carry, and in which
//!    order.
//! 3. **PHY Layer** ([`phy`], [`detect`]): address detection and a generic
//!    IEEE 802.3 Clause 22 PHY driver.
//! 4. **HAL Layer** ([`hal`]): the MDIO bus transport.
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3**: Frame sizes, Clause 22 management registers, PAUSE
//!   advertisement
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and defmt logging
//! - `log`: Route internal logging through the `log` facade instead
//! - `smoltcp`: Enable smoltcp network stack helpers
//! - `critical-section`: Enable ISR-safe `SharedMediator` wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_mediator::{
//!     EthMediator, EventBridge, GenericPhy, MediatorConfig, Mediator, PhyConfig, PhyDriver,
//!     StateEvent,
//! };
//!
//! // Your MDIO transport, stack input and event sink
//! let bus = /* your MdioBus implementation */;
//! let stack = /* your StackInput implementation */;
//! let events = EventBridge::new(/* your EventSink */);
//!
//! let mut eth = EthMediator::new(bus, stack, events, MediatorConfig::new());
//! eth.notify_state(StateEvent::LowLevelInitialized)?;
//!
//! // PHY address is detected on init
//! let mut phy = GenericPhy::new(PhyConfig::new());
//! phy.init(&mut eth)?;
//!
//! // Link changes reach the event bridge as Connected / Disconnected
//! phy.poll_link(&mut eth)?;
//!
//! // Received frames go to the stack after the size check
//! eth.deliver_frame(&frame)?;
//! ```

#![no_std]
#![deny(missing_docs)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

// Logging shims, must stay first so the macros are visible everywhere
#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod events;
pub mod frame;
pub mod hal;
pub mod mediator;
pub mod phy;
pub mod state;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Testing utilities (mock implementations for unit tests)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use command::{
    Command, CommandHandler, CommandPayload, CommandTag, CommandTarget, Response, dispatch,
    dispatch_raw,
};
pub use config::{Duplex, MediatorConfig, PhyConfig, ProbeKind, Speed};
pub use detect::{
    BasicControlProbe, PhyIdProbe, PhyProbe, detect_phy_address, detect_phy_address_with,
    scan_phy_addresses,
};
pub use error::{ArgumentError, Error, ErrorKind, Result, TransportError};
pub use events::{EthEvent, EventBridge, EventSink, LinkInfo};
pub use frame::{
    FrameMode, FramePolicy, validate_frame_length, validate_frame_length_for,
    validate_payload_length,
};
pub use hal::mdio::MdioBus;
pub use mediator::{
    EthMediator, MacAddress, Mediator, PhyAddress, PhyAddressSet, RegisterIndex, StackInput,
    StateListener,
};
pub use phy::{GenericPhy, LinkStatus, PhyDriver};
pub use state::{DriverState, LinkState, StateArg, StateEvent};

#[cfg(feature = "critical-section")]
pub use sync::SharedMediator;
