//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - Device capabilities derived from the frame policy
//!   - Header-checking [`StackInput`](crate::StackInput) wrapper
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_mediator::integration::smoltcp::{device_capabilities, ethernet_address};
//! let caps = device_capabilities(mediator.frame_policy());
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{CheckedInput, device_capabilities, ethernet_address};
