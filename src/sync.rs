//! ISR-Safe Mediator Sharing
//!
//! The mediator requires exclusive access for every operation. When the MAC
//! driver's receive interrupt and a task-level PHY poll loop both need it,
//! wrap it in a [`SharedMediator`]: every access runs inside a
//! `critical_section::with()` closure.
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_mediator::sync::SharedMediator;
//!
//! static ETH: SharedMediator<MyMediator> = SharedMediator::new(MyMediator::new());
//!
//! // Task: detection holds the mediator for the whole scan
//! let addr = ETH.with(|eth| detect_phy_address(eth))?;
//! ETH.with(|eth| phy.poll_link(eth))?;
//!
//! #[interrupt]
//! fn EMAC_IRQ() {
//!     ETH.with(|eth| eth.deliver_frame(frame)).ok();
//! }
//! ```
//!
//! # Implementation Note
//!
//! The critical section implementation is provided by the HAL crate. For
//! host tests, enable `critical-section/std`.

use core::cell::RefCell;

use critical_section::Mutex;

// =============================================================================
// Critical Section Cell
// =============================================================================

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    ///
    /// Panics on re-entrant access from inside `f`.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

// =============================================================================
// SharedMediator
// =============================================================================

/// ISR-safe mediator wrapper using critical sections
///
/// The wrapper does not implement [`Mediator`](crate::Mediator). Run a whole
/// sequence (an address scan, a read-modify-write, a link poll) inside one
/// [`with`](Self::with) closure; no other context reaches the bus until it
/// returns.
pub struct SharedMediator<M> {
    inner: CriticalSectionCell<M>,
}

impl<M> SharedMediator<M> {
    /// Wrap a mediator (const, suitable for static initialization).
    pub const fn new(mediator: M) -> Self {
        Self {
            inner: CriticalSectionCell::new(mediator),
        }
    }

    /// Execute a closure with exclusive access to the mediator.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut M) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if the mediator is already
    /// in use further up the call stack.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut M) -> R,
    {
        self.inner.try_with(f)
    }
}
