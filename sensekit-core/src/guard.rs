//! Bus handle lifecycle
//!
//! A driver owns its bus handle from construction until it is disposed.
//! [`BusGuard`] tracks that ownership:
//!
//! ```text
//! Constructed ──(config written)──▶ Active ──dispose()──▶ Disposed
//!                                                           │
//!                                              dispose() ───┘ (no-op)
//! ```
//!
//! Dropping a guard drops the handle with it, so a driver whose
//! configuration write fails still gives up the bus on the way out.

use crate::error::Error;

/// Exclusive holder of a driver's bus handle
#[derive(Debug)]
pub struct BusGuard<B> {
    bus: Option<B>,
}

impl<B> BusGuard<B> {
    /// Take ownership of a bus handle
    pub fn new(bus: B) -> Self {
        Self { bus: Some(bus) }
    }

    /// Take ownership of a handle that may be absent
    ///
    /// Fails with [`Error::MissingBus`] when `bus` is `None`.
    pub fn from_optional<E>(bus: Option<B>) -> Result<Self, Error<E>> {
        bus.map(Self::new).ok_or(Error::MissingBus)
    }

    /// Borrow the bus for one operation
    pub fn bus<E>(&mut self) -> Result<&mut B, Error<E>> {
        self.bus.as_mut().ok_or(Error::Disposed)
    }

    /// Whether the handle has been released
    pub fn is_disposed(&self) -> bool {
        self.bus.is_none()
    }

    /// Release the handle
    ///
    /// Returns it on the first call and `None` on every later call.
    pub fn dispose(&mut self) -> Option<B> {
        self.bus.take()
    }

    /// Consume the guard, returning the handle if still held
    pub fn into_inner(self) -> Option<B> {
        self.bus
    }
}
