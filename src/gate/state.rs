//! Tri-state shutdown flag.
//!
//! ```text
//! Unlocked --(admit enter)--> TransientLock --(admit release)--> Unlocked
//! Unlocked --(seal)---------> Set   (terminal)
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Shutdown flag value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Serving; admissions may proceed.
    Unlocked = 0,
    /// An admission holds the flag for its critical section.
    TransientLock = 1,
    /// Shutdown has begun. Never left once reached.
    Set = 2,
}

impl From<u8> for ShutdownState {
    fn from(val: u8) -> Self {
        match val {
            0 => ShutdownState::Unlocked,
            1 => ShutdownState::TransientLock,
            _ => ShutdownState::Set,
        }
    }
}

impl ShutdownState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownState::Unlocked => "unlocked",
            ShutdownState::TransientLock => "transient_lock",
            ShutdownState::Set => "set",
        }
    }
}

impl fmt::Display for ShutdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic cell holding a [`ShutdownState`].
#[derive(Debug)]
pub struct AtomicShutdownState(AtomicU8);

impl AtomicShutdownState {
    pub fn new(state: ShutdownState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub fn load(&self) -> ShutdownState {
        ShutdownState::from(self.0.load(Ordering::SeqCst))
    }

    /// Single compare-and-swap. On failure returns the value observed.
    pub fn compare_exchange(
        &self,
        current: ShutdownState,
        new: ShutdownState,
    ) -> Result<ShutdownState, ShutdownState> {
        self.0
            .compare_exchange(current as u8, new as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(ShutdownState::from)
            .map_err(ShutdownState::from)
    }

    /// Unconditional store. Only used to release a held `TransientLock`.
    pub(crate) fn store(&self, state: ShutdownState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

impl Default for AtomicShutdownState {
    fn default() -> Self {
        Self::new(ShutdownState::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unlocked() {
        let state = AtomicShutdownState::default();
        assert_eq!(state.load(), ShutdownState::Unlocked);
    }

    #[test]
    fn cas_reports_observed_value() {
        let state = AtomicShutdownState::default();
        assert_eq!(
            state.compare_exchange(ShutdownState::Unlocked, ShutdownState::TransientLock),
            Ok(ShutdownState::Unlocked)
        );
        assert_eq!(
            state.compare_exchange(ShutdownState::Unlocked, ShutdownState::Set),
            Err(ShutdownState::TransientLock)
        );
        state.store(ShutdownState::Unlocked);
        assert_eq!(
            state.compare_exchange(ShutdownState::Unlocked, ShutdownState::Set),
            Ok(ShutdownState::Unlocked)
        );
        assert_eq!(state.load(), ShutdownState::Set);
    }

    #[test]
    fn unknown_discriminant_maps_to_set() {
        assert_eq!(ShutdownState::from(7), ShutdownState::Set);
        assert_eq!(ShutdownState::Set.to_string(), "set");
    }
}
