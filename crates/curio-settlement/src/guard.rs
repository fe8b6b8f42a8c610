//! Entry guard: emergency stop plus single-flight reentrancy lock.
//!
//! A value transfer to an external recipient can trigger arbitrary re-entry
//! into the engine before the outer call completes. The guard converts such
//! a re-entrant call into a hard [`CurioError::ReentrantCall`] failure: the
//! lock is taken on entry and released on every exit path by the RAII
//! [`EntryPermit`].
//!
//! The flags are `Cell`-based and the engine shares the guard via `Rc`, so
//! a recipient's receive hook observes the very same lock the in-flight
//! settlement holds.

use std::cell::Cell;

use curio_types::{CurioError, Result};

/// Pause flag plus single-flight settlement lock.
#[derive(Debug, Default)]
pub struct EntryGuard {
    in_flight: Cell<bool>,
    paused: Cell<bool>,
}

impl EntryGuard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            in_flight: Cell::new(false),
            paused: Cell::new(false),
        }
    }

    /// Take the settlement lock.
    ///
    /// # Errors
    /// `Paused` when the emergency stop is engaged, `ReentrantCall` when a
    /// settlement is already in flight.
    pub fn enter(&self) -> Result<EntryPermit<'_>> {
        self.check_not_paused()?;
        if self.in_flight.replace(true) {
            return Err(CurioError::ReentrantCall);
        }
        Ok(EntryPermit { guard: self })
    }

    /// Pause gate for mutating calls that do not take the full lock.
    ///
    /// # Errors
    /// `Paused` when the emergency stop is engaged.
    pub fn check_not_paused(&self) -> Result<()> {
        if self.paused.get() {
            return Err(CurioError::Paused);
        }
        Ok(())
    }

    /// Engage the emergency stop. Admin gating happens in the engine.
    pub fn pause(&self) {
        self.paused.set(true);
    }

    /// Release the emergency stop.
    pub fn unpause(&self) {
        self.paused.set(false);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Whether a settlement currently holds the lock.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

/// RAII permit: holds the settlement lock, releases it on drop.
#[derive(Debug)]
pub struct EntryPermit<'a> {
    guard: &'a EntryGuard,
}

impl Drop for EntryPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_release() {
        let guard = EntryGuard::new();
        assert!(!guard.in_flight());
        {
            let _permit = guard.enter().unwrap();
            assert!(guard.in_flight());
        }
        assert!(!guard.in_flight());
    }

    #[test]
    fn reentry_blocked_while_held() {
        let guard = EntryGuard::new();
        let _permit = guard.enter().unwrap();
        let err = guard.enter().unwrap_err();
        assert!(matches!(err, CurioError::ReentrantCall));
        // The outer permit is unaffected by the failed inner attempt.
        assert!(guard.in_flight());
    }

    #[test]
    fn lock_released_even_after_inner_failure() {
        let guard = EntryGuard::new();
        {
            let _permit = guard.enter().unwrap();
            let _ = guard.enter().unwrap_err();
        }
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn pause_blocks_entry() {
        let guard = EntryGuard::new();
        guard.pause();
        assert!(guard.is_paused());
        assert!(matches!(guard.enter().unwrap_err(), CurioError::Paused));
        assert!(matches!(
            guard.check_not_paused().unwrap_err(),
            CurioError::Paused
        ));

        guard.unpause();
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn pause_reported_before_reentrancy() {
        // A paused engine reports Paused even to a re-entrant caller.
        let guard = EntryGuard::new();
        let _permit = guard.enter().unwrap();
        guard.pause();
        assert!(matches!(guard.enter().unwrap_err(), CurioError::Paused));
    }
}
