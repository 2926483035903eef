//! State Cells
//!
//! The task and chat controllers mutate state they do not own: in the UI it
//! lives in a reactive signal, in tests in a plain `RefCell`. `StateCell` is
//! the seam between the two.

use std::cell::RefCell;
use std::sync::Mutex;

/// Shared, interior-mutable holder of `T`
pub trait StateCell<T> {
    /// Mutate the value and return something derived from it
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    /// Read the value
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T> StateCell<T> for RefCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }
}

impl<T> StateCell<T> for Mutex<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }
}
