//! Reactive State Cells
//!
//! Bridges the client crate's controllers onto Leptos signals.

use leptos::prelude::*;
use taskflow_client::StateCell;

/// A `RwSignal` the task and chat controllers can drive
///
/// Writes notify subscribers like any signal write. Once the owning
/// component is gone the signal is disposed; late results from in-flight
/// requests then land in a throwaway default and are dropped.
pub struct SignalCell<T: 'static>(pub RwSignal<T>);

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T> StateCell<T> for SignalCell<T>
where
    T: Default + Send + Sync + 'static,
{
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        match self.0.try_write() {
            Some(mut guard) => f(&mut *guard),
            None => f(&mut T::default()),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.0.try_read_untracked() {
            Some(guard) => f(&*guard),
            None => f(&T::default()),
        }
    }
}
