//! Fixed-capacity, insertion-ordered registry of callback handles.

use core::fmt;

use heapless::Vec;

use crate::callback::{Callback, same_callback};

/// Registry of up to `N` non-owning handler references.
///
/// Handles keep insertion order; removing one shifts every later handle down by one slot.
/// Nothing here allocates or invokes a handler: event sources iterate the registry (see
/// [`crate::fanout::Broadcast`]) to dispatch. Whoever created a handler owns it and must
/// remove it before it goes away, which the `'a` borrow enforces.
///
/// `H` is normally `dyn Callback` or `dyn Callback + Sync`.
pub struct CallbackSlots<'a, H: ?Sized + 'a, const N: usize> {
    slots: Vec<&'a H, N>,
}

impl<'a, H: ?Sized + Callback + 'a, const N: usize> CallbackSlots<'a, H, N> {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends `handler` at the next free slot.
    ///
    /// Returns `false` without touching the registry when all `N` slots are taken.
    pub fn add_handler(&mut self, handler: &'a H) -> bool {
        self.slots.push(handler).is_ok()
    }

    /// Removes the first slot holding `handler` (compared by identity) and closes the gap.
    ///
    /// Returns `false` when `handler` is not registered. A handler added twice loses only its
    /// earliest slot per call.
    pub fn remove_handler(&mut self, handler: &H) -> bool {
        let Some(index) = self
            .slots
            .iter()
            .position(|slot| same_callback::<H>(*slot, handler))
        else {
            return false;
        };

        self.slots.remove(index);
        true
    }

    pub fn contains(&self, handler: &H) -> bool {
        self.slots
            .iter()
            .any(|slot| same_callback::<H>(*slot, handler))
    }

    /// Registered handlers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &'a H> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<'a, H: ?Sized + Callback + 'a, const N: usize> Default for CallbackSlots<'a, H, N> {
    fn default() -> Self {
        Self::new()
    }
}

// Derives would demand `H: Clone`/`H: Debug`; only the references are copied or shown.
impl<'a, H: ?Sized + 'a, const N: usize> Clone for CallbackSlots<'a, H, N> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<'a, H: ?Sized + 'a, const N: usize> fmt::Debug for CallbackSlots<'a, H, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlots")
            .field("len", &self.slots.len())
            .field("capacity", &N)
            .finish()
    }
}
