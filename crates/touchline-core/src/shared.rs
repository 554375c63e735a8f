//! Registry shared between interrupt handlers and the main loop.

use core::cell::RefCell;

use critical_section::Mutex;
use log::trace;

use crate::{callback::Callback, slots::CallbackSlots};

/// [`CallbackSlots`] guarded by a critical section.
///
/// Every mutation runs with interrupts masked, so an interrupt may register a handler while
/// the main loop dispatches. Dispatch copies the slot list out first and invokes handlers with
/// interrupts enabled; handlers may add or remove handlers, which takes effect on the next
/// dispatch.
///
/// A `static` instance needs `H = dyn Callback + Sync`.
pub struct SharedSlots<'a, H: ?Sized + 'a, const N: usize> {
    slots: Mutex<RefCell<CallbackSlots<'a, H, N>>>,
}

impl<'a, H: ?Sized + Callback + 'a, const N: usize> SharedSlots<'a, H, N> {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new(CallbackSlots::new())),
        }
    }

    /// See [`CallbackSlots::add_handler`].
    pub fn add_handler(&self, handler: &'a H) -> bool {
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs).add_handler(handler))
    }

    /// See [`CallbackSlots::remove_handler`].
    pub fn remove_handler(&self, handler: &H) -> bool {
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs).remove_handler(handler))
    }

    pub fn contains(&self, handler: &H) -> bool {
        critical_section::with(|cs| self.slots.borrow_ref(cs).contains(handler))
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.slots.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current registration list.
    pub fn snapshot(&self) -> CallbackSlots<'a, H, N> {
        critical_section::with(|cs| self.slots.borrow_ref(cs).clone())
    }

    /// Invokes every handler registered at the time of the call, in slot order.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self) -> usize {
        let snapshot = self.snapshot();
        for handler in snapshot.iter() {
            handler.invoke();
        }
        trace!("shared-slots: dispatched handlers={}", snapshot.len());
        snapshot.len()
    }
}

impl<'a, H: ?Sized + Callback + 'a, const N: usize> Default for SharedSlots<'a, H, N> {
    fn default() -> Self {
        Self::new()
    }
}
