//! Handlers that forward one event to every handler of a registry.

use crate::{callback::Callback, shared::SharedSlots, slots::CallbackSlots};

/// Invokes every handler of a [`CallbackSlots`] in slot order.
///
/// Plug it into a trigger or classifier outcome to reach several observers. The registry
/// stays borrowed for as long as the `Broadcast` lives; use [`SharedBroadcast`] when handlers
/// must be added or removed while the event source is live.
pub struct Broadcast<'r, 'a, H: ?Sized + 'a, const N: usize>(pub &'r CallbackSlots<'a, H, N>);

impl<'a, H: ?Sized + Callback + 'a, const N: usize> Callback for Broadcast<'_, 'a, H, N> {
    fn invoke(&self) {
        for handler in self.0.iter() {
            handler.invoke();
        }
    }
}

/// Invokes every handler of a [`SharedSlots`], see [`SharedSlots::dispatch`].
pub struct SharedBroadcast<'r, 'a, H: ?Sized + 'a, const N: usize>(pub &'r SharedSlots<'a, H, N>);

impl<'a, H: ?Sized + Callback + 'a, const N: usize> Callback for SharedBroadcast<'_, 'a, H, N> {
    fn invoke(&self) {
        self.0.dispatch();
    }
}

impl<H: ?Sized, const N: usize> Clone for Broadcast<'_, '_, H, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized, const N: usize> Copy for Broadcast<'_, '_, H, N> {}

impl<H: ?Sized, const N: usize> Clone for SharedBroadcast<'_, '_, H, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized, const N: usize> Copy for SharedBroadcast<'_, '_, H, N> {}

#[cfg(test)]
mod tests {
    use core::cell::{Cell, RefCell};

    use super::*;

    #[test]
    fn broadcast_reaches_every_handler_in_order() {
        let order = RefCell::new(std::vec::Vec::new());
        let first = || order.borrow_mut().push(1u8);
        let second = || order.borrow_mut().push(2u8);
        let mut slots: CallbackSlots<'_, dyn Callback, 4> = CallbackSlots::new();
        assert!(slots.add_handler(&first));
        assert!(slots.add_handler(&second));

        let broadcast = Broadcast(&slots);
        broadcast.invoke();
        broadcast.invoke();

        assert_eq!(*order.borrow(), [1, 2, 1, 2]);
    }

    #[test]
    fn empty_broadcast_is_a_no_op() {
        let slots: CallbackSlots<'_, dyn Callback, 1> = CallbackSlots::new();
        Broadcast(&slots).invoke();
        assert!(slots.is_empty());
    }

    #[test]
    fn shared_broadcast_sees_late_registrations() {
        let hits = Cell::new(0u32);
        let handler = || hits.set(hits.get() + 1);
        let slots: SharedSlots<'_, dyn Callback, 2> = SharedSlots::new();
        let broadcast = SharedBroadcast(&slots);

        broadcast.invoke();
        assert_eq!(hits.get(), 0);

        assert!(slots.add_handler(&handler));
        broadcast.invoke();
        assert_eq!(hits.get(), 1);
    }
}
