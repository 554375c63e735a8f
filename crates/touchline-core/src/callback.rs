//! Invocable handler capability shared by every event source in the crate.

use core::ptr;

/// Zero-argument handler invoked when an event fires.
///
/// Handlers are held by non-owning reference, so invocation goes through `&self`. Handlers
/// that need to mutate state use interior mutability (`Cell`, atomics, a critical-section
/// mutex).
pub trait Callback {
    fn invoke(&self);
}

impl<F: Fn()> Callback for F {
    fn invoke(&self) {
        self()
    }
}

/// Handler that ignores every invocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Noop;

impl Callback for Noop {
    fn invoke(&self) {}
}

/// Returns `true` when both references point at the same handler object.
///
/// Compares data addresses only; vtables are ignored. Zero-sized handlers may share an
/// address, so handlers that must be told apart should carry state.
pub fn same_callback<H: ?Sized>(a: &H, b: &H) -> bool {
    ptr::addr_eq(a as *const H, b as *const H)
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn closures_invoke_through_the_trait() {
        let hits = Cell::new(0u32);
        let handler = || hits.set(hits.get() + 1);

        handler.invoke();
        (&handler as &dyn Callback).invoke();

        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn identity_ignores_equal_values() {
        let a = Cell::new(1u8);
        let b = Cell::new(1u8);
        let first = || a.set(0);
        let second = || b.set(0);

        let first: &dyn Callback = &first;
        let second: &dyn Callback = &second;

        assert!(same_callback(first, first));
        assert!(!same_callback(first, second));
    }
}
