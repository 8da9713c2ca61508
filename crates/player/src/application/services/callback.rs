//! Single-slot change callback shared by the embedding services

use std::cell::RefCell;

/// Holds at most one state-change callback
///
/// The callback is taken out of its slot while it runs, so it may call back
/// into the service that owns the slot without hitting a `RefCell` double borrow.
pub(crate) struct Callback<T> {
    slot: RefCell<Option<Box<dyn FnMut(&T)>>>,
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }
}

impl<T> Callback<T> {
    pub(crate) fn set(&self, callback: impl FnMut(&T) + 'static) {
        *self.slot.borrow_mut() = Some(Box::new(callback));
    }

    pub(crate) fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    pub(crate) fn emit(&self, value: &T) {
        let taken = self.slot.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback(value);
            let mut slot = self.slot.borrow_mut();
            // A callback installed while this one ran wins
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_callback() {
        let seen = Rc::new(Cell::new(0));
        let callback = Callback::<i32>::default();
        let sink = Rc::clone(&seen);
        callback.set(move |v| sink.set(*v));

        callback.emit(&7);

        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn test_reentrant_emit_is_dropped_not_panicking() {
        let callback = Rc::new(Callback::<i32>::default());
        let inner = Rc::clone(&callback);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        callback.set(move |v| {
            counter.set(counter.get() + 1);
            if *v == 1 {
                inner.emit(&2);
            }
        });

        callback.emit(&1);

        assert_eq!(calls.get(), 1);
    }
}
