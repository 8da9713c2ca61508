//! In-memory platform fakes for native tests
//!
//! The fakes are cheap `Rc` handles: a test keeps one clone to drive and
//! inspect the platform while the services own another behind the port traits.

mod fullscreen;
mod platform;
mod runtime_host;
mod viewport;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub use fullscreen::FakeFullscreen;
pub use platform::{FakeChrome, FakePlatform, FakeSleep, FakeSpawner};
pub use runtime_host::{FakeInstance, FakeRuntimeHost, PendingInstantiation};
pub use viewport::FakeViewport;

use crate::ports::outbound::Subscription;

/// Event listener registry shared by the fakes
#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
}

impl Listeners {
    fn subscribe(self: &Rc<Self>, callback: Rc<dyn Fn()>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, callback));
        let registry = Rc::clone(self);
        Subscription::new(move || registry.entries.borrow_mut().retain(|(i, _)| *i != id))
    }

    /// Invoke every listener; listeners may (un)subscribe while running
    fn fire(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> =
            self.entries.borrow().iter().map(|(_, cb)| Rc::clone(cb)).collect();
        for callback in snapshot {
            callback();
        }
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
