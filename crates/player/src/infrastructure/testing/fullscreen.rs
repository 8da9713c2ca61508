use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use futures_util::future;
use turbo_racing_domain::{FullscreenRequestError, FullscreenVendor};

use super::Listeners;
use crate::ports::outbound::{FullscreenFuture, FullscreenPort, Subscription};

#[derive(Default)]
struct FullscreenState {
    vendors: RefCell<Vec<FullscreenVendor>>,
    reject: Cell<bool>,
    reject_exits: Cell<bool>,
    elements: RefCell<HashSet<FullscreenVendor>>,
    requests: RefCell<Vec<FullscreenVendor>>,
    exits: RefCell<Vec<FullscreenVendor>>,
    listeners: Rc<Listeners>,
}

/// Fullscreen surface exposing a chosen set of vendor APIs
///
/// Granted requests and exits update the vendor's element accessor and fire
/// change listeners synchronously, before the returned future resolves.
#[derive(Clone, Default)]
pub struct FakeFullscreen {
    state: Rc<FullscreenState>,
}

impl FakeFullscreen {
    pub fn with_vendors(vendors: &[FullscreenVendor]) -> Self {
        let fake = Self::default();
        *fake.state.vendors.borrow_mut() = vendors.to_vec();
        fake
    }

    pub fn remove_all_vendors(&self) {
        self.state.vendors.borrow_mut().clear();
    }

    /// Make every request fail like a denied permission
    pub fn reject_requests(&self, reject: bool) {
        self.state.reject.set(reject);
    }

    /// Make every exit fail, leaving the element accessors untouched
    pub fn reject_exits(&self, reject: bool) {
        self.state.reject_exits.set(reject);
    }

    /// Flip a vendor's element accessor as the platform would on its own
    pub fn set_element(&self, vendor: FullscreenVendor, present: bool) {
        {
            let mut elements = self.state.elements.borrow_mut();
            if present {
                elements.insert(vendor);
            } else {
                elements.remove(&vendor);
            }
        }
        self.state.listeners.fire();
    }

    pub fn requests(&self) -> Vec<FullscreenVendor> {
        self.state.requests.borrow().clone()
    }

    pub fn exits(&self) -> Vec<FullscreenVendor> {
        self.state.exits.borrow().clone()
    }

    pub fn change_listeners(&self) -> usize {
        self.state.listeners.len()
    }

    fn supports(&self, vendor: FullscreenVendor) -> bool {
        self.state.vendors.borrow().contains(&vendor)
    }
}

impl FullscreenPort for FakeFullscreen {
    fn can_request(&self, vendor: FullscreenVendor) -> bool {
        self.supports(vendor)
    }

    fn request(&self, vendor: FullscreenVendor) -> FullscreenFuture {
        self.state.requests.borrow_mut().push(vendor);
        if self.state.reject.get() {
            return Box::pin(future::ready(Err(FullscreenRequestError(
                "permission denied".to_string(),
            ))));
        }
        self.set_element(vendor, true);
        Box::pin(future::ready(Ok(())))
    }

    fn can_exit(&self, vendor: FullscreenVendor) -> bool {
        self.supports(vendor)
    }

    fn exit(&self, vendor: FullscreenVendor) -> FullscreenFuture {
        self.state.exits.borrow_mut().push(vendor);
        if self.state.reject_exits.get() {
            return Box::pin(future::ready(Err(FullscreenRequestError(
                "exit not allowed".to_string(),
            ))));
        }
        self.state.elements.borrow_mut().clear();
        self.state.listeners.fire();
        Box::pin(future::ready(Ok(())))
    }

    fn has_fullscreen_element(&self, vendor: FullscreenVendor) -> bool {
        self.state.elements.borrow().contains(&vendor)
    }

    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        self.state.listeners.subscribe(callback)
    }
}
