use std::cell::Cell;
use std::rc::Rc;

use turbo_racing_domain::Viewport;

use super::Listeners;
use crate::ports::outbound::{Subscription, ViewportPort};

struct ViewportState {
    user_agent: Option<String>,
    viewport: Cell<Option<Viewport>>,
    listeners: Rc<Listeners>,
}

/// Scriptable user agent and window size
#[derive(Clone)]
pub struct FakeViewport {
    state: Rc<ViewportState>,
}

impl FakeViewport {
    pub fn new(user_agent: Option<&str>, viewport: Viewport) -> Self {
        Self::build(user_agent, Some(viewport))
    }

    /// A browser that exposes neither a user agent nor a window size
    pub fn unreadable() -> Self {
        Self::build(None, None)
    }

    fn build(user_agent: Option<&str>, viewport: Option<Viewport>) -> Self {
        Self {
            state: Rc::new(ViewportState {
                user_agent: user_agent.map(str::to_string),
                viewport: Cell::new(viewport),
                listeners: Rc::new(Listeners::default()),
            }),
        }
    }

    /// Change the window size and fire resize listeners
    pub fn resize(&self, viewport: Viewport) {
        self.state.viewport.set(Some(viewport));
        self.state.listeners.fire();
    }

    pub fn resize_listeners(&self) -> usize {
        self.state.listeners.len()
    }
}

impl ViewportPort for FakeViewport {
    fn user_agent(&self) -> Option<String> {
        self.state.user_agent.clone()
    }

    fn viewport(&self) -> Option<Viewport> {
        self.state.viewport.get()
    }

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Subscription {
        self.state.listeners.subscribe(callback)
    }
}
