//! WASM platform implementations
//!
//! Browser bindings for the viewport, page chrome, timer, task spawning and
//! fullscreen ports, plus the composition helpers used by `main`.

use std::{future::Future, pin::Pin, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, EventTarget, HtmlElement};

use turbo_racing_domain::{FullscreenRequestError, FullscreenVendor, Viewport};

use super::WasmRuntimeHost;
use crate::application::EmbedConfig;
use crate::ports::outbound::{
    FullscreenFuture, FullscreenPort, PageChromePort, SleepPort, SpawnPort, Subscription,
    ViewportPort,
};
use crate::state::Platform;

/// Name of the `<meta>` tag carrying a JSON `EmbedConfig` overlay
const CONFIG_META_NAME: &str = "turbo-config";

pub(super) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Readable text for a thrown JS value
pub(super) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Look up a callable member by name, `None` when absent or not a function
pub(super) fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Attach one closure to several events; dropping the subscription detaches it
fn listen(target: EventTarget, events: Vec<&'static str>, callback: Rc<dyn Fn()>) -> Subscription {
    let closure = Closure::<dyn FnMut()>::new(move || callback());
    for event in &events {
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to listen for {}: {}", event, describe(&e));
        }
    }
    Subscription::new(move || {
        for event in &events {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    })
}

/// Viewport provider backed by `window`
#[derive(Clone, Default)]
pub struct WasmViewport;

impl ViewportPort for WasmViewport {
    fn user_agent(&self) -> Option<String> {
        web_sys::window()?.navigator().user_agent().ok()
    }

    fn viewport(&self) -> Option<Viewport> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Viewport::new(width, height))
    }

    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Subscription {
        match web_sys::window() {
            Some(window) => listen(window.into(), vec!["resize", "orientationchange"], callback),
            None => Subscription::noop(),
        }
    }
}

/// Page chrome found by CSS selector and hidden through its inline style
#[derive(Clone)]
pub struct WasmPageChrome {
    selector: String,
}

impl WasmPageChrome {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    fn element(&self) -> Option<HtmlElement> {
        document()?
            .query_selector(&self.selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl PageChromePort for WasmPageChrome {
    fn set_chrome_hidden(&self, hidden: bool) {
        let Some(element) = self.element() else {
            tracing::debug!(selector = %self.selector, "No page chrome to toggle");
            return;
        };
        let style = element.style();
        let result = if hidden {
            style.set_property("display", "none")
        } else {
            style.remove_property("display").map(|_| ())
        };
        if let Err(e) = result {
            tracing::warn!("Failed to toggle page chrome: {}", describe(&e));
        }
    }
}

/// Sleep provider using gloo-timers
#[derive(Clone, Default)]
pub struct WasmSleep;

impl SleepPort for WasmSleep {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX)))
    }
}

/// Detached tasks on the browser's microtask queue
pub struct WasmSpawner;

impl SpawnPort for WasmSpawner {
    fn spawn_local(&self, task: Pin<Box<dyn Future<Output = ()> + 'static>>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Fullscreen surface probing vendor APIs by name
///
/// Requests target the game panel; exits, element accessors and change
/// events live on the document.
#[derive(Clone)]
pub struct WasmFullscreen {
    container_id: String,
}

impl WasmFullscreen {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    fn container(&self) -> Option<Element> {
        document()?.get_element_by_id(&self.container_id)
    }

    fn invoke(target: &JsValue, name: &str) -> Result<JsValue, FullscreenRequestError> {
        let function = method(target, name)
            .ok_or_else(|| FullscreenRequestError(format!("{} unavailable", name)))?;
        function
            .call0(target)
            .map_err(|e| FullscreenRequestError(describe(&e)))
    }

    /// Observe the outcome of an already-issued call
    fn settle(call: Result<JsValue, FullscreenRequestError>) -> FullscreenFuture {
        Box::pin(async move {
            let returned = call?;
            // Prefixed APIs return undefined instead of a promise
            match returned.dyn_into::<Promise>() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| FullscreenRequestError(describe(&e))),
                Err(_) => Ok(()),
            }
        })
    }
}

impl FullscreenPort for WasmFullscreen {
    fn can_request(&self, vendor: FullscreenVendor) -> bool {
        self.container()
            .is_some_and(|el| method(el.as_ref(), vendor.request_method()).is_some())
    }

    fn request(&self, vendor: FullscreenVendor) -> FullscreenFuture {
        let call = self
            .container()
            .ok_or_else(|| FullscreenRequestError(format!("#{} not found", self.container_id)))
            .and_then(|el| Self::invoke(el.as_ref(), vendor.request_method()));
        Self::settle(call)
    }

    fn can_exit(&self, vendor: FullscreenVendor) -> bool {
        document().is_some_and(|doc| method(doc.as_ref(), vendor.exit_method()).is_some())
    }

    fn exit(&self, vendor: FullscreenVendor) -> FullscreenFuture {
        let call = document()
            .ok_or_else(|| FullscreenRequestError("no document".to_string()))
            .and_then(|doc| Self::invoke(doc.as_ref(), vendor.exit_method()));
        Self::settle(call)
    }

    fn has_fullscreen_element(&self, vendor: FullscreenVendor) -> bool {
        document()
            .and_then(|doc| Reflect::get(doc.as_ref(), &JsValue::from_str(vendor.element_property())).ok())
            .is_some_and(|element| !element.is_null() && !element.is_undefined())
    }

    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        let events = FullscreenVendor::PROBE_ORDER
            .into_iter()
            .map(|vendor| vendor.change_event())
            .collect();
        match document() {
            Some(doc) => listen(doc.into(), events, callback),
            None => Subscription::noop(),
        }
    }
}

/// Read the optional `<meta name="turbo-config" content="{...}">` overlay
pub fn read_embed_config() -> EmbedConfig {
    let selector = format!("meta[name=\"{}\"]", CONFIG_META_NAME);
    let content = document()
        .and_then(|doc| doc.query_selector(&selector).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));
    match content {
        Some(json) => EmbedConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {} meta tag: {}", CONFIG_META_NAME, e);
            EmbedConfig::default()
        }),
        None => EmbedConfig::default(),
    }
}

/// Create a Platform instance with all browser providers
pub fn create_platform(config: &EmbedConfig) -> Platform {
    Platform::new(
        WasmViewport,
        WasmFullscreen::new(&config.panel_element_id),
        WasmRuntimeHost::new(&config.mount_element_id, &config.entrypoint),
        WasmPageChrome::new(&config.chrome_selector),
        WasmSleep,
        WasmSpawner,
    )
}
