//! WASM runtime host
//!
//! Mounts the external runtime: a `<canvas>` inside the mount element, the
//! variant's loader `<script>` appended to `<body>`, and the global
//! instantiation entrypoint the script installs.

use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::oneshot;
use futures_util::future;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlCanvasElement, HtmlScriptElement};

use turbo_racing_domain::{InstantiationError, LoadScriptError, RuntimeConfig, ShutdownError};

use super::wasm::{describe, document, method};
use crate::ports::outbound::{
    InjectedScript, InstanceFuture, ProgressCallback, RuntimeHostPort, RuntimeInstance,
    RuntimeSurface, ScriptInjection, SurfaceError,
};

const CANVAS_ID: &str = "unity-canvas";

/// Runtime host bound to the mount element with the given id
#[derive(Clone)]
pub struct WasmRuntimeHost {
    mount_element_id: String,
    entrypoint: String,
}

impl WasmRuntimeHost {
    pub fn new(mount_element_id: impl Into<String>, entrypoint: impl Into<String>) -> Self {
        Self {
            mount_element_id: mount_element_id.into(),
            entrypoint: entrypoint.into(),
        }
    }

    fn mount(&self) -> Option<Element> {
        document()?.get_element_by_id(&self.mount_element_id)
    }
}

impl RuntimeHostPort for WasmRuntimeHost {
    fn clear_mount(&self) {
        if let Some(mount) = self.mount() {
            mount.set_inner_html("");
        }
    }

    fn create_surface(&self) -> Result<Box<dyn RuntimeSurface>, SurfaceError> {
        let document = document().ok_or_else(|| SurfaceError("no document".to_string()))?;
        let mount = self
            .mount()
            .ok_or_else(|| SurfaceError(format!("#{} not found", self.mount_element_id)))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| SurfaceError(describe(&e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError("created element is not a canvas".to_string()))?;
        canvas.set_id(CANVAS_ID);
        let style = canvas.style();
        for (property, value) in [("width", "100%"), ("height", "100%"), ("display", "block")] {
            style
                .set_property(property, value)
                .map_err(|e| SurfaceError(describe(&e)))?;
        }
        mount
            .append_child(&canvas)
            .map_err(|e| SurfaceError(describe(&e)))?;

        Ok(Box::new(WasmSurface {
            canvas,
            entrypoint: self.entrypoint.clone(),
        }))
    }

    fn inject_script(&self, src: &str) -> Result<ScriptInjection, LoadScriptError> {
        let load_error = || LoadScriptError {
            src: src.to_string(),
        };
        let document = document().ok_or_else(load_error)?;
        let script = document
            .create_element("script")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
            .ok_or_else(load_error)?;
        script.set_src(src);

        let (tx, rx) = oneshot::channel::<bool>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let settle = move |loaded: bool| {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(loaded);
                }
            })
        };
        let onload = settle(true);
        let onerror = settle(false);
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let body = document.body().ok_or_else(load_error)?;
        body.append_child(&script).map_err(|_| load_error())?;
        tracing::debug!(src, "Loader script injected");

        let owned_src = src.to_string();
        let loaded = Box::pin(async move {
            match rx.await {
                Ok(true) => Ok(()),
                // Ok(false) is the error event; Err means the node was removed first
                Ok(false) | Err(_) => Err(LoadScriptError { src: owned_src }),
            }
        });
        Ok(ScriptInjection {
            node: Box::new(WasmScript {
                script,
                handlers: RefCell::new(Some((onload, onerror))),
            }),
            loaded,
        })
    }
}

/// Injected `<script>` plus the handlers it keeps alive
struct WasmScript {
    script: HtmlScriptElement,
    handlers: RefCell<Option<(Closure<dyn FnMut()>, Closure<dyn FnMut()>)>>,
}

impl InjectedScript for WasmScript {
    fn remove(&self) {
        let Some(handlers) = self.handlers.borrow_mut().take() else {
            return;
        };
        self.script.set_onload(None);
        self.script.set_onerror(None);
        self.script.remove();
        drop(handlers);
    }
}

struct WasmSurface {
    canvas: HtmlCanvasElement,
    entrypoint: String,
}

impl WasmSurface {
    fn rejected(reason: String) -> InstanceFuture {
        Box::pin(future::ready(Err(InstantiationError::Rejected(reason))))
    }
}

impl RuntimeSurface for WasmSurface {
    fn instantiate(&self, config: &RuntimeConfig, mut on_progress: ProgressCallback) -> InstanceFuture {
        let Some(window) = web_sys::window() else {
            return Self::rejected("no window".to_string());
        };
        let Some(entrypoint) = method(window.as_ref(), &self.entrypoint) else {
            return Box::pin(future::ready(Err(InstantiationError::EntrypointMissing {
                entrypoint: self.entrypoint.clone(),
            })));
        };
        let js_config = match serde_wasm_bindgen::to_value(config) {
            Ok(value) => value,
            Err(e) => return Self::rejected(e.to_string()),
        };

        let progress = Closure::<dyn FnMut(f64)>::new(move |fraction: f64| on_progress(fraction));
        let returned = entrypoint.call3(
            &JsValue::NULL,
            self.canvas.as_ref(),
            &js_config,
            progress.as_ref(),
        );
        let promise = match returned {
            Ok(value) => match value.dyn_into::<Promise>() {
                Ok(promise) => promise,
                Err(_) => return Self::rejected("entrypoint did not return a promise".to_string()),
            },
            Err(e) => return Self::rejected(describe(&e)),
        };

        Box::pin(async move {
            match JsFuture::from(promise).await {
                Ok(instance) => Ok(Box::new(WasmInstance {
                    instance,
                    _progress: progress,
                }) as Box<dyn RuntimeInstance>),
                Err(e) => Err(InstantiationError::Rejected(describe(&e))),
            }
        })
    }
}

/// A live runtime; `Quit()` is its optional shutdown
struct WasmInstance {
    instance: JsValue,
    // The runtime may keep reporting progress after resolving
    _progress: Closure<dyn FnMut(f64)>,
}

impl RuntimeInstance for WasmInstance {
    fn can_shutdown(&self) -> bool {
        method(&self.instance, "Quit").is_some()
    }

    fn shutdown(&self) -> Result<(), ShutdownError> {
        let quit = method(&self.instance, "Quit")
            .ok_or_else(|| ShutdownError("Quit unavailable".to_string()))?;
        quit.call0(&self.instance)
            .map(|_| ())
            .map_err(|e| ShutdownError(describe(&e)))?;
        tracing::info!("Runtime shut down");
        Ok(())
    }
}
