//! Last-resort page for errors caught by the route error boundary

use dioxus::prelude::*;

/// Props for the ErrorFallback component
#[derive(Props, Clone, PartialEq)]
pub struct ErrorFallbackProps {
    /// Debug rendering of the captured error
    pub details: String,
}

#[component]
pub fn ErrorFallback(props: ErrorFallbackProps) -> Element {
    tracing::error!("Page error boundary caught: {}", props.details);

    rsx! {
        section {
            class: "error-fallback",
            h1 { "Something went wrong" }
            p { "This page crashed. Reloading usually gets you back on track." }
            button {
                class: "btn btn--primary",
                onclick: move |_| reload_page(),
                "Reload page"
            }
            p { class: "error-details", "{props.details}" }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn reload_page() {
    let reloaded = web_sys::window().map(|window| window.location().reload());
    if let Some(Err(e)) = reloaded {
        tracing::error!("Page reload failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reload_page() {
    tracing::warn!("Page reload is only available in the browser");
}
