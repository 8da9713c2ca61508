//! Overlays drawn on top of the runtime's mount surface

use dioxus::prelude::*;
use turbo_racing_domain::{Overlays, ToggleIcon};

/// Props for the TrackOverlays component
#[derive(Props, Clone, PartialEq)]
pub struct TrackOverlaysProps {
    pub overlays: Overlays,
    /// Fullscreen toggle (also fired by the maximize hint)
    pub on_toggle: EventHandler<()>,
    pub on_dismiss_hint: EventHandler<()>,
}

#[component]
pub fn TrackOverlays(props: TrackOverlaysProps) -> Element {
    let overlays = props.overlays;
    let (toggle_label, toggle_glyph) = match overlays.toggle_icon {
        ToggleIcon::Maximize => ("Enter fullscreen", "⛶"),
        ToggleIcon::Minimize => ("Exit fullscreen", "🗗"),
    };

    rsx! {
        if overlays.demo_badge {
            span { class: "overlay overlay-badge", "DEMO" }
        }

        button {
            class: "overlay overlay-toggle",
            title: toggle_label,
            aria_label: toggle_label,
            onclick: move |_| props.on_toggle.call(()),
            "{toggle_glyph}"
        }

        if let Some(percent) = overlays.loading {
            div {
                class: "overlay overlay-loading",
                "Loading… {percent}%"
                div {
                    class: "progress",
                    div { class: "progress-bar", style: "width: {percent}%" }
                }
            }
        }

        if overlays.maximize_hint {
            div {
                class: "overlay overlay-hint",
                button {
                    class: "overlay-hint__close",
                    title: "Hide hint",
                    aria_label: "Hide hint",
                    onclick: move |_| props.on_dismiss_hint.call(()),
                    "✕"
                }
                div {
                    class: "overlay-hint__body",
                    onclick: move |_| props.on_toggle.call(()),
                    span { class: "overlay-hint__icon", "⛶" }
                    p { "Click to play fullscreen" }
                }
            }
        }

        if let Some(message) = overlays.error.clone() {
            div {
                class: "overlay overlay-error",
                role: "alert",
                strong { "Failed to load the game: " }
                "{message}"
            }
        }

        if overlays.orientation_warning {
            div {
                class: "overlay overlay-rotate",
                h2 { "Rotate your device" }
                p { "The race plays in landscape. Turn your phone sideways to continue." }
            }
        }
    }
}
