//! Game track panel
//!
//! Hosts one `EmbedShell` for the lifetime of the component. The mount element
//! is always rendered (the runtime host clears and fills it directly, so it
//! never gets Dioxus children); the panel around it is hidden until a session
//! starts.

use dioxus::prelude::*;
use turbo_racing_domain::{LoadState, RuntimeVariant};

use super::{TrackOverlays, VariantSelector};
use crate::application::services::{EmbedShell, ShellSnapshot};
use crate::ui::{use_embed_config, use_platform};

#[component]
pub fn GameTrack() -> Element {
    let platform = use_platform();
    let config = use_embed_config();

    let shell = use_hook({
        let config = config.clone();
        move || {
            let shell = EmbedShell::new(&platform, &config);
            shell.mount();
            shell
        }
    });
    let mut snapshot: Signal<ShellSnapshot> = use_signal({
        let shell = shell.clone();
        move || shell.snapshot()
    });
    use_hook({
        let shell = shell.clone();
        move || shell.set_on_change(move |next| snapshot.set(next.clone()))
    });
    use_drop({
        let shell = shell.clone();
        move || {
            // The snapshot signal is dropped together with this scope
            shell.clear_on_change();
            shell.unmount();
        }
    });

    let current = snapshot();
    let panel_class = match (current.started, current.overlays.pinned) {
        (false, _) => "game-panel game-panel--hidden",
        (true, true) => "game-panel game-panel--pinned",
        (true, false) => "game-panel",
    };

    let on_select = {
        let shell = shell.clone();
        move |variant: RuntimeVariant| {
            shell.select_variant(variant);
        }
    };
    let on_start = {
        let shell = shell.clone();
        move |_| {
            if let Some(task) = shell.start() {
                // Cancelled with this scope; the load task then detaches itself
                spawn(async move {
                    let settled = task.await;
                    if let LoadState::Failed(reason) = &settled {
                        tracing::warn!("Game session failed: {}", reason);
                    }
                });
            }
        }
    };
    let on_stop = {
        let shell = shell.clone();
        move |_| {
            let shell = shell.clone();
            spawn(async move { shell.stop().await });
        }
    };
    let on_toggle = {
        let shell = shell.clone();
        move |_| {
            let shell = shell.clone();
            spawn(async move { shell.toggle_fullscreen().await });
        }
    };
    let on_dismiss_hint = {
        let shell = shell.clone();
        move |_| shell.dismiss_hint()
    };

    rsx! {
        div {
            class: "game-track",

            if !current.started {
                VariantSelector {
                    selected: current.variant,
                    enabled: current.selector_enabled,
                    on_select: on_select,
                }
                div {
                    class: "game-controls",
                    button {
                        class: "btn btn--primary",
                        onclick: on_start,
                        "Start Game"
                    }
                }
            }

            div {
                id: "{config.panel_element_id}",
                class: panel_class,
                div { id: "{config.mount_element_id}", class: "game-mount" }
                if current.started {
                    TrackOverlays {
                        overlays: current.overlays.clone(),
                        on_toggle: on_toggle,
                        on_dismiss_hint: on_dismiss_hint,
                    }
                }
            }

            if current.started {
                div {
                    class: "game-controls",
                    button {
                        class: "btn btn--ghost",
                        onclick: on_stop,
                        "Stop and Change Version"
                    }
                }
            }
        }
    }
}
