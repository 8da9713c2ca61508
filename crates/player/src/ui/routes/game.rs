//! Game page

use dioxus::prelude::*;

use crate::ui::presentation::components::GameTrack;

#[component]
pub fn GameRoute() -> Element {
    rsx! {
        section {
            class: "page game",
            h1 { "Race" }
            p { class: "game-intro", "Pick the build that matches your device, then hit start." }
            GameTrack {}
        }
    }
}
