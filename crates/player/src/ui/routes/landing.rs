//! Landing page

use dioxus::prelude::*;

use super::Route;

/// Hero section with the two entry points
#[component]
pub fn LandingRoute() -> Element {
    rsx! {
        section {
            class: "page hero",
            h1 {
                class: "hero-title",
                "TurboChain "
                span { class: "hero-title__accent", "Racing" }
            }
            p {
                class: "hero-tagline",
                "Experience the future of racing with NFTs and crypto rewards"
            }
            div {
                class: "hero-actions",
                Link { class: "btn btn--primary", to: Route::GameRoute {}, "Start Racing →" }
                Link { class: "btn btn--ghost", to: Route::TokenomicsRoute {}, "Tokenomics" }
            }
        }
    }
}
