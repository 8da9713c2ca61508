//! Site routes
//!
//! Every page renders inside `SiteLayout`, which owns the header navigation,
//! the page-level error boundary and the `footer` hidden while a game session
//! is active.

use dioxus::prelude::*;

mod game;
mod landing;
mod tokenomics;

pub use game::GameRoute;
pub use landing::LandingRoute;
pub use tokenomics::TokenomicsRoute;

use crate::ui::presentation::components::ErrorFallback;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        LandingRoute {},
        #[route("/game")]
        GameRoute {},
        #[route("/tokenomics")]
        TokenomicsRoute {},
    #[end_layout]
    #[route("/:..segments")]
    NotFoundRoute { segments: Vec<String> },
}

#[component]
fn SiteLayout() -> Element {
    rsx! {
        header {
            class: "site-header",
            Link { class: "site-brand", to: Route::LandingRoute {}, "TurboChain Racing" }
            nav {
                class: "site-nav",
                Link { to: Route::GameRoute {}, "Play" }
                Link { to: Route::TokenomicsRoute {}, "Tokenomics" }
            }
        }

        main {
            class: "site-main",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    ErrorFallback { details: format!("{:?}", errors) }
                },
                Outlet::<Route> {}
            }
        }

        footer {
            class: "site-footer",
            "TurboChain Racing · Built on-chain, raced in the browser"
        }
    }
}

#[component]
fn NotFoundRoute(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    tracing::debug!(%path, "Unknown route");
    rsx! {
        section {
            class: "page page--center",
            h1 { "Track not found" }
            p { "There is no page at /{path}." }
            Link { class: "btn btn--primary", to: Route::LandingRoute {}, "Back to the start line" }
        }
    }
}
