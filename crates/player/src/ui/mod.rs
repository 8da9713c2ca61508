use dioxus::prelude::*;

pub mod presentation;
pub mod routes;

pub use routes::Route;

use crate::application::EmbedConfig;
use crate::state::{Platform, PlatformFactory};

/// Shell variant for UI layout selection.
/// This is passed via Dioxus context from the composition root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShellKind {
    #[default]
    Desktop,
    Mobile,
}

impl ShellKind {
    /// Layout for a window of the given width
    pub fn for_width(width: f64) -> Self {
        if width < 768.0 {
            ShellKind::Mobile
        } else {
            ShellKind::Desktop
        }
    }
}

/// Hook to access the Platform from Dioxus context
pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

/// Hook to access the embedding configuration from Dioxus context
pub fn use_embed_config() -> EmbedConfig {
    use_context::<EmbedConfig>()
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let shell = use_context::<ShellKind>();
    let config = use_context::<EmbedConfig>();
    let factory = use_context::<PlatformFactory>();

    // Must be created inside the Dioxus runtime; the platform is not `Send`.
    use_context_provider(move || factory.build(&config));

    rsx! {
        document::Title { "TurboChain Racing" }
        document::Style { {presentation::SITE_CSS} }

        div {
            class: match shell {
                ShellKind::Desktop => "site site--desktop",
                ShellKind::Mobile => "site site--mobile",
            },
            Router::<routes::Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_kind_breakpoint() {
        assert_eq!(ShellKind::for_width(375.0), ShellKind::Mobile);
        assert_eq!(ShellKind::for_width(767.9), ShellKind::Mobile);
        assert_eq!(ShellKind::for_width(768.0), ShellKind::Desktop);
        assert_eq!(ShellKind::for_width(1920.0), ShellKind::Desktop);
    }
}
