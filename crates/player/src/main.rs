//! Turbo Racing site - composition root binary.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turbo_racing_player::{EmbedConfig, ShellKind};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turbo_racing_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    tracing::info!("Starting Turbo Racing site");

    // Configuration: compiled-in defaults, then the page's meta overlay (web)
    // or TURBO_* variables (native)
    let config: EmbedConfig = {
        #[cfg(target_arch = "wasm32")]
        {
            turbo_racing_player::infrastructure::platform::read_embed_config()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            EmbedConfig::default().with_overrides(|key| std::env::var(key).ok())
        }
    };
    tracing::debug!(?config, "Embed configuration");

    // Shell kind (desktop vs mobile layout)
    let shell = {
        #[cfg(target_arch = "wasm32")]
        {
            let width = web_sys::window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|v| v.as_f64())
                .unwrap_or(1024.0);
            ShellKind::for_width(width)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::env::var("TURBO_SHELL")
                .ok()
                .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
                    "desktop" => Some(ShellKind::Desktop),
                    "mobile" => Some(ShellKind::Mobile),
                    _ => None,
                })
                .unwrap_or_default()
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        let platform = turbo_racing_player::state::PlatformFactory(
            turbo_racing_player::infrastructure::platform::create_platform,
        );

        dioxus::LaunchBuilder::new()
            .with_context(platform)
            .with_context(config)
            .with_context(shell)
            .launch(turbo_racing_player::app);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::error!(
            ?shell,
            "The site runs in the browser only; build for wasm32-unknown-unknown (dx serve)"
        );
        std::process::exit(1);
    }
}
