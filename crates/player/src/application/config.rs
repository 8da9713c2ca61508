//! Embedding configuration
//!
//! Compiled-in defaults, overridable from `TURBO_*` environment variables on
//! native and from a `<meta name="turbo-config">` JSON blob on the web.

use serde::{Deserialize, Serialize};
use turbo_racing_domain::BuildSettings;

/// Default upper bound for script load plus instantiation
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 120_000;

/// Name of the global instantiation entrypoint installed by the loader script
pub const DEFAULT_ENTRYPOINT: &str = "createUnityInstance";

/// Configuration for the runtime embedding component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedConfig {
    pub build: BuildSettings,
    /// Id of the element the runtime is mounted into
    pub mount_element_id: String,
    /// Id of the panel shown fullscreen (mount surface plus overlays)
    pub panel_element_id: String,
    /// Selector of the page chrome hidden while a session is active
    pub chrome_selector: String,
    pub entrypoint: String,
    /// `None` disables the load timeout
    pub load_timeout_ms: Option<u64>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            build: BuildSettings::default(),
            mount_element_id: "unity-container".to_string(),
            panel_element_id: "game-panel".to_string(),
            chrome_selector: "footer".to_string(),
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            load_timeout_ms: Some(DEFAULT_LOAD_TIMEOUT_MS),
        }
    }
}

impl EmbedConfig {
    /// Parse a JSON overlay; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply overrides from a variable lookup (`std::env::var` on native)
    ///
    /// `TURBO_LOAD_TIMEOUT_MS=0` disables the timeout. Unparseable values are
    /// logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup("TURBO_BUILD_BASE") {
            self.build.base_path = base;
        }
        if let Some(raw) = lookup("TURBO_LOAD_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.load_timeout_ms = None,
                Ok(ms) => self.load_timeout_ms = Some(ms),
                Err(e) => tracing::warn!("Ignoring TURBO_LOAD_TIMEOUT_MS={:?}: {}", raw, e),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EmbedConfig::default();
        assert_eq!(config.mount_element_id, "unity-container");
        assert_eq!(config.panel_element_id, "game-panel");
        assert_eq!(config.chrome_selector, "footer");
        assert_eq!(config.load_timeout_ms, Some(DEFAULT_LOAD_TIMEOUT_MS));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EmbedConfig::from_json(r#"{"loadTimeoutMs": 5000, "build": {"basePath": "/cdn"}}"#)
                .expect("valid json");

        assert_eq!(config.load_timeout_ms, Some(5000));
        assert_eq!(config.build.base_path, "/cdn");
        assert_eq!(config.build.company_name, "Saritu.eth");
        assert_eq!(config.entrypoint, DEFAULT_ENTRYPOINT);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("TURBO_BUILD_BASE", "/games"), ("TURBO_LOAD_TIMEOUT_MS", "0")]);
        let config = EmbedConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.build.base_path, "/games");
        assert_eq!(config.load_timeout_ms, None);
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let config = EmbedConfig::default().with_overrides(|key| {
            (key == "TURBO_LOAD_TIMEOUT_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.load_timeout_ms, Some(DEFAULT_LOAD_TIMEOUT_MS));
    }
}
