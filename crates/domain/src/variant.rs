//! Runtime build variants and their configuration bundles
//!
//! Each variant names one compiled build of the external runtime. The build
//! ships a loader script plus brotli-compressed data, framework and code
//! payloads that all share the build's base name.

use serde::{Deserialize, Serialize};

/// Which build of the external runtime to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeVariant {
    /// Keyboard and mouse build
    #[default]
    Primary,
    /// Touch-optimized demo build
    TouchDemo,
}

impl RuntimeVariant {
    pub const ALL: [RuntimeVariant; 2] = [RuntimeVariant::Primary, RuntimeVariant::TouchDemo];

    /// Stable wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "primary",
            RuntimeVariant::TouchDemo => "touch-demo",
        }
    }

    /// Base file name of the build inside the build directory
    pub fn build_name(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "WebGL Builds",
            RuntimeVariant::TouchDemo => "WebGL Builds Touch",
        }
    }

    /// Product name reported to the runtime
    pub fn product_name(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "Turbo racing",
            RuntimeVariant::TouchDemo => "Turbo racing Touch DEMO",
        }
    }

    /// Label for the variant selector
    pub fn label(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "PC Version",
            RuntimeVariant::TouchDemo => "Touch Version",
        }
    }

    /// Heading shown on the start panel
    pub fn title(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "PC Version",
            RuntimeVariant::TouchDemo => "Touch Version (DEMO)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuntimeVariant::Primary => "Optimized for keyboard and mouse play",
            RuntimeVariant::TouchDemo => "Optimized for touch devices",
        }
    }

    /// Whether the build is a demo (shows the DEMO badge)
    pub fn is_demo(&self) -> bool {
        matches!(self, RuntimeVariant::TouchDemo)
    }
}

impl std::fmt::Display for RuntimeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuntimeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "pc" => Ok(RuntimeVariant::Primary),
            "touch-demo" | "touch" => Ok(RuntimeVariant::TouchDemo),
            other => Err(format!("unknown runtime variant: {other}")),
        }
    }
}

/// Where builds are served from and the metadata shared by all variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildSettings {
    /// Directory that holds every build, without trailing slash
    pub base_path: String,
    pub streaming_assets_url: String,
    pub company_name: String,
    pub product_version: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            base_path: "/Build".to_string(),
            streaming_assets_url: "StreamingAssets".to_string(),
            company_name: "Saritu.eth".to_string(),
            product_version: "1".to_string(),
        }
    }
}

impl BuildSettings {
    fn asset(&self, variant: RuntimeVariant, suffix: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        format!("{}/{}{}", base, variant.build_name(), suffix)
    }

    /// URL of the variant's loader script
    pub fn loader_url(&self, variant: RuntimeVariant) -> String {
        self.asset(variant, ".loader.js")
    }

    /// Configuration bundle handed to the runtime's instantiation entrypoint
    pub fn runtime_config(&self, variant: RuntimeVariant) -> RuntimeConfig {
        RuntimeConfig {
            data_url: self.asset(variant, ".data.br"),
            framework_url: self.asset(variant, ".framework.js.br"),
            code_url: self.asset(variant, ".wasm.br"),
            streaming_assets_url: self.streaming_assets_url.clone(),
            company_name: self.company_name.clone(),
            product_name: variant.product_name().to_string(),
            product_version: self.product_version.clone(),
        }
    }
}

/// Configuration bundle for one runtime instantiation
///
/// Serialized in camelCase, which is the shape the runtime loader expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub data_url: String,
    pub framework_url: String,
    pub code_url: String,
    pub streaming_assets_url: String,
    pub company_name: String,
    pub product_name: String,
    pub product_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_bundle_paths() {
        let settings = BuildSettings::default();
        let config = settings.runtime_config(RuntimeVariant::Primary);

        assert_eq!(
            settings.loader_url(RuntimeVariant::Primary),
            "/Build/WebGL Builds.loader.js"
        );
        assert_eq!(config.data_url, "/Build/WebGL Builds.data.br");
        assert_eq!(config.framework_url, "/Build/WebGL Builds.framework.js.br");
        assert_eq!(config.code_url, "/Build/WebGL Builds.wasm.br");
        assert_eq!(config.product_name, "Turbo racing");
    }

    #[test]
    fn test_touch_bundle_paths() {
        let settings = BuildSettings::default();
        let config = settings.runtime_config(RuntimeVariant::TouchDemo);

        assert_eq!(
            settings.loader_url(RuntimeVariant::TouchDemo),
            "/Build/WebGL Builds Touch.loader.js"
        );
        assert_eq!(config.code_url, "/Build/WebGL Builds Touch.wasm.br");
        assert_eq!(config.product_name, "Turbo racing Touch DEMO");
        assert!(RuntimeVariant::TouchDemo.is_demo());
    }

    #[test]
    fn test_base_path_trailing_slash_is_ignored() {
        let settings = BuildSettings {
            base_path: "https://cdn.example.com/builds/".to_string(),
            ..BuildSettings::default()
        };
        assert_eq!(
            settings.loader_url(RuntimeVariant::Primary),
            "https://cdn.example.com/builds/WebGL Builds.loader.js"
        );
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = BuildSettings::default().runtime_config(RuntimeVariant::Primary);
        let json = serde_json::to_value(&config).expect("serialize");

        assert_eq!(json["dataUrl"], "/Build/WebGL Builds.data.br");
        assert_eq!(json["streamingAssetsUrl"], "StreamingAssets");
        assert_eq!(json["companyName"], "Saritu.eth");
        assert_eq!(json["productVersion"], "1");
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("pc".parse::<RuntimeVariant>(), Ok(RuntimeVariant::Primary));
        assert_eq!(
            " Touch-Demo ".parse::<RuntimeVariant>(),
            Ok(RuntimeVariant::TouchDemo)
        );
        assert!("console".parse::<RuntimeVariant>().is_err());
    }
}
