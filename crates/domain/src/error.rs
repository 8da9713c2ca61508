//! Error taxonomy for the runtime embedding
//!
//! Load-path errors (`LoadScriptError`, `InstantiationError`) end the current
//! session and surface in the error banner. Fullscreen and shutdown errors are
//! recovered locally by the caller and only ever logged.

use thiserror::Error;

/// The variant's loader script failed to load (network or script-tag failure)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("script load error")]
pub struct LoadScriptError {
    /// Source URL of the script that failed
    pub src: String,
}

/// The runtime could not be instantiated
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    /// The loader script ran but did not install the instantiation entrypoint
    #[error("runtime entrypoint missing: {entrypoint}")]
    EntrypointMissing { entrypoint: String },

    /// No drawing surface could be created at the mount surface
    #[error("mount surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The runtime rejected its creation promise
    #[error("runtime rejected instantiation: {0}")]
    Rejected(String),

    /// Script load plus instantiation exceeded the configured bound
    #[error("load timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },
}

/// The platform denied or threw on a fullscreen request/exit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("fullscreen request failed: {0}")]
pub struct FullscreenRequestError(pub String);

/// The runtime handle's shutdown operation threw
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("runtime shutdown failed: {0}")]
pub struct ShutdownError(pub String);

/// Terminal failure of a load session
///
/// The `Display` text is what the error banner shows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("script load error")]
    Script(#[from] LoadScriptError),

    #[error("load timed out")]
    TimedOut { timeout_ms: u64 },

    #[error("runtime instantiation failed")]
    Instantiation(InstantiationError),
}

impl From<InstantiationError> for LoadError {
    fn from(e: InstantiationError) -> Self {
        match e {
            InstantiationError::TimedOut { timeout_ms } => LoadError::TimedOut { timeout_ms },
            other => LoadError::Instantiation(other),
        }
    }
}

impl LoadError {
    /// Message shown to the user
    pub fn banner_message(&self) -> String {
        self.to_string()
    }

    /// Detailed description for logs
    pub fn detail(&self) -> String {
        match self {
            LoadError::Script(e) => format!("{} ({})", e, e.src),
            LoadError::TimedOut { timeout_ms } => format!("load timed out after {timeout_ms} ms"),
            LoadError::Instantiation(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_banner_text() {
        let err = LoadError::from(LoadScriptError {
            src: "/Build/WebGL Builds.loader.js".to_string(),
        });
        assert_eq!(err.banner_message(), "script load error");
        assert!(err.detail().contains("WebGL Builds.loader.js"));
    }

    #[test]
    fn test_instantiation_errors_share_banner_text() {
        let missing = LoadError::from(InstantiationError::EntrypointMissing {
            entrypoint: "createUnityInstance".to_string(),
        });
        let rejected = LoadError::from(InstantiationError::Rejected("boom".to_string()));

        assert_eq!(missing.banner_message(), "runtime instantiation failed");
        assert_eq!(rejected.banner_message(), "runtime instantiation failed");
        assert!(rejected.detail().contains("boom"));
    }

    #[test]
    fn test_timeout_maps_to_its_own_variant() {
        let err = LoadError::from(InstantiationError::TimedOut { timeout_ms: 5 });
        assert_eq!(err, LoadError::TimedOut { timeout_ms: 5 });
        assert_eq!(err.banner_message(), "load timed out");
    }
}
