//! Device classification
//!
//! Mobile detection is user-agent based against a fixed signature list.
//! Orientation comes from the viewport aspect and only matters on mobile.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static MOBILE_UA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("valid regex")
});

/// Whether the user agent carries one of the known mobile signatures
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA_RE.is_match(user_agent)
}

/// Inner viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Client classification used for fullscreen fallback and orientation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub is_mobile: bool,
    /// Only ever true when `is_mobile`
    pub is_portrait: bool,
}

impl DeviceProfile {
    /// Classify a client. Missing inputs fall back to desktop/landscape.
    pub fn classify(user_agent: Option<&str>, viewport: Option<Viewport>) -> Self {
        let is_mobile = user_agent.is_some_and(is_mobile_user_agent);
        Self {
            is_mobile,
            is_portrait: is_mobile && viewport.is_some_and(|v| v.is_portrait()),
        }
    }

    /// Recompute orientation for a new viewport, keeping the device class
    pub fn with_viewport(self, viewport: Option<Viewport>) -> Self {
        Self {
            is_mobile: self.is_mobile,
            is_portrait: self.is_mobile && viewport.is_some_and(|v| v.is_portrait()),
        }
    }

    /// Mobile held in portrait
    pub fn wants_landscape(&self) -> bool {
        self.is_mobile && self.is_portrait
    }
}
