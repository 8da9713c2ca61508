//! Presentation mode of the mount container

use serde::{Deserialize, Serialize};

/// Whether the runtime is shown in-page or covering the whole viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresentationMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl PresentationMode {
    pub fn from_active(active: bool) -> Self {
        if active {
            PresentationMode::Fullscreen
        } else {
            PresentationMode::Windowed
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self, PresentationMode::Fullscreen)
    }
}
