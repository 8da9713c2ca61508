//! Overlay selection for the embedding shell
//!
//! Which overlays sit on top of the mount surface is a pure function of the
//! session's load state, presentation mode, device profile, the dismissible
//! maximize hint, and the selected variant.

use serde::Serialize;

use crate::{DeviceProfile, LoadState, PresentationMode, RuntimeVariant};

/// Icon shown on the always-present fullscreen toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleIcon {
    Maximize,
    Minimize,
}

/// Inputs to overlay selection
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayInputs<'a> {
    pub load: &'a LoadState,
    pub mode: PresentationMode,
    pub device: DeviceProfile,
    pub hint_dismissed: bool,
    pub variant: RuntimeVariant,
}

/// Overlays to render on top of the mount surface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlays {
    /// "Click to play fullscreen" hint
    pub maximize_hint: bool,
    pub toggle_icon: ToggleIcon,
    /// "Rotate your device" banner
    pub orientation_warning: bool,
    /// Progress percentage while loading
    pub loading: Option<u8>,
    pub error: Option<String>,
    pub demo_badge: bool,
    /// Overlays are pinned to the viewport instead of the panel
    pub pinned: bool,
}

impl Overlays {
    pub fn compute(inputs: OverlayInputs<'_>) -> Self {
        let fullscreen = inputs.mode.is_fullscreen();
        Self {
            maximize_hint: !fullscreen && !inputs.hint_dismissed,
            toggle_icon: if fullscreen {
                ToggleIcon::Minimize
            } else {
                ToggleIcon::Maximize
            },
            orientation_warning: inputs.device.wants_landscape(),
            loading: inputs.load.percent(),
            error: inputs.load.error_message().map(str::to_string),
            demo_badge: inputs.variant.is_demo(),
            pinned: fullscreen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(load: &LoadState) -> OverlayInputs<'_> {
        OverlayInputs {
            load,
            mode: PresentationMode::Windowed,
            device: DeviceProfile::default(),
            hint_dismissed: false,
            variant: RuntimeVariant::Primary,
        }
    }

    #[test]
    fn test_windowed_loading_shows_hint_and_progress() {
        let load = LoadState::Loading(0.3);
        let overlays = Overlays::compute(inputs(&load));

        assert!(overlays.maximize_hint);
        assert_eq!(overlays.loading, Some(30));
        assert_eq!(overlays.error, None);
        assert_eq!(overlays.toggle_icon, ToggleIcon::Maximize);
        assert!(!overlays.pinned);
        assert!(!overlays.demo_badge);
    }

    #[test]
    fn test_fullscreen_hides_hint_and_pins() {
        let load = LoadState::Ready;
        let overlays = Overlays::compute(OverlayInputs {
            mode: PresentationMode::Fullscreen,
            ..inputs(&load)
        });

        assert!(!overlays.maximize_hint);
        assert!(overlays.pinned);
        assert_eq!(overlays.toggle_icon, ToggleIcon::Minimize);
        assert_eq!(overlays.loading, None);
    }

    #[test]
    fn test_dismissed_hint_stays_hidden() {
        let load = LoadState::Ready;
        let overlays = Overlays::compute(OverlayInputs {
            hint_dismissed: true,
            ..inputs(&load)
        });
        assert!(!overlays.maximize_hint);
    }

    #[test]
    fn test_error_banner_only_when_failed() {
        let load = LoadState::Failed("script load error".to_string());
        let overlays = Overlays::compute(inputs(&load));
        assert_eq!(overlays.error.as_deref(), Some("script load error"));
        assert_eq!(overlays.loading, None);
    }

    #[test]
    fn test_orientation_warning_needs_mobile_portrait() {
        let load = LoadState::Ready;
        let portrait = DeviceProfile {
            is_mobile: true,
            is_portrait: true,
        };
        let landscape = DeviceProfile {
            is_mobile: true,
            is_portrait: false,
        };

        let shown = Overlays::compute(OverlayInputs {
            device: portrait,
            ..inputs(&load)
        });
        let hidden = Overlays::compute(OverlayInputs {
            device: landscape,
            ..inputs(&load)
        });

        assert!(shown.orientation_warning);
        assert!(!hidden.orientation_warning);
    }

    #[test]
    fn test_demo_badge_for_touch_build() {
        let load = LoadState::NotStarted;
        let overlays = Overlays::compute(OverlayInputs {
            variant: RuntimeVariant::TouchDemo,
            ..inputs(&load)
        });
        assert!(overlays.demo_badge);
    }
}
