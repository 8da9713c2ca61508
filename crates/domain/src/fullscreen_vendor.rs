//! Fullscreen API name tables
//!
//! Browsers expose fullscreen under several names. Each vendor entry carries
//! the names of its request method (on the element), exit method and current
//! element accessor (on the document), and change event. Probing always walks
//! [`FullscreenVendor::PROBE_ORDER`].

/// One family of fullscreen API names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenVendor {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenVendor {
    /// Fixed probe order: standard first, then vendor prefixes
    pub const PROBE_ORDER: [FullscreenVendor; 4] = [
        FullscreenVendor::Standard,
        FullscreenVendor::Webkit,
        FullscreenVendor::Moz,
        FullscreenVendor::Ms,
    ];

    /// Element method that requests fullscreen
    pub fn request_method(&self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "requestFullscreen",
            FullscreenVendor::Webkit => "webkitRequestFullscreen",
            FullscreenVendor::Moz => "mozRequestFullScreen",
            FullscreenVendor::Ms => "msRequestFullscreen",
        }
    }

    /// Document method that leaves fullscreen
    pub fn exit_method(&self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "exitFullscreen",
            FullscreenVendor::Webkit => "webkitExitFullscreen",
            FullscreenVendor::Moz => "mozCancelFullScreen",
            FullscreenVendor::Ms => "msExitFullscreen",
        }
    }

    /// Document property holding the current fullscreen element
    pub fn element_property(&self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "fullscreenElement",
            FullscreenVendor::Webkit => "webkitFullscreenElement",
            FullscreenVendor::Moz => "mozFullScreenElement",
            FullscreenVendor::Ms => "msFullscreenElement",
        }
    }

    /// Document event fired on fullscreen changes
    pub fn change_event(&self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "fullscreenchange",
            FullscreenVendor::Webkit => "webkitfullscreenchange",
            FullscreenVendor::Moz => "mozfullscreenchange",
            FullscreenVendor::Ms => "MSFullscreenChange",
        }
    }

    /// First vendor in probe order accepted by `available`
    pub fn first_available(available: impl Fn(FullscreenVendor) -> bool) -> Option<Self> {
        Self::PROBE_ORDER.into_iter().find(|v| available(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_wins_when_present() {
        let found = FullscreenVendor::first_available(|_| true);
        assert_eq!(found, Some(FullscreenVendor::Standard));
    }

    #[test]
    fn test_prefixed_fallback_order() {
        let found = FullscreenVendor::first_available(|v| {
            matches!(v, FullscreenVendor::Moz | FullscreenVendor::Ms)
        });
        assert_eq!(found, Some(FullscreenVendor::Moz));
        assert_eq!(FullscreenVendor::first_available(|_| false), None);
    }

    #[test]
    fn test_moz_names_use_capital_s() {
        assert_eq!(FullscreenVendor::Moz.request_method(), "mozRequestFullScreen");
        assert_eq!(FullscreenVendor::Moz.exit_method(), "mozCancelFullScreen");
        assert_eq!(FullscreenVendor::Ms.change_event(), "MSFullscreenChange");
    }
}
