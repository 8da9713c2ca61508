//! Load progression of a runtime session

use serde::{Deserialize, Serialize};

/// Where a runtime session is in its load lifecycle
///
/// `Loading` progress is a fraction in `0.0..=1.0` and never decreases within
/// one session; see [`LoadState::advance`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading(f64),
    Ready,
    Failed(String),
}

impl LoadState {
    /// Initial state of a freshly started session
    pub fn loading() -> Self {
        LoadState::Loading(0.0)
    }

    /// Apply a progress report.
    ///
    /// Returns the new state if the report moves progress forward, `None` when
    /// it must be ignored (not loading, NaN, or not greater than the current value).
    pub fn advance(&self, reported: f64) -> Option<LoadState> {
        let LoadState::Loading(current) = self else {
            return None;
        };
        if reported.is_nan() {
            return None;
        }
        let next = reported.clamp(0.0, 1.0);
        if next > *current {
            Some(LoadState::Loading(next))
        } else {
            None
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    /// True for any state that belongs to a started session
    pub fn is_started(&self) -> bool {
        !matches!(self, LoadState::NotStarted)
    }

    /// Loading progress, if loading
    pub fn progress(&self) -> Option<f64> {
        match self {
            LoadState::Loading(p) => Some(*p),
            _ => None,
        }
    }

    /// Rounded percentage for the progress bar
    pub fn percent(&self) -> Option<u8> {
        self.progress().map(|p| (p * 100.0).round() as u8)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_forward() {
        let state = LoadState::loading();
        let next = state.advance(0.3).expect("forward progress");
        assert_eq!(next, LoadState::Loading(0.3));
        assert_eq!(next.advance(1.0), Some(LoadState::Loading(1.0)));
    }

    #[test]
    fn test_advance_ignores_regression_and_repeats() {
        let state = LoadState::Loading(0.5);
        assert_eq!(state.advance(0.4), None);
        assert_eq!(state.advance(0.5), None);
        assert_eq!(state.advance(f64::NAN), None);
    }

    #[test]
    fn test_advance_clamps_out_of_range() {
        let state = LoadState::Loading(0.9);
        assert_eq!(state.advance(7.0), Some(LoadState::Loading(1.0)));
        assert_eq!(LoadState::loading().advance(-1.0), None);
    }

    #[test]
    fn test_advance_outside_loading_is_ignored() {
        assert_eq!(LoadState::Ready.advance(0.5), None);
        assert_eq!(LoadState::NotStarted.advance(0.5), None);
        assert_eq!(LoadState::Failed("x".into()).advance(0.5), None);
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(LoadState::Loading(0.456).percent(), Some(46));
        assert_eq!(LoadState::Ready.percent(), None);
    }
}
