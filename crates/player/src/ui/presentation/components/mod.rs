//! Reusable UI components

mod error_fallback;
mod game_track;
mod track_overlays;
mod variant_selector;

pub use error_fallback::ErrorFallback;
pub use game_track::GameTrack;
pub use track_overlays::TrackOverlays;
pub use variant_selector::VariantSelector;
