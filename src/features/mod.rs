//! Feature extraction modules
//!
//! - Onset envelope (energy flux)
//! - Beat tracking (tempo + beat positions)
//! - Beat segmentation
//! - Spectral peak extraction per segment
//! - Nearest-note mapping

pub mod beat_tracking;
pub mod notes;
pub mod onset;
pub mod segmentation;
pub mod spectral_peak;
