//! Audio I/O modules
//!
//! Audio decoding using Symphonia and the decoded signal type.

pub mod decoder;
pub mod signal;

pub use signal::AudioSignal;
