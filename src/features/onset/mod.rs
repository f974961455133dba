//! Onset strength
//!
//! Energy flux envelope feeding the beat tracker.

pub mod energy_flux;
