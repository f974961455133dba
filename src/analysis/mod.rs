//! Analysis and result aggregation modules
//!
//! - Frequency filtering of extracted peaks
//! - Result types
//! - Metadata

pub mod filter;
pub mod metadata;
pub mod result;
