//! Clustering modules
//!
//! Groups labeled spectral peaks around medoids:
//! - Pairwise distance matrix over peak frequencies
//! - Partitioning around medoids (PAM)

pub mod distance;
pub mod kmedoids;

pub use distance::DistanceMatrix;
pub use kmedoids::{cluster_points, Clustering, KMedoids};
