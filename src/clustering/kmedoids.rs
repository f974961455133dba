//! Partitioning around medoids (PAM)
//!
//! Clusters scalar values into `k` groups, each anchored by one of the input
//! points.
//!
//! # Algorithm
//!
//! 1. Precompute the pairwise `|a - b|` distance matrix
//! 2. Draw `k` distinct initial medoids uniformly at random
//! 3. Until the medoid set stops changing or `max_iterations` passes have run:
//!    - assign each point to its nearest medoid (lower cluster index on ties)
//!    - in every non-empty cluster, make the member with the smallest summed
//!      distance to the other members the new medoid (earliest member on ties)
//!    - empty clusters keep their medoid
//! 4. Reassign every point to the final medoids
//!
//! PAM converges to a local minimum that depends on the initial draw. Pass a
//! seeded RNG for reproducible results.
//!
//! # Example
//!
//! ```
//! use audio_kmedoids::clustering::KMedoids;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let frequencies = [100.0, 102.0, 498.0, 500.0, 502.0];
//! let mut rng = StdRng::seed_from_u64(7);
//! let clustering = KMedoids::new(2).fit(&frequencies, &mut rng)?;
//!
//! assert_eq!(clustering.assignments.len(), frequencies.len());
//! # Ok::<(), audio_kmedoids::AnalysisError>(())
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distance::DistanceMatrix;
use crate::analysis::result::DataPoint;
use crate::error::AnalysisError;

/// Default cap on assignment/update passes
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Outcome of one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// Point index of each cluster's medoid
    pub medoids: Vec<usize>,

    /// Cluster index of each point, in input order
    pub assignments: Vec<usize>,

    /// Number of assignment/update passes performed
    pub iterations: usize,

    /// True if the medoid set stopped changing before the iteration cap
    pub converged: bool,

    /// Sum of distances from every point to its medoid
    pub total_cost: f64,
}

impl Clustering {
    /// Point indices belonging to each cluster, in input order
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        group_by_cluster(&self.assignments, self.medoids.len())
    }

    /// Medoid point index for point `i`
    pub fn medoid_of(&self, i: usize) -> usize {
        self.medoids[self.assignments[i]]
    }
}

/// K-medoids clusterer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMedoids {
    k: usize,
    max_iterations: usize,
}

impl KMedoids {
    /// Create a clusterer for `k` clusters with the default iteration cap
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the maximum number of assignment/update passes
    ///
    /// A cap of 1 runs a single refinement pass before the final assignment.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Number of clusters
    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum number of assignment/update passes
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Cluster `values` starting from medoids drawn with `rng`
    ///
    /// # Errors
    ///
    /// * `AnalysisError::InvalidInput` if `k` is 0
    /// * `AnalysisError::ClusterSize` if `k` exceeds the number of values
    pub fn fit<R>(&self, values: &[f64], rng: &mut R) -> Result<Clustering, AnalysisError>
    where
        R: Rng + ?Sized,
    {
        self.check_size(values.len())?;

        let distances = DistanceMatrix::from_values(values);
        let initial = rand::seq::index::sample(rng, values.len(), self.k).into_vec();

        log::debug!(
            "K-medoids: {} points, k={}, initial medoids {:?}",
            values.len(),
            self.k,
            initial
        );

        self.fit_from(&distances, initial)
    }

    /// Cluster using a precomputed distance matrix and explicit initial medoids
    ///
    /// # Errors
    ///
    /// * `AnalysisError::InvalidInput` if `k` is 0, or `initial` does not hold
    ///   `k` distinct in-range indices
    /// * `AnalysisError::ClusterSize` if `k` exceeds the number of points
    pub fn fit_from(
        &self,
        distances: &DistanceMatrix,
        initial: Vec<usize>,
    ) -> Result<Clustering, AnalysisError> {
        self.check_size(distances.len())?;

        if initial.len() != self.k {
            return Err(AnalysisError::InvalidInput(format!(
                "Expected {} initial medoids, got {}",
                self.k,
                initial.len()
            )));
        }

        if let Some(&bad) = initial.iter().find(|&&m| m >= distances.len()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Initial medoid {} out of range for {} points",
                bad,
                distances.len()
            )));
        }

        let mut sorted = initial.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != initial.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "Initial medoids must be distinct: {:?}",
                initial
            )));
        }

        let mut medoids = initial;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let assignments = assign(distances, &medoids);
            let clusters = group_by_cluster(&assignments, self.k);

            let mut new_medoids = medoids.clone();
            for (cluster, members) in clusters.iter().enumerate() {
                if let Some(best) = best_medoid(distances, members) {
                    new_medoids[cluster] = best;
                }
            }

            if new_medoids == medoids {
                converged = true;
                break;
            }

            medoids = new_medoids;
        }

        let assignments = assign(distances, &medoids);
        let total_cost: f64 = assignments
            .iter()
            .enumerate()
            .map(|(i, &cluster)| distances.get(i, medoids[cluster]))
            .sum();

        log::info!(
            "K-medoids finished after {} iteration(s) (converged: {}), cost {:.2}",
            iterations,
            converged,
            total_cost
        );

        Ok(Clustering {
            medoids,
            assignments,
            iterations,
            converged,
            total_cost,
        })
    }

    fn check_size(&self, n: usize) -> Result<(), AnalysisError> {
        if self.k == 0 {
            return Err(AnalysisError::InvalidInput(
                "Cluster count must be > 0".to_string(),
            ));
        }

        if self.k > n {
            return Err(AnalysisError::ClusterSize {
                requested: self.k,
                available: n,
            });
        }

        Ok(())
    }
}

/// Index of the nearest medoid for every point; lower cluster index wins ties
fn assign(distances: &DistanceMatrix, medoids: &[usize]) -> Vec<usize> {
    (0..distances.len())
        .map(|i| {
            let mut best_cluster = 0;
            let mut best_distance = distances.get(i, medoids[0]);
            for (cluster, &medoid) in medoids.iter().enumerate().skip(1) {
                let d = distances.get(i, medoid);
                if d < best_distance {
                    best_cluster = cluster;
                    best_distance = d;
                }
            }
            best_cluster
        })
        .collect()
}

fn group_by_cluster(assignments: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut clusters = vec![Vec::new(); k];
    for (i, &cluster) in assignments.iter().enumerate() {
        clusters[cluster].push(i);
    }
    clusters
}

/// Member with the smallest summed distance to the others; earliest member wins ties
fn best_medoid(distances: &DistanceMatrix, members: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &candidate in members {
        let cost = distances.cost(candidate, members);
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((candidate, cost)),
        }
    }
    best.map(|(index, _)| index)
}

/// Cluster data points by frequency and tag each with its medoid's frequency
///
/// Points come back in input order; only the `medoid` field changes.
///
/// # Errors
///
/// * `AnalysisError::ClusterSize` if `k` exceeds the number of points
/// * `AnalysisError::InvalidInput` if `k` is 0
pub fn cluster_points<R>(
    mut points: Vec<DataPoint>,
    clusterer: &KMedoids,
    rng: &mut R,
) -> Result<(Vec<DataPoint>, Clustering), AnalysisError>
where
    R: Rng + ?Sized,
{
    let frequencies: Vec<f64> = points.iter().map(|p| p.frequency).collect();
    let clustering = clusterer.fit(&frequencies, rng)?;

    for (i, point) in points.iter_mut().enumerate() {
        point.medoid = Some(frequencies[clustering.medoid_of(i)]);
    }

    Ok((points, clustering))
}
