//! Pairwise distance matrix

/// Dense, symmetric `n x n` matrix of absolute differences
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix of `|values[i] - values[j]|`
    ///
    /// O(n²) in time and memory.
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        let mut data = vec![0.0f64; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = (values[i] - values[j]).abs();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Self { n, data }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the matrix covers no points
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({}, {}) out of bounds for {} points", i, j, self.n);
        self.data[i * self.n + j]
    }

    /// Sum of distances from `candidate` to every point in `members`
    pub fn cost(&self, candidate: usize, members: &[usize]) -> f64 {
        members.iter().map(|&m| self.get(candidate, m)).sum()
    }
}
