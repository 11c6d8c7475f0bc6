//! Square travel-cost matrix over an externally supplied stop list.

use fleet_core::{Coordinate, haversine_distance};

use crate::{RouteError, RouteResult};

/// `n x n` non-negative travel costs, row-major.
///
/// Index `i` refers to the `i`-th entry of the stop list the caller built the
/// matrix from.  Costs are metres when built with
/// [`from_coordinates`][Self::from_coordinates]; any consistent unit works.
///
/// - The diagonal is implicitly zero: [`get(i, i)`][Self::get] returns `0.0`
///   whatever the caller stored there.
/// - Symmetry is a convention, not checked.
/// - A non-finite cost (`INFINITY` or `NaN`) marks the pair unreachable.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n:     usize,
    costs: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from nested rows.
    ///
    /// # Errors
    ///
    /// `EmptyMatrix` for zero rows, `NotSquare` for a ragged row, and
    /// `NegativeCost` for any negative off-diagonal entry.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> RouteResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(RouteError::EmptyMatrix);
        }

        let mut costs = Vec::with_capacity(n * n);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(RouteError::NotSquare { row: row_idx, got: row.len(), expected: n });
            }
            for (col, &cost) in row.iter().enumerate() {
                if col != row_idx && cost < 0.0 {
                    return Err(RouteError::NegativeCost { from: row_idx, to: col, cost });
                }
            }
            costs.extend(row);
        }

        Ok(Self { n, costs })
    }

    /// Great-circle distances in metres between every pair of `points`.
    ///
    /// Used when no road-network costs are available for the batch.
    pub fn from_coordinates(points: &[Coordinate]) -> RouteResult<Self> {
        let n = points.len();
        if n == 0 {
            return Err(RouteError::EmptyMatrix);
        }
        let mut costs = vec![0.0; n * n];
        for (i, &from) in points.iter().enumerate() {
            for (j, &to) in points.iter().enumerate().skip(i + 1) {
                let d = haversine_distance(from, to);
                costs[i * n + j] = d;
                costs[j * n + i] = d;
            }
        }
        Ok(Self { n, costs })
    }

    /// Number of stops.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Travel cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.n && to < self.n, "index ({from}, {to}) out of range for {} stops", self.n);
        if from == to {
            return 0.0;
        }
        self.costs[from * self.n + to]
    }

    /// `true` if `to` can be reached from `from` (finite cost).
    #[inline]
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }
}
