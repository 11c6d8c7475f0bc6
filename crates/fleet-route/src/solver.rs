//! Stop-ordering trait and the default nearest-neighbor + 2-opt heuristic.
//!
//! # Pluggability
//!
//! Planning code calls ordering through the [`RouteSolver`] trait so a
//! different heuristic (or an exact solver for tiny batches) can be dropped
//! in without touching the callers.  [`NearestNeighborTwoOpt`] is the default.
//!
//! # Algorithm
//!
//! 1. **Nearest-neighbor construction** from the start index.  Ties go to the
//!    lowest index.  If every remaining stop is unreachable the partial order
//!    is returned as-is; callers detect this with [`RouteOrder::is_complete`].
//! 2. **2-opt refinement** over pairs `1 <= i < j < len`, reversing
//!    `order[i..=j]` whenever the two replacement edges are strictly cheaper
//!    than the two edges they replace.  Position 0 (the start) never moves and
//!    the edge after the last stop costs zero (open tour).  Full passes repeat
//!    until one makes no swap, or `max_passes` is hit.
//! 3. The reported total is re-summed over consecutive edges.

use tracing::{debug, warn};

use fleet_core::Coordinate;

use crate::{DistanceMatrix, RouteError, RouteResult};

// ── RouteOrder ────────────────────────────────────────────────────────────────

/// A visitation order over the stops of one planning request.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOrder {
    /// Stop indices in visiting order; `order[0]` is the start index.
    pub order: Vec<usize>,
    /// Sum of consecutive edge costs along `order` (no return leg).
    pub total_cost: f64,
    /// Number of stops in the matrix the order was solved over.
    pub stop_count: usize,
}

impl RouteOrder {
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `true` if every one of the `n` stops was visited.  `false` means the
    /// construction hit an unreachable remainder and stopped early.
    #[inline]
    pub fn is_complete(&self, n: usize) -> bool {
        self.order.len() == n
    }

    /// Map the order onto the caller's stop coordinates, producing the route
    /// polyline the motion engine drives along.
    ///
    /// # Errors
    ///
    /// `StopCountMismatch` unless `stops` has exactly one coordinate per
    /// matrix row.
    pub fn polyline(&self, stops: &[Coordinate]) -> RouteResult<Vec<Coordinate>> {
        if stops.len() != self.stop_count {
            return Err(RouteError::StopCountMismatch { stops: stops.len(), expected: self.stop_count });
        }
        Ok(self.order.iter().map(|&i| stops[i]).collect())
    }
}

// ── RouteSolver trait ─────────────────────────────────────────────────────────

/// Pluggable stop-ordering heuristic.
///
/// Implementations must be `Send + Sync` so one solver can serve planning
/// requests for several vehicles from worker threads.
pub trait RouteSolver: Send + Sync {
    /// Order every stop of `matrix`, beginning at `start`.
    fn solve(&self, matrix: &DistanceMatrix, start: usize) -> RouteResult<RouteOrder>;
}

/// Tuning for [`NearestNeighborTwoOpt`].
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Upper bound on full 2-opt passes.  Symmetric matrices converge long
    /// before this; asymmetric ones are not guaranteed to converge at all.
    pub max_passes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_passes: 1_000 }
    }
}

// ── NearestNeighborTwoOpt ─────────────────────────────────────────────────────

/// Nearest-neighbor construction followed by 2-opt local search.
#[derive(Clone, Debug, Default)]
pub struct NearestNeighborTwoOpt {
    pub config: SolverConfig,
}

impl NearestNeighborTwoOpt {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl RouteSolver for NearestNeighborTwoOpt {
    fn solve(&self, matrix: &DistanceMatrix, start: usize) -> RouteResult<RouteOrder> {
        let constructed = nearest_neighbor(matrix, start)?;
        let nn_cost = constructed.total_cost;

        let order = two_opt(matrix, constructed.order, self.config.max_passes);
        let total_cost = tour_cost(matrix, &order);

        debug!(stops = order.len(), nn_cost, total_cost, "route ordered");
        Ok(RouteOrder { order, total_cost, stop_count: matrix.len() })
    }
}

/// Order all stops of `matrix` from `start` with the default solver.
pub fn solve_route(matrix: &DistanceMatrix, start: usize) -> RouteResult<RouteOrder> {
    NearestNeighborTwoOpt::default().solve(matrix, start)
}

// ── Phases ────────────────────────────────────────────────────────────────────

/// Greedy construction: always move to the closest unvisited stop.
///
/// # Errors
///
/// `StartOutOfRange` if `start >= matrix.len()`.
pub fn nearest_neighbor(matrix: &DistanceMatrix, start: usize) -> RouteResult<RouteOrder> {
    let n = matrix.len();
    if n == 0 {
        return Err(RouteError::EmptyMatrix);
    }
    if start >= n {
        return Err(RouteError::StartOutOfRange { start, n });
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut total_cost = 0.0;

    visited[start] = true;
    order.push(start);
    let mut current = start;

    while order.len() < n {
        // Ascending scan with strict `<`: the first minimum (lowest index) wins.
        let mut best: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let cost = matrix.get(current, candidate);
            if !cost.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((candidate, cost));
            }
        }

        let Some((next, cost)) = best else {
            warn!(
                visited = order.len(),
                stops = n,
                from = current,
                "no reachable unvisited stop; returning partial order"
            );
            break;
        };

        visited[next] = true;
        order.push(next);
        total_cost += cost;
        current = next;
    }

    Ok(RouteOrder { order, total_cost, stop_count: n })
}

/// 2-opt local search over an open tour.  Returns the improved order.
pub fn two_opt(matrix: &DistanceMatrix, mut order: Vec<usize>, max_passes: usize) -> Vec<usize> {
    let len = order.len();
    // Need at least one movable pair (i, j) with 1 <= i < j < len.
    if len < 3 {
        return order;
    }

    // Cost of the edge leaving `from`; nothing follows the last stop.
    let outgoing = |from: usize, to: Option<usize>| to.map_or(0.0, |to| matrix.get(from, to));

    for pass in 1..=max_passes {
        let mut improved = false;

        for i in 1..len - 1 {
            for j in i + 1..len {
                let after = (j + 1 < len).then(|| order[j + 1]);

                let old = matrix.get(order[i - 1], order[i]) + outgoing(order[j], after);
                let new = matrix.get(order[i - 1], order[j]) + outgoing(order[i], after);

                if new < old {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }

        if !improved {
            debug!(passes = pass, "2-opt converged");
            return order;
        }
    }

    warn!(max_passes, "2-opt pass limit reached before convergence");
    order
}

/// Sum of consecutive edge costs along `order` (open tour).
pub fn tour_cost(matrix: &DistanceMatrix, order: &[usize]) -> f64 {
    order.windows(2).map(|w| matrix.get(w[0], w[1])).sum()
}
