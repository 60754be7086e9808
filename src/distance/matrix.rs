//! Dense integer distance matrix.

use crate::error::{Result, RoutingError};
use crate::models::{PlanarPoint, Stop};

/// A dense, symmetric n×n matrix of integer arc costs in row-major order.
///
/// Entries are planar Euclidean distances truncated toward zero, so costs and
/// capacities share an integer domain and the objective is summed exactly.
///
/// # Examples
///
/// ```
/// use cluster_cvrp::models::PlanarPoint;
/// use cluster_cvrp::distance::DistanceMatrix;
///
/// let points = vec![
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(3.0, 4.0),
///     PlanarPoint::new(10.0, 10.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(0, 2), 14); // 14.142… truncated
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the matrix for planar points, depot first.
    ///
    /// Fails with [`RoutingError::InvalidInput`] when fewer than two points
    /// are given (no customer to route) or any coordinate is non-finite.
    pub fn from_points(points: &[PlanarPoint]) -> Result<Self> {
        if points.len() < 2 {
            return Err(RoutingError::invalid(format!(
                "need a depot and at least one customer, got {} stop(s)",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(RoutingError::invalid(format!(
                "stop {i} has a non-finite coordinate"
            )));
        }

        let n = points.len();
        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]).trunc() as i64;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Computes the matrix for a stop list (index 0 = depot).
    pub fn from_stops(stops: &[Stop]) -> Result<Self> {
        let points: Vec<PlanarPoint> = stops.iter().map(Stop::point).collect();
        Self::from_points(&points)
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// The grid must be square, symmetric, non-negative, and zero on the
    /// diagonal. A 1×1 grid (depot only) is accepted.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self> {
        if size == 0 || data.len() != size * size {
            return Err(RoutingError::invalid(format!(
                "expected {size}×{size} entries, got {}",
                data.len()
            )));
        }
        let dm = Self { data, size };
        for i in 0..size {
            if dm.get(i, i) != 0 {
                return Err(RoutingError::invalid(format!("diagonal entry {i} is not zero")));
            }
            for j in (i + 1)..size {
                if dm.get(i, j) < 0 {
                    return Err(RoutingError::invalid(format!("entry ({i}, {j}) is negative")));
                }
                if dm.get(i, j) != dm.get(j, i) {
                    return Err(RoutingError::invalid(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ"
                    )));
                }
            }
        }
        Ok(dm)
    }

    /// Returns the cost of the arc `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of stops covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mean off-diagonal arc cost, zero for a depot-only matrix.
    pub fn mean_arc(&self) -> f64 {
        let arcs = self.size * self.size.saturating_sub(1);
        if arcs == 0 {
            return 0.0;
        }
        self.data.iter().sum::<i64>() as f64 / arcs as f64
    }

    /// Cost of the closed tour `depot → stops… → depot`.
    pub fn tour_distance(&self, depot: usize, stops: &[usize]) -> i64 {
        let mut prev = depot;
        let mut total = 0;
        for &s in stops {
            total += self.get(prev, s);
            prev = s;
        }
        total + self.get(prev, depot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<PlanarPoint> {
        vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(3.0, 4.0),
            PlanarPoint::new(0.0, 8.5),
        ]
    }

    #[test]
    fn test_from_points_truncates() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("valid");
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(0, 2), 8);
        assert_eq!(dm.get(0, 0), 0);
    }

    #[test]
    fn test_symmetric_zero_diagonal() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("valid");
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0);
            for j in 0..dm.size() {
                assert_eq!(dm.get(i, j), dm.get(j, i));
                assert!(dm.get(i, j) >= 0);
            }
        }
    }

    #[test]
    fn test_rejects_too_few_stops() {
        assert!(matches!(
            DistanceMatrix::from_points(&[PlanarPoint::new(0.0, 0.0)]),
            Err(RoutingError::InvalidInput(_))
        ));
        assert!(DistanceMatrix::from_points(&[]).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let points = vec![PlanarPoint::new(0.0, 0.0), PlanarPoint::new(f64::NAN, 1.0)];
        assert!(matches!(
            DistanceMatrix::from_points(&points),
            Err(RoutingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0, 5, 5, 0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(1, 0), 5);
    }

    #[test]
    fn test_from_data_invalid() {
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2, 0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![1, 1, 1, 0]).is_err());
        assert!(DistanceMatrix::from_data(0, vec![]).is_err());
    }

    #[test]
    fn test_depot_only_grid() {
        let dm = DistanceMatrix::from_data(1, vec![0]).expect("valid");
        assert_eq!(dm.size(), 1);
        assert_eq!(dm.mean_arc(), 0.0);
        assert_eq!(dm.tour_distance(0, &[]), 0);
    }

    #[test]
    fn test_tour_distance() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("valid");
        // 0→1 = 5, 1→2 = 5.41 → 5, 2→0 = 8
        assert_eq!(dm.tour_distance(0, &[1, 2]), 18);
        assert_eq!(dm.tour_distance(0, &[]), 0);
    }
}
