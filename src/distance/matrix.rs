//! Dense, validated distance matrix with location identities.

use std::collections::HashMap;

use crate::error::{ConfigError, IndexError, ValidationError};
use crate::models::Location;

/// A dense n×n cost table stored in row-major order, together with the
/// locations its rows and columns stand for.
///
/// Off-diagonal entries are finite and non-negative; the diagonal is never
/// read. Costs may be asymmetric. The matrix is immutable once built.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::models::Location;
///
/// let dm = DistanceMatrix::from_rows(
///     Location::from_names(["A", "B", "C"]),
///     vec![
///         vec![0.0, 5.0, 9.0],
///         vec![5.0, 0.0, 4.0],
///         vec![9.0, 4.0, 0.0],
///     ],
/// )
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(1, 2).unwrap(), 4.0);
/// assert!(dm.get(1, 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    locations: Vec<Location>,
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from one row of costs per location.
    ///
    /// Each location's index must equal its position. Fails with a
    /// [`ConfigError`] when the table is not square, does not match the
    /// location count, holds a negative or non-finite off-diagonal entry,
    /// or repeats a location name.
    pub fn from_rows(locations: Vec<Location>, rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let size = locations.len();
        if rows.len() != size {
            return Err(ConfigError::SizeMismatch {
                locations: size,
                rows: rows.len(),
            });
        }
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != size {
                return Err(ConfigError::NotSquare {
                    row,
                    expected: size,
                    found: entries.len(),
                });
            }
        }
        let data = rows.into_iter().flatten().collect();
        Self::from_data(locations, data)
    }

    /// Builds a matrix from a flat row-major table of `n * n` entries.
    pub fn from_data(locations: Vec<Location>, data: Vec<f64>) -> Result<Self, ConfigError> {
        let size = locations.len();
        if size < 2 {
            return Err(ConfigError::TooFewLocations(size));
        }
        if data.len() != size * size {
            return Err(ConfigError::EntryCount {
                locations: size,
                expected: size * size,
                found: data.len(),
            });
        }

        let mut names = HashMap::with_capacity(size);
        for (position, loc) in locations.iter().enumerate() {
            if loc.index() != position {
                return Err(ConfigError::IndexMismatch {
                    name: loc.name().to_string(),
                    index: loc.index(),
                    position,
                });
            }
            if names.insert(loc.name(), position).is_some() {
                return Err(ConfigError::DuplicateName(loc.name().to_string()));
            }
        }

        check_entries(size, &data)?;
        Ok(Self {
            locations,
            data,
            size,
        })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// Fails if either index is out of range or `from == to`.
    pub fn get(&self, from: usize, to: usize) -> Result<f64, IndexError> {
        if from >= self.size || to >= self.size {
            return Err(IndexError::OutOfRange {
                from,
                to,
                size: self.size,
            });
        }
        if from == to {
            return Err(IndexError::SelfPair(from));
        }
        Ok(self.cost(from, to))
    }

    /// Unchecked cost lookup for callers that already own valid indices.
    pub(crate) fn cost(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Locations in row order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The location at row `position`.
    pub fn location(&self, position: usize) -> Option<&Location> {
        self.locations.get(position)
    }

    /// Row position of the location with the given name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.name() == name)
    }

    /// Returns `true` if every cost equals its reverse within a relative
    /// tolerance, `|c(i, j) − c(j, i)| ≤ tol · max(1, c(i, j), c(j, i))`.
    ///
    /// Used for reporting only; the model is always directed.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|from| {
            ((from + 1)..self.size).all(|to| {
                let (there, back) = (self.cost(from, to), self.cost(to, from));
                (there - back).abs() <= tol * there.max(back).max(1.0)
            })
        })
    }

    /// Returns a new matrix over the given row positions, in the given order.
    ///
    /// Each retained location keeps its identity (including the index it had
    /// in the full table). Fails if fewer than two positions are given, or if
    /// a position repeats or is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_exact_tsp::distance::DistanceMatrix;
    /// use u_exact_tsp::models::Location;
    ///
    /// let dm = DistanceMatrix::from_rows(
    ///     Location::from_names(["A", "B", "C"]),
    ///     vec![
    ///         vec![0.0, 1.0, 2.0],
    ///         vec![3.0, 0.0, 4.0],
    ///         vec![5.0, 6.0, 0.0],
    ///     ],
    /// )
    /// .unwrap();
    /// let sub = dm.restrict(&[2, 0]).unwrap();
    /// assert_eq!(sub.size(), 2);
    /// assert_eq!(sub.get(0, 1).unwrap(), 5.0); // C -> A
    /// assert_eq!(sub.location(0).unwrap().index(), 2);
    /// ```
    pub fn restrict(&self, positions: &[usize]) -> Result<Self, ValidationError> {
        if positions.len() < 2 {
            return Err(ValidationError::TooSmall(positions.len()));
        }
        let mut seen = vec![false; self.size];
        for &p in positions {
            if p >= self.size {
                return Err(ValidationError::OutOfRange {
                    index: p,
                    size: self.size,
                });
            }
            if seen[p] {
                return Err(ValidationError::Duplicate(self.locations[p].name().to_string()));
            }
            seen[p] = true;
        }

        let k = positions.len();
        let mut data = Vec::with_capacity(k * k);
        for &from in positions {
            for &to in positions {
                data.push(self.cost(from, to));
            }
        }
        let locations = positions
            .iter()
            .map(|&p| self.locations[p].clone())
            .collect();

        Ok(Self {
            locations,
            data,
            size: k,
        })
    }
}

fn check_entries(size: usize, data: &[f64]) -> Result<(), ConfigError> {
    for from in 0..size {
        for to in 0..size {
            if from == to {
                continue;
            }
            let value = data[from * size + to];
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteEntry { from, to });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeEntry { from, to, value });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(
            Location::from_names(["A", "B", "C"]),
            vec![
                vec![0.0, 5.0, 8.0],
                vec![5.0, 0.0, 4.0],
                vec![8.0, 4.0, 0.0],
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 1), Ok(5.0));
        assert_eq!(dm.get(2, 0), Ok(8.0));
        assert_eq!(dm.position_of("C"), Some(2));
        assert_eq!(dm.position_of("Z"), None);
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let dm = DistanceMatrix::from_data(Location::from_names(["A", "B"]), vec![0.0, 10.0, 15.0, 0.0])
            .expect("valid");
        assert!(!dm.is_symmetric(1e-10));
        assert_eq!(dm.get(0, 1), Ok(10.0));
        assert_eq!(dm.get(1, 0), Ok(15.0));
    }

    #[test]
    fn test_get_errors() {
        let dm = sample();
        assert_eq!(dm.get(1, 1), Err(IndexError::SelfPair(1)));
        assert_eq!(
            dm.get(0, 3),
            Err(IndexError::OutOfRange {
                from: 0,
                to: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_not_square() {
        let err = DistanceMatrix::from_rows(
            Location::from_names(["A", "B", "C"]),
            vec![
                vec![0.0, 1.0, 2.0, 3.0],
                vec![1.0, 0.0, 2.0, 3.0],
                vec![1.0, 2.0, 0.0, 3.0],
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotSquare {
                row: 0,
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = DistanceMatrix::from_rows(
            Location::from_names(["A", "B", "C"]),
            vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::SizeMismatch { locations: 3, rows: 2 });
    }

    #[test]
    fn test_flat_length_reports_entry_count() {
        let err = DistanceMatrix::from_data(Location::from_names(["A", "B", "C"]), vec![1.0; 7])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EntryCount {
                locations: 3,
                expected: 9,
                found: 7
            }
        );
        assert_eq!(
            err.to_string(),
            "flat table has 7 entries for 3 locations, expected 9"
        );
    }

    #[test]
    fn test_symmetry_uses_relative_tolerance() {
        let dm = DistanceMatrix::from_data(
            Location::from_names(["A", "B"]),
            vec![0.0, 1_000_000.0, 1_000_000.5, 0.0],
        )
        .expect("valid");
        assert!(dm.is_symmetric(1e-6));
        assert!(!dm.is_symmetric(1e-8));
    }

    #[test]
    fn test_negative_entry() {
        let err = DistanceMatrix::from_rows(
            Location::from_names(["A", "B"]),
            vec![vec![0.0, -1.0], vec![1.0, 0.0]],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NegativeEntry { from: 0, to: 1, .. }));
    }

    #[test]
    fn test_non_finite_entry() {
        let err = DistanceMatrix::from_rows(
            Location::from_names(["A", "B"]),
            vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::NonFiniteEntry { from: 1, to: 0 });
    }

    #[test]
    fn test_diagonal_ignored() {
        let dm = DistanceMatrix::from_rows(
            Location::from_names(["A", "B"]),
            vec![vec![f64::NAN, 1.0], vec![1.0, -7.0]],
        );
        assert!(dm.is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let err = DistanceMatrix::from_rows(
            vec![Location::new(0, "A"), Location::new(1, "A")],
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("A".into()));
    }

    #[test]
    fn test_index_mismatch() {
        let err = DistanceMatrix::from_rows(
            vec![Location::new(0, "A"), Location::new(5, "B")],
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::IndexMismatch { index: 5, position: 1, .. }));
    }

    #[test]
    fn test_too_few_locations() {
        let err = DistanceMatrix::from_rows(Location::from_names(["A"]), vec![vec![0.0]]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewLocations(1));
    }

    #[test]
    fn test_restrict_keeps_identity() {
        let dm = sample();
        let sub = dm.restrict(&[2, 1]).expect("valid subset");
        assert_eq!(sub.size(), 2);
        assert_eq!(sub.get(0, 1), Ok(4.0));
        assert_eq!(sub.location(0).map(Location::name), Some("C"));
        assert_eq!(sub.location(0).map(Location::index), Some(2));
        assert_eq!(sub.location(1).map(Location::index), Some(1));
    }

    #[test]
    fn test_restrict_errors() {
        let dm = sample();
        assert_eq!(dm.restrict(&[0]).unwrap_err(), ValidationError::TooSmall(1));
        assert_eq!(
            dm.restrict(&[0, 0]).unwrap_err(),
            ValidationError::Duplicate("A".into())
        );
        assert_eq!(
            dm.restrict(&[0, 7]).unwrap_err(),
            ValidationError::OutOfRange { index: 7, size: 3 }
        );
    }

    #[test]
    fn test_restrict_of_restrict() {
        let dm = sample();
        let sub = dm.restrict(&[0, 1, 2]).expect("valid");
        let subsub = sub.restrict(&[1, 2]).expect("valid");
        assert_eq!(subsub.get(0, 1), Ok(4.0));
        assert_eq!(subsub.location(1).map(Location::name), Some("C"));
    }
}
