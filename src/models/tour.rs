//! Ordered cyclic tour type.

/// A closed tour over the locations of one instance.
///
/// `order` lists instance positions in visiting order; the tour returns from
/// the last entry to the first. Costs follow the directed convention: the
/// total is the sum of `cost(order[k], order[k + 1])` including the
/// wrap-around arc, so a two-location tour pays both directions.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::models::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1], 12.0);
/// assert_eq!(tour.len(), 3);
/// assert_eq!(tour.successor(1), Some(0));
/// assert_eq!(tour.arcs().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    total_distance: f64,
}

impl Tour {
    /// Creates a tour from a visiting order and its accumulated cost.
    pub fn new(order: Vec<usize>, total_distance: f64) -> Self {
        Self {
            order,
            total_distance,
        }
    }

    /// Instance positions in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of locations on the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour has no locations.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total accumulated cost, including the closing arc.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// The location visited right after `location`, wrapping around.
    ///
    /// Returns `None` if `location` is not on the tour.
    pub fn successor(&self, location: usize) -> Option<usize> {
        let pos = self.order.iter().position(|&l| l == location)?;
        Some(self.order[(pos + 1) % self.order.len()])
    }

    /// Directed arcs of the tour, ending with the closing arc.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |k| (self.order[k], self.order[(k + 1) % n]))
    }

    /// Returns `true` if every position in `0..n` appears exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &l in &self.order {
            if l >= n || seen[l] {
                return false;
            }
            seen[l] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_basics() {
        let t = Tour::new(vec![0, 1, 2, 3], 40.0);
        assert_eq!(t.len(), 4);
        assert!(!t.is_empty());
        assert_eq!(t.total_distance(), 40.0);
        assert_eq!(t.successor(3), Some(0));
        assert_eq!(t.successor(9), None);
    }

    #[test]
    fn test_two_location_arcs() {
        let t = Tour::new(vec![0, 1], 10.0);
        assert_eq!(t.arcs().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_is_hamiltonian() {
        assert!(Tour::new(vec![2, 0, 1], 0.0).is_hamiltonian(3));
        assert!(!Tour::new(vec![0, 0, 1], 0.0).is_hamiltonian(3));
        assert!(!Tour::new(vec![0, 1], 0.0).is_hamiltonian(3));
        assert!(!Tour::new(vec![0, 1, 5], 0.0).is_hamiltonian(3));
    }
}
