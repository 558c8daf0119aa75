//! Location and coordinate types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// Only the rendering side reads coordinates; the optimizer works from the
/// distance table alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named location in a distance table.
///
/// The index is the location's row/column in the table it was first loaded
/// from. Restricting a table to a subset keeps each location's original
/// index, so results can always be traced back to the full table.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::models::Location;
///
/// let natal = Location::new(0, "Natal").with_coordinate(-5.79, -35.21);
/// assert_eq!(natal.index(), 0);
/// assert_eq!(natal.name(), "Natal");
/// assert!(natal.coordinate().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    index: usize,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinate: Option<Coordinate>,
}

impl Location {
    /// Creates a location without a coordinate.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            coordinate: None,
        }
    }

    /// Attaches a coordinate for rendering.
    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    /// Index in the originating table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinate, if one was attached.
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    /// Builds locations `0..names.len()` from a list of names.
    pub fn from_names<I, S>(names: I) -> Vec<Location>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Location::new(index, name))
            .collect()
    }
}
