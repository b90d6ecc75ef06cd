//! Shared fixtures for integration tests.

use geofold::{parse_wkt, Geometry};

/// A row of the county dataset: name, state, and boundary geometry.
#[derive(Debug, Clone)]
pub struct County {
    pub name: String,
    pub state: String,
    pub boundaries: Geometry,
}

impl County {
    pub fn new(name: &str, state: &str, wkt: &str) -> Self {
        Self {
            name: name.to_string(),
            state: state.to_string(),
            boundaries: parse_wkt(wkt).expect("county fixture WKT is valid"),
        }
    }
}

/// Four unit-square counties tiling the region x in [1, 3], y in [0, 2].
///
/// State "AA" covers the bottom row and "BB" the top row; all four squares
/// meet at (2, 1).
pub fn counties() -> Vec<County> {
    vec![
        County::new("aaaa", "AA", "POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))"),
        County::new("bbbb", "BB", "POLYGON((1 1, 2 1, 2 2, 1 2, 1 1))"),
        County::new("cccc", "BB", "POLYGON((2 1, 3 1, 3 2, 2 2, 2 1))"),
        County::new("dddd", "AA", "POLYGON((2 0, 3 0, 3 1, 2 1, 2 0))"),
    ]
}

/// County rows keyed by state, in dataset order.
pub fn county_rows() -> Vec<(String, Geometry)> {
    counties()
        .into_iter()
        .map(|county| (county.state, county.boundaries))
        .collect()
}

/// County boundary geometries alone, in dataset order.
pub fn county_boundaries() -> Vec<Geometry> {
    counties().into_iter().map(|county| county.boundaries).collect()
}
