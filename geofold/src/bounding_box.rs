use std::hash::Hash;

use crate::geometry::{Coordinate, Geometry};

/// A 2D axis-aligned bounding box represented by minimum and maximum coordinates.
///
/// `BoundingBox` defines a rectangular area in 2D space using the minimum
/// (min_x, min_y) and maximum (max_x, max_y) corners. The envelope aggregate
/// is a fold of `merged` over the per-geometry boxes.
///
/// # Examples
///
/// ```rust
/// use geofold::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 0.0, 2.0, 1.0);
/// let b = BoundingBox::new(1.0, 0.5, 3.0, 2.0);
///
/// assert_eq!(a.merged(&b), BoundingBox::new(0.0, 0.0, 3.0, 2.0));
/// assert!(a.intersects(&b));
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug, serde::Deserialize, serde::Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl Eq for BoundingBox {}

impl PartialOrd for BoundingBox {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundingBox {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.min_x
            .total_cmp(&other.min_x)
            .then(self.min_y.total_cmp(&other.min_y))
            .then(self.max_x.total_cmp(&other.max_x))
            .then(self.max_y.total_cmp(&other.max_y))
    }
}

impl Hash for BoundingBox {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.min_x.to_bits().hash(state);
        self.min_y.to_bits().hash(state);
        self.max_x.to_bits().hash(state);
        self.max_y.to_bits().hash(state);
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox({}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl BoundingBox {
    /// Creates a new bounding box with the specified corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a degenerate bounding box covering a single coordinate.
    pub fn from_coordinate(coord: &Coordinate) -> BoundingBox {
        BoundingBox::new(coord.x, coord.y, coord.x, coord.y)
    }

    /// Width of the box along the X axis.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box along the Y axis.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the box. Zero for degenerate boxes.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center coordinate of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Checks whether a point lies inside or on the boundary of the box.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Checks whether another box lies entirely inside this one.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Checks whether this box and another share any point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Returns the smallest box containing both this box and another.
    ///
    /// Componentwise min/max; commutative and associative, so a fold over
    /// any permutation of boxes yields the same envelope.
    pub fn merged(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Grows the box in place to cover the given coordinate.
    pub fn extend_coordinate(&mut self, coord: &Coordinate) {
        self.min_x = self.min_x.min(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_x = self.max_x.max(coord.x);
        self.max_y = self.max_y.max(coord.y);
    }

    /// Renders the box as a geometry.
    ///
    /// A full box becomes a rectangular polygon. A box collapsed along one
    /// axis becomes a line, and a box collapsed along both axes becomes a
    /// point, so the result always has the dimension of the region it covers.
    pub fn to_geometry(&self) -> Geometry {
        let flat_x = self.min_x == self.max_x;
        let flat_y = self.min_y == self.max_y;
        match (flat_x, flat_y) {
            (true, true) => Geometry::point(self.min_x, self.min_y),
            (true, false) | (false, true) => {
                let coords = vec![
                    Coordinate::new(self.min_x, self.min_y),
                    Coordinate::new(self.max_x, self.max_y),
                ];
                // Two distinct corners, so the constructor cannot fail.
                Geometry::line_string(coords).unwrap_or_else(|_| Geometry::empty())
            }
            (false, false) => Geometry::rectangle(self.min_x, self.min_y, self.max_x, self.max_y),
        }
    }
}
