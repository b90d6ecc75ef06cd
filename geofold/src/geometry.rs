//! Geometry value types for spatial aggregation.
//!
//! The model is a closed set of variants: points, line strings, polygons,
//! their multi counterparts, and heterogeneous collections. Values are
//! immutable once constructed; constructors validate ring and coordinate
//! invariants so every held value is well formed. The empty geometry is the
//! empty collection (`GEOMETRYCOLLECTION EMPTY`).
//!
//! Equality derived here is structural. Equality by shape (tolerant of ring
//! rotation, orientation, and collinear vertices) is an engine operation,
//! see [`crate::engine::GeometryEngine::equals`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::bounding_box::BoundingBox;
use crate::errors::{GeometryError, GeometryResult};

/// A 2D coordinate (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another coordinate.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A line string defined by an ordered sequence of coordinates.
///
/// A LineString with 2 points represents a line segment. A closed
/// LineString (first and last coordinates equal) represents a ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    coordinates: Vec<Coordinate>,
}

impl LineString {
    /// Creates a new LineString from at least 2 coordinates.
    ///
    /// # Errors
    /// Returns an error if fewer than 2 coordinates are provided.
    pub fn new(coordinates: Vec<Coordinate>) -> GeometryResult<Self> {
        if coordinates.len() < 2 {
            return Err(GeometryError::InvalidGeometry(
                "LineString requires at least 2 coordinates".to_string(),
            ));
        }
        Ok(Self { coordinates })
    }

    /// Gets the coordinates of this LineString.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Calculates the total length of the LineString.
    pub fn length(&self) -> f64 {
        let mut total = 0.0;
        for i in 0..self.coordinates.len() - 1 {
            total += self.coordinates[i].distance(&self.coordinates[i + 1]);
        }
        total
    }

    /// Checks if this LineString is closed (first and last coordinates equal).
    pub fn is_closed(&self) -> bool {
        self.coordinates[0] == self.coordinates[self.coordinates.len() - 1]
    }

    /// Gets the bounding box of this LineString.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::from_coordinate(&self.coordinates[0]);
        for coord in &self.coordinates[1..] {
            bbox.extend_coordinate(coord);
        }
        bbox
    }
}

impl Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LINESTRING")?;
        write_coordinate_list(f, &self.coordinates)
    }
}

/// A polygon with an exterior ring and zero or more interior holes.
///
/// Every ring must be closed and carry at least 4 coordinates (3 distinct
/// corners plus the closing repeat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    exterior: Vec<Coordinate>,
    holes: Vec<Vec<Coordinate>>,
}

impl Polygon {
    /// Creates a new polygon from an exterior ring and optional holes.
    ///
    /// # Errors
    /// Returns an error if any ring is open or has insufficient points.
    pub fn new(exterior: Vec<Coordinate>, holes: Vec<Vec<Coordinate>>) -> GeometryResult<Self> {
        Self::validate_ring(&exterior)?;
        for hole in &holes {
            Self::validate_ring(hole)?;
        }
        Ok(Self { exterior, holes })
    }

    /// Creates an axis-aligned rectangle.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            exterior: vec![
                Coordinate::new(min_x, min_y),
                Coordinate::new(max_x, min_y),
                Coordinate::new(max_x, max_y),
                Coordinate::new(min_x, max_y),
                Coordinate::new(min_x, min_y),
            ],
            holes: vec![],
        }
    }

    /// Gets the exterior ring.
    pub fn exterior(&self) -> &[Coordinate] {
        &self.exterior
    }

    /// Gets the interior holes.
    pub fn holes(&self) -> &[Vec<Coordinate>] {
        &self.holes
    }

    /// Gets the bounding box of the exterior ring.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::from_coordinate(&self.exterior[0]);
        for coord in &self.exterior[1..] {
            bbox.extend_coordinate(coord);
        }
        bbox
    }

    fn validate_ring(ring: &[Coordinate]) -> GeometryResult<()> {
        if ring.len() < 4 {
            return Err(GeometryError::InvalidGeometry(
                "polygon ring requires at least 4 coordinates".to_string(),
            ));
        }
        if ring[0] != ring[ring.len() - 1] {
            return Err(GeometryError::InvalidGeometry(
                "polygon ring must be closed".to_string(),
            ));
        }
        Ok(())
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POLYGON")?;
        write_polygon_body(f, self)
    }
}

/// Topological dimension of a non-empty geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    /// Points and multipoints.
    Puntal = 0,
    /// Line strings and multilinestrings.
    Lineal = 1,
    /// Polygons and multipolygons.
    Areal = 2,
}

/// A geometry value: point, line, polygon, a multi variant, or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single point.
    Point(Coordinate),
    /// Multiple points.
    MultiPoint(Vec<Coordinate>),
    /// A single line string.
    LineString(LineString),
    /// Multiple line strings.
    MultiLineString(Vec<LineString>),
    /// A single polygon, possibly with holes.
    Polygon(Polygon),
    /// Multiple polygons.
    MultiPolygon(Vec<Polygon>),
    /// A heterogeneous collection of member geometries.
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    /// Creates a multipoint geometry.
    pub fn multi_point(coordinates: Vec<Coordinate>) -> Self {
        Geometry::MultiPoint(coordinates)
    }

    /// Creates a line string geometry from at least 2 coordinates.
    pub fn line_string(coordinates: Vec<Coordinate>) -> GeometryResult<Self> {
        Ok(Geometry::LineString(LineString::new(coordinates)?))
    }

    /// Creates a polygon geometry from a closed exterior ring.
    pub fn polygon(exterior: Vec<Coordinate>) -> GeometryResult<Self> {
        Ok(Geometry::Polygon(Polygon::new(exterior, vec![])?))
    }

    /// Creates an axis-aligned rectangular polygon.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::Polygon(Polygon::rectangle(min_x, min_y, max_x, max_y))
    }

    /// Creates a collection geometry from member geometries, preserving
    /// member order and multiplicity.
    pub fn collection(members: Vec<Geometry>) -> Self {
        Geometry::Collection(members)
    }

    /// The empty geometry.
    pub fn empty() -> Self {
        Geometry::Collection(vec![])
    }

    /// Checks whether this geometry covers no points at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => false,
            Geometry::MultiPoint(coords) => coords.is_empty(),
            Geometry::MultiLineString(lines) => lines.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.is_empty(),
            Geometry::Collection(members) => members.iter().all(Geometry::is_empty),
        }
    }

    /// Number of immediate member geometries.
    ///
    /// Single geometries count as 1; multi geometries and collections count
    /// their direct members.
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => 1,
            Geometry::MultiPoint(coords) => coords.len(),
            Geometry::MultiLineString(lines) => lines.len(),
            Geometry::MultiPolygon(polygons) => polygons.len(),
            Geometry::Collection(members) => members.len(),
        }
    }

    /// Topological dimension, or `None` for empty geometries.
    ///
    /// Collections report the highest dimension among their members.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Geometry::Point(_) => Some(Dimension::Puntal),
            Geometry::MultiPoint(coords) => (!coords.is_empty()).then_some(Dimension::Puntal),
            Geometry::LineString(_) => Some(Dimension::Lineal),
            Geometry::MultiLineString(lines) => (!lines.is_empty()).then_some(Dimension::Lineal),
            Geometry::Polygon(_) => Some(Dimension::Areal),
            Geometry::MultiPolygon(polygons) => (!polygons.is_empty()).then_some(Dimension::Areal),
            Geometry::Collection(members) => {
                members.iter().filter_map(Geometry::dimension).max()
            }
        }
    }

    /// The minimal axis-aligned bounding box, or `None` for empty geometries.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Point(coord) => Some(BoundingBox::from_coordinate(coord)),
            Geometry::MultiPoint(coords) => {
                let mut iter = coords.iter();
                let mut bbox = BoundingBox::from_coordinate(iter.next()?);
                for coord in iter {
                    bbox.extend_coordinate(coord);
                }
                Some(bbox)
            }
            Geometry::LineString(line) => Some(line.bounding_box()),
            Geometry::MultiLineString(lines) => {
                merge_boxes(lines.iter().map(LineString::bounding_box))
            }
            Geometry::Polygon(polygon) => Some(polygon.bounding_box()),
            Geometry::MultiPolygon(polygons) => {
                merge_boxes(polygons.iter().map(Polygon::bounding_box))
            }
            Geometry::Collection(members) => {
                merge_boxes(members.iter().filter_map(Geometry::bounding_box))
            }
        }
    }

    /// Flattens this geometry into its puntal, lineal, and areal components,
    /// recursing through multi variants and collections.
    pub(crate) fn flatten_into(
        &self,
        points: &mut Vec<Coordinate>,
        lines: &mut Vec<LineString>,
        polygons: &mut Vec<Polygon>,
    ) {
        match self {
            Geometry::Point(coord) => points.push(*coord),
            Geometry::MultiPoint(coords) => points.extend(coords.iter().copied()),
            Geometry::LineString(line) => lines.push(line.clone()),
            Geometry::MultiLineString(members) => lines.extend(members.iter().cloned()),
            Geometry::Polygon(polygon) => polygons.push(polygon.clone()),
            Geometry::MultiPolygon(members) => polygons.extend(members.iter().cloned()),
            Geometry::Collection(members) => {
                for member in members {
                    member.flatten_into(points, lines, polygons);
                }
            }
        }
    }
}

fn merge_boxes(boxes: impl Iterator<Item = BoundingBox>) -> Option<BoundingBox> {
    boxes.reduce(|acc, bbox| acc.merged(&bbox))
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(coord) => write!(f, "POINT({} {})", coord.x, coord.y),
            Geometry::MultiPoint(coords) => {
                if coords.is_empty() {
                    return write!(f, "MULTIPOINT EMPTY");
                }
                write!(f, "MULTIPOINT(")?;
                for (i, coord) in coords.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "({} {})", coord.x, coord.y)?;
                }
                write!(f, ")")
            }
            Geometry::LineString(line) => line.fmt(f),
            Geometry::MultiLineString(lines) => {
                if lines.is_empty() {
                    return write!(f, "MULTILINESTRING EMPTY");
                }
                write!(f, "MULTILINESTRING(")?;
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_coordinate_list(f, line.coordinates())?;
                }
                write!(f, ")")
            }
            Geometry::Polygon(polygon) => polygon.fmt(f),
            Geometry::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return write!(f, "MULTIPOLYGON EMPTY");
                }
                write!(f, "MULTIPOLYGON(")?;
                for (i, polygon) in polygons.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_polygon_body(f, polygon)?;
                }
                write!(f, ")")
            }
            Geometry::Collection(members) => {
                if members.is_empty() {
                    return write!(f, "GEOMETRYCOLLECTION EMPTY");
                }
                write!(f, "GEOMETRYCOLLECTION(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    member.fmt(f)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_coordinate_list(f: &mut fmt::Formatter<'_>, coords: &[Coordinate]) -> fmt::Result {
    write!(f, "(")?;
    for (i, coord) in coords.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", coord.x, coord.y)?;
    }
    write!(f, ")")
}

fn write_polygon_body(f: &mut fmt::Formatter<'_>, polygon: &Polygon) -> fmt::Result {
    write!(f, "(")?;
    write_coordinate_list(f, polygon.exterior())?;
    for hole in polygon.holes() {
        write!(f, ", ")?;
        write_coordinate_list(f, hole)?;
    }
    write!(f, ")")
}
