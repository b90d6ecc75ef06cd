//! Geometry engine: the kernel boundary for spatial aggregation.
//!
//! The aggregator never computes geometry itself; it folds with the
//! primitives on [`GeometryEngine`]. The default [`CartesianEngine`] is a
//! planar kernel built on the `geo` crate: boolean operations for areal
//! union/intersection and line clipping, plus a segment-level boundary
//! contact pass so intersections degrade to the correct lower dimension:
//! two polygons sharing an edge intersect to that edge, and polygons
//! sharing a single corner intersect to a point.

use itertools::Itertools;

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::algorithm::{Area, BooleanOps, Contains, Intersects};

use crate::bounding_box::BoundingBox;
use crate::errors::GeometryResult;
use crate::geometry::{Coordinate, Dimension, Geometry, LineString, Polygon};

/// Area below which a boolean-op result is treated as dimensionally
/// degenerate rather than areal.
const EPS: f64 = 1e-9;

/// The primitives the aggregator folds with.
///
/// Implementations must keep `union` and `intersection` commutative and
/// associative up to `equals`, so that per-group folds are independent of
/// row order.
pub trait GeometryEngine {
    /// Point-set union of two geometries. Adjacent polygons sharing an edge
    /// merge into one polygon.
    fn union(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry>;

    /// Point-set intersection of two geometries. The result may degrade in
    /// dimension; disjoint inputs yield the empty geometry.
    fn intersection(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry>;

    /// Minimal axis-aligned bounding box, or `None` for empty geometries.
    fn envelope(&self, geometry: &Geometry) -> Option<BoundingBox> {
        geometry.bounding_box()
    }

    /// Wraps member geometries into a collection, preserving order and
    /// multiplicity.
    fn collection(&self, members: Vec<Geometry>) -> Geometry {
        Geometry::collection(members)
    }

    /// Equality by shape: tolerant of ring rotation, orientation, collinear
    /// vertices, and segment subdivision.
    fn equals(&self, a: &Geometry, b: &Geometry) -> GeometryResult<bool>;
}

/// Planar geometry engine over the `geo` kernel.
///
/// Coordinates are treated as Cartesian; no geodesic correction is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartesianEngine;

impl GeometryEngine for CartesianEngine {
    fn union(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let (points_a, lines_a, polygons_a) = components(a);
        let (points_b, lines_b, polygons_b) = components(b);

        let areal = match (polygons_a.is_empty(), polygons_b.is_empty()) {
            (true, true) => None,
            (false, true) => Some(to_geo_multi_polygon(&polygons_a)),
            (true, false) => Some(to_geo_multi_polygon(&polygons_b)),
            (false, false) => {
                Some(to_geo_multi_polygon(&polygons_a).union(&to_geo_multi_polygon(&polygons_b)))
            }
        };

        // Lineal parts survive unless the merged areal region swallows them.
        let mut lines: Vec<LineString> = vec![];
        for line in lines_a.iter().chain(lines_b.iter()) {
            if lines.contains(line) {
                continue;
            }
            if let Some(mp) = &areal {
                if mp.contains(&to_geo_line_string(line)) {
                    continue;
                }
            }
            lines.push(line.clone());
        }

        // Puntal parts survive unless a higher-dimension part covers them.
        let mut points: Vec<Coordinate> = vec![];
        'next_point: for coord in points_a.iter().chain(points_b.iter()) {
            if points.contains(coord) {
                continue;
            }
            let point = geo::Point::new(coord.x, coord.y);
            if let Some(mp) = &areal {
                if mp.intersects(&point) {
                    continue;
                }
            }
            for line in &lines {
                if to_geo_line_string(line).intersects(&point) {
                    continue 'next_point;
                }
            }
            points.push(*coord);
        }

        let mut parts = vec![];
        if let Some(mp) = areal {
            if let Some(geometry) = areal_geometry(mp)? {
                parts.push(geometry);
            }
        }
        if let Some(geometry) = lineal_geometry(lines) {
            parts.push(geometry);
        }
        if let Some(geometry) = puntal_geometry(points) {
            parts.push(geometry);
        }
        Ok(assemble(parts))
    }

    fn intersection(&self, a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
        if a.is_empty() || b.is_empty() {
            return Ok(Geometry::empty());
        }

        // Intersection distributes over collection members; the partial
        // results are folded back together with union.
        if let Geometry::Collection(members) = a {
            let mut acc = Geometry::empty();
            for member in members {
                let part = self.intersection(member, b)?;
                acc = self.union(&acc, &part)?;
            }
            return Ok(acc);
        }
        if matches!(b, Geometry::Collection(_)) {
            return self.intersection(b, a);
        }

        let (dim_a, dim_b) = match (a.dimension(), b.dimension()) {
            (Some(dim_a), Some(dim_b)) => (dim_a, dim_b),
            _ => return Ok(Geometry::empty()),
        };

        match (dim_a, dim_b) {
            (Dimension::Puntal, _) => Ok(puntal_intersection(a, b)),
            (_, Dimension::Puntal) => Ok(puntal_intersection(b, a)),
            (Dimension::Areal, Dimension::Areal) => areal_intersection(a, b),
            (Dimension::Lineal, Dimension::Areal) => line_areal_intersection(a, b),
            (Dimension::Areal, Dimension::Lineal) => line_areal_intersection(b, a),
            (Dimension::Lineal, Dimension::Lineal) => line_line_intersection(a, b),
        }
    }

    fn equals(&self, a: &Geometry, b: &Geometry) -> GeometryResult<bool> {
        if a.is_empty() || b.is_empty() {
            return Ok(a.is_empty() && b.is_empty());
        }

        let (points_a, lines_a, polygons_a) = components(a);
        let (points_b, lines_b, polygons_b) = components(b);

        let areal_equal = match (polygons_a.is_empty(), polygons_b.is_empty()) {
            (true, true) => true,
            (false, false) => {
                let sym = to_geo_multi_polygon(&polygons_a).xor(&to_geo_multi_polygon(&polygons_b));
                sym.0.is_empty() || sym.unsigned_area() < EPS
            }
            _ => false,
        };
        if !areal_equal {
            return Ok(false);
        }
        if !segment_sets_equal(&lines_a, &lines_b) {
            return Ok(false);
        }
        Ok(coordinate_sets_equal(&points_a, &points_b))
    }
}

// ============================================================================
// Conversions between the geometry model and the geo kernel
// ============================================================================

fn to_geo_coord(coord: &Coordinate) -> geo::Coord<f64> {
    geo::Coord {
        x: coord.x,
        y: coord.y,
    }
}

fn from_geo_coord(coord: geo::Coord<f64>) -> Coordinate {
    Coordinate::new(coord.x, coord.y)
}

fn to_geo_line_string(line: &LineString) -> geo::LineString<f64> {
    geo::LineString(line.coordinates().iter().map(to_geo_coord).collect())
}

fn to_geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    let exterior = geo::LineString(polygon.exterior().iter().map(to_geo_coord).collect());
    let interiors = polygon
        .holes()
        .iter()
        .map(|hole| geo::LineString(hole.iter().map(to_geo_coord).collect()))
        .collect();
    geo::Polygon::new(exterior, interiors)
}

fn to_geo_multi_polygon(polygons: &[Polygon]) -> geo::MultiPolygon<f64> {
    geo::MultiPolygon(polygons.iter().map(to_geo_polygon).collect())
}

fn to_geo_geometry(geometry: &Geometry) -> geo::Geometry<f64> {
    match geometry {
        Geometry::Point(coord) => geo::Geometry::Point(geo::Point::new(coord.x, coord.y)),
        Geometry::MultiPoint(coords) => geo::Geometry::MultiPoint(geo::MultiPoint(
            coords.iter().map(|c| geo::Point::new(c.x, c.y)).collect(),
        )),
        Geometry::LineString(line) => geo::Geometry::LineString(to_geo_line_string(line)),
        Geometry::MultiLineString(lines) => geo::Geometry::MultiLineString(geo::MultiLineString(
            lines.iter().map(to_geo_line_string).collect(),
        )),
        Geometry::Polygon(polygon) => geo::Geometry::Polygon(to_geo_polygon(polygon)),
        Geometry::MultiPolygon(polygons) => {
            geo::Geometry::MultiPolygon(to_geo_multi_polygon(polygons))
        }
        Geometry::Collection(members) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection(members.iter().map(to_geo_geometry).collect()),
        ),
    }
}

fn from_geo_line_string(line: &geo::LineString<f64>) -> GeometryResult<LineString> {
    LineString::new(line.coords().map(|c| from_geo_coord(*c)).collect())
}

fn from_geo_polygon(polygon: &geo::Polygon<f64>) -> GeometryResult<Polygon> {
    let exterior = polygon
        .exterior()
        .coords()
        .map(|c| from_geo_coord(*c))
        .collect();
    let holes = polygon
        .interiors()
        .iter()
        .map(|ring| ring.coords().map(|c| from_geo_coord(*c)).collect())
        .collect();
    Polygon::new(exterior, holes)
}

fn components(geometry: &Geometry) -> (Vec<Coordinate>, Vec<LineString>, Vec<Polygon>) {
    let mut points = vec![];
    let mut lines = vec![];
    let mut polygons = vec![];
    geometry.flatten_into(&mut points, &mut lines, &mut polygons);
    (points, lines, polygons)
}

// ============================================================================
// Intersection cases
// ============================================================================

fn puntal_intersection(points: &Geometry, other: &Geometry) -> Geometry {
    let (coords, _, _) = components(points);
    let other_geo = to_geo_geometry(other);
    let mut kept: Vec<Coordinate> = vec![];
    for coord in coords {
        if kept.contains(&coord) {
            continue;
        }
        if geo::Point::new(coord.x, coord.y).intersects(&other_geo) {
            kept.push(coord);
        }
    }
    puntal_geometry(kept).unwrap_or_else(Geometry::empty)
}

fn areal_intersection(a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
    let (_, _, polygons_a) = components(a);
    let (_, _, polygons_b) = components(b);
    let clipped = to_geo_multi_polygon(&polygons_a).intersection(&to_geo_multi_polygon(&polygons_b));
    if let Some(areal) = areal_geometry(clipped)? {
        return Ok(areal);
    }
    log::trace!("areal intersection degenerated to boundary contact");
    let (segments, points) = segment_contacts(
        &boundary_segments(&polygons_a),
        &boundary_segments(&polygons_b),
    );
    contact_geometry(segments, points)
}

fn line_areal_intersection(lineal: &Geometry, areal: &Geometry) -> GeometryResult<Geometry> {
    let (_, lines, _) = components(lineal);
    let (_, _, polygons) = components(areal);
    let multi_line = geo::MultiLineString(lines.iter().map(to_geo_line_string).collect());
    let clipped = to_geo_multi_polygon(&polygons).clip(&multi_line, false);

    let mut kept = vec![];
    for line in &clipped.0 {
        if line.coords().count() >= 2 && geo_line_length(line) > EPS {
            kept.push(from_geo_line_string(line)?);
        }
    }
    if !kept.is_empty() {
        return Ok(lineal_geometry(kept).unwrap_or_else(Geometry::empty));
    }

    // The lines only touch the boundary.
    let (segments, points) =
        segment_contacts(&line_segments(&lines), &boundary_segments(&polygons));
    contact_geometry(segments, points)
}

fn line_line_intersection(a: &Geometry, b: &Geometry) -> GeometryResult<Geometry> {
    let (_, lines_a, _) = components(a);
    let (_, lines_b, _) = components(b);
    let (segments, points) = segment_contacts(&line_segments(&lines_a), &line_segments(&lines_b));
    contact_geometry(segments, points)
}

// ============================================================================
// Segment-level boundary contact
// ============================================================================

fn line_segments(lines: &[LineString]) -> Vec<geo::Line<f64>> {
    lines
        .iter()
        .flat_map(|line| {
            line.coordinates()
                .iter()
                .tuple_windows()
                .map(|(a, b)| geo::Line::new(to_geo_coord(a), to_geo_coord(b)))
        })
        .filter(|segment| segment.start != segment.end)
        .collect()
}

fn boundary_segments(polygons: &[Polygon]) -> Vec<geo::Line<f64>> {
    let mut segments = vec![];
    for polygon in polygons {
        push_ring_segments(polygon.exterior(), &mut segments);
        for hole in polygon.holes() {
            push_ring_segments(hole, &mut segments);
        }
    }
    segments
}

fn push_ring_segments(ring: &[Coordinate], out: &mut Vec<geo::Line<f64>>) {
    out.extend(
        ring.iter()
            .tuple_windows()
            .map(|(a, b)| geo::Line::new(to_geo_coord(a), to_geo_coord(b)))
            .filter(|segment| segment.start != segment.end),
    );
}

/// Intersects every segment of `a` with every segment of `b`, collecting
/// collinear overlaps as segments and crossings/touches as points. Points
/// already covered by a collected segment are dropped.
fn segment_contacts(
    a: &[geo::Line<f64>],
    b: &[geo::Line<f64>],
) -> (Vec<(Coordinate, Coordinate)>, Vec<Coordinate>) {
    let mut segments: Vec<(Coordinate, Coordinate)> = vec![];
    let mut touches: Vec<Coordinate> = vec![];

    for seg_a in a {
        for seg_b in b {
            match line_intersection(*seg_a, *seg_b) {
                Some(LineIntersection::Collinear { intersection }) => {
                    let start = from_geo_coord(intersection.start);
                    let end = from_geo_coord(intersection.end);
                    if start == end {
                        touches.push(start);
                    } else {
                        let segment = ordered_segment(start, end);
                        if !segments.contains(&segment) {
                            segments.push(segment);
                        }
                    }
                }
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    touches.push(from_geo_coord(intersection));
                }
                None => {}
            }
        }
    }

    let mut points: Vec<Coordinate> = vec![];
    for touch in touches {
        if points.contains(&touch) {
            continue;
        }
        if segments
            .iter()
            .any(|(start, end)| point_on_segment(&touch, start, end))
        {
            continue;
        }
        points.push(touch);
    }

    (segments, points)
}

fn contact_geometry(
    segments: Vec<(Coordinate, Coordinate)>,
    points: Vec<Coordinate>,
) -> GeometryResult<Geometry> {
    let lines = segments
        .into_iter()
        .map(|(start, end)| LineString::new(vec![start, end]))
        .collect::<GeometryResult<Vec<_>>>()?;

    let mut parts = vec![];
    if let Some(geometry) = lineal_geometry(lines) {
        parts.push(geometry);
    }
    if let Some(geometry) = puntal_geometry(points) {
        parts.push(geometry);
    }
    Ok(assemble(parts))
}

fn ordered_segment(a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
    if (a.x, a.y) <= (b.x, b.y) {
        (a, b)
    } else {
        (b, a)
    }
}

fn point_on_segment(point: &Coordinate, start: &Coordinate, end: &Coordinate) -> bool {
    let cross = (end.x - start.x) * (point.y - start.y) - (end.y - start.y) * (point.x - start.x);
    if cross.abs() > EPS {
        return false;
    }
    let dot = (point.x - start.x) * (end.x - start.x) + (point.y - start.y) * (end.y - start.y);
    let len_sq = (end.x - start.x).powi(2) + (end.y - start.y).powi(2);
    dot >= -EPS && dot <= len_sq + EPS
}

fn geo_line_length(line: &geo::LineString<f64>) -> f64 {
    line.coords()
        .tuple_windows()
        .map(|(a, b)| ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt())
        .sum()
}

// ============================================================================
// Result shaping
// ============================================================================

/// Normalizes a boolean-op result: drops sliver polygons below `EPS` area,
/// unwraps a single polygon, keeps genuine multipolygons.
fn areal_geometry(mp: geo::MultiPolygon<f64>) -> GeometryResult<Option<Geometry>> {
    let mut polygons = vec![];
    for polygon in &mp.0 {
        if polygon.unsigned_area() > EPS {
            polygons.push(from_geo_polygon(polygon)?);
        }
    }
    Ok(match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(polygons)),
    })
}

fn lineal_geometry(mut lines: Vec<LineString>) -> Option<Geometry> {
    match lines.len() {
        0 => None,
        1 => lines.pop().map(Geometry::LineString),
        _ => Some(Geometry::MultiLineString(lines)),
    }
}

fn puntal_geometry(mut points: Vec<Coordinate>) -> Option<Geometry> {
    match points.len() {
        0 => None,
        1 => points.pop().map(Geometry::Point),
        _ => Some(Geometry::MultiPoint(points)),
    }
}

fn assemble(mut parts: Vec<Geometry>) -> Geometry {
    match parts.len() {
        0 => Geometry::empty(),
        1 => parts.pop().unwrap_or_else(Geometry::empty),
        _ => Geometry::Collection(parts),
    }
}

// ============================================================================
// Shape equality helpers
// ============================================================================

fn coordinate_sets_equal(a: &[Coordinate], b: &[Coordinate]) -> bool {
    let set_a = dedup_coords(a);
    let set_b = dedup_coords(b);
    set_a.len() == set_b.len() && set_a.iter().all(|coord| set_b.contains(coord))
}

fn dedup_coords(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = vec![];
    for coord in coords {
        if !out.contains(coord) {
            out.push(*coord);
        }
    }
    out
}

/// Compares two line sets as point sets: every segment is split at every
/// endpoint of either set that falls on it, then the canonical segment sets
/// are compared. This makes the comparison tolerant of segment subdivision
/// and direction.
fn segment_sets_equal(a: &[LineString], b: &[LineString]) -> bool {
    let mut cuts: Vec<Coordinate> = vec![];
    for line in a.iter().chain(b.iter()) {
        for coord in line.coordinates() {
            if !cuts.contains(coord) {
                cuts.push(*coord);
            }
        }
    }
    canonical_segments(a, &cuts) == canonical_segments(b, &cuts)
}

fn canonical_segments(lines: &[LineString], cuts: &[Coordinate]) -> Vec<[(u64, u64); 2]> {
    let mut out = vec![];
    for line in lines {
        for (start, end) in line.coordinates().iter().tuple_windows() {
            if start == end {
                continue;
            }
            let mut waypoints = vec![*start, *end];
            for cut in cuts {
                if cut != start && cut != end && point_on_segment(cut, start, end) {
                    waypoints.push(*cut);
                }
            }
            waypoints.sort_by(|p, q| {
                start
                    .distance(p)
                    .total_cmp(&start.distance(q))
            });
            for (from, to) in waypoints.iter().tuple_windows() {
                if from == to {
                    continue;
                }
                let (lo, hi) = ordered_segment(*from, *to);
                out.push([(lo.x.to_bits(), lo.y.to_bits()), (hi.x.to_bits(), hi.y.to_bits())]);
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wkt::parse_wkt;

    fn engine() -> CartesianEngine {
        CartesianEngine
    }

    fn square(min_x: f64, min_y: f64) -> Geometry {
        Geometry::rectangle(min_x, min_y, min_x + 1.0, min_y + 1.0)
    }

    #[test]
    fn test_union_of_adjacent_squares_merges() {
        let engine = engine();
        let merged = engine.union(&square(1.0, 0.0), &square(2.0, 0.0)).unwrap();
        let expected = parse_wkt("POLYGON((1 0, 1 1, 3 1, 3 0, 1 0))").unwrap();
        assert!(engine.equals(&merged, &expected).unwrap());
        assert!(matches!(merged, Geometry::Polygon(_)));
    }

    #[test]
    fn test_union_of_disjoint_squares_is_multipolygon() {
        let engine = engine();
        let apart = engine.union(&square(0.0, 0.0), &square(5.0, 5.0)).unwrap();
        assert_eq!(apart.num_geometries(), 2);
        assert!(matches!(apart, Geometry::MultiPolygon(_)));
    }

    #[test]
    fn test_union_is_commutative() {
        let engine = engine();
        let ab = engine.union(&square(1.0, 0.0), &square(1.0, 1.0)).unwrap();
        let ba = engine.union(&square(1.0, 1.0), &square(1.0, 0.0)).unwrap();
        assert!(engine.equals(&ab, &ba).unwrap());
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let engine = engine();
        let geom = square(1.0, 0.0);
        assert_eq!(engine.union(&geom, &Geometry::empty()).unwrap(), geom);
        assert_eq!(engine.union(&Geometry::empty(), &geom).unwrap(), geom);
    }

    #[test]
    fn test_union_absorbs_interior_point() {
        let engine = engine();
        let merged = engine
            .union(&square(0.0, 0.0), &Geometry::point(0.5, 0.5))
            .unwrap();
        assert!(engine.equals(&merged, &square(0.0, 0.0)).unwrap());
    }

    #[test]
    fn test_union_keeps_exterior_point() {
        let engine = engine();
        let merged = engine
            .union(&square(0.0, 0.0), &Geometry::point(5.0, 5.0))
            .unwrap();
        assert!(matches!(merged, Geometry::Collection(_)));
        assert_eq!(merged.num_geometries(), 2);
    }

    #[test]
    fn test_intersection_of_overlapping_squares() {
        let engine = engine();
        let a = Geometry::rectangle(0.0, 0.0, 2.0, 2.0);
        let b = Geometry::rectangle(1.0, 1.0, 3.0, 3.0);
        let overlap = engine.intersection(&a, &b).unwrap();
        let expected = Geometry::rectangle(1.0, 1.0, 2.0, 2.0);
        assert!(engine.equals(&overlap, &expected).unwrap());
    }

    #[test]
    fn test_intersection_of_edge_abutting_squares_is_line() {
        let engine = engine();
        let lower = parse_wkt("POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))").unwrap();
        let upper = parse_wkt("POLYGON((1 1, 2 1, 2 2, 1 2, 1 1))").unwrap();
        let shared = engine.intersection(&lower, &upper).unwrap();
        let expected = parse_wkt("LINESTRING(1 1, 2 1)").unwrap();
        assert!(engine.equals(&shared, &expected).unwrap());
    }

    #[test]
    fn test_intersection_of_corner_touching_squares_is_point() {
        let engine = engine();
        let shared = engine.intersection(&square(1.0, 0.0), &square(2.0, 1.0)).unwrap();
        assert!(engine
            .equals(&shared, &Geometry::point(2.0, 1.0))
            .unwrap());
    }

    #[test]
    fn test_intersection_of_disjoint_squares_is_empty() {
        let engine = engine();
        let shared = engine.intersection(&square(0.0, 0.0), &square(5.0, 5.0)).unwrap();
        assert!(shared.is_empty());
    }

    #[test]
    fn test_line_touching_square_intersects_to_point() {
        let engine = engine();
        let line = parse_wkt("LINESTRING(1 1, 2 1)").unwrap();
        let right = parse_wkt("POLYGON((2 1, 3 1, 3 2, 2 2, 2 1))").unwrap();
        let shared = engine.intersection(&line, &right).unwrap();
        assert!(engine
            .equals(&shared, &Geometry::point(2.0, 1.0))
            .unwrap());
    }

    #[test]
    fn test_line_inside_square_survives_intersection() {
        let engine = engine();
        let line = parse_wkt("LINESTRING(0.25 0.5, 0.75 0.5)").unwrap();
        let shared = engine.intersection(&line, &square(0.0, 0.0)).unwrap();
        assert!(engine.equals(&shared, &line).unwrap());
    }

    #[test]
    fn test_point_on_boundary_intersects_square() {
        let engine = engine();
        let point = Geometry::point(2.0, 1.0);
        let shared = engine.intersection(&point, &square(2.0, 0.0)).unwrap();
        assert_eq!(shared, point);
    }

    #[test]
    fn test_equals_tolerates_ring_rotation_and_orientation() {
        let engine = engine();
        let a = parse_wkt("POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))").unwrap();
        let rotated = parse_wkt("POLYGON((2 0, 2 1, 1 1, 1 0, 2 0))").unwrap();
        let reversed = parse_wkt("POLYGON((1 0, 1 1, 2 1, 2 0, 1 0))").unwrap();
        assert!(engine.equals(&a, &rotated).unwrap());
        assert!(engine.equals(&a, &reversed).unwrap());
    }

    #[test]
    fn test_equals_tolerates_collinear_vertices() {
        let engine = engine();
        let plain = parse_wkt("POLYGON((1 0, 3 0, 3 1, 1 1, 1 0))").unwrap();
        let subdivided = parse_wkt("POLYGON((1 0, 2 0, 3 0, 3 1, 2 1, 1 1, 1 0))").unwrap();
        assert!(engine.equals(&plain, &subdivided).unwrap());
    }

    #[test]
    fn test_equals_tolerates_line_subdivision() {
        let engine = engine();
        let whole = parse_wkt("LINESTRING(0 0, 2 0)").unwrap();
        let split = parse_wkt("MULTILINESTRING((0 0, 1 0), (1 0, 2 0))").unwrap();
        assert!(engine.equals(&whole, &split).unwrap());
    }

    #[test]
    fn test_equals_rejects_different_shapes() {
        let engine = engine();
        assert!(!engine.equals(&square(0.0, 0.0), &square(1.0, 0.0)).unwrap());
        assert!(!engine
            .equals(&square(0.0, 0.0), &Geometry::point(0.5, 0.5))
            .unwrap());
    }

    #[test]
    fn test_envelope_default_delegates_to_model() {
        let engine = engine();
        assert_eq!(
            engine.envelope(&square(1.0, 0.0)),
            Some(BoundingBox::new(1.0, 0.0, 2.0, 1.0))
        );
        assert_eq!(engine.envelope(&Geometry::empty()), None);
    }

    #[test]
    fn test_collection_preserves_order_and_multiplicity() {
        let engine = engine();
        let members = vec![square(0.0, 0.0), square(0.0, 0.0), Geometry::point(1.0, 1.0)];
        let collected = engine.collection(members.clone());
        assert_eq!(collected, Geometry::Collection(members));
    }
}
