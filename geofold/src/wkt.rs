//! WKT (Well-Known Text) parsing.
//!
//! Supports:
//! - POINT (x y)
//! - LINESTRING (x y, x y, ...)
//! - POLYGON ((x y, x y, ..., x y), (hole coords), ...)
//! - MULTIPOINT ((x y), (x y), ...) and MULTIPOINT (x y, x y, ...)
//! - MULTILINESTRING ((x y, x y, ...), ...)
//! - MULTIPOLYGON (((x y, ..., x y)), ...)
//! - GEOMETRYCOLLECTION (geometry, geometry, ...)
//! - EMPTY payloads for the multi and collection forms
//!
//! Writing WKT is the `Display` impls on [`Geometry`] and its parts.

use crate::errors::{GeometryError, GeometryResult};
use crate::geometry::{Coordinate, Geometry, LineString, Polygon};

/// Parses a WKT string into a [`Geometry`].
///
/// # Example
///
/// ```rust
/// use geofold::parse_wkt;
///
/// let polygon = parse_wkt("POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))")?;
/// assert_eq!(polygon.num_geometries(), 1);
/// # Ok::<(), geofold::GeometryError>(())
/// ```
pub fn parse_wkt(wkt: &str) -> GeometryResult<Geometry> {
    let wkt = wkt.trim();

    if let Some(rest) = wkt.strip_prefix("GEOMETRYCOLLECTION") {
        parse_wkt_collection(rest)
    } else if let Some(rest) = wkt.strip_prefix("MULTIPOINT") {
        parse_wkt_multipoint(rest)
    } else if let Some(rest) = wkt.strip_prefix("MULTILINESTRING") {
        parse_wkt_multilinestring(rest)
    } else if let Some(rest) = wkt.strip_prefix("MULTIPOLYGON") {
        parse_wkt_multipolygon(rest)
    } else if let Some(rest) = wkt.strip_prefix("POINT") {
        parse_wkt_point(rest)
    } else if let Some(rest) = wkt.strip_prefix("LINESTRING") {
        parse_wkt_linestring(rest)
    } else if let Some(rest) = wkt.strip_prefix("POLYGON") {
        parse_wkt_polygon(rest)
    } else {
        Err(GeometryError::InvalidWkt(format!(
            "unknown WKT geometry type: {}",
            wkt
        )))
    }
}

fn parse_wkt_point(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::empty());
    }
    let coords = parse_coordinate_list(s)?;
    if coords.len() != 1 {
        return Err(GeometryError::InvalidWkt(
            "POINT must have exactly one coordinate".to_string(),
        ));
    }
    Ok(Geometry::Point(coords[0]))
}

fn parse_wkt_linestring(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::empty());
    }
    let coords = parse_coordinate_list(s)?;
    Ok(Geometry::LineString(LineString::new(coords)?))
}

fn parse_wkt_polygon(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::empty());
    }
    Ok(Geometry::Polygon(parse_polygon_body(s)?))
}

fn parse_wkt_multipoint(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::MultiPoint(vec![]));
    }
    let body = strip_outer_parens(s)?;
    let coords = split_top_level(body)
        .into_iter()
        .map(|chunk| {
            let chunk = chunk.trim();
            // Both "(x y)" and bare "x y" member forms occur in the wild.
            let chunk = chunk
                .strip_prefix('(')
                .and_then(|inner| inner.strip_suffix(')'))
                .unwrap_or(chunk);
            parse_coordinate_pair(chunk)
        })
        .collect::<GeometryResult<Vec<_>>>()?;
    Ok(Geometry::MultiPoint(coords))
}

fn parse_wkt_multilinestring(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::MultiLineString(vec![]));
    }
    let lines = parse_ring_list(s)?
        .into_iter()
        .map(LineString::new)
        .collect::<GeometryResult<Vec<_>>>()?;
    Ok(Geometry::MultiLineString(lines))
}

fn parse_wkt_multipolygon(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::MultiPolygon(vec![]));
    }
    let body = strip_outer_parens(s)?;
    let polygons = split_top_level(body)
        .into_iter()
        .map(parse_polygon_body)
        .collect::<GeometryResult<Vec<_>>>()?;
    Ok(Geometry::MultiPolygon(polygons))
}

fn parse_wkt_collection(s: &str) -> GeometryResult<Geometry> {
    if is_empty_payload(s) {
        return Ok(Geometry::empty());
    }
    let body = strip_outer_parens(s)?;
    let members = split_top_level(body)
        .into_iter()
        .map(parse_wkt)
        .collect::<GeometryResult<Vec<_>>>()?;
    Ok(Geometry::Collection(members))
}

fn parse_polygon_body(s: &str) -> GeometryResult<Polygon> {
    let mut rings = parse_ring_list(s)?;
    if rings.is_empty() {
        return Err(GeometryError::InvalidWkt(
            "POLYGON must have at least one ring".to_string(),
        ));
    }
    let exterior = rings.remove(0);
    Polygon::new(exterior, rings)
}

fn is_empty_payload(s: &str) -> bool {
    s.trim() == "EMPTY"
}

/// Parses a parenthesized list of rings: `((x y, ...), (x y, ...), ...)`.
fn parse_ring_list(s: &str) -> GeometryResult<Vec<Vec<Coordinate>>> {
    let body = strip_outer_parens(s)?;
    split_top_level(body)
        .into_iter()
        .map(parse_coordinate_list)
        .collect()
}

/// Parses a parenthesized coordinate list: `(x y, x y, ...)`.
fn parse_coordinate_list(s: &str) -> GeometryResult<Vec<Coordinate>> {
    let body = strip_outer_parens(s)?;
    body.split(',').map(parse_coordinate_pair).collect()
}

fn parse_coordinate_pair(s: &str) -> GeometryResult<Coordinate> {
    let mut ordinates = s.split_whitespace();
    let x = parse_ordinate(ordinates.next(), s)?;
    let y = parse_ordinate(ordinates.next(), s)?;
    if ordinates.next().is_some() {
        return Err(GeometryError::InvalidWkt(format!(
            "expected two ordinates in coordinate: {}",
            s.trim()
        )));
    }
    Ok(Coordinate::new(x, y))
}

fn parse_ordinate(ordinate: Option<&str>, context: &str) -> GeometryResult<f64> {
    ordinate
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| GeometryError::InvalidWkt(format!("bad coordinate: {}", context.trim())))
}

fn strip_outer_parens(s: &str) -> GeometryResult<&str> {
    let s = s.trim();
    s.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GeometryError::InvalidWkt(format!("expected parenthesized list: {}", s)))
}

/// Splits a string at commas that sit outside any parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !s[start..].trim().is_empty() {
        parts.push(&s[start..]);
    }
    parts
}
