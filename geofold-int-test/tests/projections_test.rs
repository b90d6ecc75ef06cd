//! End-to-end projection scenarios over the county dataset.
//!
//! Four unit squares tile the region x in [1, 3], y in [0, 2]; state "AA"
//! owns the bottom row and "BB" the top row. The scenarios cover every
//! aggregate, grouped and ungrouped, against exact expected geometries.

use geofold::{
    parse_wkt, projection, BoundingBox, CartesianEngine, GeometryEngine, SortOrder,
};
use geofold_int_test::test_util::{counties, county_boundaries, county_rows};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_count_and_union() {
    let engine = CartesianEngine;

    let values = projection()
        .count()
        .union()
        .over(&engine, county_boundaries())
        .unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(values[0].as_count(), Some(4));

    let expected =
        parse_wkt("POLYGON((1 0, 1 1, 1 2, 2 2, 3 2, 3 1, 3 0, 2 0, 1 0))").unwrap();
    let aggregated = values[1].as_geometry().unwrap();
    assert!(engine.equals(aggregated, &expected).unwrap());
}

#[test]
fn test_count_and_union_by_state() {
    let engine = CartesianEngine;

    let results = projection()
        .count()
        .union()
        .order_by_key(SortOrder::Ascending)
        .over_grouped(&engine, county_rows())
        .unwrap();

    assert_eq!(results.len(), 2);

    let result_aa = &results[0];
    let result_bb = &results[1];

    assert_eq!(result_aa.key, "AA");
    assert_eq!(result_bb.key, "BB");
    assert_eq!(result_aa.values[0].as_count(), Some(2));
    assert_eq!(result_bb.values[0].as_count(), Some(2));

    let expected_aa = parse_wkt("POLYGON((1 0, 1 1, 3 1, 3 0, 1 0))").unwrap();
    let expected_bb = parse_wkt("POLYGON((1 1, 1 2, 3 2, 3 1, 1 1))").unwrap();

    let aggregated_aa = result_aa.values[1].as_geometry().unwrap();
    let aggregated_bb = result_bb.values[1].as_geometry().unwrap();

    assert!(engine.equals(aggregated_aa, &expected_aa).unwrap());
    assert!(engine.equals(aggregated_bb, &expected_bb).unwrap());
}

#[test]
fn test_envelope_all() {
    let engine = CartesianEngine;

    let values = projection()
        .envelope()
        .over(&engine, county_boundaries())
        .unwrap();

    assert_eq!(values.len(), 1);
    let aggregated = values[0].as_geometry().unwrap();
    assert_eq!(
        aggregated.bounding_box(),
        Some(BoundingBox::new(1.0, 0.0, 3.0, 2.0))
    );
}

#[test]
fn test_collect_all() {
    let engine = CartesianEngine;

    let values = projection()
        .collect()
        .over(&engine, county_boundaries())
        .unwrap();

    assert_eq!(values.len(), 1);
    let aggregated = values[0].as_geometry().unwrap();
    assert_eq!(aggregated.num_geometries(), 4);
}

#[test]
fn test_intersection_all() {
    let engine = CartesianEngine;

    let values = projection()
        .intersection()
        .over(&engine, county_boundaries())
        .unwrap();

    assert_eq!(values.len(), 1);
    let aggregated = values[0].as_geometry().unwrap();
    let expected = parse_wkt("POINT(2 1)").unwrap();
    assert!(engine.equals(aggregated, &expected).unwrap());
}

#[test]
fn test_grouping_by_county_name_yields_singleton_groups() {
    let engine = CartesianEngine;

    let rows: Vec<_> = counties()
        .into_iter()
        .map(|county| (county.name, county.boundaries))
        .collect();

    let results = projection()
        .count()
        .order_by_key(SortOrder::Ascending)
        .over_grouped(&engine, rows)
        .unwrap();

    assert_eq!(results.len(), 4);
    let keys: Vec<_> = results.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["aaaa", "bbbb", "cccc", "dddd"]);
    assert!(results
        .iter()
        .all(|row| row.values[0].as_count() == Some(1)));
}
