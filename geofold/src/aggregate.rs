//! Aggregate reducers: fold one group's geometries into a single value.

use crate::engine::GeometryEngine;
use crate::errors::AggregateError;
use crate::geometry::Geometry;

/// The spatial aggregates a projection can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialAggregate {
    /// Number of rows in the group.
    Count,
    /// Geometric union of the group's geometries.
    Union,
    /// Geometric intersection of the group's geometries.
    Intersection,
    /// Minimal axis-aligned bounding box of the group, as a geometry.
    Envelope,
    /// Collection of the group's geometries, order and multiplicity kept.
    Collect,
}

impl SpatialAggregate {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            SpatialAggregate::Count => "count",
            SpatialAggregate::Union => "union",
            SpatialAggregate::Intersection => "intersection",
            SpatialAggregate::Envelope => "envelope",
            SpatialAggregate::Collect => "collect",
        }
    }
}

/// One computed aggregate value.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateValue {
    /// A row count.
    Count(u64),
    /// A geometry result.
    Geometry(Geometry),
}

impl AggregateValue {
    /// The count, if this value is a count.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            AggregateValue::Count(count) => Some(*count),
            AggregateValue::Geometry(_) => None,
        }
    }

    /// The geometry, if this value is a geometry.
    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            AggregateValue::Geometry(geometry) => Some(geometry),
            AggregateValue::Count(_) => None,
        }
    }
}

/// Reduces one group's geometries into a single aggregate value.
///
/// `key` is the display form of the group key, carried only so that errors
/// are annotated with the group they arose in. Count and Collect have
/// identity elements and are total; Union, Intersection and Envelope fail
/// on empty groups.
pub(crate) fn reduce<E: GeometryEngine>(
    engine: &E,
    aggregate: SpatialAggregate,
    geometries: &[Geometry],
    key: &Option<String>,
) -> Result<AggregateValue, AggregateError> {
    match aggregate {
        SpatialAggregate::Count => Ok(AggregateValue::Count(geometries.len() as u64)),
        SpatialAggregate::Collect => Ok(AggregateValue::Geometry(
            engine.collection(geometries.to_vec()),
        )),
        SpatialAggregate::Union => fold_geometries(engine, aggregate, geometries, key, E::union),
        SpatialAggregate::Intersection => {
            fold_geometries(engine, aggregate, geometries, key, E::intersection)
        }
        SpatialAggregate::Envelope => {
            let bbox = geometries
                .iter()
                .filter_map(|geometry| engine.envelope(geometry))
                .reduce(|acc, bbox| acc.merged(&bbox));
            match bbox {
                Some(bbox) => Ok(AggregateValue::Geometry(bbox.to_geometry())),
                None => Err(empty_group(aggregate, key)),
            }
        }
    }
}

fn fold_geometries<E: GeometryEngine>(
    engine: &E,
    aggregate: SpatialAggregate,
    geometries: &[Geometry],
    key: &Option<String>,
    op: impl Fn(&E, &Geometry, &Geometry) -> crate::errors::GeometryResult<Geometry>,
) -> Result<AggregateValue, AggregateError> {
    let mut iter = geometries.iter();
    let first = iter.next().ok_or_else(|| empty_group(aggregate, key))?;
    let mut acc = first.clone();
    for geometry in iter {
        acc = op(engine, &acc, geometry).map_err(|source| AggregateError::Engine {
            key: key.clone(),
            source,
        })?;
    }
    Ok(AggregateValue::Geometry(acc))
}

fn empty_group(aggregate: SpatialAggregate, key: &Option<String>) -> AggregateError {
    AggregateError::EmptyGroup {
        aggregate: aggregate.name(),
        key: key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding_box::BoundingBox;
    use crate::engine::CartesianEngine;

    fn squares() -> Vec<Geometry> {
        vec![
            Geometry::rectangle(1.0, 0.0, 2.0, 1.0),
            Geometry::rectangle(1.0, 1.0, 2.0, 2.0),
            Geometry::rectangle(2.0, 1.0, 3.0, 2.0),
            Geometry::rectangle(2.0, 0.0, 3.0, 1.0),
        ]
    }

    #[test]
    fn test_count_counts_rows() {
        let engine = CartesianEngine;
        let value = reduce(&engine, SpatialAggregate::Count, &squares(), &None).unwrap();
        assert_eq!(value, AggregateValue::Count(4));
    }

    #[test]
    fn test_count_of_empty_group_is_zero() {
        let engine = CartesianEngine;
        let value = reduce(&engine, SpatialAggregate::Count, &[], &None).unwrap();
        assert_eq!(value, AggregateValue::Count(0));
    }

    #[test]
    fn test_collect_preserves_cardinality_and_order() {
        let engine = CartesianEngine;
        let input = squares();
        let value = reduce(&engine, SpatialAggregate::Collect, &input, &None).unwrap();
        assert_eq!(
            value.as_geometry().unwrap(),
            &Geometry::Collection(input)
        );
    }

    #[test]
    fn test_collect_of_empty_group_is_empty_collection() {
        let engine = CartesianEngine;
        let value = reduce(&engine, SpatialAggregate::Collect, &[], &None).unwrap();
        assert!(value.as_geometry().unwrap().is_empty());
    }

    #[test]
    fn test_union_fold_is_order_independent() {
        let engine = CartesianEngine;
        let forward = reduce(&engine, SpatialAggregate::Union, &squares(), &None).unwrap();
        let mut shuffled = squares();
        shuffled.reverse();
        shuffled.swap(0, 1);
        let backward = reduce(&engine, SpatialAggregate::Union, &shuffled, &None).unwrap();
        assert!(engine
            .equals(
                forward.as_geometry().unwrap(),
                backward.as_geometry().unwrap()
            )
            .unwrap());
    }

    #[test]
    fn test_intersection_degrades_to_shared_corner() {
        let engine = CartesianEngine;
        let value = reduce(&engine, SpatialAggregate::Intersection, &squares(), &None).unwrap();
        assert!(engine
            .equals(value.as_geometry().unwrap(), &Geometry::point(2.0, 1.0))
            .unwrap());
    }

    #[test]
    fn test_envelope_folds_member_boxes() {
        let engine = CartesianEngine;
        let value = reduce(&engine, SpatialAggregate::Envelope, &squares(), &None).unwrap();
        assert_eq!(
            value.as_geometry().unwrap().bounding_box(),
            Some(BoundingBox::new(1.0, 0.0, 3.0, 2.0))
        );
    }

    #[test]
    fn test_empty_group_errors_carry_aggregate_and_key() {
        let engine = CartesianEngine;
        let key = Some("\"AA\"".to_string());
        for aggregate in [
            SpatialAggregate::Union,
            SpatialAggregate::Intersection,
            SpatialAggregate::Envelope,
        ] {
            let err = reduce(&engine, aggregate, &[], &key).unwrap_err();
            match err {
                AggregateError::EmptyGroup { aggregate: name, key: err_key } => {
                    assert_eq!(name, aggregate.name());
                    assert_eq!(err_key.as_deref(), Some("\"AA\""));
                }
                other => panic!("expected EmptyGroup, got {other:?}"),
            }
        }
    }
}
