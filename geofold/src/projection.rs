//! Fluent projection API: request aggregates, run them over row streams.
//!
//! `projection()` is the entry point. Aggregates are requested in order and
//! the values in every result row follow that order. Execution is a single
//! forward pass over the input; cursor-like sources are consumed once.
//!
//! ## Example
//!
//! ```rust
//! use geofold::{projection, CartesianEngine, Geometry, SortOrder};
//!
//! # fn main() -> Result<(), geofold::AggregateError> {
//! let engine = CartesianEngine;
//! let rows = vec![
//!     ("AA", Geometry::rectangle(1.0, 0.0, 2.0, 1.0)),
//!     ("BB", Geometry::rectangle(1.0, 1.0, 2.0, 2.0)),
//!     ("BB", Geometry::rectangle(2.0, 1.0, 3.0, 2.0)),
//!     ("AA", Geometry::rectangle(2.0, 0.0, 3.0, 1.0)),
//! ];
//!
//! let results = projection()
//!     .count()
//!     .union()
//!     .order_by_key(SortOrder::Ascending)
//!     .over_grouped(&engine, rows)?;
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].key, "AA");
//! assert_eq!(results[0].values[0].as_count(), Some(2));
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::aggregate::{reduce, AggregateValue, SpatialAggregate};
use crate::engine::GeometryEngine;
use crate::errors::AggregateResult;
use crate::geometry::Geometry;

/// Explicit ordering of grouped result rows by group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One grouped result row: the group key plus the requested aggregate
/// values in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow<K> {
    pub key: K,
    pub values: Vec<AggregateValue>,
}

/// Creates a new projection builder.
///
/// This is the entry point for the fluent API.
pub fn projection() -> SpatialProjection {
    SpatialProjection::default()
}

/// A projection over a stream of geometry rows.
///
/// Holds the requested aggregates (in request order) and an optional
/// explicit key ordering. Pure value type; running it does not mutate it,
/// so one projection can be reused across independent inputs.
#[derive(Debug, Clone, Default)]
pub struct SpatialProjection {
    aggregates: Vec<SpatialAggregate>,
    order: Option<SortOrder>,
}

impl SpatialProjection {
    /// Requests a row count.
    pub fn count(mut self) -> Self {
        self.aggregates.push(SpatialAggregate::Count);
        self
    }

    /// Requests the geometric union of each group.
    pub fn union(mut self) -> Self {
        self.aggregates.push(SpatialAggregate::Union);
        self
    }

    /// Requests the geometric intersection of each group.
    pub fn intersection(mut self) -> Self {
        self.aggregates.push(SpatialAggregate::Intersection);
        self
    }

    /// Requests the bounding envelope of each group.
    pub fn envelope(mut self) -> Self {
        self.aggregates.push(SpatialAggregate::Envelope);
        self
    }

    /// Requests the geometry collection of each group.
    pub fn collect(mut self) -> Self {
        self.aggregates.push(SpatialAggregate::Collect);
        self
    }

    /// Orders grouped result rows by group key instead of first-seen order.
    pub fn order_by_key(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// The requested aggregates, in request order.
    pub fn aggregates(&self) -> &[SpatialAggregate] {
        &self.aggregates
    }

    /// Runs the projection over ungrouped rows.
    ///
    /// All rows form one implicit group; the result is that group's values
    /// in request order. Empty input is an empty group: total aggregates
    /// (count, collect) still produce values, the rest fail.
    pub fn over<E, I>(&self, engine: &E, geometries: I) -> AggregateResult<Vec<AggregateValue>>
    where
        E: GeometryEngine,
        I: IntoIterator<Item = Geometry>,
    {
        let geometries: Vec<Geometry> = geometries.into_iter().collect();
        log::debug!(
            "running {} aggregate(s) over {} ungrouped row(s)",
            self.aggregates.len(),
            geometries.len()
        );
        self.aggregates
            .iter()
            .map(|aggregate| reduce(engine, *aggregate, &geometries, &None))
            .collect()
    }

    /// Runs the projection over grouped rows.
    ///
    /// Rows are bucketed by key, keeping first-seen key order and the input
    /// order of rows within each bucket. Each group is then reduced
    /// independently; the first failing group aborts the run with an error
    /// annotated with that group's key. Empty input yields zero rows.
    pub fn over_grouped<E, K, I>(&self, engine: &E, rows: I) -> AggregateResult<Vec<GroupRow<K>>>
    where
        E: GeometryEngine,
        K: Eq + Hash + Ord + Clone + Debug,
        I: IntoIterator<Item = (K, Geometry)>,
    {
        let mut groups: IndexMap<K, Vec<Geometry>> = IndexMap::new();
        for (key, geometry) in rows {
            groups.entry(key).or_default().push(geometry);
        }
        log::debug!(
            "running {} aggregate(s) over {} group(s)",
            self.aggregates.len(),
            groups.len()
        );

        if let Some(order) = self.order {
            groups.sort_by(|key_a, _, key_b, _| match order {
                SortOrder::Ascending => key_a.cmp(key_b),
                SortOrder::Descending => key_b.cmp(key_a),
            });
        }

        groups
            .iter()
            .map(|(key, geometries)| {
                let label = Some(format!("{key:?}"));
                let values = self
                    .aggregates
                    .iter()
                    .map(|aggregate| reduce(engine, *aggregate, geometries, &label))
                    .collect::<AggregateResult<Vec<_>>>()?;
                Ok(GroupRow {
                    key: key.clone(),
                    values,
                })
            })
            .collect()
    }
}
