//! # Geofold - Spatial Aggregates over Geometry Streams
//!
//! Geofold folds streams of `(group key, geometry)` rows into per-group
//! spatial aggregates:
//!
//! - **Count**: rows per group
//! - **Union**: geometric union, adjacent polygons dissolved
//! - **Intersection**: geometric intersection, degrading to lines or points
//!   where inputs only touch
//! - **Envelope**: minimal axis-aligned bounding box
//! - **Collect**: a geometry collection keeping order and multiplicity
//!
//! Grouping preserves first-seen key order unless an explicit key ordering
//! is requested, and result values follow the order aggregates were
//! requested in. Geometry math is delegated to a [`GeometryEngine`]; the
//! bundled [`CartesianEngine`] is a planar kernel over the `geo` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use geofold::{projection, parse_wkt, CartesianEngine, SortOrder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = CartesianEngine;
//!
//! // Four counties, two per state.
//! let rows = vec![
//!     ("AA", parse_wkt("POLYGON((1 0, 2 0, 2 1, 1 1, 1 0))")?),
//!     ("BB", parse_wkt("POLYGON((1 1, 2 1, 2 2, 1 2, 1 1))")?),
//!     ("BB", parse_wkt("POLYGON((2 1, 3 1, 3 2, 2 2, 2 1))")?),
//!     ("AA", parse_wkt("POLYGON((2 0, 3 0, 3 1, 2 1, 2 0))")?),
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
//!
//! ## Ungrouped Projections
//!
//! The same builder runs over a bare geometry stream, treating the whole
//! input as one implicit group:
//!
//! ```rust
//! use geofold::{projection, CartesianEngine, Geometry};
//!
//! # fn main() -> Result<(), geofold::AggregateError> {
//! let engine = CartesianEngine;
//! let values = projection()
//!     .count()
//!     .envelope()
//!     .over(&engine, vec![
//!         Geometry::rectangle(0.0, 0.0, 1.0, 1.0),
//!         Geometry::rectangle(2.0, 2.0, 3.0, 3.0),
//!     ])?;
//! assert_eq!(values[0].as_count(), Some(2));
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod bounding_box;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod projection;
pub mod wkt;

// Re-export geometry model types
pub use bounding_box::BoundingBox;
pub use geometry::{Coordinate, Dimension, Geometry, LineString, Polygon};
pub use wkt::parse_wkt;

// Re-export the engine boundary
pub use engine::{CartesianEngine, GeometryEngine};

// Re-export the aggregation surface
pub use aggregate::{AggregateValue, SpatialAggregate};
pub use projection::{projection, GroupRow, SortOrder, SpatialProjection};

// Re-export error types
pub use errors::{AggregateError, AggregateResult, GeometryError, GeometryResult};
