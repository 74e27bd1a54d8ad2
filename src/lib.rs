//! Dimension-indexed JSON binding for [Zarr](https://zarr-specs.readthedocs.io/) array metadata.
//!
//! This crate provides bidirectional binders between JSON and the dimension-indexed fields of an array schema:
//! - [`ShapeVector`](dimension_indexed::ShapeVector): array extents in `[0, max_size]`,
//! - [`ChunkShapeVector`](dimension_indexed::ChunkShapeVector): chunk extents in `[1, max_size]`,
//! - [`DimensionLabelVector`](dimension_indexed::DimensionLabelVector): empty or unique dimension labels, and
//! - [`DimensionIndexedVector`](dimension_indexed::DimensionIndexedVector): arbitrary elements bound by an element binder.
//!
//! The length of every dimension-indexed field is the rank of the array.
//! When loading, a [`RankConstraint`](rank::RankConstraint) created for a single binding pass is shared by each binder of that pass.
//! The first field loaded fixes the rank and every later field must agree with it.
//! Callers are responsible for binding an authoritative field (typically the shape) first.
//!
//! [`ArraySchemaMetadata`](array_schema::ArraySchemaMetadata) composes these binders into a complete binding pass.
//!
//! ### Example
//! ```rust
//! # use zarrs_json_binding::array_schema::ArraySchemaMetadata;
//! let metadata = ArraySchemaMetadata::try_from(r#"{"shape": [2, 3, 4]}"#)?;
//! assert_eq!(metadata.labels, vec![""; 3]);
//! assert_eq!(metadata.to_string(), r#"{"shape":[2,3,4]}"#);
//! # Ok::<_, serde_json::Error>(())
//! ```
//!
//! ## Licence
//! `zarrs_json_binding` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod array_schema;
pub mod config;
pub mod dimension_indexed;
pub mod json_binding;
pub mod rank;

/// An index or extent along a dimension.
pub type Index = i64;

/// The maximum rank of an array.
pub const MAX_RANK: usize = 32;

/// The size of an unbounded dimension.
pub const INF_SIZE: Index = Index::MAX;

/// The default upper bound of a shape or chunk shape element.
pub const DEFAULT_MAX_SIZE: Index = INF_SIZE - 1;
