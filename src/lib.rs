//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Mx.
//! The Mx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Mx Core Library
//!
//! Client-side core for consuming multidimensional (OLAP) aggregation
//! results. It parses hierarchical member names and turns axis-indexed
//! aggregation responses into flat, tidy tables.
//!
//! ## Module Overview
//!
//! - **identifier**: Parser and canonical formatting for names such as
//!   `[Date].[Year].[2010]`
//! - **properties**: Resolution of `Dimension.Level.Property` paths and
//!   per-row property lookup
//! - **response**: Typed aggregation response (axes, members, values tensor)
//! - **cube**: Cube metadata (dimensions, hierarchies, levels, measures)
//! - **params**: Aggregation request parameters
//! - **aggregation**: Memoized tidy and table views of a response
//! - **export**: Writing tables as JSONL, JSON or CSV
//!
//! ## Feature Flags
//!
//! - `csv`: CSV export
//! - `full`: Enables all features (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use mxt::{MxAggregation, MxAggregationResponse, MxCube, MxIdentifier};
//!
//! let ident = MxIdentifier::parse("[Customers].[City].&[San Francisco]&CA&USA")?;
//! assert_eq!(ident[2].name(), "&San Francisco&CA&USA");
//!
//! let cube = MxCube::from_json_str(cube_json)?;
//! let params = cube
//!     .aggregation_params(&["[Date].[Year]"], &[], &["Sales"])?
//!     .with_parents(true);
//! let aggregation = MxAggregation::new(MxAggregationResponse::from_json_str(body)?, cube, params);
//! let table = aggregation.to_table(true)?;
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, MxError>`. Nothing is retried: the crate
//! performs no network I/O, so every error describes bad input data.

pub mod errors;
pub mod identifier;
pub mod properties;
pub mod response;
pub mod cube;
pub mod params;
pub mod aggregation;
pub mod export;

pub use errors::{MxError, Result};
pub use identifier::{MxIdentifier, MxIdentifierParser, MxQuoting, MxSegment};
pub use properties::{
    lookup_property_values, resolve_properties, MxDimensionProperties, MxLevelProperties,
    MxPropertyPath, MxPropertySpec, MxResolvedProperties,
};
pub use response::{
    MxAggregationResponse, MxAncestor, MxAxis, MxAxisDimension, MxMember, MxProperties,
};
pub use cube::{MxCube, MxDimension, MxHierarchy, MxLevel, MxMeasure};
pub use params::MxAggregationParams;
pub use aggregation::{MxAggregation, MxTidy, MxTidyRow, MxTidyTable};
pub use export::{MxOutputFormat, MxTableWriter, MxWriteStats, MxWriterConfig};
