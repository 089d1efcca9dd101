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

//! # Aggregation Module
//!
//! An [`MxAggregation`] owns one aggregation response together with the cube
//! it came from and the parameters that produced it, and exposes two lazily
//! computed views:
//!
//! - **Tidy** ([tidy.rs](tidy/index.html)): one row per combination of
//!   dimension members, with every measure value
//! - **Table** ([table.rs](table/index.html)): the tidy rows flattened into
//!   ID/caption columns, property columns and measure columns
//!
//! Both views are computed on first access and kept for the lifetime of the
//! aggregation. The response never changes, so the cached views are never
//! invalidated. Computation failures are returned to the caller and not
//! cached.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mxt::{MxAggregation, MxAggregationResponse, MxCube};
//!
//! let cube = Arc::new(MxCube::from_json_str(cube_json)?);
//! let params = cube.aggregation_params(&["[Date].[Year]"], &[], &["Sales"])?;
//! let response = MxAggregationResponse::from_json_str(body)?;
//!
//! let aggregation = MxAggregation::new(response, cube, params);
//! let table = aggregation.to_table(true)?;
//! println!("{} rows", table.len());
//! ```

pub mod table;
pub mod tidy;

pub use table::{build_table, MxTidyTable};
pub use tidy::{build_tidy, MxTidy, MxTidyRow};

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::cube::MxCube;
use crate::errors::Result;
use crate::params::MxAggregationParams;
use crate::response::{MxAggregationResponse, MxAxis, MxAxisDimension, MxMember};

/// An aggregation result with memoized tidy and table views.
#[derive(Debug)]
pub struct MxAggregation {
    response: MxAggregationResponse,
    cube: Arc<MxCube>,
    params: MxAggregationParams,
    url: Option<String>,
    tidy: OnceLock<MxTidy>,
    table_filtered: OnceLock<MxTidyTable>,
    table_unfiltered: OnceLock<MxTidyTable>,
}

impl MxAggregation {
    /// Wraps a response with the cube and parameters that produced it.
    pub fn new(
        response: MxAggregationResponse,
        cube: impl Into<Arc<MxCube>>,
        params: MxAggregationParams,
    ) -> Self {
        Self {
            response,
            cube: cube.into(),
            params,
            url: None,
            tidy: OnceLock::new(),
            table_filtered: OnceLock::new(),
            table_unfiltered: OnceLock::new(),
        }
    }

    /// Records the URL the response was fetched from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// URL recorded with [`with_url`](Self::with_url), if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn response(&self) -> &MxAggregationResponse {
        &self.response
    }

    pub fn cube(&self) -> &MxCube {
        &self.cube
    }

    pub fn params(&self) -> &MxAggregationParams {
        &self.params
    }

    /// All response axes, measures first.
    pub fn axes(&self) -> &[MxAxis] {
        &self.response.axes
    }

    pub fn measures(&self) -> &[MxMember] {
        self.response.measures()
    }

    /// Raw values tensor.
    pub fn values(&self) -> &Value {
        &self.response.values
    }

    pub fn axis_dimensions(&self) -> &[MxAxisDimension] {
        &self.response.axis_dimensions
    }

    /// The tidy view, computed on first call.
    pub fn tidy(&self) -> Result<&MxTidy> {
        if let Some(tidy) = self.tidy.get() {
            return Ok(tidy);
        }
        let tidy = build_tidy(&self.response)?;
        Ok(self.tidy.get_or_init(|| tidy))
    }

    /// The table view, computed on first call for each value of
    /// `filter_empty_measures`. Filtering drops rows whose measures are all
    /// null.
    pub fn to_table(&self, filter_empty_measures: bool) -> Result<&MxTidyTable> {
        let cell = if filter_empty_measures {
            &self.table_filtered
        } else {
            &self.table_unfiltered
        };

        if let Some(table) = cell.get() {
            return Ok(table);
        }
        let table = build_table(self.tidy()?, &self.cube, &self.params, filter_empty_measures)?;
        Ok(cell.get_or_init(|| table))
    }
}
