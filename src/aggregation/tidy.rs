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

//! Unrolls the axis-indexed response into one row per combination of
//! dimension members ("tidy" data).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MxError, Result};
use crate::response::{MxAggregationResponse, MxAxis, MxAxisDimension, MxMember};

/// One observation: a member from every dimension axis plus the value of
/// every measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxTidyRow {
    pub members: Vec<MxMember>,
    /// Position of each member within its axis.
    pub coords: Vec<usize>,
    pub values: Vec<Value>,
}

impl MxTidyRow {
    /// Number of cells: members followed by measure values.
    pub fn len(&self) -> usize {
        self.members.len() + self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all_measures_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxTidy {
    /// Metadata of the dimension axes (measures axis excluded).
    pub axes: Vec<MxAxisDimension>,
    pub measures: Vec<MxMember>,
    pub data: Vec<MxTidyRow>,
}

/// Cartesian product over the dimension axes, last axis varying fastest.
///
/// The tensor nests the last axis outermost, so each combination's
/// coordinates are reversed before indexing.
pub fn build_tidy(response: &MxAggregationResponse) -> Result<MxTidy> {
    response.validate_shape()?;

    let axes = response.dimension_axes();
    let sizes: Vec<usize> = axes.iter().map(MxAxis::len).collect();
    let measure_count = response.measures().len();
    let total: usize = sizes.iter().product();

    let mut data = Vec::with_capacity(total);
    let mut coords = vec![0usize; axes.len()];

    if total > 0 {
        loop {
            data.push(build_row(response, axes, &coords, measure_count)?);
            if !advance(&mut coords, &sizes) {
                break;
            }
        }
    }

    log::debug!(
        "aggregation.tidy: unrolled response - axes={}, measures={}, rows={}",
        axes.len(),
        measure_count,
        data.len()
    );

    Ok(MxTidy {
        axes: response.dimension_metadata().to_vec(),
        measures: response.measures().to_vec(),
        data,
    })
}

fn build_row(
    response: &MxAggregationResponse,
    axes: &[MxAxis],
    coords: &[usize],
    measure_count: usize,
) -> Result<MxTidyRow> {
    let members = axes
        .iter()
        .zip(coords)
        .map(|(axis, &i)| axis.members[i].clone())
        .collect();

    let values = (0..measure_count)
        .map(|m| {
            response.value_at(coords, m).cloned().ok_or_else(|| {
                MxError::shape(format!("no value at {:?} for measure {}", coords, m))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MxTidyRow {
        members,
        coords: coords.to_vec(),
        values,
    })
}

/// Odometer step; returns false once every combination has been visited.
fn advance(coords: &mut [usize], sizes: &[usize]) -> bool {
    for i in (0..coords.len()).rev() {
        coords[i] += 1;
        if coords[i] < sizes[i] {
            return true;
        }
        coords[i] = 0;
    }
    false
}
