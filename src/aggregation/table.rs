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

//! # Tidy Table
//!
//! Flattens tidy rows into a header-annotated table. Column layout, left to
//! right:
//!
//! 1. per dimension axis, an `ID <caption>` / `<caption>` pair for every
//!    intermediate ancestor level (only when parents were requested), then an
//!    `ID <level>` / `<level>` pair for the drilled level
//! 2. one column per requested member property
//! 3. one column per measure
//!
//! Everything before the measures is the table index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::aggregation::tidy::{MxTidy, MxTidyRow};
use crate::cube::{MxCube, MxLevel};
use crate::errors::{MxError, Result};
use crate::params::MxAggregationParams;
use crate::properties::{lookup_property_values, resolve_properties, MxResolvedProperties};
use crate::response::MxMember;

const ID_PREFIX: &str = "ID ";

/// Flat, indexed result table.
///
/// Every row has one cell per column and `index_columns` never exceeds the
/// column count; deserialization goes through [`MxTidyTable::new`] to keep
/// it that way.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTidyTable")]
pub struct MxTidyTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    index_columns: usize,
}

/// Unchecked wire form of [`MxTidyTable`].
#[derive(Deserialize)]
struct RawTidyTable {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
    #[serde(default)]
    index_columns: usize,
}

impl TryFrom<RawTidyTable> for MxTidyTable {
    type Error = MxError;

    fn try_from(raw: RawTidyTable) -> Result<Self> {
        Self::new(raw.columns, raw.rows, raw.index_columns)
    }
}

impl MxTidyTable {
    /// Builds a table, rejecting ragged rows and an index wider than the
    /// column list.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>, index_columns: usize) -> Result<Self> {
        if index_columns > columns.len() {
            return Err(MxError::shape(format!(
                "{} index columns but only {} columns",
                index_columns,
                columns.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(MxError::shape(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            rows,
            index_columns,
        })
    }

    /// Column headers, index columns first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row cells, aligned with [`columns`](Self::columns).
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Count of leading non-measure columns.
    pub fn index_columns(&self) -> usize {
        self.index_columns
    }

    /// Headers of the index columns.
    pub fn index_names(&self) -> &[String] {
        &self.columns[..self.index_columns]
    }

    /// Headers of the measure columns.
    pub fn measure_names(&self) -> &[String] {
        &self.columns[self.index_columns..]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the first column called `name`.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let position = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[position]).collect())
    }

    /// Rows as JSON objects keyed by column name, in column order. When two
    /// columns share a name the later one wins.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Per-axis column plan computed once from the headers.
struct AxisPlan<'a> {
    dimension: &'a str,
    ancestor_levels: &'a [MxLevel],
}

/// Builds the table view of `tidy`.
pub fn build_table(
    tidy: &MxTidy,
    cube: &MxCube,
    params: &MxAggregationParams,
    filter_empty_measures: bool,
) -> Result<MxTidyTable> {
    let resolved = resolve_properties(&params.properties)?;
    let measure_headers = measure_headers(tidy, params)?;

    let mut columns = Vec::new();
    let mut plans = Vec::with_capacity(tidy.axes.len());

    for axis in &tidy.axes {
        let ancestor_levels: &[MxLevel] = if params.parents {
            cube.ancestor_levels(&axis.name, axis.level_depth)?
        } else {
            &[]
        };
        for level in ancestor_levels {
            columns.push(format!("{}{}", ID_PREFIX, level.display_caption()));
            columns.push(level.display_caption().to_string());
        }
        columns.push(format!("{}{}", ID_PREFIX, axis.level));
        columns.push(axis.level.clone());

        plans.push(AxisPlan {
            dimension: &axis.name,
            ancestor_levels,
        });
    }

    columns.extend(resolved.names.iter().cloned());
    let index_columns = columns.len();
    columns.extend(measure_headers);

    let mut rows = Vec::with_capacity(tidy.data.len());
    let mut dropped = 0usize;

    // rows are built before filtering; lookup errors must not depend on the flag
    for row in &tidy.data {
        let cells = build_row(row, tidy, &plans, &resolved, params.parents)?;
        if filter_empty_measures && !row.values.is_empty() && row.all_measures_null() {
            dropped += 1;
            continue;
        }
        rows.push(cells);
    }

    log::debug!(
        "aggregation.table: built table - columns={}, index_columns={}, rows={}, dropped_empty={}",
        columns.len(),
        index_columns,
        rows.len(),
        dropped
    );

    MxTidyTable::new(columns, rows, index_columns)
}

fn measure_headers(tidy: &MxTidy, params: &MxAggregationParams) -> Result<Vec<String>> {
    if params.measures.is_empty() {
        return Ok(tidy
            .measures
            .iter()
            .map(|m| {
                if m.caption.is_empty() {
                    m.name.clone().unwrap_or_default()
                } else {
                    m.caption.clone()
                }
            })
            .collect());
    }

    if params.measures.len() != tidy.measures.len() {
        return Err(MxError::shape(format!(
            "{} measures requested but the response has {}",
            params.measures.len(),
            tidy.measures.len()
        )));
    }

    Ok(params
        .measures
        .iter()
        .map(|m| m.display_caption().to_string())
        .collect())
}

fn build_row(
    row: &MxTidyRow,
    tidy: &MxTidy,
    plans: &[AxisPlan<'_>],
    resolved: &MxResolvedProperties,
    parents: bool,
) -> Result<Vec<Value>> {
    let mut cells = Vec::new();

    for ((member, axis), plan) in row.members.iter().zip(&tidy.axes).zip(plans) {
        if parents {
            let needed = axis.level_depth.saturating_sub(1);
            let ancestors = member.ancestors();
            if ancestors.len() < needed {
                // ancestors[k] sits at depth level_depth - 1 - k; report the
                // deepest one that is missing
                let missing_depth = needed - ancestors.len();
                let level = plan
                    .ancestor_levels
                    .get(missing_depth - 1)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| format!("depth {}", missing_depth));
                return Err(MxError::missing_ancestor(plan.dimension, level, member.key_text()));
            }
            for ancestor in ancestors[..needed].iter().rev() {
                cells.push(ancestor.key.clone());
                cells.push(Value::String(ancestor.caption.clone()));
            }
        }
        cells.push(member.key.clone());
        cells.push(Value::String(member.caption.clone()));
    }

    let members: Vec<&MxMember> = row.members.iter().collect();
    cells.extend(lookup_property_values(&members, &tidy.axes, resolved)?);
    cells.extend(row.values.iter().cloned());

    Ok(cells)
}
