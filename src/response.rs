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

//! # Mx Response Module
//!
//! Typed view of the document returned by the aggregation service.
//!
//! ## Shape
//!
//! ```json
//! {
//!   "axes": [
//!     {"members": [{"name": "FOB US", "caption": "FOB US"}]},
//!     {"members": [{"key": 2010, "caption": "2010", "properties": {}}]}
//!   ],
//!   "axis_dimensions": [
//!     {"name": "Measures", "level": "MeasuresLevel", "level_depth": 0},
//!     {"name": "Date", "level": "Year", "level_depth": 1}
//!   ],
//!   "values": [[123.4]]
//! }
//! ```
//!
//! `axes[0]` is always the measures axis. The values tensor is nested with
//! the *last* dimension axis outermost and the measure index innermost, so a
//! response with axes `[measures, A, B]` is indexed `values[b][a][measure]`.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MxError, Result};

/// Member or ancestor property map.
pub type MxProperties = Map<String, Value>;

/// A containing member at a shallower level, as reported with `parents=true`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxAncestor {
    pub level_name: String,
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub properties: MxProperties,
}

/// One member of an axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxMember {
    /// Member key; numeric or textual depending on the level.
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub caption: String,
    /// Set on measures-axis members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub properties: MxProperties,
    /// Leaf-to-root ancestor chain, present only when parents were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<MxAncestor>>,
}

impl MxMember {
    /// Member with a key and caption and no properties or ancestors.
    pub fn new(key: impl Into<Value>, caption: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            caption: caption.into(),
            name: None,
            full_name: None,
            properties: MxProperties::new(),
            ancestors: None,
        }
    }

    /// Replaces the member's property map.
    pub fn with_properties(mut self, properties: MxProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Attaches a leaf-to-root ancestor chain.
    pub fn with_ancestors(mut self, ancestors: Vec<MxAncestor>) -> Self {
        self.ancestors = Some(ancestors);
        self
    }

    /// Ancestor chain, empty when none was reported.
    pub fn ancestors(&self) -> &[MxAncestor] {
        self.ancestors.as_deref().unwrap_or(&[])
    }

    /// Key rendered as text, for error messages and logs.
    pub fn key_text(&self) -> String {
        match &self.key {
            Value::String(s) => s.clone(),
            Value::Null => self.caption.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MxAxis {
    #[serde(default)]
    pub members: Vec<MxMember>,
}

impl MxAxis {
    pub fn new(members: Vec<MxMember>) -> Self {
        Self { members }
    }

    /// Number of members on the axis.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Per-axis metadata: which dimension and level produced the axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxAxisDimension {
    pub name: String,
    pub level: String,
    /// Distance from the hierarchy root to `level`.
    #[serde(default)]
    pub level_depth: usize,
}

impl MxAxisDimension {
    /// Axis metadata for `level` of dimension `name`.
    pub fn new(name: impl Into<String>, level: impl Into<String>, level_depth: usize) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            level_depth,
        }
    }
}

/// The aggregation result exactly as received from the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxAggregationResponse {
    pub axes: Vec<MxAxis>,
    pub axis_dimensions: Vec<MxAxisDimension>,
    #[serde(default)]
    pub values: Value,
}

impl MxAggregationResponse {
    /// Parses a response body.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Converts an already decoded JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads a response body from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Members of the measures axis; empty when the response has no axes.
    pub fn measures(&self) -> &[MxMember] {
        self.axes.first().map(|a| a.members.as_slice()).unwrap_or(&[])
    }

    /// Every axis except the measures axis.
    pub fn dimension_axes(&self) -> &[MxAxis] {
        self.axes.get(1..).unwrap_or(&[])
    }

    /// Metadata for [`dimension_axes`](Self::dimension_axes), in the same order.
    pub fn dimension_metadata(&self) -> &[MxAxisDimension] {
        self.axis_dimensions.get(1..).unwrap_or(&[])
    }

    /// Direct tensor lookup: `coords` are positional indices in axis
    /// declaration order (excluding measures).
    pub fn value_at(&self, coords: &[usize], measure: usize) -> Option<&Value> {
        let mut node = &self.values;
        for &index in coords.iter().rev() {
            node = node.as_array()?.get(index)?;
        }
        node.as_array()?.get(measure)
    }

    /// Checks that the values tensor has one nesting level per dimension
    /// axis plus one for measures, with lengths matching the axis sizes.
    pub fn validate_shape(&self) -> Result<()> {
        if self.axes.is_empty() {
            return Err(MxError::shape("response has no measures axis"));
        }
        if self.axis_dimensions.len() != self.axes.len() {
            return Err(MxError::shape(format!(
                "{} axes but {} axis dimensions",
                self.axes.len(),
                self.axis_dimensions.len()
            )));
        }

        let mut sizes: Vec<usize> = self.dimension_axes().iter().rev().map(MxAxis::len).collect();
        sizes.push(self.measures().len());

        check_level(&self.values, 0, &sizes)
    }
}

fn check_level(node: &Value, depth: usize, sizes: &[usize]) -> Result<()> {
    let items = node.as_array().ok_or_else(|| {
        MxError::shape(format!("expected an array at tensor depth {}", depth))
    })?;

    if items.len() != sizes[depth] {
        return Err(MxError::shape(format!(
            "tensor depth {} has {} entries, axis has {}",
            depth,
            items.len(),
            sizes[depth]
        )));
    }

    if depth + 1 < sizes.len() {
        for item in items {
            check_level(item, depth + 1, sizes)?;
        }
    }
    Ok(())
}
