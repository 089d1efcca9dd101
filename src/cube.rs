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

//! # Mx Cube Module
//!
//! Cube metadata as published by the aggregation service: dimensions with
//! their hierarchies and levels, and the measures that can be aggregated.
//! Fetching the document is the caller's business; this module only gives
//! it types and the lookups the tidy transform and request building need.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MxError, Result};
use crate::identifier::MxIdentifier;

const TIME_DIMENSION_TYPE: &str = "time";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxLevel {
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl MxLevel {
    pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caption: caption.into(),
            full_name: None,
        }
    }

    /// Caption used for column headers, falling back to the level name.
    pub fn display_caption(&self) -> &str {
        if self.caption.is_empty() {
            &self.name
        } else {
            &self.caption
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MxHierarchy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub levels: Vec<MxLevel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxDimension {
    pub name: String,
    #[serde(rename = "type", default)]
    pub dimension_type: String,
    #[serde(default)]
    pub hierarchies: Vec<MxHierarchy>,
}

impl MxDimension {
    /// True for dimensions of type `time`.
    pub fn is_time(&self) -> bool {
        self.dimension_type == TIME_DIMENSION_TYPE
    }

    /// Hierarchy at `index`, or a Cube error.
    pub fn hierarchy(&self, index: usize) -> Result<&MxHierarchy> {
        self.hierarchies.get(index).ok_or_else(|| {
            MxError::cube(format!(
                "dimension '{}' has no hierarchy #{}",
                self.name, index
            ))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxMeasure {
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub annotations: Map<String, Value>,
}

impl MxMeasure {
    pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caption: caption.into(),
            full_name: None,
            annotations: Map::new(),
        }
    }

    pub fn display_caption(&self) -> &str {
        if self.caption.is_empty() {
            &self.name
        } else {
            &self.caption
        }
    }
}

/// Cube metadata document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MxCube {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<MxDimension>,
    #[serde(default)]
    pub measures: Vec<MxMeasure>,
    #[serde(default)]
    pub annotations: Map<String, Value>,
}

impl MxCube {
    /// Parses a cube metadata document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Dimension called `name`, or a Cube error.
    pub fn dimension(&self, name: &str) -> Result<&MxDimension> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| MxError::cube(format!("dimension '{}' not found in cube '{}'", name, self.name)))
    }

    /// All dimensions keyed by name.
    pub fn dimensions_by_name(&self) -> HashMap<&str, &MxDimension> {
        self.dimensions.iter().map(|d| (d.name.as_str(), d)).collect()
    }

    /// Non-time dimensions keyed by name.
    pub fn std_dimensions(&self) -> HashMap<&str, &MxDimension> {
        self.dimensions
            .iter()
            .filter(|d| !d.is_time())
            .map(|d| (d.name.as_str(), d))
            .collect()
    }

    /// The single dimension of type `time`.
    pub fn time_dimension(&self) -> Result<&MxDimension> {
        let mut time = self.dimensions.iter().filter(|d| d.is_time());
        match (time.next(), time.next()) {
            (Some(dimension), None) => Ok(dimension),
            (None, _) => Err(MxError::cube(format!(
                "no time dimension defined in cube '{}'",
                self.name
            ))),
            (Some(_), Some(_)) => Err(MxError::cube(format!(
                "more than one time dimension defined in cube '{}'",
                self.name
            ))),
        }
    }

    /// All measures keyed by name.
    pub fn measures_by_name(&self) -> HashMap<&str, &MxMeasure> {
        self.measures.iter().map(|m| (m.name.as_str(), m)).collect()
    }

    /// Measure called `name`, or a Cube error.
    pub fn measure(&self, name: &str) -> Result<&MxMeasure> {
        self.measures
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| MxError::cube(format!("measure '{}' not found in cube '{}'", name, self.name)))
    }

    /// Level named `level_name` in hierarchy `hierarchy` of `dimension_name`.
    pub fn level(&self, dimension_name: &str, level_name: &str, hierarchy: usize) -> Result<&MxLevel> {
        self.dimension(dimension_name)?
            .hierarchy(hierarchy)?
            .levels
            .iter()
            .find(|l| l.name == level_name)
            .ok_or_else(|| {
                MxError::cube(format!(
                    "level '{}' not found in dimension '{}'",
                    level_name, dimension_name
                ))
            })
    }

    /// Resolves a drilldown name such as `[Date].[Year]` or
    /// `[Date].[Fiscal].[Year]` to its level.
    pub fn resolve_level(&self, text: &str) -> Result<&MxLevel> {
        self.identifier_level(&MxIdentifier::parse(text)?)
    }

    /// [`resolve_level`](Self::resolve_level) for an already parsed name.
    pub fn identifier_level(&self, identifier: &MxIdentifier) -> Result<&MxLevel> {
        let names = identifier.names();

        match names.as_slice() {
            [dimension, level] => self.level(dimension, level, 0),
            [dimension, hierarchy, level] => {
                let dim = self.dimension(dimension)?;
                let index = dim
                    .hierarchies
                    .iter()
                    .position(|h| h.name.as_deref() == Some(*hierarchy))
                    .ok_or_else(|| {
                        MxError::cube(format!(
                            "hierarchy '{}' not found in dimension '{}'",
                            hierarchy, dimension
                        ))
                    })?;
                self.level(dimension, level, index)
            }
            _ => Err(MxError::cube(format!(
                "'{}' does not name a level; expected Dimension.Level or Dimension.Hierarchy.Level",
                identifier
            ))),
        }
    }

    /// Levels strictly between the root and the level at `level_depth` in
    /// the dimension's first hierarchy.
    pub fn ancestor_levels(&self, dimension_name: &str, level_depth: usize) -> Result<&[MxLevel]> {
        let levels = &self.dimension(dimension_name)?.hierarchy(0)?.levels;
        if level_depth >= levels.len() {
            return Err(MxError::cube(format!(
                "level depth {} exceeds the {} level(s) of dimension '{}'",
                level_depth,
                levels.len(),
                dimension_name
            )));
        }
        Ok(levels.get(1..level_depth).unwrap_or(&[]))
    }
}
