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

//! # Member Property Resolution
//!
//! Turns property paths such as `ISICrev4.Level 2.Level 2 ES` into a
//! dimension → level → property-name specification, and reads the
//! requested values off a row's members (or their ancestors).
//!
//! ```text
//! input:  ["ISICrev4.Level 2.Level 2 ES", "ISICrev4.Level 1.Level 1 ES"]
//! output: ISICrev4 => { Level 2 => [Level 2 ES], Level 1 => [Level 1 ES] }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MxError, Result};
use crate::identifier::MxIdentifier;
use crate::response::{MxAxisDimension, MxMember, MxProperties};

/// One parsed `Dimension.Level.Property` path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MxPropertyPath {
    pub dimension: String,
    pub level: String,
    pub property: String,
}

impl MxPropertyPath {
    /// Parses a path; the first segment names the dimension, the second the
    /// level and the last the property.
    pub fn parse(text: &str) -> Result<Self> {
        let identifier = MxIdentifier::parse(text)?;
        if identifier.len() < 3 {
            return Err(MxError::MalformedPropertyPath {
                path: text.to_string(),
                segments: identifier.len(),
            });
        }

        Ok(Self {
            dimension: identifier[0].name().to_string(),
            level: identifier[1].name().to_string(),
            property: identifier[identifier.len() - 1].name().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxLevelProperties {
    pub level: String,
    pub properties: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxDimensionProperties {
    pub dimension: String,
    /// Levels in order of first appearance.
    pub levels: Vec<MxLevelProperties>,
}

impl MxDimensionProperties {
    pub fn level(&self, level: &str) -> Option<&MxLevelProperties> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Requested properties grouped by dimension, then level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxPropertySpec {
    dimensions: Vec<MxDimensionProperties>,
}

impl MxPropertySpec {
    pub fn dimensions(&self) -> &[MxDimensionProperties] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&MxDimensionProperties> {
        self.dimensions.iter().find(|d| d.dimension == name)
    }

    /// Property names requested at `level` of `dimension`, in request order.
    pub fn properties(&self, dimension: &str, level: &str) -> &[String] {
        self.dimension(dimension)
            .and_then(|d| d.level(level))
            .map(|l| l.properties.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    fn insert(&mut self, path: &MxPropertyPath) {
        let position = match self.dimensions.iter().position(|d| d.dimension == path.dimension) {
            Some(position) => position,
            None => {
                self.dimensions.push(MxDimensionProperties {
                    dimension: path.dimension.clone(),
                    levels: Vec::new(),
                });
                self.dimensions.len() - 1
            }
        };
        let dimension = &mut self.dimensions[position];

        match dimension.levels.iter_mut().find(|l| l.level == path.level) {
            Some(level) => level.properties.push(path.property.clone()),
            None => dimension.levels.push(MxLevelProperties {
                level: path.level.clone(),
                properties: vec![path.property.clone()],
            }),
        }
    }
}

/// The outcome of resolving a list of property paths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxResolvedProperties {
    pub spec: MxPropertySpec,
    /// Parsed paths in input order.
    pub paths: Vec<MxPropertyPath>,
    /// Bare property names in input order; used as column headers.
    pub names: Vec<String>,
}

impl MxResolvedProperties {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Resolves property paths into a [`MxPropertySpec`]. Duplicate paths are
/// kept; each one produces its own column.
pub fn resolve_properties<S: AsRef<str>>(paths: &[S]) -> Result<MxResolvedProperties> {
    let mut resolved = MxResolvedProperties::default();

    for text in paths {
        let path = MxPropertyPath::parse(text.as_ref())?;
        resolved.spec.insert(&path);
        resolved.names.push(path.property.clone());
        resolved.paths.push(path);
    }

    Ok(resolved)
}

/// Reads the requested property values for one row.
///
/// `members` and `axes` run in parallel over the row's dimension axes. The
/// result follows `resolved.paths` order.
pub fn lookup_property_values(
    members: &[&MxMember],
    axes: &[MxAxisDimension],
    resolved: &MxResolvedProperties,
) -> Result<Vec<Value>> {
    if resolved.is_empty() {
        return Ok(Vec::new());
    }

    let mut found: HashMap<(&str, &str, &str), Value> = HashMap::new();

    for (member, axis) in members.iter().zip(axes) {
        let Some(requested) = resolved.spec.dimension(&axis.name) else {
            continue;
        };

        for level in &requested.levels {
            let source: &MxProperties = if level.level == axis.level {
                &member.properties
            } else {
                let ancestor = member
                    .ancestors()
                    .iter()
                    .find(|a| a.level_name == level.level)
                    .ok_or_else(|| {
                        MxError::missing_ancestor(&axis.name, &level.level, member.key_text())
                    })?;
                &ancestor.properties
            };

            for property in &level.properties {
                let value = match source.get(property) {
                    Some(value) => value.clone(),
                    None => {
                        log::warn!(
                            "properties.lookup: property missing from member - dimension={}, level={}, property={}, member={}",
                            axis.name,
                            level.level,
                            property,
                            member.key_text()
                        );
                        Value::Null
                    }
                };
                found
                    .entry((axis.name.as_str(), level.level.as_str(), property.as_str()))
                    .or_insert(value);
            }
        }
    }

    resolved
        .paths
        .iter()
        .map(|path| {
            found
                .get(&(path.dimension.as_str(), path.level.as_str(), path.property.as_str()))
                .cloned()
                .ok_or_else(|| MxError::UnboundProperty {
                    dimension: path.dimension.clone(),
                    property: path.property.clone(),
                })
        })
        .collect()
}
