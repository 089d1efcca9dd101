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

//! # Aggregation Request Parameters
//!
//! The request-side description of an aggregation. The tidy transform reads
//! `measures`, `properties` and `parents` from it; the remaining fields are
//! carried for callers that build the actual request.
//!
//! Parameters can be built against a cube or loaded from configuration:
//!
//! ```yaml
//! drilldown:
//!   - {name: Year, caption: Year, full_name: "[Date].[Year]"}
//! measures:
//!   - {name: FOB US, caption: FOB US}
//! properties:
//!   - "ISICrev4.Level 2.Level 2 ES"
//! parents: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cube::{MxCube, MxLevel, MxMeasure};
use crate::errors::{MxError, Result};
use crate::identifier::MxIdentifier;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MxAggregationParams {
    pub drilldown: Vec<MxLevel>,
    pub cut: Vec<String>,
    pub measures: Vec<MxMeasure>,
    /// Property paths of the form `Dimension.Level.Property`.
    pub properties: Vec<String>,
    pub caption: Vec<String>,
    /// Request ancestors so the table can expand parent levels.
    pub parents: bool,
    pub nonempty: bool,
    pub distinct: bool,
}

impl MxAggregationParams {
    /// Empty parameters; add measures before sending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses parameters from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses parameters from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Loads parameters from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            other => Err(MxError::validation(format!(
                "unsupported parameter file extension '{}'",
                other
            ))),
        }
    }

    /// Appends `Dimension.Level.Property` paths.
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.extend(properties.into_iter().map(Into::into));
        self
    }

    /// Appends caption property paths.
    pub fn with_captions<I, S>(mut self, captions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.caption.extend(captions.into_iter().map(Into::into));
        self
    }

    pub fn with_parents(mut self, parents: bool) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_nonempty(mut self, nonempty: bool) -> Self {
        self.nonempty = nonempty;
        self
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// An aggregation needs at least one measure.
    pub fn validate(&self) -> Result<()> {
        if self.measures.is_empty() {
            return Err(MxError::validation("must provide at least one measure"));
        }
        Ok(())
    }
}

impl MxCube {
    /// Builds request parameters by resolving drilldown names and measure
    /// names against this cube.
    pub fn aggregation_params(
        &self,
        drilldown: &[&str],
        cut: &[&str],
        measures: &[&str],
    ) -> Result<MxAggregationParams> {
        let drilldown = drilldown
            .iter()
            .map(|text| {
                let identifier = MxIdentifier::parse(text)?;
                let mut level = self.identifier_level(&identifier)?.clone();
                if level.full_name.is_none() {
                    level.full_name = Some(identifier.to_string());
                }
                Ok(level)
            })
            .collect::<Result<Vec<_>>>()?;

        let measures = measures
            .iter()
            .map(|name| self.measure(name).cloned())
            .collect::<Result<Vec<_>>>()?;

        let params = MxAggregationParams {
            drilldown,
            cut: cut.iter().map(|c| c.to_string()).collect(),
            measures,
            ..MxAggregationParams::default()
        };

        log::debug!(
            "params.build: aggregation parameters resolved - cube={}, drilldown={}, measures={}",
            self.name,
            params.drilldown.len(),
            params.measures.len()
        );

        Ok(params)
    }
}
