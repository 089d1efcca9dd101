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

//! # Mx Error Module
//!
//! This module defines the error types used throughout Mx for consistent
//! error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Syntax**: Identifier text that violates the member-name grammar
//! - **MalformedPropertyPath**: Property paths shorter than `Dimension.Level.Property`
//! - **InconsistentAggregationShape**: Value tensors that disagree with the axes
//! - **MissingAncestorLevel**: Members lacking an ancestor the table needs
//! - **UnboundProperty**: Properties of a dimension that is not drilled down
//! - **Cube**: Lookups against cube metadata that found nothing usable
//! - **Validation**: Invalid request parameters
//! - **Io** / **Serde**: Export and (de)serialization failures
//!
//! None of these are retried. The core performs no network I/O, so every
//! error describes either bad input data or a programming mistake and is
//! surfaced to the caller as-is.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Mx.
pub type Result<T> = std::result::Result<T, MxError>;

/// Canonical error enumeration for Mx.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum MxError {
    /// The identifier text violates the grammar at `position` (a char offset).
    #[error("syntax error at position {position}: {message}, in member identifier '{input}'")]
    Syntax {
        position: usize,
        message: String,
        input: String,
    },

    /// A property path has fewer than three segments.
    #[error("malformed property path '{path}': expected Dimension.Level.Property, found {segments} segment(s)")]
    MalformedPropertyPath { path: String, segments: usize },

    /// The values tensor does not match the axes it is supposed to index.
    #[error("inconsistent aggregation shape: {message}")]
    InconsistentAggregationShape { message: String },

    /// A member has no ancestor at a level the table requires.
    #[error("member '{member}' of dimension '{dimension}' has no ancestor at level '{level}'")]
    MissingAncestorLevel {
        dimension: String,
        level: String,
        member: String,
    },

    /// A requested property belongs to a dimension that is not on any axis.
    #[error("property '{property}' of dimension '{dimension}' is not bound to any drilldown axis")]
    UnboundProperty { dimension: String, property: String },

    /// Cube metadata lookups that failed.
    #[error("cube error: {message}")]
    Cube { message: String },

    /// Validation errors triggered by invalid parameters.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for MxError {
    fn from(err: io::Error) -> Self {
        MxError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MxError {
    fn from(err: serde_json::Error) -> Self {
        MxError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for MxError {
    fn from(err: serde_yaml::Error) -> Self {
        MxError::Serde(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for MxError {
    fn from(err: csv::Error) -> Self {
        MxError::Serde(err.to_string())
    }
}

impl MxError {
    /// Helper to construct syntax errors.
    pub fn syntax(position: usize, message: impl Into<String>, input: impl Into<String>) -> Self {
        MxError::Syntax {
            position,
            message: message.into(),
            input: input.into(),
        }
    }

    /// Helper to construct shape errors.
    pub fn shape<T: Into<String>>(message: T) -> Self {
        MxError::InconsistentAggregationShape {
            message: message.into(),
        }
    }

    pub fn missing_ancestor(
        dimension: impl Into<String>,
        level: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        MxError::MissingAncestorLevel {
            dimension: dimension.into(),
            level: level.into(),
            member: member.into(),
        }
    }

    /// Helper to construct cube metadata errors.
    pub fn cube<T: Into<String>>(message: T) -> Self {
        MxError::Cube {
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        MxError::Validation {
            message: message.into(),
        }
    }
}
