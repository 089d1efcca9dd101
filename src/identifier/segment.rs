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

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{MxError, Result};
use crate::identifier::parser::MxIdentifierParser;

/// How a segment was written in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MxQuoting {
    /// Bare text such as `Year`.
    Unquoted,
    /// Bracketed text such as `[Year]`.
    Quoted,
    /// One or more `&`-introduced key parts collapsed into a single segment.
    Key,
}

/// One component of a hierarchical member name.
///
/// `name` is always the unquoted form: brackets are stripped and `]]` is
/// unescaped. Key segments carry their name as `&part&part...` and keep the
/// individual parts so the canonical form can be rebuilt exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSegment")]
pub struct MxSegment {
    name: String,
    quoting: MxQuoting,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    key_parts: Vec<String>,
}

/// Unchecked wire form of [`MxSegment`].
#[derive(Deserialize)]
struct RawSegment {
    name: String,
    quoting: MxQuoting,
    #[serde(default)]
    key_parts: Vec<String>,
}

impl TryFrom<RawSegment> for MxSegment {
    type Error = MxError;

    /// Key segments without parts get them back by splitting the name on
    /// `&`; explicit parts must agree with the name.
    fn try_from(raw: RawSegment) -> Result<Self> {
        match raw.quoting {
            MxQuoting::Key if raw.key_parts.is_empty() => match raw.name.strip_prefix('&') {
                Some(rest) => Ok(Self::key(rest.split('&').map(String::from).collect())),
                None => Err(MxError::validation(format!(
                    "key segment '{}' must start with '&'",
                    raw.name
                ))),
            },
            MxQuoting::Key => {
                let segment = Self::key(raw.key_parts);
                if segment.name != raw.name {
                    return Err(MxError::validation(format!(
                        "key segment name '{}' does not match its parts '{}'",
                        raw.name, segment.name
                    )));
                }
                Ok(segment)
            }
            MxQuoting::Quoted | MxQuoting::Unquoted if raw.key_parts.is_empty() => {
                Ok(Self::new(raw.name, raw.quoting))
            }
            MxQuoting::Quoted | MxQuoting::Unquoted => Err(MxError::validation(format!(
                "name segment '{}' cannot carry key parts",
                raw.name
            ))),
        }
    }
}

impl MxSegment {
    /// Builds a segment from its unquoted name.
    ///
    /// With [`MxQuoting::Key`], `name` is a single bare key part without the
    /// leading `&`; use [`MxSegment::key`] for compound keys.
    pub fn new(name: impl Into<String>, quoting: MxQuoting) -> Self {
        let name = name.into();
        if quoting == MxQuoting::Key {
            return Self::key(vec![name]);
        }
        Self {
            name,
            quoting,
            key_parts: Vec::new(),
        }
    }

    /// Builds a compound key segment from its parts.
    pub fn key(parts: Vec<String>) -> Self {
        let mut name = String::new();
        for part in &parts {
            name.push('&');
            name.push_str(part);
        }
        Self {
            name,
            quoting: MxQuoting::Key,
            key_parts: parts,
        }
    }

    /// Unquoted name; `&part&part...` for key segments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quoting(&self) -> MxQuoting {
        self.quoting
    }

    /// The individual parts of a key segment; empty for name segments.
    pub fn key_parts(&self) -> &[String] {
        &self.key_parts
    }
}

impl fmt::Display for MxSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quoting {
            MxQuoting::Key => {
                for part in &self.key_parts {
                    write!(f, "&[{}]", escape_brackets(part))?;
                }
                Ok(())
            }
            MxQuoting::Quoted | MxQuoting::Unquoted => {
                write!(f, "[{}]", escape_brackets(&self.name))
            }
        }
    }
}

fn escape_brackets(name: &str) -> String {
    name.replace(']', "]]")
}

/// A fully-qualified member, level or property name such as
/// `[Date].[Year].[2010]`.
///
/// Identifiers are immutable once parsed. The `Display` implementation
/// produces the canonical bracket-quoted form, which always parses back to
/// the same segment names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MxIdentifier {
    segments: Vec<MxSegment>,
}

impl MxIdentifier {
    /// Parses member-name text into an identifier.
    pub fn parse(text: &str) -> Result<Self> {
        MxIdentifierParser::new(text).parse()
    }

    pub fn from_segments(segments: Vec<MxSegment>) -> Self {
        Self { segments }
    }

    /// Builds an identifier of quoted name segments, e.g. `[Date].[Year]`.
    pub fn quoted<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: names
                .into_iter()
                .map(|name| MxSegment::new(name, MxQuoting::Quoted))
                .collect(),
        }
    }

    pub fn segments(&self) -> &[MxSegment] {
        &self.segments
    }

    pub fn names(&self) -> Vec<&str> {
        self.segments.iter().map(MxSegment::name).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MxSegment> {
        self.segments.get(index)
    }

    pub fn first(&self) -> Option<&MxSegment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&MxSegment> {
        self.segments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MxSegment> {
        self.segments.iter()
    }

    /// Segment names joined by `.` without any quoting.
    pub fn to_plain_string(&self) -> String {
        self.names().join(".")
    }
}

impl fmt::Display for MxIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for MxIdentifier {
    type Err = MxError;

    fn from_str(s: &str) -> Result<Self> {
        MxIdentifier::parse(s)
    }
}

impl Index<usize> for MxIdentifier {
    type Output = MxSegment;

    fn index(&self, index: usize) -> &MxSegment {
        &self.segments[index]
    }
}

impl<'a> IntoIterator for &'a MxIdentifier {
    type Item = &'a MxSegment;
    type IntoIter = std::slice::Iter<'a, MxSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
