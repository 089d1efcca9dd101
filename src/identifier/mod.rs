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

//! # Identifier Module
//!
//! Parsing and formatting of hierarchical OLAP names such as
//! `[Date].[Year].[2010]` or `[Customers].[City].&[San Francisco]&CA&USA`.
//!
//! ## Components
//!
//! - **Parser** ([parser.rs](parser/index.html)): state-machine scanner that
//!   turns text into an [`MxIdentifier`]
//! - **Segment** ([segment.rs](segment/index.html)): the immutable
//!   [`MxSegment`] / [`MxIdentifier`] values and their canonical formatting
//!
//! ## Grammar
//!
//! Segments are separated by `.` and are one of:
//!
//! - bracket-quoted text, `[...]`, where `]]` stands for a literal `]`
//! - bare text, ending at `.`, `,`, `)`, `}` or end of input, trimmed
//! - key parts introduced by `&`; consecutive key parts collapse into one
//!   key segment named `&part&part...`
//!
//! ## Usage Example
//!
//! ```rust
//! use mxt::identifier::{MxIdentifier, MxQuoting};
//!
//! let ident = MxIdentifier::parse("Time.1997.[Q3]").unwrap();
//! assert_eq!(ident.names(), vec!["Time", "1997", "Q3"]);
//! assert_eq!(ident[2].quoting(), MxQuoting::Quoted);
//! assert_eq!(ident.to_string(), "[Time].[1997].[Q3]");
//! ```

pub mod parser;
pub mod segment;

pub use parser::MxIdentifierParser;
pub use segment::{MxIdentifier, MxQuoting, MxSegment};
