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

//! # Data Export Module
//!
//! Hands tidy tables to downstream tools.
//!
//! ## Supported Output Formats
//!
//! - **JSONL**: one row object per line
//! - **JSON**: pretty-printed or compact array of row objects
//! - **CSV**: header plus rows (requires the `csv` feature)
//!
//! ## Usage
//!
//! ```rust
//! use mxt::export::{MxTableWriter, MxWriterConfig, MxOutputFormat};
//!
//! let writer = MxTableWriter::new().with_config(MxWriterConfig {
//!     format: MxOutputFormat::Csv,
//!     ..Default::default()
//! });
//! let stats = writer.write(aggregation.to_table(true)?, &path)?;
//! ```

pub mod writer;

pub use writer::{MxOutputFormat, MxTableWriter, MxWriteStats, MxWriterConfig};
