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

//! # Table Writer Module
//!
//! Writes a tidy table to disk as JSON Lines, a JSON array, or CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregation::MxTidyTable;
use crate::errors::{MxError, Result};

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MxOutputFormat {
    /// One JSON object per row and line.
    Jsonl,
    /// A single JSON array of row objects.
    Json,
    /// Header line followed by one line per row.
    Csv,
}

/// Output settings for [`MxTableWriter`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MxWriterConfig {
    pub format: MxOutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Write to a temporary file first, then rename into place.
    pub atomic_write: bool,
}

impl Default for MxWriterConfig {
    fn default() -> Self {
        Self {
            format: MxOutputFormat::Jsonl,
            pretty: false,
            atomic_write: true,
        }
    }
}

/// Summary of one completed write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxWriteStats {
    pub rows_written: usize,
    pub bytes_written: usize,
}

/// Writes [`MxTidyTable`]s in the configured [`MxOutputFormat`].
#[derive(Debug, Default)]
pub struct MxTableWriter {
    config: MxWriterConfig,
}

impl MxTableWriter {
    /// Writer with the default configuration (atomic JSON Lines).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the writer configuration.
    pub fn with_config(mut self, config: MxWriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Current writer configuration.
    pub fn config(&self) -> &MxWriterConfig {
        &self.config
    }

    /// Writes `table` to `path`, creating parent directories as needed.
    ///
    /// With `atomic_write` the table goes to a hidden sibling first and is
    /// renamed into place; the sibling is removed if anything fails.
    pub fn write(&self, table: &MxTidyTable, path: &Path) -> Result<MxWriteStats> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if self.config.atomic_write {
            let temp_path = self.temp_path(path);
            let written = self
                .write_to_path(table, &temp_path)
                .and_then(|()| std::fs::rename(&temp_path, path).map_err(MxError::from));
            if let Err(err) = written {
                if temp_path.exists() {
                    let _ = std::fs::remove_file(&temp_path);
                }
                return Err(err);
            }
        } else {
            self.write_to_path(table, path)?;
        }

        let stats = MxWriteStats {
            rows_written: table.len(),
            bytes_written: std::fs::metadata(path).map(|m| m.len() as usize).unwrap_or(0),
        };

        log::info!(
            "export.write: table written - path={}, format={:?}, rows={}, bytes={}",
            path.display(),
            self.config.format,
            stats.rows_written,
            stats.bytes_written
        );

        Ok(stats)
    }

    /// Writes `table` to any writer.
    pub fn write_to<W: Write>(&self, table: &MxTidyTable, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        match self.config.format {
            MxOutputFormat::Jsonl => self.write_jsonl(table, &mut writer),
            MxOutputFormat::Json => self.write_json(table, &mut writer),
            MxOutputFormat::Csv => self.write_csv(table, &mut writer),
        }
    }

    fn write_to_path(&self, table: &MxTidyTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(table, file)
    }

    fn write_jsonl<W: Write>(&self, table: &MxTidyTable, writer: &mut BufWriter<W>) -> Result<()> {
        for record in table.to_records() {
            let line = serde_json::to_string(&record)?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json<W: Write>(&self, table: &MxTidyTable, writer: &mut BufWriter<W>) -> Result<()> {
        let records = table.to_records();
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };

        write!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }

    #[cfg(feature = "csv")]
    fn write_csv<W: Write>(&self, table: &MxTidyTable, writer: &mut BufWriter<W>) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(table.columns())?;
        for row in table.rows() {
            csv_writer.write_record(row.iter().map(cell_text))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    #[cfg(not(feature = "csv"))]
    fn write_csv<W: Write>(&self, _table: &MxTidyTable, _writer: &mut BufWriter<W>) -> Result<()> {
        Err(MxError::validation("CSV writing requires the 'csv' feature"))
    }

    fn temp_path(&self, path: &Path) -> PathBuf {
        let stem = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let parent = path.parent().unwrap_or(Path::new("."));

        parent.join(format!(".{}.tmp", stem))
    }
}

/// Text form of a cell: strings unquoted, null empty.
#[cfg_attr(not(feature = "csv"), allow(dead_code))]
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
