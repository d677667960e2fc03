use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// One row of a table: an open column-name → cell mapping. A missing key and
/// an explicit `Null` both mean the cell is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell value, treating `Null` as absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self.data.get(column) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn is_absent(&self, column: &str) -> bool {
        self.get(column).is_none()
    }

    /// Sets a cell; storing `Null` clears it instead.
    pub fn set(&mut self, column: &str, value: Value) {
        if value.is_null() {
            self.data.remove(column);
        } else {
            self.data.insert(column.to_string(), value);
        }
    }
}

/// An in-memory table: an ordered column list plus rows. Rows may omit keys
/// for columns they have no value for, which keeps the outer-union merge
/// cheap.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Appends the column to the union if it is not already present.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }

    /// Removes a column from the schema and from every row.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c != name);
        for row in &mut self.rows {
            row.data.remove(name);
        }
    }

    pub fn push_row(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One raw report table as staged by a source. The presentation name is the
/// report title used for artifact naming; the table's column names are the
/// parse-time keys. The two are deliberately separate attributes.
#[derive(Debug, Clone)]
pub struct RawExtract {
    pub presentation_name: String,
    pub table: Table,
}

/// All raw extracts staged for one origin location on the processing date.
#[derive(Debug, Clone)]
pub struct ExtractGroup {
    pub location: String,
    pub extracts: Vec<RawExtract>,
}

/// Direction of a port operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Import,
    Export,
    ImportExport,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Import => "Import",
            Direction::Export => "Export",
            Direction::ImportExport => "Import/Export",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote line-up page to fetch and stage. The header probe, when set,
/// keeps only report tables whose first column key matches it.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub location: String,
    pub url: String,
    pub header_probe: Option<String>,
}

/// The two artifacts of one pipeline run: the canonical per-record table and
/// the grouped summary built from it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub canonical: Table,
    pub aggregate: Table,
}
