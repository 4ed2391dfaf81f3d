//! CSV output tables and their manifests.
//!
//! A [`TableWriter`] writes the header row as soon as it is created and
//! appends rows as they arrive. The manifest is only written by
//! [`TableWriter::finish`], after the last row has been flushed.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::data_dir::DataDir;
use crate::error::ComponentError;

/// Output table definition.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    /// Table name; the file is `{name}.csv`.
    pub name: String,
    /// Header columns in output order.
    pub columns: Vec<String>,
    /// Primary key columns.
    pub primary_key: Vec<String>,
    /// Whether the platform should upsert instead of replacing the table.
    pub incremental: bool,
}

impl TableDefinition {
    /// CSV file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    fn manifest(&self) -> Manifest<'_> {
        Manifest {
            primary_key: &self.primary_key,
            incremental: self.incremental,
        }
    }
}

/// Table manifest consumed by the platform.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    primary_key: &'a [String],
    incremental: bool,
}

/// Streaming CSV writer for one output table.
pub struct TableWriter {
    writer: csv::Writer<File>,
    table: TableDefinition,
    path: PathBuf,
    rows: usize,
}

impl TableWriter {
    /// Create `out/tables/{name}.csv` and write the header row.
    ///
    /// # Errors
    ///
    /// Returns an I/O or CSV error if the file cannot be created.
    pub fn create(data_dir: &DataDir, table: TableDefinition) -> Result<Self, ComponentError> {
        let dir = data_dir.out_tables_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(table.file_name());

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(&table.columns)?;
        writer.flush()?;

        Ok(Self {
            writer,
            table,
            path,
            rows: 0,
        })
    }

    /// Append one row. Field order must match the table columns.
    ///
    /// # Errors
    ///
    /// Returns a CSV error if the row cannot be serialized or written.
    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<(), ComponentError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, excluding the header.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Path of the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush all rows and write the manifest next to the table.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error.
    pub fn finish(mut self) -> Result<usize, ComponentError> {
        self.writer.flush()?;

        let manifest_path = self
            .path
            .with_file_name(format!("{}.manifest", self.table.file_name()));
        fs::write(
            &manifest_path,
            serde_json::to_vec_pretty(&self.table.manifest())?,
        )?;

        info!("Wrote {} rows to {}", self.rows, self.path.display());
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: String,
        text: String,
    }

    fn definition(incremental: bool) -> TableDefinition {
        TableDefinition {
            name: "pages".to_owned(),
            columns: vec!["id".to_owned(), "text".to_owned()],
            primary_key: vec!["id".to_owned()],
            incremental,
        }
    }

    #[test]
    fn test_header_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());

        let writer = TableWriter::create(&data_dir, definition(false)).unwrap();
        let path = writer.path().to_path_buf();
        drop(writer);

        assert_eq!(fs::read_to_string(path).unwrap(), "id,text\n");
    }

    #[test]
    fn test_rows_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());

        let mut writer = TableWriter::create(&data_dir, definition(true)).unwrap();
        writer
            .write(&Row {
                id: "1".to_owned(),
                text: "plain".to_owned(),
            })
            .unwrap();
        writer
            .write(&Row {
                id: "2".to_owned(),
                text: "has, comma and \"quotes\"\nnewline".to_owned(),
            })
            .unwrap();
        assert_eq!(writer.rows(), 2);
        assert_eq!(writer.finish().unwrap(), 2);

        let tables = data_dir.out_tables_dir();
        assert_eq!(
            fs::read_to_string(tables.join("pages.csv")).unwrap(),
            "id,text\n1,plain\n2,\"has, comma and \"\"quotes\"\"\nnewline\"\n"
        );
        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(tables.join("pages.csv.manifest")).unwrap())
                .unwrap();
        assert_eq!(manifest, json!({"primary_key": ["id"], "incremental": true}));
    }

    #[test]
    fn test_no_manifest_without_finish() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());

        let writer = TableWriter::create(&data_dir, definition(false)).unwrap();
        drop(writer);

        assert!(!data_dir.out_tables_dir().join("pages.csv.manifest").exists());
    }
}
