use crate::domain::model::{ExtractGroup, RawExtract, Record, Table};
use crate::domain::ports::RawRecordSource;
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads staged raw extracts from the date-partitioned bronze layout:
/// `<bronze_root>/<location>/<date>/<report>.csv`, one extract group per
/// location directory.
#[derive(Debug, Clone)]
pub struct StagedCsvSource {
    bronze_root: PathBuf,
}

impl StagedCsvSource {
    pub fn new(bronze_root: impl Into<PathBuf>) -> Self {
        Self {
            bronze_root: bronze_root.into(),
        }
    }

    fn read_extract(&self, path: &Path) -> Result<RawExtract> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut table = Table::with_columns(
            headers
                .iter()
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.to_string()),
        );

        for record in reader.records() {
            let record = record?;
            let mut row = Record::new();
            for (name, field) in headers.iter().zip(record.iter()) {
                if name.trim().is_empty() {
                    continue;
                }
                row.set(name, type_cell(field));
            }
            table.push_row(row);
        }

        let presentation_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("extract")
            .to_string();

        Ok(RawExtract {
            presentation_name,
            table,
        })
    }
}

impl RawRecordSource for StagedCsvSource {
    async fn extracts(&self, date: NaiveDate) -> Result<Vec<ExtractGroup>> {
        let mut groups = Vec::new();

        if self.bronze_root.is_dir() {
            for entry in fs::read_dir(&self.bronze_root)? {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let location = entry.file_name().to_string_lossy().to_string();

                let daily_dir = entry.path().join(date.to_string());
                if !daily_dir.is_dir() {
                    continue;
                }

                let mut extracts = Vec::new();
                let mut files: Vec<PathBuf> = fs::read_dir(&daily_dir)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
                    .collect();
                files.sort();

                for file in files {
                    extracts.push(self.read_extract(&file)?);
                }

                if !extracts.is_empty() {
                    groups.push(ExtractGroup { location, extracts });
                }
            }
        }

        if groups.is_empty() {
            return Err(EtlError::NoDataForDate { date });
        }
        groups.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(groups)
    }
}

/// Types a staged cell: empty text is absent, numeric-looking text becomes a
/// number, everything else stays a string.
fn type_cell(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::from(integer);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return Value::from(float);
    }
    Value::String(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn stage(root: &Path, location: &str, date: &str, name: &str, content: &str) {
        let dir = root.join(location).join(date);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_reads_groups_per_location() {
        let temp = TempDir::new().unwrap();
        stage(
            temp.path(),
            "santos",
            "2024-02-01",
            "navios_esperados_carga.csv",
            "Chegada,Mercadoria,Previsto\n01/02/2024,Soybeans,\"12,345 Tons.\"\n",
        );
        stage(
            temp.path(),
            "paranagua",
            "2024-02-01",
            "programacao.csv",
            "Cheg/Arrival d/m/y,Operaç Operat,Peso Weight\n02/02/2024,EMB,500\n",
        );

        let source = StagedCsvSource::new(temp.path());
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let groups = source.extracts(date).await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].location, "paranagua");
        assert_eq!(groups[1].location, "santos");

        let santos = &groups[1].extracts[0];
        assert_eq!(santos.presentation_name, "navios_esperados_carga");
        assert_eq!(
            santos.table.rows[0].get("Previsto"),
            Some(&json!("12,345 Tons."))
        );

        // Numeric-looking cells are typed on read.
        let paranagua = &groups[0].extracts[0];
        assert_eq!(paranagua.table.rows[0].get("Peso Weight"), Some(&json!(500)));
    }

    #[tokio::test]
    async fn test_empty_cells_are_absent() {
        let temp = TempDir::new().unwrap();
        stage(
            temp.path(),
            "santos",
            "2024-02-01",
            "report.csv",
            "Chegada,Mercadoria\n01/02/2024,\n",
        );

        let source = StagedCsvSource::new(temp.path());
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let groups = source.extracts(date).await.unwrap();

        assert!(groups[0].extracts[0].table.rows[0].is_absent("Mercadoria"));
    }

    #[tokio::test]
    async fn test_missing_date_is_not_found() {
        let temp = TempDir::new().unwrap();
        stage(
            temp.path(),
            "santos",
            "2024-02-01",
            "report.csv",
            "Chegada\n01/02/2024\n",
        );

        let source = StagedCsvSource::new(temp.path());
        let other_date = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let err = source.extracts(other_date).await.unwrap_err();

        assert!(matches!(
            err,
            EtlError::NoDataForDate { date } if date == other_date
        ));
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let source = StagedCsvSource::new("/nonexistent/bronze");
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(source.extracts(date).await.unwrap_err().is_missing_input());
    }
}
