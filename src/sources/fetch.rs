use crate::domain::model::SourcePage;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};

/// Downloads each configured port authority page and stages every report
/// table it carries as a CSV under `bronze/<location>/<date>/`.
///
/// The published tables use a two-level header: a title row naming the
/// report (the presentation name, which becomes the staged filename) above
/// the actual column keys. Plumbing only; all cleaning happens downstream.
pub struct LineupFetcher<S: Storage> {
    client: Client,
    storage: S,
    pages: Vec<SourcePage>,
}

/// One `<table>` lifted out of a page before staging.
#[derive(Debug)]
struct PageTable {
    title: Option<String>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<S: Storage> LineupFetcher<S> {
    pub fn new(storage: S, pages: Vec<SourcePage>) -> Self {
        Self {
            client: Client::new(),
            storage,
            pages,
        }
    }

    /// Fetches and stages all sources for the date. Returns the number of
    /// staged extracts.
    pub async fn run(&self, date: NaiveDate) -> Result<usize> {
        let mut staged = 0;

        for page in &self.pages {
            tracing::info!("Fetching line-up page for {}", page.location);
            let response = self
                .client
                .get(&page.url)
                .send()
                .await?
                .error_for_status()?;
            let body = response.text().await?;

            let tables = extract_tables(&body);
            tracing::debug!(
                "{}: {} tables found on page",
                page.location,
                tables.len()
            );

            let mut kept = 0;
            for (index, table) in tables.iter().enumerate() {
                if let Some(probe) = &page.header_probe {
                    let matches = table
                        .header
                        .first()
                        .is_some_and(|key| key.to_uppercase() == probe.to_uppercase());
                    if !matches {
                        continue;
                    }
                }

                let name = artifact_name(table.title.as_deref(), index);
                let path = format!("bronze/{}/{}/{}.csv", page.location, date, name);
                let data = table_to_csv(table)?;
                self.storage.write_file(&path, &data).await?;
                kept += 1;
            }

            if kept == 0 {
                tracing::warn!("{}: no report tables matched, nothing staged", page.location);
            }
            staged += kept;
        }

        Ok(staged)
    }
}

fn extract_tables(html: &str) -> Vec<PageTable> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").expect("valid selector");
    let row_selector = Selector::parse("tr").expect("valid selector");
    let cell_selector = Selector::parse("th, td").expect("valid selector");

    let mut tables = Vec::new();
    for table in document.select(&table_selector) {
        let rows: Vec<Vec<String>> = table
            .select(&row_selector)
            .map(|tr| {
                tr.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect()
            })
            .filter(|cells: &Vec<String>| cells.iter().any(|c| !c.is_empty()))
            .collect();

        // A title row is a single repeated (or colspanned) value above the
        // real column keys.
        let (title, header_index) = match rows.first() {
            Some(first) if is_title_row(first) && rows.len() > 1 => {
                (first.iter().find(|c| !c.is_empty()).cloned(), 1)
            }
            Some(_) => (None, 0),
            None => continue,
        };

        let header = rows[header_index].clone();
        let data: Vec<Vec<String>> = rows[header_index + 1..].to_vec();
        if header.is_empty() || data.is_empty() {
            continue;
        }

        tables.push(PageTable {
            title,
            header,
            rows: data,
        });
    }
    tables
}

fn is_title_row(cells: &[String]) -> bool {
    let mut distinct = cells.iter().filter(|c| !c.is_empty());
    match distinct.next() {
        Some(first) => distinct.all(|c| c == first),
        None => false,
    }
}

/// Staged filename: the lowercased title with whitespace collapsed to
/// underscores, or a positional fallback for untitled tables.
fn artifact_name(title: Option<&str>, index: usize) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => title
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_"),
        _ => format!("report_{}", index),
    }
}

fn table_to_csv(table: &PageTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.header)?;

    for row in &table.rows {
        // Ragged rows are padded (or truncated) to the header width.
        let mut fields: Vec<&str> = row.iter().map(String::as_str).collect();
        fields.resize(table.header.len(), "");
        writer.write_record(&fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("flushing staged CSV failed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    const SANTOS_PAGE: &str = r#"
        <html><body>
        <table>
          <tr><th colspan="4">Navios Esperados Carga</th></tr>
          <tr><th>Chegada</th><th>Sentido</th><th>Mercadoria</th><th>Previsto</th></tr>
          <tr><td>01/02/2024</td><td>Export</td><td>Soybeans</td><td>12,345 Tons.</td></tr>
        </table>
        </body></html>"#;

    const PARANAGUA_PAGE: &str = r#"
        <html><body>
        <table>
          <tr><th>Legenda</th><th>Cor</th></tr>
          <tr><td>Atracado</td><td>Verde</td></tr>
        </table>
        <table>
          <tr><th colspan="4">Line-Up Retroativo</th></tr>
          <tr><th>Programação</th><th>Operaç Operat</th><th>Mercadoria Goods</th><th>Peso Weight</th></tr>
          <tr><td>02/02/2024</td><td>EMB</td><td>Corn</td><td>10 20</td></tr>
        </table>
        </body></html>"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_extract_tables_splits_title_and_header() {
        let tables = extract_tables(SANTOS_PAGE);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title.as_deref(), Some("Navios Esperados Carga"));
        assert_eq!(tables[0].header[0], "Chegada");
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[0].rows[0][3], "12,345 Tons.");
    }

    #[test]
    fn test_extract_tables_without_title_row() {
        let tables = extract_tables(PARANAGUA_PAGE);

        assert_eq!(tables.len(), 2);
        assert!(tables[0].title.is_none());
        assert_eq!(tables[0].header[0], "Legenda");
        assert_eq!(tables[1].title.as_deref(), Some("Line-Up Retroativo"));
    }

    #[test]
    fn test_artifact_name_from_title() {
        assert_eq!(
            artifact_name(Some("Navios Esperados Carga"), 0),
            "navios_esperados_carga"
        );
        assert_eq!(artifact_name(None, 3), "report_3");
    }

    #[tokio::test]
    async fn test_fetch_stages_csv_per_report() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/santos");
            then.status(200).body(SANTOS_PAGE);
        });

        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp.path().to_string_lossy().to_string());
        let fetcher = LineupFetcher::new(
            storage,
            vec![SourcePage {
                location: "santos".to_string(),
                url: server.url("/santos"),
                header_probe: None,
            }],
        );

        let staged = fetcher.run(date()).await.unwrap();
        assert_eq!(staged, 1);

        let staged_file = temp
            .path()
            .join("bronze/santos/2024-02-01/navios_esperados_carga.csv");
        let content = std::fs::read_to_string(staged_file).unwrap();
        assert!(content.starts_with("Chegada,Sentido,Mercadoria,Previsto\n"));
        assert!(content.contains("01/02/2024,Export,Soybeans,\"12,345 Tons.\""));
    }

    #[tokio::test]
    async fn test_header_probe_filters_unrelated_tables() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/paranagua");
            then.status(200).body(PARANAGUA_PAGE);
        });

        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp.path().to_string_lossy().to_string());
        let fetcher = LineupFetcher::new(
            storage,
            vec![SourcePage {
                location: "paranagua".to_string(),
                url: server.url("/paranagua"),
                header_probe: Some("PROGRAMAÇÃO".to_string()),
            }],
        );

        let staged = fetcher.run(date()).await.unwrap();
        assert_eq!(staged, 1);

        // The legend table is filtered out, only the line-up report lands.
        let daily_dir = temp.path().join("bronze/paranagua/2024-02-01");
        let files: Vec<_> = std::fs::read_dir(&daily_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files, vec!["line-up_retroativo.csv"]);
    }

    #[tokio::test]
    async fn test_http_failure_is_terminal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/down");
            then.status(500);
        });

        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp.path().to_string_lossy().to_string());
        let fetcher = LineupFetcher::new(
            storage,
            vec![SourcePage {
                location: "santos".to_string(),
                url: server.url("/down"),
                header_probe: None,
            }],
        );

        let err = fetcher.run(date()).await.unwrap_err();
        assert!(matches!(err, EtlError::HttpError(_)));
    }
}
