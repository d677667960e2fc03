pub mod cli;

use crate::domain::model::SourcePage;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use chrono::NaiveDate;
use clap::Parser;

const SANTOS_URL: &str = "https://www.portodesantos.com.br/informacoes-operacionais/operacoes-portuarias/navegacao-e-movimento-de-navios/navios-esperados-carga/";
const PARANAGUA_URL: &str =
    "https://www.appaweb.appa.pr.gov.br/appaweb/pesquisa.aspx?WCI=relLineUpRetroativo";

#[derive(Debug, Clone, Parser)]
#[command(name = "lineup-etl")]
#[command(about = "ETL for port authority vessel line-up reports")]
pub struct CliConfig {
    /// Root of the bronze/silver/gold data layout.
    #[arg(long, default_value = "./data")]
    pub data_root: String,

    /// Processing date (YYYY-MM-DD).
    #[arg(long, default_value_t = default_date())]
    pub date: NaiveDate,

    #[arg(long, default_value = SANTOS_URL)]
    pub santos_url: String,

    #[arg(long, default_value = PARANAGUA_URL)]
    pub paranagua_url: String,

    /// Skip the fetch stage and run over already-staged extracts.
    #[arg(long)]
    pub skip_fetch: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn default_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl ConfigProvider for CliConfig {
    fn data_root(&self) -> &str {
        &self.data_root
    }

    fn processing_date(&self) -> NaiveDate {
        self.date
    }

    fn source_pages(&self) -> Vec<SourcePage> {
        vec![
            SourcePage {
                location: "santos".to_string(),
                url: self.santos_url.clone(),
                header_probe: None,
            },
            SourcePage {
                location: "paranagua".to_string(),
                url: self.paranagua_url.clone(),
                header_probe: Some("PROGRAMAÇÃO".to_string()),
            },
        ]
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_root", &self.data_root)?;
        validate_url("santos_url", &self.santos_url)?;
        validate_url("paranagua_url", &self.paranagua_url)?;
        Ok(())
    }
}
