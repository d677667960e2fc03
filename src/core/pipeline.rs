use crate::core::aggregate::aggregate_by_key;
use crate::core::dedup::remove_duplicates;
use crate::core::merge::merge_extracts;
use crate::core::project::{project_columns, retain_weighted};
use crate::core::resolve::{
    resolve_arrival_date, resolve_commodity, resolve_direction, resolve_weight,
};
use crate::domain::model::{ExtractGroup, PipelineOutput, Table};
use crate::domain::ports::{ConfigProvider, Pipeline, RawRecordSource, Storage};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub struct LineupPipeline<R: RawRecordSource, S: Storage, C: ConfigProvider> {
    source: R,
    storage: S,
    config: C,
}

impl<R: RawRecordSource, S: Storage, C: ConfigProvider> LineupPipeline<R, S, C> {
    pub fn new(source: R, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<R: RawRecordSource, S: Storage, C: ConfigProvider> Pipeline for LineupPipeline<R, S, C> {
    async fn extract(&self) -> Result<Vec<ExtractGroup>> {
        let date = self.config.processing_date();
        let groups = self.source.extracts(date).await?;

        let staged: usize = groups.iter().map(|g| g.extracts.len()).sum();
        tracing::debug!(
            "Found {} staged extracts across {} locations for {}",
            staged,
            groups.len(),
            date
        );
        Ok(groups)
    }

    async fn transform(&self, groups: Vec<ExtractGroup>) -> Result<PipelineOutput> {
        let unified = merge_extracts(&groups);
        tracing::debug!(
            "Unified table: {} rows, {} columns",
            unified.len(),
            unified.columns().len()
        );

        // Dedup before resolution: sibling columns are still distinct here.
        let unified = remove_duplicates(&unified)?;

        let resolved = resolve_weight(resolve_arrival_date(resolve_commodity(
            resolve_direction(unified),
        )));

        // The aggregate is built from the projected but still unfiltered
        // population, so its counts include rows the weight gate drops.
        let projected = project_columns(&resolved);
        let aggregate = aggregate_by_key(&projected);
        let canonical = retain_weighted(projected);

        tracing::debug!(
            "Canonical table: {} rows; aggregate: {} groups",
            canonical.len(),
            aggregate.len()
        );
        Ok(PipelineOutput {
            canonical,
            aggregate,
        })
    }

    async fn load(&self, output: PipelineOutput) -> Result<String> {
        let date = self.config.processing_date();

        // Serialize both artifacts before touching storage so a bad table
        // never leaves a half-written output pair behind.
        let silver = table_to_csv(&output.canonical)?;
        let gold = table_to_csv(&output.aggregate)?;

        let silver_path = format!("silver/{}.csv", date);
        let gold_path = format!("gold/{}.csv", date);
        self.storage.write_file(&silver_path, &silver).await?;
        self.storage.write_file(&gold_path, &gold).await?;

        tracing::debug!("Wrote {} and {}", silver_path, gold_path);
        Ok(format!("{}/{}", self.config.data_root(), gold_path))
    }
}

fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;

    for row in &table.rows {
        let fields: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match row.get(column) {
                None => String::new(),
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            })
            .collect();
        writer.write_record(&fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("flushing CSV output failed: {}", e),
        })
}
