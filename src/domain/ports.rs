use crate::domain::model::{ExtractGroup, PipelineOutput, SourcePage};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies the staged raw extracts for one processing date, grouped by
/// origin location. A date with nothing staged is `NoDataForDate`, never an
/// empty success.
pub trait RawRecordSource: Send + Sync {
    fn extracts(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<ExtractGroup>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_root(&self) -> &str;
    fn processing_date(&self) -> NaiveDate;
    fn source_pages(&self) -> Vec<SourcePage>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ExtractGroup>>;
    async fn transform(&self, groups: Vec<ExtractGroup>) -> Result<PipelineOutput>;
    async fn load(&self, output: PipelineOutput) -> Result<String>;
}
