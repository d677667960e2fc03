use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Drives one full run: extract, transform, load. Returns the path of
    /// the aggregate artifact.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting staged line-up data");
        let groups = self.pipeline.extract().await?;
        tracing::info!("Extracted raw tables for {} locations", groups.len());

        tracing::info!("Transforming into the canonical dataset");
        let output = self.pipeline.transform(groups).await?;
        tracing::info!(
            "Canonical records: {}, aggregate groups: {}",
            output.canonical.len(),
            output.aggregate.len()
        );

        tracing::info!("Loading canonical and aggregate outputs");
        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
