use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives one full export: extract the models, derive the rows, write the
/// report. Stages run strictly in sequence.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("extracting models");
        let models = self.pipeline.extract().await?;
        tracing::info!("extracted {} models", models.len());

        let batch = self.pipeline.transform(models).await?;
        tracing::info!("derived {} report rows", batch.rows.len());

        let output_path = self.pipeline.load(batch).await?;
        tracing::info!("report saved to {}", output_path);

        Ok(output_path)
    }
}
