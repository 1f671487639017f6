use crate::core::records::{build_rows, stripped_copy};
use crate::core::{ConfigProvider, ModelStore, Pipeline, Simulator, Storage};
use crate::domain::model::Model;
use crate::domain::report::{ReportBatch, ReportRow};
use crate::utils::error::Result;

/// The report pipeline: enumerate models from the store, derive the
/// statistics rows model by model, write one delimited file.
pub struct ReportPipeline<M, R, S, C> {
    store: M,
    simulator: R,
    storage: S,
    config: C,
}

impl<M, R, S, C> ReportPipeline<M, R, S, C> {
    pub fn new(store: M, simulator: R, storage: S, config: C) -> Self {
        Self {
            store,
            simulator,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<M, R, S, C> Pipeline for ReportPipeline<M, R, S, C>
where
    M: ModelStore,
    R: Simulator,
    S: Storage,
    C: ConfigProvider,
{
    /// Every model attached to a station of the configured kind, followed
    /// by every model attached to a waterbody.
    async fn extract(&self) -> Result<Vec<Model>> {
        let mut models = Vec::new();

        let stations = self.store.stations(self.config.station_kind()).await?;
        tracing::debug!("found {} {} stations", stations.len(), self.config.station_kind());
        for station in &stations {
            models.extend(self.store.station_models(&station.code).await?);
        }

        let waterbodies = self.store.waterbodies().await?;
        tracing::debug!("found {} waterbodies", waterbodies.len());
        for waterbody in &waterbodies {
            models.extend(self.store.waterbody_models(&waterbody.code).await?);
        }

        Ok(models)
    }

    /// Models are processed sequentially; a failure on any model aborts
    /// the batch with nothing written.
    async fn transform(&self, models: Vec<Model>) -> Result<ReportBatch> {
        let mut rows = Vec::new();

        for model in &models {
            tracing::info!(code = %model.code, name = %model.name, "deriving report rows");
            let stripped = stripped_copy(model);
            let baseline = self.simulator.run(&stripped).await?;
            rows.extend(build_rows(model, &baseline)?);
        }

        Ok(ReportBatch { rows })
    }

    async fn load(&self, batch: ReportBatch) -> Result<String> {
        let filename = expand_filename(self.config.output_filename());

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(Vec::new());
        // Header goes out explicitly so an empty batch still yields one.
        writer.write_record(ReportRow::COLUMNS)?;
        for row in &batch.rows {
            writer.serialize(row)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| e.into_error())?;

        tracing::debug!("writing {} bytes to {}", data.len(), filename);
        self.storage.write_file(&filename, &data).await?;

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}

/// Expands the `{timestamp}` placeholder in a configured filename.
fn expand_filename(template: &str) -> String {
    template.replace(
        "{timestamp}",
        &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
    )
}
