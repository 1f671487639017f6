use crate::domain::model::{Model, SiteRef};
use crate::domain::report::ReportBatch;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only lookup against the external model store. Implementations must
/// be deterministic for a given selector set.
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn stations(&self, kind: &str) -> Result<Vec<SiteRef>>;
    async fn waterbodies(&self) -> Result<Vec<SiteRef>>;
    async fn station_models(&self, code: &str) -> Result<Vec<Model>>;
    async fn waterbody_models(&self, code: &str) -> Result<Vec<Model>>;
}

/// The external simulation engine. `run` returns a structurally identical
/// tree with estimates recomputed on every node; the input is not mutated.
#[async_trait]
pub trait Simulator: Send + Sync {
    async fn run(&self, model: &Model) -> Result<Model>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn station_kind(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Model>>;
    async fn transform(&self, models: Vec<Model>) -> Result<ReportBatch>;
    async fn load(&self, batch: ReportBatch) -> Result<String>;
}
