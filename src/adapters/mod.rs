// Adapters layer: concrete implementations of the ports for the model
// store service, the simulation service, and local-disk storage.

use crate::domain::model::{Model, SiteRef};
use crate::domain::ports::{ModelStore, Simulator, Storage};
use crate::utils::error::{Result, StatError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// REST adapter for the model store lookups.
#[derive(Debug, Clone)]
pub struct HttpModelStore {
    client: Client,
    base_url: String,
}

impl HttpModelStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: trim_base(base_url.into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).query(query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StatError::NotFound { resource: url });
        }
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ModelStore for HttpModelStore {
    async fn stations(&self, kind: &str) -> Result<Vec<SiteRef>> {
        self.get_json("stations", &[("type", kind)]).await
    }

    async fn waterbodies(&self) -> Result<Vec<SiteRef>> {
        self.get_json("waterbodies", &[]).await
    }

    async fn station_models(&self, code: &str) -> Result<Vec<Model>> {
        self.get_json(&format!("stations/{}/models", code), &[])
            .await
    }

    async fn waterbody_models(&self, code: &str) -> Result<Vec<Model>> {
        self.get_json(&format!("waterbodies/{}/models", code), &[])
            .await
    }
}

/// REST adapter for the simulation service. The model tree is posted whole
/// and comes back with estimates recomputed on every node.
#[derive(Debug, Clone)]
pub struct HttpSimulator {
    client: Client,
    base_url: String,
}

impl HttpSimulator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: trim_base(base_url.into()),
        }
    }
}

#[async_trait]
impl Simulator for HttpSimulator {
    async fn run(&self, model: &Model) -> Result<Model> {
        let url = format!("{}/run", self.base_url);
        tracing::debug!(code = %model.code, "POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(model)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
