//! Region polygon datasets (GeoJSON), fetched over HTTP or read from disk.

use crate::error::{Error, Result};
use ignis_core::IgnisConfig;
use ignis_render::RegionPolygonSet;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[allow(async_fn_in_trait)]
pub trait PolygonSource {
    /// Raw GeoJSON text of the feature collection.
    async fn load(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpPolygonSource {
    http: Client,
    url: Url,
}

impl HttpPolygonSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(&url, &e))?;
        Ok(Self { http, url })
    }

    pub fn from_config(config: &IgnisConfig) -> Result<Self> {
        Self::new(config.geo_url()?, config.prediction_timeout())
    }
}

impl PolygonSource for HttpPolygonSource {
    async fn load(&self) -> Result<String> {
        tracing::debug!(url = %self.url, "fetching region polygons");
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(&self.url, &e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| Error::decode(&self.url, &e))
    }
}

#[derive(Debug, Clone)]
pub struct FilePolygonSource {
    path: PathBuf,
}

impl FilePolygonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PolygonSource for FilePolygonSource {
    async fn load(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Loads and parses a polygon dataset, keyed by `region_property`.
pub async fn load_regions<P: PolygonSource>(
    source: &P,
    region_property: &str,
) -> Result<RegionPolygonSet> {
    let text = source.load().await?;
    Ok(RegionPolygonSet::from_geojson_str(&text, region_property)?)
}
