//! HTTP client for the IMGW synoptic data endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use mowa_core::{WeatherClient, WeatherReport};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use crate::stations::report_for_city;

pub const DEFAULT_ENDPOINT: &str = "https://danepubliczne.imgw.pl/api/data/meteo/";

pub struct ImgwClient {
    endpoint: String,
    client: Client,
}

impl ImgwClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// All station records, or `None` when the service answers with a non-200 status.
    async fn fetch_stations(&self) -> Result<Option<Vec<Value>>> {
        let resp = self.client.get(&self.endpoint).send().await?;
        if resp.status() != StatusCode::OK {
            warn!(status = %resp.status(), "[Weather] Unexpected response status");
            return Ok(None);
        }
        let stations: Vec<Value> = resp.json().await.context("invalid station list")?;
        Ok(Some(stations))
    }
}

#[async_trait]
impl WeatherClient for ImgwClient {
    async fn get_weather(&self, city: &str) -> Option<WeatherReport> {
        info!(city, "[Weather] Fetching IMGW data");
        match self.fetch_stations().await {
            Ok(Some(stations)) => Some(report_for_city(&stations, city)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Błąd pobierania danych pogodowych");
                None
            }
        }
    }
}
