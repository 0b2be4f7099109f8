//! Blocking client for the remote land-plots table and object storage.
//!
//! The client is synchronous and is only ever driven from worker threads
//! (GUI) or directly from the CLI; the UI thread never blocks on it.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;

use crate::config::RemoteConfig;
use crate::model::Plot;

/// Client for the PostgREST-style table API and the storage API.
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Fetch the full plot list, ordered server-side by `plot_number`
    /// ascending (lexicographic). No filtering, no pagination; the backend
    /// ordering is preserved as-is.
    pub fn fetch_plots(&self) -> Result<Vec<Plot>> {
        let url = format!(
            "{}/rest/v1/{}?select=*&order=plot_number",
            self.base(),
            self.config.table
        );
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .context("Plot list request failed")?;
        if !response.status().is_success() {
            bail!("Plot list request returned {}", response.status());
        }
        let plots: Vec<Plot> = response.json().context("Failed to decode plot list")?;
        Ok(plots)
    }

    /// Upload `bytes` to the scheme bucket under `object_path`.
    pub fn upload_object(&self, object_path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base(),
            self.config.bucket,
            object_path
        );
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .context("Scheme upload request failed")?;
        if !response.status().is_success() {
            bail!("Scheme upload returned {}", response.status());
        }
        Ok(())
    }

    /// Publicly retrievable URL for a stored object. Pure path composition;
    /// no request is made.
    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            self.config.bucket,
            object_path
        )
    }

    /// Download an object by URL (used to display the uploaded scheme).
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("GET {url} failed"))?;
        if !response.status().is_success() {
            bail!("GET {url} returned {}", response.status());
        }
        let bytes = response.bytes().context("Failed to read response body")?;
        Ok(bytes.to_vec())
    }
}
