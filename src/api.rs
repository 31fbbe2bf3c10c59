//! Typed REST client for the purchases backend.
//!
//! Thin wrapper over `reqwest`: three endpoints, JSON in and out. The error
//! contract is uniform - any non-2xx response carries a human-readable
//! `message` field which is surfaced verbatim; status codes are not
//! interpreted beyond success/failure.

use crate::{
    config::AppConfig,
    errors::{Error, Result},
    models::{AllocationPayload, ApiMessage, InvestorProfile, Lead, PutAllocationsBody},
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the purchases backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the application configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches a purchase lead, including its canonical allocation list.
    pub async fn get_lead(&self, lead_id: &str) -> Result<Lead> {
        let url = format!("{}/purchases/leads/{lead_id}", self.base_url);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Persists the full allocation list for a lead; returns the updated lead.
    pub async fn put_investor_allocations(
        &self,
        lead_id: &str,
        allocations: &[AllocationPayload],
    ) -> Result<Lead> {
        let url = format!("{}/purchases/leads/{lead_id}/investor", self.base_url);
        debug!("PUT {url} ({} allocations)", allocations.len());
        let body = PutAllocationsBody {
            investor_allocations: allocations.to_vec(),
        };
        let response = self.http.put(&url).json(&body).send().await?;
        Self::read_json(response).await
    }

    /// Fetches the investor directory (read-only reference data).
    pub async fn list_investors(&self) -> Result<Vec<InvestorProfile>> {
        let url = format!("{}/purchases/investors", self.base_url);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Decodes a successful response, or surfaces the server's `message`.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiMessage>().await {
                Ok(body) => body.message,
                Err(_) => format!("server returned {status}"),
            };
            return Err(Error::Network { message });
        }
        response.json::<T>().await.map_err(Into::into)
    }
}
