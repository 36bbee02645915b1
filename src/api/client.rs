// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP client for the 24fire API.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::error::ApiError;
use super::models::{extract_services, ApiResponse, Service};
use super::routes::ApiRequest;

pub const DEFAULT_API_URL: &str = "https://manage.24fire.de/api";

/// Header carrying the account API key.
pub const API_KEY_HEADER: &str = "X-Fire-Apikey";

pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Authenticated client bound to one API base URL.
pub struct FireClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl std::fmt::Debug for FireClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl FireClient {
    pub fn new(api_key: SecretString, base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("firectl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the response envelope.
    ///
    /// Non-2xx answers become [`ApiError::Status`] carrying the API's
    /// `message`, or `Unknown error` when the body has none.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, self.api_key.expose_secret().as_str());
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::trace!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            tracing::debug!("API returned {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }

    /// Fetch and flatten the service catalogue.
    pub async fn services(&self) -> Result<Vec<Service>, ApiError> {
        let response = self.send(&ApiRequest::services()).await?;
        Ok(extract_services(&response.data))
    }
}
