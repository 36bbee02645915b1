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

//! Subcommand implementations.

pub mod account;
pub mod configure;
pub mod dns;
pub mod kvm;
pub mod run;
pub mod services;

use anyhow::Result;

use crate::api::{resolve_service, ApiRequest, ApiResponse, FireClient, Service};
use crate::config::Config;

/// Authenticated API access shared by the API-backed subcommands.
pub struct ApiContext {
    client: FireClient,
}

impl ApiContext {
    pub fn new(config: &Config, cli_api_key: Option<&str>) -> Result<Self> {
        let api_key = config.resolve_api_key(cli_api_key)?;
        let client = FireClient::new(api_key, config.api_url(), config.api_timeout())?;
        Ok(Self { client })
    }

    pub fn from_client(client: FireClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        Ok(self.client.send(request).await?)
    }

    pub async fn services(&self) -> Result<Vec<Service>> {
        Ok(self.client.services().await?)
    }

    /// Resolve a `<service>` argument against the live catalogue.
    pub async fn service(&self, selector: &str) -> Result<Service> {
        let services = self.services().await?;
        let service = resolve_service(&services, selector)?.clone();
        tracing::debug!(
            "Resolved '{}' to {} service {} ({})",
            selector,
            service.service_type,
            service.internal_id,
            service.name
        );
        Ok(service)
    }
}
