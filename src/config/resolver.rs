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

//! Resolution of effective settings from flags, environment and file.

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::types::Config;
use super::utils::non_empty;
use crate::api::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL};
use crate::ssh::known_hosts::StrictHostKeyChecking;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FIRE_API_KEY";

pub const DEFAULT_SSH_USER: &str = "root";

pub const DEFAULT_REMOTE_DIR: &str = "/tmp";

impl Config {
    /// API key by priority: `--api-key`, `FIRE_API_KEY`, config file.
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Result<SecretString> {
        if let Some(key) = non_empty(cli_key) {
            tracing::debug!("Using API key from command line");
            return Ok(SecretString::new(key.to_string()));
        }

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if let Some(key) = non_empty(Some(&key)) {
                tracing::debug!("Using API key from {}", API_KEY_ENV);
                return Ok(SecretString::new(key.to_string()));
            }
        }

        if let Some(key) = self
            .api
            .key
            .as_ref()
            .and_then(|key| non_empty(Some(key.expose_secret())))
        {
            tracing::debug!("Using API key from config file");
            return Ok(SecretString::new(key.to_string()));
        }

        anyhow::bail!(
            "No API key configured. Provide one with:\n  \
             --api-key <KEY>\n  \
             the {API_KEY_ENV} environment variable (or a .env file)\n  \
             'firectl configure' to store it in the config file"
        )
    }

    pub fn api_url(&self) -> &str {
        non_empty(self.api.url.as_deref()).unwrap_or(DEFAULT_API_URL)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .timeout
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_API_TIMEOUT_SECS),
        )
    }

    /// Run timeout: the flag wins over the config; 0 means no timeout.
    pub fn automation_timeout(&self, cli_timeout: Option<u64>) -> Option<Duration> {
        cli_timeout
            .or(self.automation.timeout)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn host_key_checking(
        &self,
        cli_mode: Option<StrictHostKeyChecking>,
    ) -> StrictHostKeyChecking {
        cli_mode
            .or(self.automation.strict_host_key_checking)
            .unwrap_or_default()
    }

    pub fn remote_dir(&self) -> &str {
        non_empty(self.automation.remote_dir.as_deref()).unwrap_or(DEFAULT_REMOTE_DIR)
    }
}
