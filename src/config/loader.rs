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

//! Configuration loading and persistence.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Config;
use super::utils::expand_tilde;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Location of the user configuration file.
///
/// 1. `$XDG_CONFIG_HOME/firectl/config.yaml`
/// 2. The platform config directory from `ProjectDirs`
/// 3. `~/.firectl/config.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home)
                .join("firectl")
                .join(CONFIG_FILE_NAME));
        }
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "firectl") {
        return Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("Unable to determine home directory")?;
    Ok(PathBuf::from(home).join(".firectl").join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load configuration from a file. A missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| format!("Failed to read configuration file at {}. Please check file permissions and ensure the file is accessible.", expanded_path.display()))?;

        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML configuration file at {}. Please check the YAML syntax is valid.\nCommon issues:\n  - Incorrect indentation (use spaces, not tabs)\n  - Missing colons after keys\n  - Unquoted special characters", expanded_path.display()))?;

        Ok(config)
    }

    /// Load the explicitly given file, or the default one.
    ///
    /// An explicit `--config` path that does not exist is an error; a missing
    /// default file is not.
    pub async fn load_with_priority(cli_config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_config_path {
            let expanded_path = expand_tilde(path);
            if !expanded_path.exists() {
                anyhow::bail!("Config file not found: {:?}", expanded_path);
            }
            tracing::debug!("Using explicitly specified config file: {:?}", expanded_path);
            return Self::load(&expanded_path).await;
        }

        match default_config_path() {
            Ok(path) => Self::load(&path).await,
            Err(e) => {
                tracing::debug!("No config location available ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Save the configuration to a file. On Unix the file is readable by its
    /// owner only, since it may hold the API key.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let expanded_path = expand_tilde(path);

        if let Some(parent) = expanded_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory {parent:?}"))?;
            }
        }

        let yaml =
            serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")?;

        fs::write(&expanded_path, yaml)
            .await
            .with_context(|| format!("Failed to write configuration to {expanded_path:?}"))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&expanded_path, std::fs::Permissions::from_mode(0o600))
                .await
                .with_context(|| {
                    format!("Failed to restrict permissions on {expanded_path:?}")
                })?;
        }

        Ok(())
    }
}
