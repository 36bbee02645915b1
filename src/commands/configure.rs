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

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use secrecy::SecretString;
use std::path::{Path, PathBuf};

use crate::config::{default_config_path, expand_tilde, Config};

/// Where `configure` reads and writes: `--config` or the default location.
pub fn config_target(cli_config: Option<&Path>) -> Result<PathBuf> {
    match cli_config {
        Some(path) => Ok(expand_tilde(path)),
        None => default_config_path(),
    }
}

/// Persist the API key (and optional URL) into the config file.
///
/// Existing automation settings in the file are preserved.
pub async fn configure(
    cli_config: Option<&Path>,
    api_key: Option<&str>,
    url: Option<&str>,
    show: bool,
) -> Result<()> {
    let path = config_target(cli_config)?;
    let mut config = Config::load(&path).await?;

    if show {
        println!("{} {}", "Config file:".bold(), path.display());
        println!(
            "  {} {}",
            "API key:".blue(),
            if config.api.key.is_some() {
                "set".green().to_string()
            } else {
                "not set".yellow().to_string()
            }
        );
        println!("  {} {}", "API URL:".blue(), config.api_url());
        return Ok(());
    }

    let key = match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => rpassword::prompt_password("Enter your 24fire API key: ")
            .context("Failed to read API key")?
            .trim()
            .to_string(),
    };
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.api.key = Some(SecretString::new(key));
    if let Some(url) = url {
        config.api.url = Some(url.trim_end_matches('/').to_string());
    }

    config.save(&path).await?;
    println!("{} Saved configuration to {}", "✓".green(), path.display());
    Ok(())
}
