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

use super::*;
use secrecy::{ExposeSecret, SecretString};
use serial_test::serial;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

use crate::ssh::known_hosts::StrictHostKeyChecking;

const SAMPLE: &str = r#"
api:
  key: file-key
  timeout: 10
automation:
  host: 203.0.113.7
  port: 2222
  user: deploy
  ssh_key: ~/.ssh/id_ed25519
  interpreter: bash -e
  remote_dir: /var/tmp
  timeout: 0
  strict_host_key_checking: "yes"
"#;

fn sample() -> Config {
    serde_yaml::from_str(SAMPLE).unwrap()
}

#[test]
fn test_parse_full_config() {
    let config = sample();
    assert_eq!(config.api.key.as_ref().unwrap().expose_secret(), "file-key");
    assert_eq!(config.api_timeout(), Duration::from_secs(10));
    assert_eq!(config.api_url(), crate::api::DEFAULT_API_URL);
    assert_eq!(config.automation.host.as_deref(), Some("203.0.113.7"));
    assert_eq!(config.automation.port, Some(2222));
    assert_eq!(config.remote_dir(), "/var/tmp");
    assert_eq!(config.host_key_checking(None), StrictHostKeyChecking::Yes);
    assert_eq!(
        config.host_key_checking(Some(StrictHostKeyChecking::No)),
        StrictHostKeyChecking::No
    );
}

#[test]
fn test_empty_config_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert!(config.api.key.is_none());
    assert_eq!(config.remote_dir(), DEFAULT_REMOTE_DIR);
    assert_eq!(config.host_key_checking(None), StrictHostKeyChecking::AcceptNew);
    assert_eq!(config.automation_timeout(None), None);
}

#[test]
fn test_automation_timeout_zero_disables() {
    let config = sample();
    assert_eq!(config.automation_timeout(None), None);
    assert_eq!(
        config.automation_timeout(Some(30)),
        Some(Duration::from_secs(30))
    );
}

#[test]
fn test_debug_does_not_leak_key() {
    let debug = format!("{:?}", sample());
    assert!(!debug.contains("file-key"));
}

#[test]
#[serial]
fn test_api_key_priority() {
    let config = sample();
    std::env::set_var(API_KEY_ENV, "env-key");

    let from_flag = config.resolve_api_key(Some("flag-key")).unwrap();
    let from_env = config.resolve_api_key(None).unwrap();
    let blank_flag = config.resolve_api_key(Some("  ")).unwrap();

    std::env::remove_var(API_KEY_ENV);
    let from_file = config.resolve_api_key(None).unwrap();

    assert_eq!(from_flag.expose_secret(), "flag-key");
    assert_eq!(from_env.expose_secret(), "env-key");
    assert_eq!(blank_flag.expose_secret(), "env-key");
    assert_eq!(from_file.expose_secret(), "file-key");
}

#[test]
#[serial]
fn test_missing_api_key_names_sources() {
    std::env::remove_var(API_KEY_ENV);
    let config = Config::default();
    let err = config.resolve_api_key(None).unwrap_err().to_string();
    assert!(err.contains("--api-key"));
    assert!(err.contains(API_KEY_ENV));
    assert!(err.contains("firectl configure"));
}

#[test]
fn test_expand_tilde() {
    if let Ok(home) = std::env::var("HOME") {
        assert_eq!(
            expand_tilde(Path::new("~/.ssh/id_rsa")),
            Path::new(&home).join(".ssh/id_rsa")
        );
    }
    assert_eq!(expand_tilde(Path::new("/abs")), Path::new("/abs"));
}

#[tokio::test]
async fn test_save_and_reload() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

    let mut config = Config::default();
    config.api.key = Some(SecretString::new("saved-key".to_string()));
    config.automation.user = Some("ops".to_string());
    config.save(&path).await?;

    let reloaded = Config::load(&path).await?;
    assert_eq!(
        reloaded.api.key.as_ref().map(|k| k.expose_secret().clone()),
        Some("saved-key".to_string())
    );
    assert_eq!(reloaded.automation.user.as_deref(), Some("ops"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
    Ok(())
}

#[tokio::test]
async fn test_load_missing_file_yields_defaults() {
    let config = Config::load(Path::new("/nonexistent/firectl/config.yaml"))
        .await
        .unwrap();
    assert!(config.automation.host.is_none());
}

#[tokio::test]
async fn test_explicit_missing_config_is_error() {
    let err = Config::load_with_priority(Some(Path::new("/nonexistent/firectl.yaml")))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
#[serial]
fn test_default_path_honours_xdg() {
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-test");
    let path = default_config_path().unwrap();
    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    assert_eq!(path, Path::new("/tmp/xdg-test/firectl/config.yaml"));
}
