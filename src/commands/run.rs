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

//! `firectl run`: stage a script on a server over SSH and execute it.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::automation::{
    default_remote_path, AutomationConfig, ConnectionTarget, Credential, Orchestrator,
    ScriptPayload, SessionConnector, DEFAULT_SSH_PORT,
};
use crate::cli::RunArgs;
use crate::config::{Config, DEFAULT_SSH_USER};
use crate::ssh::{AuthContext, SshConnector};
use crate::ui::OutputFormatter;
use crate::utils::{sanitize_hostname, sanitize_remote_path, sanitize_username};

/// Everything one run needs, resolved from flags and config.
#[derive(Debug)]
pub struct RunPlan {
    pub target: ConnectionTarget,
    pub payload: ScriptPayload,
    pub automation: AutomationConfig,
    pub args: Vec<String>,
}

/// Target host, user and port with command-line values taking precedence.
fn endpoint(config: &Config, args: &RunArgs) -> Result<(String, String, u16)> {
    let host = args
        .host
        .as_deref()
        .or(config.automation.host.as_deref())
        .context("No target host: pass --host or set automation.host in the config file")?;
    let host = sanitize_hostname(host)?;

    let user = args
        .user
        .as_deref()
        .or(config.automation.user.as_deref())
        .unwrap_or(DEFAULT_SSH_USER);
    let user = sanitize_username(user)?;

    let port = args
        .port
        .or(config.automation.port)
        .unwrap_or(DEFAULT_SSH_PORT);

    Ok((host, user, port))
}

async fn payload(config: &Config, args: &RunArgs) -> Result<ScriptPayload> {
    let remote_path = match args.remote_path.as_deref() {
        Some(path) => sanitize_remote_path(path)?,
        None => default_remote_path(config.remote_dir()),
    };

    let payload = match (&args.inline, &args.script) {
        (Some(inline), _) => ScriptPayload::inline(inline.as_bytes().to_vec(), remote_path),
        (None, Some(script)) => ScriptPayload::from_file(script, remote_path).await?,
        (None, None) => anyhow::bail!("No script given: pass a script file or --inline"),
    };

    if payload.is_empty() {
        tracing::warn!("Script is empty");
    }
    Ok(payload.with_executable(!args.no_exec_bit))
}

/// Resolve target, credential and payload for a run without connecting.
pub async fn plan(config: &Config, args: &RunArgs) -> Result<RunPlan> {
    let (host, user, port) = endpoint(config, args)?;

    let key_path = args
        .identity
        .clone()
        .or_else(|| config.automation.ssh_key.as_ref().map(PathBuf::from));
    let credential: Credential = AuthContext::new(&user, &host)
        .with_key_path(key_path)
        .with_agent(args.use_agent)
        .with_password(args.password)
        .determine_credential()?;

    let target = ConnectionTarget::new(host, user, credential)
        .with_port(port)
        .with_host_key_checking(config.host_key_checking(args.strict_host_key_checking));

    let automation = AutomationConfig {
        interpreter: args
            .interpreter
            .clone()
            .or_else(|| config.automation.interpreter.clone()),
        timeout: config.automation_timeout(args.timeout),
        ..AutomationConfig::default()
    };

    Ok(RunPlan {
        target,
        payload: payload(config, args).await?,
        automation,
        args: args.args.clone(),
    })
}

/// Execute a plan through `connector`, print the report and return the
/// process exit code.
pub async fn execute_plan<C: SessionConnector>(connector: C, plan: RunPlan) -> i32 {
    println!(
        "\n{} {} {} {} {}",
        "►".cyan().bold(),
        "Running".cyan(),
        format!("{} bytes", plan.payload.len()).bold(),
        "on".cyan(),
        plan.target.to_string().bold()
    );

    let orchestrator = Orchestrator::new(connector, plan.automation);
    let result = orchestrator
        .run(&plan.target, &plan.payload, &plan.args)
        .await;

    print!(
        "{}",
        OutputFormatter::format_execution_result(&plan.target, &result)
    );
    result.process_exit_code()
}

pub async fn run_script(config: &Config, args: &RunArgs) -> Result<i32> {
    let plan = plan(config, args).await?;
    Ok(execute_plan(SshConnector::new(), plan).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::ssh::auth::SSH_PASSWORD_ENV;
    use crate::ssh::StrictHostKeyChecking;
    use clap::Parser;
    use serial_test::serial;
    use std::time::Duration;

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["firectl", "run"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Run(args) => args,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_plan_merges_flags_over_config() {
        std::env::set_var(SSH_PASSWORD_ENV, "hunter2");
        let mut config = Config::default();
        config.automation.host = Some("config-host".to_string());
        config.automation.user = Some("deploy".to_string());
        config.automation.port = Some(2200);
        config.automation.timeout = Some(60);
        config.automation.interpreter = Some("bash".to_string());

        let args = run_args(&[
            "--host",
            "203.0.113.7",
            "-P",
            "--timeout",
            "5",
            "--inline",
            "echo hi",
            "--",
            "one",
        ]);
        let plan = plan(&config, &args).await.unwrap();
        std::env::remove_var(SSH_PASSWORD_ENV);

        assert_eq!(plan.target.host(), "203.0.113.7");
        assert_eq!(plan.target.username(), "deploy");
        assert_eq!(plan.target.port(), 2200);
        assert_eq!(plan.target.credential().kind(), "password");
        assert_eq!(
            plan.target.host_key_checking(),
            StrictHostKeyChecking::AcceptNew
        );
        assert_eq!(plan.automation.timeout, Some(Duration::from_secs(5)));
        assert_eq!(plan.automation.interpreter.as_deref(), Some("bash"));
        assert_eq!(plan.payload.content, b"echo hi");
        assert!(plan.payload.remote_path.starts_with("/tmp/firectl-"));
        assert!(plan.payload.executable);
        assert_eq!(plan.args, vec!["one"]);
    }

    #[tokio::test]
    async fn test_plan_without_host_fails() {
        let args = run_args(&["--inline", "true"]);
        let err = plan(&Config::default(), &args).await.unwrap_err();
        assert!(err.to_string().contains("No target host"));
    }

    #[tokio::test]
    async fn test_payload_rejects_bad_remote_path() {
        let args = run_args(&["--inline", "true", "--remote-path", "/tmp/dir/"]);
        assert!(payload(&Config::default(), &args).await.is_err());
    }

    #[tokio::test]
    async fn test_payload_from_file_without_exec_bit() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("setup.sh");
        std::fs::write(&script, b"#!/bin/sh\nexit 0\n").unwrap();

        let script_arg = script.to_string_lossy().to_string();
        let args = run_args(&[
            script_arg.as_str(),
            "--no-exec-bit",
            "--remote-path",
            "/srv/setup.sh",
        ]);
        let payload = payload(&Config::default(), &args).await.unwrap();

        assert_eq!(payload.remote_path, "/srv/setup.sh");
        assert_eq!(payload.content, b"#!/bin/sh\nexit 0\n");
        assert!(!payload.executable);
    }
}
