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

//! Sequencing of one automation run: connect, stage, execute, cleanup.
//!
//! Every path out of [`Orchestrator::run`] releases the session it opened and
//! yields exactly one [`ExecutionResult`]. Failures are returned as data.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::executor::execute;
use super::payload::ScriptPayload;
use super::result::{ExecutionResult, Outcome};
use super::session::{FileTransfer, RemoteSession, SessionConnector, SessionError};
use super::stager::stage;
use super::target::ConnectionTarget;

// Cleanup still runs after the run deadline fired, bounded by this.
const DEFAULT_CLEANUP_TIMEOUT_SECS: u64 = 10;

/// Run-wide settings threaded into the orchestrator.
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// Interpreter (with optional flags) used to run the script.
    pub interpreter: Option<String>,
    /// Deadline for connect + stage + execute. `None` waits forever.
    pub timeout: Option<Duration>,
    pub cleanup_timeout: Duration,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            interpreter: None,
            timeout: None,
            cleanup_timeout: Duration::from_secs(DEFAULT_CLEANUP_TIMEOUT_SECS),
        }
    }
}

/// Position of a run in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Connecting,
    Staging,
    Executing,
    Cleanup,
    Done,
    Failed(Outcome),
}

#[derive(Debug)]
struct TimedOut;

async fn within<F: Future>(deadline: Option<Instant>, fut: F) -> Result<F::Output, TimedOut> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| TimedOut),
        None => Ok(fut.await),
    }
}

struct Run {
    stage: Stage,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl Run {
    fn enter(&mut self, next: Stage) {
        tracing::debug!("automation: {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    fn timed_out(&self) -> ExecutionResult {
        let secs = self.timeout.map(|t| t.as_secs_f64()).unwrap_or_default();
        ExecutionResult::failed(
            Outcome::ConnectionFailed,
            format!("timed out after {secs}s during {:?}", self.stage),
        )
    }
}

pub struct Orchestrator<C> {
    connector: C,
    config: AutomationConfig,
}

impl<C: SessionConnector> Orchestrator<C> {
    pub fn new(connector: C, config: AutomationConfig) -> Self {
        Self { connector, config }
    }

    /// Run `payload` on `target` with `args` and report the single outcome.
    pub async fn run(
        &self,
        target: &ConnectionTarget,
        payload: &ScriptPayload,
        args: &[String],
    ) -> ExecutionResult {
        let started = Instant::now();
        let mut run = Run {
            stage: Stage::Idle,
            deadline: self.config.timeout.map(|t| started + t),
            timeout: self.config.timeout,
        };

        run.enter(Stage::Connecting);
        tracing::info!("Connecting to {}", target);
        let mut result = match within(run.deadline, self.connector.connect(target)).await {
            Ok(Ok(mut session)) => {
                let result = self.drive(&mut run, session.as_mut(), payload, args).await;
                if let Err(e) = session.close().await {
                    tracing::debug!("Error while closing session to {}: {}", target, e);
                }
                result
            }
            Ok(Err(e)) => {
                let outcome = match e {
                    SessionError::AuthRejected(_) => Outcome::AuthFailed,
                    _ => Outcome::ConnectionFailed,
                };
                ExecutionResult::failed(outcome, e.to_string())
            }
            Err(TimedOut) => run.timed_out(),
        };

        run.enter(if result.is_success() {
            Stage::Done
        } else {
            Stage::Failed(result.outcome)
        });
        result.elapsed = started.elapsed();
        result
    }

    async fn drive(
        &self,
        run: &mut Run,
        session: &mut dyn RemoteSession,
        payload: &ScriptPayload,
        args: &[String],
    ) -> ExecutionResult {
        run.enter(Stage::Staging);
        let staged = within(run.deadline, stage(session.files(), payload)).await;

        let mut result = match staged {
            Ok(Ok(())) => {
                run.enter(Stage::Executing);
                let executed = within(
                    run.deadline,
                    execute(
                        session.commands(),
                        self.config.interpreter.as_deref(),
                        payload,
                        args,
                    ),
                )
                .await;
                match executed {
                    Ok(Ok(output)) => ExecutionResult::completed(
                        output.exit_status,
                        output.stdout,
                        output.stderr,
                    ),
                    Ok(Err(e)) => ExecutionResult::failed(Outcome::ConnectionFailed, e.to_string()),
                    Err(TimedOut) => run.timed_out(),
                }
            }
            Ok(Err(e)) => {
                let outcome = match e {
                    SessionError::Transfer(_) | SessionError::NotFound(_) => {
                        Outcome::TransferFailed
                    }
                    SessionError::AuthRejected(_) => Outcome::AuthFailed,
                    SessionError::Unreachable(_) | SessionError::ChannelClosed(_) => {
                        Outcome::ConnectionFailed
                    }
                };
                ExecutionResult::failed(
                    outcome,
                    format!("staging {} failed: {e}", payload.remote_path),
                )
            }
            Err(TimedOut) => run.timed_out(),
        };

        run.enter(Stage::Cleanup);
        result.cleanup_error = self.cleanup(session.files(), &payload.remote_path).await;
        result
    }

    /// Best-effort removal of the staged file. Absence counts as success.
    async fn cleanup(&self, files: &mut dyn FileTransfer, remote_path: &str) -> Option<String> {
        let removed =
            tokio::time::timeout(self.config.cleanup_timeout, files.remove_file(remote_path))
                .await;
        let error = match removed {
            Ok(Ok(())) | Ok(Err(SessionError::NotFound(_))) => return None,
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "timed out after {}s",
                self.config.cleanup_timeout.as_secs()
            ),
        };
        tracing::warn!("Failed to remove staged script {}: {}", remote_path, error);
        Some(format!("cleanup of {remote_path} failed: {error}"))
    }
}
