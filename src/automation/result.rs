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

use std::fmt;
use std::time::Duration;

/// Terminal outcome of an automation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    ConnectionFailed,
    AuthFailed,
    TransferFailed,
    /// The script ran to completion and exited non-zero.
    ExecutionFailed { exit_code: u32 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::ConnectionFailed => "ConnectionFailed",
            Outcome::AuthFailed => "AuthFailed",
            Outcome::TransferFailed => "TransferFailed",
            Outcome::ExecutionFailed { .. } => "ExecutionFailed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::ExecutionFailed { exit_code } => {
                write!(f, "ExecutionFailed (exit code {exit_code})")
            }
            other => f.write_str(other.label()),
        }
    }
}

/// Everything the CLI layer needs to report one automation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub outcome: Outcome,
    /// Remote exit status, present only when the script ran to completion.
    pub exit_code: Option<u32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Cause of a failed outcome.
    pub error: Option<String>,
    /// Set when removing the staged script failed. Never changes `outcome`.
    pub cleanup_error: Option<String>,
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub(crate) fn failed(outcome: Outcome, error: impl Into<String>) -> Self {
        Self {
            outcome,
            exit_code: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            error: Some(error.into()),
            cleanup_error: None,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn completed(exit_code: u32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        let outcome = if exit_code == 0 {
            Outcome::Success
        } else {
            Outcome::ExecutionFailed { exit_code }
        };
        Self {
            outcome,
            exit_code: Some(exit_code),
            stdout,
            stderr,
            error: None,
            cleanup_error: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Process exit code the CLI should terminate with for this result.
    pub fn process_exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Success => 0,
            Outcome::ExecutionFailed { exit_code } => exit_code.clamp(1, 255) as i32,
            _ => 1,
        }
    }
}
