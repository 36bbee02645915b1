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

//! Seams between the orchestrator and a concrete remote session.
//!
//! A session exposes two narrow capabilities, file transfer and command
//! execution, so either can be replaced on its own in tests.

use async_trait::async_trait;
use thiserror::Error;

use super::target::ConnectionTarget;

/// Failure classification reported by session implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Network unreachable, DNS failure, bad port or host key rejected.
    #[error("host unreachable: {0}")]
    Unreachable(String),
    /// The server refused the credential.
    #[error("authentication rejected: {0}")]
    AuthRejected(String),
    /// A file-transfer request failed while the session stayed up.
    #[error("{0}")]
    Transfer(String),
    /// The remote path does not exist.
    #[error("no such file: {0}")]
    NotFound(String),
    /// The session or channel went away mid-operation.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Output captured from a remote process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub exit_status: u32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[async_trait]
pub trait FileTransfer: Send {
    /// Create or truncate `path` and write `contents` to it.
    async fn write_file(&mut self, path: &str, contents: &[u8]) -> Result<(), SessionError>;

    async fn set_permissions(&mut self, path: &str, mode: u32) -> Result<(), SessionError>;

    async fn remove_file(&mut self, path: &str) -> Result<(), SessionError>;
}

#[async_trait]
pub trait CommandExecution: Send {
    /// Run `command` and wait for the remote process to exit.
    async fn exec(&mut self, command: &str) -> Result<RawOutput, SessionError>;
}

/// An open, authenticated session owned by a single automation run.
#[async_trait]
pub trait RemoteSession: Send {
    fn files(&mut self) -> &mut dyn FileTransfer;

    fn commands(&mut self) -> &mut dyn CommandExecution;

    /// Release the session. Called exactly once per successful `connect`.
    async fn close(&mut self) -> Result<(), SessionError>;
}

#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<Box<dyn RemoteSession>, SessionError>;
}
