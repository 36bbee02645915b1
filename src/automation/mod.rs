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

//! Remote script automation.
//!
//! A run opens one session to a target, stages a script, executes it with
//! arguments, removes the staged copy and closes the session. The transport is
//! reached only through the traits in [`session`], so the sequencing here is
//! independent of SSH.

pub mod executor;
pub mod orchestrator;
pub mod payload;
pub mod result;
pub mod session;
pub mod stager;
pub mod target;

pub use orchestrator::{AutomationConfig, Orchestrator, Stage};
pub use payload::{command_line, default_remote_path, ScriptPayload};
pub use result::{ExecutionResult, Outcome};
pub use session::{
    CommandExecution, FileTransfer, RawOutput, RemoteSession, SessionConnector, SessionError,
};
pub use target::{ConnectionTarget, Credential, DEFAULT_SSH_PORT};
