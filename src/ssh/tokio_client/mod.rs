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

//! This module is an internalized version of async-ssh2-tokio library,
//! trimmed to what script automation needs. Powered by the rust ssh
//! implementation russh.
//!
//! The heart of this module is [`Client`]. Use this for connection, authentication and execution.
//!
//! # Features
//! * Connect to a SSH Host by name or IP
//! * Execute commands on the remote host and capture raw output and exit code
//! * SFTP write, chmod and remove
//! * Password, in-memory private key and SSH agent authentication

pub mod authentication;
pub mod channel_manager;
pub mod connection;
pub mod error;
pub mod file_transfer;

pub use authentication::{AuthMethod, ServerCheckMethod};
pub use channel_manager::{CommandExecutedResult, SIGNAL_EXIT_STATUS};
pub use connection::{Client, ClientHandler};
pub use error::Error;
