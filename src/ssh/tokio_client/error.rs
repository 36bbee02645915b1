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

//! Error type for the low-level SSH client.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Key authentication failed")]
    KeyAuthFailed,
    #[error("Unable to load key, bad format or passphrase: {0}")]
    KeyInvalid(russh::keys::Error),
    #[error("Password authentication failed")]
    PasswordWrong,
    #[error("Invalid address was provided: {0}")]
    AddressInvalid(io::Error),
    #[error("The executed command didn't send an exit code")]
    CommandDidntExit,
    #[error("Server host key check failed")]
    ServerCheckFailed,
    #[error("Server host key changed for {0}")]
    ServerKeyChanged(String),
    #[error("Unable to connect to SSH agent")]
    AgentConnectionFailed,
    #[error("SSH agent has no identities")]
    AgentNoIdentities,
    #[error("Unable to list identities from SSH agent")]
    AgentRequestIdentitiesFailed,
    #[error("SSH agent authentication failed")]
    AgentAuthenticationFailed,
    #[error("Connection to {0} timed out")]
    ConnectTimeout(String),
    #[error("SSH error: {0}")]
    SshError(#[from] russh::Error),
    #[error("SFTP error: {0}")]
    SftpError(#[from] russh_sftp::client::error::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Whether the server rejected the offered credentials.
    ///
    /// Key material that cannot be decoded is grouped with rejections since
    /// the operator fixes both the same way.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Error::KeyAuthFailed
                | Error::KeyInvalid(_)
                | Error::PasswordWrong
                | Error::AgentConnectionFailed
                | Error::AgentNoIdentities
                | Error::AgentRequestIdentitiesFailed
                | Error::AgentAuthenticationFailed
        )
    }
}
