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

use zeroize::Zeroizing;

use crate::ssh::known_hosts::StrictHostKeyChecking;

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Secret used to authenticate against the target host.
#[derive(Clone)]
pub enum Credential {
    Password(Zeroizing<String>),
    /// Private key material (PEM/OpenSSH text), not a path.
    PrivateKey {
        key_data: Zeroizing<String>,
        passphrase: Option<Zeroizing<String>>,
    },
    #[cfg(not(target_os = "windows"))]
    Agent,
}

impl Credential {
    pub fn password(password: impl Into<String>) -> Self {
        Self::Password(Zeroizing::new(password.into()))
    }

    pub fn private_key(key_data: impl Into<String>, passphrase: Option<String>) -> Self {
        Self::PrivateKey {
            key_data: Zeroizing::new(key_data.into()),
            passphrase: passphrase.map(Zeroizing::new),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Password(_) => "password",
            Credential::PrivateKey { .. } => "private key",
            #[cfg(not(target_os = "windows"))]
            Credential::Agent => "ssh agent",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}, <redacted>)", self.kind())
    }
}

/// Host a single automation run connects to. Immutable once built.
#[derive(Debug, Clone)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
    username: String,
    credential: Credential,
    host_key_checking: StrictHostKeyChecking,
}

impl ConnectionTarget {
    pub fn new(host: impl Into<String>, username: impl Into<String>, credential: Credential) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            credential,
            host_key_checking: StrictHostKeyChecking::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host_key_checking(mut self, mode: StrictHostKeyChecking) -> Self {
        self.host_key_checking = mode;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn host_key_checking(&self) -> StrictHostKeyChecking {
        self.host_key_checking
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.port == DEFAULT_SSH_PORT, self.host.contains(':')) {
            (true, _) => write!(f, "{}@{}", self.username, self.host),
            (false, true) => write!(f, "{}@[{}]:{}", self.username, self.host, self.port),
            (false, false) => write!(f, "{}@{}:{}", self.username, self.host, self.port),
        }
    }
}
