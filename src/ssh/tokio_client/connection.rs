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

//! SSH connection management and establishment.
//!
//! This module handles the low-level SSH connection establishment,
//! including address resolution, connection attempts, and initial handshake.

use russh::client::{Config, Handle, Handler};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use std::{fmt::Debug, io};

use super::authentication::{AuthMethod, ServerCheckMethod};
use crate::ssh::known_hosts::get_default_known_hosts_path;

// Bounds resolution, TCP connect and key exchange; authentication is not covered
const SSH_CONNECT_TIMEOUT_SECS: u64 = 30;

/// A ssh connection to a remote server.
///
/// After creating a `Client` by [`connect`]ing to a remote host,
/// use [`execute`] to send commands and [`open_sftp`] to stage files.
///
/// [`connect`]: Client::connect
/// [`execute`]: Client::execute
/// [`open_sftp`]: Client::open_sftp
#[derive(Clone)]
pub struct Client {
    pub(super) connection_handle: Arc<Handle<ClientHandler>>,
    pub(super) username: String,
    pub(super) address: SocketAddr,
}

impl Client {
    /// Open a ssh connection to a remote host.
    ///
    /// If `host` resolves to multiple addresses, `connect` is attempted with
    /// each of the addresses until a connection is successful.
    /// Authentification is tried on the first successful connection and the whole
    /// process aborted if this fails.
    pub async fn connect(
        host: &str,
        port: u16,
        username: &str,
        auth: AuthMethod,
        server_check: ServerCheckMethod,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, super::Error> {
        let config = Arc::new(Config {
            inactivity_timeout: None,
            ..Config::default()
        });
        let connect_timeout =
            connect_timeout.unwrap_or(Duration::from_secs(SSH_CONNECT_TIMEOUT_SECS));

        let (address, mut handle) = tokio::time::timeout(
            connect_timeout,
            Self::open_transport(config, host, port, server_check),
        )
        .await
        .map_err(|_| super::Error::ConnectTimeout(format!("{host}:{port}")))??;

        let username = username.to_string();
        super::authentication::authenticate(&mut handle, &username, auth).await?;

        Ok(Self {
            connection_handle: Arc::new(handle),
            username,
            address,
        })
    }

    async fn open_transport(
        config: Arc<Config>,
        host: &str,
        port: u16,
        server_check: ServerCheckMethod,
    ) -> Result<(SocketAddr, Handle<ClientHandler>), super::Error> {
        // Connection code inspired from std::net::TcpStream::connect and std::net::each_addr
        let socket_addrs = tokio::net::lookup_host((host, port))
            .await
            .map_err(super::Error::AddressInvalid)?;

        let mut connect_res = Err(super::Error::AddressInvalid(io::Error::new(
            io::ErrorKind::InvalidInput,
            "could not resolve to any addresses",
        )));
        for socket_addr in socket_addrs {
            let handler = ClientHandler::new(host.to_string(), socket_addr, server_check.clone());
            match russh::client::connect(config.clone(), socket_addr, handler).await {
                Ok(h) => {
                    connect_res = Ok((socket_addr, h));
                    break;
                }
                Err(e) => connect_res = Err(e),
            }
        }
        connect_res
    }

    /// A debugging function to get the address this client is connected to.
    pub fn get_connection_address(&self) -> &SocketAddr {
        &self.address
    }

    /// Disconnect from the remote host.
    pub async fn disconnect(&self) -> Result<(), super::Error> {
        self.connection_handle
            .disconnect(russh::Disconnect::ByApplication, "", "")
            .await
            .map_err(super::Error::SshError)
    }

    /// Check if the connection is closed.
    pub fn is_closed(&self) -> bool {
        self.connection_handle.is_closed()
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.username)
            .field("address", &self.address)
            .field("connection_handle", &"Handle<ClientHandler>")
            .finish()
    }
}

/// SSH client handler for managing server key verification.
#[derive(Debug, Clone)]
pub struct ClientHandler {
    hostname: String,
    host: SocketAddr,
    server_check: ServerCheckMethod,
}

impl ClientHandler {
    /// Create a new client handler.
    pub fn new(hostname: String, host: SocketAddr, server_check: ServerCheckMethod) -> Self {
        Self {
            hostname,
            host,
            server_check,
        }
    }
}

impl Handler for ClientHandler {
    type Error = super::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        match &self.server_check {
            ServerCheckMethod::NoCheck => Ok(true),
            ServerCheckMethod::DefaultKnownHostsFile => {
                let result = russh::keys::check_known_hosts(
                    &self.hostname,
                    self.host.port(),
                    server_public_key,
                )
                .map_err(|_| super::Error::ServerCheckFailed)?;

                Ok(result)
            }
            ServerCheckMethod::AcceptNew => {
                let known_hosts = get_default_known_hosts_path()
                    .ok_or(super::Error::ServerCheckFailed)?;
                accept_new_host(
                    &self.hostname,
                    self.host.port(),
                    server_public_key,
                    &known_hosts,
                )
            }
        }
    }
}

/// Trust-on-first-use check against the known_hosts file at `known_hosts`.
///
/// Unknown hosts are recorded and accepted; a changed key is rejected.
fn accept_new_host(
    hostname: &str,
    port: u16,
    server_public_key: &russh::keys::PublicKey,
    known_hosts: &Path,
) -> Result<bool, super::Error> {
    use russh::keys::known_hosts::{check_known_hosts_path, learn_known_hosts_path};

    match check_known_hosts_path(hostname, port, server_public_key, known_hosts) {
        Ok(true) => Ok(true),
        Ok(false) => {
            tracing::info!("Adding unknown host {}:{} to known_hosts", hostname, port);
            if let Err(e) = learn_known_hosts_path(hostname, port, server_public_key, known_hosts)
            {
                tracing::warn!("Failed to record host key: {}", e);
            }
            Ok(true)
        }
        Err(russh::keys::Error::KeyChanged { .. }) => {
            Err(super::Error::ServerKeyChanged(format!("{hostname}:{port}")))
        }
        Err(_) => Err(super::Error::ServerCheckFailed),
    }
}
