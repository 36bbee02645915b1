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

//! SSH channel operations for command execution.

use russh::client::Msg;
use russh::Channel;

use super::connection::Client;

// Buffer size constants for SSH operations
/// Buffer size for SSH command I/O operations
/// - 8KB (8192 bytes) optimal for most SSH command operations
/// - Matches typical SSH channel window sizes
const SSH_CMD_BUFFER_SIZE: usize = 8192;

/// Small buffer size for stderr, which is usually short
const SSH_RESPONSE_BUFFER_SIZE: usize = 1024;

/// Exit status reported when the remote process was killed by a signal.
/// Mirrors the value OpenSSH's client exits with in the same situation.
pub const SIGNAL_EXIT_STATUS: u32 = 255;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandExecutedResult {
    /// The raw stdout bytes of the command.
    pub stdout: Vec<u8>,
    /// The raw stderr bytes of the command.
    pub stderr: Vec<u8>,
    /// The unix exit status (`$?` in bash).
    pub exit_status: u32,
}

impl Client {
    /// Get a new SSH channel for communication.
    pub async fn get_channel(&self) -> Result<Channel<Msg>, super::Error> {
        self.connection_handle
            .channel_open_session()
            .await
            .map_err(super::Error::SshError)
    }

    /// Execute a remote command via the ssh connection.
    ///
    /// Returns stdout, stderr and the exit code of the command,
    /// packaged in a [`CommandExecutedResult`] struct. Output is kept as raw
    /// bytes; scripts are free to emit non-UTF-8 data.
    ///
    /// Make sure your commands don't read from stdin and exit after bounded time.
    pub async fn execute(&self, command: &str) -> Result<CommandExecutedResult, super::Error> {
        let mut stdout_buffer = Vec::with_capacity(SSH_CMD_BUFFER_SIZE);
        let mut stderr_buffer = Vec::with_capacity(SSH_RESPONSE_BUFFER_SIZE);
        let mut channel = self.get_channel().await?;
        channel.exec(true, command).await?;

        let mut result: Option<u32> = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                russh::ChannelMsg::Data { ref data } => stdout_buffer.extend_from_slice(data),
                russh::ChannelMsg::ExtendedData { ref data, ext } => {
                    if ext == 1 {
                        stderr_buffer.extend_from_slice(data)
                    }
                }

                // If we get an exit code report, store it, but crucially don't
                // assume this message means end of communications. The data might
                // not be finished yet!
                russh::ChannelMsg::ExitStatus { exit_status } => result = Some(exit_status),

                russh::ChannelMsg::ExitSignal {
                    signal_name,
                    error_message,
                    ..
                } => {
                    tracing::debug!("Remote process terminated by signal {:?}", signal_name);
                    if !error_message.is_empty() {
                        stderr_buffer.extend_from_slice(error_message.as_bytes());
                    }
                    result = Some(SIGNAL_EXIT_STATUS);
                }

                // We SHOULD get this EOF messagge, but 4254 sec 5.3 also permits
                // the channel to close without it being sent. And sometimes this
                // message can even precede the Data message, so don't handle it
                _ => {}
            }
        }

        if let Some(result) = result {
            Ok(CommandExecutedResult {
                stdout: stdout_buffer,
                stderr: stderr_buffer,
                exit_status: result,
            })
        } else {
            Err(super::Error::CommandDidntExit)
        }
    }
}
