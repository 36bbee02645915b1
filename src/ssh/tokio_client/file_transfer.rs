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

//! SFTP file operations used for script staging.
//!
//! Some sshd_config does not enable sftp by default, so make sure it is enabled.
//! A config line like a `Subsystem sftp internal-sftp` or
//! `Subsystem sftp /usr/lib/openssh/sftp-server` is needed in the sshd_config in remote machine.

use russh_sftp::client::SftpSession;
use russh_sftp::protocol::{FileAttributes, OpenFlags};
use tokio::io::AsyncWriteExt;

use super::connection::Client;

impl Client {
    /// Start a new SFTP session over a fresh channel.
    pub async fn open_sftp(&self) -> Result<SftpSession, super::Error> {
        let channel = self.get_channel().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream()).await?;
        Ok(sftp)
    }
}

/// Write `contents` to `dest_file_path`, creating or truncating the remote file.
pub async fn write_file(
    sftp: &SftpSession,
    dest_file_path: &str,
    contents: &[u8],
) -> Result<(), super::Error> {
    let mut file = sftp
        .open_with_flags(
            dest_file_path,
            OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
        )
        .await?;
    file.write_all(contents)
        .await
        .map_err(super::Error::IoError)?;
    file.flush().await.map_err(super::Error::IoError)?;
    file.shutdown().await.map_err(super::Error::IoError)?;
    Ok(())
}

/// Change the permission bits of a remote file.
pub async fn set_permissions(
    sftp: &SftpSession,
    path: &str,
    mode: u32,
) -> Result<(), super::Error> {
    let attrs = FileAttributes {
        size: None,
        uid: None,
        user: None,
        gid: None,
        group: None,
        permissions: Some(mode),
        atime: None,
        mtime: None,
    };
    sftp.set_metadata(path, attrs).await?;
    Ok(())
}

/// Remove a remote file.
pub async fn remove_file(sftp: &SftpSession, path: &str) -> Result<(), super::Error> {
    sftp.remove_file(path).await?;
    Ok(())
}
