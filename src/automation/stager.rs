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

use super::payload::{ScriptPayload, EXECUTABLE_MODE};
use super::session::{FileTransfer, SessionError};

/// Copy the payload to its remote path and apply the executable bit if requested.
///
/// On error the remote file may exist with partial content; the caller is
/// responsible for removing it.
pub async fn stage(
    files: &mut dyn FileTransfer,
    payload: &ScriptPayload,
) -> Result<(), SessionError> {
    tracing::debug!(
        "Staging {} bytes to {}",
        payload.len(),
        payload.remote_path
    );

    files
        .write_file(&payload.remote_path, &payload.content)
        .await?;

    if payload.executable {
        files
            .set_permissions(&payload.remote_path, EXECUTABLE_MODE)
            .await?;
    }

    Ok(())
}
