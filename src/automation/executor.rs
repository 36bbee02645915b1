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

use super::payload::{command_line, ScriptPayload};
use super::session::{CommandExecution, RawOutput, SessionError};

/// Run a staged script and wait for it to exit.
///
/// A non-zero exit status is returned as data; only a lost channel is an error.
pub async fn execute(
    commands: &mut dyn CommandExecution,
    interpreter: Option<&str>,
    payload: &ScriptPayload,
    args: &[String],
) -> Result<RawOutput, SessionError> {
    let command = command_line(interpreter, payload, args);
    tracing::debug!("Executing: {}", command);

    let output = commands.exec(&command).await?;

    tracing::debug!(
        "Remote process exited with status {} ({} bytes stdout, {} bytes stderr)",
        output.exit_status,
        output.stdout.len(),
        output.stderr.len()
    );
    Ok(output)
}
