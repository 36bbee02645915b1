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

use std::path::Path;

use anyhow::{Context, Result};

use crate::utils::shell_quote;

/// Permission bits applied to staged scripts that are marked executable.
pub const EXECUTABLE_MODE: u32 = 0o700;

/// Interpreter used when a script is staged without the executable bit.
pub const FALLBACK_INTERPRETER: &str = "sh";

/// A script to copy to the remote host and run once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPayload {
    pub content: Vec<u8>,
    pub remote_path: String,
    pub executable: bool,
}

impl ScriptPayload {
    pub fn inline(content: impl Into<Vec<u8>>, remote_path: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            remote_path: remote_path.into(),
            executable: true,
        }
    }

    /// Read the payload from a local file.
    pub async fn from_file(local_path: &Path, remote_path: impl Into<String>) -> Result<Self> {
        let content = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read script {local_path:?}"))?;
        Ok(Self::inline(content, remote_path))
    }

    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Default remote location for a staged script: `<dir>/firectl-<uuid>.sh`.
pub fn default_remote_path(remote_dir: &str) -> String {
    let dir = remote_dir.trim_end_matches('/');
    format!("{dir}/firectl-{}.sh", uuid::Uuid::new_v4().simple())
}

/// Build the command line that runs a staged script.
///
/// With an interpreter the script is passed to it as an argument; without
/// one the script is invoked directly, which requires the executable bit.
/// A non-executable payload without an interpreter falls back to `sh`.
pub fn command_line(
    interpreter: Option<&str>,
    payload: &ScriptPayload,
    args: &[String],
) -> String {
    let interpreter = match interpreter {
        Some(interpreter) if !interpreter.trim().is_empty() => Some(interpreter.trim()),
        _ if !payload.executable => Some(FALLBACK_INTERPRETER),
        _ => None,
    };

    let mut parts = Vec::with_capacity(args.len() + 2);
    if let Some(interpreter) = interpreter {
        // Interpreter may carry its own flags (e.g. "bash -e"), left unquoted
        parts.push(interpreter.to_string());
    }
    // A bare file name would be looked up on PATH; SFTP staged it in the login directory
    if payload.remote_path.contains('/') {
        parts.push(shell_quote(&payload.remote_path));
    } else {
        parts.push(shell_quote(&format!("./{}", payload.remote_path)));
    }
    parts.extend(args.iter().map(|arg| shell_quote(arg)));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_remote_path() {
        let path = default_remote_path("/tmp/");
        assert!(path.starts_with("/tmp/firectl-"));
        assert!(path.ends_with(".sh"));
        assert_ne!(path, default_remote_path("/tmp"));
    }

    #[test]
    fn test_default_remote_path_root() {
        assert!(default_remote_path("/").starts_with("/firectl-"));
    }

    #[test]
    fn test_command_line_direct() {
        let payload = ScriptPayload::inline("echo hi", "/tmp/s.sh");
        assert_eq!(command_line(None, &payload, &[]), "'/tmp/s.sh'");
    }

    #[test]
    fn test_command_line_with_interpreter_and_args() {
        let payload = ScriptPayload::inline("echo $1", "/tmp/s.sh");
        let args = vec!["hello world".to_string(), "it's".to_string()];
        assert_eq!(
            command_line(Some("bash"), &payload, &args),
            "bash '/tmp/s.sh' 'hello world' 'it'\\''s'"
        );
    }

    #[test]
    fn test_command_line_non_executable_falls_back_to_sh() {
        let payload = ScriptPayload::inline("echo hi", "/tmp/s.sh").with_executable(false);
        assert_eq!(command_line(None, &payload, &[]), "sh '/tmp/s.sh'");
        assert_eq!(command_line(Some("  "), &payload, &[]), "sh '/tmp/s.sh'");
    }

    #[test]
    fn test_command_line_bare_file_name_runs_from_login_directory() {
        let payload = ScriptPayload::inline("echo hi", "deploy.sh");
        assert_eq!(command_line(None, &payload, &[]), "'./deploy.sh'");
        assert_eq!(
            command_line(Some("bash"), &payload, &["x".to_string()]),
            "bash './deploy.sh' 'x'"
        );

        let nested = ScriptPayload::inline("echo hi", "scripts/deploy.sh");
        assert_eq!(command_line(None, &nested, &[]), "'scripts/deploy.sh'");
    }

    #[tokio::test]
    async fn test_from_file_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.sh");
        tokio::fs::write(&path, b"#!/bin/sh\necho ok\n").await.unwrap();

        let payload = ScriptPayload::from_file(&path, "/tmp/deploy.sh")
            .await
            .unwrap();
        assert_eq!(payload.content, b"#!/bin/sh\necho ok\n");
        assert!(payload.executable);
        assert_eq!(payload.len(), 18);
    }

    #[tokio::test]
    async fn test_from_file_missing() {
        let err = ScriptPayload::from_file(Path::new("/nonexistent/firectl.sh"), "/tmp/x.sh")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read script"));
    }
}
