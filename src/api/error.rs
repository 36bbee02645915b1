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

//! Error types for the 24fire REST client.

use thiserror::Error;

/// Errors raised while talking to the hosting API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("malformed API response: {0}")]
    InvalidBody(String),

    /// No service in the catalogue matches the given id, name or index.
    #[error("service '{0}' not found")]
    UnknownService(String),

    /// The selected service does not support the requested operation.
    #[error("service '{name}' is a {kind} service; this command requires a {expected} service")]
    WrongServiceType {
        name: String,
        kind: String,
        expected: &'static str,
    },

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status code, if the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_message_only() {
        let err = ApiError::Status {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid API key");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_wrong_service_type_message() {
        let err = ApiError::WrongServiceType {
            name: "web01".to_string(),
            kind: "WEBSPACE".to_string(),
            expected: "KVM",
        };
        assert_eq!(
            err.to_string(),
            "service 'web01' is a WEBSPACE service; this command requires a KVM service"
        );
        assert_eq!(err.status(), None);
    }
}
