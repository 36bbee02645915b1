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

use anyhow::{bail, Result};
use std::net::Ipv6Addr;

/// Quote `value` for a POSIX shell command line.
///
/// The result is always wrapped in single quotes; embedded single quotes
/// are written as `'\''`.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Validate a remote path before it is placed on a command line.
pub fn sanitize_remote_path(path: &str) -> Result<String> {
    if path.trim().is_empty() {
        bail!("Empty remote path not allowed");
    }

    const MAX_PATH_LENGTH: usize = 4096;
    if path.len() > MAX_PATH_LENGTH {
        bail!(
            "Remote path too long: {} bytes (max: {} bytes)",
            path.len(),
            MAX_PATH_LENGTH
        );
    }

    if path.contains('\0') {
        bail!("Remote path contains null bytes");
    }

    if path.ends_with('/') {
        bail!("Remote path must name a file, not a directory: {}", path);
    }

    Ok(path.to_string())
}

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_USERNAME_LENGTH: usize = 32;

/// Validate an SSH target host and return it in the form the resolver expects.
///
/// IPv6 literals may be given bare or in brackets; brackets are stripped.
pub fn sanitize_hostname(hostname: &str) -> Result<String> {
    let hostname = hostname.trim();
    if hostname.is_empty() {
        bail!("Empty hostname not allowed");
    }
    if hostname.len() > MAX_HOSTNAME_LENGTH {
        bail!(
            "Hostname too long: {} bytes (max: {} bytes)",
            hostname.len(),
            MAX_HOSTNAME_LENGTH
        );
    }

    let unbracketed = hostname
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(hostname);
    if unbracketed.contains(':') {
        return match unbracketed.parse::<Ipv6Addr>() {
            Ok(_) => Ok(unbracketed.to_string()),
            Err(_) => bail!("Invalid IPv6 address: {}", hostname),
        };
    }

    let label_ok = |label: &str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    };
    if !hostname.split('.').all(label_ok) {
        bail!("Invalid hostname: {}", hostname);
    }

    Ok(hostname.to_string())
}

/// Validate a remote login name (POSIX portable user names).
pub fn sanitize_username(username: &str) -> Result<String> {
    if username.trim().is_empty() {
        bail!("Empty username not allowed");
    }
    if username.len() > MAX_USERNAME_LENGTH {
        bail!(
            "Username too long: {} bytes (max: {} bytes)",
            username.len(),
            MAX_USERNAME_LENGTH
        );
    }

    let mut chars = username.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !first_ok {
        bail!("Username must start with a letter or underscore: {}", username);
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        bail!("Invalid characters in username: {}", username);
    }

    Ok(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
        assert_eq!(shell_quote("$(rm -rf /)"), "'$(rm -rf /)'");
        assert_eq!(shell_quote("a b"), "'a b'");
    }

    #[test]
    fn test_sanitize_remote_path() {
        assert!(sanitize_remote_path("/tmp/firectl-abc.sh").is_ok());
        assert!(sanitize_remote_path("scripts/run.sh").is_ok());
        assert!(sanitize_remote_path("").is_err());
        assert!(sanitize_remote_path("/tmp/").is_err());
        assert!(sanitize_remote_path("/tmp/a\0b").is_err());
    }

    #[test]
    fn test_sanitize_hostname_valid() {
        assert!(sanitize_hostname("example.com").is_ok());
        assert!(sanitize_hostname("192.168.1.1").is_ok());
        assert_eq!(sanitize_hostname("[::1]").unwrap(), "::1");
        assert_eq!(sanitize_hostname("2001:db8::1").unwrap(), "2001:db8::1");
        assert!(sanitize_hostname("my-server.local").is_ok());
    }

    #[test]
    fn test_sanitize_hostname_invalid() {
        assert!(sanitize_hostname("").is_err());
        assert!(sanitize_hostname("example..com").is_err());
        assert!(sanitize_hostname("-example.com").is_err());
        assert!(sanitize_hostname("example.com-").is_err());
        assert!(sanitize_hostname("exam ple.com").is_err());
        assert!(sanitize_hostname("example.com;ls").is_err());
        assert!(sanitize_hostname("[::g]").is_err());
    }

    #[test]
    fn test_sanitize_username_valid() {
        assert!(sanitize_username("john_doe").is_ok());
        assert!(sanitize_username("user123").is_ok());
        assert!(sanitize_username("_system").is_ok());
        assert!(sanitize_username("alice-bob").is_ok());
    }

    #[test]
    fn test_sanitize_username_invalid() {
        assert!(sanitize_username("").is_err());
        assert!(sanitize_username("123user").is_err()); // Starts with number
        assert!(sanitize_username("user name").is_err()); // Contains space
        assert!(sanitize_username("user@host").is_err()); // Contains @
        assert!(sanitize_username(&"a".repeat(33)).is_err()); // Too long
    }
}
