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

use tracing_subscriber::EnvFilter;

/// Create an environment filter based on verbosity level
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        // Use RUST_LOG if set (allows debugging russh and reqwest)
        EnvFilter::from_default_env()
    } else {
        match verbosity {
            0 => EnvFilter::new("firectl=warn"),
            1 => EnvFilter::new("firectl=info"),
            // -vv: Include russh debug logs for SSH troubleshooting
            2 => EnvFilter::new("firectl=debug,russh=debug"),
            // -vvv: Full trace including HTTP and SFTP internals
            _ => EnvFilter::new("firectl=trace,russh=trace,russh_sftp=debug,reqwest=debug"),
        }
    }
}

/// Initialize console logging. Log lines go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_logging(verbosity: u8) {
    let filter = create_env_filter(verbosity);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_env_filter() {
        let _ = create_env_filter(0);
        let _ = create_env_filter(1);
        let _ = create_env_filter(2);
        let _ = create_env_filter(3);
    }

    #[test]
    fn test_filter_targets_crate() {
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(create_env_filter(1).to_string(), "firectl=info");
        }
    }
}
