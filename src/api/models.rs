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

//! Typed views over API payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::error::ApiError;

/// Envelope every API endpoint answers with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    pub fn has_data(&self) -> bool {
        !self.data.is_null()
    }
}

/// Product category of a service, as keyed in `data.services`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Kvm,
    Webspace,
    Domain,
    /// Any other product family, kept verbatim.
    Other(String),
}

impl ServiceType {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "KVM" => ServiceType::Kvm,
            "WEBSPACE" => ServiceType::Webspace,
            "DOMAIN" => ServiceType::Domain,
            _ => ServiceType::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Kvm => "KVM",
            ServiceType::Webspace => "WEBSPACE",
            ServiceType::Domain => "DOMAIN",
            ServiceType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub internal_id: String,
    pub service_type: ServiceType,
}

impl Service {
    /// Fail unless this service is of the `expected` kind.
    pub fn require(&self, expected: ServiceType) -> Result<&Self, ApiError> {
        if self.service_type == expected {
            Ok(self)
        } else {
            Err(ApiError::WrongServiceType {
                name: self.name.clone(),
                kind: self.service_type.to_string(),
                expected: match expected {
                    ServiceType::Kvm => "KVM",
                    ServiceType::Webspace => "WEBSPACE",
                    ServiceType::Domain => "DOMAIN",
                    ServiceType::Other(_) => "supported",
                },
            })
        }
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flatten `data.services` into a list, keeping API order.
///
/// Entries without a usable `internal_id` are skipped.
pub fn extract_services(data: &Value) -> Vec<Service> {
    let Some(groups) = data.get("services").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut services = Vec::new();
    for (service_type, entries) in groups {
        let Some(entries) = entries.as_array() else {
            tracing::debug!("Ignoring non-list service group {}", service_type);
            continue;
        };
        for entry in entries {
            let Some(internal_id) = entry.get("internal_id").and_then(scalar_string) else {
                tracing::debug!("Skipping {} service without internal_id", service_type);
                continue;
            };
            let name = entry
                .get("name")
                .and_then(scalar_string)
                .unwrap_or_else(|| internal_id.clone());
            services.push(Service {
                name,
                internal_id,
                service_type: ServiceType::parse(service_type),
            });
        }
    }
    services
}

/// Find a service by internal id, then by name, then by 1-based index.
pub fn resolve_service<'a>(services: &'a [Service], selector: &str) -> Result<&'a Service, ApiError> {
    let selector = selector.trim();

    if let Some(service) = services
        .iter()
        .find(|s| s.internal_id == selector || s.name == selector)
    {
        return Ok(service);
    }

    selector
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| services.get(index))
        .ok_or_else(|| ApiError::UnknownService(selector.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalogue() -> Value {
        json!({
            "services": {
                "KVM": [
                    {"name": "vps-main", "internal_id": "K1A2"},
                    {"name": "vps-test", "internal_id": "K3B4"}
                ],
                "WEBSPACE": [
                    {"name": "site", "internal_id": "W9"}
                ],
                "DOMAIN": [
                    {"name": "example.de", "internal_id": "D7"}
                ]
            }
        })
    }

    #[test]
    fn test_extract_services_preserves_order() {
        let services = extract_services(&catalogue());
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["vps-main", "vps-test", "site", "example.de"]);
        assert_eq!(services[2].service_type, ServiceType::Webspace);
        assert_eq!(services[3].service_type, ServiceType::Domain);
    }

    #[test]
    fn test_extract_services_missing_or_malformed() {
        assert!(extract_services(&json!({})).is_empty());
        assert!(extract_services(&Value::Null).is_empty());

        let services = extract_services(&json!({
            "services": {
                "GAMESERVER": [{"name": "mc", "internal_id": 42}, {"name": "no-id"}],
                "BROKEN": "not-a-list"
            }
        }));
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].internal_id, "42");
        assert_eq!(
            services[0].service_type,
            ServiceType::Other("GAMESERVER".to_string())
        );
    }

    #[test]
    fn test_resolve_by_id_name_and_index() {
        let services = extract_services(&catalogue());

        assert_eq!(resolve_service(&services, "K3B4").unwrap().name, "vps-test");
        assert_eq!(resolve_service(&services, "site").unwrap().internal_id, "W9");
        assert_eq!(resolve_service(&services, "1").unwrap().internal_id, "K1A2");
        assert_eq!(resolve_service(&services, "4").unwrap().internal_id, "D7");
    }

    #[test]
    fn test_resolve_rejects_out_of_range_and_unknown() {
        let services = extract_services(&catalogue());

        assert!(matches!(
            resolve_service(&services, "0"),
            Err(ApiError::UnknownService(_))
        ));
        assert!(resolve_service(&services, "5").is_err());
        assert!(resolve_service(&services, "nope").is_err());
    }

    #[test]
    fn test_require_service_type() {
        let services = extract_services(&catalogue());
        assert!(services[0].require(ServiceType::Kvm).is_ok());
        assert!(matches!(
            services[2].require(ServiceType::Kvm),
            Err(ApiError::WrongServiceType { .. })
        ));
    }

    #[test]
    fn test_envelope_defaults() {
        let response: ApiResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(response.status.as_deref(), Some("success"));
        assert!(!response.has_data());
    }
}
