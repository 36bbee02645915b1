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

//! Endpoint table for the 24fire API.
//!
//! Each constructor returns the method, path (relative to the API base URL)
//! and form body of exactly one request.

use reqwest::Method;
use std::fmt;
use std::str::FromStr;

use super::models::{Service, ServiceType};

/// A single API call, not yet bound to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub form: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            form: Vec::new(),
        }
    }

    fn with_method(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            form: Vec::new(),
        }
    }

    fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.form.push((name, value.into()));
        self
    }

    fn optional_field(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn services() -> Self {
        Self::get("/account/services")
    }

    pub fn account() -> Self {
        Self::get("/account")
    }

    pub fn donations() -> Self {
        Self::get("/account/donations")
    }

    pub fn affiliate() -> Self {
        Self::get("/account/affiliate")
    }

    /// Status or detail request matching the service's product type.
    ///
    /// Returns `None` for product types the API has no info endpoint for.
    pub fn service_info(service: &Service) -> Option<Self> {
        let id = &service.internal_id;
        match service.service_type {
            ServiceType::Kvm => Some(Self::kvm_status(id)),
            ServiceType::Webspace => Some(Self::get(format!("/webspace/{id}"))),
            ServiceType::Domain => Some(Self::get(format!("/domain/{id}"))),
            ServiceType::Other(_) => None,
        }
    }

    pub fn kvm_status(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/status"))
    }

    pub fn kvm_config(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/config"))
    }

    pub fn kvm_power(id: &str, mode: PowerMode) -> Self {
        Self::with_method(Method::POST, format!("/kvm/{id}/power")).field("mode", mode.as_str())
    }

    pub fn backup_list(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/backup/list"))
    }

    pub fn backup_create(id: &str, description: Option<&str>) -> Self {
        Self::with_method(Method::PUT, format!("/kvm/{id}/backup/create"))
            .field("description", description.unwrap_or_default())
    }

    pub fn backup_restore(id: &str, backup_id: &str) -> Self {
        Self::with_method(Method::POST, format!("/kvm/{id}/backup/restore"))
            .field("backup_id", backup_id)
    }

    pub fn backup_delete(id: &str, backup_id: &str) -> Self {
        Self::with_method(Method::DELETE, format!("/kvm/{id}/backup/delete"))
            .field("backup_id", backup_id)
    }

    pub fn traffic_current(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/traffic/current"))
    }

    pub fn traffic_log(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/traffic/log"))
    }

    pub fn monitoring_timings(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/monitoring/timings"))
    }

    pub fn monitoring_incidences(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/monitoring/incidences"))
    }

    pub fn ddos_status(id: &str) -> Self {
        Self::get(format!("/kvm/{id}/ddos"))
    }

    pub fn ddos_update(id: &str, layer4: &str, layer7: &str) -> Self {
        Self::with_method(Method::POST, format!("/kvm/{id}/ddos"))
            .field("layer4", layer4)
            .field("layer7", layer7)
    }

    pub fn dns_list(id: &str) -> Self {
        Self::get(format!("/domain/{id}/dns"))
    }

    pub fn dns_add(id: &str, record: &DnsRecord) -> Self {
        Self::with_method(Method::PUT, format!("/domain/{id}/dns/add"))
            .field("type", record.record_type.as_str())
            .field("name", record.name.as_str())
            .field("data", record.data.as_str())
    }

    /// Only the fields that are `Some` are sent.
    pub fn dns_edit(id: &str, record_id: &str, update: &DnsRecordUpdate) -> Self {
        Self::with_method(Method::POST, format!("/domain/{id}/dns/edit"))
            .field("record_id", record_id)
            .optional_field("type", update.record_type.as_deref())
            .optional_field("name", update.name.as_deref())
            .optional_field("data", update.data.as_deref())
    }

    pub fn dns_remove(id: &str, record_id: &str) -> Self {
        Self::with_method(Method::DELETE, format!("/domain/{id}/dns/remove"))
            .field("record_id", record_id)
    }
}

/// Power action for a KVM server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    Start,
    Stop,
    Restart,
}

impl PowerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerMode::Start => "start",
            PowerMode::Stop => "stop",
            PowerMode::Restart => "restart",
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(PowerMode::Start),
            "stop" => Ok(PowerMode::Stop),
            "restart" => Ok(PowerMode::Restart),
            other => Err(format!(
                "Invalid power mode '{other}'. Valid options: start, stop, restart"
            )),
        }
    }
}

/// A complete DNS record to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub record_type: String,
    pub name: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecordUpdate {
    pub record_type: Option<String>,
    pub name: Option<String>,
    pub data: Option<String>,
}

impl DnsRecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.record_type.is_none() && self.name.is_none() && self.data.is_none()
    }
}
