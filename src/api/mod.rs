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

//! Client for the 24fire hosting REST API.

pub mod client;
pub mod error;
pub mod models;
pub mod routes;

pub use client::{FireClient, API_KEY_HEADER, DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL};
pub use error::ApiError;
pub use models::{extract_services, resolve_service, ApiResponse, Service, ServiceType};
pub use routes::{ApiRequest, DnsRecord, DnsRecordUpdate, PowerMode};
