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

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::ApiContext;
use crate::api::{ApiRequest, ServiceType};
use crate::ui::OutputFormatter;

pub async fn list_services(ctx: &ApiContext) -> Result<()> {
    let services = ctx.services().await?;
    print!("{}", OutputFormatter::format_services(&services));
    Ok(())
}

pub async fn show_info(ctx: &ApiContext, selector: &str) -> Result<()> {
    let service = ctx.service(selector).await?;
    let request = ApiRequest::service_info(&service).with_context(|| {
        format!(
            "Service '{}' has unsupported type {}",
            service.name, service.service_type
        )
    })?;

    let response = ctx.send(&request).await?;
    println!(
        "{}",
        OutputFormatter::format_header(&format!("{} ({})", service.name, service.service_type))
    );
    print!("{}", OutputFormatter::format_value(&response.data));
    Ok(())
}

pub async fn show_config(ctx: &ApiContext, selector: &str) -> Result<()> {
    let service = ctx.service(selector).await?;
    service.require(ServiceType::Kvm)?;

    let response = ctx.send(&ApiRequest::kvm_config(&service.internal_id)).await?;
    println!("\n{} {}", "Configuration of".bold(), service.name.bold());
    print!("{}", OutputFormatter::format_value(&response.data));
    Ok(())
}
