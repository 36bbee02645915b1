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

//! KVM server operations: power, backups, traffic, monitoring and DDoS.

use anyhow::Result;

use super::ApiContext;
use crate::api::{ApiRequest, PowerMode, Service, ServiceType};
use crate::cli::BackupAction;
use crate::ui::OutputFormatter;

async fn kvm_service(ctx: &ApiContext, selector: &str) -> Result<Service> {
    let service = ctx.service(selector).await?;
    service.require(ServiceType::Kvm)?;
    Ok(service)
}

pub async fn power(ctx: &ApiContext, selector: &str, mode: PowerMode) -> Result<()> {
    let service = kvm_service(ctx, selector).await?;
    tracing::info!("Sending {} to {}", mode, service.name);

    let response = ctx
        .send(&ApiRequest::kvm_power(&service.internal_id, mode))
        .await?;
    println!(
        "{}",
        OutputFormatter::format_success(
            response.message.as_deref(),
            &format!("{} requested for {}", mode, service.name)
        )
    );
    Ok(())
}

pub async fn backup(ctx: &ApiContext, action: &BackupAction) -> Result<()> {
    let selector = match action {
        BackupAction::List(target) => &target.service,
        BackupAction::Create { target, .. }
        | BackupAction::Restore { target, .. }
        | BackupAction::Delete { target, .. } => &target.service,
    };
    let service = kvm_service(ctx, selector).await?;
    let id = service.internal_id.as_str();

    let request = match action {
        BackupAction::List(_) => ApiRequest::backup_list(id),
        BackupAction::Create { description, .. } => {
            ApiRequest::backup_create(id, description.as_deref())
        }
        BackupAction::Restore { backup_id, .. } => ApiRequest::backup_restore(id, backup_id),
        BackupAction::Delete { backup_id, .. } => ApiRequest::backup_delete(id, backup_id),
    };
    let response = ctx.send(&request).await?;

    if let BackupAction::List(_) = action {
        print!("{}", OutputFormatter::format_value(&response.data));
        return Ok(());
    }

    println!(
        "{}",
        OutputFormatter::format_success(response.message.as_deref(), "Backup request accepted")
    );
    if response.has_data() {
        print!("{}", OutputFormatter::format_value(&response.data));
    }
    Ok(())
}

pub async fn traffic(ctx: &ApiContext, selector: &str, log: bool) -> Result<()> {
    let service = kvm_service(ctx, selector).await?;
    let request = if log {
        ApiRequest::traffic_log(&service.internal_id)
    } else {
        ApiRequest::traffic_current(&service.internal_id)
    };

    let response = ctx.send(&request).await?;
    print!("{}", OutputFormatter::format_value(&response.data));
    Ok(())
}

pub async fn monitoring(ctx: &ApiContext, selector: &str, incidences: bool) -> Result<()> {
    let service = kvm_service(ctx, selector).await?;
    let request = if incidences {
        ApiRequest::monitoring_incidences(&service.internal_id)
    } else {
        ApiRequest::monitoring_timings(&service.internal_id)
    };

    let response = ctx.send(&request).await?;
    print!("{}", OutputFormatter::format_value(&response.data));
    Ok(())
}

/// Show DDoS settings, or change them when both layers are given.
pub async fn ddos(
    ctx: &ApiContext,
    selector: &str,
    layers: Option<(&str, &str)>,
) -> Result<()> {
    let service = kvm_service(ctx, selector).await?;

    match layers {
        Some((layer4, layer7)) => {
            let response = ctx
                .send(&ApiRequest::ddos_update(&service.internal_id, layer4, layer7))
                .await?;
            println!(
                "{}",
                OutputFormatter::format_success(
                    response.message.as_deref(),
                    "DDoS protection updated"
                )
            );
        }
        None => {
            let response = ctx.send(&ApiRequest::ddos_status(&service.internal_id)).await?;
            print!("{}", OutputFormatter::format_value(&response.data));
        }
    }
    Ok(())
}
