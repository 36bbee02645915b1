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

use anyhow::Result;

use super::ApiContext;
use crate::api::{ApiRequest, DnsRecord, DnsRecordUpdate, ServiceType};
use crate::cli::DnsAction;
use crate::ui::OutputFormatter;

pub async fn dns(ctx: &ApiContext, action: &DnsAction) -> Result<()> {
    let selector = match action {
        DnsAction::List(target) => &target.service,
        DnsAction::Add { target, .. }
        | DnsAction::Edit { target, .. }
        | DnsAction::Remove { target, .. } => &target.service,
    };

    let update = match action {
        DnsAction::Edit {
            record_type,
            name,
            data,
            ..
        } => DnsRecordUpdate {
            record_type: record_type.clone(),
            name: name.clone(),
            data: data.clone(),
        },
        _ => DnsRecordUpdate::default(),
    };
    if matches!(action, DnsAction::Edit { .. }) && update.is_empty() {
        anyhow::bail!("Nothing to change: pass at least one of --type, --name or --data");
    }

    let domain = ctx.service(selector).await?;
    domain.require(ServiceType::Domain)?;
    let id = domain.internal_id.as_str();

    let request = match action {
        DnsAction::List(_) => ApiRequest::dns_list(id),
        DnsAction::Add {
            record_type,
            name,
            data,
            ..
        } => ApiRequest::dns_add(
            id,
            &DnsRecord {
                record_type: record_type.clone(),
                name: name.clone(),
                data: data.clone(),
            },
        ),
        DnsAction::Edit { record_id, .. } => ApiRequest::dns_edit(id, record_id, &update),
        DnsAction::Remove { record_id, .. } => ApiRequest::dns_remove(id, record_id),
    };

    let response = ctx.send(&request).await?;
    match action {
        DnsAction::List(_) => print!("{}", OutputFormatter::format_value(&response.data)),
        _ => {
            println!(
                "{}",
                OutputFormatter::format_success(
                    response.message.as_deref(),
                    &format!("DNS records of {} updated", domain.name)
                )
            );
            if response.has_data() {
                print!("{}", OutputFormatter::format_value(&response.data));
            }
        }
    }
    Ok(())
}
