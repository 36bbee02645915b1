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
use crate::api::ApiRequest;
use crate::ui::OutputFormatter;

pub async fn show_account(ctx: &ApiContext) -> Result<()> {
    let response = ctx.send(&ApiRequest::account()).await?;
    print!("{}", OutputFormatter::format_account(&response.data));
    Ok(())
}

pub async fn show_donations(ctx: &ApiContext) -> Result<()> {
    let response = ctx.send(&ApiRequest::donations()).await?;
    print!("{}", OutputFormatter::format_donations(&response.data));
    Ok(())
}

pub async fn show_affiliate(ctx: &ApiContext) -> Result<()> {
    let response = ctx.send(&ApiRequest::affiliate()).await?;
    print!("{}", OutputFormatter::format_affiliate(&response.data));
    Ok(())
}
