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
use clap::Parser;

use firectl::{
    api::PowerMode,
    cli::{Cli, Commands},
    commands::{account, configure, dns, kvm, run, services, ApiContext},
    config::Config,
    ui::OutputFormatter,
    utils::init_logging,
};

#[tokio::main]
async fn main() {
    // .env may provide FIRE_API_KEY / FIRE_SSH_PASSWORD
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", OutputFormatter::format_error(&format!("{e:#}")));
            1
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> Result<i32> {
    // configure writes the file, so it must not require one to exist
    if let Commands::Configure { url, show } = &cli.command {
        configure::configure(
            cli.config.as_deref(),
            cli.api_key.as_deref(),
            url.as_deref(),
            *show,
        )
        .await?;
        return Ok(0);
    }

    let config = Config::load_with_priority(cli.config.as_deref()).await?;
    let api = || ApiContext::new(&config, cli.api_key.as_deref());

    match &cli.command {
        Commands::Run(args) => return run::run_script(&config, args).await,
        Commands::Services => services::list_services(&api()?).await?,
        Commands::Info(target) => services::show_info(&api()?, &target.service).await?,
        Commands::Config(target) => services::show_config(&api()?, &target.service).await?,
        Commands::Start(target) => kvm::power(&api()?, &target.service, PowerMode::Start).await?,
        Commands::Stop(target) => kvm::power(&api()?, &target.service, PowerMode::Stop).await?,
        Commands::Restart(target) => {
            kvm::power(&api()?, &target.service, PowerMode::Restart).await?
        }
        Commands::Backup { action } => kvm::backup(&api()?, action).await?,
        Commands::Traffic { target, log } => kvm::traffic(&api()?, &target.service, *log).await?,
        Commands::Monitoring { target, incidences } => {
            kvm::monitoring(&api()?, &target.service, *incidences).await?
        }
        Commands::Ddos {
            target,
            layer4,
            layer7,
        } => {
            let layers = layer4.as_deref().zip(layer7.as_deref());
            kvm::ddos(&api()?, &target.service, layers).await?
        }
        Commands::Dns { action } => dns::dns(&api()?, action).await?,
        Commands::Account => account::show_account(&api()?).await?,
        Commands::Donations => account::show_donations(&api()?).await?,
        Commands::Affiliate => account::show_affiliate(&api()?).await?,
        Commands::Configure { .. } => {}
    }
    Ok(0)
}
