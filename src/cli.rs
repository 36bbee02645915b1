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

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ssh::known_hosts::StrictHostKeyChecking;

#[derive(Parser, Debug)]
#[command(
    name = "firectl",
    version,
    about = "24fire hosting control - manage services and run scripts on your servers",
    long_about = "firectl talks to the 24fire hosting API to inspect services, control KVM servers,\nmanage backups, DNS records and DDoS protection, and deploys scripts to servers over SSH.\nThe API key is read from --api-key, the FIRE_API_KEY environment variable (a .env file\nin the current directory is honoured) or the config file written by 'firectl configure'.",
    after_help = "EXAMPLES:\n  List services:                firectl services\n  Show a service by number:     firectl info 1\n  Restart a server:             firectl restart my-vps\n  Create a backup:              firectl backup create my-vps -d \"before upgrade\"\n  Add a DNS record:             firectl dns add example.de --type A --name www --data 203.0.113.7\n  Run a script on a server:     firectl run --host 203.0.113.7 deploy.sh -- --fast"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        help = "API key (overrides FIRE_API_KEY and the config file)"
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Configuration file path [default: ~/.config/firectl/config.yaml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List all services on the account")]
    Services,

    #[command(about = "Show status or details of a service")]
    Info(ServiceArg),

    #[command(about = "Show the configuration of a KVM server")]
    Config(ServiceArg),

    #[command(about = "Start a KVM server")]
    Start(ServiceArg),

    #[command(about = "Stop a KVM server")]
    Stop(ServiceArg),

    #[command(about = "Restart a KVM server")]
    Restart(ServiceArg),

    #[command(about = "Manage KVM backups")]
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    #[command(about = "Show traffic usage of a KVM server")]
    Traffic {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(long, help = "Show the traffic log instead of current usage")]
        log: bool,
    },

    #[command(about = "Show monitoring data of a KVM server")]
    Monitoring {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(long, help = "Show incidences instead of response timings")]
        incidences: bool,
    },

    #[command(about = "Show or change DDoS protection of a KVM server")]
    Ddos {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(long, requires = "layer7", help = "Layer 4 protection profile")]
        layer4: Option<String>,

        #[arg(long, requires = "layer4", help = "Layer 7 protection profile")]
        layer7: Option<String>,
    },

    #[command(about = "Manage DNS records of a domain")]
    Dns {
        #[command(subcommand)]
        action: DnsAction,
    },

    #[command(about = "Show account information")]
    Account,

    #[command(about = "Show donation page information")]
    Donations,

    #[command(about = "Show affiliate information")]
    Affiliate,

    #[command(about = "Store the API key and settings in the config file")]
    Configure {
        #[arg(long, help = "API base URL to store (default: https://manage.24fire.de/api)")]
        url: Option<String>,

        #[arg(long, help = "Print the config file path and current settings")]
        show: bool,
    },

    #[command(
        about = "Copy a script to a server over SSH, run it and remove it",
        after_help = "Script arguments follow '--':\n  firectl run --host 203.0.113.7 setup.sh -- --verbose prod\n\nExit status is 0 on success, the script's exit code if it failed, and 1 otherwise."
    )]
    Run(RunArgs),
}

/// Selector for one service: internal id, name or number from `firectl services`.
#[derive(Args, Debug, Clone)]
pub struct ServiceArg {
    #[arg(help = "Service internal id, name, or number from 'firectl services'")]
    pub service: String,
}

#[derive(Subcommand, Debug)]
pub enum BackupAction {
    #[command(about = "List backups")]
    List(ServiceArg),

    #[command(about = "Create a backup")]
    Create {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(short = 'd', long, help = "Backup description")]
        description: Option<String>,
    },

    #[command(about = "Restore a backup")]
    Restore {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(help = "Backup id")]
        backup_id: String,
    },

    #[command(about = "Delete a backup")]
    Delete {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(help = "Backup id")]
        backup_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DnsAction {
    #[command(about = "List DNS records")]
    List(ServiceArg),

    #[command(about = "Add a DNS record")]
    Add {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(long = "type", value_name = "TYPE", help = "Record type (A, AAAA, CNAME, MX, TXT, ...)")]
        record_type: String,

        #[arg(long, help = "Record name")]
        name: String,

        #[arg(long, help = "Record data")]
        data: String,
    },

    #[command(about = "Edit a DNS record")]
    Edit {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(help = "Record id")]
        record_id: String,

        #[arg(long = "type", value_name = "TYPE", help = "New record type")]
        record_type: Option<String>,

        #[arg(long, help = "New record name")]
        name: Option<String>,

        #[arg(long, help = "New record data")]
        data: Option<String>,
    },

    #[command(about = "Remove a DNS record")]
    Remove {
        #[command(flatten)]
        target: ServiceArg,

        #[arg(help = "Record id")]
        record_id: String,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(
        value_name = "SCRIPT",
        required_unless_present = "inline",
        conflicts_with = "inline",
        help = "Local script file to copy and run"
    )]
    pub script: Option<PathBuf>,

    #[arg(long, value_name = "TEXT", help = "Script content given on the command line")]
    pub inline: Option<String>,

    #[arg(long, help = "Target host [config: automation.host]")]
    pub host: Option<String>,

    #[arg(short = 'p', long, help = "SSH port [config: automation.port, default: 22]")]
    pub port: Option<u16>,

    #[arg(short = 'u', long, help = "SSH user [config: automation.user, default: root]")]
    pub user: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "SSH private key file (prompts for passphrase if encrypted)\nFalls back to ~/.ssh/id_ed25519, ~/.ssh/id_rsa, ..."
    )]
    pub identity: Option<PathBuf>,

    #[arg(
        short = 'P',
        long,
        help = "Use password authentication (FIRE_SSH_PASSWORD or prompt)"
    )]
    pub password: bool,

    #[arg(short = 'A', long, help = "Use SSH agent for authentication (Unix only)")]
    pub use_agent: bool,

    #[arg(long, help = "Remote path for the staged script [default: <remote_dir>/firectl-<uuid>.sh]")]
    pub remote_path: Option<String>,

    #[arg(long, help = "Interpreter to run the script with, e.g. 'bash -e'")]
    pub interpreter: Option<String>,

    #[arg(long, help = "Do not mark the staged script executable (runs it with sh)")]
    pub no_exec_bit: bool,

    #[arg(long, value_name = "SECONDS", help = "Abort the run after this many seconds (0 = no limit)")]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "MODE",
        help = "Host key checking: yes, no or accept-new [default: accept-new]"
    )]
    pub strict_host_key_checking: Option<StrictHostKeyChecking>,

    #[arg(last = true, value_name = "ARGS", help = "Arguments passed to the script")]
    pub args: Vec<String>,
}
