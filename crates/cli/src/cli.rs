// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ServerConfig;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// tvmirror - live mirror of a media-library server's state
#[derive(Parser, Debug)]
#[command(name = "tvmirror", version)]
#[command(about = "Mirror a media-library server's shows, providers and queues in real time")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the server; overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// Path to config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server host and port, e.g. nas:8081
    #[arg(long)]
    pub host: Option<String>,

    /// Path prefix the web UI is served under, e.g. /medusa
    #[arg(long)]
    pub base_path: Option<String>,

    /// Use wss:// instead of ws://
    #[arg(long)]
    pub tls: bool,
}

impl ServerArgs {
    /// Applies the flags that were given on top of `server`.
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(base_path) = &self.base_path {
            server.base_path = base_path.clone();
        }
        if self.tls {
            server.tls = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the push channel and log every update
    Watch {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Write the effective configuration, flags included, to the config file
    Init {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Print the push-channel URL for the current configuration
    Url {
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Encode or decode quality bitmasks
    #[command(subcommand)]
    Quality(QualityCommand),
}

#[derive(Subcommand, Debug)]
pub enum QualityCommand {
    /// Pack allowed and preferred flags into one value
    Combine {
        /// Allowed quality flags (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        allowed: Vec<u32>,

        /// Preferred quality flags (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        preferred: Vec<u32>,

        #[arg(short = 'o', long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Unpack a combined value into allowed and preferred flags
    Split {
        /// Combined quality value
        value: u32,

        /// Known flags (comma separated); defaults to every low-half bit
        #[arg(short, long, value_delimiter = ',')]
        flags: Vec<u32>,

        #[arg(short = 'o', long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Classify an episode's overview status
    Status {
        /// Raw episode status, e.g. Downloaded
        raw_status: String,

        /// Episode quality flag
        quality: u32,

        /// Show's configured allowed flags (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        allowed: Vec<u32>,

        /// Show's configured preferred flags (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        preferred: Vec<u32>,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
