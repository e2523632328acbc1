// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tvmirror - a live client-side mirror of a media-library server.
//!
//! The server pushes JSON frames over a WebSocket; this crate keeps a
//! connection to it, routes every frame into a [`tvm_core::EntityStore`]
//! and layers HTTP hydration results on top through the same queue.
//!
//! # Main Components
//!
//! - [`sync`] - connection manager, transport, session queue and hydration
//! - [`Config`] - server location, reconnect policy and page sizes
//! - [`Error`] - Error types for all operations
//!
//! ```rust,ignore
//! use tvmirror::sync::{ConnectionConfig, ConnectionManager, Session};
//!
//! let config = Config::load_or_default(None)?;
//! let session = Session::new();
//! let mut manager = ConnectionManager::new(ConnectionConfig::from_config(&config));
//! let sender = session.sender();
//! let consumer = tokio::spawn(session.run());
//! manager.run(sender).await;
//! let store = consumer.await?;
//! ```

mod cli;
mod commands;

pub mod config;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, QualityCommand, ServerArgs};
pub use config::Config;
pub use error::{Error, Result};

/// Runs a parsed command to completion.
pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Watch { server } => commands::watch::run(&server).await,
        Command::Init { server } => commands::init::run(&server),
        Command::Url { server } => commands::url::run(&server),
        Command::Quality(cmd) => commands::quality::run(cmd),
    }
}
