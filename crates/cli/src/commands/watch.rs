// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::info;
use tvm_core::{EntityKind, EntityStore};

use crate::cli::ServerArgs;
use crate::error::{Error, Result};
use crate::sync::{ConnectionConfig, ConnectionManager, Session};

use super::load_config;

/// Top-level collections reported when the watch ends.
const SUMMARY_KINDS: [EntityKind; 5] = [
    EntityKind::Show,
    EntityKind::Provider,
    EntityKind::QueueItem,
    EntityKind::ShowQueueItem,
    EntityKind::Notice,
];

pub async fn run(args: &ServerArgs) -> Result<()> {
    let config = load_config(args)?;
    let connection = ConnectionConfig::from_config(&config);
    let url = connection.url.clone();
    info!("watching {}", url);

    let session = Session::new();
    let sender = session.sender();
    let mut manager = ConnectionManager::new(connection);

    let cancel = manager.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, shutting down");
            cancel.cancel();
        }
    });

    let consumer = tokio::spawn(session.run());

    let final_state = manager.run(sender).await;

    let store = consumer.await.map_err(|e| Error::Task(e.to_string()))?;
    log_summary(&store);

    match final_state.warning() {
        Some(warning) => Err(Error::ConnectionFailed {
            url,
            warning: warning.to_string(),
        }),
        None => Ok(()),
    }
}

fn log_summary(store: &EntityStore) {
    for kind in SUMMARY_KINDS {
        info!("{}: {}", kind, store.len(kind));
    }
    for notice in store.notices().iter().take(5) {
        info!("notice [{}] {}: {}", notice.kind, notice.title, notice.body);
    }
}
