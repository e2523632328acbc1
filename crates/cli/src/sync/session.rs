// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The single consumer that owns the entity store.
//!
//! Push frames and hydration results arrive on one ordered queue and are
//! applied one at a time. Nothing else holds a mutable reference to the store.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use tvm_core::{route_frame, EntityStore};

use super::hydrate::{hydrate, Hydrated, HydrationRequest, HydrationResult, HydrationSource};

/// Capacity of the inbound queue.
const INBOUND_CAPACITY: usize = 256;

/// Work for the session consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// A raw push-channel text frame.
    Frame(String),
    /// A resolved hydration request.
    Hydrated(Hydrated),
}

/// Owns the store and the queue feeding it.
pub struct Session {
    store: EntityStore,
    inbound_tx: mpsc::Sender<Inbound>,
    inbound_rx: mpsc::Receiver<Inbound>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_store(EntityStore::new())
    }

    /// Resume from an existing store.
    pub fn with_store(store: EntityStore) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
        Session {
            store,
            inbound_tx,
            inbound_rx,
        }
    }

    /// A producer handle for the inbound queue.
    pub fn sender(&self) -> mpsc::Sender<Inbound> {
        self.inbound_tx.clone()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Start a hydration request in the background. See [`spawn_hydration`].
    pub fn spawn_hydration<S>(
        &self,
        source: Arc<S>,
        request: HydrationRequest,
    ) -> JoinHandle<HydrationResult<()>>
    where
        S: HydrationSource + ?Sized + 'static,
    {
        spawn_hydration(source, request, self.sender())
    }

    /// Apply one inbound item to the store.
    pub fn apply(&mut self, inbound: Inbound) {
        apply_inbound(&mut self.store, inbound);
    }

    /// Apply everything already queued without waiting for more.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(inbound) = self.inbound_rx.try_recv() {
            apply_inbound(&mut self.store, inbound);
            applied += 1;
        }
        applied
    }

    /// Consume the queue until every producer has gone, then hand back the
    /// store.
    pub async fn run(self) -> EntityStore {
        let Session {
            mut store,
            inbound_tx,
            mut inbound_rx,
        } = self;
        drop(inbound_tx);

        while let Some(inbound) = inbound_rx.recv().await {
            apply_inbound(&mut store, inbound);
        }
        store
    }
}

fn apply_inbound(store: &mut EntityStore, inbound: Inbound) {
    match inbound {
        Inbound::Frame(frame) => {
            route_frame(store, &frame);
        }
        Inbound::Hydrated(hydrated) => {
            let applied = hydrated.apply_to(store);
            debug!("applied {} hydrated entities", applied);
        }
    }
}

/// Start a hydration request without waiting for it.
///
/// A successful result is queued for the session even if nobody awaits the
/// handle. Failures other than 404 come back through the handle for the
/// caller to surface.
pub fn spawn_hydration<S>(
    source: Arc<S>,
    request: HydrationRequest,
    inbound: mpsc::Sender<Inbound>,
) -> JoinHandle<HydrationResult<()>>
where
    S: HydrationSource + ?Sized + 'static,
{
    tokio::spawn(async move {
        let hydrated = hydrate(source.as_ref(), &request).await?;
        if inbound.send(Inbound::Hydrated(hydrated)).await.is_err() {
            debug!("session closed before {} could be applied", request.path());
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
