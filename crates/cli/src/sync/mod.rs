// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Real-time synchronization with the media server.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐  frames  ┌───────────┐  upsert  ┌─────────────┐
//! │ ConnectionManager │─────────►│           │─────────►│             │
//! │   (Transport)     │          │  Session  │          │ EntityStore │
//! └───────────────────┘          │  (queue)  │          │             │
//! ┌───────────────────┐ hydrated │           │          │             │
//! │ hydration tasks   │─────────►│           │          │             │
//! └───────────────────┘          └───────────┘          └─────────────┘
//! ```
//!
//! # Features
//!
//! - WebSocket push channel with a fixed-delay, bounded reconnect loop
//! - Connection state published on a watch channel
//! - Fire-and-forget HTTP hydration applied through the same queue
//! - Injectable transport and hydration source for testing

mod connection;
mod hydrate;
mod session;
mod transport;

pub use connection::{ConnectionConfig, ConnectionManager, ConnectionState};
pub use hydrate::{
    fetch_provider_results, hydrate, Hydrated, HydrationError, HydrationRequest, HydrationResult,
    HydrationSource, ResultsQuery,
};
pub use session::{spawn_hydration, Inbound, Session};
pub use transport::{Transport, TransportError, TransportResult, WebSocketTransport};

#[cfg(test)]
mod test_helpers;
