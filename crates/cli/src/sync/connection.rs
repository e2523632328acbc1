// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push-channel connection lifecycle.
//!
//! ```text
//! Disconnected ──► Connecting ──► Connected
//!                      │              │ error / close
//!                      ▼              ▼
//!                Reconnecting { attempt: 1..=max } ──► Failed
//! ```
//!
//! Reconnects wait a fixed delay between attempts. Once the attempt budget is
//! spent the manager parks in `Failed` and schedules nothing further; only
//! [`ConnectionManager::reset`] moves it back to `Disconnected`.

use std::fmt;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::session::Inbound;
use super::transport::{Transport, WebSocketTransport};
use crate::config::Config;

/// Observable state of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected.
    Disconnected,
    /// Attempting the first connection.
    Connecting,
    /// Connected to the push endpoint.
    Connected,
    /// Retrying after a failure.
    Reconnecting { attempt: u32 },
    /// Reconnect attempts exhausted; no automatic recovery.
    Failed,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }

    /// The persistent warning to show while in `Failed`.
    pub fn warning(self) -> Option<&'static str> {
        match self {
            ConnectionState::Failed => Some(
                "Lost connection to the server and could not reconnect. Reload to try again.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => f.write_str("disconnected"),
            ConnectionState::Connecting => f.write_str("connecting"),
            ConnectionState::Connected => f.write_str("connected"),
            ConnectionState::Reconnecting { attempt } => {
                write!(f, "reconnecting (attempt {})", attempt)
            }
            ConnectionState::Failed => f.write_str("failed"),
        }
    }
}

/// Configuration for the connection manager.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Push endpoint URL.
    pub url: String,
    /// Reconnect attempts before giving up.
    pub max_attempts: u32,
    /// Fixed wait before each reconnect attempt.
    pub delay: Duration,
}

impl ConnectionConfig {
    pub fn from_config(config: &Config) -> Self {
        ConnectionConfig {
            url: config.server.push_url(),
            max_attempts: config.push.reconnect_attempts,
            delay: config.push.reconnect_delay(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// How a connected session ended.
enum Pump {
    Cancelled,
    ConsumerGone,
    Lost(String),
}

/// Owns the push-channel transport and its state machine.
///
/// Frames are forwarded in arrival order to the session's inbound queue; the
/// manager never touches entities itself.
pub struct ConnectionManager<T: Transport = WebSocketTransport> {
    config: ConnectionConfig,
    transport: T,
    state_tx: watch::Sender<ConnectionState>,
    cancel_token: CancellationToken,
}

impl ConnectionManager<WebSocketTransport> {
    /// Create a manager with the default WebSocket transport.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_transport(config, WebSocketTransport::new())
    }
}

impl<T: Transport> ConnectionManager<T> {
    /// Create a manager with a custom transport (for testing).
    pub fn with_transport(config: ConnectionConfig, transport: T) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        ConnectionManager {
            config,
            transport,
            state_tx,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Watch every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Token that tears the manager down when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Stop the connection and any pending reconnect timer.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// External restart after `Failed`. Returns whether the state changed.
    pub fn reset(&mut self) -> bool {
        if self.state() != ConnectionState::Failed {
            return false;
        }
        if self.cancel_token.is_cancelled() {
            self.cancel_token = CancellationToken::new();
        }
        self.set_state(ConnectionState::Disconnected);
        true
    }

    fn set_state(&self, state: ConnectionState) {
        info!("push channel {}", state);
        self.state_tx.send_replace(state);
    }

    /// Drive the connection until it is cancelled, the consumer goes away, or
    /// the reconnect budget runs out. Returns the final state.
    pub async fn run(&mut self, inbound: mpsc::Sender<Inbound>) -> ConnectionState {
        if self.state() == ConnectionState::Failed {
            warn!("push channel is failed; reset before running again");
            return ConnectionState::Failed;
        }

        let cancel = self.cancel_token.clone();
        let url = self.config.url.clone();
        let mut failures = 0u32;
        self.set_state(ConnectionState::Connecting);

        loop {
            let connected = tokio::select! {
                _ = cancel.cancelled() => None,
                result = self.transport.connect(&url) => Some(result),
            };

            match connected {
                None => return self.teardown().await,
                Some(Ok(())) => {
                    failures = 0;
                    self.set_state(ConnectionState::Connected);
                    match self.pump(&inbound, &cancel).await {
                        Pump::Cancelled | Pump::ConsumerGone => return self.teardown().await,
                        Pump::Lost(reason) => warn!("push channel lost: {}", reason),
                    }
                }
                Some(Err(e)) => warn!("push channel connect failed: {}", e),
            }

            failures = failures.saturating_add(1);
            if failures > self.config.max_attempts {
                let _ = self.transport.disconnect().await;
                self.set_state(ConnectionState::Failed);
                if let Some(warning) = ConnectionState::Failed.warning() {
                    error!("{}", warning);
                }
                return ConnectionState::Failed;
            }

            self.set_state(ConnectionState::Reconnecting { attempt: failures });
            let waited = tokio::select! {
                _ = cancel.cancelled() => false,
                _ = tokio::time::sleep(self.config.delay) => true,
            };
            if !waited {
                return self.teardown().await;
            }
        }
    }

    /// Forward frames until the connection ends.
    async fn pump(&mut self, inbound: &mpsc::Sender<Inbound>, cancel: &CancellationToken) -> Pump {
        loop {
            let received = tokio::select! {
                _ = cancel.cancelled() => None,
                frame = self.transport.recv() => Some(frame),
            };

            match received {
                None => return Pump::Cancelled,
                Some(Ok(Some(frame))) => {
                    if inbound.send(Inbound::Frame(frame)).await.is_err() {
                        return Pump::ConsumerGone;
                    }
                }
                Some(Ok(None)) => return Pump::Lost("closed by server".to_string()),
                Some(Err(e)) => return Pump::Lost(e.to_string()),
            }
        }
    }

    async fn teardown(&mut self) -> ConnectionState {
        let _ = self.transport.disconnect().await;
        self.set_state(ConnectionState::Disconnected);
        ConnectionState::Disconnected
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
