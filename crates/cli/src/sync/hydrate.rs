// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Initial-state hydration over the server's HTTP API.
//!
//! The HTTP client itself lives outside this crate; it plugs in through
//! [`HydrationSource`] and hands back already-parsed JSON. Results are applied
//! through the same store upserts the push channel uses.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::{debug, warn};
use tvm_core::store::into_entity;
use tvm_core::{Entity, EntityKind, EntityStore};

/// Error type for hydration requests.
#[derive(Debug, thiserror::Error)]
pub enum HydrationError {
    /// The server answered 404.
    #[error("not found")]
    NotFound,

    /// Any other non-success HTTP response.
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<tvm_core::Error> for HydrationError {
    fn from(e: tvm_core::Error) -> Self {
        HydrationError::Decode(e.to_string())
    }
}

/// Result type for hydration requests.
pub type HydrationResult<T> = Result<T, HydrationError>;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Query for one page of a provider's cached results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsQuery {
    pub page: u32,
    pub limit: u32,
    pub show_slug: String,
    pub season: u32,
    pub episode: Option<u32>,
}

impl ResultsQuery {
    /// First page of a season (or single episode) query.
    pub fn new(show_slug: impl Into<String>, season: u32, episode: Option<u32>, limit: u32) -> Self {
        ResultsQuery {
            page: 1,
            limit,
            show_slug: show_slug.into(),
            season,
            episode,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        ResultsQuery {
            page,
            ..self.clone()
        }
    }

    /// Renders `page=..&limit=..&showslug=..&season=..[&episode=..]` with the
    /// slug percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "page={}&limit={}&showslug={}&season={}",
            self.page,
            self.limit,
            urlencoding::encode(&self.show_slug),
            self.season
        );
        if let Some(episode) = self.episode {
            query.push_str(&format!("&episode={}", episode));
        }
        query
    }
}

/// The HTTP API calls hydration depends on.
///
/// Implementations return parsed JSON bodies and map a 404 to
/// [`HydrationError::NotFound`].
pub trait HydrationSource: Send + Sync {
    /// `GET /providers`
    fn providers(&self) -> BoxFuture<'_, HydrationResult<Vec<Value>>>;

    /// `GET /providers/{id}/results?{query}`
    fn provider_results(
        &self,
        provider_id: &str,
        query: &ResultsQuery,
    ) -> BoxFuture<'_, HydrationResult<Vec<Value>>>;

    /// `GET /series?limit={limit}`
    fn series(&self, limit: u32) -> BoxFuture<'_, HydrationResult<Vec<Value>>>;

    /// `GET /config/{section}`
    fn config(&self, section: &str) -> BoxFuture<'_, HydrationResult<Value>>;
}

/// One hydration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationRequest {
    Providers,
    ProviderResults { provider: String, query: ResultsQuery },
    Series { limit: u32 },
    Config { section: String },
}

impl HydrationRequest {
    /// Request path relative to the API root.
    pub fn path(&self) -> String {
        match self {
            HydrationRequest::Providers => "/providers".to_string(),
            HydrationRequest::ProviderResults { provider, query } => format!(
                "/providers/{}/results?{}",
                urlencoding::encode(provider),
                query.to_query_string()
            ),
            HydrationRequest::Series { limit } => format!("/series?limit={}", limit),
            HydrationRequest::Config { section } => {
                format!("/config/{}", urlencoding::encode(section))
            }
        }
    }
}

/// Entities fetched by a hydration call, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Hydrated {
    Providers(Vec<Entity>),
    ProviderResults { provider: String, results: Vec<Entity> },
    Shows(Vec<Entity>),
    Config { section: String, config: Entity },
}

impl Hydrated {
    /// Applies the fetched entities through the store's upserts. Returns how
    /// many were accepted; rejected ones are logged and skipped.
    pub fn apply_to(self, store: &mut EntityStore) -> usize {
        let outcomes = match self {
            Hydrated::Providers(providers) => providers
                .into_iter()
                .map(|p| store.upsert(EntityKind::Provider, p))
                .collect::<Vec<_>>(),
            Hydrated::ProviderResults { provider, results } => results
                .into_iter()
                .map(|r| store.upsert_cache_result(&provider, r))
                .collect(),
            Hydrated::Shows(shows) => shows
                .into_iter()
                .map(|s| store.upsert(EntityKind::Show, s))
                .collect(),
            Hydrated::Config { section, config } => {
                store.merge_config(&section, config);
                return 1;
            }
        };

        let mut applied = 0;
        for outcome in outcomes {
            match outcome {
                Ok(_) => applied += 1,
                Err(e) => warn!("skipping hydrated entity: {}", e),
            }
        }
        applied
    }
}

fn into_entities(kind: EntityKind, values: Vec<Value>) -> HydrationResult<Vec<Entity>> {
    values
        .into_iter()
        .map(|v| into_entity(kind, v).map_err(HydrationError::from))
        .collect()
}

/// Fetches every page of a provider's cached results.
///
/// Paging starts at 1 and stops at the first short page. A 404 means the
/// provider has nothing (more) cached for this show and is not an error.
pub async fn fetch_provider_results<S: HydrationSource + ?Sized>(
    source: &S,
    provider_id: &str,
    query: &ResultsQuery,
) -> HydrationResult<Vec<Entity>> {
    let mut results = Vec::new();
    let mut page = 1;

    loop {
        let page_query = query.with_page(page);
        match source.provider_results(provider_id, &page_query).await {
            Ok(items) => {
                let count = items.len();
                results.extend(into_entities(EntityKind::CacheResult, items)?);
                if count == 0 || count < query.limit as usize {
                    break;
                }
                page += 1;
            }
            Err(HydrationError::NotFound) => {
                debug!(
                    "no cached results for provider {} ({}, page {})",
                    provider_id, query.show_slug, page
                );
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(results)
}

/// Performs one hydration request.
pub async fn hydrate<S: HydrationSource + ?Sized>(
    source: &S,
    request: &HydrationRequest,
) -> HydrationResult<Hydrated> {
    let hydrated = match request {
        HydrationRequest::Providers => {
            Hydrated::Providers(into_entities(EntityKind::Provider, source.providers().await?)?)
        }
        HydrationRequest::ProviderResults { provider, query } => Hydrated::ProviderResults {
            provider: provider.clone(),
            results: fetch_provider_results(source, provider, query).await?,
        },
        HydrationRequest::Series { limit } => {
            Hydrated::Shows(into_entities(EntityKind::Show, source.series(*limit).await?)?)
        }
        HydrationRequest::Config { section } => {
            let body = source.config(section).await?;
            let config = match body {
                Value::Object(map) => map,
                other => {
                    return Err(HydrationError::Decode(format!(
                        "config section '{}' is not an object: {}",
                        section, other
                    )))
                }
            };
            Hydrated::Config {
                section: section.clone(),
                config,
            }
        }
    };
    Ok(hydrated)
}
