// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tvm-core: Local mirror of a media-library server's state.
//!
//! This crate holds the synchronous half of the client: the quality bitmask
//! codec and status classifier, the keyed entity store that the push channel
//! and HTTP hydration write into, and the router that turns push-channel
//! envelopes into store mutations.

pub mod error;
pub mod merge;
pub mod protocol;
pub mod quality;
pub mod router;
pub mod status;
pub mod store;

pub use error::{Error, Result};
pub use merge::{EntityKind, Placement};
pub use protocol::{Envelope, Event, EventTag, Notice};
pub use quality::{combine, Qualities, Quality, QualityTier, QualityVocabulary};
pub use router::{route_frame, Routed};
pub use status::{classify, OverviewStatus};
pub use store::{Entity, EntityStore, Upsert};
