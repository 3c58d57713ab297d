//! Movie Explorer content-discovery engine.
//!
//! Maintains a single unit-norm "location" in a precomputed movie
//! embedding space representing a user's evolving taste. Each request
//! replays a session's feedback rounds into that location, then
//! samples a diverse batch of nearby-but-varied candidates for the
//! next round.

pub mod catalog;
pub mod config;
pub mod diversity;
pub mod embedding;
pub mod error;
pub mod geometry;
pub mod location;
pub mod ranking;
pub mod rounds;
pub mod server;
pub mod types;

// Re-export key types
pub use catalog::{Catalog, MovieRecord};
pub use config::ExplorerConfig;
pub use diversity::SelectDiverseItems;
pub use embedding::EmbeddingStore;
pub use error::ExplorerError;
pub use location::UpdateLocation;
pub use ranking::{Breadth, RankItems};
pub use rounds::GenerateCandidates;
pub use types::{ExcludedItems, FeedbackRound, ItemId};
