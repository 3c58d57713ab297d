//! HTTP layer: session replay endpoint and health check.
//!
//! One `POST /api` call models one full session replay: the caller
//! resends every completed round's feedback, the location is folded
//! forward round by round, and the response carries metadata for the
//! next candidate batch.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::catalog::{Catalog, MovieRecord};
use crate::embedding::EmbeddingStore;
use crate::error::{ExplorerError, Result};
use crate::location::UpdateLocation;
use crate::rounds::GenerateCandidates;
use crate::types::{ExcludedItems, FeedbackRound, ItemId};

/// Application state shared across all handlers
pub struct AppState {
    pub embeddings: Arc<EmbeddingStore>,
    pub catalog: Arc<Catalog>,
}

/// One full session replay. Feedback keys arrive as decimal strings,
/// the JSON object keys the web client produces.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub rounds: Vec<HashMap<String, i8>>,

    /// Items to exclude in addition to everything mentioned in rounds.
    #[serde(default)]
    pub exclude: Vec<ItemId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub candidates: Vec<MovieRecord>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "movie-explorer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Replays every round of feedback from the fixed starting location,
/// then returns metadata for the next candidate batch.
pub async fn recommend(
    state: web::Data<AppState>,
    request: web::Json<RecommendRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    let mut excluded: ExcludedItems = request.exclude.iter().copied().collect();
    let mut location = state.embeddings.starting_location().to_owned();

    let mut round: u32 = 1;
    for raw in &request.rounds {
        let feedback = parse_feedback(raw, state.embeddings.len())?;
        excluded.extend(feedback.keys().copied());
        info!(round, items = feedback.len(), "replaying feedback round");
        location = UpdateLocation::execute(location.view(), &feedback, round, &state.embeddings)?;
        round += 1;
    }

    let batch = GenerateCandidates::execute(
        location.view(),
        &excluded,
        round,
        &state.embeddings,
        &state.catalog,
        &mut rand::thread_rng(),
    )?;
    info!(round, batch = batch.len(), "candidate batch generated");

    let candidates = state.catalog.records_of(&batch)?;
    Ok(HttpResponse::Ok().json(RecommendResponse { candidates }))
}

fn parse_feedback(raw: &HashMap<String, i8>, catalog_size: usize) -> Result<FeedbackRound> {
    let mut feedback = FeedbackRound::with_capacity(raw.len());
    for (key, &score) in raw {
        let item: ItemId = key.parse().map_err(|_| {
            ExplorerError::InvalidRequest(format!("item id '{key}' is not an integer"))
        })?;
        if item >= catalog_size {
            return Err(ExplorerError::UnknownItem(item));
        }
        if !(-1..=1).contains(&score) {
            return Err(ExplorerError::InvalidRequest(format!(
                "score for item {item} must be -1, 0, or 1"
            )));
        }
        feedback.insert(item, score);
    }
    Ok(feedback)
}

/// JSON extractor configuration: malformed or non-JSON bodies become
/// plain-text diagnostics instead of the framework default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: actix_web::error::JsonPayloadError, _req: &HttpRequest| {
        ExplorerError::InvalidRequest(err.to_string()).into()
    })
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api", web::post().to(recommend))
        .route("/health", web::get().to(health));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feedback_valid_scores() {
        let raw: HashMap<String, i8> =
            [("3".to_string(), 1), ("7".to_string(), -1), ("9".to_string(), 0)]
                .into_iter()
                .collect();

        let feedback = parse_feedback(&raw, 100).unwrap();
        assert_eq!(feedback[&3], 1);
        assert_eq!(feedback[&7], -1);
        assert_eq!(feedback[&9], 0);
    }

    #[test]
    fn test_parse_feedback_rejects_bad_key() {
        let raw: HashMap<String, i8> = [("three".to_string(), 1)].into_iter().collect();
        assert!(matches!(
            parse_feedback(&raw, 100),
            Err(ExplorerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_feedback_rejects_unknown_item() {
        let raw: HashMap<String, i8> = [("100".to_string(), 1)].into_iter().collect();
        assert!(matches!(
            parse_feedback(&raw, 100),
            Err(ExplorerError::UnknownItem(100))
        ));
    }

    #[test]
    fn test_parse_feedback_rejects_out_of_range_score() {
        let raw: HashMap<String, i8> = [("3".to_string(), 2)].into_iter().collect();
        assert!(matches!(
            parse_feedback(&raw, 100),
            Err(ExplorerError::InvalidRequest(_))
        ));
    }
}
