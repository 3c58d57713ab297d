//! Service error types and their HTTP rendering.
//!
//! Error bodies are plain-text diagnostics rather than a JSON
//! envelope; the web client matches on the text forms.

use crate::types::ItemId;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("Error: {0}")]
    InvalidRequest(String),

    #[error("Error: round index must be at least 1, got {0}")]
    InvalidRoundIndex(u32),

    #[error("Error: breadth must be 'wide', 'medium', or 'narrow', got '{0}'")]
    InvalidBreadth(String),

    #[error("Error: feedback item is orthogonal to the current location")]
    DegenerateGeometry,

    #[error("Error: unknown item id {0}")]
    UnknownItem(ItemId),

    #[error("Error: candidate pool exhausted, needed {needed} more items with {available} eligible")]
    PoolExhausted { needed: usize, available: usize },
}

impl ResponseError for ExplorerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExplorerError::InvalidRequest(_)
            | ExplorerError::InvalidRoundIndex(_)
            | ExplorerError::InvalidBreadth(_)
            | ExplorerError::UnknownItem(_) => StatusCode::BAD_REQUEST,
            ExplorerError::DegenerateGeometry => StatusCode::UNPROCESSABLE_ENTITY,
            ExplorerError::PoolExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
