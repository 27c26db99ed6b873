// Decision-service integration: HTTP client and order request layer.

pub mod client;
pub mod decision;

pub use client::LlmClient;

use thiserror::Error;

use crate::engine::terrain::GridError;

/// Why one decision cycle produced no orders. Callers treat every variant
/// the same way: skip the cycle, keep the session alive.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decision service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("decision service returned an empty completion")]
    EmptyCompletion,
    #[error("no JSON object in completion")]
    NoJson,
    #[error("completion did not match the orders schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
}
