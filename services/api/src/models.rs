//! HTTP request and response models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string of `POST /messages/`.
#[derive(Deserialize, Debug)]
pub struct MessageQuery {
    #[serde(alias = "session_id")]
    pub session: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
}
