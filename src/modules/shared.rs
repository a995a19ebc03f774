//! Response bodies shared by several feature modules.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Confirmation returned after a record is created on the caller's behalf.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedResponse {
    pub msg: String,
    /// Id of the created record.
    #[serde(rename = "id_info")]
    pub id: i64,
}

impl SavedResponse {
    pub fn new(msg: impl Into<String>, id: i64) -> Self {
        Self {
            msg: msg.into(),
            id,
        }
    }
}

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
