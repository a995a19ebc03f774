use escola_auth::Identity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub user: Identity,
}
