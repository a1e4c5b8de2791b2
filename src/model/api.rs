use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}
