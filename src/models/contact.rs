use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Juan Pérez")]
    pub name: String,
    #[schema(example = "juan@example.com")]
    pub email: String,
    #[schema(example = "Consulta sobre mi depósito")]
    pub subject: String,
    pub message: String,
}
