use crate::entities::promotion_entity as promotions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub code: Option<String>,
    pub end_date: DateTime<Utc>,
    pub terms: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<promotions::Model> for PromotionResponse {
    fn from(m: promotions::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image_url: m.image_url,
            category: m.category,
            code: m.code,
            end_date: m.end_date,
            terms: m.terms,
            is_active: m.is_active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePromotionRequest {
    #[schema(example = "Bono de Bienvenida 100%")]
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[schema(example = "Deportes")]
    pub category: String,
    #[schema(example = "LALIGA10")]
    pub code: Option<String>,
    pub end_date: DateTime<Utc>,
    pub terms: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub terms: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionQuery {
    pub category: Option<String>,
}
