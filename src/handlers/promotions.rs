use crate::models::*;
use crate::services::PromotionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/promotions",
    tag = "promotions",
    responses(
        (status = 200, description = "获取促销活动成功", body = Vec<PromotionResponse>)
    )
)]
pub async fn list_promotions(
    promotion_service: web::Data<PromotionService>,
) -> Result<HttpResponse> {
    match promotion_service.list_active().await {
        Ok(promotions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": promotions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn promotions_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/promotions", web::get().to(list_promotions));
}
