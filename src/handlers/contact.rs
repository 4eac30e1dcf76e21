use crate::models::*;
use crate::services::ContactService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "留言提交成功"),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn submit_contact(
    contact_service: web::Data<ContactService>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    match contact_service.submit(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Message received"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn contact_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", web::post().to(submit_contact));
}
