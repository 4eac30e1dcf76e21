use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::PaymentService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<AuthUser>().map(|user| user.id)
}

#[utoipa::path(
    post,
    path = "/payments/deposit",
    tag = "payments",
    request_body = DepositRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "充值成功", body = DepositResponse),
        (status = 400, description = "金额或卡片信息无效"),
        (status = 401, description = "未授权")
    )
)]
pub async fn deposit(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    request: web::Json<DepositRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match payment_service.deposit(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn payments_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/payments").route("/deposit", web::post().to(deposit)));
}
