use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::BetService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<AuthUser>().map(|user| user.id)
}

#[utoipa::path(
    post,
    path = "/bets/slip/add",
    tag = "bets",
    request_body = AddSlipItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "加入投注单成功", body = SlipItemResponse),
        (status = 400, description = "请求参数错误"),
        (status = 401, description = "未授权"),
        (status = 404, description = "赛事不存在")
    )
)]
pub async fn add_slip_item(
    bet_service: web::Data<BetService>,
    req: HttpRequest,
    request: web::Json<AddSlipItemRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match bet_service.add_slip_item(user_id, request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": item
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/slip",
    tag = "bets",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取投注单成功", body = BetSlipResponse),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_slip(bet_service: web::Data<BetService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match bet_service.get_slip(user_id).await {
        Ok(slip) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": slip
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/bets/slip/{id}",
    tag = "bets",
    params(
        ("id" = i64, Path, description = "投注单条目 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "移除成功"),
        (status = 401, description = "未授权"),
        (status = 404, description = "条目不存在")
    )
)]
pub async fn remove_slip_item(
    bet_service: web::Data<BetService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match bet_service.remove_slip_item(user_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Bet slip item removed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bets/place",
    tag = "bets",
    request_body = PlaceBetsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "下注成功", body = PlaceBetsResponse),
        (status = 400, description = "金额无效或余额不足"),
        (status = 401, description = "未授权"),
        (status = 404, description = "条目不存在")
    )
)]
pub async fn place_bets(
    bet_service: web::Data<BetService>,
    req: HttpRequest,
    request: web::Json<PlaceBetsRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match bet_service.place_bets(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/history",
    tag = "bets",
    params(
        ("status" = Option<String>, Query, description = "all/pending/won/lost/canceled")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取注单历史成功", body = Vec<BetResponse>),
        (status = 400, description = "请求参数错误"),
        (status = 401, description = "未授权")
    )
)]
pub async fn bet_history(
    bet_service: web::Data<BetService>,
    req: HttpRequest,
    query: web::Query<BetHistoryQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match bet_service.bet_history(user_id, &query.into_inner()).await {
        Ok(bets) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bets
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn bets_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bets")
            .route("/slip/add", web::post().to(add_slip_item))
            .route("/slip", web::get().to(get_slip))
            .route("/slip/{id}", web::delete().to(remove_slip_item))
            .route("/place", web::post().to(place_bets))
            .route("/history", web::get().to(bet_history)),
    );
}
