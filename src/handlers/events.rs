use crate::models::*;
use crate::services::EventService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/sports/categories",
    tag = "sports",
    responses(
        (status = 200, description = "获取体育分类成功", body = Vec<SportCategoryResponse>)
    )
)]
pub async fn get_categories(event_service: web::Data<EventService>) -> Result<HttpResponse> {
    match event_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(
        ("category" = Option<String>, Query, description = "分类 slug，all 表示全部"),
        ("time" = Option<String>, Query, description = "时间窗口: all/today/tomorrow/week"),
        ("search" = Option<String>, Query, description = "联赛或球队关键字")
    ),
    responses(
        (status = 200, description = "获取赛事列表成功", body = Vec<EventResponse>),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn list_events(
    event_service: web::Data<EventService>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    match event_service.list_events(&query.into_inner()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/live",
    tag = "events",
    responses(
        (status = 200, description = "获取滚球赛事成功", body = Vec<EventResponse>)
    )
)]
pub async fn live_events(event_service: web::Data<EventService>) -> Result<HttpResponse> {
    match event_service.live_events().await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/upcoming",
    tag = "events",
    params(
        ("time" = Option<String>, Query, description = "时间窗口: all/today/tomorrow/week")
    ),
    responses(
        (status = 200, description = "获取未开赛赛事成功", body = Vec<EventResponse>),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn upcoming_events(
    event_service: web::Data<EventService>,
    query: web::Query<UpcomingEventQuery>,
) -> Result<HttpResponse> {
    match event_service.upcoming_events(&query.into_inner()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i64, Path, description = "赛事 ID")
    ),
    responses(
        (status = 200, description = "获取赛事详情成功", body = EventResponse),
        (status = 404, description = "赛事不存在")
    )
)]
pub async fn get_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.get_event(path.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn events_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/sports").route("/categories", web::get().to(get_categories)));
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("/live", web::get().to(live_events))
            .route("/upcoming", web::get().to(upcoming_events))
            .route("/{id}", web::get().to(get_event)),
    );
}
