use crate::middlewares::{AdminMiddleware, AuthUser};
use crate::models::*;
use crate::services::{BetService, EventService, PromotionService, UserService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<AuthUser>().map(|user| user.id)
}

// ==================== 赛事管理 ====================

#[utoipa::path(
    get,
    path = "/admin/events",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "all/upcoming/live/completed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取赛事列表成功", body = Vec<EventResponse>),
        (status = 401, description = "未授权"),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_events(
    event_service: web::Data<EventService>,
    query: web::Query<AdminEventQuery>,
) -> Result<HttpResponse> {
    match event_service.admin_list_events(&query.into_inner()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/events",
    tag = "admin",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建赛事成功", body = EventResponse),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn create_event(
    event_service: web::Data<EventService>,
    request: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    match event_service.create_event(request.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/events/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "赛事 ID")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新赛事成功", body = EventResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "赛事不存在")
    )
)]
pub async fn update_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
    request: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    match event_service
        .update_event(path.into_inner(), request.into_inner())
        .await
    {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/events/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "赛事 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除赛事成功"),
        (status = 400, description = "存在未结算注单"),
        (status = 404, description = "赛事不存在")
    )
)]
pub async fn delete_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.delete_event(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Event deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 用户管理 ====================

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    params(
        ("search" = Option<String>, Query, description = "用户名关键字")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户列表成功", body = Vec<UserResponse>),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<AdminUserQuery>,
) -> Result<HttpResponse> {
    match user_service.admin_list_users(&query.into_inner()).await {
        Ok(users) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": users
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    request_body = AdminCreateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建用户成功", body = UserResponse),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn create_user(
    user_service: web::Data<UserService>,
    request: web::Json<AdminCreateUserRequest>,
) -> Result<HttpResponse> {
    match user_service.admin_create_user(request.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "用户 ID")
    ),
    request_body = AdminUpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新用户成功", body = UserResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
    request: web::Json<AdminUpdateUserRequest>,
) -> Result<HttpResponse> {
    match user_service
        .admin_update_user(path.into_inner(), request.into_inner())
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "用户 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除用户成功"),
        (status = 400, description = "不能删除当前账号"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let acting_user_id = get_user_id_from_request(&req).unwrap_or(0);

    match user_service
        .admin_delete_user(path.into_inner(), acting_user_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "User deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 注单管理 ====================

#[utoipa::path(
    get,
    path = "/admin/bets",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "all/pending/won/lost/canceled"),
        ("search" = Option<String>, Query, description = "用户名或对阵关键字"),
        ("page" = Option<u32>, Query, description = "页码"),
        ("per_page" = Option<u32>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取注单列表成功"),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_bets(
    bet_service: web::Data<BetService>,
    query: web::Query<AdminBetQuery>,
) -> Result<HttpResponse> {
    match bet_service.admin_list_bets(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/bets/{id}/settle",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "注单 ID")
    ),
    request_body = SettleBetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "结算成功", body = AdminBetResponse),
        (status = 400, description = "注单已结算或状态无效"),
        (status = 404, description = "注单不存在")
    )
)]
pub async fn settle_bet(
    bet_service: web::Data<BetService>,
    path: web::Path<i64>,
    request: web::Json<SettleBetRequest>,
) -> Result<HttpResponse> {
    match bet_service
        .settle_bet(path.into_inner(), request.into_inner())
        .await
    {
        Ok(bet) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bet
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 促销管理 ====================

#[utoipa::path(
    get,
    path = "/admin/promotions",
    tag = "admin",
    params(
        ("category" = Option<String>, Query, description = "促销分类，all 表示全部")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取促销列表成功", body = Vec<PromotionResponse>),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_promotions(
    promotion_service: web::Data<PromotionService>,
    query: web::Query<PromotionQuery>,
) -> Result<HttpResponse> {
    match promotion_service.admin_list(&query.into_inner()).await {
        Ok(promotions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": promotions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/promotions",
    tag = "admin",
    request_body = CreatePromotionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建促销成功", body = PromotionResponse),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn create_promotion(
    promotion_service: web::Data<PromotionService>,
    request: web::Json<CreatePromotionRequest>,
) -> Result<HttpResponse> {
    match promotion_service.create(request.into_inner()).await {
        Ok(promotion) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": promotion
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/promotions/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "促销 ID")
    ),
    request_body = UpdatePromotionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新促销成功", body = PromotionResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "促销不存在")
    )
)]
pub async fn update_promotion(
    promotion_service: web::Data<PromotionService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePromotionRequest>,
) -> Result<HttpResponse> {
    match promotion_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(promotion) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": promotion
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/promotions/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "促销 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除促销成功"),
        (status = 404, description = "促销不存在")
    )
)]
pub async fn delete_promotion(
    promotion_service: web::Data<PromotionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match promotion_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Promotion deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 表单参考数据 ====================

#[utoipa::path(
    get,
    path = "/admin/teams",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取球队列表成功", body = Vec<TeamResponse>),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_teams(event_service: web::Data<EventService>) -> Result<HttpResponse> {
    match event_service.list_teams().await {
        Ok(teams) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": teams
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取分类列表成功", body = Vec<SportCategoryResponse>),
        (status = 403, description = "无管理员权限")
    )
)]
pub async fn list_categories(event_service: web::Data<EventService>) -> Result<HttpResponse> {
    match event_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .route("/events", web::get().to(list_events))
            .route("/events", web::post().to(create_event))
            .route("/events/{id}", web::put().to(update_event))
            .route("/events/{id}", web::delete().to(delete_event))
            .route("/users", web::get().to(list_users))
            .route("/users", web::post().to(create_user))
            .route("/users/{id}", web::put().to(update_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/bets", web::get().to(list_bets))
            .route("/bets/{id}/settle", web::put().to(settle_bet))
            .route("/promotions", web::get().to(list_promotions))
            .route("/promotions", web::post().to(create_promotion))
            .route("/promotions/{id}", web::put().to(update_promotion))
            .route("/promotions/{id}", web::delete().to(delete_promotion))
            .route("/teams", web::get().to(list_teams))
            .route("/categories", web::get().to(list_categories)),
    );
}
