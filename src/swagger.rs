use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{BetStatus, BetType, EventStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::user::get_user,
        handlers::user::get_user_stats,
        handlers::events::get_categories,
        handlers::events::list_events,
        handlers::events::live_events,
        handlers::events::upcoming_events,
        handlers::events::get_event,
        handlers::bets::add_slip_item,
        handlers::bets::get_slip,
        handlers::bets::remove_slip_item,
        handlers::bets::place_bets,
        handlers::bets::bet_history,
        handlers::promotions::list_promotions,
        handlers::payments::deposit,
        handlers::contact::submit_contact,
        handlers::admin::list_events,
        handlers::admin::create_event,
        handlers::admin::update_event,
        handlers::admin::delete_event,
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::update_user,
        handlers::admin::delete_user,
        handlers::admin::list_bets,
        handlers::admin::settle_bet,
        handlers::admin::list_promotions,
        handlers::admin::create_promotion,
        handlers::admin::update_promotion,
        handlers::admin::delete_promotion,
        handlers::admin::list_teams,
        handlers::admin::list_categories,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            UserResponse,
            AuthResponse,
            UserStatsResponse,
            AdminCreateUserRequest,
            AdminUpdateUserRequest,
            SportCategoryResponse,
            TeamResponse,
            EventResponse,
            EventStatus,
            CreateEventRequest,
            UpdateEventRequest,
            BetType,
            BetStatus,
            AddSlipItemRequest,
            SlipItemResponse,
            BetSlipResponse,
            PlaceBetItem,
            PlaceBetsRequest,
            BetResponse,
            PlaceBetsResponse,
            AdminBetResponse,
            SettleBetRequest,
            PromotionResponse,
            CreatePromotionRequest,
            UpdatePromotionRequest,
            DepositRequest,
            DepositResponse,
            ContactRequest,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "user", description = "User account API"),
        (name = "sports", description = "Sport categories API"),
        (name = "events", description = "Events API"),
        (name = "bets", description = "Bet slip and betting API"),
        (name = "promotions", description = "Promotions API"),
        (name = "payments", description = "Deposits API"),
        (name = "contact", description = "Contact form API"),
        (name = "admin", description = "Back office API"),
    ),
    info(
        title = "BetTitan Backend API",
        version = "1.0.0",
        description = "BetTitan sportsbook REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
