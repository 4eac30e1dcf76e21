use crate::entities::{
    EventStatus, event_entity as events, sport_category_entity as sport_categories,
    team_entity as teams,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportCategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

impl From<sport_categories::Model> for SportCategoryResponse {
    fn from(m: sport_categories::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            icon: m.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub category_id: i64,
}

impl From<teams::Model> for TeamResponse {
    fn from(m: teams::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            logo: m.logo,
            category_id: m.category_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub league: String,
    pub category: SportCategoryResponse,
    pub home_team: TeamResponse,
    pub away_team: TeamResponse,
    pub start_time: DateTime<Utc>,
    pub status: EventStatus,
    pub is_live: bool,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub minute: Option<i32>,
    pub home_odds: Decimal,
    pub draw_odds: Option<Decimal>,
    pub away_odds: Decimal,
}

impl EventResponse {
    pub fn from_parts(
        event: events::Model,
        category: SportCategoryResponse,
        home_team: TeamResponse,
        away_team: TeamResponse,
    ) -> Self {
        let is_live = event.status == EventStatus::Live;
        Self {
            id: event.id,
            league: event.league,
            category,
            home_team,
            away_team,
            start_time: event.start_time,
            status: event.status,
            is_live,
            home_score: event.home_score,
            away_score: event.away_score,
            minute: event.minute,
            home_odds: event.home_odds,
            draw_odds: event.draw_odds,
            away_odds: event.away_odds,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventQuery {
    /// 分类 slug，如 football / basketball
    pub category: Option<String>,
    /// 时间窗口：all / today / tomorrow / week
    pub time: Option<String>,
    /// 对联赛与球队名的模糊搜索
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpcomingEventQuery {
    pub time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminEventQuery {
    /// all / live / upcoming / completed
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    #[schema(example = "La Liga")]
    pub league: String,
    pub category_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub start_time: DateTime<Utc>,
    pub home_odds: Decimal,
    pub draw_odds: Option<Decimal>,
    pub away_odds: Decimal,
    pub is_live: Option<bool>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub minute: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub league: Option<String>,
    pub category_id: Option<i64>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub home_odds: Option<Decimal>,
    pub draw_odds: Option<Decimal>,
    pub away_odds: Option<Decimal>,
    /// 与 status 同时给出时以 status 为准
    pub is_live: Option<bool>,
    pub status: Option<EventStatus>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub minute: Option<i32>,
}
