use crate::entities::{
    BetStatus, EventStatus, bet_entity as bets, bet_slip_item_entity as bet_slip_items,
    event_entity as events, sport_category_entity as sport_categories, team_entity as teams,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminEventQuery, CreateEventRequest, EventQuery, EventResponse, SportCategoryResponse,
    TeamResponse, UpcomingEventQuery, UpdateEventRequest,
};
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

/// 列表接口的时间窗口过滤，全部以 UTC 日界对齐。
/// `all`/空 表示不过滤；进行中的赛事开球时间在过去，
/// 只要落在窗口内（如今天开球的滚球）同样会被列出。
fn time_window(time: Option<&str>) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let Some(time) = time.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let start_of_today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let day = |n: u64| start_of_today + chrono::Duration::days(n as i64);

    match time {
        "all" => Ok(None),
        "today" => Ok(Some((start_of_today, day(1)))),
        "tomorrow" => Ok(Some((day(1), day(2)))),
        "week" => Ok(Some((start_of_today, day(7)))),
        other => Err(AppError::ValidationError(format!(
            "Unknown time filter: {}",
            other
        ))),
    }
}

/// 后台赛事状态过滤参数解析
fn parse_event_status(status: Option<&str>) -> AppResult<Option<EventStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some("upcoming") => Ok(Some(EventStatus::Upcoming)),
        Some("live") => Ok(Some(EventStatus::Live)),
        Some("completed") => Ok(Some(EventStatus::Completed)),
        Some(other) => Err(AppError::ValidationError(format!(
            "Unknown event status filter: {}",
            other
        ))),
    }
}

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
}

impl EventService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 全部体育分类
    pub async fn list_categories(&self) -> AppResult<Vec<SportCategoryResponse>> {
        let models = sport_categories::Entity::find()
            .order_by_asc(sport_categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// 球队参考列表（后台建赛事的下拉数据）
    pub async fn list_teams(&self) -> AppResult<Vec<TeamResponse>> {
        let models = teams::Entity::find()
            .order_by_asc(teams::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// 赛事列表：未完结的赛事，支持分类 slug、时间窗口与关键字过滤。
    /// 关键字匹配联赛名或任一球队名，不区分大小写。
    pub async fn list_events(&self, query: &EventQuery) -> AppResult<Vec<EventResponse>> {
        let mut find = events::Entity::find()
            .filter(events::Column::Status.ne(EventStatus::Completed))
            .order_by_asc(events::Column::StartTime);

        if let Some(slug) = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "all")
        {
            let category = sport_categories::Entity::find()
                .filter(sport_categories::Column::Slug.eq(slug))
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Sport category not found".to_string()))?;
            find = find.filter(events::Column::CategoryId.eq(category.id));
        }

        if let Some((from, to)) = time_window(query.time.as_deref())? {
            find = find
                .filter(events::Column::StartTime.gte(from))
                .filter(events::Column::StartTime.lt(to));
        }

        let models = find.all(&self.pool).await?;
        let mut responses = self.hydrate(models).await?;

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = search.to_lowercase();
            responses.retain(|e| {
                e.league.to_lowercase().contains(&needle)
                    || e.home_team.name.to_lowercase().contains(&needle)
                    || e.away_team.name.to_lowercase().contains(&needle)
            });
        }

        Ok(responses)
    }

    /// 进行中的赛事
    pub async fn live_events(&self) -> AppResult<Vec<EventResponse>> {
        let models = events::Entity::find()
            .filter(events::Column::Status.eq(EventStatus::Live))
            .order_by_asc(events::Column::StartTime)
            .all(&self.pool)
            .await?;
        self.hydrate(models).await
    }

    /// 未开始的赛事，按开球时间从近到远
    pub async fn upcoming_events(&self, query: &UpcomingEventQuery) -> AppResult<Vec<EventResponse>> {
        let mut find = events::Entity::find()
            .filter(events::Column::Status.eq(EventStatus::Upcoming))
            .order_by_asc(events::Column::StartTime);

        if let Some((from, to)) = time_window(query.time.as_deref())? {
            find = find
                .filter(events::Column::StartTime.gte(from))
                .filter(events::Column::StartTime.lt(to));
        }

        let models = find.all(&self.pool).await?;
        self.hydrate(models).await
    }

    /// 单场赛事详情
    pub async fn get_event(&self, event_id: i64) -> AppResult<EventResponse> {
        let event = events::Entity::find_by_id(event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let mut hydrated = self.hydrate(vec![event]).await?;
        hydrated
            .pop()
            .ok_or_else(|| AppError::InternalError("Event hydration failed".to_string()))
    }

    // ==================== 管理后台 ====================

    /// 后台赛事列表，完结赛事也会列出
    pub async fn admin_list_events(&self, query: &AdminEventQuery) -> AppResult<Vec<EventResponse>> {
        let mut find = events::Entity::find().order_by_desc(events::Column::StartTime);

        if let Some(status) = parse_event_status(query.status.as_deref())? {
            find = find.filter(events::Column::Status.eq(status));
        }

        let models = find.all(&self.pool).await?;
        self.hydrate(models).await
    }

    /// 创建赛事。is_live 决定初始状态；滚球缺省比分记 0:0
    pub async fn create_event(&self, request: CreateEventRequest) -> AppResult<EventResponse> {
        let league = request.league.trim();
        if league.is_empty() {
            return Err(AppError::ValidationError(
                "League name is required".to_string(),
            ));
        }

        self.validate_odds(request.home_odds, request.draw_odds, request.away_odds)?;
        self.check_category_exists(request.category_id).await?;
        self.check_teams(request.home_team_id, request.away_team_id)
            .await?;

        let is_live = request.is_live.unwrap_or(false);
        let status = if is_live {
            EventStatus::Live
        } else {
            EventStatus::Upcoming
        };

        // 只有滚球才记录比分和比赛时间
        let (home_score, away_score, minute) = if is_live {
            (
                Some(request.home_score.unwrap_or(0)),
                Some(request.away_score.unwrap_or(0)),
                Some(request.minute.unwrap_or(0)),
            )
        } else {
            (None, None, None)
        };

        let event = events::ActiveModel {
            league: Set(league.to_string()),
            category_id: Set(request.category_id),
            home_team_id: Set(request.home_team_id),
            away_team_id: Set(request.away_team_id),
            start_time: Set(request.start_time),
            status: Set(status),
            home_score: Set(home_score),
            away_score: Set(away_score),
            minute: Set(minute),
            home_odds: Set(request.home_odds),
            draw_odds: Set(request.draw_odds),
            away_odds: Set(request.away_odds),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Event created: {} (id={})", event.league, event.id);

        let mut hydrated = self.hydrate(vec![event]).await?;
        hydrated
            .pop()
            .ok_or_else(|| AppError::InternalError("Event hydration failed".to_string()))
    }

    /// 更新赛事；status 与 is_live 同时给出时以 status 为准。
    /// 切回 upcoming 会清空比分与比赛时间。
    pub async fn update_event(
        &self,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> AppResult<EventResponse> {
        let event = events::Entity::find_by_id(event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let mut active = event.clone().into_active_model();

        if let Some(league) = request.league.as_deref() {
            let league = league.trim();
            if league.is_empty() {
                return Err(AppError::ValidationError(
                    "League name is required".to_string(),
                ));
            }
            active.league = Set(league.to_string());
        }

        if let Some(category_id) = request.category_id {
            self.check_category_exists(category_id).await?;
            active.category_id = Set(category_id);
        }

        // 球队字段要结合未变更的一侧一起校验
        let home_team_id = request.home_team_id.unwrap_or(event.home_team_id);
        let away_team_id = request.away_team_id.unwrap_or(event.away_team_id);
        if request.home_team_id.is_some() || request.away_team_id.is_some() {
            self.check_teams(home_team_id, away_team_id).await?;
            active.home_team_id = Set(home_team_id);
            active.away_team_id = Set(away_team_id);
        }

        if let Some(start_time) = request.start_time {
            active.start_time = Set(start_time);
        }

        let home_odds = request.home_odds.unwrap_or(event.home_odds);
        let draw_odds = request.draw_odds.or(event.draw_odds);
        let away_odds = request.away_odds.unwrap_or(event.away_odds);
        if request.home_odds.is_some() || request.draw_odds.is_some() || request.away_odds.is_some()
        {
            self.validate_odds(home_odds, draw_odds, away_odds)?;
            active.home_odds = Set(home_odds);
            active.draw_odds = Set(draw_odds);
            active.away_odds = Set(away_odds);
        }

        let status = match (request.status.clone(), request.is_live) {
            (Some(status), _) => status,
            (None, Some(true)) => EventStatus::Live,
            (None, Some(false)) => EventStatus::Upcoming,
            (None, None) => event.status.clone(),
        };
        active.status = Set(status.clone());

        match status {
            EventStatus::Live => {
                active.home_score = Set(Some(
                    request.home_score.or(event.home_score).unwrap_or(0),
                ));
                active.away_score = Set(Some(
                    request.away_score.or(event.away_score).unwrap_or(0),
                ));
                active.minute = Set(Some(request.minute.or(event.minute).unwrap_or(0)));
            }
            EventStatus::Upcoming => {
                active.home_score = Set(None);
                active.away_score = Set(None);
                active.minute = Set(None);
            }
            EventStatus::Completed => {
                // 完结时保留终场比分，可以在同一请求里一并修正
                if let Some(home_score) = request.home_score {
                    active.home_score = Set(Some(home_score));
                }
                if let Some(away_score) = request.away_score {
                    active.away_score = Set(Some(away_score));
                }
            }
        }

        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&self.pool).await?;

        let mut hydrated = self.hydrate(vec![updated]).await?;
        hydrated
            .pop()
            .ok_or_else(|| AppError::InternalError("Event hydration failed".to_string()))
    }

    /// 删除赛事；存在未结算注单时拒绝。
    /// 引用该赛事的投注单条目一并清掉，已结算注单保留。
    pub async fn delete_event(&self, event_id: i64) -> AppResult<()> {
        let event = events::Entity::find_by_id(event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct CountRow {
            count: i64,
        }
        let pending = bets::Entity::find()
            .filter(bets::Column::EventId.eq(event_id))
            .filter(bets::Column::Status.eq(BetStatus::Pending))
            .select_only()
            .column_as(Expr::val(1).count(), "count")
            .into_model::<CountRow>()
            .one(&self.pool)
            .await?
            .map(|row| row.count)
            .unwrap_or(0);

        if pending > 0 {
            return Err(AppError::ValidationError(
                "Cannot delete an event with pending bets".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        bet_slip_items::Entity::delete_many()
            .filter(bet_slip_items::Column::EventId.eq(event_id))
            .exec(&txn)
            .await?;
        events::Entity::delete_by_id(event_id).exec(&txn).await?;

        txn.commit().await?;

        log::info!("Event deleted: {} (id={})", event.league, event.id);

        Ok(())
    }

    // ==================== 内部工具 ====================

    /// 批量补全赛事的分类与球队信息，避免每行一查
    async fn hydrate(&self, models: Vec<events::Model>) -> AppResult<Vec<EventResponse>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut category_ids: HashSet<i64> = HashSet::new();
        let mut team_ids: HashSet<i64> = HashSet::new();
        for event in &models {
            category_ids.insert(event.category_id);
            team_ids.insert(event.home_team_id);
            team_ids.insert(event.away_team_id);
        }

        let categories: HashMap<i64, sport_categories::Model> = sport_categories::Entity::find()
            .filter(sport_categories::Column::Id.is_in(category_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let team_map: HashMap<i64, teams::Model> = teams::Entity::find()
            .filter(teams::Column::Id.is_in(team_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let mut responses = Vec::with_capacity(models.len());
        for event in models {
            let category = categories.get(&event.category_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Missing sport category {} for event {}",
                    event.category_id, event.id
                ))
            })?;
            let home_team = team_map.get(&event.home_team_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Missing team {} for event {}",
                    event.home_team_id, event.id
                ))
            })?;
            let away_team = team_map.get(&event.away_team_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Missing team {} for event {}",
                    event.away_team_id, event.id
                ))
            })?;
            responses.push(EventResponse::from_parts(
                event,
                category.into(),
                home_team.into(),
                away_team.into(),
            ));
        }
        Ok(responses)
    }

    fn validate_odds(
        &self,
        home_odds: Decimal,
        draw_odds: Option<Decimal>,
        away_odds: Decimal,
    ) -> AppResult<()> {
        let min = Decimal::ONE;
        if home_odds < min || away_odds < min || draw_odds.is_some_and(|d| d < min) {
            return Err(AppError::ValidationError(
                "Odds must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }

    async fn check_category_exists(&self, category_id: i64) -> AppResult<()> {
        sport_categories::Entity::find_by_id(category_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::ValidationError("Sport category does not exist".to_string()))?;
        Ok(())
    }

    /// 主客队必须是两支存在的不同球队
    async fn check_teams(&self, home_team_id: i64, away_team_id: i64) -> AppResult<()> {
        if home_team_id == away_team_id {
            return Err(AppError::ValidationError(
                "Home and away team must be different".to_string(),
            ));
        }
        let found = teams::Entity::find()
            .filter(teams::Column::Id.is_in([home_team_id, away_team_id]))
            .all(&self.pool)
            .await?;
        if found.len() != 2 {
            return Err(AppError::ValidationError(
                "Home or away team does not exist".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_none_and_all() {
        assert!(time_window(None).unwrap().is_none());
        assert!(time_window(Some("all")).unwrap().is_none());
        assert!(time_window(Some("  ")).unwrap().is_none());
    }

    #[test]
    fn test_time_window_today() {
        let (from, to) = time_window(Some("today")).unwrap().unwrap();
        assert_eq!(to - from, chrono::Duration::days(1));
        assert!(from <= Utc::now() && Utc::now() < to);
    }

    #[test]
    fn test_time_window_tomorrow_follows_today() {
        let (_, today_end) = time_window(Some("today")).unwrap().unwrap();
        let (tomorrow_start, tomorrow_end) = time_window(Some("tomorrow")).unwrap().unwrap();
        assert_eq!(today_end, tomorrow_start);
        assert_eq!(tomorrow_end - tomorrow_start, chrono::Duration::days(1));
    }

    #[test]
    fn test_time_window_week_spans_seven_days() {
        let (from, to) = time_window(Some("week")).unwrap().unwrap();
        assert_eq!(to - from, chrono::Duration::days(7));
    }

    #[test]
    fn test_time_window_rejects_unknown() {
        assert!(time_window(Some("yesterday")).is_err());
    }

    #[test]
    fn test_parse_event_status() {
        assert_eq!(parse_event_status(None).unwrap(), None);
        assert_eq!(parse_event_status(Some("all")).unwrap(), None);
        assert_eq!(
            parse_event_status(Some("live")).unwrap(),
            Some(EventStatus::Live)
        );
        assert_eq!(
            parse_event_status(Some("completed")).unwrap(),
            Some(EventStatus::Completed)
        );
        assert!(parse_event_status(Some("paused")).is_err());
    }
}
