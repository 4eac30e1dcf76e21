use crate::entities::{
    BetStatus, BetType, EventStatus, bet_entity as bets, bet_slip_item_entity as bet_slip_items,
    event_entity as events, team_entity as teams, user_entity as users,
    user_stat_entity as user_stats,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AddSlipItemRequest, AdminBetQuery, AdminBetResponse, BetHistoryQuery, BetResponse,
    BetSlipResponse, PaginatedResponse, PaginationParams, PlaceBetsRequest, PlaceBetsResponse,
    SettleBetRequest, SlipItemResponse,
};
use crate::utils::{parlay_odds, potential_win};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

/// 注单状态过滤参数解析；"all"/空 表示不过滤
fn parse_status_filter(status: Option<&str>) -> AppResult<Option<BetStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some("pending") => Ok(Some(BetStatus::Pending)),
        Some("won") => Ok(Some(BetStatus::Won)),
        Some("lost") => Ok(Some(BetStatus::Lost)),
        Some("canceled") => Ok(Some(BetStatus::Canceled)),
        Some(other) => Err(AppError::ValidationError(format!(
            "Unknown bet status filter: {}",
            other
        ))),
    }
}

/// 所选结果的展示名；赛事已删除时退化为通用叫法
fn selection_label(bet_type: &BetType, team_names: Option<(&str, &str)>) -> String {
    match (bet_type, team_names) {
        (BetType::Draw, _) => "Empate".to_string(),
        (BetType::Home, Some((home, _))) => home.to_string(),
        (BetType::Away, Some((_, away))) => away.to_string(),
        (BetType::Home, None) => "Local".to_string(),
        (BetType::Away, None) => "Visitante".to_string(),
    }
}

fn match_label(team_names: Option<(&str, &str)>) -> String {
    match team_names {
        Some((home, away)) => format!("{} vs {}", home, away),
        None => "Evento no disponible".to_string(),
    }
}

#[derive(Clone)]
pub struct BetService {
    pool: DatabaseConnection,
}

impl BetService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    // ==================== 投注单 ====================

    /// 加入投注单。赔率一律取赛事当前值，客户端传来的只用于发现错位；
    /// 同一赛事重复加入会覆盖旧选择。
    pub async fn add_slip_item(
        &self,
        user_id: i64,
        request: AddSlipItemRequest,
    ) -> AppResult<SlipItemResponse> {
        let event = events::Entity::find_by_id(request.event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.status == EventStatus::Completed {
            return Err(AppError::ValidationError(
                "Betting is closed for this event".to_string(),
            ));
        }

        let current_odds = match request.bet_type {
            BetType::Home => event.home_odds,
            BetType::Away => event.away_odds,
            BetType::Draw => event.draw_odds.ok_or_else(|| {
                AppError::ValidationError("This event has no draw market".to_string())
            })?,
        };

        if request.odds != current_odds {
            log::warn!(
                "Stale odds from client for event {}: sent {}, current {}",
                event.id,
                request.odds,
                current_odds
            );
        }

        let existing = bet_slip_items::Entity::find()
            .filter(bet_slip_items::Column::UserId.eq(user_id))
            .filter(bet_slip_items::Column::EventId.eq(request.event_id))
            .one(&self.pool)
            .await?;

        let item = match existing {
            Some(item) => {
                let mut active = item.into_active_model();
                active.bet_type = Set(request.bet_type.clone());
                active.odds = Set(current_odds);
                active.update(&self.pool).await?
            }
            None => {
                bet_slip_items::ActiveModel {
                    user_id: Set(user_id),
                    event_id: Set(request.event_id),
                    bet_type: Set(request.bet_type.clone()),
                    odds: Set(current_odds),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        let labels = self.event_labels([item.event_id]).await?;
        let team_names = labels
            .get(&item.event_id)
            .map(|(home, away)| (home.as_str(), away.as_str()));

        Ok(SlipItemResponse::from_parts(
            item,
            selection_label(&request.bet_type, team_names),
            match_label(team_names),
        ))
    }

    /// 当前投注单与串关总赔率
    pub async fn get_slip(&self, user_id: i64) -> AppResult<BetSlipResponse> {
        let items = bet_slip_items::Entity::find()
            .filter(bet_slip_items::Column::UserId.eq(user_id))
            .order_by_asc(bet_slip_items::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let total_odds = parlay_odds(items.iter().map(|i| &i.odds));
        let labels = self.event_labels(items.iter().map(|i| i.event_id)).await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            let team_names = labels
                .get(&item.event_id)
                .map(|(home, away)| (home.as_str(), away.as_str()));
            let selection = selection_label(&item.bet_type, team_names);
            let match_name = match_label(team_names);
            responses.push(SlipItemResponse::from_parts(item, selection, match_name));
        }

        Ok(BetSlipResponse {
            items: responses,
            total_odds,
        })
    }

    /// 移除投注单条目；条目不存在或不属于当前用户都按 404 处理
    pub async fn remove_slip_item(&self, user_id: i64, item_id: i64) -> AppResult<()> {
        let item = bet_slip_items::Entity::find_by_id(item_id)
            .filter(bet_slip_items::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Bet slip item not found".to_string()))?;

        item.delete(&self.pool).await?;
        Ok(())
    }

    // ==================== 下注与历史 ====================

    /// 下注流程：
    /// 1. 剔除金额非正的条目，全部无效则整体失败
    /// 2. 同一事务内复核条目归属，赔率用投注单里锁定的快照
    /// 3. 校验余额充足后一次性扣款，逐条生成待结算注单
    /// 4. 更新 pending_bets 统计并清掉已下注的条目
    /// 任何一步失败整体回滚，不存在部分成功。
    pub async fn place_bets(
        &self,
        user_id: i64,
        request: PlaceBetsRequest,
    ) -> AppResult<PlaceBetsResponse> {
        // 金额统一收敛到分；非正的条目直接剔除
        let stakes: Vec<(i64, Decimal)> = request
            .items
            .iter()
            .map(|item| (item.id, item.amount.round_dp(2)))
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect();

        if stakes.is_empty() {
            return Err(AppError::ValidationError(
                "No valid bet amounts provided".to_string(),
            ));
        }

        let unique_ids: HashSet<i64> = stakes.iter().map(|(id, _)| *id).collect();
        if unique_ids.len() != stakes.len() {
            return Err(AppError::ValidationError(
                "Duplicate bet slip items in request".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // 复核条目：必须存在且属于当前用户
        let mut slip_rows = Vec::with_capacity(stakes.len());
        let mut total_stake = Decimal::ZERO;
        for (item_id, amount) in &stakes {
            let item = bet_slip_items::Entity::find_by_id(*item_id)
                .filter(bet_slip_items::Column::UserId.eq(user_id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Bet slip item {} not found", item_id))
                })?;
            total_stake += *amount;
            slip_rows.push((item, *amount));
        }

        if total_stake > user.balance {
            return Err(AppError::ValidationError(
                "Insufficient balance".to_string(),
            ));
        }

        // 一次性扣除总注额
        let new_balance = user.balance - total_stake;
        let mut user_active = user.into_active_model();
        user_active.balance = Set(new_balance);
        user_active.update(&txn).await?;

        // 逐条生成注单，赔率沿用加入投注单时的快照
        let mut placed = Vec::with_capacity(slip_rows.len());
        for (item, amount) in &slip_rows {
            let bet = bets::ActiveModel {
                user_id: Set(user_id),
                event_id: Set(item.event_id),
                bet_type: Set(item.bet_type.clone()),
                odds: Set(item.odds),
                amount: Set(*amount),
                status: Set(BetStatus::Pending),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            placed.push(bet);
        }

        let stats = self.ensure_stats_tx(&txn, user_id).await?;
        let mut stats_active = stats.clone().into_active_model();
        stats_active.pending_bets = Set(stats.pending_bets + placed.len() as i32);
        stats_active.updated_at = Set(Some(Utc::now()));
        stats_active.update(&txn).await?;

        let placed_item_ids: Vec<i64> = slip_rows.iter().map(|(item, _)| item.id).collect();
        bet_slip_items::Entity::delete_many()
            .filter(bet_slip_items::Column::Id.is_in(placed_item_ids))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "User {} placed {} bet(s), total stake {}",
            user_id,
            placed.len(),
            total_stake
        );

        let responses = self.bet_responses(placed).await?;
        Ok(PlaceBetsResponse {
            bets: responses,
            balance: new_balance,
        })
    }

    /// 当前用户的注单历史，新的在前
    pub async fn bet_history(
        &self,
        user_id: i64,
        query: &BetHistoryQuery,
    ) -> AppResult<Vec<BetResponse>> {
        let mut find = bets::Entity::find()
            .filter(bets::Column::UserId.eq(user_id))
            .order_by_desc(bets::Column::PlacedAt);

        if let Some(status) = parse_status_filter(query.status.as_deref())? {
            find = find.filter(bets::Column::Status.eq(status));
        }

        let models = find.all(&self.pool).await?;
        self.bet_responses(models).await
    }

    // ==================== 管理后台 ====================

    /// 后台注单列表。搜索词匹配用户名或对阵名；
    /// 这两个都在关联表里，带搜索时取全量内存过滤后再分页。
    pub async fn admin_list_bets(
        &self,
        query: &AdminBetQuery,
    ) -> AppResult<PaginatedResponse<AdminBetResponse>> {
        let status = parse_status_filter(query.status.as_deref())?;
        let params = PaginationParams::new(query.page, query.per_page);
        let page = params.page.unwrap_or(1).max(1);
        let page_size = params.get_limit();

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        if let Some(needle) = search {
            let mut find = bets::Entity::find().order_by_desc(bets::Column::PlacedAt);
            if let Some(status) = &status {
                find = find.filter(bets::Column::Status.eq(status.clone()));
            }
            let rows = self.admin_bet_rows(find.all(&self.pool).await?).await?;
            let filtered: Vec<AdminBetResponse> = rows
                .into_iter()
                .filter(|row| {
                    row.username.to_lowercase().contains(&needle)
                        || row.match_name.to_lowercase().contains(&needle)
                })
                .collect();
            let total = filtered.len() as i64;
            let data: Vec<AdminBetResponse> = filtered
                .into_iter()
                .skip(params.get_offset() as usize)
                .take(page_size as usize)
                .collect();
            return Ok(PaginatedResponse::new(data, page, page_size, total));
        }

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct CountRow {
            count: i64,
        }
        let mut count_find = bets::Entity::find();
        if let Some(status) = &status {
            count_find = count_find.filter(bets::Column::Status.eq(status.clone()));
        }
        let total = count_find
            .select_only()
            .column_as(Expr::val(1).count(), "count")
            .into_model::<CountRow>()
            .one(&self.pool)
            .await?
            .map(|row| row.count)
            .unwrap_or(0);

        let mut find = bets::Entity::find().order_by_desc(bets::Column::PlacedAt);
        if let Some(status) = &status {
            find = find.filter(bets::Column::Status.eq(status.clone()));
        }
        let models = find
            .offset(params.get_offset() as u64)
            .limit(page_size as u64)
            .all(&self.pool)
            .await?;

        let data = self.admin_bet_rows(models).await?;
        Ok(PaginatedResponse::new(data, page, page_size, total))
    }

    /// 结算注单，只允许从 pending 出发：
    /// won 把 amount×odds 加回余额并累计净赢，lost 累计亏损，
    /// canceled 原额退款。状态、余额、统计在同一事务内落账。
    pub async fn settle_bet(
        &self,
        bet_id: i64,
        request: SettleBetRequest,
    ) -> AppResult<AdminBetResponse> {
        if request.status == BetStatus::Pending {
            return Err(AppError::ValidationError(
                "Settlement status must be won, lost or canceled".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let bet = bets::Entity::find_by_id(bet_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Bet not found".to_string()))?;

        if bet.status != BetStatus::Pending {
            return Err(AppError::ValidationError(format!(
                "Bet is already settled as {}",
                bet.status
            )));
        }

        let user = users::Entity::find_by_id(bet.user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let stats = self.ensure_stats_tx(&txn, bet.user_id).await?;
        let mut stats_active = stats.clone().into_active_model();

        let payout = potential_win(bet.amount, bet.odds);
        match request.status {
            BetStatus::Won => {
                let mut user_active = user.clone().into_active_model();
                user_active.balance = Set(user.balance + payout);
                user_active.update(&txn).await?;

                stats_active.total_won = Set(stats.total_won + (payout - bet.amount));
            }
            BetStatus::Lost => {
                stats_active.total_lost = Set(stats.total_lost + bet.amount);
            }
            BetStatus::Canceled => {
                let mut user_active = user.clone().into_active_model();
                user_active.balance = Set(user.balance + bet.amount);
                user_active.update(&txn).await?;
            }
            BetStatus::Pending => {}
        }

        stats_active.pending_bets = Set((stats.pending_bets - 1).max(0));
        stats_active.updated_at = Set(Some(Utc::now()));
        stats_active.update(&txn).await?;

        let mut bet_active = bet.into_active_model();
        bet_active.status = Set(request.status.clone());
        bet_active.settled_at = Set(Some(Utc::now()));
        let settled = bet_active.update(&txn).await?;

        txn.commit().await?;

        log::info!("Bet {} settled as {}", settled.id, settled.status);

        let mut rows = self.admin_bet_rows(vec![settled]).await?;
        rows.pop()
            .ok_or_else(|| AppError::InternalError("Bet hydration failed".to_string()))
    }

    // ==================== 内部工具 ====================

    /// event_id -> (主队名, 客队名)。已删除的赛事不在结果里
    async fn event_labels(
        &self,
        event_ids: impl IntoIterator<Item = i64>,
    ) -> AppResult<HashMap<i64, (String, String)>> {
        let ids: HashSet<i64> = event_ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let event_models = events::Entity::find()
            .filter(events::Column::Id.is_in(ids))
            .all(&self.pool)
            .await?;

        let mut team_ids: HashSet<i64> = HashSet::new();
        for event in &event_models {
            team_ids.insert(event.home_team_id);
            team_ids.insert(event.away_team_id);
        }
        let team_names: HashMap<i64, String> = teams::Entity::find()
            .filter(teams::Column::Id.is_in(team_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let mut labels = HashMap::with_capacity(event_models.len());
        for event in event_models {
            if let (Some(home), Some(away)) = (
                team_names.get(&event.home_team_id),
                team_names.get(&event.away_team_id),
            ) {
                labels.insert(event.id, (home.clone(), away.clone()));
            }
        }
        Ok(labels)
    }

    /// 注单批量转响应体；赛事被删的老注单用降级标签
    async fn bet_responses(&self, models: Vec<bets::Model>) -> AppResult<Vec<BetResponse>> {
        let labels = self.event_labels(models.iter().map(|b| b.event_id)).await?;
        let mut responses = Vec::with_capacity(models.len());
        for bet in models {
            let team_names = labels
                .get(&bet.event_id)
                .map(|(home, away)| (home.as_str(), away.as_str()));
            let selection = selection_label(&bet.bet_type, team_names);
            let match_name = match_label(team_names);
            responses.push(BetResponse::from_parts(bet, selection, match_name));
        }
        Ok(responses)
    }

    /// 后台行带用户名；用户已删时用占位名
    async fn admin_bet_rows(&self, models: Vec<bets::Model>) -> AppResult<Vec<AdminBetResponse>> {
        let labels = self.event_labels(models.iter().map(|b| b.event_id)).await?;

        let user_ids: HashSet<i64> = models.iter().map(|b| b.user_id).collect();
        let usernames: HashMap<i64, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(user_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect()
        };

        let mut rows = Vec::with_capacity(models.len());
        for bet in models {
            let team_names = labels
                .get(&bet.event_id)
                .map(|(home, away)| (home.as_str(), away.as_str()));
            rows.push(AdminBetResponse {
                id: bet.id,
                user_id: bet.user_id,
                username: usernames
                    .get(&bet.user_id)
                    .cloned()
                    .unwrap_or_else(|| "Usuario eliminado".to_string()),
                match_name: match_label(team_names),
                selection: selection_label(&bet.bet_type, team_names),
                potential_win: potential_win(bet.amount, bet.odds),
                bet_type: bet.bet_type,
                odds: bet.odds,
                amount: bet.amount,
                status: bet.status,
                placed_at: bet.placed_at.unwrap_or_else(Utc::now),
                settled_at: bet.settled_at,
            });
        }
        Ok(rows)
    }

    /// 统计行按需补建；老数据可能缺行
    async fn ensure_stats_tx(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> AppResult<user_stats::Model> {
        let existing = user_stats::Entity::find()
            .filter(user_stats::Column::UserId.eq(user_id))
            .one(txn)
            .await?;

        match existing {
            Some(stats) => Ok(stats),
            None => {
                let stats = user_stats::ActiveModel {
                    user_id: Set(user_id),
                    pending_bets: Set(0),
                    total_won: Set(Decimal::ZERO),
                    total_lost: Set(Decimal::ZERO),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
                Ok(stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_status_filter(Some("")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("pending")).unwrap(),
            Some(BetStatus::Pending)
        );
        assert_eq!(
            parse_status_filter(Some("won")).unwrap(),
            Some(BetStatus::Won)
        );
        assert_eq!(
            parse_status_filter(Some("canceled")).unwrap(),
            Some(BetStatus::Canceled)
        );
        assert!(parse_status_filter(Some("void")).is_err());
    }

    #[test]
    fn test_selection_label_uses_team_names() {
        let names = Some(("Barcelona", "Real Madrid"));
        assert_eq!(selection_label(&BetType::Home, names), "Barcelona");
        assert_eq!(selection_label(&BetType::Away, names), "Real Madrid");
        assert_eq!(selection_label(&BetType::Draw, names), "Empate");
    }

    #[test]
    fn test_selection_label_fallback_without_event() {
        assert_eq!(selection_label(&BetType::Home, None), "Local");
        assert_eq!(selection_label(&BetType::Away, None), "Visitante");
        assert_eq!(selection_label(&BetType::Draw, None), "Empate");
    }

    #[test]
    fn test_match_label() {
        assert_eq!(
            match_label(Some(("Lakers", "Celtics"))),
            "Lakers vs Celtics"
        );
        assert_eq!(match_label(None), "Evento no disponible");
    }
}
