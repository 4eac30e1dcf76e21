use crate::entities::{BetStatus, BetType, bet_entity as bets, bet_slip_item_entity as slip_items};
use crate::utils::odds::potential_win;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddSlipItemRequest {
    pub event_id: i64,
    pub bet_type: BetType,
    /// 客户端当前看到的赔率；服务端以赛事实际赔率为准
    pub odds: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlipItemResponse {
    pub id: i64,
    pub event_id: i64,
    pub bet_type: BetType,
    pub odds: Decimal,
    /// 所选结果的展示名（球队名或 Empate）
    pub selection: String,
    /// 对阵标签，如 "Barcelona vs Real Madrid"
    pub match_name: String,
}

impl SlipItemResponse {
    pub fn from_parts(item: slip_items::Model, selection: String, match_name: String) -> Self {
        Self {
            id: item.id,
            event_id: item.event_id,
            bet_type: item.bet_type,
            odds: item.odds,
            selection,
            match_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BetSlipResponse {
    pub items: Vec<SlipItemResponse>,
    /// 串关总赔率 = 各条目赔率乘积，空单为 1
    pub total_odds: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceBetItem {
    /// 投注单条目 ID
    pub id: i64,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceBetsRequest {
    pub items: Vec<PlaceBetItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BetResponse {
    pub id: i64,
    pub event_id: i64,
    pub bet_type: BetType,
    pub selection: String,
    pub match_name: String,
    pub odds: Decimal,
    pub amount: Decimal,
    pub potential_win: Decimal,
    pub status: BetStatus,
    pub placed_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl BetResponse {
    pub fn from_parts(bet: bets::Model, selection: String, match_name: String) -> Self {
        Self {
            id: bet.id,
            event_id: bet.event_id,
            potential_win: potential_win(bet.amount, bet.odds),
            bet_type: bet.bet_type,
            odds: bet.odds,
            amount: bet.amount,
            selection,
            match_name,
            status: bet.status,
            placed_at: bet.placed_at.unwrap_or_else(Utc::now),
            settled_at: bet.settled_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceBetsResponse {
    pub bets: Vec<BetResponse>,
    pub balance: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BetHistoryQuery {
    /// all / pending / won / lost / canceled
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminBetQuery {
    pub status: Option<String>,
    /// 按用户名或对阵名搜索
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminBetResponse {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub match_name: String,
    pub selection: String,
    pub bet_type: BetType,
    pub odds: Decimal,
    pub amount: Decimal,
    pub potential_win: Decimal,
    pub status: BetStatus,
    pub placed_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettleBetRequest {
    /// won / lost / canceled
    pub status: BetStatus,
}
