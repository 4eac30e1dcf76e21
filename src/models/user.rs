use crate::entities::user_entity as users;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "juan88")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "demo")]
    pub username: String,
    #[schema(example = "demo123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
            balance: user.balance,
            created_at: user.created_at.unwrap_or_else(Utc::now),
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// 账户页顶部的余额与投注统计
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStatsResponse {
    pub balance: Decimal,
    pub pending_bets: i32,
    pub total_won: Decimal,
    pub total_lost: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminCreateUserRequest {
    #[schema(example = "maria")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
    pub is_admin: Option<bool>,
    pub balance: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub username: Option<String>,
    /// 留空或省略则保持原密码
    pub password: Option<String>,
    pub is_admin: Option<bool>,
    pub balance: Option<Decimal>,
}
