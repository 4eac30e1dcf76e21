use crate::entities::{user_entity as users, user_stat_entity as user_stats};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use crate::utils::{
    JwtService, hash_password, validate_password, validate_username, verify_password,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 注册新用户，成功后直接返回登录态（令牌对）
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        // 验证输入
        validate_username(&request.username)?;
        validate_password(&request.password)?;

        // 用户名唯一
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Username is already taken".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        // 用户与统计行一起建
        let txn = self.pool.begin().await?;

        let user = users::ActiveModel {
            username: Set(request.username.clone()),
            password_hash: Set(password_hash),
            is_admin: Set(false),
            balance: Set(Decimal::ZERO),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        user_stats::ActiveModel {
            user_id: Set(user.id),
            pending_bets: Set(0),
            total_won: Set(Decimal::ZERO),
            total_lost: Set(Decimal::ZERO),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!("New user registered: {} (id={})", user.username, user.id);

        self.build_auth_response(user)
    }

    /// 用户名密码登录
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        // 记录最近登录时间
        let mut active = user.into_active_model();
        active.last_login = Set(Some(Utc::now()));
        let user = active.update(&self.pool).await?;

        log::info!("User logged in: {} (id={})", user.username, user.id);

        self.build_auth_response(user)
    }

    /// 用刷新令牌换发新的令牌对；用户状态以数据库为准
    pub async fn refresh_token(&self, request: RefreshTokenRequest) -> AppResult<AuthResponse> {
        let claims = self
            .jwt_service
            .verify_refresh_token(&request.refresh_token)
            .map_err(|_| AppError::AuthError("Invalid refresh token".to_string()))?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid refresh token".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.build_auth_response(user)
    }

    fn build_auth_response(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token =
            self.jwt_service
                .generate_access_token(user.id, &user.username, user.is_admin)?;
        let refresh_token =
            self.jwt_service
                .generate_refresh_token(user.id, &user.username, user.is_admin)?;
        let expires_in = self.jwt_service.get_access_token_expires_in();

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in,
        })
    }
}
