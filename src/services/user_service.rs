use crate::entities::{
    bet_slip_item_entity as bet_slip_items, user_entity as users, user_stat_entity as user_stats,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminCreateUserRequest, AdminUpdateUserRequest, AdminUserQuery, UserResponse,
    UserStatsResponse,
};
use crate::utils::{hash_password, validate_password, validate_username};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 当前用户资料
    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// 余额与输赢统计；统计行缺失时按零值返回
    pub async fn get_user_stats(&self, user_id: i64) -> AppResult<UserStatsResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let stats = user_stats::Entity::find()
            .filter(user_stats::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?;

        Ok(UserStatsResponse {
            balance: user.balance,
            pending_bets: stats.as_ref().map(|s| s.pending_bets).unwrap_or(0),
            total_won: stats
                .as_ref()
                .map(|s| s.total_won)
                .unwrap_or(Decimal::ZERO),
            total_lost: stats.map(|s| s.total_lost).unwrap_or(Decimal::ZERO),
        })
    }

    // ==================== 管理后台 ====================

    /// 用户列表；search 对用户名做不区分大小写的模糊匹配
    pub async fn admin_list_users(&self, query: &AdminUserQuery) -> AppResult<Vec<UserResponse>> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let filtered: Vec<users::Model> = match query.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                let needle = search.to_lowercase();
                models
                    .into_iter()
                    .filter(|u| u.username.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => models,
        };

        Ok(filtered.into_iter().map(UserResponse::from).collect())
    }

    /// 管理员创建用户，可直接指定初始余额与管理员标记
    pub async fn admin_create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> AppResult<UserResponse> {
        validate_username(&request.username)?;
        validate_password(&request.password)?;

        let balance = request.balance.unwrap_or(Decimal::ZERO);
        if balance < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Balance must not be negative".to_string(),
            ));
        }

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

        let txn = self.pool.begin().await?;

        let user = users::ActiveModel {
            username: Set(request.username.clone()),
            password_hash: Set(password_hash),
            is_admin: Set(request.is_admin.unwrap_or(false)),
            balance: Set(balance),
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

        log::info!("Admin created user: {} (id={})", user.username, user.id);

        Ok(user.into())
    }

    /// 管理员更新用户；密码留空或省略则保持原密码
    pub async fn admin_update_user(
        &self,
        user_id: i64,
        request: AdminUpdateUserRequest,
    ) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut active = user.clone().into_active_model();

        if let Some(username) = request.username.as_deref()
            && username != user.username
        {
            validate_username(username)?;
            let taken = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .filter(users::Column::Id.ne(user_id))
                .one(&self.pool)
                .await?;
            if taken.is_some() {
                return Err(AppError::ValidationError(
                    "Username is already taken".to_string(),
                ));
            }
            active.username = Set(username.to_string());
        }

        if let Some(password) = request.password.as_deref()
            && !password.is_empty()
        {
            validate_password(password)?;
            active.password_hash = Set(hash_password(password)?);
        }

        if let Some(is_admin) = request.is_admin {
            active.is_admin = Set(is_admin);
        }

        if let Some(balance) = request.balance {
            if balance < Decimal::ZERO {
                return Err(AppError::ValidationError(
                    "Balance must not be negative".to_string(),
                ));
            }
            active.balance = Set(balance);
        }

        // 没有任何字段变化时不发更新语句
        if !active.is_changed() {
            return Ok(user.into());
        }

        let updated = active.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 删除用户；不允许删除当前登录账号。
    /// 连带清理统计行与投注单，注单和充值记录保留作为流水。
    pub async fn admin_delete_user(&self, user_id: i64, acting_user_id: i64) -> AppResult<()> {
        if user_id == acting_user_id {
            return Err(AppError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let txn = self.pool.begin().await?;

        bet_slip_items::Entity::delete_many()
            .filter(bet_slip_items::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        user_stats::Entity::delete_many()
            .filter(user_stats::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        users::Entity::delete_by_id(user_id).exec(&txn).await?;

        txn.commit().await?;

        log::info!("User deleted: {} (id={})", user.username, user.id);

        Ok(())
    }
}
