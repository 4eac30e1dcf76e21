use crate::entities::{deposit_entity as deposits, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{DepositRequest, DepositResponse};
use crate::utils::{generate_unique_deposit_reference, validate_card_number, validate_cvv};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};

/// 卡片有效期校验；两位年份按 20xx 解释
fn check_card_expiry(expiry_month: u32, expiry_year: u32) -> AppResult<()> {
    if !(1..=12).contains(&expiry_month) {
        return Err(AppError::ValidationError(
            "Invalid expiry month".to_string(),
        ));
    }

    let year = if expiry_year < 100 {
        expiry_year + 2000
    } else {
        expiry_year
    };

    let now = Utc::now();
    let current_year = now.year() as u32;
    let current_month = now.month();
    if year < current_year || (year == current_year && expiry_month < current_month) {
        return Err(AppError::ValidationError("Card is expired".to_string()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PaymentService {
    pool: DatabaseConnection,
}

impl PaymentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 模拟充值：校验卡面信息后直接入账，不接真实支付通道。
    /// 只留卡号后四位，完整卡号不落库。
    pub async fn deposit(&self, user_id: i64, request: DepositRequest) -> AppResult<DepositResponse> {
        let amount = request.amount.round_dp(2);
        if amount < Decimal::from(5) || amount > Decimal::from(10_000) {
            return Err(AppError::ValidationError(
                "Deposit amount must be between 5 and 10000".to_string(),
            ));
        }

        validate_card_number(&request.card_number)?;
        validate_cvv(&request.cvv)?;
        if request.card_name.trim().len() < 3 {
            return Err(AppError::ValidationError(
                "Cardholder name is too short".to_string(),
            ));
        }
        check_card_expiry(request.expiry_month, request.expiry_year)?;

        let digits: String = request
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let card_last4 = digits[digits.len() - 4..].to_string();

        let reference = generate_unique_deposit_reference(&self.pool).await?;

        let txn = self.pool.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let new_balance = user.balance + amount;
        let mut user_active = user.into_active_model();
        user_active.balance = Set(new_balance);
        user_active.update(&txn).await?;

        deposits::ActiveModel {
            user_id: Set(user_id),
            amount: Set(amount),
            card_last4: Set(card_last4),
            reference: Set(reference.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Deposit {} completed for user {}: amount {}",
            reference,
            user_id,
            amount
        );

        Ok(DepositResponse {
            reference,
            amount,
            balance: new_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_rejects_bad_month() {
        assert!(check_card_expiry(0, 2030).is_err());
        assert!(check_card_expiry(13, 2030).is_err());
    }

    #[test]
    fn test_expiry_accepts_future_dates() {
        let next_year = Utc::now().year() as u32 + 1;
        assert!(check_card_expiry(1, next_year).is_ok());
        // 两位年份
        assert!(check_card_expiry(12, (next_year - 2000).min(99)).is_ok());
    }

    #[test]
    fn test_expiry_rejects_past_year() {
        assert!(check_card_expiry(12, 2020).is_err());
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        let now = Utc::now();
        assert!(check_card_expiry(now.month(), now.year() as u32).is_ok());
    }
}
