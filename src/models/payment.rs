use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 模拟充值请求；只做卡面校验，不会调用任何支付网关
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepositRequest {
    #[schema(example = 50.0)]
    pub amount: Decimal,
    #[schema(example = "4111111111111111")]
    pub card_number: String,
    #[schema(example = "JUAN PEREZ")]
    pub card_name: String,
    #[schema(example = 12)]
    pub expiry_month: u32,
    /// 支持两位（26）或四位（2026）年份
    #[schema(example = 2027)]
    pub expiry_year: u32,
    #[schema(example = "123")]
    pub cvv: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepositResponse {
    pub reference: String,
    pub amount: Decimal,
    pub balance: Decimal,
}
