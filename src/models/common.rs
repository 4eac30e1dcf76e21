use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 错误响应体，与 `AppError::error_response` 输出的 error 字段对应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
