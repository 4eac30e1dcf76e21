use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// 校验密码长度（6-100 字符）
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 6 || password.len() > 100 {
        return Err(AppError::ValidationError(
            "Password must be between 6 and 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// 对密码进行哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("demo123").is_ok());
        assert!(validate_password("123456").is_ok()); // 刚好6位
        assert!(validate_password("12345").is_err()); // 太短
        assert!(validate_password(&"a".repeat(100)).is_ok());
        assert!(validate_password(&"a".repeat(101)).is_err()); // 太长
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "demo123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }
}
