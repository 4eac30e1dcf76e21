use crate::error::{AppError, AppResult};
use regex::Regex;

/// 校验用户名：3-20 位字母、数字或下划线
pub fn validate_username(username: &str) -> AppResult<()> {
    let username_regex = Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap();

    if !username_regex.is_match(username) {
        return Err(AppError::ValidationError(
            "Username must be 3-20 characters (letters, digits, underscore)".to_string(),
        ));
    }

    Ok(())
}

/// 校验邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }

    Ok(())
}

/// 校验 http(s) URL 格式
pub fn validate_url(url: &str) -> AppResult<()> {
    let url_regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();

    if !url_regex.is_match(url) {
        return Err(AppError::ValidationError(
            "Invalid URL, must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

/// 校验卡号：去掉空格后必须是16位数字
pub fn validate_card_number(card_number: &str) -> AppResult<()> {
    let digits: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    let card_regex = Regex::new(r"^\d{16}$").unwrap();

    if !card_regex.is_match(&digits) {
        return Err(AppError::ValidationError(
            "Card number must be 16 digits".to_string(),
        ));
    }

    Ok(())
}

/// 校验 CVV：3或4位数字
pub fn validate_cvv(cvv: &str) -> AppResult<()> {
    let cvv_regex = Regex::new(r"^\d{3,4}$").unwrap();

    if !cvv_regex.is_match(cvv) {
        return Err(AppError::ValidationError(
            "CVV must be 3 or 4 digits".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("demo").is_ok());
        assert!(validate_username("juan_88").is_ok());
        assert!(validate_username("ab").is_err()); // 太短
        assert!(validate_username(&"a".repeat(21)).is_err()); // 太长
        assert!(validate_username("juan pérez").is_err()); // 非法字符
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("juan@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("x@y").is_err()); // 缺少点
        assert!(validate_email("a b@c.com").is_err()); // 含空格
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://images.example.com/promo.jpg").is_ok());
        assert!(validate_url("http://cdn.example.com/a.png").is_ok());
        assert!(validate_url("ftp://example.com/x").is_err());
        assert!(validate_url("example.com/x").is_err());
        assert!(validate_url("https://bad url.com").is_err());
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4111111111111111").is_ok());
        assert!(validate_card_number("4111 1111 1111 1111").is_ok()); // 允许空格
        assert!(validate_card_number("411111111111111").is_err()); // 15位
        assert!(validate_card_number("4111-1111-1111-1111").is_err());
    }

    #[test]
    fn test_validate_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("12a").is_err());
    }
}
