use rust_decimal::Decimal;

/// 串关总赔率：各条目赔率的精确乘积，空单为 1
pub fn parlay_odds<'a>(odds: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    odds.into_iter().fold(Decimal::ONE, |acc, o| acc * o)
}

/// 预期赔付 = 金额 × 下注时锁定的赔率，保留两位小数
pub fn potential_win(amount: Decimal, odds: Decimal) -> Decimal {
    (amount * odds).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parlay_odds_is_exact_product() {
        let odds = [dec!(1.90), dec!(2.10)];
        assert_eq!(parlay_odds(&odds), dec!(3.99));

        let odds = [dec!(2.10), dec!(3.25), dec!(4.50)];
        assert_eq!(parlay_odds(&odds), dec!(30.71250));
    }

    #[test]
    fn test_parlay_odds_empty_slip_is_one() {
        assert_eq!(parlay_odds(&[]), Decimal::ONE);
    }

    #[test]
    fn test_parlay_odds_single_item() {
        let odds = [dec!(1.85)];
        assert_eq!(parlay_odds(&odds), dec!(1.85));
    }

    #[test]
    fn test_potential_win_is_exact() {
        assert_eq!(potential_win(dec!(5), dec!(2.10)), dec!(10.50));
        assert_eq!(potential_win(dec!(100), dec!(1.90)), dec!(190.00));
    }

    #[test]
    fn test_potential_win_rounds_to_cents() {
        // 3.33 × 1.11 = 3.6963
        assert_eq!(potential_win(dec!(3.33), dec!(1.11)), dec!(3.70));
    }
}
