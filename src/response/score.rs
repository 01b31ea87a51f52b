/// Score used when no provider was available to judge.
pub const DEFAULT_SCORE_WITHOUT_PROVIDER: u8 = 50;
/// Score used when a provider replied but no score could be read.
pub const DEFAULT_SCORE_UNPARSABLE: u8 = 75;
pub const MAX_SCORE: u8 = 100;

const SCORE_LABEL_JA: &str = "スコア";
const SCORE_LABEL_EN: &str = "score";

/// True when the line carries a score label (`スコア`, or `score` in any case).
pub fn has_score_label(line: &str) -> bool {
    line.contains(SCORE_LABEL_JA) || line.to_lowercase().contains(SCORE_LABEL_EN)
}

/// Reads a score in `0..=100` out of a labeled line.
///
/// Every digit on the line is concatenated in order and the number is
/// clamped, so `スコア: -5` reads as 5 and `Score: 90/100` as 100. Returns
/// `None` when the line has no label or no digits.
pub fn extract_score(line: &str) -> Option<u8> {
    if !has_score_label(line) {
        return None;
    }
    let mut digits = line.chars().filter_map(digit_value).peekable();
    digits.peek()?;
    let value = digits.fold(0u64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u64::from(digit))
    });
    Some(value.min(u64::from(MAX_SCORE)) as u8)
}

fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => ch.to_digit(10),
        '０'..='９' => Some(ch as u32 - '０' as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_common_score_shapes() {
        assert_eq!(extract_score("スコア: 85"), Some(85));
        assert_eq!(extract_score("スコア：72"), Some(72));
        assert_eq!(extract_score("スコア 85点"), Some(85));
        assert_eq!(extract_score("SCORE = 0"), Some(0));
    }

    #[test]
    fn clamps_to_hundred() {
        assert_eq!(extract_score("Score 150"), Some(100));
        assert_eq!(extract_score("Score: 90/100"), Some(100));
        assert_eq!(extract_score("score 99999999999999999999999999"), Some(100));
    }

    #[test]
    fn sign_and_decimal_point_are_ignored() {
        assert_eq!(extract_score("スコア: -5"), Some(5));
        assert_eq!(extract_score("score: 8.5"), Some(85));
    }

    #[test]
    fn full_width_digits_count() {
        assert_eq!(extract_score("スコア：８０"), Some(80));
    }

    #[test]
    fn missing_label_or_digits_is_not_found() {
        assert_eq!(extract_score("85"), None);
        assert_eq!(extract_score("スコア: 高い"), None);
        assert_eq!(extract_score(""), None);
    }
}
