//! Priority normalization, applied identically to the configured threshold
//! and to each violation's `priority` attribute.

/// Least severe priority; also the fallback for absent or non-numeric values.
pub const DEFAULT_PRIORITY: u8 = 5;

/// Most severe priority.
pub const MIN_PRIORITY: u8 = 1;

/// Normalize a raw priority value into [1, 5]. Absent or non-numeric values
/// default to 5; numeric values clamp into bounds.
pub fn normalize(raw: Option<&str>) -> u8 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) => clamp(n),
        None => DEFAULT_PRIORITY,
    }
}

/// Clamp an already-numeric priority into [1, 5].
pub fn clamp(n: i64) -> u8 {
    n.clamp(MIN_PRIORITY as i64, DEFAULT_PRIORITY as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_in_range() {
        assert_eq!(normalize(Some("3")), 3);
        assert_eq!(normalize(Some("1")), 1);
        assert_eq!(normalize(Some("5")), 5);
    }

    #[test]
    fn test_normalize_clamps_low() {
        assert_eq!(normalize(Some("0")), 1);
        assert_eq!(normalize(Some("-7")), 1);
    }

    #[test]
    fn test_normalize_clamps_high() {
        assert_eq!(normalize(Some("9")), 5);
        assert_eq!(normalize(Some("100")), 5);
    }

    #[test]
    fn test_normalize_non_numeric_defaults() {
        assert_eq!(normalize(Some("abc")), 5);
        assert_eq!(normalize(Some("")), 5);
        assert_eq!(normalize(None), 5);
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize(Some(" 2 ")), 2);
    }
}
