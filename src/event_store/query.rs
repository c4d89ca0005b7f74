//! List query normalization

use super::store::DEFAULT_LIST_LIMIT;

/// Parse a caller-supplied `limit`
///
/// Missing, non-numeric, zero or negative values fall back to
/// `DEFAULT_LIST_LIMIT`. There is no upper bound.
pub fn normalize_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_LIST_LIMIT)
}

/// Treat an empty tenant filter as no filter
pub fn normalize_tenant(raw: Option<&str>) -> Option<&str> {
    raw.filter(|t| !t.is_empty())
}
