pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Parses a navigation page parameter: a positive integer, otherwise 1.
pub(crate) fn parse_page_param(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Character count, not byte length, for form limits.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
