//! Normalization of free-text route fields.
//!
//! Stop tables list served routes as loosely formatted text such as
//! `"CityLink Blue, 22 ,26"`; route tables carry numbers with assorted
//! `CityLink` prefixes. Both are reduced to the same uppercase tokens so
//! routes can be matched against stops.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Z0-9, ]").unwrap());
static CITYLINK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CITYLINK\s+(\w+)").unwrap());
static COMMA_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());
static CITYLINK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CITYLINK[\s\-]*").unwrap());

/// Clean a stop's `routes_served` cell into comma-joined route tokens
pub fn clean_routes_served(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let kept = DISALLOWED.replace_all(&upper, "");
    let renamed = CITYLINK_NAME.replace_all(&kept, "$1");
    let joined = COMMA_SPACING.replace_all(&renamed, ",");
    joined.trim_matches(',').to_string()
}

/// Normalize a route's `route_number` cell to its bare token
pub fn normalize_route_number(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    CITYLINK_PREFIX.replace_all(&upper, "").trim().to_string()
}
