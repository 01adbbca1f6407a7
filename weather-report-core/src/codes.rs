//! Translation of WMO weather codes into short descriptions.

use std::{collections::HashMap, sync::LazyLock};

/// Returned for any code that is not in the table, and for a missing code.
pub const FALLBACK_DESCRIPTION: &str = "unknown conditions";

static DESCRIPTIONS: LazyLock<HashMap<i64, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (0, "clear sky"),
        (1, "mostly clear"),
        (2, "partly cloudy"),
        (3, "overcast"),
        (45, "fog"),
        (48, "freezing fog"),
        (51, "light drizzle"),
        (53, "moderate drizzle"),
        (55, "heavy drizzle"),
        (61, "light rain"),
        (63, "moderate rain"),
        (65, "heavy rain"),
        (71, "light snow"),
        (73, "moderate snow"),
        (75, "heavy snow"),
        (80, "light showers"),
        (81, "moderate showers"),
        (82, "heavy showers"),
    ])
});

/// Describe a weather code, falling back to [`FALLBACK_DESCRIPTION`].
pub fn describe(code: Option<i64>) -> &'static str {
    code.and_then(|c| DESCRIPTIONS.get(&c).copied()).unwrap_or(FALLBACK_DESCRIPTION)
}
