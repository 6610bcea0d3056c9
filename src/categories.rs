use std::collections::HashSet;

/// Category name used for the empty-pitching-lineup rule.
pub const INNINGS_PITCHED: &str = "Innings Pitched";

/// Season-wide classification of scoring categories. Injected into every
/// computation so alternate scoring schemes can be substituted in tests
/// instead of living as a module-level constant.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    lower_is_better: HashSet<String>,
}

impl CategoryTable {
    pub fn new<I, S>(lower_is_better: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lower_is_better: lower_is_better.into_iter().map(Into::into).collect(),
        }
    }

    /// The stock H2H baseball scheme: rate/allowed pitching categories and
    /// pitcher losses count down, everything else counts up.
    pub fn baseball_h2h() -> Self {
        Self::new([
            "Earned Run Average",
            "WHIP Ratio",
            "Walks Allowed Per Nine Innings",
            "Losses",
            "Home Runs Allowed",
        ])
    }

    pub fn lower_is_better(&self, category: &str) -> bool {
        self.lower_is_better.contains(category)
    }

    /// Directional transform: flips lower-is-better values so that greater
    /// always means better for comparisons.
    pub fn oriented(&self, category: &str, value: f64) -> f64 {
        if self.lower_is_better(category) { -value } else { value }
    }

    pub fn lower_is_better_names(&self) -> impl Iterator<Item = &str> {
        self.lower_is_better.iter().map(String::as_str)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::baseball_h2h()
    }
}
