use serde::{Deserialize, Serialize};

/// One scoring period: an ordered slice of the season with its matchups.
/// A period with no matchups has not been played yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    pub number: u32,
    pub name: String,
    // Free-text range as the provider renders it, e.g.
    // "(Mon Jun 16, 2025 - Sun Jun 22, 2025)".
    pub date_range: String,
    pub matchups: Vec<Matchup>,
}

impl Period {
    /// A period counts as scored once its first matchup has any decided
    /// categories. Future periods carry matchups with all-zero records.
    pub fn is_scored(&self) -> bool {
        self.matchups
            .first()
            .is_some_and(|m| m.away.decided_categories() > 0)
    }

    pub fn category_names(&self) -> Vec<String> {
        let Some(m) = self.matchups.first() else {
            return Vec::new();
        };
        m.away.categories.iter().map(|c| c.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub away: MatchupSide,
    pub home: MatchupSide,
}

impl Matchup {
    /// Both sides paired with their opponent, away first.
    pub fn sides(&self) -> [(&MatchupSide, &MatchupSide); 2] {
        [(&self.away, &self.home), (&self.home, &self.away)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupSide {
    pub team_id: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub categories: Vec<CategoryValue>,
}

impl MatchupSide {
    pub fn decided_categories(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Category margin with ties worth half a win. Drives blowout ranking.
    pub fn net_score(&self) -> f64 {
        f64::from(self.wins) - f64::from(self.losses) + 0.5 * f64::from(self.ties)
    }

    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// One category cell for one side of a matchup. The value stays provider
/// text; conversion is attempted where a metric needs a number and a failed
/// parse drops that single value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: String,
}

impl CategoryValue {
    pub fn numeric(&self) -> Option<f64> {
        parse_number(&self.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub rank: u32,
    pub team_id: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: String,
    pub games_back: String,
}

impl StandingsRow {
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Flat transaction record from the provider's history table. Only the
/// fields the volume metric needs survive parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub team_name: String,
    pub date: String,
    pub added: bool,
}

/// Won-lost-tied accumulator for all-play simulation and streak bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl AggregateRecord {
    pub fn add(&mut self, wins: u32, losses: u32, ties: u32) {
        self.wins += wins;
        self.losses += losses;
        self.ties += ties;
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn win_pct(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.total().max(1))
    }

    pub fn display(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Lenient numeric parse for provider-controlled text. Strips grouping
/// commas and decorations; "-" and empty cells are absent values.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
