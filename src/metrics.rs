use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::all_play::all_play_records;
use crate::categories::CategoryTable;
use crate::model::{Period, StandingsRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlowoutSide {
    pub team: String,
    pub record: String,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blowout {
    pub winner: BlowoutSide,
    pub loser: BlowoutSide,
}

/// Biggest winner and loser of the period by category margin
/// (wins - losses + 0.5 * ties). Ties keep the first side encountered.
pub fn biggest_blowout(period: &Period) -> Option<Blowout> {
    let mut winner: Option<BlowoutSide> = None;
    let mut loser: Option<BlowoutSide> = None;
    for matchup in &period.matchups {
        for (side, _) in matchup.sides() {
            let net = side.net_score();
            if winner.as_ref().is_none_or(|w| net > w.net) {
                winner = Some(BlowoutSide {
                    team: side.team_name.clone(),
                    record: side.record(),
                    net,
                });
            }
            if loser.as_ref().is_none_or(|l| net < l.net) {
                loser = Some(BlowoutSide {
                    team: side.team_name.clone(),
                    record: side.record(),
                    net,
                });
            }
        }
    }
    Some(Blowout {
        winner: winner?,
        loser: loser?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DominantPerformance {
    pub team: String,
    pub opponent: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Side with the single highest raw category-win count in the period.
/// Empty when no side won a category at all.
pub fn dominant_performance(period: &Period) -> Option<DominantPerformance> {
    let mut best: Option<DominantPerformance> = None;
    for matchup in &period.matchups {
        for (side, opponent) in matchup.sides() {
            let current = best.as_ref().map_or(0, |b| b.wins);
            if side.wins > current {
                best = Some(DominantPerformance {
                    team: side.team_name.clone(),
                    opponent: opponent.team_name.clone(),
                    wins: side.wins,
                    losses: side.losses,
                    ties: side.ties,
                });
            }
        }
    }
    best
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLeader {
    pub category: String,
    pub team: String,
    pub value: f64,
}

/// Best value per category across every side of the period, respecting the
/// direction table. Non-numeric values are skipped per value; a category
/// with no numeric values yields no leader. Output follows the period's
/// category order.
pub fn category_leaders(period: &Period, table: &CategoryTable) -> Vec<CategoryLeader> {
    let mut leaders = Vec::new();
    for category in period.category_names() {
        let mut best: Option<(String, f64)> = None;
        for matchup in &period.matchups {
            for (side, _) in matchup.sides() {
                let Some(cat) = side.categories.iter().find(|c| c.name == category) else {
                    continue;
                };
                let Some(value) = cat.numeric() else {
                    continue;
                };
                let better = match &best {
                    None => true,
                    Some((_, current)) => {
                        table.oriented(&category, value) > table.oriented(&category, *current)
                    }
                };
                if better {
                    best = Some((side.team_name.clone(), value));
                }
            }
        }
        if let Some((team, value)) = best {
            leaders.push(CategoryLeader {
                category,
                team,
                value,
            });
        }
    }
    leaders
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweep {
    pub team: String,
    pub opponent: String,
    pub wins: u32,
    pub total: u32,
}

/// Sides that won at least 80% of the categories decided in their matchup.
pub fn category_sweeps(period: &Period) -> Vec<Sweep> {
    let mut sweeps = Vec::new();
    for matchup in &period.matchups {
        let total = matchup.away.decided_categories();
        if total == 0 {
            continue;
        }
        for (side, opponent) in matchup.sides() {
            if f64::from(side.wins) >= f64::from(total) * 0.8 {
                sweeps.push(Sweep {
                    team: side.team_name.clone(),
                    opponent: opponent.team_name.clone(),
                    wins: side.wins,
                    total,
                });
            }
        }
    }
    sweeps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl Outcome {
    pub fn letter(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Tie => 'T',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStreak {
    pub team: String,
    pub outcome: Outcome,
    pub length: u32,
}

/// Current streak per team: the trailing run of identical W/L/T results
/// walking scored periods in order. More category wins takes the matchup;
/// equal counts tie it.
pub fn streaks(periods: &[Period], through: u32) -> Vec<TeamStreak> {
    let mut history = ResultHistory::default();

    for period in periods {
        if period.number > through {
            break;
        }
        for m in &period.matchups {
            if m.away.wins > m.home.wins {
                history.push(&m.away.team_name, Outcome::Win);
                history.push(&m.home.team_name, Outcome::Loss);
            } else if m.home.wins > m.away.wins {
                history.push(&m.home.team_name, Outcome::Win);
                history.push(&m.away.team_name, Outcome::Loss);
            } else {
                history.push(&m.away.team_name, Outcome::Tie);
                history.push(&m.home.team_name, Outcome::Tie);
            }
        }
    }

    let mut out = Vec::new();
    for team in history.order {
        let Some(results) = history.results.get(&team) else {
            continue;
        };
        let Some(&current) = results.last() else {
            continue;
        };
        let length = results.iter().rev().take_while(|r| **r == current).count() as u32;
        out.push(TeamStreak {
            team,
            outcome: current,
            length,
        });
    }
    out
}

#[derive(Debug, Default)]
struct ResultHistory {
    // First-appearance order so the output stays deterministic.
    order: Vec<String>,
    results: HashMap<String, Vec<Outcome>>,
}

impl ResultHistory {
    fn push(&mut self, team: &str, outcome: Outcome) {
        if !self.results.contains_key(team) {
            self.order.push(team.to_string());
        }
        self.results.entry(team.to_string()).or_default().push(outcome);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankMovement {
    pub team: String,
    // previous_rank - current_rank; positive means the team climbed.
    pub delta: i32,
}

/// Standings movement against the previous snapshot. No previous snapshot
/// (period 1) means no data: the result is empty, not all zeroes. A single
/// team absent from the previous snapshot is omitted.
pub fn standings_movement(
    current: &[StandingsRow],
    previous: Option<&[StandingsRow]>,
) -> Vec<RankMovement> {
    let Some(previous) = previous else {
        return Vec::new();
    };
    let mut movement = Vec::new();
    for row in current {
        let Some(prev) = previous.iter().find(|p| p.team_id == row.team_id) else {
            continue;
        };
        movement.push(RankMovement {
            team: row.team_name.clone(),
            delta: prev.rank as i32 - row.rank as i32,
        });
    }
    movement
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LuckEntry {
    pub team: String,
    pub actual_pct: f64,
    pub all_play_pct: f64,
    pub pct_diff: f64,
    // Actual wins minus the normalized all-play win count.
    pub wins_above_expected: i64,
    pub actual_record: String,
    pub all_play_record: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LuckReport {
    pub luckiest: Option<LuckEntry>,
    pub unluckiest: Option<LuckEntry>,
}

/// Actual record against the all-play record through the target period.
/// The raw all-play counts are normalized to a matchup-equivalent record by
/// dividing each component by the opponent count and rounding independently;
/// the rounded components are display values and are not forced to sum to
/// the number of scored periods.
pub fn luck_ratings(
    standings: &[StandingsRow],
    periods: &[Period],
    through: u32,
    table: &CategoryTable,
) -> LuckReport {
    let all_play = all_play_records(periods, through, table);
    let opponents = standings.len().saturating_sub(1).max(1) as f64;

    let mut entries: Vec<LuckEntry> = Vec::new();
    for row in standings {
        let Some(ap) = all_play.iter().find(|r| r.team == row.team_name) else {
            continue;
        };
        let actual_total = row.wins + row.losses + row.ties;
        let actual_pct = f64::from(row.wins) / f64::from(actual_total.max(1));
        let all_play_pct = ap.record.win_pct();

        let norm_wins = (f64::from(ap.record.wins) / opponents).round() as i64;
        let norm_losses = (f64::from(ap.record.losses) / opponents).round() as i64;
        let norm_ties = (f64::from(ap.record.ties) / opponents).round() as i64;

        entries.push(LuckEntry {
            team: row.team_name.clone(),
            actual_pct,
            all_play_pct,
            pct_diff: actual_pct - all_play_pct,
            wins_above_expected: i64::from(row.wins) - norm_wins,
            actual_record: row.record(),
            all_play_record: format!("{norm_wins}-{norm_losses}-{norm_ties}"),
        });
    }

    // Stable sort keeps standings order among equals.
    entries.sort_by(|a, b| b.wins_above_expected.cmp(&a.wins_above_expected));
    LuckReport {
        luckiest: entries.first().cloned(),
        unluckiest: entries.last().cloned(),
    }
}
