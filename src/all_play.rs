use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::categories::{CategoryTable, INNINGS_PITCHED};
use crate::model::{AggregateRecord, Period};

/// One team's accumulated all-play record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: String,
    pub record: AggregateRecord,
}

/// All-play records through `through` (inclusive): every team simulated
/// against every other team on every shared category for every scored
/// period. Ordered by win percentage descending, stable on first appearance.
pub fn all_play_records(
    periods: &[Period],
    through: u32,
    table: &CategoryTable,
) -> Vec<TeamRecord> {
    let mut acc = Accumulator::default();
    for period in periods {
        if period.number > through {
            break;
        }
        accumulate_period(&mut acc, period, table);
    }
    let mut out = acc.into_records();
    out.sort_by(|a, b| b.record.win_pct().total_cmp(&a.record.win_pct()));
    out
}

/// Same simulation restricted to a single period, ordered by wins descending.
pub fn weekly_all_play(period: &Period, table: &CategoryTable) -> Vec<TeamRecord> {
    let mut acc = Accumulator::default();
    accumulate_period(&mut acc, period, table);
    let mut out = acc.into_records();
    out.sort_by(|a, b| b.record.wins.cmp(&a.record.wins));
    out
}

#[derive(Debug, Default)]
struct Accumulator {
    // First-appearance order kept alongside the map so output ordering is
    // deterministic before the final sort.
    order: Vec<String>,
    records: HashMap<String, AggregateRecord>,
}

impl Accumulator {
    fn entry(&mut self, team: &str) -> &mut AggregateRecord {
        if !self.records.contains_key(team) {
            self.order.push(team.to_string());
        }
        self.records.entry(team.to_string()).or_default()
    }

    fn into_records(mut self) -> Vec<TeamRecord> {
        self.order
            .into_iter()
            .map(|team| {
                let record = self.records.remove(&team).unwrap_or_default();
                TeamRecord { team, record }
            })
            .collect()
    }
}

fn accumulate_period(acc: &mut Accumulator, period: &Period, table: &CategoryTable) {
    if period.matchups.is_empty() {
        return;
    }
    let teams = team_category_values(period, table);
    if teams.len() < 2 {
        return;
    }

    // Every unordered pair exactly once; updates are paired so the two
    // sides' aggregates stay complementary.
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            let (wins, losses, ties) = simulate_pair(&teams[i].1, &teams[j].1, table);
            acc.entry(&teams[i].0).add(wins, losses, ties);
            acc.entry(&teams[j].0).add(losses, wins, ties);
        }
    }
}

/// Each team's numeric category values for one period. Non-numeric values
/// are dropped per category, never coerced to zero. A team that recorded an
/// Innings Pitched category but logged nothing in it set no pitching lineup;
/// its lower-is-better categories are coerced to infinitely bad so it can
/// never win them. Schemes that don't track innings at all are left alone.
pub fn team_category_values(
    period: &Period,
    table: &CategoryTable,
) -> Vec<(String, HashMap<String, f64>)> {
    let mut teams: Vec<(String, HashMap<String, f64>)> = Vec::new();
    for matchup in &period.matchups {
        for (side, _) in matchup.sides() {
            let mut values: HashMap<String, f64> = HashMap::new();
            for cat in &side.categories {
                if let Some(v) = cat.numeric() {
                    values.insert(cat.name.clone(), v);
                }
            }
            let zero_innings = side
                .categories
                .iter()
                .find(|c| c.name == INNINGS_PITCHED)
                .is_some_and(|c| c.numeric().is_none_or(|v| v == 0.0));
            if zero_innings {
                for name in table.lower_is_better_names() {
                    if let Some(v) = values.get_mut(name) {
                        *v = f64::INFINITY;
                    }
                }
            }
            teams.push((side.team_name.clone(), values));
        }
    }
    teams
}

/// Head-to-head over every category both teams recorded. Returns the first
/// team's (wins, losses, ties); the second team's view is the mirror.
fn simulate_pair(
    first: &HashMap<String, f64>,
    second: &HashMap<String, f64>,
    table: &CategoryTable,
) -> (u32, u32, u32) {
    let mut wins = 0;
    let mut losses = 0;
    let mut ties = 0;
    for (category, value) in first {
        let Some(other) = second.get(category) else {
            continue;
        };
        let a = table.oriented(category, *value);
        let b = table.oriented(category, *other);
        if a > b {
            wins += 1;
        } else if a < b {
            losses += 1;
        } else {
            ties += 1;
        }
    }
    (wins, losses, ties)
}
