use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::all_play::{TeamRecord, all_play_records, weekly_all_play};
use crate::categories::CategoryTable;
use crate::metrics::{
    Blowout, CategoryLeader, DominantPerformance, LuckReport, RankMovement, Sweep, TeamStreak,
    biggest_blowout, category_leaders, category_sweeps, dominant_performance, luck_ratings,
    standings_movement, streaks,
};
use crate::model::{Period, StandingsRow, Transaction};
use crate::transactions::{TransactionCount, transaction_volume};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no completed scoring period found")]
    NoCompletedPeriod,
}

/// Externally fetched inputs for one target period: the current standings
/// snapshot, the snapshot one period earlier (absent for period 1), and the
/// flat transaction history covering the period's window.
#[derive(Debug, Clone, Default)]
pub struct PeriodData {
    pub standings: Vec<StandingsRow>,
    pub prev_standings: Option<Vec<StandingsRow>>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub number: u32,
    pub name: String,
    pub date_range: String,
}

impl From<&Period> for PeriodSummary {
    fn from(p: &Period) -> Self {
        Self {
            number: p.number,
            name: p.name.clone(),
            date_range: p.date_range.clone(),
        }
    }
}

/// The full weekly recap record. Every metric carries its own empty shape
/// for insufficient data, so one missing input never blanks the rest.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStats {
    pub period: PeriodSummary,
    pub total_periods: usize,
    pub standings: Vec<StandingsRow>,
    pub standings_movement: Vec<RankMovement>,
    pub biggest_blowout: Option<Blowout>,
    pub dominant_performance: Option<DominantPerformance>,
    pub category_leaders: Vec<CategoryLeader>,
    pub all_play: Vec<TeamRecord>,
    pub weekly_all_play: Vec<TeamRecord>,
    pub streaks: Vec<TeamStreak>,
    pub luck: LuckReport,
    pub category_sweeps: Vec<Sweep>,
    pub most_transactions: Vec<TransactionCount>,
}

/// Last period in schedule order whose first matchup has decided categories.
pub fn latest_completed(periods: &[Period]) -> Option<&Period> {
    periods.iter().filter(|p| p.is_scored()).next_back()
}

/// Computes every recap metric for one period and assembles the result
/// record. With no explicit target the latest completed period is used;
/// no completed period (or a target with no matchups) is terminal.
pub fn compute_weekly_stats(
    periods: &[Period],
    data: &PeriodData,
    table: &CategoryTable,
    target: Option<u32>,
) -> Result<WeeklyStats, StatsError> {
    let period = match target {
        Some(number) => periods.iter().find(|p| p.number == number),
        None => latest_completed(periods),
    }
    .ok_or(StatsError::NoCompletedPeriod)?;
    if period.matchups.is_empty() {
        return Err(StatsError::NoCompletedPeriod);
    }

    Ok(WeeklyStats {
        period: PeriodSummary::from(period),
        total_periods: periods.len(),
        standings: data.standings.clone(),
        standings_movement: standings_movement(&data.standings, data.prev_standings.as_deref()),
        biggest_blowout: biggest_blowout(period),
        dominant_performance: dominant_performance(period),
        category_leaders: category_leaders(period, table),
        all_play: all_play_records(periods, period.number, table),
        weekly_all_play: weekly_all_play(period, table),
        streaks: streaks(periods, period.number),
        luck: luck_ratings(&data.standings, periods, period.number, table),
        category_sweeps: category_sweeps(period),
        most_transactions: transaction_volume(&data.transactions, period),
    })
}
