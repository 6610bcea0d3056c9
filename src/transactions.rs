use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Period, Transaction};

const PROVIDER_DATE_FMT: &str = "%a %b %d, %Y";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCount {
    pub team: String,
    pub count: u32,
}

/// Additions per team inside the period's inclusive date range, descending
/// by count. Transactions with unparseable dates are skipped individually.
pub fn transaction_volume(txns: &[Transaction], period: &Period) -> Vec<TransactionCount> {
    let Some((start, end)) = parse_period_range(&period.date_range) else {
        return Vec::new();
    };

    let mut counts: Vec<TransactionCount> = Vec::new();
    for txn in txns {
        if !txn.added {
            continue;
        }
        let Some(date) = parse_transaction_date(&txn.date) else {
            continue;
        };
        if date < start || date > end {
            continue;
        }
        match counts.iter_mut().find(|c| c.team == txn.team_name) {
            Some(entry) => entry.count += 1,
            None => counts.push(TransactionCount {
                team: txn.team_name.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Parses the provider's period range string, e.g.
/// "(Mon Jun 16, 2025 - Sun Jun 22, 2025)".
pub fn parse_period_range(raw: &str) -> Option<(NaiveDate, NaiveDate)> {
    let stripped = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let (start_str, end_str) = stripped.split_once(" - ")?;
    let start = NaiveDate::parse_from_str(start_str.trim(), PROVIDER_DATE_FMT).ok()?;
    let end = NaiveDate::parse_from_str(end_str.trim(), PROVIDER_DATE_FMT).ok()?;
    Some((start, end))
}

/// Parses a transaction timestamp like "Wed Jun 18, 2025, 10:00am" down to
/// its calendar date. The time-of-day tail is ignored.
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, ',');
    let day = parts.next()?.trim();
    let year = parts.next()?.trim();
    NaiveDate::parse_from_str(&format!("{day}, {year}"), PROVIDER_DATE_FMT).ok()
}
