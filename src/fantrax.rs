use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde_json::{Value, json};

use crate::model::{CategoryValue, Matchup, MatchupSide, Period, StandingsRow, Transaction};
use crate::weekly::PeriodData;

const API_URL: &str = "https://www.fantrax.com/fxpa/req";
const REQUEST_TIMEOUT_SECS: u64 = 15;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// League-scoped client for the provider's RPC dispatch endpoint. Every
/// request is a POST carrying a `msgs` batch envelope; responses come back
/// positionally under `responses[i].data`.
#[derive(Debug, Clone)]
pub struct FantraxClient {
    league_id: String,
}

impl FantraxClient {
    pub fn new(league_id: impl Into<String>) -> Self {
        Self {
            league_id: league_id.into(),
        }
    }

    fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut data = json!({ "leagueId": self.league_id });
        for (key, value) in params {
            data[*key] = Value::String(value.clone());
        }
        let payload = json!({ "msgs": [{ "method": method, "data": data }] });

        let client = http_client()?;
        let resp = client
            .post(API_URL)
            .query(&[("leagueId", self.league_id.as_str())])
            .json(&payload)
            .send()
            .with_context(|| format!("{method} request failed"))?
            .error_for_status()
            .with_context(|| format!("{method} returned an error status"))?;
        let body: Value = resp.json().with_context(|| format!("{method} body not json"))?;
        body.get("responses")
            .and_then(|r| r.get(0))
            .and_then(|r| r.get("data"))
            .cloned()
            .ok_or_else(|| anyhow!("{method} response missing data"))
    }

    /// All scoring periods with their matchup results, in season order.
    pub fn schedule(&self) -> Result<Vec<Period>> {
        let data = self.call("getStandings", &[("view", "SCHEDULE".to_string())])?;
        Ok(parse_schedule(&data))
    }

    /// Standings, optionally frozen as of a specific period.
    pub fn standings(&self, period: Option<u32>) -> Result<Vec<StandingsRow>> {
        let params: Vec<(&str, String)> = match period {
            Some(p) => vec![
                ("period", p.to_string()),
                ("timeframeType", "BY_PERIOD".to_string()),
                ("timeStartType", "FROM_SEASON_START".to_string()),
            ],
            None => Vec::new(),
        };
        let data = self.call("getStandings", &params)?;
        Ok(parse_standings(&data))
    }

    /// Recent claim/drop transaction groups, flattened for the volume metric.
    pub fn transactions(&self, count: u32) -> Result<Vec<Transaction>> {
        let data = self.call(
            "getTransactionDetailsHistory",
            &[("maxResultsPerPage", count.to_string())],
        )?;
        Ok(parse_transactions(&data))
    }

    /// Standings, previous standings and transactions for one period,
    /// fetched concurrently on a small worker pool. The previous snapshot
    /// only exists for periods after the first.
    pub fn fetch_period_data(&self, period: u32) -> Result<PeriodData> {
        let ((standings, prev_standings), transactions) = with_fetch_pool(|| {
            rayon::join(
                || {
                    rayon::join(
                        || self.standings(Some(period)),
                        || {
                            if period > 1 {
                                self.standings(Some(period - 1)).map(Some)
                            } else {
                                Ok(None)
                            }
                        },
                    )
                },
                || self.transactions(500),
            )
        });
        Ok(PeriodData {
            standings: standings?,
            prev_standings: prev_standings?,
            transactions: transactions?,
        })
    }
}

fn with_fetch_pool<T>(action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(fetch_parallelism())
        .build();
    match pool {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}

fn fetch_parallelism() -> usize {
    env::var("FETCH_PARALLELISM")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(3)
        .clamp(2, 8)
}

pub fn parse_schedule_json(raw: &str) -> Result<Vec<Period>> {
    let data: Value = serde_json::from_str(raw).context("invalid schedule json")?;
    Ok(parse_schedule(&data))
}

/// Schedule view: one table per scoring period. Rows come in away/home
/// pairs sharing a matchupId; the first four columns are W/L/T/Pts and the
/// remainder are stat categories named in the header.
pub fn parse_schedule(data: &Value) -> Vec<Period> {
    let mut periods = Vec::new();
    let Some(tables) = data.get("tableList").and_then(Value::as_array) else {
        return periods;
    };

    for table in tables {
        let caption = str_field(table, "caption");
        let date_range = str_field(table, "subCaption");
        let header = header_cells(table);
        let category_names: Vec<String> = header
            .iter()
            .skip(4)
            .map(|c| str_field(c, "name"))
            .collect();

        let rows = table
            .get("rows")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut matchups = Vec::new();
        let mut i = 0;
        while i + 1 < rows.len() {
            let away_row = &rows[i];
            let home_row = &rows[i + 1];
            i += 2;
            if away_row.get("matchupId") != home_row.get("matchupId") {
                continue;
            }
            // Future periods render the pairing with empty result cells.
            if cell_content(away_row, 0).is_empty() {
                continue;
            }
            let (Some(away), Some(home)) = (
                parse_matchup_side(away_row, &category_names),
                parse_matchup_side(home_row, &category_names),
            ) else {
                continue;
            };
            matchups.push(Matchup { away, home });
        }

        let number = first_number(&caption).unwrap_or(periods.len() as u32 + 1);
        periods.push(Period {
            number,
            name: caption,
            date_range,
            matchups,
        });
    }
    periods
}

fn parse_matchup_side(row: &Value, category_names: &[String]) -> Option<MatchupSide> {
    let team_cell = row.get("fixedCells")?.get(0)?;
    let team_id = str_field(team_cell, "teamId");
    let team_name = str_field(team_cell, "content");
    if team_id.is_empty() {
        return None;
    }

    let categories = category_names
        .iter()
        .enumerate()
        .map(|(j, name)| CategoryValue {
            name: name.clone(),
            value: cell_content(row, j + 4),
        })
        .collect();

    Some(MatchupSide {
        team_id,
        team_name,
        wins: int_cell(row, 0),
        losses: int_cell(row, 1),
        ties: int_cell(row, 2),
        categories,
    })
}

pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingsRow>> {
    let data: Value = serde_json::from_str(raw).context("invalid standings json")?;
    Ok(parse_standings(&data))
}

/// Standings live in the first table; stat columns are matched to rows by
/// the header cell keys rather than by position.
pub fn parse_standings(data: &Value) -> Vec<StandingsRow> {
    let mut out = Vec::new();
    let Some(table) = data
        .get("tableList")
        .and_then(Value::as_array)
        .and_then(|tables| tables.first())
    else {
        return out;
    };
    let keys: Vec<String> = header_cells(table)
        .iter()
        .map(|c| str_field(c, "key"))
        .collect();
    let Some(rows) = table.get("rows").and_then(Value::as_array) else {
        return out;
    };

    for row in rows {
        let Some(fixed) = row.get("fixedCells").and_then(Value::as_array) else {
            continue;
        };
        let Some(rank) = fixed
            .first()
            .map(|c| str_field(c, "content"))
            .and_then(|s| s.trim().parse::<u32>().ok())
        else {
            continue;
        };
        let team_cell = fixed.get(1).unwrap_or(fixed.first().unwrap_or(&Value::Null));
        let team_id = str_field(team_cell, "teamId");
        let team_name = str_field(team_cell, "content");

        let by_key = |key: &str| -> String {
            keys.iter()
                .position(|k| k == key)
                .map(|idx| cell_content(row, idx))
                .unwrap_or_default()
        };

        out.push(StandingsRow {
            rank,
            team_id,
            team_name,
            wins: by_key("win").trim().parse().unwrap_or(0),
            losses: by_key("loss").trim().parse().unwrap_or(0),
            ties: by_key("tie").trim().parse().unwrap_or(0),
            win_pct: by_key("winpc"),
            games_back: by_key("gb"),
        });
    }
    out
}

pub fn parse_transactions_json(raw: &str) -> Result<Vec<Transaction>> {
    let data: Value = serde_json::from_str(raw).context("invalid transactions json")?;
    Ok(parse_transactions(&data))
}

/// Transaction history rows belong to groups keyed by txSetId. The team and
/// date cells only appear on a group's first row and carry forward; a group
/// counts as an addition when any of its rows is a CLAIM.
pub fn parse_transactions(data: &Value) -> Vec<Transaction> {
    let mut groups: Vec<(String, Transaction)> = Vec::new();
    let Some(rows) = data
        .get("table")
        .and_then(|t| t.get("rows"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut last_team = String::from("Unknown");
    let mut last_date = String::new();

    for row in rows {
        let tx_set_id = str_field(row, "txSetId");
        let code = str_field(row, "transactionCode");

        if let Some(cells) = row.get("cells").and_then(Value::as_array) {
            for cell in cells {
                match str_field(cell, "key").as_str() {
                    "team" => last_team = str_field(cell, "content"),
                    "date" => last_date = str_field(cell, "content"),
                    _ => {}
                }
            }
        }

        match groups.iter_mut().find(|(id, _)| *id == tx_set_id) {
            Some((_, txn)) => {
                if code == "CLAIM" {
                    txn.added = true;
                }
            }
            None => groups.push((
                tx_set_id,
                Transaction {
                    team_name: last_team.clone(),
                    date: last_date.clone(),
                    added: code == "CLAIM",
                },
            )),
        }
    }

    groups.into_iter().map(|(_, txn)| txn).collect()
}

fn header_cells(table: &Value) -> Vec<Value> {
    table
        .get("header")
        .and_then(|h| h.get("cells"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn cell_content(row: &Value, idx: usize) -> String {
    row.get("cells")
        .and_then(|c| c.get(idx))
        .map(|c| str_field(c, "content"))
        .unwrap_or_default()
}

fn int_cell(row: &Value, idx: usize) -> u32 {
    cell_content(row, idx).trim().parse().unwrap_or(0)
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn first_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
