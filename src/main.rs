use std::env;

use anyhow::{Context, Result, bail};

use h2h_recap::categories::CategoryTable;
use h2h_recap::fantrax::FantraxClient;
use h2h_recap::weekly::{StatsError, WeeklyStats, compute_weekly_stats, latest_completed};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let league_id = league_id()
        .context("league id missing: pass it as the first argument or set FANTRAX_LEAGUE_ID")?;
    let target_period = target_period()?;

    let client = FantraxClient::new(league_id);
    let schedule = client.schedule().context("failed to fetch schedule")?;

    let period_num = match target_period {
        Some(n) => n,
        None => match latest_completed(&schedule) {
            Some(p) => p.number,
            None => bail!("{}", StatsError::NoCompletedPeriod),
        },
    };
    let data = client
        .fetch_period_data(period_num)
        .context("failed to fetch period data")?;

    let table = CategoryTable::baseball_h2h();
    let stats = compute_weekly_stats(&schedule, &data, &table, Some(period_num))?;
    print_recap(&stats);
    Ok(())
}

fn league_id() -> Option<String> {
    env::args()
        .nth(1)
        .filter(|arg| !arg.starts_with("--"))
        .or_else(|| env::var("FANTRAX_LEAGUE_ID").ok())
        .filter(|id| !id.trim().is_empty())
}

fn target_period() -> Result<Option<u32>> {
    let args: Vec<String> = env::args().collect();
    let Some(idx) = args.iter().position(|a| a == "--period") else {
        return Ok(None);
    };
    let value = args
        .get(idx + 1)
        .context("--period requires a period number")?;
    let period = value
        .parse::<u32>()
        .with_context(|| format!("invalid period number: {value}"))?;
    Ok(Some(period))
}

fn print_recap(stats: &WeeklyStats) {
    println!(
        "Period: {} {} ({} of {})",
        stats.period.name, stats.period.date_range, stats.period.number, stats.total_periods
    );
    println!();

    if let Some(blowout) = &stats.biggest_blowout {
        println!(
            "BIGGEST WINNER: {} +{} ({})",
            blowout.winner.team, blowout.winner.net, blowout.winner.record
        );
        println!(
            "BIGGEST LOSER: {} {} ({})",
            blowout.loser.team, blowout.loser.net, blowout.loser.record
        );
    }
    if let Some(dp) = &stats.dominant_performance {
        println!("DOMINANT: {} won {} cats vs {}", dp.team, dp.wins, dp.opponent);
    }
    println!();

    println!("STANDINGS:");
    for row in &stats.standings {
        println!(
            "  {}. {} ({}) {}",
            row.rank,
            row.team_name,
            row.record(),
            row.win_pct
        );
    }
    println!();

    if !stats.standings_movement.is_empty() {
        println!("STANDINGS MOVEMENT:");
        for m in &stats.standings_movement {
            let arrow = match m.delta {
                d if d > 0 => "^".repeat(d as usize),
                d if d < 0 => "v".repeat(d.unsigned_abs() as usize),
                _ => "-".to_string(),
            };
            println!("  {}: {}", m.team, arrow);
        }
        println!();
    }

    println!("STREAKS:");
    let mut streaks = stats.streaks.clone();
    streaks.sort_by(|a, b| b.length.cmp(&a.length));
    for s in &streaks {
        println!("  {}: {}{}", s.team, s.length, s.outcome.letter());
    }
    println!();

    println!("WEEKLY ALL-PLAY:");
    for entry in &stats.weekly_all_play {
        println!("  {}: {}", entry.team, entry.record.display());
    }
    println!();

    if !stats.category_leaders.is_empty() {
        println!("CATEGORY KINGS:");
        for leader in &stats.category_leaders {
            println!("  {}: {} ({})", leader.category, leader.team, leader.value);
        }
        println!();
    }

    if let Some(lucky) = &stats.luck.luckiest {
        println!(
            "LUCKIEST: {} (actual {}, all-play {}, diff +{:.3})",
            lucky.team, lucky.actual_record, lucky.all_play_record, lucky.pct_diff
        );
    }
    if let Some(unlucky) = &stats.luck.unluckiest {
        println!(
            "UNLUCKIEST: {} (actual {}, all-play {}, diff {:.3})",
            unlucky.team, unlucky.actual_record, unlucky.all_play_record, unlucky.pct_diff
        );
    }
    println!();

    if !stats.category_sweeps.is_empty() {
        println!("CATEGORY SWEEPS:");
        for sweep in &stats.category_sweeps {
            println!(
                "  {} dominated {}: {}/{} cats",
                sweep.team, sweep.opponent, sweep.wins, sweep.total
            );
        }
        println!();
    }

    if !stats.most_transactions.is_empty() {
        println!("MOST PICKUPS:");
        for entry in &stats.most_transactions {
            println!("  {}: {}", entry.team, entry.count);
        }
    }
}
