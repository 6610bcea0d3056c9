use h2h_recap::fantrax::{parse_schedule_json, parse_standings_json, parse_transactions_json};

const SCHEDULE_JSON: &str = r#"{
  "tableList": [
    {
      "caption": "Scoring Period 1",
      "subCaption": "(Mon Jun 16, 2025 - Sun Jun 22, 2025)",
      "header": { "cells": [
        { "key": "win", "name": "Wins" },
        { "key": "loss", "name": "Losses" },
        { "key": "tie", "name": "Ties" },
        { "key": "pts", "name": "Points" },
        { "key": "hr", "name": "Home Runs", "shortName": "HR" },
        { "key": "era", "name": "Earned Run Average", "shortName": "ERA" }
      ] },
      "rows": [
        {
          "matchupId": "m1",
          "fixedCells": [ { "teamId": "t1", "content": "Foo" } ],
          "cells": [
            { "content": "2" }, { "content": "0" }, { "content": "0" }, { "content": "2.0" },
            { "content": "5" }, { "content": "3.00" }
          ]
        },
        {
          "matchupId": "m1",
          "fixedCells": [ { "teamId": "t2", "content": "Bar" } ],
          "cells": [
            { "content": "0" }, { "content": "2" }, { "content": "0" }, { "content": "0.0" },
            { "content": "3" }, { "content": "4.50" }
          ]
        }
      ]
    },
    {
      "caption": "Scoring Period 2",
      "subCaption": "(Mon Jun 23, 2025 - Sun Jun 29, 2025)",
      "header": { "cells": [
        { "key": "win", "name": "Wins" },
        { "key": "loss", "name": "Losses" },
        { "key": "tie", "name": "Ties" },
        { "key": "pts", "name": "Points" },
        { "key": "hr", "name": "Home Runs", "shortName": "HR" },
        { "key": "era", "name": "Earned Run Average", "shortName": "ERA" }
      ] },
      "rows": [
        {
          "matchupId": "m9",
          "fixedCells": [ { "teamId": "t1", "content": "Foo" } ],
          "cells": [
            { "content": "" }, { "content": "" }, { "content": "" }, { "content": "" },
            { "content": "" }, { "content": "" }
          ]
        },
        {
          "matchupId": "m9",
          "fixedCells": [ { "teamId": "t2", "content": "Bar" } ],
          "cells": [
            { "content": "" }, { "content": "" }, { "content": "" }, { "content": "" },
            { "content": "" }, { "content": "" }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn schedule_parses_periods_and_matchup_sides() {
    let periods = parse_schedule_json(SCHEDULE_JSON).expect("schedule parses");
    assert_eq!(periods.len(), 2);

    let first = &periods[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.name, "Scoring Period 1");
    assert_eq!(first.date_range, "(Mon Jun 16, 2025 - Sun Jun 22, 2025)");
    assert_eq!(first.matchups.len(), 1);
    assert!(first.is_scored());

    let m = &first.matchups[0];
    assert_eq!(m.away.team_id, "t1");
    assert_eq!(m.away.team_name, "Foo");
    assert_eq!((m.away.wins, m.away.losses, m.away.ties), (2, 0, 0));
    assert_eq!(m.home.team_name, "Bar");

    // Categories start after the four result columns, in header order.
    assert_eq!(m.away.categories.len(), 2);
    assert_eq!(m.away.categories[0].name, "Home Runs");
    assert_eq!(m.away.categories[0].value, "5");
    assert_eq!(m.away.categories[1].name, "Earned Run Average");
    assert_eq!(m.home.categories[1].value, "4.50");
}

#[test]
fn schedule_skips_future_matchups_with_empty_cells() {
    let periods = parse_schedule_json(SCHEDULE_JSON).expect("schedule parses");
    let second = &periods[1];
    assert_eq!(second.number, 2);
    assert!(second.matchups.is_empty());
    assert!(!second.is_scored());
}

#[test]
fn schedule_period_number_falls_back_to_position() {
    let raw = r#"{ "tableList": [ { "caption": "Opening Week", "subCaption": "",
        "header": { "cells": [] }, "rows": [] } ] }"#;
    let periods = parse_schedule_json(raw).expect("schedule parses");
    assert_eq!(periods[0].number, 1);
    assert_eq!(periods[0].name, "Opening Week");
}

const STANDINGS_JSON: &str = r#"{
  "tableList": [
    {
      "header": { "cells": [
        { "key": "win" }, { "key": "loss" }, { "key": "tie" },
        { "key": "winpc" }, { "key": "gb" }
      ] },
      "rows": [
        {
          "fixedCells": [ { "content": "1" }, { "teamId": "t1", "content": "Foo" } ],
          "cells": [
            { "content": "10" }, { "content": "5" }, { "content": "3" },
            { "content": ".639" }, { "content": "0" }
          ]
        },
        {
          "fixedCells": [ { "content": "2" }, { "teamId": "t2", "content": "Bar" } ],
          "cells": [
            { "content": "8" }, { "content": "7" }, { "content": "3" },
            { "content": ".528" }, { "content": "2" }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn standings_parse_in_provider_order() {
    let rows = parse_standings_json(STANDINGS_JSON).expect("standings parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].team_id, "t1");
    assert_eq!(rows[0].team_name, "Foo");
    assert_eq!((rows[0].wins, rows[0].losses, rows[0].ties), (10, 5, 3));
    assert_eq!(rows[0].win_pct, ".639");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].games_back, "2");
}

#[test]
fn standings_skip_rows_without_a_rank() {
    let raw = r#"{ "tableList": [ { "header": { "cells": [ { "key": "win" } ] },
      "rows": [
        { "fixedCells": [ { "content": "Totals" } ], "cells": [ { "content": "18" } ] },
        { "fixedCells": [ { "content": "1" }, { "teamId": "t1", "content": "Foo" } ],
          "cells": [ { "content": "10" } ] }
      ] } ] }"#;
    let rows = parse_standings_json(raw).expect("standings parse");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team_name, "Foo");
}

const TRANSACTIONS_JSON: &str = r#"{
  "table": {
    "rows": [
      {
        "txSetId": "tx1",
        "transactionCode": "CLAIM",
        "cells": [
          { "key": "team", "content": "Foo" },
          { "key": "date", "content": "Wed Jun 18, 2025, 10:00am" }
        ]
      },
      {
        "txSetId": "tx1",
        "transactionCode": "DROP",
        "cells": []
      },
      {
        "txSetId": "tx2",
        "transactionCode": "DROP",
        "cells": [
          { "key": "team", "content": "Bar" },
          { "key": "date", "content": "Thu Jun 19, 2025, 9:12pm" }
        ]
      }
    ]
  }
}"#;

#[test]
fn transactions_group_by_tx_set_and_flag_claims() {
    let txns = parse_transactions_json(TRANSACTIONS_JSON).expect("transactions parse");
    assert_eq!(txns.len(), 2);

    assert_eq!(txns[0].team_name, "Foo");
    assert_eq!(txns[0].date, "Wed Jun 18, 2025, 10:00am");
    assert!(txns[0].added);

    // Drop-only group: not an addition.
    assert_eq!(txns[1].team_name, "Bar");
    assert!(!txns[1].added);
}

#[test]
fn transactions_tolerate_missing_table() {
    let txns = parse_transactions_json("{}").expect("empty body parses");
    assert!(txns.is_empty());
}
