//! forecast-runner: headless scenario runner for the franchise model.
//!
//! Usage:
//!   forecast-runner                          # stock scenarios, defaults
//!   forecast-runner --state plan.json        # load + migrate a save file
//!   forecast-runner --sale-year 2032 --multiple 6
//!   forecast-runner --export out.json        # write the (migrated) state back

use anyhow::{Context, Result};
use franchise_core::{
    config::{AppState, MODEL_START_YEAR},
    engine::calc_scenario,
    state::{export_state, load_state},
    valuation::{project_sale_year_ebitda, ValuationBands},
};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let sale_year = parse_arg(&args, "--sale-year", 2030i32);
    let multiple = parse_arg(&args, "--multiple", 5.0f64);
    let state_path = str_arg(&args, "--state");
    let export_path = str_arg(&args, "--export");

    let state: AppState = match state_path {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            load_state(&json).with_context(|| format!("migrating {path}"))?
        }
        None => AppState::default(),
    };

    println!("franchise forecast — {} scenario(s)", state.scenarios.len());
    println!();

    for (idx, sc) in state.scenarios.iter().enumerate() {
        let r = calc_scenario(&state.assumptions, sc, idx);

        println!("── {} ({} months) ──", sc.name, sc.horizon());
        println!(
            "{:<6} {:>14} {:>14} {:>14} {:>12} {:>6} {:>6}",
            "year", "revenue", "cost", "net income", "gmv", "fran", "memb"
        );
        for y in &r.years {
            println!(
                "{:<6} {:>14} {:>14} {:>14} {:>12} {:>6} {:>6}",
                y.year,
                fmt_money(y.revenue),
                fmt_money(y.cost),
                fmt_money(y.net_income),
                fmt_money(y.gmv),
                y.end_franchises,
                y.end_members,
            );
        }
        println!(
            "totals: revenue {}, operating profit {}",
            fmt_money(r.total_revenue),
            fmt_money(r.total_profit)
        );
        match r.break_even_month {
            Some(m) => println!("break-even: month {m} ({})", r.rows[m].month),
            None => println!("break-even: n/a (never within horizon)"),
        }

        let model_end_year = r
            .years
            .last()
            .map(|y| y.year)
            .unwrap_or(MODEL_START_YEAR - 1);
        if let Some(last_row) = &r.last_row {
            let sale_ebitda = if sale_year > model_end_year {
                project_sale_year_ebitda(&state.assumptions, last_row, model_end_year, sale_year)
            } else {
                // Within the modeled horizon: use that year's profit.
                r.years
                    .iter()
                    .find(|y| y.year == sale_year)
                    .map(|y| y.profit)
                    .unwrap_or(0.0)
            };
            let bands = ValuationBands::from_multiple(sale_ebitda, multiple);
            println!(
                "sale {sale_year} @ {multiple}x: EBITDA {} -> {} / {} / {}",
                fmt_money(sale_ebitda),
                fmt_money(bands.conservative),
                fmt_money(bands.average),
                fmt_money(bands.high),
            );
        }
        println!();
    }

    if let Some(path) = export_path {
        let json = export_state(&state)?;
        fs::write(path, json).with_context(|| format!("writing {path}"))?;
        log::info!(
            "state exported to {path} ({})",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn fmt_money(n: f64) -> String {
    let abs = n.abs();
    let s = if abs >= 1_000_000.0 {
        format!("${:.2}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.0}K", abs / 1_000.0)
    } else {
        format!("${abs:.0}")
    };
    if n < 0.0 {
        format!("({s})")
    } else {
        s
    }
}
