//! End-to-end engine behavior on the stock scenarios, plus the
//! structural invariants every run must hold.

use franchise_core::{
    config::{Assumptions, MonthSales, Scenario},
    engine::calc_scenario,
};

#[test]
fn flat_scenario_month_by_month_anchors() {
    let a = Assumptions::default();
    let sc = Scenario::flat_steady_state();
    let r = calc_scenario(&a, &sc, 0);

    assert_eq!(r.rows.len(), 60);

    // No franchises exist before the April 2026 sales push.
    assert_eq!(r.rows[0].active_franchises, 0);
    assert_eq!(r.rows[0].rev_franchise_fees, 0.0);

    // Month 3: 3 franchises sold. Churn is floor(active * ~0.43%),
    // which is 0 at this book size, so the count is exact.
    assert_eq!(r.rows[3].active_franchises, 3);
    assert_eq!(r.rows[3].rev_franchise_fees, 3.0 * 40_000.0);
    assert_eq!(r.rows[3].new_franchises, 3);

    // Every month is a finite, internally consistent P&L.
    for row in &r.rows {
        assert!(row.total_revenue.is_finite(), "{}: revenue NaN", row.month);
        assert!(row.operating_profit.is_finite(), "{}: profit NaN", row.month);
        assert!(
            (row.total_cost - (row.cost_commissions + row.cost_overhead)).abs() < 1e-9,
            "{}: cost components don't sum",
            row.month
        );
        assert!(
            (row.net_income - (row.operating_profit - row.tax_expense)).abs() < 1e-9,
            "{}: net income mismatch",
            row.month
        );
        assert!(row.tax_expense >= 0.0, "{}: negative tax", row.month);
    }
}

#[test]
fn active_counts_never_negative_under_total_churn() {
    // 100% annual churn converts to monthly rate 1.0 — everyone
    // leaves every month. Counts must clamp at zero, never wrap.
    let a = Assumptions {
        churn_rate_tier1: 1.0,
        churn_rate_tier2: 1.0,
        churn_rate_jv: 1.0,
        churn_rate_franchise: 1.0,
        ..Assumptions::default()
    };
    let mut sc = Scenario::blank("churn-storm");
    sc.starting_tier1 = 50;
    sc.starting_tier2 = 20;
    sc.starting_jv = 10;
    sc.starting_franchises = 10;
    sc.months[5] = MonthSales {
        franchises: 4,
        tier1: 6,
        tier2: 2,
        jv: 1,
    };

    let r = calc_scenario(&a, &sc, 0);
    // u32 counts can't be negative; what matters is the arithmetic
    // never wrapped and new sales still land.
    assert_eq!(r.rows[0].active_tier1, 0);
    assert_eq!(r.rows[4].active_franchises, 0);
    assert_eq!(r.rows[5].active_franchises, 4);
    assert_eq!(r.rows[6].active_franchises, 0);
    for row in &r.rows {
        assert!(row.active_members < 100, "{}: wrapped count", row.month);
    }
}

#[test]
fn break_even_is_first_strictly_positive_cumulative_month() {
    let a = Assumptions::default();
    let sc = Scenario::flat_steady_state();
    let r = calc_scenario(&a, &sc, 0);

    match r.break_even_month {
        Some(m) => {
            assert!(r.rows[m].cum_profit > 0.0);
            for row in &r.rows[..m] {
                assert!(row.cum_profit <= 0.0, "{}: earlier positive month", row.month);
            }
        }
        None => {
            assert!(r.rows.iter().all(|row| row.cum_profit <= 0.0));
        }
    }
}

#[test]
fn no_break_even_on_an_empty_book() {
    let a = Assumptions::default();
    let sc = Scenario::blank("empty");
    let r = calc_scenario(&a, &sc, 0);
    // Overhead floor with zero revenue: losses forever.
    assert_eq!(r.break_even_month, None);
    assert!(r.total_profit < 0.0);
}

#[test]
fn cumulative_sums_are_consistent() {
    let a = Assumptions::default();
    let sc = Scenario::expansion_plan();
    let r = calc_scenario(&a, &sc, 1);

    let mut profit = 0.0;
    let mut revenue = 0.0;
    let mut net = 0.0;
    for row in &r.rows {
        profit += row.operating_profit;
        revenue += row.total_revenue;
        net += row.net_income;
        assert!((row.cum_profit - profit).abs() < 1e-6, "{}", row.month);
        assert!((row.cum_revenue - revenue).abs() < 1e-6, "{}", row.month);
        assert!((row.cum_net_income - net).abs() < 1e-6, "{}", row.month);
    }
    assert!((r.total_revenue - revenue).abs() < 1e-6);
    assert!((r.total_profit - profit).abs() < 1e-6);
}

#[test]
fn year_rollups_partition_the_horizon() {
    let a = Assumptions::default();
    let mut sc = Scenario::flat_steady_state();
    // Force a short final block: 60 + 12 = 72, then trim to 66.
    sc.extend_horizon();
    sc.months.truncate(66);

    let r = calc_scenario(&a, &sc, 0);
    assert_eq!(r.years.len(), 6); // 5 full years + 6 months
    assert_eq!(r.years[0].year, 2026);
    assert_eq!(r.years[5].year, 2031);

    let year_revenue: f64 = r.years.iter().map(|y| y.revenue).sum();
    assert!((year_revenue - r.total_revenue).abs() < 1e-6);

    let last = r.rows.last().expect("rows");
    let last_year = r.years.last().expect("years");
    assert_eq!(last_year.end_franchises, last.active_franchises);
    assert_eq!(last_year.end_members, last.active_members);
}

#[test]
fn seasonality_off_tax_off_reduces_to_the_simple_model() {
    // With the extra knobs set neutral the rich model must behave
    // like a plain fixed-ramp P&L: flat GMV at steady state, zero
    // tax, net income equal to operating profit.
    let a = Assumptions {
        seasonality_enabled: false,
        effective_tax_rate: 0.0,
        churn_rate_franchise: 0.0,
        material_adoption_rate: 0.0,
        ..Assumptions::default()
    };
    let mut sc = Scenario::blank("neutral");
    sc.starting_franchises = 8;

    let r = calc_scenario(&a, &sc, 0);
    for row in &r.rows {
        assert_eq!(row.tax_expense, 0.0);
        assert_eq!(row.net_income, row.operating_profit);
        assert_eq!(row.rev_material_markup, 0.0);
        assert!((row.system_gmv - 8.0 * a.gmv_per_franchise_monthly).abs() < 1e-6);
    }
}
