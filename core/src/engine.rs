//! The scenario calculation engine — the heart of the model.
//!
//! One call = one full month-by-month pass over a scenario's sales
//! pipeline, producing a MonthRow per horizon month, YearSummary
//! rollups per 12-month block, and whole-horizon totals.
//!
//! RULES:
//!   - The engine mutates only its own run-local state. Nothing is
//!     shared between scenario runs; scenarios may be computed in any
//!     order or in parallel.
//!   - All randomness comes from the per-scenario ScenarioRng.
//!   - Identical (assumptions, scenario, index) inputs produce
//!     bit-identical rows.
//!
//! MONTH TRANSITION ORDER (fixed, never reordered):
//!   churn counts -> active counts -> cohorts (franchise, then JV) ->
//!   seasonal GMV -> revenue -> costs -> tax -> cumulative sums.

use crate::{
    churn::annual_to_monthly,
    cohort::{ramp_factor, CohortTracker},
    config::{month_label, Assumptions, Scenario, MODEL_START_YEAR},
    overhead::monthly_overhead,
    rng::ScenarioRng,
    seasonality::season_factor,
    types::{Money, MonthIndex, Year},
};
use serde::{Deserialize, Serialize};

// ── Output types ─────────────────────────────────────────────────────────────

/// One simulated month. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    pub month: String,
    pub month_idx: MonthIndex,
    // New sales this month
    pub new_franchises: u32,
    pub new_tier1: u32,
    pub new_tier2: u32,
    #[serde(rename = "newJV")]
    pub new_jv: u32,
    // Active book after churn and additions
    pub active_tier1: u32,
    pub active_tier2: u32,
    #[serde(rename = "activeJV")]
    pub active_jv: u32,
    pub active_franchises: u32,
    pub active_members: u32,
    // GMV
    #[serde(rename = "franchiseGMV")]
    pub franchise_gmv: Money,
    #[serde(rename = "jvGMV")]
    pub jv_gmv: Money,
    #[serde(rename = "systemGMV")]
    pub system_gmv: Money,
    // Revenue
    pub rev_franchise_fees: Money,
    pub rev_tier1: Money,
    pub rev_tier2: Money,
    #[serde(rename = "revJV")]
    pub rev_jv: Money,
    pub rev_franchise_dues: Money,
    pub rev_membership: Money,
    pub rev_head_office: Money,
    pub rev_royalties: Money,
    pub rev_platform_fees: Money,
    pub material_volume: Money,
    pub rev_material_markup: Money,
    pub total_revenue: Money,
    // Costs
    pub cost_commissions: Money,
    pub cost_overhead: Money,
    pub total_cost: Money,
    // Bottom line
    pub operating_profit: Money,
    pub tax_expense: Money,
    pub net_income: Money,
    // Running totals
    pub cum_profit: Money,
    pub cum_revenue: Money,
    pub cum_net_income: Money,
}

/// Rollup of one 12-month block (the final block may be short).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: Year,
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    pub tax: Money,
    pub net_income: Money,
    pub franchise_fees: Money,
    pub membership: Money,
    pub royalties: Money,
    pub platform_fees: Money,
    pub material_markup: Money,
    pub commissions: Money,
    pub overhead: Money,
    pub end_members: u32,
    #[serde(rename = "endJV")]
    pub end_jv: u32,
    pub end_franchises: u32,
    pub gmv: Money,
}

/// Everything one engine run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub rows: Vec<MonthRow>,
    pub years: Vec<YearSummary>,
    pub total_revenue: Money,
    pub total_profit: Money,
    pub last_row: Option<MonthRow>,
    /// First month with strictly positive cumulative operating
    /// profit, or None if the horizon never breaks even.
    pub break_even_month: Option<MonthIndex>,
}

// ── Engine ───────────────────────────────────────────────────────────────────

struct ScenarioEngine<'a> {
    a: &'a Assumptions,
    rng: ScenarioRng,
    // Monthly-converted churn rates, constant for the run
    m_churn_tier1: f64,
    m_churn_tier2: f64,
    m_churn_jv: f64,
    m_churn_franchise: f64,
    // Active book
    active_tier1: u32,
    active_tier2: u32,
    active_jv: u32,
    active_franchises: u32,
    franchise_cohort: CohortTracker,
    jv_cohort: CohortTracker,
}

impl<'a> ScenarioEngine<'a> {
    fn new(a: &'a Assumptions, sc: &Scenario, scenario_index: usize) -> Self {
        Self {
            a,
            rng: ScenarioRng::for_scenario(scenario_index),
            m_churn_tier1: annual_to_monthly(a.churn_rate_tier1),
            m_churn_tier2: annual_to_monthly(a.churn_rate_tier2),
            m_churn_jv: annual_to_monthly(a.churn_rate_jv),
            m_churn_franchise: annual_to_monthly(a.churn_rate_franchise),
            active_tier1: sc.starting_tier1,
            active_tier2: sc.starting_tier2,
            active_jv: sc.starting_jv,
            active_franchises: sc.starting_franchises,
            // Starting units are existing businesses, already at
            // steady-state GMV.
            franchise_cohort: CohortTracker::fully_ramped(
                sc.starting_franchises,
                a.gmv_ramp_months,
            ),
            jv_cohort: CohortTracker::fully_ramped(sc.starting_jv, a.gmv_ramp_months),
        }
    }

    /// Churned count: floor of active times the monthly rate. Never
    /// rounds up, so churn can never exceed the active count.
    fn churned(active: u32, monthly_rate: f64) -> u32 {
        (f64::from(active) * monthly_rate).floor() as u32
    }

    fn step_month(&mut self, i: MonthIndex, new_f: u32, new_t1: u32, new_t2: u32, new_jv: u32) -> MonthRow {
        let a = self.a;

        let churned_t1 = Self::churned(self.active_tier1, self.m_churn_tier1);
        let churned_t2 = Self::churned(self.active_tier2, self.m_churn_tier2);
        let churned_jv = Self::churned(self.active_jv, self.m_churn_jv);
        let churned_f = Self::churned(self.active_franchises, self.m_churn_franchise);

        // Clamped at zero; floor-of-active already guarantees no
        // underflow, the saturation is belt-and-braces.
        self.active_tier1 = self.active_tier1.saturating_sub(churned_t1) + new_t1;
        self.active_tier2 = self.active_tier2.saturating_sub(churned_t2) + new_t2;
        self.active_jv = self.active_jv.saturating_sub(churned_jv) + new_jv;
        self.active_franchises = self.active_franchises.saturating_sub(churned_f) + new_f;

        // Franchise cohort first, then JV — the RNG draw order is part
        // of the deterministic contract.
        self.franchise_cohort.advance(new_f, churned_f, &mut self.rng);
        self.jv_cohort.advance(new_jv, churned_jv, &mut self.rng);

        let season = season_factor(i % 12, a.seasonality_enabled);

        // GMV with per-unit ramp and seasonality
        let franchise_gmv: Money = self
            .franchise_cohort
            .ages()
            .iter()
            .map(|&age| a.gmv_per_franchise_monthly * ramp_factor(age, a.gmv_ramp_months) * season)
            .sum();
        let jv_gmv: Money = self
            .jv_cohort
            .ages()
            .iter()
            .map(|&age| a.gmv_per_jv_monthly * ramp_factor(age, a.gmv_ramp_months) * season)
            .sum();
        let system_gmv = franchise_gmv + jv_gmv;

        // Revenue
        let rev_franchise_fees = f64::from(new_f) * a.franchise_fee;
        let rev_tier1 = f64::from(self.active_tier1) * a.tier1_price;
        let rev_tier2 = f64::from(self.active_tier2) * a.tier2_price;
        let rev_jv = f64::from(self.active_jv) * a.jv_price;
        let rev_franchise_dues = f64::from(self.active_franchises) * a.franchise_membership_price;
        let rev_membership = rev_tier1 + rev_tier2 + rev_jv + rev_franchise_dues;
        let rev_head_office = rev_franchise_fees + rev_membership;
        let rev_royalties = system_gmv * a.royalty_rate;
        let rev_platform_fees = system_gmv * a.platform_fee_rate;

        // Materials: zero before program start; after it, each
        // location ramps its adoption from its own entry into the
        // program (capped by how long the program has existed).
        let mut material_gmv = 0.0;
        if i >= a.material_start_month {
            let program_months = (i - a.material_start_month + 1) as f64;
            let mut accumulate = |ages: &[u32], gmv_per_unit: f64| {
                for &age in ages {
                    let loc_months_in_program = f64::from(age).min(program_months);
                    let adoption = (loc_months_in_program / a.material_ramp_months.max(1.0))
                        .min(1.0)
                        * a.material_adoption_rate;
                    material_gmv +=
                        gmv_per_unit * ramp_factor(age, a.gmv_ramp_months) * adoption * season;
                }
            };
            accumulate(self.franchise_cohort.ages(), a.gmv_per_franchise_monthly);
            accumulate(self.jv_cohort.ages(), a.gmv_per_jv_monthly);
        }
        let material_volume = material_gmv * a.material_pct_of_gmv;
        let rev_material_markup = material_volume * a.material_markup;

        let total_revenue =
            rev_head_office + rev_royalties + rev_platform_fees + rev_material_markup;

        // Costs
        let cost_commissions = f64::from(new_f) * a.commission_per_franchise
            + f64::from(new_t1) * a.commission_per_tier1
            + f64::from(new_t2) * a.commission_per_tier2
            + f64::from(new_jv) * a.commission_per_jv;
        let cost_overhead = monthly_overhead(
            a,
            self.active_franchises,
            self.active_jv,
            self.active_tier1,
            self.active_tier2,
        );
        let total_cost = cost_commissions + cost_overhead;

        let operating_profit = total_revenue - total_cost;
        // Tax only on positive income; no loss carry-forward.
        let tax_expense = (operating_profit * a.effective_tax_rate).max(0.0);
        let net_income = operating_profit - tax_expense;

        MonthRow {
            month: month_label(i),
            month_idx: i,
            new_franchises: new_f,
            new_tier1: new_t1,
            new_tier2: new_t2,
            new_jv,
            active_tier1: self.active_tier1,
            active_tier2: self.active_tier2,
            active_jv: self.active_jv,
            active_franchises: self.active_franchises,
            active_members: self.active_tier1 + self.active_tier2,
            franchise_gmv,
            jv_gmv,
            system_gmv,
            rev_franchise_fees,
            rev_tier1,
            rev_tier2,
            rev_jv,
            rev_franchise_dues,
            rev_membership,
            rev_head_office,
            rev_royalties,
            rev_platform_fees,
            material_volume,
            rev_material_markup,
            total_revenue,
            cost_commissions,
            cost_overhead,
            total_cost,
            operating_profit,
            tax_expense,
            net_income,
            // Filled in after the loop
            cum_profit: 0.0,
            cum_revenue: 0.0,
            cum_net_income: 0.0,
        }
    }
}

/// Run one scenario end to end. `scenario_index` is the scenario's
/// stable position in the scenario list; it seeds the churn-selection
/// RNG so sibling scenarios get distinct streams.
pub fn calc_scenario(a: &Assumptions, sc: &Scenario, scenario_index: usize) -> ScenarioResult {
    let mut engine = ScenarioEngine::new(a, sc, scenario_index);

    let mut rows: Vec<MonthRow> = sc
        .months
        .iter()
        .enumerate()
        .map(|(i, m)| engine.step_month(i, m.franchises, m.tier1, m.tier2, m.jv))
        .collect();

    let mut cum_profit = 0.0;
    let mut cum_revenue = 0.0;
    let mut cum_net_income = 0.0;
    for row in &mut rows {
        cum_profit += row.operating_profit;
        cum_revenue += row.total_revenue;
        cum_net_income += row.net_income;
        row.cum_profit = cum_profit;
        row.cum_revenue = cum_revenue;
        row.cum_net_income = cum_net_income;
    }

    let years = aggregate_years(&rows);
    let total_revenue = cum_revenue;
    let total_profit = cum_profit;
    let break_even_month = rows.iter().position(|r| r.cum_profit > 0.0);
    let last_row = rows.last().cloned();

    log::debug!(
        "scenario '{}': {} months, total_revenue={total_revenue:.0}, break_even={break_even_month:?}",
        sc.name,
        rows.len(),
    );

    ScenarioResult {
        rows,
        years,
        total_revenue,
        total_profit,
        last_row,
        break_even_month,
    }
}

/// Roll rows up into consecutive 12-month blocks. The horizon is not
/// guaranteed to be a multiple of 12; the last block takes whatever
/// months remain.
fn aggregate_years(rows: &[MonthRow]) -> Vec<YearSummary> {
    rows.chunks(12)
        .enumerate()
        .filter_map(|(y, slice)| {
            let last = slice.last()?;
            Some(YearSummary {
                year: MODEL_START_YEAR + y as Year,
                revenue: slice.iter().map(|r| r.total_revenue).sum(),
                cost: slice.iter().map(|r| r.total_cost).sum(),
                profit: slice.iter().map(|r| r.operating_profit).sum(),
                tax: slice.iter().map(|r| r.tax_expense).sum(),
                net_income: slice.iter().map(|r| r.net_income).sum(),
                franchise_fees: slice.iter().map(|r| r.rev_franchise_fees).sum(),
                membership: slice.iter().map(|r| r.rev_membership).sum(),
                royalties: slice.iter().map(|r| r.rev_royalties).sum(),
                platform_fees: slice.iter().map(|r| r.rev_platform_fees).sum(),
                material_markup: slice.iter().map(|r| r.rev_material_markup).sum(),
                commissions: slice.iter().map(|r| r.cost_commissions).sum(),
                overhead: slice.iter().map(|r| r.cost_overhead).sum(),
                end_members: last.active_tier1 + last.active_tier2,
                end_jv: last.active_jv,
                end_franchises: last.active_franchises,
                gmv: slice.iter().map(|r| r.system_gmv).sum(),
            })
        })
        .collect()
}
