//! Model configuration: economic assumptions and growth scenarios.
//!
//! Assumptions are a flat record of knobs, immutable for the duration
//! of one engine run. The Default impl carries the house defaults;
//! serde backfills any field missing from an older save file from the
//! same Default (see state.rs for the full migration path).

use crate::types::{MonthIndex, Year};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Month 0 of every scenario is January of this year.
pub const MODEL_START_YEAR: Year = 2026;

/// Default scenario horizon, in months.
pub const DEFAULT_HORIZON_MONTHS: usize = 60;

/// Horizons extend in whole-year blocks, up to this cap.
pub const MAX_HORIZON_MONTHS: usize = 120;

/// Calendar label for a horizon month, e.g. "Jan-2026".
pub fn month_label(i: MonthIndex) -> String {
    let year = MODEL_START_YEAR + (i / 12) as Year;
    let month = (i % 12) as u32 + 1;
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b-%Y").to_string(),
        None => format!("{month:02}-{year}"),
    }
}

// ── Assumptions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assumptions {
    // Pricing
    pub franchise_fee: f64,
    pub tier1_price: f64,
    pub tier2_price: f64,
    pub jv_price: f64,
    pub franchise_membership_price: f64,
    // Commissions (flat payout per new unit sold)
    pub commission_per_franchise: f64,
    pub commission_per_tier1: f64,
    pub commission_per_tier2: f64,
    #[serde(rename = "commissionPerJV")]
    pub commission_per_jv: f64,
    // Overhead scaling: each salary unit supports so many of each type
    pub overhead_monthly: f64,
    pub overhead_salary_unit: f64,
    #[serde(rename = "overheadCapFranchiseJV")]
    pub overhead_cap_franchise_jv: f64,
    pub overhead_cap_tier1: f64,
    pub overhead_cap_tier2: f64,
    /// < 1 means economies of scale.
    pub overhead_scale_exponent: f64,
    // Revenue sharing on system GMV
    pub royalty_rate: f64,
    pub platform_fee_rate: f64,
    // GMV model
    pub gmv_per_franchise_monthly: f64,
    #[serde(rename = "gmvPerJVMonthly")]
    pub gmv_per_jv_monthly: f64,
    pub gmv_ramp_months: f64,
    // Churn — ANNUAL rates, converted to monthly inside the engine
    pub churn_rate_tier1: f64,
    pub churn_rate_tier2: f64,
    #[serde(rename = "churnRateJV")]
    pub churn_rate_jv: f64,
    pub churn_rate_franchise: f64,
    // Materials program
    pub material_pct_of_gmv: f64,
    pub material_markup: f64,
    /// Zero-based horizon month when material distribution begins.
    pub material_start_month: MonthIndex,
    /// Max fraction of materials purchased through HQ at full adoption.
    pub material_adoption_rate: f64,
    /// Months for a location to ramp to full adoption after the
    /// program starts.
    pub material_ramp_months: f64,
    // Seasonality + tax
    pub seasonality_enabled: bool,
    /// Combined federal + state effective rate, applied only to
    /// positive operating profit.
    pub effective_tax_rate: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            franchise_fee: 40_000.0,
            tier1_price: 1_000.0,
            tier2_price: 2_000.0,
            jv_price: 3_500.0,
            franchise_membership_price: 3_500.0,
            commission_per_franchise: 10_000.0,
            commission_per_tier1: 200.0,
            commission_per_tier2: 500.0,
            commission_per_jv: 500.0,
            overhead_monthly: 25_000.0,
            overhead_salary_unit: 25_000.0,
            overhead_cap_franchise_jv: 5.0,
            overhead_cap_tier1: 15.0,
            overhead_cap_tier2: 12.0,
            overhead_scale_exponent: 0.8,
            royalty_rate: 0.04,
            platform_fee_rate: 0.0033,
            gmv_per_franchise_monthly: 83_333.0,
            gmv_per_jv_monthly: 83_333.0,
            gmv_ramp_months: 4.0,
            churn_rate_tier1: 0.20,
            churn_rate_tier2: 0.10,
            churn_rate_jv: 0.05,
            churn_rate_franchise: 0.05,
            material_pct_of_gmv: 0.40,
            material_markup: 0.10,
            material_start_month: 15, // April 2027
            material_adoption_rate: 0.75,
            material_ramp_months: 4.0,
            seasonality_enabled: true,
            effective_tax_rate: 0.25,
        }
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────────

/// Units newly sold in one horizon month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthSales {
    pub franchises: u32,
    pub tier1: u32,
    pub tier2: u32,
    pub jv: u32,
}

/// A named growth plan: starting book plus a monthly sales pipeline.
/// The color is cosmetic display metadata; the engine ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub starting_tier1: u32,
    pub starting_tier2: u32,
    #[serde(rename = "startingJV")]
    pub starting_jv: u32,
    pub starting_franchises: u32,
    pub months: Vec<MonthSales>,
    #[serde(default)]
    pub color: String,
}

impl Scenario {
    /// An empty plan over the default 60-month horizon.
    pub fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            starting_tier1: 0,
            starting_tier2: 0,
            starting_jv: 0,
            starting_franchises: 0,
            months: vec![MonthSales::default(); DEFAULT_HORIZON_MONTHS],
            color: String::new(),
        }
    }

    /// Horizon length in months.
    pub fn horizon(&self) -> usize {
        self.months.len()
    }

    /// Append one 12-month block of empty sales, up to the cap.
    /// Returns false when already at the maximum horizon.
    pub fn extend_horizon(&mut self) -> bool {
        if self.months.len() >= MAX_HORIZON_MONTHS {
            return false;
        }
        self.months
            .extend(std::iter::repeat(MonthSales::default()).take(12));
        true
    }

    /// The stock "Flat 3yr Steady State" plan: a spring-through-fall
    /// 2026 sales push, then no further sales.
    pub fn flat_steady_state() -> Self {
        let mut sc = Self::blank("Flat 3yr Steady State");
        sc.starting_tier1 = 3;
        sc.starting_tier2 = 1;
        sc.starting_jv = 1;
        sc.color = "#3b82f6".to_string();
        // Apr-Sep 2026: 3 franchises, 4 T1, 2 T2 per month
        for i in 3..=8 {
            sc.months[i] = MonthSales {
                franchises: 3,
                tier1: 4,
                tier2: 2,
                jv: 0,
            };
        }
        sc.months[9] = MonthSales {
            franchises: 1,
            tier1: 3,
            tier2: 1,
            jv: 0,
        };
        sc.months[10] = MonthSales {
            franchises: 1,
            tier1: 3,
            tier2: 0,
            jv: 0,
        };
        sc
    }

    /// The stock "Expansion Plan": the flat plan's pipeline plus a
    /// 20-franchise batch each November of 2027 and 2028.
    pub fn expansion_plan() -> Self {
        let mut sc = Self::flat_steady_state();
        sc.name = "Expansion Plan".to_string();
        sc.starting_tier1 = 5;
        sc.starting_tier2 = 2;
        sc.color = "#10b981".to_string();
        sc.months[22].franchises = 20;
        sc.months[34].franchises = 20;
        sc
    }
}

// ── Application state ────────────────────────────────────────────────────────

/// The whole persisted application state: one assumptions record, the
/// scenario list, and which scenario is selected in the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub assumptions: Assumptions,
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub active_scenario: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            assumptions: Assumptions::default(),
            scenarios: vec![Scenario::flat_steady_state(), Scenario::expansion_plan()],
            active_scenario: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_roll_years() {
        assert_eq!(month_label(0), "Jan-2026");
        assert_eq!(month_label(11), "Dec-2026");
        assert_eq!(month_label(12), "Jan-2027");
        assert_eq!(month_label(59), "Dec-2030");
    }

    #[test]
    fn horizon_extends_in_year_blocks_to_cap() {
        let mut sc = Scenario::blank("t");
        assert_eq!(sc.horizon(), 60);
        while sc.extend_horizon() {}
        assert_eq!(sc.horizon(), MAX_HORIZON_MONTHS);
    }

    #[test]
    fn flat_plan_matches_house_pipeline() {
        let sc = Scenario::flat_steady_state();
        assert_eq!(sc.months[2], MonthSales::default());
        assert_eq!(sc.months[3].franchises, 3);
        assert_eq!(sc.months[8].tier1, 4);
        assert_eq!(sc.months[10].tier2, 0);
        assert_eq!(sc.months[11], MonthSales::default());
    }
}
