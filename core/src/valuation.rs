//! Sale-year EBITDA projection for valuation multiples.
//!
//! Continues the book past the modeled horizon with NO new sales:
//! pure churn plus fully-ramped recurring revenue. Cohort ages are
//! deliberately not carried forward — every surviving unit is assumed
//! at steady-state GMV, a simplification that holds because the model
//! horizon is much longer than the GMV ramp.
//!
//! Valuation multiples conventionally apply to trailing-twelve-month
//! EBITDA at the sale date, so only the final 12 projected months are
//! summed — never the whole projected period.

use crate::{
    churn::annual_to_monthly,
    config::Assumptions,
    engine::MonthRow,
    overhead::monthly_overhead,
    seasonality::season_factor,
    types::{Money, Year},
};
use serde::{Deserialize, Serialize};

/// Trailing-12-month pre-tax operating profit at the end of
/// `sale_year`, projected from the model's final month.
///
/// Returns 0 when `sale_year` is at or before `model_end_year`; the
/// caller should read the modeled year's profit directly instead.
pub fn project_sale_year_ebitda(
    a: &Assumptions,
    last_row: &MonthRow,
    model_end_year: Year,
    sale_year: Year,
) -> Money {
    if sale_year <= model_end_year {
        return 0.0;
    }

    let mut active_franchises = last_row.active_franchises;
    let mut active_jv = last_row.active_jv;
    let mut active_tier1 = last_row.active_tier1;
    let mut active_tier2 = last_row.active_tier2;

    let m_churn_f = annual_to_monthly(a.churn_rate_franchise);
    let m_churn_jv = annual_to_monthly(a.churn_rate_jv);
    let m_churn_t1 = annual_to_monthly(a.churn_rate_tier1);
    let m_churn_t2 = annual_to_monthly(a.churn_rate_tier2);

    let extra_months = (sale_year - model_end_year) as usize * 12;
    let mut monthly_profits = Vec::with_capacity(extra_months);

    for m in 0..extra_months {
        // Pure churn, no new sales
        active_franchises = apply_churn(active_franchises, m_churn_f);
        active_jv = apply_churn(active_jv, m_churn_jv);
        active_tier1 = apply_churn(active_tier1, m_churn_t1);
        active_tier2 = apply_churn(active_tier2, m_churn_t2);

        // The model ends in December, so projected month 0 is January.
        let season = season_factor(m % 12, a.seasonality_enabled);

        let franchise_gmv = f64::from(active_franchises) * a.gmv_per_franchise_monthly * season;
        let jv_gmv = f64::from(active_jv) * a.gmv_per_jv_monthly * season;
        let system_gmv = franchise_gmv + jv_gmv;

        // Recurring revenue only — no franchise fees without sales
        let rev_membership = f64::from(active_tier1) * a.tier1_price
            + f64::from(active_tier2) * a.tier2_price
            + f64::from(active_jv) * a.jv_price
            + f64::from(active_franchises) * a.franchise_membership_price;
        let rev_royalties = system_gmv * a.royalty_rate;
        let rev_platform_fees = system_gmv * a.platform_fee_rate;
        // Materials at full adoption this far past program start
        let rev_material_markup =
            system_gmv * a.material_pct_of_gmv * a.material_adoption_rate * a.material_markup;
        let total_revenue = rev_membership + rev_royalties + rev_platform_fees + rev_material_markup;

        // Overhead only — no commissions without sales
        let cost_overhead =
            monthly_overhead(a, active_franchises, active_jv, active_tier1, active_tier2);

        monthly_profits.push(total_revenue - cost_overhead);
    }

    let start = monthly_profits.len().saturating_sub(12);
    monthly_profits[start..].iter().sum()
}

fn apply_churn(active: u32, monthly_rate: f64) -> u32 {
    let churned = (f64::from(active) * monthly_rate).floor() as u32;
    active.saturating_sub(churned)
}

/// Valuation bands around a chosen EBITDA multiple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationBands {
    pub conservative: Money,
    pub average: Money,
    pub high: Money,
}

impl ValuationBands {
    /// Conservative / average / high figures at one multiple either
    /// side of the chosen one.
    pub fn from_multiple(ebitda: Money, multiple: f64) -> Self {
        Self {
            conservative: ebitda * (multiple - 1.0),
            average: ebitda * multiple,
            high: ebitda * (multiple + 1.0),
        }
    }
}
