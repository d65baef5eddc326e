//! Overhead cost model — sublinear load scaling.
//!
//! Each salary unit supports a capped number of franchises/JVs, Tier 1
//! members, or Tier 2 members. We compute the load units needed, then
//! apply a power curve (exponent < 1) so doubling client load does not
//! double staffing cost. The monthly floor covers fixed costs (rent,
//! insurance) independent of client count.
//!
//! Formula: overhead = floor + salary_unit * load_units^exponent

use crate::config::Assumptions;
use crate::types::Money;

/// Monthly overhead for the given active counts.
pub fn monthly_overhead(
    a: &Assumptions,
    franchises: u32,
    jv: u32,
    tier1: u32,
    tier2: u32,
) -> Money {
    // Caps floored at 1 so a zeroed cap cannot divide by zero.
    let load_fran_jv = f64::from(franchises + jv) / a.overhead_cap_franchise_jv.max(1.0);
    let load_t1 = f64::from(tier1) / a.overhead_cap_tier1.max(1.0);
    let load_t2 = f64::from(tier2) / a.overhead_cap_tier2.max(1.0);
    let raw_units = load_fran_jv + load_t1 + load_t2;
    let scaled_units = if raw_units > 0.0 {
        raw_units.powf(a.overhead_scale_exponent)
    } else {
        0.0
    };
    a.overhead_monthly + a.overhead_salary_unit * scaled_units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_load_is_just_the_floor() {
        let a = Assumptions::default();
        assert_eq!(monthly_overhead(&a, 0, 0, 0, 0), a.overhead_monthly);
    }

    #[test]
    fn zeroed_caps_do_not_divide_by_zero() {
        let a = Assumptions {
            overhead_cap_franchise_jv: 0.0,
            overhead_cap_tier1: 0.0,
            overhead_cap_tier2: 0.0,
            ..Assumptions::default()
        };
        let cost = monthly_overhead(&a, 10, 2, 30, 15);
        assert!(cost.is_finite() && cost > a.overhead_monthly);
    }
}
