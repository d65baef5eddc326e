//! Churn rate conversion.
//!
//! RULE: Churn rates are stored as ANNUAL rates everywhere in the
//! model. The annual-to-monthly conversion lives here and nowhere
//! else. Old save files that stored monthly rates are converted at
//! the import boundary (state.rs), never inside the engine.

/// Convert an annual churn rate to the equivalent monthly rate with
/// proper compounding: `monthly = 1 - (1 - annual)^(1/12)`.
///
/// 5% annual is ~0.427% monthly, NOT 0.417% (simple division by 12).
/// Applying the monthly rate for 12 consecutive months reproduces the
/// annual rate exactly.
pub fn annual_to_monthly(annual: f64) -> f64 {
    if annual <= 0.0 {
        return 0.0;
    }
    if annual >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - annual).powf(1.0 / 12.0)
}

/// Inverse conversion: `annual = 1 - (1 - monthly)^12`.
/// Used by the save-file migration for legacy monthly rates.
pub fn monthly_to_annual(monthly: f64) -> f64 {
    if monthly <= 0.0 {
        return 0.0;
    }
    if monthly >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - monthly).powi(12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_percent_annual_compounds_not_divides() {
        let monthly = annual_to_monthly(0.05);
        assert!((monthly - 0.004265).abs() < 1e-4, "got {monthly}");
        // Distinct from naive division
        assert!((monthly - 0.05 / 12.0).abs() > 1e-5);
    }

    #[test]
    fn boundaries_clamp() {
        assert_eq!(annual_to_monthly(0.0), 0.0);
        assert_eq!(annual_to_monthly(-0.3), 0.0);
        assert_eq!(annual_to_monthly(1.0), 1.0);
        assert_eq!(annual_to_monthly(2.0), 1.0);
    }
}
