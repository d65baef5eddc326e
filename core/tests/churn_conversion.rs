//! Annual/monthly churn conversion properties.

use franchise_core::churn::{annual_to_monthly, monthly_to_annual};

/// Compounding the monthly rate for 12 months must reconstruct the
/// annual rate, across the whole open interval [0, 1).
#[test]
fn round_trip_reconstructs_annual_rate() {
    for i in 0..100 {
        let annual = i as f64 / 100.0;
        let monthly = annual_to_monthly(annual);
        let rebuilt = 1.0 - (1.0 - monthly).powi(12);
        assert!(
            (rebuilt - annual).abs() < 1e-12,
            "annual={annual} monthly={monthly} rebuilt={rebuilt}"
        );
    }
}

#[test]
fn migration_inverse_matches() {
    for &monthly in &[0.001, 0.0043, 0.0087, 0.017, 0.03] {
        let annual = monthly_to_annual(monthly);
        assert!((annual_to_monthly(annual) - monthly).abs() < 1e-12);
    }
}

/// 5% annual is ~0.426% monthly — visibly different from the naive
/// 0.417% that simple division by 12 would give.
#[test]
fn compounding_beats_naive_division() {
    let monthly = annual_to_monthly(0.05);
    assert!((monthly - 0.00426).abs() < 5e-5, "got {monthly}");
    let naive = 0.05 / 12.0;
    assert!(monthly > naive);
}

#[test]
fn degenerate_rates_clamp() {
    assert_eq!(annual_to_monthly(0.0), 0.0);
    assert_eq!(annual_to_monthly(-1.0), 0.0);
    assert_eq!(annual_to_monthly(1.0), 1.0);
    assert_eq!(annual_to_monthly(1.5), 1.0);
    assert_eq!(monthly_to_annual(0.0), 0.0);
    assert_eq!(monthly_to_annual(1.0), 1.0);
}
