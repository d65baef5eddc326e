//! Seasonal GMV weights.
//!
//! Fencing is a seasonal trade: installs peak May-Jul and trough
//! Dec-Feb. The raw curve below is normalized so the 12 weights
//! average exactly 1.0, which means any full calendar year of GMV
//! sums to the same total with seasonality on or off — only the
//! intra-year shape changes.

/// Raw seasonal demand curve, January through December.
const SEASONAL_RAW: [f64; 12] = [
    0.50, 0.55, 0.85, 1.15, 1.40, 1.50, 1.45, 1.30, 1.10, 0.80, 0.55, 0.40,
];

/// Sum of the raw curve, folded at compile time so the per-month
/// lookup is a plain index.
const SEASONAL_SUM: f64 = SEASONAL_RAW[0]
    + SEASONAL_RAW[1]
    + SEASONAL_RAW[2]
    + SEASONAL_RAW[3]
    + SEASONAL_RAW[4]
    + SEASONAL_RAW[5]
    + SEASONAL_RAW[6]
    + SEASONAL_RAW[7]
    + SEASONAL_RAW[8]
    + SEASONAL_RAW[9]
    + SEASONAL_RAW[10]
    + SEASONAL_RAW[11];

/// Normalized weight for a calendar month (0 = January).
/// Indices outside 0..12 are reduced modulo 12.
pub fn weight(calendar_month: usize) -> f64 {
    SEASONAL_RAW[calendar_month % 12] * 12.0 / SEASONAL_SUM
}

/// Seasonal multiplier for a month, honoring the assumption toggle.
pub fn season_factor(calendar_month: usize, enabled: bool) -> f64 {
    if enabled {
        weight(calendar_month)
    } else {
        1.0
    }
}
