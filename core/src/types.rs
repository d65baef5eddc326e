//! Shared primitive types used across the entire model.

/// Zero-based index into the modeled horizon. Month 0 is the first
/// modeled calendar month.
pub type MonthIndex = usize;

/// Dollar amounts. The model works in plain f64 dollars; formatting
/// belongs to the display layer.
pub type Money = f64;

/// A calendar year (e.g. 2026).
pub type Year = i32;
