//! franchise-core — deterministic franchise P&L forecasting.
//!
//! The whole model is a pure function: (Assumptions, Scenario) in,
//! month rows + year rollups + break-even out. The UI layer owns all
//! mutable state and re-invokes the engine on every edit.
//!
//! RULES:
//!   - Nothing in the model may call any platform RNG or clock.
//!     All randomness flows through ScenarioRng, seeded per scenario.
//!   - Churn rates are stored ANNUAL everywhere. Conversion to monthly
//!     happens in exactly one place (churn.rs).
//!   - Identical inputs must produce bit-identical output rows.

pub mod churn;
pub mod cohort;
pub mod config;
pub mod engine;
pub mod error;
pub mod overhead;
pub mod rng;
pub mod seasonality;
pub mod state;
pub mod types;
pub mod valuation;
