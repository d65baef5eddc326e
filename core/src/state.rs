//! Save-file boundary: JSON round-trip and schema migration.
//!
//! RULE: Only this module inspects raw JSON. The engine always
//! receives a fully migrated AppState — missing assumption fields
//! backfilled with defaults, legacy monthly churn rates converted to
//! the current annual representation.
//!
//! Legacy detection heuristic (preserved from the original format,
//! threshold included): if every churn value PRESENT in the file is
//! non-zero and below 0.04, the file predates the annual-rate schema
//! and each present value is converted via annual = 1-(1-monthly)^12.
//! A file with deliberately low annual rates (e.g. 3% across the
//! board) is misclassified by this rule; that is a known limitation
//! carried for compatibility, not something to widen or "fix".

use crate::{
    churn::monthly_to_annual,
    config::AppState,
    error::{ModelError, ModelResult},
};
use serde_json::Value;

/// Churn fields subject to the legacy-rate migration, by their wire
/// names.
const CHURN_FIELDS: [&str; 4] = [
    "churnRateTier1",
    "churnRateTier2",
    "churnRateJV",
    "churnRateFranchise",
];

/// Threshold below which a full set of present churn values is taken
/// to be monthly rather than annual.
const LEGACY_MONTHLY_THRESHOLD: f64 = 0.04;

/// Parse and migrate a saved state blob.
pub fn load_state(json: &str) -> ModelResult<AppState> {
    let value: Value = serde_json::from_str(json)?;
    migrate_state(value)
}

/// Serialize the state for save/export.
pub fn export_state(state: &AppState) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Migrate a raw JSON state into the current schema.
///
/// Shape check first: both top-level keys must be present, otherwise
/// the blob is rejected before anything reaches the engine. Field
/// backfill is handled by the serde defaults on Assumptions; the
/// churn-rate conversion needs the raw values and happens here.
pub fn migrate_state(value: Value) -> ModelResult<AppState> {
    let obj = value.as_object().ok_or_else(|| ModelError::InvalidState {
        reason: "state is not a JSON object".to_string(),
    })?;
    if !obj.contains_key("assumptions") || !obj.contains_key("scenarios") {
        return Err(ModelError::InvalidState {
            reason: "missing required keys: assumptions, scenarios".to_string(),
        });
    }

    // Raw churn values actually present in the file (zeroes excluded,
    // matching the legacy loader's falsy filter).
    let raw_churns: Vec<(&str, f64)> = CHURN_FIELDS
        .iter()
        .filter_map(|&field| {
            let v = obj.get("assumptions")?.get(field)?.as_f64()?;
            (v != 0.0).then_some((field, v))
        })
        .collect();

    let mut state: AppState = serde_json::from_value(value)?;

    let all_monthly = !raw_churns.is_empty()
        && raw_churns.iter().all(|(_, v)| *v < LEGACY_MONTHLY_THRESHOLD);
    if all_monthly {
        log::info!(
            "legacy save detected: converting {} monthly churn rate(s) to annual",
            raw_churns.len()
        );
        for (field, monthly) in raw_churns {
            let annual = monthly_to_annual(monthly);
            let a = &mut state.assumptions;
            match field {
                "churnRateTier1" => a.churn_rate_tier1 = annual,
                "churnRateTier2" => a.churn_rate_tier2 = annual,
                "churnRateJV" => a.churn_rate_jv = annual,
                "churnRateFranchise" => a.churn_rate_franchise = annual,
                _ => unreachable!("unknown churn field {field}"),
            }
        }
    }

    Ok(state)
}
