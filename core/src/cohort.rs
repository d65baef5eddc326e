//! Cohort age tracking for revenue ramp.
//!
//! Each active franchise or JV unit carries its age in months since
//! sale. Age drives the GMV ramp (linear to full over gmv_ramp_months)
//! and the materials-program adoption ramp, so two units sold in
//! different months ramp independently.
//!
//! Churn removes a random entry, chosen through the scenario RNG, so
//! repeated recomputation never biases removal toward the oldest or
//! newest unit.

use crate::rng::ScenarioRng;

/// Ages in months of every active unit of one type.
#[derive(Debug, Clone)]
pub struct CohortTracker {
    ages: Vec<u32>,
}

impl CohortTracker {
    /// Start with fully-ramped existing units: their age is set past
    /// the ramp horizon so they carry steady-state GMV from month 0.
    pub fn fully_ramped(count: u32, gmv_ramp_months: f64) -> Self {
        let ramped_age = gmv_ramp_months as u32 + 1;
        Self {
            ages: vec![ramped_age; count as usize],
        }
    }

    /// One month transition, in the fixed order: age everyone, add the
    /// month's new sales at age 1, then drop one random entry per
    /// churned unit (stopping early if the cohort empties).
    pub fn advance(&mut self, new_sales: u32, churned: u32, rng: &mut ScenarioRng) {
        for age in &mut self.ages {
            *age += 1;
        }
        for _ in 0..new_sales {
            self.ages.push(1);
        }
        for _ in 0..churned {
            if self.ages.is_empty() {
                break;
            }
            let idx = rng.index_below(self.ages.len());
            self.ages.remove(idx);
        }
    }

    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }
}

/// Fraction of steady-state GMV a unit of this age has reached.
pub fn ramp_factor(age: u32, gmv_ramp_months: f64) -> f64 {
    (f64::from(age) / gmv_ramp_months.max(1.0)).min(1.0)
}
