//! Pure display-state for the dashboard: summary counters recomputed
//! wholesale from the store, trend classification, and the stepped counter
//! interpolation the presentation layer plays back. No DOM, no timers here;
//! the periodic refresh tick just calls `DashboardSummary::compute` again.

use crate::core::store::MunicipalStore;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub municipality_count: usize,
    pub state_count: usize,
    pub total_evaluations: u64,
    pub completed_evaluations: u64,
    pub pending_evaluations: u64,
    pub completion_rate_percent: f64,
    pub total_area_km2: f64,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSummary {
    /// Full recompute from current store state. Idempotent, so a
    /// fire-and-forget refresh timer can call it on every tick without
    /// accumulating anything.
    pub fn compute(store: &MunicipalStore) -> Self {
        let mut states: HashSet<&str> = HashSet::new();
        let mut total_evaluations: u64 = 0;
        let mut completed_evaluations: u64 = 0;
        let mut pending_evaluations: u64 = 0;
        let mut total_area_km2 = 0.0;

        for record in store.records() {
            if !record.state.is_empty() {
                states.insert(record.state.as_str());
            }
            total_evaluations += u64::from(record.total_evaluations);
            completed_evaluations += u64::from(record.completed_evaluations);
            pending_evaluations += u64::from(record.pending_evaluations);
            total_area_km2 += record.area_km2;
        }

        let completion_rate_percent = if total_evaluations > 0 {
            completed_evaluations as f64 / total_evaluations as f64 * 100.0
        } else {
            0.0
        };

        Self {
            municipality_count: store.len(),
            state_count: states.len(),
            total_evaluations,
            completed_evaluations,
            pending_evaluations,
            completion_rate_percent,
            total_area_km2,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Positive,
    Negative,
    Neutral,
}

/// A signed percentage delta between two refresh ticks, classified for
/// display styling.
#[derive(Debug, Clone, Copy)]
pub struct Trend {
    pub delta_percent: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn from_percent(delta_percent: f64) -> Self {
        let direction = if delta_percent > 0.0 {
            TrendDirection::Positive
        } else if delta_percent < 0.0 {
            TrendDirection::Negative
        } else {
            TrendDirection::Neutral
        };

        Self {
            delta_percent,
            direction,
        }
    }

    /// Display label: positive deltas carry an explicit plus sign.
    pub fn label(&self) -> String {
        if self.delta_percent > 0.0 {
            format!("+{:.1}%", self.delta_percent)
        } else {
            format!("{:.1}%", self.delta_percent)
        }
    }
}

/// Linear stepped interpolation between two displayed values. The
/// presentation layer renders `value_at(0..=steps)` one frame at a time;
/// the final step always lands exactly on the target.
#[derive(Debug, Clone, Copy)]
pub struct CounterTween {
    from: i64,
    to: i64,
    steps: u32,
}

impl CounterTween {
    pub fn new(from: i64, to: i64, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn value_at(&self, step: u32) -> i64 {
        if step >= self.steps {
            return self.to;
        }

        let progress = f64::from(step) / f64::from(self.steps);
        (self.from as f64 + (self.to - self.from) as f64 * progress).round() as i64
    }
}
