use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of aggregate geographic/administrative data for a city, plus
/// placeholder health-evaluation counters. Evaluation fields stay at their
/// defaults until the evaluation backend is integrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Municipality {
    pub code: String,
    pub name: String,
    pub region_code: String,
    pub region_name: String,
    pub state: String,
    pub area_km2: f64,
    #[serde(default)]
    pub total_evaluations: u32,
    #[serde(default)]
    pub completed_evaluations: u32,
    #[serde(default)]
    pub pending_evaluations: u32,
    #[serde(default)]
    pub avg_score: f64,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl Municipality {
    /// Invariant: completed + pending never exceed the total.
    pub fn has_consistent_counters(&self) -> bool {
        self.completed_evaluations + self.pending_evaluations <= self.total_evaluations
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub cpf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub cpf: String,
    pub password: String,
}
