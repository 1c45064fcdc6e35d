use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::lenient;

pub const MIN_EXPECTATION: f64 = 0.0;
pub const MAX_EXPECTATION: f64 = 100.0;

/// What the user expects before trying something out. Scores are 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentPlan {
    pub id: String,
    pub scheduled_date_time: String,
    pub planned_action: String,
    pub expected_troubles: String,
    #[serde(deserialize_with = "lenient::number")]
    pub expected_joy: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub expected_achievement: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub success_probability: f64,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// What actually happened, scored on the same 0-100 scale as the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentResult {
    pub id: String,
    pub plan_id: String,
    pub actual_date_time: String,
    pub actual_action: String,
    pub result: String,
    pub learnings: String,
    #[serde(deserialize_with = "lenient::number")]
    pub actual_joy: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub actual_achievement: f64,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorExperiment {
    pub plan: ExperimentPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ExperimentResult>,
}

impl BehaviorExperiment {
    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn joy_comparison(&self) -> Option<Comparison> {
        self.result
            .as_ref()
            .map(|r| comparison(self.plan.expected_joy, r.actual_joy))
    }

    pub fn achievement_comparison(&self) -> Option<Comparison> {
        self.result
            .as_ref()
            .map(|r| comparison(self.plan.expected_achievement, r.actual_achievement))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Better,
    Worse,
    AsExpected,
}

/// Actual minus expected. Displays as `+N点`, `-N点` or `±0点`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub difference: f64,
    pub outcome: Outcome,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Better => write!(f, "+{}点", self.difference),
            Outcome::Worse => write!(f, "{}点", self.difference),
            Outcome::AsExpected => write!(f, "±0点"),
        }
    }
}

pub fn comparison(expected: f64, actual: f64) -> Comparison {
    let difference = actual - expected;
    if difference > 0.0 {
        Comparison {
            difference,
            outcome: Outcome::Better,
        }
    } else if difference < 0.0 {
        Comparison {
            difference,
            outcome: Outcome::Worse,
        }
    } else {
        // NaN lands here too.
        Comparison {
            difference: 0.0,
            outcome: Outcome::AsExpected,
        }
    }
}

/// Share of experiments with a recorded result, as a whole percentage.
pub fn completion_rate(experiments: &[BehaviorExperiment]) -> u32 {
    if experiments.is_empty() {
        return 0;
    }
    let completed = experiments.iter().filter(|e| e.is_completed()).count();
    let percent = completed as f64 / experiments.len() as f64 * 100.0;
    (percent + 0.5).floor() as u32
}
