use serde::Serialize;
use strum::{Display, EnumIter};

use super::categorize::categorize_with;
use super::classification::{EmotionEntry, FallbackPolicy};

pub const WEIGHT_NEGATIVE_REDUCTION: f64 = 0.6;
pub const WEIGHT_POSITIVE_INCREASE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum ImprovementLevel {
    #[strum(serialize = "大幅な改善")]
    Major,
    #[strum(serialize = "明確な改善")]
    Clear,
    #[strum(serialize = "軽度の改善")]
    Mild,
    #[strum(serialize = "変化なし")]
    NoChange,
    #[strum(serialize = "悪化")]
    Worsened,
}

impl ImprovementLevel {
    pub const MAJOR_THRESHOLD: f64 = 3.0;
    pub const CLEAR_THRESHOLD: f64 = 1.5;
    pub const MILD_THRESHOLD: f64 = 0.5;
    pub const NO_CHANGE_THRESHOLD: f64 = -0.5;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::MAJOR_THRESHOLD {
            ImprovementLevel::Major
        } else if score >= Self::CLEAR_THRESHOLD {
            ImprovementLevel::Clear
        } else if score >= Self::MILD_THRESHOLD {
            ImprovementLevel::Mild
        } else if score >= Self::NO_CHANGE_THRESHOLD {
            ImprovementLevel::NoChange
        } else {
            ImprovementLevel::Worsened
        }
    }

    pub fn is_improvement(&self) -> bool {
        matches!(self, Self::Major | Self::Clear | Self::Mild)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementResult {
    pub negative_improvement: f64,
    pub positive_increase: f64,
    pub overall_improvement: f64,
    pub improvement_description: String,
    #[serde(skip)]
    pub level: ImprovementLevel,
}

impl ImprovementResult {
    /// False when NaN or infinite intensities leaked into the means.
    pub fn is_finite(&self) -> bool {
        self.negative_improvement.is_finite()
            && self.positive_increase.is_finite()
            && self.overall_improvement.is_finite()
    }
}

/// Rounds to one decimal, halves toward positive infinity.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Arithmetic mean of the intensities; 0 for an empty bucket.
pub fn mean_intensity(entries: &[EmotionEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    if let Some(bad) = entries.iter().find(|e| !e.intensity.is_finite()) {
        tracing::warn!(
            emotion = %bad.emotion,
            intensity = bad.intensity,
            "non-finite intensity in emotion set"
        );
    }
    let sum: f64 = entries.iter().map(|e| e.intensity).sum();
    sum / entries.len() as f64
}

pub fn compute_with(
    before: &[EmotionEntry],
    after: &[EmotionEntry],
    policy: FallbackPolicy,
) -> ImprovementResult {
    let before = categorize_with(before, policy);
    let after = categorize_with(after, policy);

    let negative_improvement = mean_intensity(&before.negative) - mean_intensity(&after.negative);
    let positive_increase = mean_intensity(&after.positive) - mean_intensity(&before.positive);
    let overall_improvement = negative_improvement * WEIGHT_NEGATIVE_REDUCTION
        + positive_increase * WEIGHT_POSITIVE_INCREASE;

    // NaN compares false everywhere and falls through to Worsened; is_finite() flags it.
    let level = ImprovementLevel::from_score(overall_improvement);

    ImprovementResult {
        negative_improvement: round1(negative_improvement),
        positive_increase: round1(positive_increase),
        overall_improvement: round1(overall_improvement),
        improvement_description: level.to_string(),
        level,
    }
}

/// Before/after comparison under the two-bucket model.
pub fn compute(before: &[EmotionEntry], after: &[EmotionEntry]) -> ImprovementResult {
    compute_with(before, after, FallbackPolicy::Negative)
}
