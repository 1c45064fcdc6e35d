use thiserror::Error;

use super::classification::EmotionEntry;

pub const MIN_INTENSITY: f64 = 0.0;
pub const MAX_INTENSITY: f64 = 10.0;

/// Problems found in an emotion set before it reaches the scoring core.
/// Indices point into the slice that was validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("emotion #{index} has an empty label")]
    EmptyLabel { index: usize },
    #[error("emotion #{index} ({emotion}) has a non-numeric intensity")]
    NonFiniteIntensity { index: usize, emotion: String },
    #[error("emotion #{index} ({emotion}) intensity {value} is outside 0-10")]
    IntensityOutOfRange {
        index: usize,
        emotion: String,
        value: f64,
    },
}

impl InputError {
    pub fn index(&self) -> usize {
        match self {
            Self::EmptyLabel { index }
            | Self::NonFiniteIntensity { index, .. }
            | Self::IntensityOutOfRange { index, .. } => *index,
        }
    }
}

pub fn validate_emotion(index: usize, entry: &EmotionEntry) -> Result<(), InputError> {
    if entry.emotion.trim().is_empty() {
        return Err(InputError::EmptyLabel { index });
    }
    if !entry.intensity.is_finite() {
        return Err(InputError::NonFiniteIntensity {
            index,
            emotion: entry.emotion.clone(),
        });
    }
    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&entry.intensity) {
        return Err(InputError::IntensityOutOfRange {
            index,
            emotion: entry.emotion.clone(),
            value: entry.intensity,
        });
    }
    Ok(())
}

/// Fails on the first bad entry.
pub fn validate_emotions(entries: &[EmotionEntry]) -> Result<(), InputError> {
    entries
        .iter()
        .enumerate()
        .try_for_each(|(i, e)| validate_emotion(i, e))
}

/// Every problem in the set, for reporting.
pub fn emotion_issues(entries: &[EmotionEntry]) -> Vec<InputError> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| validate_emotion(i, e).err())
        .collect()
}
