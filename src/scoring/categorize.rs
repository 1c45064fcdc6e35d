use super::classification::{resolve_type_with, EmotionEntry, EmotionType, FallbackPolicy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedEmotions {
    pub negative: Vec<EmotionEntry>,
    pub positive: Vec<EmotionEntry>,
    /// Only populated under [`FallbackPolicy::Neutral`].
    pub neutral: Vec<EmotionEntry>,
}

impl CategorizedEmotions {
    pub fn bucket(&self, emotion_type: EmotionType) -> &[EmotionEntry] {
        match emotion_type {
            EmotionType::Negative => &self.negative,
            EmotionType::Positive => &self.positive,
        }
    }

    pub fn len(&self) -> usize {
        self.negative.len() + self.positive.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `entries` into buckets, keeping their relative order.
pub fn categorize_with(entries: &[EmotionEntry], policy: FallbackPolicy) -> CategorizedEmotions {
    let mut categorized = CategorizedEmotions::default();
    for entry in entries {
        match resolve_type_with(entry, policy) {
            Some(EmotionType::Negative) => categorized.negative.push(entry.clone()),
            Some(EmotionType::Positive) => categorized.positive.push(entry.clone()),
            None => categorized.neutral.push(entry.clone()),
        }
    }
    categorized
}

pub fn categorize(entries: &[EmotionEntry]) -> CategorizedEmotions {
    categorize_with(entries, FallbackPolicy::Negative)
}
