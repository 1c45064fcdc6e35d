use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::utils::lenient;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EmotionType {
    #[strum(serialize = "negative")]
    Negative,
    #[strum(serialize = "positive")]
    Positive,
}

impl FromStr for EmotionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(Self::Negative),
            "positive" => Ok(Self::Positive),
            _ => Err(()),
        }
    }
}

/// What to do with a label that neither the catalog nor the keyword lists
/// recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum FallbackPolicy {
    /// Two-bucket model: unknown labels count as negative.
    #[default]
    #[strum(serialize = "negative")]
    Negative,
    /// Three-bucket model: unknown labels land in neither scoring bucket.
    #[strum(serialize = "neutral")]
    Neutral,
}

/// A recorded emotion with its 0-10 intensity.
///
/// `manual_type` is set when the user dragged the emotion into a bucket by
/// hand and always wins over automatic classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionEntry {
    #[serde(default, deserialize_with = "lenient::string_or_null")]
    pub emotion: String,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub intensity: f64,
    #[serde(
        default,
        deserialize_with = "lenient::emotion_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_type: Option<EmotionType>,
}

impl EmotionEntry {
    pub fn new(emotion: impl Into<String>, intensity: f64) -> Self {
        Self {
            emotion: emotion.into(),
            intensity,
            manual_type: None,
        }
    }

    pub fn with_manual_type(mut self, emotion_type: EmotionType) -> Self {
        self.manual_type = Some(emotion_type);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionClassification {
    pub emotion: &'static str,
    pub emotion_type: EmotionType,
    pub category: &'static str,
}

const fn neg(emotion: &'static str, category: &'static str) -> EmotionClassification {
    EmotionClassification {
        emotion,
        emotion_type: EmotionType::Negative,
        category,
    }
}

const fn pos(emotion: &'static str, category: &'static str) -> EmotionClassification {
    EmotionClassification {
        emotion,
        emotion_type: EmotionType::Positive,
        category,
    }
}

pub const EMOTION_CATALOG: &[EmotionClassification] = &[
    neg("不安", "恐怖系"),
    neg("恐怖", "恐怖系"),
    neg("心配", "恐怖系"),
    neg("焦り", "恐怖系"),
    neg("パニック", "恐怖系"),
    neg("怒り", "怒り系"),
    neg("イライラ", "怒り系"),
    neg("憤り", "怒り系"),
    neg("苛立ち", "怒り系"),
    neg("悲しみ", "悲しみ系"),
    neg("落胆", "悲しみ系"),
    neg("絶望", "悲しみ系"),
    neg("憂鬱", "悲しみ系"),
    neg("孤独", "悲しみ系"),
    neg("恥", "自己否定系"),
    neg("罪悪感", "自己否定系"),
    neg("劣等感", "自己否定系"),
    neg("嫌悪", "自己否定系"),
    neg("自己嫌悪", "自己否定系"),
    neg("混乱", "その他"),
    neg("驚き", "その他"),
    neg("ショック", "その他"),
    pos("喜び", "喜び系"),
    pos("幸せ", "喜び系"),
    pos("楽しさ", "喜び系"),
    pos("嬉しさ", "喜び系"),
    pos("満足", "喜び系"),
    pos("安心", "平静系"),
    pos("平静", "平静系"),
    pos("落ち着き", "平静系"),
    pos("リラックス", "平静系"),
    pos("解放感", "平静系"),
    pos("希望", "希望系"),
    pos("期待", "希望系"),
    pos("楽観", "希望系"),
    pos("前向き", "希望系"),
    pos("自信", "自己肯定系"),
    pos("誇り", "自己肯定系"),
    pos("達成感", "自己肯定系"),
    pos("自己受容", "自己肯定系"),
    pos("感謝", "その他"),
    pos("愛情", "その他"),
    pos("理解", "その他"),
    pos("決意", "その他"),
    pos("反省", "その他"),
    // Reduced forms still count as negative; improvement shows up as lower intensity.
    neg("軽い不安", "恐怖系"),
    neg("軽い悲しみ", "悲しみ系"),
    neg("軽い怒り", "怒り系"),
    neg("軽い恐怖", "恐怖系"),
    neg("軽い焦り", "恐怖系"),
    neg("軽い落胆", "悲しみ系"),
    neg("軽い罪悪感", "自己否定系"),
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "不安",
    "心配",
    "恐怖",
    "怖",
    "焦",
    "パニック",
    "怒",
    "イライラ",
    "腹立",
    "憤",
    "悲し",
    "落胆",
    "絶望",
    "憂鬱",
    "孤独",
    "寂し",
    "恥",
    "罪悪",
    "劣等",
    "嫌悪",
    "自己嫌悪",
    "混乱",
    "ショック",
    "ストレス",
    "疲れ",
    "辛い",
    "苦し",
];

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "喜",
    "幸せ",
    "楽し",
    "嬉し",
    "満足",
    "安心",
    "平静",
    "落ち着",
    "リラックス",
    "解放",
    "希望",
    "期待",
    "楽観",
    "前向き",
    "自信",
    "誇り",
    "達成",
    "自己受容",
    "感謝",
    "愛",
    "理解",
    "決意",
    "反省",
];

pub fn catalog_entry(label: &str) -> Option<&'static EmotionClassification> {
    EMOTION_CATALOG.iter().find(|c| c.emotion == label)
}

pub fn emotions_of_type(emotion_type: EmotionType) -> Vec<&'static str> {
    EMOTION_CATALOG
        .iter()
        .filter(|c| c.emotion_type == emotion_type)
        .map(|c| c.emotion)
        .collect()
}

fn keyword_type(label: &str) -> Option<EmotionType> {
    let label_lower = label.to_lowercase();
    if NEGATIVE_KEYWORDS.iter().any(|kw| label_lower.contains(kw)) {
        return Some(EmotionType::Negative);
    }
    if POSITIVE_KEYWORDS.iter().any(|kw| label_lower.contains(kw)) {
        return Some(EmotionType::Positive);
    }
    None
}

/// Catalog lookup, then keyword containment. `None` means the label is
/// unrecognized and the fallback policy decides.
///
/// The keyword pass is a heuristic: a novel label can land in the wrong
/// bucket, which is what `manual_type` is for.
pub fn classify_label(label: &str) -> Option<EmotionType> {
    if let Some(entry) = catalog_entry(label) {
        return Some(entry.emotion_type);
    }
    keyword_type(label)
}

pub fn classify_with(label: &str, policy: FallbackPolicy) -> Option<EmotionType> {
    classify_label(label).or_else(|| {
        tracing::debug!(label, %policy, "unrecognized emotion label");
        match policy {
            FallbackPolicy::Negative => Some(EmotionType::Negative),
            FallbackPolicy::Neutral => None,
        }
    })
}

/// Two-bucket classification: unrecognized labels are negative.
pub fn classify(label: &str) -> EmotionType {
    classify_label(label).unwrap_or(EmotionType::Negative)
}

/// Manual classification wins; otherwise classify the label under `policy`.
pub fn resolve_type_with(entry: &EmotionEntry, policy: FallbackPolicy) -> Option<EmotionType> {
    match entry.manual_type {
        Some(manual) => Some(manual),
        None => classify_with(&entry.emotion, policy),
    }
}

pub fn resolve_type(entry: &EmotionEntry) -> EmotionType {
    entry.manual_type.unwrap_or_else(|| classify(&entry.emotion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(classify("不安"), EmotionType::Negative);
        assert_eq!(classify("安心"), EmotionType::Positive);
        assert_eq!(classify("希望"), EmotionType::Positive);
        assert_eq!(classify("軽い不安"), EmotionType::Negative);
        assert_eq!(catalog_entry("憂鬱").map(|c| c.category), Some("悲しみ系"));
    }

    #[test]
    fn test_catalog_beats_keywords() {
        // 反省 is catalogued positive even though it reads like a regret.
        assert_eq!(classify("反省"), EmotionType::Positive);
        assert_eq!(classify("自己嫌悪"), EmotionType::Negative);
        // Not in the catalog, but contains 愛 (positive keyword).
        assert_eq!(classify("愛おしさ"), EmotionType::Positive);
    }

    #[test]
    fn test_keyword_fallback() {
        assert_eq!(classify_label("とても寂しい"), Some(EmotionType::Negative));
        assert_eq!(classify_label("ストレスフル"), Some(EmotionType::Negative));
        assert_eq!(classify_label("少し楽しい"), Some(EmotionType::Positive));
        assert_eq!(classify_label("達成できた"), Some(EmotionType::Positive));
    }

    #[test]
    fn test_negative_keywords_scanned_first() {
        // Contains both 不安 (negative) and 安心 (positive).
        assert_eq!(classify_label("不安と安心"), Some(EmotionType::Negative));
        assert_eq!(classify_label("安心と不安"), Some(EmotionType::Negative));
    }

    #[test]
    fn test_unrecognized_label_defaults() {
        assert_eq!(classify_label("ぼんやり"), None);
        assert_eq!(classify("ぼんやり"), EmotionType::Negative);
        assert_eq!(classify(""), EmotionType::Negative);
        assert_eq!(classify_with("ぼんやり", FallbackPolicy::Neutral), None);
        assert_eq!(
            classify_with("ぼんやり", FallbackPolicy::Negative),
            Some(EmotionType::Negative)
        );
    }

    #[test]
    fn test_manual_override_wins() {
        let entry = EmotionEntry::new("不安", 6.0).with_manual_type(EmotionType::Positive);
        assert_eq!(resolve_type(&entry), EmotionType::Positive);
        assert_eq!(
            resolve_type_with(&entry, FallbackPolicy::Neutral),
            Some(EmotionType::Positive)
        );

        let unknown = EmotionEntry::new("ぼんやり", 3.0).with_manual_type(EmotionType::Positive);
        assert_eq!(
            resolve_type_with(&unknown, FallbackPolicy::Neutral),
            Some(EmotionType::Positive)
        );
    }

    #[test]
    fn test_emotions_of_type() {
        let negatives = emotions_of_type(EmotionType::Negative);
        let positives = emotions_of_type(EmotionType::Positive);
        assert_eq!(negatives.first(), Some(&"不安"));
        assert_eq!(positives.first(), Some(&"喜び"));
        assert_eq!(negatives.len() + positives.len(), EMOTION_CATALOG.len());
    }

    #[test]
    fn test_emotion_type_from_str() {
        assert_eq!("negative".parse::<EmotionType>(), Ok(EmotionType::Negative));
        assert_eq!("positive".parse::<EmotionType>(), Ok(EmotionType::Positive));
        assert!("neutral".parse::<EmotionType>().is_err());
        assert_eq!(EmotionType::Positive.to_string(), "positive");
    }

    proptest! {
        #[test]
        fn catalog_type_is_always_returned(idx in 0usize..EMOTION_CATALOG.len()) {
            let entry = &EMOTION_CATALOG[idx];
            prop_assert_eq!(classify(entry.emotion), entry.emotion_type);
        }

        #[test]
        fn manual_type_always_wins(
            label in "\\PC{0,8}",
            intensity in 0.0f64..=10.0,
            positive in any::<bool>(),
        ) {
            let manual = if positive { EmotionType::Positive } else { EmotionType::Negative };
            let entry = EmotionEntry::new(label, intensity).with_manual_type(manual);
            prop_assert_eq!(resolve_type(&entry), manual);
            prop_assert_eq!(resolve_type_with(&entry, FallbackPolicy::Neutral), Some(manual));
        }

        #[test]
        fn classify_never_panics(label in "\\PC*") {
            let _ = classify(&label);
        }
    }
}
