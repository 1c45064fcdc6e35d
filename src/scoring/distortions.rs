use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::utils::lenient;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DistortionCategory {
    Extreme,
    Selective,
    Intuitive,
    SelfBlame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl DistortionCategory {
    pub fn info(&self) -> CategoryInfo {
        match self {
            Self::Extreme => CategoryInfo {
                name: "極端な思考",
                color: "red",
                description: "物事を極端に捉える思考パターン",
            },
            Self::Selective => CategoryInfo {
                name: "選択的注意",
                color: "orange",
                description: "特定の側面にのみ注目する思考パターン",
            },
            Self::Intuitive => CategoryInfo {
                name: "直感への依存",
                color: "yellow",
                description: "証拠よりも直感を重視する思考パターン",
            },
            Self::SelfBlame => CategoryInfo {
                name: "自己𠮟責",
                color: "purple",
                description: "自分を責める思考パターン",
            },
        }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CognitiveDistortion {
    pub id: &'static str,
    pub name: &'static str,
    pub category: DistortionCategory,
    pub description: &'static str,
}

/// A distortion the user tagged on a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionTag {
    pub distortion_id: String,
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub intensity: f64,
}

const fn distortion(
    id: &'static str,
    name: &'static str,
    category: DistortionCategory,
    description: &'static str,
) -> CognitiveDistortion {
    CognitiveDistortion {
        id,
        name,
        category,
        description,
    }
}

use DistortionCategory::*;

pub const COGNITIVE_DISTORTIONS: &[CognitiveDistortion] = &[
    distortion(
        "blackWhite",
        "白黒思考",
        Extreme,
        "物事を極端に捉え、中間がない考え方",
    ),
    distortion(
        "shouldThinking",
        "べき思考",
        Extreme,
        "「〜すべき」「〜しなければならない」という完璧主義的な考え方",
    ),
    distortion(
        "catastrophizing",
        "破局的思考",
        Extreme,
        "最悪の結果を想像し、それが確実に起こると考える",
    ),
    distortion(
        "overgeneralization",
        "過度の一般化",
        Selective,
        "一つの出来事から全体的な結論を導き出す",
    ),
    distortion(
        "mentalFilter",
        "心のフィルター",
        Selective,
        "否定的な側面にのみ注意を向け、肯定的な面を無視する",
    ),
    distortion(
        "discountingPositive",
        "マイナス化思考",
        Selective,
        "肯定的な出来事を否定的に解釈する",
    ),
    distortion(
        "magnificationMinimization",
        "拡大解釈・過少評価",
        Selective,
        "悪い面を拡大し、良い面を過少評価する",
    ),
    distortion(
        "jumpingToConclusions",
        "結論の飛躍",
        Intuitive,
        "証拠もないのに否定的な結論を導き出す",
    ),
    distortion(
        "emotionalReasoning",
        "感情的推論",
        Intuitive,
        "感情を事実として扱い、それに基づいて判断する",
    ),
    distortion(
        "labeling",
        "レッテル貼り",
        Intuitive,
        "自分や他人に否定的なレッテルを貼る",
    ),
    distortion(
        "personalization",
        "個人化",
        SelfBlame,
        "自分に責任のない出来事でも自分のせいだと考える",
    ),
    distortion(
        "selfCriticism",
        "自己批判・自己罵倒",
        SelfBlame,
        "自分を厳しく批判し、否定的な言葉で責める",
    ),
];

pub fn all_distortions() -> &'static [CognitiveDistortion] {
    COGNITIVE_DISTORTIONS
}

pub fn by_id(id: &str) -> Option<&'static CognitiveDistortion> {
    COGNITIVE_DISTORTIONS.iter().find(|d| d.id == id)
}

pub fn by_category(category: DistortionCategory) -> Vec<&'static CognitiveDistortion> {
    COGNITIVE_DISTORTIONS
        .iter()
        .filter(|d| d.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id() {
        let d = by_id("catastrophizing").unwrap();
        assert_eq!(d.name, "破局的思考");
        assert_eq!(d.category, DistortionCategory::Extreme);
        assert!(by_id("doesNotExist").is_none());
        assert!(by_id("").is_none());
    }

    #[test]
    fn test_by_category_counts() {
        assert_eq!(by_category(DistortionCategory::Extreme).len(), 3);
        assert_eq!(by_category(DistortionCategory::Selective).len(), 4);
        assert_eq!(by_category(DistortionCategory::Intuitive).len(), 3);
        assert_eq!(by_category(DistortionCategory::SelfBlame).len(), 2);

        let total: usize = DistortionCategory::all()
            .iter()
            .map(|c| by_category(*c).len())
            .sum();
        assert_eq!(total, all_distortions().len());
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, d) in COGNITIVE_DISTORTIONS.iter().enumerate() {
            assert!(COGNITIVE_DISTORTIONS[i + 1..].iter().all(|o| o.id != d.id));
        }
    }

    #[test]
    fn test_category_info() {
        assert_eq!(DistortionCategory::SelfBlame.info().name, "自己𠮟責");
        assert_eq!(DistortionCategory::Selective.info().color, "orange");
        assert_eq!(DistortionCategory::SelfBlame.to_string(), "selfBlame");
    }

    #[test]
    fn test_tag_deserialize() {
        let tag: DistortionTag =
            serde_json::from_str(r#"{"distortionId":"labeling","intensity":3}"#).unwrap();
        assert_eq!(tag.distortion_id, "labeling");
        assert_eq!(tag.intensity, 3.0);
    }
}
