use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityColor {
    Red,
    Orange,
    Yellow,
    Blue,
    Purple,
    Green,
    Black,
}

impl ActivityColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Red => "bg-red-100 text-red-800 border-red-200",
            Self::Orange => "bg-orange-100 text-orange-800 border-orange-200",
            Self::Yellow => "bg-yellow-100 text-yellow-800 border-yellow-200",
            Self::Blue => "bg-blue-100 text-blue-800 border-blue-200",
            Self::Purple => "bg-purple-100 text-purple-800 border-purple-200",
            Self::Green => "bg-green-100 text-green-800 border-green-200",
            Self::Black => "bg-gray-800 text-white border-gray-900",
        }
    }

    /// Sum-based wording where the color exists there, pairwise otherwise.
    pub fn meaning(&self) -> &'static str {
        ColorModel::SumBased
            .meaning(*self)
            .or_else(|| ColorModel::Pairwise.meaning(*self))
            .unwrap_or_default()
    }
}

/// Which rule table turns a pleasure/achievement pair into a color.
/// The two tables disagree on meanings, so a deployment uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum ColorModel {
    /// Five levels over `pleasure + achievement`.
    #[default]
    #[strum(serialize = "sum-based")]
    SumBased,
    /// Seven levels from ordered pairwise conditions.
    #[strum(serialize = "pairwise")]
    Pairwise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: ActivityColor,
    pub condition: &'static str,
    pub meaning: &'static str,
}

const SUM_RED_MIN: f64 = 16.0;
const SUM_ORANGE_MIN: f64 = 11.0;
const SUM_YELLOW_MIN: f64 = 6.0;
const SUM_BLUE_MIN: f64 = 3.0;

const SUM_LEGEND: &[LegendEntry] = &[
    LegendEntry {
        color: ActivityColor::Red,
        condition: "P+A: 16〜20点",
        meaning: "非常にポジティブ",
    },
    LegendEntry {
        color: ActivityColor::Orange,
        condition: "P+A: 11〜15点",
        meaning: "ポジティブ",
    },
    LegendEntry {
        color: ActivityColor::Yellow,
        condition: "P+A: 6〜10点",
        meaning: "ニュートラル",
    },
    LegendEntry {
        color: ActivityColor::Blue,
        condition: "P+A: 3〜5点",
        meaning: "ややネガティブ",
    },
    LegendEntry {
        color: ActivityColor::Purple,
        condition: "P+A: 0〜2点",
        meaning: "非常にネガティブ",
    },
];

const PAIRWISE_LEGEND: &[LegendEntry] = &[
    LegendEntry {
        color: ActivityColor::Red,
        condition: "P≥8 & A≥8",
        meaning: "楽しさ・達成感ともに高い",
    },
    LegendEntry {
        color: ActivityColor::Orange,
        condition: "P≥8 & A≤7",
        meaning: "楽しさが高い",
    },
    LegendEntry {
        color: ActivityColor::Yellow,
        condition: "P≤7 & A≥8",
        meaning: "達成感が高い",
    },
    LegendEntry {
        color: ActivityColor::Blue,
        condition: "P≤2 & A≥2",
        meaning: "楽しさが低い",
    },
    LegendEntry {
        color: ActivityColor::Green,
        condition: "P≥3 & A≤1",
        meaning: "達成感が低い",
    },
    LegendEntry {
        color: ActivityColor::Purple,
        condition: "P≤2 & A≤1",
        meaning: "楽しさ・達成感ともに低い",
    },
    LegendEntry {
        color: ActivityColor::Black,
        condition: "その他",
        meaning: "バランス型",
    },
];

impl ColorModel {
    /// NaN never matches a comparison, so it lands on the model's last
    /// color (purple or black) instead of panicking.
    pub fn color_for(&self, pleasure: f64, achievement: f64) -> ActivityColor {
        match self {
            Self::SumBased => sum_based_color(pleasure, achievement),
            Self::Pairwise => pairwise_color(pleasure, achievement),
        }
    }

    pub fn legend(&self) -> &'static [LegendEntry] {
        match self {
            Self::SumBased => SUM_LEGEND,
            Self::Pairwise => PAIRWISE_LEGEND,
        }
    }

    /// The model's palette in legend order.
    pub fn colors(&self) -> Vec<ActivityColor> {
        self.legend().iter().map(|l| l.color).collect()
    }

    pub fn meaning(&self, color: ActivityColor) -> Option<&'static str> {
        self.legend()
            .iter()
            .find(|l| l.color == color)
            .map(|l| l.meaning)
    }
}

fn sum_based_color(pleasure: f64, achievement: f64) -> ActivityColor {
    let total = pleasure + achievement;
    if total >= SUM_RED_MIN {
        ActivityColor::Red
    } else if total >= SUM_ORANGE_MIN {
        ActivityColor::Orange
    } else if total >= SUM_YELLOW_MIN {
        ActivityColor::Yellow
    } else if total >= SUM_BLUE_MIN {
        ActivityColor::Blue
    } else {
        ActivityColor::Purple
    }
}

// First match wins; the order is part of the rule.
fn pairwise_color(p: f64, a: f64) -> ActivityColor {
    if p >= 8.0 && a <= 7.0 {
        ActivityColor::Orange
    } else if p <= 7.0 && a >= 8.0 {
        ActivityColor::Yellow
    } else if p >= 8.0 && a >= 8.0 {
        ActivityColor::Red
    } else if p <= 2.0 && a >= 2.0 {
        ActivityColor::Blue
    } else if p >= 3.0 && a <= 1.0 {
        ActivityColor::Green
    } else if p <= 2.0 && a <= 1.0 {
        ActivityColor::Purple
    } else {
        ActivityColor::Black
    }
}

/// Sum-based five-level color.
pub fn color_for(pleasure: f64, achievement: f64) -> ActivityColor {
    ColorModel::SumBased.color_for(pleasure, achievement)
}
