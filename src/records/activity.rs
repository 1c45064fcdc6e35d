use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::scoring::{round1, ActivityColor, ColorModel};
use crate::settings::Analysis;
use crate::utils::lenient;

pub const FIRST_SLOT_HOUR: u32 = 6;
pub const LAST_SLOT_HOUR: u32 = 25;
pub const DEFAULT_RATING: f64 = 5.0;

static TIME_SLOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)-([01]\d|2[0-3]):([0-5]\d)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfPosition {
    First,
    Second,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityEntry {
    pub id: String,
    pub time_slot: String,
    pub activity: String,
    #[serde(deserialize_with = "lenient::number")]
    pub pleasure: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub achievement: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_half_hour: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_position: Option<HalfPosition>,
    pub exclude_from_stats: bool,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ActivityEntry {
    pub fn color(&self, model: ColorModel) -> ActivityColor {
        model.color_for(self.pleasure, self.achievement)
    }

    pub fn counts_toward_stats(&self) -> bool {
        !self.exclude_from_stats
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStats {
    pub total_pleasure: f64,
    pub total_achievement: f64,
    pub average_pleasure: f64,
    pub average_achievement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityRecord {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub entries: Vec<ActivityEntry>,
    #[serde(flatten)]
    pub stats: ActivityStats,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    /// A blank day: one entry per slot, every rating at the midpoint.
    pub fn blank(date: NaiveDate) -> Self {
        let now = Utc::now();
        let entries: Vec<ActivityEntry> = time_slots()
            .into_iter()
            .enumerate()
            .map(|(i, slot)| ActivityEntry {
                id: format!("entry-{i}"),
                time_slot: slot,
                pleasure: DEFAULT_RATING,
                achievement: DEFAULT_RATING,
                created_at: Some(now),
                updated_at: Some(now),
                ..Default::default()
            })
            .collect();
        let stats = activity_stats(&entries);
        Self {
            id: format!("record-{}", now.timestamp_millis()),
            date: date.format("%Y-%m-%d").to_string(),
            entries,
            stats,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Recomputes the stored totals from the entries.
    pub fn refresh_stats(&mut self) {
        self.stats = activity_stats(&self.entries);
    }

    /// Time slots that are not `HH:MM-HH:MM`, in entry order.
    pub fn invalid_time_slots(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.time_slot.as_str())
            .filter(|slot| !is_valid_time_slot(slot))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityAnalysis {
    pub color_distribution: BTreeMap<ActivityColor, usize>,
    pub peak_pleasure_time: String,
    pub peak_achievement_time: String,
    pub low_energy_periods: Vec<String>,
    pub recommendations: Vec<String>,
}

fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

/// Hourly slots from 06:00 through 02:00 the next morning.
pub fn time_slots() -> Vec<String> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| format!("{}-{}", format_hour(hour), format_hour(hour + 1)))
        .collect()
}

pub fn is_valid_time_slot(slot: &str) -> bool {
    TIME_SLOT_PATTERN.is_match(slot)
}

pub fn activity_stats(entries: &[ActivityEntry]) -> ActivityStats {
    let counted: Vec<&ActivityEntry> = entries.iter().filter(|e| e.counts_toward_stats()).collect();
    if counted.is_empty() {
        return ActivityStats::default();
    }

    let total_pleasure: f64 = counted.iter().map(|e| e.pleasure).sum();
    let total_achievement: f64 = counted.iter().map(|e| e.achievement).sum();
    let n = counted.len() as f64;

    ActivityStats {
        total_pleasure,
        total_achievement,
        average_pleasure: round1(total_pleasure / n),
        average_achievement: round1(total_achievement / n),
    }
}

pub fn analyze(
    entries: &[ActivityEntry],
    model: ColorModel,
    thresholds: &Analysis,
) -> ActivityAnalysis {
    let mut color_distribution: BTreeMap<ActivityColor, usize> =
        model.colors().into_iter().map(|c| (c, 0)).collect();

    let mut max_pleasure = 0.0;
    let mut max_achievement = 0.0;
    let mut peak_pleasure_time = String::new();
    let mut peak_achievement_time = String::new();
    let mut low_energy_periods = Vec::new();

    for entry in entries.iter().filter(|e| e.counts_toward_stats()) {
        *color_distribution.entry(entry.color(model)).or_insert(0) += 1;

        if entry.pleasure > max_pleasure {
            max_pleasure = entry.pleasure;
            peak_pleasure_time = entry.time_slot.clone();
        }
        if entry.achievement > max_achievement {
            max_achievement = entry.achievement;
            peak_achievement_time = entry.time_slot.clone();
        }
        if entry.pleasure <= thresholds.low_energy_max
            && entry.achievement <= thresholds.low_energy_max
        {
            low_energy_periods.push(entry.time_slot.clone());
        }
    }

    let count = |color: ActivityColor| color_distribution.get(&color).copied().unwrap_or(0);
    let mut recommendations = Vec::new();
    if count(ActivityColor::Red) > 0 {
        recommendations.push("赤色の活動（高い楽しさ＋達成感）を増やしてみましょう".to_string());
    }
    if count(ActivityColor::Purple) > thresholds.purple_recommendation_min {
        recommendations.push("紫色の時間帯には、より楽しい活動を取り入れてみましょう".to_string());
    }
    if low_energy_periods.len() > thresholds.low_energy_recommendation_min {
        recommendations.push(
            "エネルギーの低い時間帯が多いです。休息や軽い運動を取り入れてみましょう".to_string(),
        );
    }

    ActivityAnalysis {
        color_distribution,
        peak_pleasure_time,
        peak_achievement_time,
        low_energy_periods,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(slot: &str, pleasure: f64, achievement: f64) -> ActivityEntry {
        ActivityEntry {
            time_slot: slot.to_string(),
            activity: "作業".to_string(),
            pleasure,
            achievement,
            ..Default::default()
        }
    }

    fn thresholds() -> Analysis {
        Analysis {
            low_energy_max: 2.0,
            purple_recommendation_min: 2,
            low_energy_recommendation_min: 3,
        }
    }

    #[test]
    fn test_time_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0], "06:00-07:00");
        assert_eq!(slots[17], "23:00-00:00");
        assert_eq!(slots[19], "01:00-02:00");
        assert!(slots.iter().all(|s| is_valid_time_slot(s)));
    }

    #[test]
    fn test_time_slot_validation() {
        assert!(is_valid_time_slot("06:30-07:00"));
        assert!(!is_valid_time_slot("6:00-7:00"));
        assert!(!is_valid_time_slot("24:00-25:00"));
        assert!(!is_valid_time_slot("morning"));
    }

    #[test]
    fn test_stats_skip_excluded() {
        let mut excluded = entry("08:00-09:00", 10.0, 10.0);
        excluded.exclude_from_stats = true;
        let entries = vec![
            entry("06:00-07:00", 3.0, 4.0),
            entry("07:00-08:00", 4.0, 4.0),
            entry("09:00-10:00", 4.0, 3.0),
            excluded,
        ];
        let stats = activity_stats(&entries);
        assert_eq!(
            stats,
            ActivityStats {
                total_pleasure: 11.0,
                total_achievement: 11.0,
                average_pleasure: 3.7,
                average_achievement: 3.7,
            }
        );
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(activity_stats(&[]), ActivityStats::default());
    }

    #[test]
    fn test_analysis_sum_based() {
        let entries = vec![
            entry("06:00-07:00", 1.0, 1.0),
            entry("07:00-08:00", 9.0, 8.0),
            entry("08:00-09:00", 5.0, 9.0),
            entry("09:00-10:00", 9.0, 2.0),
        ];
        let analysis = analyze(&entries, ColorModel::SumBased, &thresholds());

        assert_eq!(analysis.color_distribution.len(), 5);
        assert_eq!(analysis.color_distribution[&ActivityColor::Red], 1);
        assert_eq!(analysis.color_distribution[&ActivityColor::Orange], 2);
        assert_eq!(analysis.color_distribution[&ActivityColor::Purple], 1);
        assert_eq!(analysis.peak_pleasure_time, "07:00-08:00");
        assert_eq!(analysis.peak_achievement_time, "08:00-09:00");
        assert_eq!(analysis.low_energy_periods, vec!["06:00-07:00".to_string()]);
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].contains("赤色"));
    }

    #[test]
    fn test_analysis_pairwise_palette() {
        let entries = vec![entry("06:00-07:00", 5.0, 5.0), entry("07:00-08:00", 5.0, 0.0)];
        let analysis = analyze(&entries, ColorModel::Pairwise, &thresholds());
        assert_eq!(analysis.color_distribution.len(), 7);
        assert_eq!(analysis.color_distribution[&ActivityColor::Black], 1);
        assert_eq!(analysis.color_distribution[&ActivityColor::Green], 1);
    }

    #[test]
    fn test_low_energy_recommendations() {
        let entries: Vec<ActivityEntry> = time_slots()
            .into_iter()
            .take(4)
            .map(|slot| entry(&slot, 0.0, 1.0))
            .collect();
        let analysis = analyze(&entries, ColorModel::SumBased, &thresholds());
        assert_eq!(analysis.low_energy_periods.len(), 4);
        assert_eq!(analysis.color_distribution[&ActivityColor::Purple], 4);
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(analysis.peak_pleasure_time.is_empty());
        assert_eq!(analysis.peak_achievement_time, "06:00-07:00");
    }

    #[test]
    fn test_blank_record() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = ActivityRecord::blank(date);
        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.parsed_date(), Some(date));
        assert_eq!(record.entries.len(), 20);
        assert_eq!(record.stats.total_pleasure, 100.0);
        assert_eq!(record.stats.average_achievement, 5.0);
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{
            "id": "record-1",
            "date": "2024-05-01",
            "entries": [
                {"id": "entry-0", "timeSlot": "06:00-07:00", "activity": "散歩",
                 "pleasure": 6, "achievement": "4", "excludeFromStats": false},
                {"id": "entry-1", "timeSlot": "07:00-07:30", "activity": "朝食",
                 "pleasure": 7, "achievement": 2, "isHalfHour": true, "halfPosition": "first"}
            ],
            "totalPleasure": 13,
            "totalAchievement": 6,
            "averagePleasure": 6.5,
            "averageAchievement": 3,
            "createdAt": "2024-05-01T21:00:00.000Z"
        }"#;
        let mut record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.entries[0].achievement, 4.0);
        assert_eq!(record.entries[1].half_position, Some(HalfPosition::First));
        assert_eq!(record.stats.total_pleasure, 13.0);

        record.refresh_stats();
        assert_eq!(record.stats.average_pleasure, 6.5);
        assert_eq!(record.stats.average_achievement, 3.0);
    }

    #[test]
    fn test_low_energy_threshold_is_configurable() {
        let entries = vec![entry("06:00-07:00", 3.0, 3.0), entry("07:00-08:00", 1.0, 2.0)];
        let default = analyze(&entries, ColorModel::SumBased, &thresholds());
        assert_eq!(default.low_energy_periods, vec!["07:00-08:00".to_string()]);

        let wide = Analysis {
            low_energy_max: 3.0,
            ..thresholds()
        };
        let wider = analyze(&entries, ColorModel::SumBased, &wide);
        assert_eq!(wider.low_energy_periods.len(), 2);
    }

    #[test]
    fn test_invalid_time_slots() {
        let mut record = ActivityRecord::blank(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(record.invalid_time_slots().is_empty());

        record.entries[0].time_slot = "朝".to_string();
        record.entries.push(entry("07:00-07:30", 5.0, 5.0));
        record.entries.push(entry("25:00-26:00", 5.0, 5.0));
        assert_eq!(record.invalid_time_slots(), vec!["朝", "25:00-26:00"]);
    }
}
