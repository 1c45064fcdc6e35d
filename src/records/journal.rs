use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scoring::{
    by_id, compute_with, emotion_issues, resolve_type_with, DistortionCategory, DistortionTag,
    EmotionEntry, EmotionType, FallbackPolicy, ImprovementResult, InputError,
};
use crate::utils::lenient;

/// A thought record ("column"): situation, emotions before reframing,
/// automatic thought, evidence both ways, adaptive thought and the emotions
/// after it. Field names follow the stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalEntry {
    pub id: String,
    pub date_time: String,
    pub situation: String,
    pub emotions: Vec<EmotionEntry>,
    pub automatic_thought: String,
    pub evidence: String,
    pub counter_evidence: String,
    pub adaptive_thought: String,
    #[serde(deserialize_with = "lenient::number")]
    pub emotion_change: f64,
    pub new_emotions: Vec<EmotionEntry>,
    pub cognitive_distortions: Vec<DistortionTag>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn improvement(&self) -> ImprovementResult {
        self.improvement_with(FallbackPolicy::Negative)
    }

    pub fn improvement_with(&self, policy: FallbackPolicy) -> ImprovementResult {
        compute_with(&self.emotions, &self.new_emotions, policy)
    }

    /// The after-set only exists once an adaptive thought was written.
    pub fn has_reframe(&self) -> bool {
        !self.adaptive_thought.trim().is_empty() || !self.new_emotions.is_empty()
    }

    pub fn issues(&self) -> JournalIssues {
        JournalIssues {
            emotions: emotion_issues(&self.emotions),
            new_emotions: emotion_issues(&self.new_emotions),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalIssues {
    pub emotions: Vec<InputError>,
    pub new_emotions: Vec<InputError>,
}

impl JournalIssues {
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty() && self.new_emotions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistortionCount {
    pub id: &'static str,
    pub name: &'static str,
    pub category: DistortionCategory,
    pub count: usize,
}

/// Counts keys in order of first appearance, then sorts descending. The sort
/// is stable so ties keep that order.
fn ranked<'a, I>(keys: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

fn emotion_frequency<'a, F>(
    records: &'a [JournalEntry],
    select: F,
    wanted: EmotionType,
    policy: FallbackPolicy,
    limit: usize,
) -> Vec<EmotionCount>
where
    F: Fn(&'a JournalEntry) -> &'a [EmotionEntry],
{
    let keys = records
        .iter()
        .flat_map(|r| select(r).iter())
        .filter(|e| resolve_type_with(e, policy) == Some(wanted))
        .map(|e| e.emotion.as_str());
    ranked(keys)
        .into_iter()
        .take(limit)
        .map(|(emotion, count)| EmotionCount {
            emotion: emotion.to_string(),
            count,
        })
        .collect()
}

/// Most frequent negative emotions recorded before reframing.
pub fn negative_emotion_frequency(
    records: &[JournalEntry],
    policy: FallbackPolicy,
    limit: usize,
) -> Vec<EmotionCount> {
    emotion_frequency(
        records,
        |r| r.emotions.as_slice(),
        EmotionType::Negative,
        policy,
        limit,
    )
}

/// Most frequent positive emotions recorded after reframing.
pub fn positive_emotion_frequency(
    records: &[JournalEntry],
    policy: FallbackPolicy,
    limit: usize,
) -> Vec<EmotionCount> {
    emotion_frequency(
        records,
        |r| r.new_emotions.as_slice(),
        EmotionType::Positive,
        policy,
        limit,
    )
}

/// Tag counts per known distortion; tags with unknown ids are skipped.
pub fn distortion_frequency(records: &[JournalEntry]) -> Vec<DistortionCount> {
    let keys = records
        .iter()
        .flat_map(|r| r.cognitive_distortions.iter())
        .filter_map(|tag| by_id(&tag.distortion_id))
        .map(|d| d.id);
    ranked(keys)
        .into_iter()
        .filter_map(|(id, count)| {
            by_id(id).map(|d| DistortionCount {
                id: d.id,
                name: d.name,
                category: d.category,
                count,
            })
        })
        .collect()
}
