//! Stored record shapes and the aggregate views the app draws from them.

pub mod activity;
pub mod experiment;
mod export;
pub mod journal;

pub use activity::{
    activity_stats, analyze, is_valid_time_slot, time_slots, ActivityAnalysis, ActivityEntry,
    ActivityRecord, ActivityStats, HalfPosition,
};
pub use experiment::{
    comparison, completion_rate, BehaviorExperiment, Comparison, ExperimentPlan, ExperimentResult,
    Outcome,
};
pub use export::Export;
pub use journal::{
    distortion_frequency, negative_emotion_frequency, positive_emotion_frequency,
    DistortionCount, EmotionCount, JournalEntry, JournalIssues,
};
