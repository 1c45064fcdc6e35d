//! Scoring core for a CBT journaling app: emotion classification,
//! before/after improvement scores, activity colors and the cognitive
//! distortion catalog, plus the stored record shapes they read from.

pub mod records;
pub mod scoring;
pub mod settings;
pub mod utils;
