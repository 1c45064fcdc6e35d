pub mod activity;
mod categorize;
pub mod classification;
pub mod distortions;
pub mod improvement;
pub mod validation;

pub use activity::{color_for, ActivityColor, ColorModel, LegendEntry};
pub use categorize::{categorize, categorize_with, CategorizedEmotions};
pub use classification::{
    catalog_entry, classify, classify_label, classify_with, emotions_of_type, resolve_type,
    resolve_type_with, EmotionClassification, EmotionEntry, EmotionType, FallbackPolicy,
};
pub use distortions::{
    all_distortions, by_category, by_id, CognitiveDistortion, DistortionCategory, DistortionTag,
};
pub use improvement::{compute, compute_with, round1, ImprovementLevel, ImprovementResult};
pub use validation::{emotion_issues, validate_emotions, InputError};
