use console::{measure_text_width, Style};

use crate::records::{
    completion_rate, ActivityAnalysis, ActivityRecord, BehaviorExperiment, Comparison,
    DistortionCount, EmotionCount, JournalEntry, Outcome,
};
use crate::scoring::{
    resolve_type_with, ActivityColor, ColorModel, EmotionEntry, EmotionType, FallbackPolicy,
    ImprovementLevel, ImprovementResult, InputError,
};

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_indent() -> String {
    dim().apply_to(format!("{}   ", TREE_VERT)).to_string()
}

fn branch_for(i: usize, count: usize) -> String {
    if i + 1 == count {
        tree_end()
    } else {
        tree_branch()
    }
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn load_prefix() -> String {
    blue().apply_to("[LOAD]").to_string()
}

fn stats_prefix() -> String {
    magenta().apply_to("[STATS]").to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.1}", dim().apply_to(sign), value.abs())
}

pub fn color_style(color: ActivityColor) -> Style {
    match color {
        ActivityColor::Red => red(),
        ActivityColor::Orange => Style::new().color256(208),
        ActivityColor::Yellow => yellow(),
        ActivityColor::Blue => blue(),
        ActivityColor::Purple => magenta(),
        ActivityColor::Green => green(),
        ActivityColor::Black => dim(),
    }
}

fn level_style(level: ImprovementLevel) -> Style {
    match level {
        ImprovementLevel::Major | ImprovementLevel::Clear => green().bold(),
        ImprovementLevel::Mild => green(),
        ImprovementLevel::NoChange => dim(),
        ImprovementLevel::Worsened => red().bold(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > max_chars {
        format!("{}...", flat.chars().take(max_chars - 3).collect::<String>())
    } else {
        flat
    }
}

pub fn log_load_start(path: &str) {
    println!("{} reading {}...", load_prefix(), cyan().apply_to(path));
}

pub fn log_load_done(journal: usize, activity: usize, experiments: usize) {
    println!(
        "{} {} thought records, {} activity records, {} experiments",
        load_prefix(),
        bold().apply_to(journal),
        bold().apply_to(activity),
        bold().apply_to(experiments)
    );
}

pub fn log_load_error(error: &str) {
    eprintln!(
        "{} {} {}",
        load_prefix(),
        red().apply_to("failed:"),
        dim().apply_to(error)
    );
}

pub fn log_policies(fallback: FallbackPolicy, model: ColorModel) {
    println!(
        "{} unknown emotions: {}, activity colors: {}",
        load_prefix(),
        cyan().apply_to(fallback),
        cyan().apply_to(model)
    );
}

pub fn log_newline() {
    println!();
}

pub fn log_legend(model: ColorModel) {
    let legend = model.legend();
    println!("{}", bold().apply_to("LEGEND"));
    for (i, entry) in legend.iter().enumerate() {
        println!(
            "{}{}{} {}",
            branch_for(i, legend.len()),
            pad_label(
                &color_style(entry.color).apply_to(entry.color).to_string(),
                1
            ),
            entry.condition,
            dim().apply_to(entry.meaning)
        );
    }
}

fn emotion_lines(
    lines: &mut Vec<String>,
    title: &str,
    emotions: &[EmotionEntry],
    policy: FallbackPolicy,
    last: bool,
) {
    let head = if last { tree_end() } else { tree_branch() };
    let indent = if last { "    ".to_string() } else { tree_indent() };
    lines.push(format!("{}{}", head, title));
    if emotions.is_empty() {
        lines.push(format!("{}{}{}", indent, tree_end(), dim().apply_to("none")));
        return;
    }
    for (i, emotion) in emotions.iter().enumerate() {
        let (tag, style) = match resolve_type_with(emotion, policy) {
            Some(EmotionType::Negative) => ("negative", red()),
            Some(EmotionType::Positive) => ("positive", green()),
            None => ("neutral", dim()),
        };
        let manual = if emotion.manual_type.is_some() {
            dim().apply_to(" (manual)").to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "{}{}{}{} {}{}",
            indent,
            branch_for(i, emotions.len()),
            pad_label(&emotion.emotion, 2),
            bold().apply_to(emotion.intensity),
            style.apply_to(tag),
            manual
        ));
    }
}

/// Everything printed for one thought record.
#[derive(Debug, Clone)]
pub struct JournalAssessment<'a> {
    pub entry: &'a JournalEntry,
    pub policy: FallbackPolicy,
    pub improvement: ImprovementResult,
    pub issues: Vec<(&'static str, InputError)>,
}

impl<'a> JournalAssessment<'a> {
    pub fn new(entry: &'a JournalEntry, policy: FallbackPolicy) -> Self {
        let found = entry.issues();
        let issues = found
            .emotions
            .into_iter()
            .map(|e| ("before", e))
            .chain(found.new_emotions.into_iter().map(|e| ("after", e)))
            .collect();
        Self {
            entry,
            policy,
            improvement: entry.improvement_with(policy),
            issues,
        }
    }

    pub fn print(&self) {
        let mut lines: Vec<String> = Vec::new();

        let title = if self.entry.situation.is_empty() {
            self.entry.id.as_str()
        } else {
            self.entry.situation.as_str()
        };
        lines.push(format!(
            "{} \"{}\"",
            magenta().apply_to(bold().apply_to("[THOUGHT RECORD]")),
            dim().apply_to(preview(title, 40))
        ));
        if !self.entry.date_time.is_empty() {
            lines.push(format!(
                "{}{}",
                tree_end(),
                dim().apply_to(&self.entry.date_time)
            ));
        }

        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("EMOTIONS")));
        emotion_lines(&mut lines, "before", &self.entry.emotions, self.policy, false);
        emotion_lines(&mut lines, "after", &self.entry.new_emotions, self.policy, true);

        if !self.issues.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}", bold().apply_to("INPUT ISSUES")));
            for (i, (set, issue)) in self.issues.iter().enumerate() {
                lines.push(format!(
                    "{}{}{}",
                    branch_for(i, self.issues.len()),
                    pad_label(set, 1),
                    yellow().apply_to(issue)
                ));
            }
        }

        let result = &self.improvement;
        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("IMPROVEMENT")));
        if result.is_finite() {
            lines.push(format!(
                "{}{}{}",
                tree_branch(),
                pad_label("negative reduction", 1),
                format_signed(result.negative_improvement)
            ));
            lines.push(format!(
                "{}{}{}",
                tree_branch(),
                pad_label("positive increase", 1),
                format_signed(result.positive_increase)
            ));
            lines.push(format!(
                "{}{}{}",
                tree_branch(),
                pad_label("overall", 1),
                format_signed(result.overall_improvement)
            ));
            lines.push(format!(
                "{}{} {}",
                tree_end(),
                pad_label("result", 1),
                level_style(result.level).apply_to(&result.improvement_description)
            ));
        } else {
            lines.push(format!(
                "{}{} {}",
                tree_end(),
                pad_label("result", 1),
                red().apply_to("not computable (invalid intensity)")
            ));
        }

        println!("{}\n", lines.join("\n"));
    }
}

pub fn log_emotion_frequency(title: &str, counts: &[EmotionCount]) {
    println!("{} {}", stats_prefix(), bold().apply_to(title));
    if counts.is_empty() {
        println!("{}{}", tree_end(), dim().apply_to("none"));
        return;
    }
    for (i, c) in counts.iter().enumerate() {
        println!(
            "{}{}{}",
            branch_for(i, counts.len()),
            pad_label(&c.emotion, 1),
            bold().apply_to(c.count)
        );
    }
}

pub fn log_distortion_frequency(counts: &[DistortionCount]) {
    println!("{} {}", stats_prefix(), bold().apply_to("cognitive distortions"));
    if counts.is_empty() {
        println!("{}{}", tree_end(), dim().apply_to("none"));
        return;
    }
    for (i, c) in counts.iter().enumerate() {
        println!(
            "{}{}{} {}",
            branch_for(i, counts.len()),
            pad_label(c.name, 1),
            bold().apply_to(c.count),
            dim().apply_to(format!("({})", c.category.info().name))
        );
    }
}

pub fn print_activity_record(record: &ActivityRecord, model: ColorModel, analysis: &ActivityAnalysis) {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "{} {}",
        blue().apply_to(bold().apply_to("[ACTIVITY RECORD]")),
        dim().apply_to(&record.date)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SLOTS")));
    let logged: Vec<_> = record
        .entries
        .iter()
        .filter(|e| !e.activity.trim().is_empty())
        .collect();
    if logged.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    }
    for (i, entry) in logged.iter().enumerate() {
        let color = entry.color(model);
        let excluded = if entry.exclude_from_stats {
            dim().apply_to(" (excluded)").to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "{}{}{} P{} A{} {}{}",
            branch_for(i, logged.len()),
            pad_label(&entry.time_slot, 1),
            preview(&entry.activity, 16),
            bold().apply_to(entry.pleasure),
            bold().apply_to(entry.achievement),
            color_style(color).apply_to(color),
            excluded
        ));
    }

    let invalid = record.invalid_time_slots();
    if !invalid.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("INPUT ISSUES")));
        for (i, slot) in invalid.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                branch_for(i, invalid.len()),
                yellow().apply_to(format!("time slot {slot:?} is not HH:MM-HH:MM"))
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("COLORS")));
    let colors: Vec<_> = analysis.color_distribution.iter().collect();
    for (i, (color, count)) in colors.iter().enumerate() {
        lines.push(format!(
            "{}{}{}",
            branch_for(i, colors.len()),
            pad_label(&color_style(**color).apply_to(color).to_string(), 1),
            count
        ));
    }

    let stats = &record.stats;
    let or_none = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SUMMARY")));
    lines.push(format!(
        "{}{}{:.1} / {:.1}",
        tree_branch(),
        pad_label("average P / A", 1),
        stats.average_pleasure,
        stats.average_achievement
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("peak pleasure", 1),
        or_none(&analysis.peak_pleasure_time)
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("peak achievement", 1),
        or_none(&analysis.peak_achievement_time)
    ));
    lines.push(format!(
        "{}{}{}",
        tree_end(),
        pad_label("low energy slots", 1),
        analysis.low_energy_periods.len()
    ));

    if !analysis.recommendations.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", bold().apply_to("RECOMMENDATIONS")));
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                branch_for(i, analysis.recommendations.len()),
                cyan().apply_to(rec)
            ));
        }
    }

    println!("{}\n", lines.join("\n"));
}

fn comparison_style(c: &Comparison) -> Style {
    match c.outcome {
        Outcome::Better => green(),
        Outcome::Worse => red(),
        Outcome::AsExpected => dim(),
    }
}

pub fn print_experiments(experiments: &[BehaviorExperiment]) {
    let completed = experiments.iter().filter(|e| e.is_completed()).count();
    println!(
        "{} {} {}/{} completed ({}%)",
        stats_prefix(),
        bold().apply_to("behavior experiments"),
        bold().apply_to(completed),
        experiments.len(),
        completion_rate(experiments)
    );
    for (i, experiment) in experiments.iter().enumerate() {
        let plan = &experiment.plan;
        let title = if plan.planned_action.is_empty() {
            plan.id.as_str()
        } else {
            plan.planned_action.as_str()
        };
        let detail = match (experiment.joy_comparison(), experiment.achievement_comparison()) {
            (Some(joy), Some(achievement)) => format!(
                "joy {} achievement {}",
                comparison_style(&joy).apply_to(joy),
                comparison_style(&achievement).apply_to(achievement)
            ),
            _ => dim().apply_to("planned").to_string(),
        };
        println!(
            "{}{}{}",
            branch_for(i, experiments.len()),
            pad_label(&preview(title, 16), 1),
            detail
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_label_aligns_values() {
        let padded = pad_label("overall", 1);
        assert_eq!(measure_text_width(&padded), VALUE_COLUMN - TREE_PREFIX_WIDTH);
    }

    #[test]
    fn test_pad_label_wide_text() {
        // Full-width characters count double.
        let padded = pad_label("不安", 2);
        assert_eq!(measure_text_width(&padded), VALUE_COLUMN - 2 * TREE_PREFIX_WIDTH);
        let long = "x".repeat(40);
        assert_eq!(pad_label(&long, 1), format!("{long} "));
    }

    #[test]
    fn test_format_signed() {
        console::set_colors_enabled(false);
        assert_eq!(format_signed(2.5), "+2.5");
        assert_eq!(format_signed(-0.4), "-0.4");
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        assert_eq!(preview("会議で発言できなかった", 6), "会議で...");
        assert_eq!(preview("短い\n文", 10), "短い 文");
    }

    #[test]
    fn test_comparison_style_tracks_outcome() {
        console::set_colors_enabled(false);
        let better = crate::records::comparison(20.0, 45.0);
        assert_eq!(comparison_style(&better).apply_to(better).to_string(), "+25点");
        print_experiments(&[]);
    }
}
