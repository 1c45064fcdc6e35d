use anyhow::{Context, Result};
use cbt_journal::records::{
    analyze, distortion_frequency, negative_emotion_frequency, positive_emotion_frequency,
    Export,
};
use cbt_journal::scoring::{ColorModel, FallbackPolicy};
use cbt_journal::settings::settings;
use cbt_journal::utils::{
    log_distortion_frequency, log_emotion_frequency, log_legend, log_load_done, log_load_error,
    log_load_start, log_newline, log_policies, print_activity_record, print_experiments,
    JournalAssessment,
};
use std::env;
use std::path::Path;
use std::process;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    eprintln!("Usage: cbt-journal <export.json> [--pairwise|-p] [--neutral|-n]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <export.json>  Backup or recovery file, or a bare array of thought records");
    eprintln!("  --pairwise     Use the seven-color pairwise activity rules");
    eprintln!("  --neutral      Leave unrecognized emotions out of scoring");
}

fn init_tracing() -> Result<()> {
    let filter = env::var("CBT_LOG").unwrap_or_else(|_| "cbt_journal=warn".to_string());
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).context("invalid CBT_LOG filter")?)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        );
    set_global_default(subscriber).context("failed to set tracing subscriber")
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let pairwise = args.iter().any(|a| a == "--pairwise" || a == "-p");
    let neutral = args.iter().any(|a| a == "--neutral" || a == "-n");
    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let [path] = paths.as_slice() else {
        print_usage();
        process::exit(1);
    };

    let s = settings();
    let model = if pairwise {
        ColorModel::Pairwise
    } else {
        s.activity.color_model
    };
    let policy = if neutral {
        FallbackPolicy::Neutral
    } else {
        s.classification.fallback
    };

    log_load_start(path);
    let export = match Export::load(Path::new(path.as_str())) {
        Ok(export) => export,
        Err(e) => {
            log_load_error(&format!("{e:#}"));
            process::exit(1);
        }
    };
    log_load_done(
        export.journal.len(),
        export.activity.len(),
        export.experiments.len(),
    );
    log_policies(policy, model);
    log_newline();

    for entry in &export.journal {
        JournalAssessment::new(entry, policy).print();
    }

    if !export.journal.is_empty() {
        let limit = s.stats.frequency_limit;
        log_emotion_frequency(
            "negative emotions (before)",
            &negative_emotion_frequency(&export.journal, policy, limit),
        );
        log_newline();
        log_emotion_frequency(
            "positive emotions (after)",
            &positive_emotion_frequency(&export.journal, policy, limit),
        );
        log_newline();
        log_distortion_frequency(&distortion_frequency(&export.journal));
        log_newline();
    }

    if !export.activity.is_empty() {
        log_legend(model);
        log_newline();
        for record in &export.activity {
            let analysis = analyze(&record.entries, model, &s.analysis);
            print_activity_record(record, model, &analysis);
        }
    }

    if !export.experiments.is_empty() {
        print_experiments(&export.experiments);
        log_newline();
    }

    Ok(())
}
