//! Abbreviate command: ISO 4 abbreviation of journal titles.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use iso4_core::{CombinedRulePolicy, Config, Outcome, TitleReport};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::{DictionaryArgs, batch_progress, build_abbreviator, collect_inputs};

/// Arguments for the `abbreviate` subcommand.
#[derive(Args, Debug, Default)]
pub struct AbbreviateArgs {
    /// Titles to abbreviate.
    pub titles: Vec<String>,

    /// Read titles from a file, one per line.
    #[arg(long, value_name = "PATH")]
    pub file: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Omit-word list, one word per line; overrides config.
    #[arg(long, value_name = "PATH")]
    pub omit_words: Option<Utf8PathBuf>,

    /// What to do with combined prefix+suffix rules.
    #[arg(long, value_enum)]
    pub combined_rule: Option<CombinedRulePolicy>,
}

/// Abbreviate every title and print one result per line.
#[instrument(name = "cmd_abbreviate", skip_all, fields(titles = args.titles.len()))]
pub fn cmd_abbreviate(
    args: AbbreviateArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, policy = ?args.combined_rule, "executing abbreviate command");

    let abbreviator = build_abbreviator(
        config,
        &args.dictionary,
        args.omit_words.as_deref(),
        args.combined_rule,
    )?;
    let titles = collect_inputs(args.titles, args.file.as_deref(), max_input_bytes)?;

    let progress = batch_progress(titles.len(), global_json);
    let mut reports = Vec::with_capacity(titles.len());
    for title in &titles {
        let report = abbreviator
            .abbreviate_detailed(title)
            .with_context(|| format!("failed to abbreviate \"{title}\""))?;
        progress.inc(1);
        reports.push(report);
    }
    progress.finish_and_clear();

    if global_json {
        if let [report] = reports.as_slice() {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(())
}

fn print_report(report: &TitleReport) {
    let unsupported = report
        .tokens
        .iter()
        .filter(|t| t.outcome == Outcome::Unsupported)
        .count();
    if unsupported > 0 {
        println!(
            "{} {}",
            report.abbreviation,
            format!("({unsupported} word(s) kept: combined rule)").yellow()
        );
    } else {
        println!("{}", report.abbreviation);
    }
}
