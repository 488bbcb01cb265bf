//! Lookup command: which LTWA rule applies to a word.

use clap::Args;
use iso4_core::{Config, selector};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::DictionaryArgs;

/// Arguments for the `lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// The title word to look up.
    pub word: String,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

/// Print the rule the selector picks for a word.
#[instrument(name = "cmd_lookup", skip_all, fields(word = %args.word))]
pub fn cmd_lookup(args: LookupArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing lookup command");

    let store = args.dictionary.load(config)?;
    let report = selector::lookup(&store, &args.word)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.rule {
        Some(rule) => {
            let abbreviation = rule.abbreviation.as_deref().unwrap_or("(kept as written)");
            println!(
                "{} -> {} {}",
                rule.word.cyan(),
                abbreviation.bold(),
                format!("[{}, {} candidate(s)]", rule.kind, report.candidates).dimmed()
            );
        }
        None => println!("{}: {}", report.word, "no LTWA rule".yellow()),
    }

    Ok(())
}
