//! Normalize command: capitalization and periods for abbreviated titles.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use iso4_core::{Config, normalize_abbreviation};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{DictionaryArgs, collect_inputs};

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug, Default)]
pub struct NormalizeArgs {
    /// Abbreviated titles to normalize.
    pub texts: Vec<String>,

    /// Read abbreviated titles from a file, one per line.
    #[arg(long, value_name = "PATH")]
    pub file: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

#[derive(Serialize)]
struct NormalizeOutput<'a> {
    input: &'a str,
    normalized: String,
}

/// Normalize each input and print one result per line.
#[instrument(name = "cmd_normalize", skip_all, fields(texts = args.texts.len()))]
pub fn cmd_normalize(
    args: NormalizeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, "executing normalize command");

    let store = args.dictionary.load(config)?;
    let texts = collect_inputs(args.texts, args.file.as_deref(), max_input_bytes)?;

    let mut outputs = Vec::with_capacity(texts.len());
    for text in &texts {
        let normalized = normalize_abbreviation(&store, text)
            .with_context(|| format!("failed to normalize \"{text}\""))?;
        outputs.push(NormalizeOutput {
            input: text,
            normalized,
        });
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for output in &outputs {
            println!("{}", output.normalized);
        }
    }

    Ok(())
}
