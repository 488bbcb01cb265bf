//! Command implementations.

use std::io::IsTerminal;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use iso4_core::{Abbreviator, CombinedRulePolicy, Config, LtwaDictionary, OmitWords};

pub mod abbreviate;
pub mod info;
pub mod lookup;
pub mod normalize;
#[cfg(feature = "mcp")]
pub mod serve;

/// Batches at least this long get a progress bar.
const PROGRESS_THRESHOLD: usize = 50;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Collect inputs from positional arguments or a file (one per line).
///
/// Blank lines in the file are skipped. Fails when neither source was given.
pub fn collect_inputs(
    positional: Vec<String>,
    file: Option<&Utf8Path>,
    max_bytes: Option<usize>,
) -> anyhow::Result<Vec<String>> {
    let mut inputs = positional;
    if let Some(path) = file {
        let content = read_input_file(path, max_bytes)?;
        inputs.extend(
            content
                .lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
    }
    if inputs.is_empty() {
        bail!("nothing to process: pass text arguments or --file");
    }
    Ok(inputs)
}

/// Dictionary selection shared by the lookup-backed commands.
#[derive(Args, Debug, Default, Clone)]
pub struct DictionaryArgs {
    /// LTWA dictionary file (.tsv or .json); overrides config
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<Utf8PathBuf>,
}

impl DictionaryArgs {
    /// Load the dictionary named on the command line or in config.
    pub fn load(&self, config: &Config) -> anyhow::Result<LtwaDictionary> {
        let Some(path) = self.dictionary.as_ref().or(config.dictionary.as_ref()) else {
            bail!(
                "no LTWA dictionary configured: pass --dictionary or set `dictionary` in config"
            );
        };
        let dictionary = LtwaDictionary::from_path(path)
            .with_context(|| format!("failed to load dictionary {path}"))?;
        tracing::debug!(%path, entries = dictionary.len(), "dictionary loaded");
        Ok(dictionary)
    }
}

/// Assemble an abbreviator from config plus command-line overrides.
pub fn build_abbreviator(
    config: &Config,
    dictionary: &DictionaryArgs,
    omit_words: Option<&Utf8Path>,
    combined_rule: Option<CombinedRulePolicy>,
) -> anyhow::Result<Abbreviator<LtwaDictionary>> {
    let store = dictionary.load(config)?;
    let omit = match omit_words {
        Some(path) => {
            OmitWords::load(path).with_context(|| format!("failed to load omit words {path}"))?
        }
        None => config.omit_word_set(),
    };
    let policy = combined_rule.unwrap_or(config.combined_rule);
    Ok(Abbreviator::new(store, omit).with_combined_rule(policy))
}

/// A progress bar for long batches on an interactive terminal, hidden otherwise.
pub fn batch_progress(total: usize, json: bool) -> ProgressBar {
    if json || total < PROGRESS_THRESHOLD || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{wide_bar:.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
