//! Serve command: MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use iso4_core::{CombinedRulePolicy, Config};
use rmcp::ServiceExt;
use tracing::{info, instrument};

use super::{DictionaryArgs, build_abbreviator};
use crate::server::Iso4Server;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Omit-word list, one word per line; overrides config.
    #[arg(long, value_name = "PATH")]
    pub omit_words: Option<Utf8PathBuf>,

    /// What to do with combined prefix+suffix rules.
    #[arg(long, value_enum)]
    pub combined_rule: Option<CombinedRulePolicy>,
}

/// Load the dictionary once and serve MCP requests until stdin closes.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let abbreviator = build_abbreviator(
        &config,
        &args.dictionary,
        args.omit_words.as_deref(),
        args.combined_rule,
    )?;
    info!(
        entries = abbreviator.store().len(),
        policy = %abbreviator.combined_rule(),
        "starting MCP server on stdio"
    );

    let server = Iso4Server::new(Arc::new(abbreviator), max_input_bytes);
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
