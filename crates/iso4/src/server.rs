//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes title abbreviation, normalization, and LTWA lookup to AI
//! assistants over stdio. The server is a presentation layer: every tool
//! delegates to `iso4-core` and returns its report as JSON text.

use std::sync::Arc;

use iso4_core::{AbbreviateError, Abbreviator, LtwaDictionary, selector};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `abbreviate_title` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AbbreviateTitleParams {
    /// Full journal title, words separated by spaces.
    pub title: String,
}

/// Parameters for the `normalize_abbreviation` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct NormalizeParams {
    /// Abbreviated title to normalize.
    pub text: String,
}

/// Parameters for the `lookup_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LookupWordParams {
    /// A single title word.
    pub word: String,
}

#[derive(Serialize)]
struct NormalizeOutput<'a> {
    input: &'a str,
    normalized: String,
}

/// MCP server holding a loaded abbreviator.
#[derive(Clone)]
pub struct Iso4Server {
    abbreviator: Arc<Abbreviator<LtwaDictionary>>,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl Iso4Server {
    /// Create a server over an already-loaded abbreviator.
    pub fn new(
        abbreviator: Arc<Abbreviator<LtwaDictionary>>,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            abbreviator,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "dictionary_entries": self.abbreviator.store().len(),
                "combined_rule": self.abbreviator.combined_rule(),
            }))?
        } else {
            format!(
                "{} v{}\n{}\nLTWA entries: {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.abbreviator.store().len(),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Abbreviate a journal title.
    #[tool(
        description = "Abbreviate a journal title per ISO 4 using the LTWA. Returns the abbreviation and what happened to each word."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn abbreviate_title(
        &self,
        Parameters(params): Parameters<AbbreviateTitleParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "abbreviate_title", "executing MCP tool");
        self.check_size(&params.title)?;

        let report = self
            .abbreviator
            .abbreviate_detailed(&params.title)
            .map_err(|e| match e {
                AbbreviateError::UnsupportedCombinedRule { .. } => {
                    McpError::invalid_params(e.to_string(), None)
                }
                AbbreviateError::Store(_) => McpError::internal_error(e.to_string(), None),
            })?;

        tracing::info!(
            tool = "abbreviate_title",
            words = report.tokens.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Normalize an abbreviated title.
    #[tool(
        description = "Capitalize and add periods to the recognized LTWA abbreviations in an already-abbreviated title."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn normalize_abbreviation(
        &self,
        Parameters(params): Parameters<NormalizeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "normalize_abbreviation", "executing MCP tool");
        self.check_size(&params.text)?;

        let normalized = self
            .abbreviator
            .normalize(&params.text)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let output = NormalizeOutput {
            input: &params.text,
            normalized,
        };
        Ok(CallToolResult::success(vec![Content::text(to_json(&output)?)]))
    }

    /// Show the LTWA rule selected for one word.
    #[tool(
        description = "Look up a single title word in the LTWA. Returns the candidate count and the rule that would be applied."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn lookup_word(
        &self,
        Parameters(params): Parameters<LookupWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "lookup_word", "executing MCP tool");

        let report = selector::lookup(self.abbreviator.store(), &params.word)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }
}

#[tool_handler]
impl ServerHandler for Iso4Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Abbreviate journal titles per ISO 4, normalize abbreviated titles, and look up LTWA rules.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso4_core::{AbbreviationEntry, CombinedRulePolicy, OmitWords};
    use rmcp::model::RawContent;

    fn server_with(policy: CombinedRulePolicy, max: Option<usize>) -> Iso4Server {
        let dictionary: LtwaDictionary = [
            AbbreviationEntry::exact("journal", "j."),
            AbbreviationEntry::new("scienc-", Some("sci.".to_string())),
            AbbreviationEntry::new("-graph-", Some("gr.".to_string())),
        ]
        .into_iter()
        .collect();
        let abbreviator =
            Abbreviator::new(dictionary, OmitWords::builtin()).with_combined_rule(policy);
        Iso4Server::new(Arc::new(abbreviator), max)
    }

    fn server() -> Iso4Server {
        server_with(CombinedRulePolicy::Reject, None)
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&server());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let info = ServerHandler::get_info(&server());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });
        let result = server().get_info(params).expect("get_info should succeed");

        let json = json_of(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["dictionary_entries"], 3);
        assert_eq!(json["combined_rule"], "reject");
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });
        let result = server().get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn abbreviate_title_tool_works() {
        let params = Parameters(AbbreviateTitleParams {
            title: "Journal of Science".to_string(),
        });
        let result = server()
            .abbreviate_title(params)
            .expect("abbreviate_title should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let json = json_of(&result);
        assert_eq!(json["abbreviation"], "J. Sci.");
        assert_eq!(json["tokens"][1]["outcome"], "omitted");
    }

    #[test]
    fn abbreviate_title_rejects_combined_rule() {
        let params = Parameters(AbbreviateTitleParams {
            title: "Biographical Journal".to_string(),
        });
        assert!(server().abbreviate_title(params).is_err());
    }

    #[test]
    fn abbreviate_title_verbatim_policy_keeps_word() {
        let params = Parameters(AbbreviateTitleParams {
            title: "Biographical Journal".to_string(),
        });
        let result = server_with(CombinedRulePolicy::Verbatim, None)
            .abbreviate_title(params)
            .expect("verbatim policy should succeed");
        assert_eq!(json_of(&result)["abbreviation"], "Biographical J.");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let params = Parameters(AbbreviateTitleParams {
            title: "Journal of Science".to_string(),
        });
        assert!(
            server_with(CombinedRulePolicy::Reject, Some(4))
                .abbreviate_title(params)
                .is_err()
        );
    }

    #[test]
    fn normalize_tool_works() {
        let params = Parameters(NormalizeParams {
            text: "j sci".to_string(),
        });
        let result = server()
            .normalize_abbreviation(params)
            .expect("normalize should succeed");
        assert_eq!(json_of(&result)["normalized"], "J. Sci.");
    }

    #[test]
    fn lookup_word_tool_works() {
        let params = Parameters(LookupWordParams {
            word: "Sciences".to_string(),
        });
        let result = server().lookup_word(params).expect("lookup should succeed");
        let json = json_of(&result);
        assert_eq!(json["rule"]["word"], "scienc-");
        assert_eq!(json["rule"]["kind"], "prefix");
    }
}
