//! MCP tool surface for the API-search service.
//!
//! This module owns the static tool registry and the call dispatch: each
//! exposed tool resolves to a handler that formats the identifier, calls the
//! upstream gateway, and wraps the body in a single text content block.

use crate::config::{OutputFormat, UpstreamConfig};
use crate::error::{ApiSearchError, Result};
use crate::ident::format_api_id;
use crate::upstream::UpstreamClient;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool name for the specification overview fetch.
pub const OVERVIEW_TOOL: &str = "getApiOverview";
/// Tool name for the single-operation detail fetch.
pub const OPERATION_TOOL: &str = "getApiOperation";

/// API-search tool source exposing the two upstream endpoints as MCP tools.
///
/// The registry is fixed at construction time; the instance is immutable and
/// cheap to clone (all clones share one HTTP client). Every descriptor in
/// [`Self::list_tools`] must have a matching dispatch arm in
/// [`Self::call_tool`]; the two are kept in sync by hand.
#[derive(Clone)]
pub struct ApiSearchToolSource {
    inner: Arc<ApiSearchToolSourceInner>,
}

struct ApiSearchToolSourceInner {
    client: UpstreamClient,
    tools: Vec<Tool>,
}

impl ApiSearchToolSource {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            inner: Arc::new(ApiSearchToolSourceInner {
                client: UpstreamClient::new(config),
                tools: tool_descriptors(),
            }),
        }
    }

    /// List the MCP `Tool`s exposed by this source. No side effects.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        self.inner.tools.clone()
    }

    /// Execute a tool call against this source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the tool name is unknown
    /// - a required parameter is missing or has the wrong type/value
    /// - the upstream request fails (transport, non-2xx, or a malformed
    ///   JSON body when JSON output was requested)
    pub async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult> {
        let args = arguments.unwrap_or_default();

        let text = match tool_name {
            OVERVIEW_TOOL => {
                let call = OverviewArgs::from_arguments(&args)?;
                tracing::debug!(id = %call.id, format = ?call.format, "dispatching overview fetch");
                self.inner
                    .client
                    .fetch_overview(&format_api_id(&call.id), call.format)
                    .await?
            }
            OPERATION_TOOL => {
                let call = OperationArgs::from_arguments(&args)?;
                tracing::debug!(
                    id = %call.id,
                    operation = %call.operation_id_or_route,
                    format = ?call.format,
                    "dispatching operation fetch"
                );
                self.inner
                    .client
                    .fetch_operation(
                        &format_api_id(&call.id),
                        &call.operation_id_or_route,
                        call.format,
                    )
                    .await?
            }
            other => return Err(ApiSearchError::UnknownTool(other.to_string())),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Validated arguments for [`OVERVIEW_TOOL`].
struct OverviewArgs {
    id: String,
    format: OutputFormat,
}

impl OverviewArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self> {
        Ok(Self {
            id: require_string(args, "id")?,
            format: optional_format(args)?,
        })
    }
}

/// Validated arguments for [`OPERATION_TOOL`].
struct OperationArgs {
    id: String,
    operation_id_or_route: String,
    format: OutputFormat,
}

impl OperationArgs {
    fn from_arguments(args: &JsonObject) -> Result<Self> {
        Ok(Self {
            id: require_string(args, "id")?,
            operation_id_or_route: require_string(args, "operationIdOrRoute")?,
            format: optional_format(args)?,
        })
    }
}

fn require_string(args: &JsonObject, name: &str) -> Result<String> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ApiSearchError::MissingParameter(name.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ApiSearchError::InvalidParameter(format!(
            "'{name}' must be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn optional_format(args: &JsonObject) -> Result<OutputFormat> {
    match args.get("format") {
        None | Some(Value::Null) => Ok(OutputFormat::default()),
        Some(Value::String(s)) => OutputFormat::parse(s).ok_or_else(|| {
            ApiSearchError::InvalidParameter(format!(
                "'format' must be \"json\" or \"yaml\", got \"{s}\""
            ))
        }),
        Some(other) => Err(ApiSearchError::InvalidParameter(format!(
            "'format' must be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn tool_descriptors() -> Vec<Tool> {
    vec![
        Tool::new(
            OVERVIEW_TOOL,
            "Get an overview of an OpenAPI specification: available operations and top-level \
             metadata for the given API identifier.",
            schema_object(json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "API identifier: a known id (e.g. 'openai') or a spec URL (https://...)"
                    },
                    "format": format_property(),
                },
                "required": ["id"],
            })),
        ),
        Tool::new(
            OPERATION_TOOL,
            "Get details about a specific operation from an OpenAPI specification, addressed by \
             operationId or route.",
            schema_object(json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "API identifier: a known id (e.g. 'openai') or a spec URL (https://...)"
                    },
                    "operationIdOrRoute": {
                        "type": "string",
                        "description": "operationId, or the route of the operation"
                    },
                    "format": format_property(),
                },
                "required": ["id", "operationIdOrRoute"],
            })),
        ),
    ]
}

fn format_property() -> Value {
    json!({
        "type": "string",
        "enum": ["json", "yaml"],
        "default": "json",
        "description": "Output encoding for the response"
    })
}

fn schema_object(schema: Value) -> Arc<JsonObject> {
    Arc::new(schema.as_object().cloned().unwrap_or_else(JsonObject::new))
}
