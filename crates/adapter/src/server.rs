//! MCP protocol surface over the API-search tool source.

use apisearch_tools::runtime::ApiSearchToolSource;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler};

/// Version reported to clients, with a fallback for builds outside cargo.
const VERSION: &str = match option_env!("CARGO_PKG_VERSION") {
    Some(version) => version,
    None => "0.1.0",
};

#[derive(Clone)]
pub struct ApiSearchServer {
    source: ApiSearchToolSource,
}

impl ApiSearchServer {
    #[must_use]
    pub fn new(source: ApiSearchToolSource) -> Self {
        Self { source }
    }
}

impl ServerHandler for ApiSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "apisearch-mcp".to_string(),
                version: VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Look up OpenAPI specifications: getApiOverview lists an API's operations, \
                 getApiOperation returns the details of one operation."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.source.list_tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        match self
            .source
            .call_tool(&request.name, request.arguments)
            .await
        {
            Ok(result) => Ok(result),
            // Tool faults never cross the protocol boundary as JSON-RPC
            // errors; the host always gets a well-formed, error-flagged
            // result envelope.
            Err(e) => {
                tracing::warn!(tool = %request.name, error = %e, "tool call failed");
                Ok(error_result(&e.to_string()))
            }
        }
    }
}

fn error_result(message: &str) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format!("Error: {message}"))],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}
