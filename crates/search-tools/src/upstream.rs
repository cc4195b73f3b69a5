//! Upstream gateway for the API-search service.
//!
//! Two fixed GET endpoints are supported: the specification overview and a
//! single operation summary. The identifier and operation segments arrive
//! already delimiter-safe (see [`crate::ident`]) and are inserted into the
//! URL verbatim, with no additional percent-encoding.

use crate::config::{OutputFormat, UpstreamConfig};
use crate::error::{ApiSearchError, Result};
use reqwest::Client;
use url::Url;

/// HTTP client for the upstream API-search service.
///
/// Cheap to clone; all clones share one connection pool. Each call performs
/// a single request attempt with no retry, and a timeout only when one is
/// configured (see [`UpstreamConfig::timeout`]).
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch the overview of a specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level, the
    /// upstream answers non-2xx, or a JSON-formatted body does not parse.
    pub async fn fetch_overview(
        &self,
        formatted_id: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.fetch(&format!("overview/{formatted_id}"), format)
            .await
    }

    /// Fetch the summary of a single operation, addressed by operationId or
    /// route.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_overview`].
    pub async fn fetch_operation(
        &self,
        formatted_id: &str,
        operation_id_or_route: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.fetch(
            &format!("summary/{formatted_id}/{operation_id_or_route}"),
            format,
        )
        .await
    }

    async fn fetch(&self, path: &str, format: OutputFormat) -> Result<String> {
        let raw = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));
        let url = Url::parse(&raw)
            .map_err(|e| ApiSearchError::Transport(format!("invalid request URL '{raw}': {e}")))?;

        tracing::debug!(%url, accept = format.accept_header(), "fetching upstream");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, format.accept_header());
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "upstream returned failure");
            return Err(ApiSearchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        match format {
            // The upstream is trusted to emit valid YAML when asked for it;
            // the body is relayed untouched.
            OutputFormat::Yaml => Ok(body),
            OutputFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(&body)
                    .map_err(|source| ApiSearchError::MalformedResponse { source })?;
                serde_json::to_string_pretty(&value)
                    .map_err(|source| ApiSearchError::MalformedResponse { source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UpstreamClient;
    use crate::config::{OutputFormat, UpstreamConfig};
    use crate::error::ApiSearchError;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::get;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    struct Fixture {
        base_url: String,
        shutdown: oneshot::Sender<()>,
        handle: JoinHandle<std::io::Result<()>>,
    }

    impl Fixture {
        async fn serve(app: Router) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let addr = listener.local_addr().expect("local_addr");
            let (shutdown, shutdown_rx) = oneshot::channel::<()>();
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let handle = tokio::spawn(async move { server.await });
            Self {
                base_url: format!("http://{addr}"),
                shutdown,
                handle,
            }
        }

        async fn finish(self) {
            let _ = self.shutdown.send(());
            self.handle
                .await
                .expect("server task join")
                .expect("server result");
        }
    }

    fn client_for(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig {
            base_url: base_url.to_string(),
            timeout: None,
        })
    }

    #[tokio::test]
    async fn overview_json_is_pretty_printed_and_negotiated() {
        async fn overview(Path(id): Path<String>, headers: HeaderMap) -> axum::Json<Value> {
            let accept = headers
                .get(axum::http::header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            axum::Json(json!({ "id": id, "accept": accept }))
        }

        let fixture = Fixture::serve(Router::new().route("/overview/{id}", get(overview))).await;
        let client = client_for(&fixture.base_url);

        let text = client
            .fetch_overview("a.b__c", OutputFormat::Json)
            .await
            .expect("fetch_overview");

        let expected = json!({ "id": "a.b__c", "accept": "application/json" });
        assert_eq!(text, serde_json::to_string_pretty(&expected).expect("pretty"));
        // 2-space indentation, one key per line.
        assert!(text.contains("\n  \"accept\""));

        fixture.finish().await;
    }

    #[tokio::test]
    async fn operation_path_has_both_segments() {
        async fn echo_path(uri: Uri) -> axum::Json<Value> {
            axum::Json(json!({ "path": uri.path() }))
        }

        let fixture =
            Fixture::serve(Router::new().route("/summary/{id}/{op}", get(echo_path))).await;
        let client = client_for(&fixture.base_url);

        let text = client
            .fetch_operation("a.b__c", "listPets", OutputFormat::Json)
            .await
            .expect("fetch_operation");

        let echoed: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(echoed["path"], "/summary/a.b__c/listPets");

        fixture.finish().await;
    }

    #[tokio::test]
    async fn yaml_body_is_relayed_byte_for_byte() {
        // Deliberately not valid JSON, so any parse attempt would fail.
        const YAML: &str = "openapi: 3.0.0\npaths:\n  /pets:\n    get: {}\n";

        async fn overview(headers: HeaderMap) -> ([(&'static str, &'static str); 1], String) {
            assert_eq!(
                headers
                    .get(axum::http::header::ACCEPT)
                    .and_then(|v| v.to_str().ok()),
                Some("text/yaml")
            );
            ([("content-type", "text/yaml")], YAML.to_string())
        }

        let fixture = Fixture::serve(Router::new().route("/overview/{id}", get(overview))).await;
        let client = client_for(&fixture.base_url);

        let text = client
            .fetch_overview("petstore", OutputFormat::Yaml)
            .await
            .expect("fetch_overview");
        assert_eq!(text, YAML);

        fixture.finish().await;
    }

    #[tokio::test]
    async fn non_success_status_carries_upstream_body() {
        async fn missing() -> (StatusCode, &'static str) {
            (StatusCode::NOT_FOUND, "not found")
        }

        let fixture = Fixture::serve(Router::new().route("/overview/{id}", get(missing))).await;
        let client = client_for(&fixture.base_url);

        let err = client
            .fetch_overview("nope", OutputFormat::Json)
            .await
            .expect_err("must fail");
        match &err {
            ApiSearchError::Upstream { status, body } => {
                assert_eq!(*status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "not found");

        fixture.finish().await;
    }

    #[tokio::test]
    async fn malformed_json_on_success_is_an_error() {
        async fn bad_json() -> &'static str {
            "this is not json"
        }

        let fixture = Fixture::serve(Router::new().route("/overview/{id}", get(bad_json))).await;
        let client = client_for(&fixture.base_url);

        let err = client
            .fetch_overview("petstore", OutputFormat::Json)
            .await
            .expect_err("must fail");
        assert!(matches!(err, ApiSearchError::MalformedResponse { .. }));

        fixture.finish().await;
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1");

        let err = client
            .fetch_overview("petstore", OutputFormat::Json)
            .await
            .expect_err("must fail");
        assert!(matches!(err, ApiSearchError::Transport(_)));
    }
}
