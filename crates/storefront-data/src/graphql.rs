//! GraphQL client for the CMS endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FetchClient, FetchError, HttpTransport, RetryPolicy, Transport};

/// Something that can answer a GraphQL query with its `data` member.
///
/// [`GraphqlClient`] is the network implementation; tests plug in canned
/// providers.
pub trait QueryProvider {
    fn query(&self, query: &str, variables: Value) -> Result<Value, FetchError>;
}

impl<P: QueryProvider + ?Sized> QueryProvider for &P {
    fn query(&self, query: &str, variables: Value) -> Result<Value, FetchError> {
        (**self).query(query, variables)
    }
}

impl<P: QueryProvider + ?Sized> QueryProvider for Box<P> {
    fn query(&self, query: &str, variables: Value) -> Result<Value, FetchError> {
        (**self).query(query, variables)
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
}

/// POSTs `{query, variables}` to one endpoint and unwraps `data`.
pub struct GraphqlClient<T: Transport = HttpTransport> {
    fetch: FetchClient<T>,
    endpoint: String,
    retry: RetryPolicy,
}

impl GraphqlClient<HttpTransport> {
    /// Client over the network with the default retry policy.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_transport(endpoint, HttpTransport::new())
    }
}

impl<T: Transport> GraphqlClient<T> {
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            fetch: FetchClient::with_transport(transport)
                .with_default_header("Content-Type", "application/json"),
            endpoint: endpoint.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        self.fetch.transport()
    }

    /// Run a query, retrying per the client's policy.
    ///
    /// - non-2xx: [`FetchError::HttpError`]
    /// - non-empty `errors`: [`FetchError::GraphqlError`] with the
    ///   messages joined by `", "`
    /// - no `data`: [`FetchError::NoData`]
    pub fn request(&self, query: &str, variables: Value) -> Result<Value, FetchError> {
        self.retry.run(|_| self.request_once(query, &variables))
    }

    fn request_once(&self, query: &str, variables: &Value) -> Result<Value, FetchError> {
        let response = self
            .fetch
            .post(self.endpoint.as_str())
            .json(&GraphqlRequest { query, variables })?
            .send()?
            .error_for_status()?;

        let result: GraphqlResponse = response.json()?;
        if !result.errors.is_empty() {
            let message = result
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(FetchError::GraphqlError(message));
        }

        match result.data {
            Some(Value::Null) | None => Err(FetchError::NoData),
            Some(data) => Ok(data),
        }
    }
}

impl<T: Transport> QueryProvider for GraphqlClient<T> {
    fn query(&self, query: &str, variables: Value) -> Result<Value, FetchError> {
        self.request(query, variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackoffStrategy, CannedTransport, Method};
    use serde_json::json;

    fn client(transport: CannedTransport) -> GraphqlClient<CannedTransport> {
        GraphqlClient::with_transport("https://cms.example/graphql", transport)
            .with_retry(RetryPolicy::none())
    }

    #[test]
    fn test_request_posts_query_and_variables() {
        let gql = client(CannedTransport::new().respond_json(
            200,
            json!({ "data": { "products": { "nodes": [] } } }),
        ));
        let data = gql.request("query Q { products { nodes { slug } } }", json!({ "first": 8 }))
            .unwrap();
        assert_eq!(data, json!({ "products": { "nodes": [] } }));

        let sent = &gql.transport().requests()[0];
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.full_url(), "https://cms.example/graphql");
        assert_eq!(sent.header_value("content-type"), Some("application/json"));
        let body = sent.body_json().unwrap();
        assert_eq!(body["variables"]["first"], 8);
        assert!(body["query"].as_str().unwrap().starts_with("query Q"));
    }

    #[test]
    fn test_errors_are_joined() {
        let gql = client(CannedTransport::new().respond_json(
            200,
            json!({ "data": null, "errors": [{ "message": "A" }, { "message": "B" }] }),
        ));
        assert_eq!(
            gql.request("{ x }", json!({})).unwrap_err(),
            FetchError::GraphqlError("A, B".to_string())
        );
    }

    #[test]
    fn test_empty_errors_array_is_fine() {
        let gql = client(
            CannedTransport::new().respond_json(200, json!({ "data": { "x": 1 }, "errors": [] })),
        );
        assert_eq!(gql.request("{ x }", json!({})).unwrap(), json!({ "x": 1 }));
    }

    #[test]
    fn test_missing_data() {
        let gql = client(
            CannedTransport::new()
                .respond_json(200, json!({}))
                .respond_json(200, json!({ "data": null })),
        );
        assert_eq!(gql.request("{ x }", json!({})).unwrap_err(), FetchError::NoData);
        assert_eq!(gql.request("{ x }", json!({})).unwrap_err(), FetchError::NoData);
    }

    #[test]
    fn test_http_error_status() {
        let gql = client(CannedTransport::new().respond_json(503, json!({})));
        assert_eq!(gql.request("{ x }", json!({})).unwrap_err().status(), Some(503));
    }

    #[test]
    fn test_retries_failed_queries() {
        let gql = GraphqlClient::with_transport(
            "https://cms.example/graphql",
            CannedTransport::new()
                .fail(FetchError::Timeout)
                .respond_json(500, json!({}))
                .respond_json(200, json!({ "data": { "ok": true } })),
        )
        .with_retry(RetryPolicy::default().with_backoff(BackoffStrategy::None));

        assert_eq!(gql.request("{ ok }", json!({})).unwrap(), json!({ "ok": true }));
        assert_eq!(gql.transport().request_count(), 3);
    }
}
