//! Generic REST resource client
//!
//! A `ResourceClient` is bound to one `{base_url}/{resource_path}` and turns
//! CRUD calls into `HttpRequest`s for the underlying `Transport`. It does no
//! error handling of its own: every `HttpError` reaches the caller untouched.

use crate::error::HttpError;
use crate::transport::Transport;
use crate::types::{HttpMethod, HttpRequest, HttpResponse, SKIP_ERROR_NOTIFY_HEADER, SKIP_LOADING_HEADER};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One path segment of a resource URL
///
/// Empty segments are skipped when the URL is built; `0` is a real id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment(Option<String>);

impl Segment {
    pub fn none() -> Self {
        Self(None)
    }

    fn trimmed(&self) -> Option<&str> {
        let trimmed = self.0.as_deref()?.trim_matches('/');
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self(Some(value.to_string()))
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<&String> for Segment {
    fn from(value: &String) -> Self {
        Self(Some(value.clone()))
    }
}

macro_rules! segment_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Segment {
            fn from(value: $ty) -> Self {
                Self(Some(value.to_string()))
            }
        })*
    };
}

segment_from_int!(i32, i64, u32, u64, usize);

impl<T: Into<Segment>> From<Option<T>> for Segment {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A scalar query value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Dropped during normalisation
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Query parameters as accepted by the client
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParams {
    /// Already-built ordered pairs, sent exactly as given
    Built(Vec<(String, String)>),
    /// Key → scalar map; nulls are dropped, everything else stringified
    Map(BTreeMap<String, QueryValue>),
}

impl QueryParams {
    /// Start an empty key → value map
    pub fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Add a key to a `Map`; appends a pair to `Built`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        match &mut self {
            Self::Map(map) => {
                map.insert(key.into(), value.into());
            }
            Self::Built(pairs) => {
                let value = value.into();
                if value != QueryValue::Null {
                    pairs.push((key.into(), value.to_string()));
                }
            }
        }
        self
    }

    /// Resolve into the ordered pairs that go on the wire
    pub fn normalize(self) -> Vec<(String, String)> {
        match self {
            Self::Built(pairs) => pairs,
            Self::Map(map) => map
                .into_iter()
                .filter(|(_, value)| *value != QueryValue::Null)
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
        }
    }
}

/// Per-call request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub body: Option<serde_json::Value>,
    pub query: Option<QueryParams>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Keep this call out of the loading tracker
    pub fn skip_loading(self) -> Self {
        self.header(
            HeaderName::from_static(SKIP_LOADING_HEADER),
            HeaderValue::from_static("1"),
        )
    }

    /// Don't raise the global error notification for this call
    pub fn skip_error_notify(self) -> Self {
        self.header(
            HeaderName::from_static(SKIP_ERROR_NOTIFY_HEADER),
            HeaderValue::from_static("1"),
        )
    }
}

/// Client for one REST resource
///
/// # Example
///
/// ```rust,ignore
/// use storefront_http::{ReqwestTransport, ResourceClient, RequestOptions};
/// use std::sync::Arc;
///
/// let transport = Arc::new(ReqwestTransport::new());
/// let products = ResourceClient::new(transport, "http://localhost:8080/api/", "products");
/// let all: Vec<Product> = products.list(RequestOptions::new()).await?;
/// ```
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    resource_path: String,
    common_headers: HeaderMap,
}

impl fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .field("resource_path", &self.resource_path)
            .finish()
    }
}

impl ResourceClient {
    /// Create a client for `{base_url}/{resource_path}`
    ///
    /// # Arguments
    ///
    /// * `transport` - Where requests are sent
    /// * `base_url` - API root; trailing slashes are stripped
    /// * `resource_path` - Resource name relative to the root
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        resource_path: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            resource_path: resource_path.into(),
            common_headers: HeaderMap::new(),
        }
    }

    /// Headers sent with every call; per-call headers override them
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.common_headers = headers;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join base URL, resource path and extra segments
    pub fn build_url(&self, segments: &[Segment]) -> String {
        let mut url = self.base_url.clone();
        let resource = Segment::from(self.resource_path.as_str());
        for part in std::iter::once(&resource)
            .chain(segments)
            .filter_map(Segment::trimmed)
        {
            url.push('/');
            url.push_str(part);
        }
        url
    }

    /// GET the collection
    pub async fn list<T: DeserializeOwned>(&self, options: RequestOptions) -> Result<T, HttpError> {
        let url = self.build_url(&[]);
        self.request(HttpMethod::Get, &url, options).await
    }

    /// GET a single entity
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        id: impl Into<Segment>,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let url = self.build_url(&[id.into()]);
        self.request(HttpMethod::Get, &url, options).await
    }

    /// POST a new entity
    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let url = self.build_url(&[]);
        let options = with_json_body(HttpMethod::Post, &url, body, options)?;
        self.request(HttpMethod::Post, &url, options).await
    }

    /// PUT a full replacement
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        id: impl Into<Segment>,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let url = self.build_url(&[id.into()]);
        let options = with_json_body(HttpMethod::Put, &url, body, options)?;
        self.request(HttpMethod::Put, &url, options).await
    }

    /// PATCH a partial update
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        id: impl Into<Segment>,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let url = self.build_url(&[id.into()]);
        let options = with_json_body(HttpMethod::Patch, &url, body, options)?;
        self.request(HttpMethod::Patch, &url, options).await
    }

    /// DELETE an entity; use `()` as `T` when the server answers with no body
    pub async fn delete<T: DeserializeOwned>(
        &self,
        id: impl Into<Segment>,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let url = self.build_url(&[id.into()]);
        self.request(HttpMethod::Delete, &url, options).await
    }

    /// Send an arbitrary request and decode the JSON answer
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let response = self.send(method, url, options).await?;
        decode(method, url, &response)
    }

    /// Send an arbitrary request and hand back the raw response
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, HttpError> {
        let request = self.prepare(method, url, options);
        log::debug!("{} {}", method, url);
        self.transport.send(request).await
    }

    fn prepare(&self, method: HttpMethod, url: &str, options: RequestOptions) -> HttpRequest {
        let RequestOptions {
            body,
            query,
            headers,
        } = options;

        let mut request = HttpRequest::new(method, url);
        request.headers = merge_headers(&self.common_headers, headers);
        request.query = query.map(QueryParams::normalize).unwrap_or_default();
        request.body = match method {
            HttpMethod::Get | HttpMethod::Delete => None,
            _ => body,
        };
        request
    }
}

/// Per-call headers replace common headers of the same name
fn merge_headers(common: &HeaderMap, call: HeaderMap) -> HeaderMap {
    let mut merged = common.clone();
    for name in call.keys() {
        merged.remove(name);
    }
    for (name, value) in call.iter() {
        merged.append(name.clone(), value.clone());
    }
    merged
}

fn with_json_body<B: Serialize>(
    method: HttpMethod,
    url: &str,
    body: &B,
    options: RequestOptions,
) -> Result<RequestOptions, HttpError> {
    let value = serde_json::to_value(body).map_err(|e| {
        HttpError::invalid_request(method, url, format!("failed to encode request body: {}", e))
    })?;
    Ok(options.body(value))
}

fn decode<T: DeserializeOwned>(
    method: HttpMethod,
    url: &str,
    response: &HttpResponse,
) -> Result<T, HttpError> {
    let bytes: &[u8] = if response.body.is_empty() {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(bytes).map_err(|e| HttpError::decode(method, url, response.status, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    /// Records every request and answers with a canned result
    #[derive(Clone)]
    struct RecordingTransport {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        reply: Result<HttpResponse, HttpError>,
    }

    impl RecordingTransport {
        fn ok(body: serde_json::Value) -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                reply: Ok(HttpResponse::json(&body).unwrap()),
            }
        }

        fn empty() -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                reply: Ok(HttpResponse::new(204, Vec::new())),
            }
        }

        fn failing(error: HttpError) -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                reply: Err(error),
            }
        }

        fn last(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn client(transport: &RecordingTransport) -> ResourceClient {
        ResourceClient::new(Arc::new(transport.clone()), "http://localhost:8080/api/", "items")
    }

    #[test]
    fn test_build_url_joins_and_trims_segments() {
        let transport = RecordingTransport::empty();
        let client = client(&transport);

        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.build_url(&[]), "http://localhost:8080/api/items");
        assert_eq!(
            client.build_url(&["/nested/".into(), 42u32.into()]),
            "http://localhost:8080/api/items/nested/42"
        );
    }

    #[test]
    fn test_build_url_skips_empty_but_keeps_zero() {
        let transport = RecordingTransport::empty();
        let client = client(&transport);

        assert_eq!(
            client.build_url(&["".into(), Segment::none(), Option::<&str>::None.into(), 0u32.into()]),
            "http://localhost:8080/api/items/0"
        );
        assert_eq!(client.build_url(&["///".into()]), "http://localhost:8080/api/items");
    }

    #[test]
    fn test_built_query_passes_through_unchanged() {
        let pairs = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        let ptr = pairs.as_ptr();
        let normalized = QueryParams::Built(pairs).normalize();
        assert_eq!(normalized.as_ptr(), ptr);
        assert_eq!(normalized[0].0, "b");
    }

    #[test]
    fn test_map_query_drops_nulls_and_stringifies() {
        let normalized = QueryParams::map()
            .with("page", 2)
            .with("active", true)
            .with("ratio", 0.5)
            .with("q", "shoes")
            .with("missing", Option::<&str>::None)
            .normalize();

        assert_eq!(
            normalized,
            vec![
                ("active".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "shoes".to_string()),
                ("ratio".to_string(), "0.5".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_and_get_send_get_without_body() {
        let transport = RecordingTransport::ok(json!([{"id": 1, "name": "one"}]));
        let client = client(&transport);

        let items: Vec<Item> = client
            .list(RequestOptions::new().body(json!({"ignored": true})))
            .await
            .unwrap();
        assert_eq!(items, vec![Item { id: 1, name: "one".to_string() }]);

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://localhost:8080/api/items");
        assert!(request.body.is_none());

        let _: serde_json::Value = client.get_by_id(7u32, RequestOptions::new()).await.unwrap();
        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://localhost:8080/api/items/7");
    }

    #[tokio::test]
    async fn test_write_methods_carry_body() {
        let transport = RecordingTransport::ok(json!({"id": 3, "name": "three"}));
        let client = client(&transport);
        let item = Item { id: 3, name: "three".to_string() };

        let created: Item = client.create(&item, RequestOptions::new()).await.unwrap();
        assert_eq!(created, item);
        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://localhost:8080/api/items");
        assert_eq!(request.body, Some(json!({"id": 3, "name": "three"})));

        let _: Item = client.update(3u32, &item, RequestOptions::new()).await.unwrap();
        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://localhost:8080/api/items/3");
        assert!(request.body.is_some());

        let _: Item = client
            .patch("3", &json!({"name": "renamed"}), RequestOptions::new())
            .await
            .unwrap();
        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.body, Some(json!({"name": "renamed"})));
    }

    #[tokio::test]
    async fn test_delete_with_empty_response() {
        let transport = RecordingTransport::empty();
        let client = client(&transport);

        client
            .delete::<()>(0u32, RequestOptions::new().body(json!({"ignored": true})))
            .await
            .unwrap();

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://localhost:8080/api/items/0");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_call_headers_override_common_headers() {
        let transport = RecordingTransport::ok(json!([]));
        let mut common = HeaderMap::new();
        common.insert("x-tenant", HeaderValue::from_static("common"));
        common.insert("accept", HeaderValue::from_static("application/json"));
        let client = client(&transport).with_headers(common);

        let _: Vec<Item> = client
            .list(
                RequestOptions::new()
                    .header(HeaderName::from_static("x-tenant"), HeaderValue::from_static("call"))
                    .query(QueryParams::map().with("page", 1)),
            )
            .await
            .unwrap();

        let request = transport.last();
        assert_eq!(request.headers.get("X-Tenant").unwrap(), "call");
        assert_eq!(request.headers.get_all("x-tenant").iter().count(), 1);
        assert_eq!(request.headers.get("accept").unwrap(), "application/json");
        assert_eq!(request.query, vec![("page".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn test_errors_propagate_untouched() {
        let error = HttpError::status(
            HttpMethod::Get,
            "http://localhost:8080/api/items/9",
            404,
            ErrorBody::Json(json!({"message": "gone"})),
        );
        let transport = RecordingTransport::failing(error);
        let client = client(&transport);

        let result: Result<Item, HttpError> = client.get_by_id(9u32, RequestOptions::new()).await;
        let err = result.unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(err.body, ErrorBody::Json(json!({"message": "gone"})));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_an_error() {
        let transport = RecordingTransport::ok(json!({"unexpected": "shape"}));
        let client = client(&transport);

        let result: Result<Vec<Item>, HttpError> = client.list(RequestOptions::new()).await;
        let err = result.unwrap_err();
        assert_eq!(err.status, 200);
        assert!(err.reason.contains("decode"));
    }

    #[test]
    fn test_skip_headers_are_set() {
        let options = RequestOptions::new().skip_loading().skip_error_notify();
        assert!(options.headers.contains_key(SKIP_LOADING_HEADER));
        assert!(options.headers.contains_key(SKIP_ERROR_NOTIFY_HEADER));
    }
}
