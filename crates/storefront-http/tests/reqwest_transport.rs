//! Integration tests for the reqwest transport against a local axum server

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use storefront_http::{
    Connectivity, ErrorBody, ErrorClassifier, ErrorKind, HttpFailure, HttpMethod, QueryParams, RequestOptions,
    ReqwestTransport, ResourceClient,
};
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Product {
    sku: String,
    name: String,
    price: f64,
}

async fn list_products(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    Json(json!({
        "query": params,
        "tenant": headers.get("x-tenant").and_then(|v| v.to_str().ok()),
        "skip_loading_seen": headers.contains_key("x-skip-loading"),
    }))
}

async fn create_product(Json(product): Json<Product>) -> (StatusCode, Json<Product>) {
    (StatusCode::CREATED, Json(product))
}

async fn get_product(Path(id): Path<String>) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    if id == "sku-1" {
        Ok(Json(Product {
            sku: id,
            name: "Red Shoe".to_string(),
            price: 19.99,
        }))
    } else {
        Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"errors": ["Unknown sku", "second"]})),
        ))
    }
}

async fn delete_product(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/{id}", get(get_product).delete(delete_product))
        .route(
            "/api/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(transport: &ReqwestTransport, addr: SocketAddr) -> ResourceClient {
    ResourceClient::new(
        Arc::new(transport.clone()),
        format!("http://{}/api/", addr),
        "products",
    )
}

#[tokio::test]
async fn test_list_sends_query_and_headers() {
    let addr = spawn_server().await;
    let transport = ReqwestTransport::new();
    let client = client(&transport, addr);

    let echoed: Value = client
        .list(
            RequestOptions::new()
                .query(QueryParams::map().with("page", 2).with("active", true).with("q", Option::<&str>::None))
                .header(
                    storefront_http::header::HeaderName::from_static("x-tenant"),
                    storefront_http::header::HeaderValue::from_static("acme"),
                ),
        )
        .await
        .unwrap();

    assert_eq!(echoed["query"], json!({"page": "2", "active": "true"}));
    assert_eq!(echoed["tenant"], "acme");
    assert!(transport.connectivity().is_online());
}

#[tokio::test]
async fn test_create_get_and_delete() {
    let addr = spawn_server().await;
    let transport = ReqwestTransport::new();
    let client = client(&transport, addr);

    let product = Product {
        sku: "sku-9".to_string(),
        name: "Blue Hat".to_string(),
        price: 9.99,
    };
    let created: Product = client.create(&product, RequestOptions::new()).await.unwrap();
    assert_eq!(created, product);

    let fetched: Product = client.get_by_id("sku-1", RequestOptions::new()).await.unwrap();
    assert_eq!(fetched.name, "Red Shoe");

    client
        .delete::<()>("sku-1", RequestOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let addr = spawn_server().await;
    let transport = ReqwestTransport::new();
    let client = client(&transport, addr);

    let err = client
        .get_by_id::<Product>("nope", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status, 422);
    assert_eq!(err.method, HttpMethod::Get);
    assert_eq!(err.body, ErrorBody::Json(json!({"errors": ["Unknown sku", "second"]})));

    let classifier = ErrorClassifier::new(Arc::new(transport.connectivity().clone()));
    let classified = classifier.classify_http(&err);
    assert_eq!(classified.kind, ErrorKind::Client);
    assert_eq!(classified.message, "Unknown sku");

    let url = format!("http://{}/api/broken", addr);
    let err = client
        .request::<Value>(HttpMethod::Get, &url, RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status, 500);
    assert_eq!(err.body, ErrorBody::Text("boom".to_string()));
    assert_eq!(
        classifier.classify_http(&err).message,
        "Server error. Please try again later."
    );
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Reserve a port, then free it so nothing listens there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new();
    let client = client(&transport, addr);

    let err = client
        .list::<Value>(RequestOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.status, 0);
    assert!(transport.connectivity().is_online());

    let classifier = ErrorClassifier::new(Arc::new(transport.connectivity().clone()));
    let classified = classifier.classify_http(&err);
    assert_eq!(classified.kind, ErrorKind::Network);
    assert_eq!(classified.message, "Network error. Please try again.");
}

#[tokio::test]
async fn test_any_response_marks_online() {
    let transport = ReqwestTransport::new();
    transport.connectivity().set_online(false);

    let live = spawn_server().await;
    let _: Value = client(&transport, live)
        .list(RequestOptions::new())
        .await
        .unwrap();
    assert!(transport.connectivity().is_online());
}

#[tokio::test]
async fn test_undecodable_payload_is_classified_generically() {
    let addr = spawn_server().await;
    let transport = ReqwestTransport::new();

    // The listing answers with an object, not a product array
    let err = client(&transport, addr)
        .list::<Vec<Product>>(RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.failure, HttpFailure::Decode);
    assert_eq!(err.status, 200);

    let classified = ErrorClassifier::default().classify_http(&err);
    assert_eq!(classified.kind, ErrorKind::Serialization);
    assert_eq!(classified.message, "An unexpected error occurred.");
}
