//! HTTP tests for the catalog API
//!
//! These drive the full router (extractors, handlers, error mapping) against
//! a private in-memory database:
//! - Status codes
//! - Response bodies (money strings, hyperlinks, counts)
//! - Error bodies

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use storefront_api::{build_app, ApiConfig, AppState};
use storefront_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ApiConfig::from_lookup(|_| None).unwrap();
    build_app(AppState::new(db, config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_collection(app: &Router, title: &str) -> i64 {
    let (status, body) = send(app, "POST", "/collections", Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_product(app: &Router, title: &str, price: &str, collection: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(json!({
            "title": title,
            "slug": title.to_lowercase(),
            "inventory": 5,
            "price": price,
            "collection": collection
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_create_product_returns_201_with_tax() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "title": "Widget",
            "description": "A widget",
            "slug": "widget",
            "inventory": 10,
            "price": "10.00",
            "collection": collection
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["price"], "10.00");
    assert_eq!(body["price_with_tax"], "11.00");
    assert_eq!(
        body["collection"],
        format!("http://localhost:8000/collections/{}", collection)
    );
    assert!(body["last_update"].is_string());
}

#[tokio::test]
async fn test_retrieve_product() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let id = create_product(&app, "Widget", "19.99", collection).await;

    let (status, body) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["price_with_tax"], "21.99");
}

#[tokio::test]
async fn test_retrieve_missing_product_returns_404() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/products/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_zero_price_returns_400() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "title": "Freebie",
            "slug": "freebie",
            "inventory": 1,
            "price": 0,
            "collection": collection
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["price"].is_array());
}

#[tokio::test]
async fn test_missing_fields_return_400_per_field() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/products", Some(json!({ "inventory": -1 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = body["fields"].as_object().unwrap();
    for field in ["title", "slug", "inventory", "price", "collection"] {
        assert!(fields.contains_key(field), "missing error for {field}");
    }
}

#[tokio::test]
async fn test_unknown_collection_returns_400() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "title": "Orphan",
            "slug": "orphan",
            "inventory": 1,
            "price": "1.00",
            "collection": 42
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["collection"][0],
        "collection: object with id 42 does not exist"
    );
}

#[tokio::test]
async fn test_collection_hyperlink_input() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let link = format!("http://localhost:8000/collections/{}", collection);

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "title": "Linked",
            "slug": "linked",
            "inventory": 1,
            "unit_price": 2.5,
            "collection": link.clone()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["collection"], link);
    assert_eq!(body["price"], "2.50");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_newest_first_with_page_size() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    for i in 0..12 {
        create_product(&app, &format!("Item{}", i), "1.00", collection).await;
    }

    let (status, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["title"], "Item11");
    assert_eq!(items[9]["title"], "Item2");

    let (_, body) = send(&app, "GET", "/products?limit=3", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/products?limit=50", None).await;
    assert_eq!(body.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_list_products_rejects_bad_limit() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/products?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["limit"].is_array());

    let (status, _) = send(&app, "GET", "/products?limit=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/products?limit=ten", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_requires_all_fields_and_patch_merges() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let id = create_product(&app, "Widget", "10.00", collection).await;
    let uri = format!("/products/{}", id);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": "Renamed" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["slug"].is_array());

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "price": "20.00" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["price_with_tax"], "22.00");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "title": "Renamed",
            "slug": "renamed",
            "inventory": 0,
            "price": "5.00",
            "collection": collection
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["inventory"], 0);
}

#[tokio::test]
async fn test_patch_null_required_fields_returns_400() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let id = create_product(&app, "Widget", "10.00", collection).await;
    let uri = format!("/products/{}", id);

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "title": null, "price": null, "slug": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["fields"]["title"][0], "title: may not be null");
    assert!(body["fields"]["price"].is_array());
    assert!(body["fields"]["slug"].is_array());

    // Nothing was written
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["price"], "10.00");

    // description is the one nullable field
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "description": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn test_wrongly_typed_field_returns_field_error() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "title": "Widget",
            "slug": "widget",
            "inventory": "5",
            "price": "10.00",
            "collection": collection
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["inventory"].is_array());

    let id = create_product(&app, "Gizmo", "3.00", collection).await;
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/products/{}", id),
        Some(json!({ "description": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["description"].is_array());
}

#[tokio::test]
async fn test_three_decimal_price_returns_400() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let id = create_product(&app, "Widget", "10.00", collection).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/products/{}", id),
        Some(json!({ "price": "10.500" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = test_app().await;

    let (status, _) = send(&app, "PATCH", "/products/77", Some(json!({ "inventory": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/products/77", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let app = test_app().await;
    let collection = create_collection(&app, "Gadgets").await;
    let id = create_product(&app, "Widget", "10.00", collection).await;
    let uri = format!("/products/{}", id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        body["message"],
        format!("ID: {} - Widget, deleted successfully!", id)
    );

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Collections
// =============================================================================

#[tokio::test]
async fn test_list_collections_with_counts() {
    let app = test_app().await;
    let grocery = create_collection(&app, "Grocery").await;
    let beauty = create_collection(&app, "Beauty").await;
    create_product(&app, "Milk", "1.20", grocery).await;
    create_product(&app, "Bread", "2.40", grocery).await;

    let (status, body) = send(&app, "GET", "/collections", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], grocery);
    assert_eq!(items[0]["products_count"], 2);
    assert_eq!(items[1]["id"], beauty);
    assert_eq!(items[1]["products_count"], 0);

    let (_, body) = send(&app, "GET", &format!("/collections/{}", grocery), None).await;
    assert_eq!(body["products_count"], 2);
    assert_eq!(body["featured_product"], Value::Null);
}

#[tokio::test]
async fn test_create_collection_requires_title() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/collections", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["title"][0], "title is required");
}

#[tokio::test]
async fn test_delete_collection_with_products_returns_409() {
    let app = test_app().await;
    let grocery = create_collection(&app, "Grocery").await;
    let milk = create_product(&app, "Milk", "1.20", grocery).await;

    let (status, body) = send(&app, "DELETE", &format!("/collections/{}", grocery), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(
        body["message"],
        format!("ID: {} - Grocery has products, cannot be deleted!", grocery)
    );

    // Both records intact
    let (status, body) = send(&app, "GET", &format!("/collections/{}", grocery), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products_count"], 1);
    let (status, _) = send(&app, "GET", &format!("/products/{}", milk), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_empty_collection_returns_204() {
    let app = test_app().await;
    let beauty = create_collection(&app, "Beauty").await;
    let uri = format!("/collections/{}", beauty);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        body["message"],
        format!("ID: {} - Beauty, deleted successfully!", beauty)
    );

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_featured_product_membership() {
    let app = test_app().await;
    let grocery = create_collection(&app, "Grocery").await;
    let beauty = create_collection(&app, "Beauty").await;
    let milk = create_product(&app, "Milk", "1.20", grocery).await;
    let uri = format!("/collections/{}", beauty);

    // Belongs elsewhere
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "featured_product": milk }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["featured_product"].is_array());

    // Doesn't exist
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "featured_product": 999 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Belongs here
    let grocery_uri = format!("/collections/{}", grocery);
    let (status, body) = send(
        &app,
        "PATCH",
        &grocery_uri,
        Some(json!({ "featured_product": milk })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["featured_product"], milk);
    assert_eq!(body["title"], "Grocery");

    // Deleting the product clears the reference
    send(&app, "DELETE", &format!("/products/{}", milk), None).await;
    let (_, body) = send(&app, "GET", &grocery_uri, None).await;
    assert_eq!(body["featured_product"], Value::Null);
    assert_eq!(body["products_count"], 0);
}

#[tokio::test]
async fn test_put_collection() {
    let app = test_app().await;
    let grocery = create_collection(&app, "Grocery").await;
    let uri = format!("/collections/{}", grocery);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": "Food" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Food");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["title"][0], "title: may not be null");

    let (status, _) = send(&app, "PUT", "/collections/999", Some(json!({ "title": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_collection_keeps_featured_product_unless_null() {
    let app = test_app().await;
    let grocery = create_collection(&app, "Grocery").await;
    let milk = create_product(&app, "Milk", "1.20", grocery).await;
    let uri = format!("/collections/{}", grocery);

    send(&app, "PATCH", &uri, Some(json!({ "featured_product": milk }))).await;

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": "Food" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Food");
    assert_eq!(body["featured_product"], milk);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "title": "Food", "featured_product": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["featured_product"], Value::Null);
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/orders", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
