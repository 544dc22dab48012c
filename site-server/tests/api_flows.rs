//! End-to-end API flows against an in-memory database.
//!
//! Each test builds the full router, drives it with `tower::ServiceExt`
//! and asserts on the JSON envelope.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use site_server::core::build_app;
use site_server::db::DbService;
use site_server::{Config, EmailClient, OrderHandoff, ServerState};

async fn test_app() -> Router {
    let mut config = Config::from_env();
    config.payment_failure_rate = 0.0;
    config.payment_delay_ms = 0;
    config.checkout_tax_rate = 0.08;

    let db = DbService::new_in_memory().await.expect("in-memory db");
    let state = ServerState::new(
        config,
        db.pool,
        Arc::new(EmailClient::disabled()),
        Arc::new(OrderHandoff::new()),
    );
    build_app().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_meal(app: &Router, title: &str, price: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/meals",
        Some(json!({
            "title": title,
            "description": "integration test meal",
            "price": price,
            "childPrice": 5.0,
            "image": "/images/meal.jpg",
            "type": "lunch"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create meal: {body}");
    body["data"]["id"].as_i64().unwrap()
}

async fn create_restaurant(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/restaurants",
        Some(json!({
            "name": name,
            "displayName": format!("{name} Downtown"),
            "image": "/images/restaurant.jpg",
            "city": "Lisbon"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create restaurant: {body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn adding_same_meal_twice_merges_lines() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Margherita", 10.0).await;

    let payload = json!({
        "sessionId": "merge-session",
        "mealId": meal_id,
        "quantity": 2,
        "childQuantity": 1
    });
    let (status, _) = send(&app, "POST", "/api/cart", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some(json!({ "sessionId": "merge-session", "mealId": meal_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["quantity"], 3);
    assert_eq!(body["data"]["child_quantity"], 1);

    let (_, body) = send(&app, "GET", "/api/cart?sessionId=merge-session", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // 3 adults x 10 + 1 child x 5
    let (_, body) = send(&app, "GET", "/api/cart/summary?sessionId=merge-session", None).await;
    assert_eq!(body["data"]["total"], 35.0);
    assert_eq!(body["data"]["itemCount"], 4);
}

#[tokio::test]
async fn cart_add_sets_session_cookie() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Carbonara", 12.0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/cart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "sessionId": "cookie-session", "mealId": meal_id }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("cart_session_id=cookie-session;"));
    assert!(cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn cart_add_unknown_meal_is_404() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some(json!({ "sessionId": "s", "mealId": 424242 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Meal not found");
}

#[tokio::test]
async fn cart_list_without_identity_is_400() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Gnocchi", 13.0).await;

    // two separate sessions hold lines
    for session in ["alice-session", "bob-session"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/cart",
            Some(json!({ "sessionId": session, "mealId": meal_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // no identity at all: rejected, never a cross-session listing
    let (status, body) = send(&app, "GET", "/api/cart", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Session ID or User ID is required");

    let (status, _) = send(&app, "GET", "/api/cart/summary", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // each identity still sees only its own line
    let (_, body) = send(&app, "GET", "/api/cart?sessionId=alice-session", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cart_clear_without_identity_is_400() {
    let app = test_app().await;
    let (status, body) = send(&app, "DELETE", "/api/cart", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_clamps_adult_quantity() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Risotto", 14.0).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/cart",
        Some(json!({ "sessionId": "clamp", "mealId": meal_id, "quantity": 2 })),
    )
    .await;
    let line_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/cart/{line_id}"),
        Some(json!({ "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 1);
}

#[tokio::test]
async fn full_checkout_flow_confirms_once() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Feijoada", 25.0).await;

    send(
        &app,
        "POST",
        "/api/cart",
        Some(json!({ "sessionId": "checkout-flow", "mealId": meal_id, "quantity": 2 })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({
            "sessionId": "checkout-flow",
            "customerName": "Grace Hopper",
            "customerEmail": "grace@example.com",
            "paymentMethod": "card",
            "cardNumber": "4242424242424242",
            "expiryDate": "10/28",
            "cvv": "123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "checkout: {body}");
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("order_"));
    assert_eq!(body["data"]["status"], "confirmed");
    // 50.00 subtotal + 8% tax
    assert_eq!(body["data"]["totalAmount"], 54.0);
    let table = body["data"]["tableNumber"].as_i64().unwrap();
    assert!((1..=50).contains(&table));

    // cart is empty after checkout
    let (_, body) = send(&app, "GET", "/api/cart?sessionId=checkout-flow", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // confirmation is read-once
    let uri = "/api/checkout/confirmation?sessionId=checkout-flow";
    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], order_id);

    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn payment_rejects_zero_amount() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/payment",
        Some(json!({
            "amount": 0.0,
            "currency": "USD",
            "paymentMethod": { "type": "card", "card": {
                "number": "4242424242424242", "expiry": "10/28", "cvv": "123"
            }},
            "customerInfo": { "name": "Ada", "email": "ada@example.com" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn payment_succeeds_and_masks_card() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/payment",
        Some(json!({
            "amount": 42.5,
            "currency": "USD",
            "paymentMethod": { "type": "card", "card": {
                "number": "4242 4242 4242 4242", "expiry": "12/29", "cvv": "123"
            }},
            "customerInfo": { "name": "Ada", "email": "ada@example.com" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "payment: {body}");
    assert_eq!(body["data"]["amount"], 4250);
    assert_eq!(body["data"]["status"], "succeeded");
    assert_eq!(body["data"]["payment_method"]["card"]["last4"], "4242");
}

#[tokio::test]
async fn duplicate_assignment_is_409() {
    let app = test_app().await;
    let restaurant_id = create_restaurant(&app, "Trattoria Uno").await;
    let meal_id = create_meal(&app, "Lasagna", 16.0).await;

    let payload = json!({ "restaurantId": restaurant_id, "mealId": meal_id });
    let (status, _) = send(&app, "POST", "/api/restaurant-meals", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/restaurant-meals", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "This meal is already assigned to this restaurant"
    );
}

#[tokio::test]
async fn assignment_to_missing_restaurant_is_404() {
    let app = test_app().await;
    let meal_id = create_meal(&app, "Orphan Meal", 9.0).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/restaurant-meals",
        Some(json!({ "restaurantId": 999999, "mealId": meal_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Restaurant not found");
}

#[tokio::test]
async fn duplicate_restaurant_name_is_409() {
    let app = test_app().await;
    create_restaurant(&app, "Casa Bela").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/restaurants",
        Some(json!({
            "name": "Casa Bela",
            "displayName": "Casa Bela Downtown",
            "image": "/images/restaurant.jpg",
            "city": "Porto"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Restaurant with this name already exists");
}

#[tokio::test]
async fn restaurants_list_best_rated_first() {
    let app = test_app().await;
    let low = create_restaurant(&app, "Quiet Corner").await;
    let high = create_restaurant(&app, "Star House").await;

    send(
        &app,
        "PUT",
        &format!("/api/restaurants/{low}"),
        Some(json!({ "rating": 3.1 })),
    )
    .await;
    send(
        &app,
        "PUT",
        &format!("/api/restaurants/{high}"),
        Some(json!({ "rating": 4.8 })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/restaurants", None).await;
    let restaurants = body["data"].as_array().unwrap();
    assert_eq!(restaurants[0]["id"].as_i64(), Some(high));
    assert_eq!(restaurants[1]["id"].as_i64(), Some(low));
}

#[tokio::test]
async fn meals_filter_by_restaurant_assignment() {
    let app = test_app().await;
    let restaurant_id = create_restaurant(&app, "Filter House").await;
    let assigned = create_meal(&app, "Assigned Dish", 11.0).await;
    create_meal(&app, "Unassigned Dish", 12.0).await;

    send(
        &app,
        "POST",
        "/api/restaurant-meals",
        Some(json!({ "restaurantId": restaurant_id, "mealId": assigned })),
    )
    .await;

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/meals?restaurantId={restaurant_id}"),
        None,
    )
    .await;
    let meals = body["data"].as_array().unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0]["id"].as_i64(), Some(assigned));
}

#[tokio::test]
async fn reservation_lifecycle_and_date_filter() {
    let app = test_app().await;
    let restaurant_id = create_restaurant(&app, "Booking Bistro").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(json!({
            "restaurantId": restaurant_id,
            "name": "Alan Turing",
            "email": "alan@example.com",
            "date": "2026-09-12",
            "time": "19:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create reservation: {body}");
    let reservation_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["adult_count"], 1);
    assert_eq!(body["data"]["child_count"], 0);

    // day filter hits
    let (_, body) = send(&app, "GET", "/api/reservations?date=2026-09-12", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // day filter misses
    let (_, body) = send(&app, "GET", "/api/reservations?date=2026-09-13", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // confirm it
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{reservation_id}"),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    // invalid date is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(json!({
            "restaurantId": restaurant_id,
            "name": "Bad Date",
            "email": "bad@example.com",
            "date": "someday",
            "time": "20:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_form_validates_and_accepts() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/contact",
        Some(json!({
            "fullName": "Margaret Hamilton",
            "email": "Margaret@Example.com",
            "subject": "Catering",
            "message": "Do you cater for 40 people?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "contact: {body}");
    assert_eq!(body["success"], true);

    let (status, _) = send(
        &app,
        "POST",
        "/api/contact",
        Some(json!({
            "fullName": "No Email",
            "email": "not-an-email",
            "subject": "Hi",
            "message": "Hello"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
