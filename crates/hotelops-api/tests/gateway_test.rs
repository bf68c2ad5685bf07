#![allow(clippy::unwrap_used)]
// Integration tests for `Gateway` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hotelops_api::types::{NewInventoryItem, NewMenuItem, NewOrder, OrderLineRecord};
use hotelops_api::{
    Error, FailureKind, Gateway, RegisterRequest, Session, SessionStatus, SessionStore,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Gateway) {
    let server = MockServer::start().await;
    let gateway = Gateway::new(
        &server.uri(),
        Some(SecretString::from("anon-key".to_string())),
        SessionStore::new(),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, gateway)
}

fn signed_in(gateway: &Gateway) {
    gateway.session().establish(Session::new(
        SecretString::from("user-token".to_string()),
        "user-1",
    ));
}

fn room_json(id: &str, number: &str) -> serde_json::Value {
    json!({
        "id": id,
        "room_number": number,
        "room_type": "deluxe",
        "price_per_night": 150.5,
        "capacity": 2,
        "amenities": ["wifi", "minibar"],
        "status": "available"
    })
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_requests_use_api_key_as_bearer() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/rooms"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(query_param("order", "room_number.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_json("r-1", "101")])))
        .expect(1)
        .mount(&server)
        .await;

    let rooms = gateway.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_number, "101");
    assert_eq!(rooms[0].price_per_night, Decimal::new(1505, 1));
    assert_eq!(rooms[0].amenities, vec!["wifi".to_string(), "minibar".to_string()]);
}

#[tokio::test]
async fn session_token_replaces_api_key_bearer() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(gateway.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn available_rooms_filter_on_status() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/rooms"))
        .and(query_param("status", "eq.available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_json("r-2", "102")])))
        .expect(1)
        .mount(&server)
        .await;

    let rooms = gateway.list_available_rooms().await.unwrap();
    assert_eq!(rooms[0].id, "r-2");
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_unwraps_single_row_representation() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);

    Mock::given(method("POST"))
        .and(path("/rest/v1/orders"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({
            "room_number": "204",
            "special_instructions": "no onions",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "o-1",
            "room_number": "204",
            "items": [{ "menu_item_id": "m-1", "quantity": 2, "unit_price": 12.5 }],
            "total_amount": 25.0,
            "special_instructions": "no onions",
            "status": "pending",
            "created_at": "2024-06-15T10:30:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let items = vec![OrderLineRecord {
        menu_item_id: "m-1".into(),
        quantity: 2,
        unit_price: Decimal::new(125, 1),
    }];
    let order = gateway
        .create_order(&NewOrder {
            room_number: "204",
            items: &items,
            total_amount: Decimal::new(25, 0),
            special_instructions: "no onions",
            status: "pending",
        })
        .await
        .unwrap();

    assert_eq!(order.id, "o-1");
    assert_eq!(order.items, items);
    assert_eq!(order.total_amount, Decimal::new(25, 0));
}

#[tokio::test]
async fn update_targets_row_by_id() {
    let (server, gateway) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/rooms"))
        .and(query_param("id", "eq.r-1"))
        .and(body_partial_json(json!({ "status": "maintenance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "r-1",
            "room_number": "101",
            "price_per_night": 150,
            "status": "maintenance"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let room = gateway.update_room_status("r-1", "maintenance").await.unwrap();
    assert_eq!(room.status.as_deref(), Some("maintenance"));
}

#[tokio::test]
async fn catalog_and_stock_inserts_send_prices_as_numbers() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/menu_items"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "name": "Soup", "price": 6.5, "is_available": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "m-7",
            "name": "Soup",
            "category": "Starters",
            "price": 6.5
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/inventory_items"))
        .and(body_partial_json(json!({ "name": "Towels", "quantity": 40, "minimum_quantity": 10 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "i-3",
            "name": "Towels",
            "quantity": 40,
            "minimum_quantity": 10,
            "unit_price": 4.25
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let menu_item = gateway
        .create_menu_item(&NewMenuItem {
            name: "Soup",
            description: None,
            category: "Starters",
            price: Decimal::new(65, 1),
            preparation_time: Some(10),
            is_available: true,
        })
        .await
        .unwrap();
    assert_eq!(menu_item.id, "m-7");
    assert!(menu_item.is_available);

    let stock = gateway
        .create_inventory_item(&NewInventoryItem {
            name: "Towels",
            description: None,
            category: "Linen",
            quantity: 40,
            unit: "pcs",
            minimum_quantity: 10,
            unit_price: Some(Decimal::new(425, 2)),
            supplier_id: None,
        })
        .await
        .unwrap();
    assert_eq!(stock.id, "i-3");
    assert_eq!(stock.unit_price, Some(Decimal::new(425, 2)));
}

#[tokio::test]
async fn empty_representation_is_validation_error() {
    let (server, gateway) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = gateway.cancel_booking("missing").await;
    assert!(
        matches!(result, Err(Error::Validation { .. })),
        "expected Validation error, got: {result:?}"
    );
}

// ── Failure taxonomy ────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_clears_session_exactly_once() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);
    let mut rx = gateway.session().subscribe();

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let first = gateway.list_orders().await;
    match first {
        Err(Error::Auth { ref message }) => assert_eq!(message, "JWT expired"),
        other => panic!("expected Auth error, got: {other:?}"),
    }
    assert!(!gateway.session().is_authenticated());
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_expired());

    let second = gateway.list_orders().await;
    assert!(matches!(second, Err(Error::Auth { .. })));
    assert!(!rx.has_changed().unwrap(), "teardown must publish only once");
    assert!(matches!(gateway.session().status(), SessionStatus::Expired));
}

#[tokio::test]
async fn rejection_of_replaced_token_keeps_new_session() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "JWT expired" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let relogin = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        gateway.session().establish(Session::new(
            SecretString::from("fresh-token".to_string()),
            "user-1",
        ));
    };
    let (result, ()) = tokio::join!(gateway.list_bookings(), relogin);

    assert!(matches!(result, Err(Error::Auth { .. })), "got: {result:?}");
    let current = gateway.session().current().unwrap();
    assert_eq!(current.access_token.expose_secret(), "fresh-token");
}

#[tokio::test]
async fn client_error_is_validation_with_server_message() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&server)
        .await;

    let booking = hotelops_api::types::NewBooking {
        room_id: "r-1",
        user_id: None,
        check_in_date: "2024-01-01".parse().unwrap(),
        check_out_date: "2024-01-03".parse().unwrap(),
        total_price: Decimal::new(200, 0),
        status: "confirmed",
        special_requests: None,
    };
    let err = gateway.create_booking(&booking).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation);
    match err {
        Error::Validation { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "duplicate key value violates unique constraint");
        }
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_error_body_is_kept() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/suppliers"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such table"))
        .mount(&server)
        .await;

    let err = gateway.list_suppliers().await.unwrap_err();
    assert!(
        matches!(err, Error::Validation { status: 404, ref message } if message == "no such table"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_classified() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);

    Mock::given(method("GET"))
        .and(path("/rest/v1/inventory_items"))
        .respond_with(ResponseTemplate::new(503).set_body_string(""))
        .mount(&server)
        .await;

    let err = gateway.list_inventory_items().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Server);
    assert_eq!(err.status(), Some(503));
    assert!(gateway.session().is_authenticated(), "5xx must not touch the session");
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/menu_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "m-1", "name": "Soup" }])))
        .mount(&server)
        .await;

    let err = gateway.list_menu_items().await.unwrap_err();
    assert!(
        matches!(err, Error::Validation { status: 200, .. }),
        "expected Validation error, got: {err:?}"
    );
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let gateway = Gateway::new(&uri, None, SessionStore::new(), &TransportConfig::default()).unwrap();
    let err = gateway.list_purchase_orders().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network, "got: {err:?}");
}

// ── Auth ────────────────────────────────────────────────────────────

fn token_body() -> serde_json::Value {
    json!({
        "access_token": "fresh-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {
            "id": "user-42",
            "email": "ada@example.com",
            "user_metadata": { "firstName": "Ada", "lastName": "Lovelace" }
        }
    })
}

#[tokio::test]
async fn login_establishes_session() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_partial_json(json!({ "email": "ada@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let password = SecretString::from("s3cret".to_string());
    let session = gateway.login("ada@example.com", &password).await.unwrap();

    assert_eq!(session.user_id, "user-42");
    let user = session.user.as_ref().unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    assert!(gateway.session().is_authenticated());
}

#[tokio::test]
async fn rejected_login_is_auth_error_without_expiry() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let password = SecretString::from("wrong".to_string());
    let err = gateway.login("ada@example.com", &password).await.unwrap_err();

    assert!(
        matches!(err, Error::Auth { ref message } if message == "Invalid login credentials"),
        "got: {err:?}"
    );
    assert!(matches!(gateway.session().status(), SessionStatus::Anonymous));
}

#[tokio::test]
async fn register_signs_up_then_logs_in() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_partial_json(json!({
            "email": "ada@example.com",
            "data": { "firstName": "Ada", "lastName": "Lovelace" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user-42" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegisterRequest {
        email: "ada@example.com".into(),
        password: SecretString::from("s3cret".to_string()),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
    };
    let session = gateway.register(&request).await.unwrap();
    assert_eq!(session.user_id, "user-42");
}

#[tokio::test]
async fn logout_clears_session_even_when_remote_fails() {
    let (server, gateway) = setup().await;
    signed_in(&gateway);

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    gateway.logout().await.unwrap();
    assert!(matches!(gateway.session().status(), SessionStatus::Anonymous));
}

#[tokio::test]
async fn logout_without_session_skips_remote_call() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    gateway.logout().await.unwrap();
}
