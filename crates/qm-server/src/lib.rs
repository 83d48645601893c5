//! HTTP server for Quartermaster.
//!
//! Exposes the stock ledgers, catalog, directory, and reports as a
//! bearer-authenticated JSON API. Handlers are thin: they resolve the
//! caller, parse the body, and delegate to the `qm-ledger` and
//! `qm-store` crates, which own all of the semantics.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::QmServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use chrono::Utc;
    use qm_auth::{Claims, TokenCodec};
    use qm_store::{InMemoryInventory, InventoryStore};
    use qm_types::{Role, User};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::router::build_router;
    use crate::state::AppState;

    struct TestApp {
        router: Router,
        codec: TokenCodec,
        store: Arc<InMemoryInventory>,
        admin: User,
        worker: User,
        admin_token: String,
        worker_token: String,
    }

    fn app() -> TestApp {
        let store = Arc::new(InMemoryInventory::new());
        let admin = store
            .insert_user(User::new("Ada Admin", "ada@example.com", Role::Admin))
            .unwrap();
        let worker = store
            .insert_user(User::new("Wes Worker", "wes@example.com", Role::Standard))
            .unwrap();
        let worker = store.approve_user(&worker.id).unwrap();

        let codec = TokenCodec::new("test-secret");
        let admin_token = codec.mint(admin.id, 3600).unwrap();
        let worker_token = codec.mint(worker.id, 3600).unwrap();
        let state = AppState::new(store.clone(), codec.clone());

        TestApp {
            router: build_router(state),
            codec,
            store,
            admin,
            worker,
            admin_token,
            worker_token,
        }
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create_item(app: &TestApp, name: &str, unit: &str, category: &str) -> Value {
        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/items",
                Some(&app.admin_token),
                Some(json!({ "name": name, "unitType": unit, "category": category })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    async fn record_purchase(
        app: &TestApp,
        item_id: &str,
        unit: &str,
        quantity: f64,
        amount: f64,
        vendor: &str,
        date: &str,
    ) -> Value {
        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/purchases",
                Some(&app.admin_token),
                Some(json!({
                    "vendor": vendor,
                    "billNumber": "B-1001",
                    "date": date,
                    "items": [
                        {"itemId": item_id, "quantity": quantity, "unitType": unit, "amount": amount}
                    ]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["results"][0]["error"].is_null(), "line rejected: {body}");
        body
    }

    async fn issue_stock(
        app: &TestApp,
        recipient: &str,
        lines: Value,
    ) -> (StatusCode, Value) {
        send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/issue",
                Some(&app.admin_token),
                Some(json!({
                    "ticket": "TKT-7",
                    "date": "2026-08-10T09:00:00Z",
                    "issuedBy": "Ada Admin",
                    "issuedTo": recipient,
                    "items": lines
                })),
            ),
        )
        .await
    }

    async fn stock_of(app: &TestApp, name: &str) -> Value {
        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/reports/stock-summary",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .unwrap()
            .iter()
            .find(|item| item["name"] == name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    #[tokio::test]
    async fn health_and_info_are_public() {
        let app = app();
        let (status, body) = send(&app.router, request(Method::GET, "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app.router, request(Method::GET, "/api/info", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "quartermaster");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn admin_routes_reject_missing_and_non_admin_tokens() {
        let app = app();

        let (status, body) =
            send(&app.router, request(Method::GET, "/api/admin/items", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "no token provided");

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/items", Some(&app.worker_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "admin access required");

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/items", Some("junk"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "malformed token");
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let app = app();
        let stale = app
            .codec
            .sign(&Claims {
                sub: app.admin.id,
                iat: 1,
                exp: 2,
            })
            .unwrap();
        let (status, body) =
            send(&app.router, request(Method::GET, "/api/auth/me", Some(&stale), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "token expired");
    }

    #[tokio::test]
    async fn me_returns_the_caller() {
        let app = app();
        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/auth/me", Some(&app.worker_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "wes@example.com");
        assert_eq!(body["role"], "USER");
        assert_eq!(body["isApproved"], true);
    }

    #[tokio::test]
    async fn items_crud_roundtrip() {
        let app = app();
        let created = create_item(&app, "Laptop", "PCS", "Electronics").await;
        assert_eq!(created["unitType"], "PCS");
        assert_eq!(created["availableStock"].as_f64(), Some(0.0));
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/items", Some(&app.admin_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app.router,
            request(
                Method::PUT,
                &format!("/api/admin/items/{id}"),
                Some(&app.admin_token),
                Some(json!({ "name": "Laptop Pro", "unitType": "PCS", "category": "Electronics" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Laptop Pro");

        let (status, body) = send(
            &app.router,
            request(
                Method::DELETE,
                &format!("/api/admin/items/{id}"),
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Item deleted successfully");

        let (_, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/items", Some(&app.admin_token), None),
        )
        .await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn item_validation_reports_missing_fields() {
        let app = app();

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/items",
                Some(&app.admin_token),
                Some(json!({ "unitType": "PCS", "category": "Electronics" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required field: name");

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/items",
                Some(&app.admin_token),
                Some(json!({ "name": "Box", "unitType": "BOX", "category": "Misc" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid unit type: BOX");

        let mut raw = request(Method::POST, "/api/admin/items", Some(&app.admin_token), None);
        *raw.body_mut() = Body::from("not json");
        let (status, body) = send(&app.router, raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body"));
    }

    #[tokio::test]
    async fn referenced_items_cannot_be_deleted() {
        let app = app();
        let item = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = item["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 5.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::DELETE,
                &format!("/api/admin/items/{id}"),
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("referenced by ledger entries"));
        assert_eq!(stock_of(&app, "Laptop").await["availableStock"].as_f64(), Some(5.0));
    }

    #[tokio::test]
    async fn purchase_batch_reports_each_line_and_credits_accepted_ones() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let cable = create_item(&app, "Cable Wire", "M", "Electrical").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/purchases",
                Some(&app.admin_token),
                Some(json!({
                    "vendor": "Acme Supplies",
                    "billNumber": "B-2001",
                    "date": "2026-08-01T00:00:00Z",
                    "items": [
                        {"itemId": laptop["id"], "quantity": 2, "unitType": "PCS", "amount": 100},
                        {"quantity": 1, "unitType": "PCS", "amount": 50},
                        {"itemId": cable["id"], "quantity": 30, "unitType": "M", "amount": 200}
                    ]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["quantity"].as_f64(), Some(2.0));
        assert_eq!(results[1]["error"], "Missing itemId");
        assert_eq!(results[2]["vendor"], "Acme Supplies");

        assert_eq!(stock_of(&app, "Laptop").await["availableStock"].as_f64(), Some(2.0));
        assert_eq!(
            stock_of(&app, "Cable Wire").await["availableStock"].as_f64(),
            Some(30.0)
        );
    }

    #[tokio::test]
    async fn purchase_header_failures_reject_the_whole_batch() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/purchases",
                Some(&app.admin_token),
                Some(json!({
                    "billNumber": "B-1",
                    "date": "2026-08-01T00:00:00Z",
                    "items": [{"itemId": laptop["id"], "quantity": 1, "unitType": "PCS", "amount": 5}]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required field: vendor");

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/purchases",
                Some(&app.admin_token),
                Some(json!({
                    "vendor": "Acme",
                    "billNumber": "B-1",
                    "date": "2026-08-01T00:00:00Z",
                    "items": []
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "at least one line item is required");

        let (_, stats) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/dashboard/stats",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(stats["purchaseCount"], 0);
    }

    #[tokio::test]
    async fn unit_mismatch_is_a_line_outcome() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/purchases",
                Some(&app.admin_token),
                Some(json!({
                    "vendor": "Acme",
                    "billNumber": "B-1",
                    "date": "2026-08-01T00:00:00Z",
                    "items": [{"itemId": laptop["id"], "quantity": 5, "unitType": "KG", "amount": 10}]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["results"][0]["error"],
            "Unit mismatch: Laptop is tracked in PCS"
        );
        assert_eq!(stock_of(&app, "Laptop").await["availableStock"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn issue_flow_depletes_and_guards_stock() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 10.0, 500.0, "Acme", "2026-08-01T00:00:00Z").await;

        let recipient = app.worker.id.to_string();
        let (status, body) = issue_stock(
            &app,
            &recipient,
            json!([{"itemId": id, "quantity": 4}]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["results"][0]["quantity"].as_f64(), Some(4.0));

        let (status, body) = issue_stock(
            &app,
            &recipient,
            json!([{"itemId": id, "quantity": 10}]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["results"][0]["error"],
            "Insufficient stock for item: Laptop"
        );

        let stock = stock_of(&app, "Laptop").await;
        assert_eq!(stock["totalPurchased"].as_f64(), Some(10.0));
        assert_eq!(stock["totalIssued"].as_f64(), Some(4.0));
        assert_eq!(stock["availableStock"].as_f64(), Some(6.0));
    }

    #[tokio::test]
    async fn one_batch_sees_cumulative_depletion() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 5.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;

        let (status, body) = issue_stock(
            &app,
            &app.worker.id.to_string(),
            json!([
                {"itemId": id, "quantity": 3},
                {"itemId": id, "quantity": 3}
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["quantity"].as_f64(), Some(3.0));
        assert_eq!(
            results[1]["error"],
            "Insufficient stock for item: Laptop"
        );

        assert_eq!(stock_of(&app, "Laptop").await["availableStock"].as_f64(), Some(2.0));

        let (_, history) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/issue-history",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn issue_header_and_recipient_rules() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 10.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::POST,
                "/api/admin/issue",
                Some(&app.admin_token),
                Some(json!({
                    "date": "2026-08-10T00:00:00Z",
                    "issuedBy": "Ada Admin",
                    "issuedTo": app.worker.id.to_string(),
                    "items": [{"itemId": id, "quantity": 1}]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required field: ticket");

        let ghost = qm_types::UserId::new().to_string();
        let (status, body) =
            issue_stock(&app, &ghost, json!([{"itemId": id, "quantity": 1}])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("recipient not found"));

        let pending = app
            .store
            .insert_user(User::new("Pat Pending", "pat@example.com", Role::Standard))
            .unwrap();
        let (status, body) = issue_stock(
            &app,
            &pending.id.to_string(),
            json!([{"itemId": id, "quantity": 1}]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not approved"));
    }

    #[tokio::test]
    async fn approval_unlocks_issue_receipt() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 10.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;

        let pending = app
            .store
            .insert_user(User::new("Pat Pending", "pat@example.com", Role::Standard))
            .unwrap();

        let (status, body) = send(
            &app.router,
            request(
                Method::PUT,
                &format!("/api/admin/users/{}/approve", pending.id),
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User approved successfully");

        let (status, body) = issue_stock(
            &app,
            &pending.id.to_string(),
            json!([{"itemId": id, "quantity": 2}]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["results"][0]["quantity"].as_f64(), Some(2.0));
    }

    #[tokio::test]
    async fn recent_purchases_paginates_and_filters() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        for day in 1..=5u32 {
            let vendor = if day % 2 == 1 { "Acme" } else { "Zenith" };
            let date = format!("2026-08-{day:02}T00:00:00Z");
            record_purchase(&app, id, "PCS", 1.0, (day * 10) as f64, vendor, &date).await;
        }

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/recent-purchases?page=3&limit=2",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["total"], 5);
        assert_eq!(body["pagination"]["page"], 3);
        assert_eq!(body["pagination"]["limit"], 2);
        assert_eq!(body["pagination"]["totalPages"], 3);

        let (_, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/recent-purchases?vendor=acme",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(body["pagination"]["total"], 3);

        let (_, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/recent-purchases?sortField=amount&sortOrder=asc",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(body["data"][0]["amount"].as_f64(), Some(10.0));
    }

    #[tokio::test]
    async fn purchase_listing_is_decorated_and_date_descending() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let cable = create_item(&app, "Cable Wire", "M", "Electrical").await;
        let laptop_id = laptop["id"].as_str().unwrap();
        let cable_id = cable["id"].as_str().unwrap();
        record_purchase(&app, laptop_id, "PCS", 1.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;
        record_purchase(&app, cable_id, "M", 20.0, 80.0, "Zenith", "2026-08-03T00:00:00Z").await;

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/purchases",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listing = body.as_array().unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0]["item"]["name"], "Cable Wire");
        assert_eq!(listing[0]["user"]["name"], "Ada Admin");
        assert_eq!(listing[1]["item"]["name"], "Laptop");
    }

    #[tokio::test]
    async fn amend_rewrites_clerical_fields_without_replaying_totals() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        let body =
            record_purchase(&app, id, "PCS", 10.0, 500.0, "Acme", "2026-08-01T00:00:00Z").await;
        let purchase_id = body["results"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app.router,
            request(
                Method::PATCH,
                &format!("/api/admin/recent-purchases/{purchase_id}"),
                Some(&app.admin_token),
                Some(json!({ "vendor": "Updated Vendor", "quantity": 99 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vendor"], "Updated Vendor");
        assert_eq!(body["quantity"].as_f64(), Some(99.0));

        // The amendment is clerical: stock totals keep the recorded flow.
        assert_eq!(
            stock_of(&app, "Laptop").await["availableStock"].as_f64(),
            Some(10.0)
        );

        let ghost = qm_types::PurchaseId::new();
        let (status, body) = send(
            &app.router,
            request(
                Method::PATCH,
                &format!("/api/admin/recent-purchases/{ghost}"),
                Some(&app.admin_token),
                Some(json!({ "vendor": "X" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().starts_with("purchase not found"));

        let (status, body) = send(
            &app.router,
            request(
                Method::PATCH,
                "/api/admin/recent-purchases/not-a-uuid",
                Some(&app.admin_token),
                Some(json!({ "vendor": "X" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid id"));
    }

    #[tokio::test]
    async fn vendors_are_distinct_and_sorted() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 1.0, 10.0, "Zenith", "2026-08-01T00:00:00Z").await;
        record_purchase(&app, id, "PCS", 1.0, 10.0, "Acme", "2026-08-02T00:00:00Z").await;
        record_purchase(&app, id, "PCS", 1.0, 10.0, "Zenith", "2026-08-03T00:00:00Z").await;

        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/vendors", Some(&app.admin_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Acme", "Zenith"]));
    }

    #[tokio::test]
    async fn dashboard_stats_reports_camel_case_counts() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 10.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;
        issue_stock(&app, &app.worker.id.to_string(), json!([{"itemId": id, "quantity": 1}]))
            .await;

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/admin/dashboard/stats",
                Some(&app.admin_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userCount"], 2);
        assert_eq!(body["itemCount"], 1);
        assert_eq!(body["purchaseCount"], 1);
        assert_eq!(body["issueCount"], 1);
    }

    #[tokio::test]
    async fn monthly_purchases_is_visible_to_standard_users() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        let today = Utc::now().to_rfc3339();
        record_purchase(&app, id, "PCS", 2.0, 150.0, "Acme", &today).await;

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/dashboard/monthly-purchases",
                Some(&app.worker_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let months = body.as_array().unwrap();
        assert_eq!(months.len(), 6);
        let current = &months[5];
        assert_eq!(current["purchases"], 1);
        assert_eq!(current["totalAmount"].as_f64(), Some(150.0));
        assert_eq!(current["uniqueItems"], 1);
    }

    #[tokio::test]
    async fn issued_items_shows_only_the_caller() {
        let app = app();
        let laptop = create_item(&app, "Laptop", "PCS", "Electronics").await;
        let id = laptop["id"].as_str().unwrap();
        record_purchase(&app, id, "PCS", 10.0, 100.0, "Acme", "2026-08-01T00:00:00Z").await;
        issue_stock(&app, &app.worker.id.to_string(), json!([{"itemId": id, "quantity": 2}]))
            .await;
        issue_stock(&app, &app.admin.id.to_string(), json!([{"itemId": id, "quantity": 1}]))
            .await;

        let (status, body) = send(
            &app.router,
            request(
                Method::GET,
                "/api/user/issued-items",
                Some(&app.worker_token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let mine = body.as_array().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0]["quantity"].as_f64(), Some(2.0));
        assert_eq!(mine[0]["item"]["name"], "Laptop");
        assert_eq!(mine[0]["item"]["unitType"], "PCS");
    }

    #[tokio::test]
    async fn user_listing_is_admin_only() {
        let app = app();
        let (status, body) = send(
            &app.router,
            request(Method::GET, "/api/admin/users", Some(&app.admin_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app.router,
            request(Method::GET, "/api/admin/users", Some(&app.worker_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
