use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::json;

use cuehall_api::app::services::{build_services, AppServices};
use cuehall_api::app::build_app;
use cuehall_api::config::AppConfig;
use cuehall_auth::{password, AccessClaims, Role, UserRecord};
use cuehall_core::{CompanyId, UserId};

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: "test-secret".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 3600,
        };

        let services = Arc::new(build_services(&config));
        seed_users(&services);

        // Same router as prod, bound to an ephemeral port.
        let app = build_app(services.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user(username: &str, secret: &str, role: Role, active: bool) -> UserRecord {
    UserRecord {
        id: UserId::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: password::hash_password(secret).unwrap(),
        role,
        company_id: Some(CompanyId::new()),
        club_id: None,
        is_active: active,
    }
}

fn seed_users(services: &AppServices) {
    services
        .users
        .create(user("alice", "correct-secret", Role::Staff, true))
        .unwrap();
    services
        .users
        .create(user("oscar", "owner-secret", Role::Owner, true))
        .unwrap();
    services
        .users
        .create(user("carol", "dormant-secret", Role::Customer, false))
        .unwrap();
}

fn fixed_unauthorized_body() -> serde_json::Value {
    json!({ "error": "Unauthorized", "message": "Authentication required" })
}

async fn login(client: &reqwest::Client, base_url: &str, username: &str, secret: &str) -> serde_json::Value {
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "username": username, "password": secret }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn login_returns_token_pair_and_identity_summary() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = login(&client, &srv.base_url, "alice", "correct-secret").await;

    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 900);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "STAFF");
}

#[tokio::test]
async fn all_login_failures_look_identical() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut bodies = Vec::new();
    for (username, secret) in [
        ("alice", "wrong-secret"),
        ("nobody", "whatever"),
        ("carol", "dormant-secret"),
    ] {
        let res = client
            .post(format!("{}/auth/login", srv.base_url))
            .json(&json!({ "username": username, "password": secret }))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        bodies.push(res.json::<serde_json::Value>().await.unwrap());
    }

    for body in &bodies {
        assert_eq!(body, &fixed_unauthorized_body());
    }
}

#[tokio::test]
async fn protected_path_without_token_gets_the_fixed_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );
}

#[tokio::test]
async fn garbage_and_forged_tokens_stay_anonymous() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Not a token at all.
    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth("definitely-not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );

    // Well-formed token signed with the wrong secret.
    let forged_claims = AccessClaims::for_user(
        &user("alice", "irrelevant", Role::Owner, true),
        Utc::now(),
        Duration::minutes(10),
    );
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &forged_claims,
        &jsonwebtoken::EncodingKey::from_secret(b"not-the-server-secret"),
    )
    .unwrap();

    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth(forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );
}

#[tokio::test]
async fn staff_is_denied_on_owner_gated_paths_with_the_fixed_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let staff = login(&client, &srv.base_url, "alice", "correct-secret").await;
    let staff_token = staff["access_token"].as_str().unwrap();

    // Authenticated path works.
    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth(staff_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["username"], "alice");
    assert_eq!(me["authority"], "STAFF");

    // Owner-gated path is denied with the same body an anonymous caller gets.
    let res = client
        .get(format!("{}/auth/debug/users", srv.base_url))
        .bearer_auth(staff_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );

    // The owner passes the same gate.
    let owner = login(&client, &srv.base_url, "oscar", "owner-secret").await;
    let res = client
        .get(format!("{}/auth/debug/users", srv.base_url))
        .bearer_auth(owner["access_token"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_path_succeeds_without_any_header() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn deactivation_invalidates_live_tokens() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = login(&client, &srv.base_url, "alice", "correct-secret").await;
    let token = body["access_token"].as_str().unwrap();

    // Works while active.
    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert!(srv.services.users.set_active("alice", false));

    // Cryptographically the token is untouched; the live row wins.
    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );
}

#[tokio::test]
async fn refresh_exchanges_and_rotates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = login(&client, &srv.base_url, "alice", "correct-secret").await;
    let old_refresh = first["refresh_token"].as_str().unwrap();

    let res = client
        .post(format!("{}/auth/refresh", srv.base_url))
        .json(&json!({ "refresh_token": old_refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let second: serde_json::Value = res.json().await.unwrap();

    // The fresh access token authenticates.
    let res = client
        .get(format!("{}/users/me", srv.base_url))
        .bearer_auth(second["access_token"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The consumed refresh token is gone.
    let res = client
        .post(format!("{}/auth/refresh", srv.base_url))
        .json(&json!({ "refresh_token": old_refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap(),
        fixed_unauthorized_body()
    );
}

#[tokio::test]
async fn venue_crud_lifecycle_under_authentication() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let owner = login(&client, &srv.base_url, "oscar", "owner-secret").await;
    let token = owner["access_token"].as_str().unwrap();

    // Anonymous creation is rejected.
    let res = client
        .post(format!("{}/companies", srv.base_url))
        .json(&json!({ "name": "Cue Hall Group" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Company -> club -> table, authenticated.
    let res = client
        .post(format!("{}/companies", srv.base_url))
        .bearer_auth(token)
        .json(&json!({ "name": "Cue Hall Group" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let company: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/clubs", srv.base_url))
        .bearer_auth(token)
        .json(&json!({
            "company_id": company["id"],
            "name": "Downtown Club",
            "opening_hours": "10:00-02:00",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let club: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/tables", srv.base_url))
        .bearer_auth(token)
        .json(&json!({
            "club_id": club["id"],
            "name": "T1",
            "kind": "POOL_8_BALL",
            "hourly_rate_cents": 12000,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let table: serde_json::Value = res.json().await.unwrap();
    assert_eq!(table["status"], "AVAILABLE");

    // The new table is visible in the club-scoped listing.
    let res = client
        .get(format!(
            "{}/tables?club_id={}",
            srv.base_url,
            club["id"].as_str().unwrap()
        ))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listing: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listing["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_lines_price_from_the_catalog() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let owner = login(&client, &srv.base_url, "oscar", "owner-secret").await;
    let token = owner["access_token"].as_str().unwrap();

    let company: serde_json::Value = client
        .post(format!("{}/companies", srv.base_url))
        .bearer_auth(token)
        .json(&json!({ "name": "Cue Hall Group" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let club: serde_json::Value = client
        .post(format!("{}/clubs", srv.base_url))
        .bearer_auth(token)
        .json(&json!({ "company_id": company["id"], "name": "Downtown Club" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let table: serde_json::Value = client
        .post(format!("{}/tables", srv.base_url))
        .bearer_auth(token)
        .json(&json!({
            "club_id": club["id"],
            "name": "T1",
            "kind": "SNOOKER",
            "hourly_rate_cents": 15000,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let product: serde_json::Value = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(token)
        .json(&json!({
            "club_id": club["id"],
            "name": "Iced Tea",
            "category": "BEVERAGE",
            "price_cents": 2500,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/orders", srv.base_url))
        .bearer_auth(token)
        .json(&json!({ "table_id": table["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!(
            "{}/orders/{}/items",
            srv.base_url,
            order["id"].as_str().unwrap()
        ))
        .bearer_auth(token)
        .json(&json!({ "product_id": product["id"], "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let added: serde_json::Value = res.json().await.unwrap();
    assert_eq!(added["order_total_cents"], 7500);

    let res = client
        .get(format!(
            "{}/orders/{}",
            srv.base_url,
            order["id"].as_str().unwrap()
        ))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["order"]["total_cents"], 7500);
    assert_eq!(fetched["items"].as_array().unwrap().len(), 1);
}
