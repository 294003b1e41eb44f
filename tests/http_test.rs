//! HTTP routes, served on an ephemeral port and exercised with reqwest.

use reqwest::StatusCode;
use savor_safari::auth::TokenSigner;
use savor_safari::http::{self, AppState};
use savor_safari::lifecycle::MarketSystem;
use savor_safari::model::{ListingCreate, ListingMetadata};
use serde_json::{json, Value};

struct TestServer {
    base: String,
    client: reqwest::Client,
    // Keeps the actors alive for the duration of the test
    _system: MarketSystem,
}

impl TestServer {
    async fn start() -> Self {
        let system = MarketSystem::new(16);
        system
            .seed(vec![
                ListingCreate {
                    name: "Pasta".into(),
                    available_quantity: 5,
                    owner: "chef@example.com".into(),
                    price: 12.5,
                    metadata: ListingMetadata::default(),
                },
                ListingCreate {
                    name: "Ramen".into(),
                    available_quantity: 3,
                    owner: "chef@example.com".into(),
                    price: 10.0,
                    metadata: ListingMetadata::default(),
                },
            ])
            .await
            .unwrap();

        let state = AppState::new(
            system.listing_client.clone(),
            system.purchase_client.clone(),
            TokenSigner::new("test-secret", chrono::Duration::days(7)),
        );
        let app = http::router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            _system: system,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Logs in through `POST /jwt` and returns the token from the cookie.
    async fn login(&self, email: &str) -> String {
        let resp = self
            .client
            .post(self.url("/jwt"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = resp
            .headers()
            .get("set-cookie")
            .expect("Missing Set-Cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains(&format!("Max-Age={}", 7 * 24 * 60 * 60)));

        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix("token="))
            .expect("Missing token cookie")
            .to_string()
    }

    async fn buy(&self, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/purchase-food-items"))
            .header("cookie", format!("token={token}"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_banner() {
    let server = TestServer::start().await;
    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "SavorSafari server is running");
}

#[tokio::test]
async fn test_purchase_requires_credential() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/purchase-food-items"))
        .json(&json!({ "food_id": 1, "email": "a@b.com", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "unauthorized");

    let resp = server
        .buy("forged.token", json!({ "food_id": 1, "email": "a@b.com", "quantity": 1 }))
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_purchase_flow_over_http() {
    let server = TestServer::start().await;
    let token = server.login("a@b.com").await;

    // Someone else's email
    let resp = server
        .buy(&token, json!({ "food_id": 1, "email": "c@d.com", "quantity": 1 }))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Bad quantity
    let resp = server
        .buy(&token, json!({ "food_id": 1, "email": "a@b.com", "quantity": -2 }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "validation");

    // Success by name
    let resp = server
        .buy(
            &token,
            json!({ "food_name": "Pasta", "email": "a@b.com", "buyer_name": "Ada", "quantity": 3 }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let purchase: Value = resp.json().await.unwrap();
    assert_eq!(purchase["food_name"], "Pasta");
    assert_eq!(purchase["quantity"], 3);
    assert_eq!(purchase["listing_id"], 1);

    // Too many
    let resp = server
        .buy(&token, json!({ "food_id": 1, "email": "a@b.com", "quantity": 10 }))
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "insufficient_inventory");

    // Unknown listing
    let resp = server
        .buy(&token, json!({ "food_id": 42, "email": "a@b.com", "quantity": 1 }))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let all: Vec<Value> = server
        .client
        .get(server.url("/purchase-food-items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let top: Vec<Value> = server
        .client
        .get(server.url("/top-purchased-foods"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Pasta");
    assert_eq!(top[0]["available_quantity"], 2);
    assert_eq!(top[0]["purchase_count"], 1);
}

#[tokio::test]
async fn test_buyer_routes_are_scoped_to_caller() {
    let server = TestServer::start().await;
    let ada = server.login("a@b.com").await;
    let bob = server.login("bob@b.com").await;

    let resp = server
        .buy(&ada, json!({ "food_id": 2, "email": "a@b.com", "quantity": 1 }))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let purchase: Value = resp.json().await.unwrap();
    let id = purchase["id"].as_u64().unwrap();

    let mine = server
        .client
        .get(server.url("/purchase-food-items/a@b.com"))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(mine.status(), StatusCode::OK);
    let mine: Vec<Value> = mine.json().await.unwrap();
    assert_eq!(mine.len(), 1);

    let theirs = server
        .client
        .get(server.url("/purchase-food-items/a@b.com"))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(theirs.status(), StatusCode::FORBIDDEN);

    let path = server.url(&format!("/purchase-food-items/{id}"));
    let resp = server.client.delete(&path).bearer_auth(&bob).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = server.client.delete(&path).bearer_auth(&ada).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deleted"], id);

    let resp = server.client.delete(&path).bearer_auth(&ada).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting the record did not give the stock back
    let top: Vec<Value> = server
        .client
        .get(server.url("/top-purchased-foods"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(top[0]["name"], "Ramen");
    assert_eq!(top[0]["available_quantity"], 2);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = TestServer::start().await;
    let resp = server.client.post(server.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_jwt_requires_email() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .post(server.url("/jwt"))
        .json(&json!({ "email": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
