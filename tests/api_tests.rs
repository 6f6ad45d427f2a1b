//! HTTP integration tests
//!
//! Run against a live server (with its database and session store up):
//! `cargo test -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:8080";

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn register(client: &Client, username: &str, password: &str) {
    let response = client
        .post(format!("{}/auth/registration", BASE_URL))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send registration request");
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");
}

async fn login(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/process_login", BASE_URL))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send login request")
}

#[tokio::test]
#[ignore]
async fn health_check_is_public() {
    let response = client()
        .get(format!("{}/api/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn login_and_registration_pages_need_no_session() {
    let client = client();

    for path in ["/auth/login", "/auth/registration", "/css/main.css"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
#[ignore]
async fn book_list_requires_a_session() {
    let response = client()
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
#[ignore]
async fn login_with_bad_credentials_creates_no_session() {
    let client = client();

    let response = login(&client, "nobody", "wrong").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login?error");

    // Still anonymous afterwards.
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
#[ignore]
async fn login_logout_round_trip() {
    let client = client();
    let username = format!("reader-{}", rand::random::<u32>());

    register(&client, &username, "pw12345").await;

    let response = login(&client, &username, "pw12345").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/books");

    // The session cookie now grants access to the catalog.
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    // Logout invalidates the session.
    let response = client
        .post(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
#[ignore]
async fn duplicate_registration_re_renders_the_form() {
    let client = client();
    let username = format!("reader-{}", rand::random::<u32>());

    register(&client, &username, "pw12345").await;

    let response = client
        .post(format!("{}/auth/registration", BASE_URL))
        .form(&[("username", username.as_str()), ("password", "pw12345")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("This username is already taken"));
}

#[tokio::test]
#[ignore]
async fn duplicate_book_title_re_renders_the_form() {
    let client = client();
    let username = format!("reader-{}", rand::random::<u32>());

    register(&client, &username, "pw12345").await;
    let response = login(&client, &username, "pw12345").await;
    assert_eq!(location(&response), "/books");

    let title = format!("Dune {}", rand::random::<u32>());

    let response = client
        .post(format!("{}/books", BASE_URL))
        .form(&[("title", title.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/books");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .form(&[("title", title.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("This title is already taken"));
}

#[tokio::test]
#[ignore]
async fn unknown_book_renders_not_found() {
    let client = client();
    let username = format!("reader-{}", rand::random::<u32>());

    register(&client, &username, "pw12345").await;
    login(&client, &username, "pw12345").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, i64::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
