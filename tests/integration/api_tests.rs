//! API integration tests
//!
//! Run against a live server with a reachable database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080";

/// Client with a cookie store, so the session cookie set at login is
/// carried on subsequent requests
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// Usernames are unique per test run; registration would 409 otherwise
fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

async fn register_and_login(client: &Client, username: &str, password: &str) {
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send register request");
    assert!(response.status().is_success(), "register failed");

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success(), "login failed");
    assert_eq!(response.url().path(), "/home");
}

/// Add a book and return its id from the shelf listing
async fn add_book(client: &Client, title: &str, author: &str) -> i64 {
    let response = client
        .post(format!("{}/addb", BASE_URL))
        .form(&[("title", title), ("author", author)])
        .send()
        .await
        .expect("Failed to send add-book request");
    assert!(response.status().is_success());

    let books: Value = client
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse book list");

    books
        .as_array()
        .expect("Book list is not an array")
        .iter()
        .find(|b| b["title"] == title)
        .and_then(|b| b["id"].as_i64())
        .expect("Added book not in listing")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = client();
    let username = unique_username("alice");
    register_and_login(&client, &username, "pw1").await;
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let owner = client();
    let username = unique_username("bob");
    register_and_login(&owner, &username, "pw1").await;

    // A fresh client with the wrong password gets 401 and no session
    let stranger = client();
    let response = stranger
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", username.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    let response = stranger
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/login");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_redirects_to_login() {
    let response = client()
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/login");
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_username() {
    let client = client();
    let username = unique_username("carol");
    register_and_login(&client, &username, "pw1").await;

    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[("username", username.as_str()), ("password", "pw2")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_register_blank_username_rejected() {
    let response = client()
        .post(format!("{}/register", BASE_URL))
        .form(&[("username", "   "), ("password", "pw1")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_add_and_list_book() {
    let client = client();
    register_and_login(&client, &unique_username("dave"), "pw1").await;

    let id = add_book(&client, "1984", "Orwell").await;

    let books: Value = client
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse book list");

    let book = books
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == id)
        .expect("Book missing from listing");
    assert_eq!(book["author"], "Orwell");
    assert_eq!(book["finished"], false);
    assert!(book["finish_date"].is_null());

    // A new book is currently being read, not finished
    let current: Value = client
        .get(format!("{}/current", BASE_URL))
        .send()
        .await
        .expect("Failed to list current books")
        .json()
        .await
        .expect("Failed to parse current list");
    assert!(current.as_array().unwrap().iter().any(|b| b["id"] == id));

    let finished: Value = client
        .get(format!("{}/finished", BASE_URL))
        .send()
        .await
        .expect("Failed to list finished books")
        .json()
        .await
        .expect("Failed to parse finished list");
    assert!(!finished.as_array().unwrap().iter().any(|b| b["id"] == id));
}

#[tokio::test]
#[ignore]
async fn test_add_book_blank_title_rejected() {
    let client = client();
    register_and_login(&client, &unique_username("erin"), "pw1").await;

    let response = client
        .post(format!("{}/addb", BASE_URL))
        .form(&[("title", "  "), ("author", "Orwell")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_finish_toggle_roundtrip() {
    let client = client();
    register_and_login(&client, &unique_username("frank"), "pw1").await;
    let id = add_book(&client, "Dune", "Herbert").await;

    // Finishing sets the flag and stamps today's date together
    let response = client
        .post(format!("{}/book/{}/finish", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send finish request");
    assert!(response.status().is_success());

    let details: Value = response.json().await.expect("Failed to parse details");
    assert_eq!(details["book"]["finished"], true);
    assert!(details["book"]["finish_date"].is_string());

    // Reverting to currently-reading clears the date again
    let response = client
        .post(format!("{}/book/{}/current", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send current request");
    assert!(response.status().is_success());

    let details: Value = response.json().await.expect("Failed to parse details");
    assert_eq!(details["book"]["finished"], false);
    assert!(details["book"]["finish_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_note_optional_fields() {
    let client = client();
    register_and_login(&client, &unique_username("grace"), "pw1").await;
    let id = add_book(&client, "Emma", "Austen").await;

    // Blank chapter means absent; page must parse
    let response = client
        .post(format!("{}/book/{}", BASE_URL, id))
        .form(&[
            ("form_id", "note"),
            ("chapter", ""),
            ("page", "5"),
            ("content", "x"),
        ])
        .send()
        .await
        .expect("Failed to send note request");
    assert!(response.status().is_success());

    let details: Value = response.json().await.expect("Failed to parse details");
    let note = &details["notes"][0];
    assert!(note["chapter"].is_null());
    assert_eq!(note["page"], 5);
    assert_eq!(note["content"], "x");

    // Garbage in a numeric field is rejected outright
    let response = client
        .post(format!("{}/book/{}", BASE_URL, id))
        .form(&[
            ("form_id", "note"),
            ("chapter", "five"),
            ("page", ""),
            ("content", "y"),
        ])
        .send()
        .await
        .expect("Failed to send note request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_cascades_notes() {
    let client = client();
    register_and_login(&client, &unique_username("heidi"), "pw1").await;
    let id = add_book(&client, "Ulysses", "Joyce").await;

    let response = client
        .post(format!("{}/book/{}", BASE_URL, id))
        .form(&[("form_id", "note"), ("content", "chapter one is dense")])
        .send()
        .await
        .expect("Failed to send note request");
    assert!(response.status().is_success());

    let details: Value = response.json().await.expect("Failed to parse details");
    let note_id = details["notes"][0]["id"].as_i64().expect("No note id");

    // Delete the book; the note must go with it
    let response = client
        .get(format!("{}/deleteb/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/book/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send detail request");
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/deleten/{}", BASE_URL, note_id))
        .send()
        .await
        .expect("Failed to send delete-note request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_book_raises() {
    let client = client();
    register_and_login(&client, &unique_username("ivan"), "pw1").await;

    let response = client
        .get(format!("{}/deleteb/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_yearly_stats() {
    let client = client();
    register_and_login(&client, &unique_username("judy"), "pw1").await;
    let id = add_book(&client, "Middlemarch", "Eliot").await;

    let response = client
        .post(format!("{}/book/{}/finish", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send finish request");
    assert!(response.status().is_success());

    let stats: Value = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send stats request")
        .json()
        .await
        .expect("Failed to parse stats");

    let counts = stats["monthly_counts"].as_array().expect("No counts");
    assert_eq!(counts.len(), 12);
    assert_eq!(stats["labels"].as_array().unwrap().len(), 12);
    assert_eq!(stats["years"].as_array().unwrap().len(), 10);

    let total = stats["total"].as_i64().expect("No total");
    let sum: i64 = counts.iter().map(|c| c.as_i64().unwrap()).sum();
    assert_eq!(sum, total);
    assert!(total >= 1);
    assert!(stats["books"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == id));

    // An empty year reports twelve zeros, not missing entries
    let stats: Value = client
        .get(format!("{}/stats?year=1999", BASE_URL))
        .send()
        .await
        .expect("Failed to send stats request")
        .json()
        .await
        .expect("Failed to parse stats");
    assert_eq!(stats["total"], 0);
    assert_eq!(
        stats["monthly_counts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_i64().unwrap())
            .sum::<i64>(),
        0
    );
}

#[tokio::test]
#[ignore]
async fn test_stats_malformed_year_defaults_to_current() {
    let client = client();
    register_and_login(&client, &unique_username("kim"), "pw1").await;

    let stats: Value = client
        .get(format!("{}/stats?year=abc", BASE_URL))
        .send()
        .await
        .expect("Failed to send stats request")
        .json()
        .await
        .expect("Failed to parse stats");

    let year = stats["year"].as_i64().expect("No year");
    let first_selectable = stats["years"][0].as_i64().expect("No years");
    assert_eq!(year, first_selectable);
}

#[tokio::test]
#[ignore]
async fn test_ownership_isolation() {
    let alice = client();
    register_and_login(&alice, &unique_username("alice"), "pw1").await;
    let alice_book = add_book(&alice, "Persuasion", "Austen").await;

    let mallory = client();
    register_and_login(&mallory, &unique_username("mallory"), "pw2").await;

    // Another user's shelf never shows the book
    let books: Value = mallory
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse book list");
    assert!(!books
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == alice_book));

    // Reading, mutating and deleting by id all come back NotFound
    let response = mallory
        .get(format!("{}/book/{}", BASE_URL, alice_book))
        .send()
        .await
        .expect("Failed to send detail request");
    assert_eq!(response.status(), 404);

    let response = mallory
        .post(format!("{}/book/{}/finish", BASE_URL, alice_book))
        .send()
        .await
        .expect("Failed to send finish request");
    assert_eq!(response.status(), 404);

    let response = mallory
        .get(format!("{}/deleteb/{}", BASE_URL, alice_book))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 404);

    // The owner still sees it untouched
    let details: Value = alice
        .get(format!("{}/book/{}", BASE_URL, alice_book))
        .send()
        .await
        .expect("Failed to send detail request")
        .json()
        .await
        .expect("Failed to parse details");
    assert_eq!(details["book"]["finished"], false);
}

#[tokio::test]
#[ignore]
async fn test_logout_clears_session() {
    let client = client();
    register_and_login(&client, &unique_username("leo"), "pw1").await;

    let response = client
        .get(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send logout request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/home", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/login");
}
