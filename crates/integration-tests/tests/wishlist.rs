//! End-to-end tests for customer accounts and the wishlist toggle.

use serde_json::Value;

use maru_integration_tests::{client, storefront_base_url};

/// Register a throwaway customer and return the logged-in client.
async fn registered_client(tag: &str) -> reqwest::Client {
    let client = client();
    let email = format!("test-{tag}-{}@example.com", std::process::id());

    let resp = client
        .post(format!("{}/api/auth/register", storefront_base_url()))
        .json(&serde_json::json!({
            "email": email,
            "password": "integration-test-pw",
            "name": "Test Customer",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_success(), "register failed: {}", resp.status());

    client
}

/// Ids currently in the wishlist.
async fn wishlist_ids(client: &reqwest::Client) -> Vec<i64> {
    let body: Value = client
        .get(format!("{}/api/wishlist", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get wishlist")
        .json()
        .await
        .expect("Failed to parse wishlist");

    body["artworks"]
        .as_array()
        .expect("artworks array")
        .iter()
        .map(|a| a["id"].as_i64().expect("artwork id"))
        .collect()
}

#[tokio::test]
#[ignore = "Requires running storefront and seeded database"]
async fn test_toggle_twice_restores_membership() {
    let base_url = storefront_base_url();
    let client = registered_client("wishlist").await;

    // Pick any listed artwork.
    let listing: Value = client
        .get(format!("{base_url}/api/artworks?limit=1"))
        .send()
        .await
        .expect("Failed to get listing")
        .json()
        .await
        .expect("Failed to parse listing");
    let artwork_id = listing["artworks"]
        .as_array()
        .and_then(|a| a.first())
        .and_then(|a| a["id"].as_i64())
        .expect("seed data must include an artwork");

    let before = wishlist_ids(&client).await;
    assert!(!before.contains(&artwork_id));

    // First toggle adds.
    let body: Value = client
        .post(format!("{base_url}/api/wishlist/{artwork_id}/toggle"))
        .send()
        .await
        .expect("Failed to toggle")
        .json()
        .await
        .expect("Failed to parse toggle");
    assert_eq!(body["wishlisted"], Value::Bool(true));
    assert!(wishlist_ids(&client).await.contains(&artwork_id));

    // Second toggle removes, restoring the original membership.
    let body: Value = client
        .post(format!("{base_url}/api/wishlist/{artwork_id}/toggle"))
        .send()
        .await
        .expect("Failed to toggle")
        .json()
        .await
        .expect("Failed to parse toggle");
    assert_eq!(body["wishlisted"], Value::Bool(false));
    assert_eq!(wishlist_ids(&client).await, before);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_wishlist_requires_login() {
    let client = client();
    let resp = client
        .get(format!("{}/api/wishlist", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["success"], Value::Bool(false));
}
