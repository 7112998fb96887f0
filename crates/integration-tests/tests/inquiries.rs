//! End-to-end tests for inquiry submission and notification fan-out.

use serde_json::Value;

use maru_integration_tests::{admin_base_url, admin_client, client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_inquiry_requires_name_email_and_message() {
    let client = client();

    let resp = client
        .post(format!("{}/api/inquiries", storefront_base_url()))
        .json(&serde_json::json!({ "name": "Kim", "email": "" }))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["success"], Value::Bool(false));
    assert!(body["error"].as_str().expect("error string").contains("required"));
}

#[tokio::test]
#[ignore = "Requires running servers and admin credentials"]
async fn test_inquiry_fans_out_to_admin_notifications() {
    let visitor = client();
    let marker = format!("integration-{}", std::process::id());

    let resp = visitor
        .post(format!("{}/api/inquiries", storefront_base_url()))
        .json(&serde_json::json!({
            "name": marker,
            "email": "visitor@example.com",
            "kind": "rental",
            "message": "Is the wave series still available for rent?",
        }))
        .send()
        .await
        .expect("Failed to submit inquiry");
    assert!(resp.status().is_success());

    // The admin sees both the inquiry and a notification record.
    let admin = admin_client().await;

    let inquiries: Value = admin
        .get(format!("{}/api/inquiries?status=new", admin_base_url()))
        .send()
        .await
        .expect("Failed to list inquiries")
        .json()
        .await
        .expect("Failed to parse inquiries");
    let found = inquiries["inquiries"]
        .as_array()
        .expect("inquiries array")
        .iter()
        .any(|i| i["name"] == Value::String(marker.clone()));
    assert!(found, "submitted inquiry should be listed");

    let notifications: Value = admin
        .get(format!("{}/api/notifications", admin_base_url()))
        .send()
        .await
        .expect("Failed to list notifications")
        .json()
        .await
        .expect("Failed to parse notifications");
    let notified = notifications["notifications"]
        .as_array()
        .expect("notifications array")
        .iter()
        .any(|n| {
            n["kind"] == Value::String("inquiry_received".into())
                && n["message"]
                    .as_str()
                    .is_some_and(|m| m.contains(&marker))
        });
    assert!(notified, "inquiry should fan out to admin notifications");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_inquiry_kind_falls_back_to_general() {
    let visitor = client();

    let body: Value = visitor
        .post(format!("{}/api/inquiries", storefront_base_url()))
        .json(&serde_json::json!({
            "name": "Permissive Kim",
            "email": "visitor@example.com",
            "kind": "definitely-not-a-kind",
            "message": "Hello",
        }))
        .send()
        .await
        .expect("Failed to submit inquiry")
        .json()
        .await
        .expect("Failed to parse body");

    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["inquiry"]["kind"], Value::String("general".into()));
}
