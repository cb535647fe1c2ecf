//! List endpoint integration tests

mod common;

use common::{create_list, insert_unsynced_list, list_data, request, test_state};
use http::StatusCode;
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn create_list_returns_entity_with_remote_id() {
    let (state, remote) = test_state().await;
    remote.set_next_id("mc-list-1");

    let (status, body) = request(&state, "POST", "/mailchimp/lists", Some(list_data())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["list_id"].as_i64().is_some());
    assert_eq!(body["mail_chimp_id"], "mc-list-1");
    assert_eq!(body["name"], "New list");
    assert_eq!(body["contact"]["company"], "Doe Ltd.");
    assert_eq!(remote.calls(), vec![("POST".to_string(), "lists".to_string())]);
}

#[tokio::test]
async fn create_list_rejects_missing_required_fields() {
    let (state, remote) = test_state().await;

    let (status, body) = request(&state, "POST", "/mailchimp/lists", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["message"], "Invalid data given");
    let details = body["details"].as_object().unwrap();
    assert!(details.contains_key("name"));
    assert!(details.contains_key("permission_reminder"));
    assert!(details.contains_key("email_type_option"));
    assert!(details.contains_key("contact.company"));
    assert!(details.contains_key("campaign_defaults.from_email"));

    // nothing was written or forwarded
    assert!(remote.calls().is_empty());
    let (_, lists) = request(&state, "GET", "/mailchimp/lists", None).await;
    assert_eq!(lists.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_list_each_required_field_enforced() {
    let (state, _remote) = test_state().await;

    for field in [
        "name",
        "permission_reminder",
        "email_type_option",
        "contact",
        "campaign_defaults",
    ] {
        let mut data = list_data();
        data.as_object_mut().unwrap().remove(field);

        let (status, body) = request(&state, "POST", "/mailchimp/lists", Some(data)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(body["code"], 2, "missing {field}");
    }
}

#[tokio::test]
async fn create_list_remote_failure_keeps_local_row() {
    let (state, remote) = test_state().await;
    remote.fail_post.store(true, Ordering::SeqCst);

    let (status, body) = request(&state, "POST", "/mailchimp/lists", Some(list_data())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9003);
    assert_eq!(body["message"], "MailChimp create failed");

    // the local row was materialized before the remote call and stays
    let (status, lists) = request(&state, "GET", "/mailchimp/lists", None).await;
    assert_eq!(status, StatusCode::OK);
    let lists = lists.as_array().unwrap();
    assert_eq!(lists.len(), 1);
    assert!(lists[0]["mail_chimp_id"].is_null());
}

#[tokio::test]
async fn create_list_rejects_unknown_fields() {
    let (state, remote) = test_state().await;
    let mut data = list_data();
    data.as_object_mut()
        .unwrap()
        .insert("mail_chimp_id".into(), json!("sneaky-override"));

    let (status, body) = request(&state, "POST", "/mailchimp/lists", Some(data)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn create_list_rejects_wrong_field_type() {
    let (state, _remote) = test_state().await;

    let (status, body) = request(
        &state,
        "POST",
        "/mailchimp/lists",
        Some(json!({"email_type_option": "not-a-bool"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn show_list_returns_mirrored_entity() {
    let (state, remote) = test_state().await;
    remote.set_next_id("mc-list-1");
    let list_id = create_list(&state).await;

    let (status, body) =
        request(&state, "GET", &format!("/mailchimp/lists/{list_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["list_id"], list_id);
    assert_eq!(body["mail_chimp_id"], "mc-list-1");
    // reads never touch the remote service
    assert_eq!(remote.calls_with_method("GET").len(), 0);
}

#[tokio::test]
async fn show_all_lists() {
    let (state, _remote) = test_state().await;
    create_list(&state).await;
    create_list(&state).await;

    let (status, body) = request(&state, "GET", "/mailchimp/lists", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn show_missing_list_is_bad_request() {
    let (state, _remote) = test_state().await;

    let (status, body) = request(&state, "GET", "/mailchimp/lists/999", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3);
    assert_eq!(body["message"], "List not found. [List ID: 999]");
}

#[tokio::test]
async fn update_list_patches_remote_copy() {
    let (state, remote) = test_state().await;
    remote.set_next_id("mc-list-1");
    let list_id = create_list(&state).await;

    let (status, body) = request(
        &state,
        "PUT",
        &format!("/mailchimp/lists/{list_id}"),
        Some(json!({"name": "Updated list"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated list");
    // unchanged fields survive the merge
    assert_eq!(body["visibility"], "prv");
    assert_eq!(
        remote.calls_with_method("PATCH"),
        vec!["lists/mc-list-1".to_string()]
    );

    // PATCH drives the same flow
    let (status, body) = request(
        &state,
        "PATCH",
        &format!("/mailchimp/lists/{list_id}"),
        Some(json!({"name": "Patched list"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Patched list");
}

#[tokio::test]
async fn update_list_rejects_invalid_merge_result() {
    let (state, _remote) = test_state().await;
    let list_id = create_list(&state).await;

    let (status, body) = request(
        &state,
        "PUT",
        &format!("/mailchimp/lists/{list_id}"),
        Some(json!({"visibility": "hidden"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn update_list_remote_failure_keeps_local_update() {
    let (state, remote) = test_state().await;
    let list_id = create_list(&state).await;
    remote.fail_patch.store(true, Ordering::SeqCst);

    let (status, body) = request(
        &state,
        "PUT",
        &format!("/mailchimp/lists/{list_id}"),
        Some(json!({"name": "Renamed"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9003);

    // the list flow writes locally before the remote patch; the local
    // update survives the failed remote call
    let (_, body) = request(&state, "GET", &format!("/mailchimp/lists/{list_id}"), None).await;
    assert_eq!(body["name"], "Renamed");
}

#[tokio::test]
async fn update_unsynced_list_reports_missing_remote_id() {
    let (state, remote) = test_state().await;
    let list_id = insert_unsynced_list(&state.pool).await;

    let (status, body) = request(
        &state,
        "PUT",
        &format!("/mailchimp/lists/{list_id}"),
        Some(json!({"name": "Renamed"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(
        body["message"],
        format!("MailChimp ID is missing. [List ID: {list_id}]")
    );
    assert!(remote.calls_with_method("PATCH").is_empty());
}

#[tokio::test]
async fn update_missing_list_is_bad_request() {
    let (state, _remote) = test_state().await;

    let (status, body) = request(
        &state,
        "PUT",
        "/mailchimp/lists/999",
        Some(json!({"name": "Renamed"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn delete_list_removes_remote_then_local() {
    let (state, remote) = test_state().await;
    remote.set_next_id("mc-list-1");
    let list_id = create_list(&state).await;

    let (status, body) =
        request(&state, "DELETE", &format!("/mailchimp/lists/{list_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(
        remote.calls_with_method("DELETE"),
        vec!["lists/mc-list-1".to_string()]
    );

    let (status, _) = request(&state, "GET", &format!("/mailchimp/lists/{list_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_unsynced_list_keeps_local_row() {
    let (state, remote) = test_state().await;
    let list_id = insert_unsynced_list(&state.pool).await;

    let (status, body) =
        request(&state, "DELETE", &format!("/mailchimp/lists/{list_id}"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert!(remote.calls_with_method("DELETE").is_empty());

    // no remote delete happened, so the mirror still holds the row
    let (status, _) = request(&state, "GET", &format!("/mailchimp/lists/{list_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_list_remote_failure_keeps_local_row() {
    let (state, remote) = test_state().await;
    let list_id = create_list(&state).await;
    remote.fail_delete.store(true, Ordering::SeqCst);

    let (status, body) =
        request(&state, "DELETE", &format!("/mailchimp/lists/{list_id}"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9003);

    let (status, _) = request(&state, "GET", &format!("/mailchimp/lists/{list_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (state, _remote) = test_state().await;

    let (status, body) = request(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = request(&state, "GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["mailchimp"]["status"], "ok");
}
