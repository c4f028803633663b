//! Integration tests for invites and member removal.

mod test_utils;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use test_utils::{
    authed_request, create_test_organisation, insert_membership, json_body, test_app,
};

#[tokio::test]
async fn invite_requires_a_plausible_email() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    let uri = format!("/api/v1/orgs/{}/invites", org);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "not-an-email" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");

    // Nothing was upserted.
    let overview = format!("/api/v1/orgs/{}/overview", org);
    let response = app
        .oneshot(authed_request("GET", &overview, "owner_1", None, None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["invites"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invite_normalizes_email_and_defaults_role() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    let uri = format!("/api/v1/orgs/{}/invites", org);
    let response = app
        .oneshot(authed_request(
            "POST",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "  Alice@X.COM " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["invite"]["email"], "alice@x.com");
    assert_eq!(body["invite"]["role"], "member");
    assert_eq!(body["invite"]["status"], "pending");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("accepted automatically")
    );
}

#[tokio::test]
async fn reinviting_resets_the_same_row_to_pending() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    let uri = format!("/api/v1/orgs/{}/invites", org);
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "a@x.com" })),
        ))
        .await
        .unwrap();
    let first = json_body(response).await;
    let invite_id = first["invite"]["id"].as_str().unwrap().to_string();

    // Revoke it, then invite the same address again.
    let revoke_uri = format!("/api/v1/orgs/{}/invites/{}/revoke", org, invite_id);
    let response = app
        .clone()
        .oneshot(authed_request("POST", &revoke_uri, "owner_1", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let revoked = json_body(response).await;
    assert_eq!(revoked["status"], "revoked");

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "A@x.com", "role": "admin" })),
        ))
        .await
        .unwrap();
    let second = json_body(response).await;

    // Same row, reset to pending with the refreshed role.
    assert_eq!(second["invite"]["id"].as_str().unwrap(), invite_id);
    assert_eq!(second["invite"]["status"], "pending");
    assert_eq!(second["invite"]["role"], "admin");

    let overview = format!("/api/v1/orgs/{}/overview", org);
    let response = app
        .oneshot(authed_request("GET", &overview, "owner_1", None, None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["invites"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn revoking_unknown_invite_is_not_found() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    let uri = format!(
        "/api/v1/orgs/{}/invites/{}/revoke",
        org,
        uuid::Uuid::new_v4()
    );
    let response = app
        .oneshot(authed_request("POST", &uri, "owner_1", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    let uri = format!("/api/v1/orgs/{}/invites", org);
    let response = app
        .oneshot(authed_request(
            "POST",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "a@x.com", "role": "owner" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn self_removal_is_rejected_with_no_delete() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();
    insert_membership(&db, org, Some("user_2"), "a@x.com", "member")
        .await
        .unwrap();

    let uri = format!("/api/v1/orgs/{}/members", org);
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &uri,
            "user_2",
            Some("A@X.com"),
            Some(json!({ "email": "a@x.com", "user_id": "user_2" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The membership is still there.
    let overview = format!("/api/v1/orgs/{}/overview", org);
    let response = app
        .oneshot(authed_request(
            "GET",
            &overview,
            "user_2",
            Some("a@x.com"),
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["memberships"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn remove_by_user_id_deletes_the_membership() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();
    insert_membership(&db, org, Some("user_2"), "a@x.com", "member")
        .await
        .unwrap();

    let uri = format!("/api/v1/orgs/{}/members", org);
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "a@x.com", "user_id": "user_2" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let overview = format!("/api/v1/orgs/{}/overview", org);
    let response = app
        .oneshot(authed_request("GET", &overview, "owner_1", None, None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["memberships"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn remove_by_email_only_touches_placeholder_rows() {
    let (app, db) = test_app().await.unwrap();
    let org = create_test_organisation(&db, "owner_1").await.unwrap();

    // A claimed membership: removal by email alone must not reach it.
    insert_membership(&db, org, Some("user_2"), "a@x.com", "member")
        .await
        .unwrap();

    let uri = format!("/api/v1/orgs/{}/members", org);
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "a@x.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A placeholder row with no user id is removable by email.
    insert_membership(&db, org, None, "pending@x.com", "member")
        .await
        .unwrap();
    let response = app
        .oneshot(authed_request(
            "DELETE",
            &uri,
            "owner_1",
            None,
            Some(json!({ "email": "Pending@X.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
