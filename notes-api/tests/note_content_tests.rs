//! Integration tests for what the note pages show
//!
//! Run with: cargo test -p notes-api --test note_content_tests

mod common;

use axum::http::StatusCode;
use common::{json_body, location, TestContext};
use notes_api::routes::{delete_url, detail_url, edit_url, ADD, LIST, SUCCESS};

#[tokio::test]
async fn test_authorized_user_has_form() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    ctx.create_note(&author, "Title", "Text", "note1").await;

    for url in [ADD.to_string(), edit_url("note1")] {
        let response = ctx.get(&url, Some(&author)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", url);

        let body = json_body(response).await;
        let form = &body["form"];
        assert!(form.is_object(), "{} has no form", url);
        for field in ["title", "text", "slug"] {
            assert!(form.get(field).is_some(), "{} form lacks {}", url, field);
        }
    }
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    ctx.create_note(&author, "Title", "Text", "note1").await;

    let body = json_body(ctx.get(&edit_url("note1"), Some(&author)).await).await;

    assert_eq!(body["form"]["title"], "Title");
    assert_eq!(body["form"]["slug"], "note1");
    assert_eq!(body["note"]["slug"], "note1");
}

#[tokio::test]
async fn test_authorized_user_sees_only_own_notes() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    let reader = ctx.create_user("No O. Cares").await;
    ctx.create_note(&author, "Title", "Text Author A", "note1").await;
    ctx.create_note(&reader, "Title", "Text No O. Cares", "note2").await;

    let response = ctx.get(LIST, Some(&author)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let object_list = body["object_list"].as_array().expect("object_list is a list");
    assert_eq!(object_list.len(), 1);
    assert_eq!(object_list[0]["slug"], "note1");
}

#[tokio::test]
async fn test_list_is_in_creation_order() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    for slug in ["first", "second", "third"] {
        ctx.create_note(&author, "Title", "Text", slug).await;
    }

    let body = json_body(ctx.get(LIST, Some(&author)).await).await;
    let slugs: Vec<&str> = body["object_list"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["slug"].as_str())
        .collect();

    assert_eq!(slugs, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_detail_and_delete_pages_show_note_to_author_only() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    let reader = ctx.create_user("Reader B").await;
    ctx.create_note(&author, "Title", "Text", "note1").await;

    for url in [detail_url("note1"), delete_url("note1"), edit_url("note1")] {
        let response = ctx.get(&url, Some(&author)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", url);
        let body = json_body(response).await;
        assert_eq!(body["note"]["text"], "Text");

        let response = ctx.get(&url, Some(&reader)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", url);
    }
}

#[tokio::test]
async fn test_missing_note_is_not_found() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;

    let response = ctx.get(&detail_url("nope"), Some(&author)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_anonymous_is_redirected_to_login() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    ctx.create_note(&author, "Title", "Text", "note1").await;

    let urls = [
        LIST.to_string(),
        ADD.to_string(),
        SUCCESS.to_string(),
        detail_url("note1"),
        edit_url("note1"),
        delete_url("note1"),
    ];
    for url in urls {
        let response = ctx.get(&url, None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", url);
        assert_eq!(location(&response), format!("/auth/login/?next={}", url));
    }
}

#[tokio::test]
async fn test_anonymous_writes_are_redirected_to_login() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;
    ctx.create_note(&author, "Title", "Text", "note1").await;
    let fields = [("title", "Changed"), ("text", "Changed"), ("slug", "changed")];

    let responses = [
        (edit_url("note1"), ctx.post_form(&edit_url("note1"), None, &fields).await),
        (delete_url("note1"), ctx.post_form(&delete_url("note1"), None, &[]).await),
        (delete_url("note1"), ctx.delete(&delete_url("note1"), None).await),
    ];
    for (url, response) in responses {
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", url);
        assert_eq!(location(&response), format!("/auth/login/?next={}", url));
    }

    let note = ctx.find_note("note1").await.expect("Note should still exist");
    assert_eq!(note.title, "Title");
    assert_eq!(note.text, "Text");
    assert_eq!(ctx.note_count().await, 1);
}

#[tokio::test]
async fn test_success_page() {
    let ctx = TestContext::new();
    let author = ctx.create_user("Author A").await;

    let response = ctx.get(SUCCESS, Some(&author)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["next"], LIST);
}
