use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::util::ServiceExt; // for `oneshot`

use reviewshelf::db;
use reviewshelf::infrastructure::AppState;
use reviewshelf::server;
use reviewshelf::uploads::UploadStore;

const BOUNDARY: &str = "X-REVIEWSHELF-TEST-BOUNDARY";

// Helper to create a test app with an in-memory database and a
// throwaway uploads directory.
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");

    let dir = std::env::temp_dir().join(format!("reviewshelf-test-{}", uuid::Uuid::new_v4()));
    let uploads = UploadStore::new(&dir);
    uploads.ensure_dir().await.expect("Failed to create dir");

    server::build_router(AppState::new(db, uploads))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

// Build a multipart/form-data body by hand: text fields plus an
// optional (field_name, file_name, contents) file part.
fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str)>,
) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    if let Some((name, filename, contents)) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup(app: &Router, email: &str, username: &str, password: &str) -> StatusCode {
    let req = json_request(
        "POST",
        "/add",
        serde_json::json!({ "email": email, "username": username, "password": password }),
    );
    app.clone().oneshot(req).await.unwrap().status()
}

#[tokio::test]
async fn test_signup_rejects_duplicates() {
    let app = setup_test_app().await;

    assert_eq!(
        signup(&app, "ada@example.com", "ada", "pw1").await,
        StatusCode::CREATED
    );

    // Same email, different username
    assert_eq!(
        signup(&app, "ada@example.com", "ada2", "pw2").await,
        StatusCode::CONFLICT
    );
    // Same username, different email
    assert_eq!(
        signup(&app, "other@example.com", "ada", "pw3").await,
        StatusCode::CONFLICT
    );

    // The rejected attempts must not have mutated the collection
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/usercount")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await["count"], 1);
}

#[tokio::test]
async fn test_login_checks_credentials() {
    let app = setup_test_app().await;
    signup(&app, "bob@example.com", "bob", "correct-horse").await;

    let ok = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/view",
            serde_json::json!({ "username": "bob", "password": "correct-horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/view",
            serde_json::json!({ "username": "bob", "password": "battery-staple" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_user = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/view",
            serde_json::json!({ "username": "nobody", "password": "correct-horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_enriched_with_book_url() {
    let app = setup_test_app().await;

    // Catalog entry for the isbn the review will reference
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/addbook",
            &[
                ("title", "Dune"),
                ("price", "10"),
                ("url", "http://example.com/b"),
                ("isbn13", "9780441172719"),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/reviews",
            &[
                ("username", "ada"),
                ("isbn13", "9780441172719"),
                ("bookTitle", "Dune"),
                ("reviewText", "A classic."),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let review = body_json(res).await;
    let id = review["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/review/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["url"], "http://example.com/b");

    // A review whose isbn has no catalog entry gets an empty url
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/reviews",
            &[("username", "ada"), ("isbn13", "0000000000000")],
            None,
        ))
        .await
        .unwrap();
    let orphan_id = body_json(res).await["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/review/{orphan_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(res).await["url"], "");
}

#[tokio::test]
async fn test_get_missing_review_returns_404() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/review/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_review_idempotency() {
    let app = setup_test_app().await;

    // Deleting a review that never existed still returns 200
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/review/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["message"], "Review deleted");
}

#[tokio::test]
async fn test_update_without_file_preserves_audio() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/reviews",
            &[("username", "ada"), ("reviewText", "first draft")],
            Some(("audio", "note.mp3", "fake audio bytes")),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let review = body_json(res).await;
    let id = review["id"].as_i64().unwrap();
    let audio = review["audio"].as_str().unwrap().to_owned();
    assert!(audio.ends_with(".mp3"));

    // Update with text fields only; the stored audio must survive
    let res = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/review/{id}"),
            &[("reviewText", "second draft")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = &body_json(res).await["updatedReview"];
    assert_eq!(updated["reviewText"], "second draft");
    assert_eq!(updated["audio"], audio.as_str());
    // Untouched fields survive too
    assert_eq!(updated["username"], "ada");
}

#[tokio::test]
async fn test_update_missing_review_returns_404() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            "/review/999",
            &[("reviewText", "ghost")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_audio_endpoint() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/reviews",
            &[("username", "ada")],
            None,
        ))
        .await
        .unwrap();
    let id = body_json(res).await["id"].as_i64().unwrap();

    // No file part -> 400
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            &format!("/upload-audio/{id}"),
            &[],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Missing review -> 404
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/upload-audio/999",
            &[],
            Some(("audio", "voice.ogg", "bytes")),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // File on an existing review -> 200 with the updated record
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            &format!("/upload-audio/{id}"),
            &[],
            Some(("audio", "voice.ogg", "bytes")),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["message"], "Audio uploaded successfully");
    assert!(body["review"]["audio"].as_str().unwrap().ends_with(".ogg"));
}

#[tokio::test]
async fn test_book_create_and_fetch() {
    let app = setup_test_app().await;

    // Missing required `url` -> 400
    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/addbook",
            &[("title", "X"), ("price", "10")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["message"], "Required fields missing");

    let res = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/addbook",
            &[
                ("title", "X"),
                ("price", "10"),
                ("url", "http://x"),
                ("isbn13", "9999999999999"),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/books/9999999999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let book = body_json(res).await;
    assert_eq!(book["title"], "X");
    assert_eq!(book["url"], "http://x");

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/books/0000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_skips_first_inserted() {
    let app = setup_test_app().await;

    signup(&app, "first@example.com", "first", "pw").await;
    signup(&app, "second@example.com", "second", "pw").await;
    signup(&app, "third@example.com", "third", "pw").await;

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let users = body_json(res).await;
    let usernames: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["second", "third"]);
    // The password hash never leaves the server
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_delete_user_idempotency() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/user/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["message"], "User deleted");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = setup_test_app().await;

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
