//! End-to-end checks over a real database. Each test gets its own
//! database from the test harness; the schema is synchronized in-test
//! exactly as the server does at startup.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{create_test_classroom, create_test_user};
use nido::config::cors::CorsConfig;
use nido::config::jwt::JwtConfig;
use nido::config::uploads::{MAX_UPLOAD_BYTES, UploadConfig};
use nido::modules::users::model::UserRole;
use nido::router::init_router;
use nido::state::AppState;
use nido::utils::storage::PhotoStorage;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    let upload_config = UploadConfig {
        base_dir: std::env::temp_dir().join("nido-api-test-uploads"),
        public_prefix: "/uploads/profile-photos".to_string(),
        max_bytes: MAX_UPLOAD_BYTES,
    };
    let photo_storage = PhotoStorage::new(&upload_config);

    let state = AppState {
        db: pool,
        jwt_config: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 3600,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        upload_config,
        photo_storage,
    };
    init_router(state)
}

async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = false)]
async fn newsletter_update_by_non_author_reads_as_not_found(pool: PgPool) {
    nido::db::sync_schema(&pool).await.unwrap();

    let author = create_test_user(
        &pool,
        "author",
        "author@example.com",
        "testpass123",
        UserRole::Teacher,
    )
    .await;
    let other = create_test_user(
        &pool,
        "other",
        "other@example.com",
        "testpass123",
        UserRole::Teacher,
    )
    .await;

    let app = setup_test_app(pool.clone()).await;
    let author_token = get_auth_token(app.clone(), &author.email, &author.password).await;
    let other_token = get_auth_token(app.clone(), &other.email, &other.password).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/newsletters",
            &author_token,
            json!({ "title": "March news", "content": "Hello families" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let newsletter = json_body(response).await;
    let id = newsletter["id"].as_i64().unwrap();

    // A non-author sees the same answer as for a row that does not exist.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/newsletters/{id}"),
            &other_token,
            json!({ "title": "Hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The author can still update their own row.
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/newsletters/{id}"),
            &author_token,
            json!({ "title": "March news, revised" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["title"], "March news, revised");
    assert_eq!(updated["author_id"].as_i64().unwrap(), author.id as i64);
}

#[sqlx::test(migrations = false)]
async fn deleting_the_last_admin_is_rejected(pool: PgPool) {
    nido::db::sync_schema(&pool).await.unwrap();

    let first = create_test_user(
        &pool,
        "admin1",
        "admin1@example.com",
        "testpass123",
        UserRole::Admin,
    )
    .await;

    let app = setup_test_app(pool.clone()).await;
    let first_token = get_auth_token(app.clone(), &first.email, &first.password).await;

    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/users/{}", first.id),
            &first_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("last admin"));

    // With a second admin in place the same delete goes through.
    let second = create_test_user(
        &pool,
        "admin2",
        "admin2@example.com",
        "testpass123",
        UserRole::Admin,
    )
    .await;
    let second_token = get_auth_token(app.clone(), &second.email, &second.password).await;

    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/users/{}", first.id),
            &second_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/api/users/{}", first.id),
            &second_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn student_create_then_get_round_trip(pool: PgPool) {
    nido::db::sync_schema(&pool).await.unwrap();

    let admin = create_test_user(
        &pool,
        "admin",
        "admin@example.com",
        "testpass123",
        UserRole::Admin,
    )
    .await;
    let classroom_id = create_test_classroom(&pool, "Sunflowers").await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &admin.email, &admin.password).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/students",
            &token,
            json!({
                "first_name": "Lucia",
                "last_name": "Perez",
                "date_of_birth": "2022-03-14",
                "gender": "female",
                "allergies": "peanuts",
                "classroom_id": classroom_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let id = created["id"].as_i64().unwrap();
    // Enrollment date defaults to today when omitted.
    assert!(created["enrollment_date"].is_string());

    let response = app
        .oneshot(bare_request("GET", &format!("/api/students/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["first_name"], "Lucia");
    assert_eq!(fetched["last_name"], "Perez");
    assert_eq!(fetched["date_of_birth"], "2022-03-14");
    assert_eq!(fetched["gender"], "female");
    assert_eq!(fetched["allergies"], "peanuts");
    assert_eq!(fetched["classroom_id"].as_i64().unwrap(), classroom_id as i64);
}

fn multipart_photo_request(uri: &str, token: &str, file_bytes: &[u8]) -> Request<Body> {
    let boundary = "nido-test-boundary";
    let mut body = Vec::with_capacity(file_bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             content-disposition: form-data; name=\"photo\"; filename=\"photo.png\"\r\n\
             content-type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

#[sqlx::test(migrations = false)]
async fn photo_upload_distinguishes_oversized_from_malformed(pool: PgPool) {
    nido::db::sync_schema(&pool).await.unwrap();

    let admin = create_test_user(
        &pool,
        "admin",
        "admin@example.com",
        "testpass123",
        UserRole::Admin,
    )
    .await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &admin.email, &admin.password).await;
    let uri = format!("/api/users/{}/photo", admin.id);

    // Past the body limit the read fails mid-stream; this must stay a 413.
    let oversized = vec![0u8; MAX_UPLOAD_BYTES + 2 * 1024 * 1024];
    let response = app
        .clone()
        .oneshot(multipart_photo_request(&uri, &token, &oversized))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // A body that is not valid multipart is a bad request, never a 413.
    let request = Request::builder()
        .method("POST")
        .uri(uri.as_str())
        .header("content-type", "multipart/form-data; boundary=broken")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("this is not a multipart payload"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A small valid upload still lands.
    let response = app
        .oneshot(multipart_photo_request(&uri, &token, b"tiny png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(
        body["photo_url"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/profile-photos/")
    );
}
