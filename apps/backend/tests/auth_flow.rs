mod common;

use actix_web::{test, web, App};
use backend::entities::{game_progress, users};
use backend::{build_state, routes, verify_session_token, GoogleConfig, PermissiveCors};
use common::{test_security, TEST_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::EntityTrait;
use serde_json::json;

fn google_config(server_url: &str) -> GoogleConfig {
    let mut config = GoogleConfig::new(
        "client-123".to_string(),
        "https://api.example.com/auth?action=callback".to_string(),
    );
    config.token_url = format!("{server_url}/token");
    config
}

/// A provider id_token as returned by the token endpoint. The backend decodes
/// it without checking the signature, so any signing key works here.
fn fake_id_token(sub: &str, email: &str, name: &str) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": sub, "email": email, "name": name, "exp": 4_102_444_800_i64 }),
        &EncodingKey::from_secret(b"providers-own-key"),
    )
    .unwrap()
}

#[actix_web::test]
async fn test_callback_creates_user_and_progress_then_reuses_them() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("POST", "/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "ya29.test",
                "id_token": fake_id_token("google-sub-1", "player@example.com", "Player One")
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let state = build_state()
        .with_database_url("sqlite::memory:")
        .with_security(test_security())
        .with_google(google_config(&server.url()))
        .build()
        .await
        .unwrap();
    let db = state.db.clone().unwrap();

    let app = test::init_service(
        App::new()
            .wrap(PermissiveCors)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    // First login: creates user + progress row, returns the popup HTML
    let req = test::TestRequest::get()
        .uri("/auth?action=callback&code=test-code")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("GOOGLE_AUTH_SUCCESS"));
    first.assert_async().await;

    // The minted token in the HTML verifies against our session secret
    let token = body
        .split("token: '")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .expect("popup HTML should embed the session token");
    let claims =
        verify_session_token(token, &backend::SecurityConfig::new(TEST_SECRET)).unwrap();
    assert_eq!(claims.google_id, "google-sub-1");
    assert_eq!(claims.email, "player@example.com");

    // Exactly one user row and one default progress row
    let all_users = users::Entity::find().all(&db).await.unwrap();
    assert_eq!(all_users.len(), 1);
    let user = &all_users[0];
    assert_eq!(user.google_id, "google-sub-1");
    assert_eq!(user.email, "player@example.com");
    assert_eq!(user.name, "Player One");
    assert_eq!(claims.user_id, user.id);
    let first_login = user.last_login;

    let rows = game_progress::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.user_id, user.id);
    assert_eq!(row.points, 0.0);
    assert_eq!(row.total_clicks, 0);
    assert_eq!(row.level, 1);
    assert_eq!(row.points_per_click, 1.0);
    assert_eq!(row.points_per_second, 0.0);
    assert_eq!(row.upgrades, json!([]));
    assert_eq!(row.achievements, json!([]));
    assert_eq!(row.selected_skin, "Sparkles");
    assert_eq!(row.owned_skins, json!(["Sparkles"]));

    // Second login with the same subject: no duplicates, fields refreshed
    let _second = server
        .mock("POST", "/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "ya29.test2",
                "id_token": fake_id_token("google-sub-1", "renamed@example.com", "Renamed")
            })
            .to_string(),
        )
        .create_async()
        .await;

    let req = test::TestRequest::get()
        .uri("/auth?action=callback&code=second-code")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let all_users = users::Entity::find().all(&db).await.unwrap();
    assert_eq!(all_users.len(), 1, "repeat login must not duplicate the user");
    let user = &all_users[0];
    assert_eq!(user.email, "renamed@example.com");
    assert_eq!(user.name, "Renamed");
    assert!(user.last_login >= first_login);

    let rows = game_progress::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1, "repeat login must not duplicate progress");
}

#[actix_web::test]
async fn test_callback_without_code_closes_popup() {
    let state = build_state()
        .with_database_url("sqlite::memory:")
        .with_security(test_security())
        .build()
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .wrap(PermissiveCors)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth?action=callback")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("window.close()"));
    assert!(!body.contains("GOOGLE_AUTH_SUCCESS"));
}

#[actix_web::test]
async fn test_callback_exchange_failure_renders_error_html() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(500)
        .with_body("upstream broken")
        .create_async()
        .await;

    let state = build_state()
        .with_database_url("sqlite::memory:")
        .with_security(test_security())
        .with_google(google_config(&server.url()))
        .build()
        .await
        .unwrap();
    let db = state.db.clone().unwrap();

    let app = test::init_service(
        App::new()
            .wrap(PermissiveCors)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth?action=callback&code=doomed")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Error:"));
    assert!(body.contains("window.close()"));

    // Nothing was persisted
    assert!(users::Entity::find().all(&db).await.unwrap().is_empty());
}
