use rocket::http::{ContentType, Status};
use rocket::routes;
use serde_json::Value;
use userforge_api::auth::routes::login;
use userforge_api::test_support::{
    TestDatabase, TestFixtures, TestRocketBuilder, test_auth_state,
};

async fn login_client(db: &TestDatabase) -> rocket::local::asynchronous::Client {
    TestRocketBuilder::new()
        .manage_pg_pool(db.pool_clone())
        .manage_auth_state(test_auth_state())
        .mount_api_routes(routes![login])
        .async_client()
        .await
}

#[tokio::test]
async fn login_by_username_and_by_email_issue_valid_tokens() {
    let db = TestDatabase::new().await.expect("test database");
    let auth_state = test_auth_state();
    let hash = auth_state
        .password_service
        .hash_password("p1")
        .expect("hash");
    TestFixtures::new(db.pool())
        .insert_user("alice", "a@x.com", "user", &hash)
        .await
        .expect("seed user");

    let client = login_client(&db).await;

    for login_id in ["alice", "a@x.com"] {
        let response = client
            .post("/api/auth")
            .header(ContentType::JSON)
            .body(format!(r#"{{"loginId":"{login_id}","password":"p1"}}"#))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.expect("json body");
        let token = body["accessToken"].as_str().expect("accessToken present");

        // The token is always keyed on the email, even for username login.
        assert!(auth_state.jwt_service.validate(token, "a@x.com"));
        assert_eq!(
            auth_state.jwt_service.extract_role(token).expect("role"),
            "user"
        );
    }
}

#[tokio::test]
async fn login_accepts_legacy_username_field() {
    let db = TestDatabase::new().await.expect("test database");
    let auth_state = test_auth_state();
    let hash = auth_state
        .password_service
        .hash_password("p1")
        .expect("hash");
    TestFixtures::new(db.pool())
        .insert_user("alice", "a@x.com", "user", &hash)
        .await
        .expect("seed user");

    let client = login_client(&db).await;

    let response = client
        .post("/api/auth")
        .header(ContentType::JSON)
        .body(r#"{"username":"alice","password":"p1"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}

#[tokio::test]
async fn rejections_are_indistinguishable() {
    let db = TestDatabase::new().await.expect("test database");
    let auth_state = test_auth_state();
    let hash = auth_state
        .password_service
        .hash_password("p1")
        .expect("hash");
    TestFixtures::new(db.pool())
        .insert_user("alice", "a@x.com", "user", &hash)
        .await
        .expect("seed user");

    let client = login_client(&db).await;

    // Wrong password for an existing user.
    let wrong_password = client
        .post("/api/auth")
        .header(ContentType::JSON)
        .body(r#"{"loginId":"alice","password":"nope"}"#)
        .dispatch()
        .await;
    let wrong_password_status = wrong_password.status();
    let wrong_password_body = wrong_password.into_string().await.expect("body");

    // Login id matching neither username nor email.
    let unknown_user = client
        .post("/api/auth")
        .header(ContentType::JSON)
        .body(r#"{"loginId":"nobody","password":"nope"}"#)
        .dispatch()
        .await;
    let unknown_user_status = unknown_user.status();
    let unknown_user_body = unknown_user.into_string().await.expect("body");

    assert_eq!(wrong_password_status, Status::Unauthorized);
    assert_eq!(unknown_user_status, Status::Unauthorized);
    assert_eq!(wrong_password_body, unknown_user_body);

    let body: Value = serde_json::from_str(&unknown_user_body).expect("json body");
    assert_eq!(body["error"], "Authentication failed");
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn empty_credentials_are_a_bad_request() {
    let db = TestDatabase::new().await.expect("test database");
    let client = login_client(&db).await;

    let response = client
        .post("/api/auth")
        .header(ContentType::JSON)
        .body(r#"{"loginId":"","password":""}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}
