use serde_json::Value;

use crate::helpers::{TestApp, PASSWORD};

#[actix_web::test]
async fn customer_registration_returns_approved_user_and_token(){
    let app = TestApp::spawn_app().await;

    let response = app.post("/register", &serde_json::json!({
        "username": "Asha Rao",
        "email": "asha@example.com",
        "usertype": "customer",
        "password": PASSWORD
    }), None).await;

    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["usertype"], "customer");
    assert_eq!(body["approval"], "approved");
    assert!(body["token"].as_str().is_some());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn first_admin_registers_approved_and_later_admins_need_an_admin(){
    let app = TestApp::spawn_app().await;

    let response = app.post("/register", &serde_json::json!({
        "username": "Root Admin",
        "email": "root@example.com",
        "usertype": "admin",
        "password": PASSWORD
    }), None).await;
    assert_eq!(response.status().as_u16(), 201);

    let admin: Value = response.json().await.unwrap();
    assert_eq!(admin["usertype"], "admin");
    assert_eq!(admin["approval"], "approved");

    let second = serde_json::json!({
        "username": "Second Admin",
        "email": "second@example.com",
        "usertype": "admin",
        "password": PASSWORD
    });

    let response = app.post("/register", &second, None).await;
    assert_eq!(response.status().as_u16(), 403);

    let customer = app.register("customer").await;
    let response = app.post("/register", &second, Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.post("/register", &second, Some(admin["token"].as_str().unwrap())).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["approval"], "approved");
}

#[actix_web::test]
async fn restaurant_registration_is_pending_with_empty_menu(){
    let app = TestApp::spawn_app().await;

    let owner = app.register("restaurant").await;

    let user: Value = app.get(&format!("/fetch-user-details/{}", owner.id), Some(&owner.token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(user["approval"], "pending");

    let response = app.get(&format!("/fetch-restaurant-details/{}", owner.id), None).await;
    assert_eq!(response.status().as_u16(), 200);

    let restaurant: Value = response.json().await.unwrap();
    assert_eq!(restaurant["ownerId"], owner.id.to_string());
    assert_eq!(restaurant["address"], "12 MG Road, Bengaluru");
    assert_eq!(restaurant["menu"], serde_json::json!([]));
}

#[actix_web::test]
async fn duplicate_email_is_rejected_and_first_user_survives(){
    let app = TestApp::spawn_app().await;

    let first = app.register("customer").await;

    let response = app.post("/register", &serde_json::json!({
        "username": "Someone Else",
        "email": first.email,
        "usertype": "admin",
        "password": "Other9$pw"
    }), None).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User already exists");

    let login: Value = app.login(&first.email, PASSWORD).await.json().await.unwrap();
    assert_eq!(login["id"], first.id.to_string());
    assert_eq!(login["usertype"], "customer");
}

#[actix_web::test]
async fn invalid_registration_data_is_rejected(){
    let app = TestApp::spawn_app().await;

    let cases = vec![
        (serde_json::json!({ "username": "A", "email": "not-an-email", "usertype": "customer", "password": PASSWORD }), "bad email"),
        (serde_json::json!({ "username": "A", "email": "a@example.com", "usertype": "customer", "password": "weak" }), "weak password"),
        (serde_json::json!({ "username": "A", "email": "a@example.com", "usertype": "driver", "password": PASSWORD }), "unknown usertype"),
        (serde_json::json!({ "username": "  ", "email": "a@example.com", "usertype": "customer", "password": PASSWORD }), "blank username"),
        (serde_json::json!({ "email": "a@example.com", "usertype": "customer", "password": PASSWORD }), "missing username")
    ];

    for (body, description) in cases {
        let response = app.post("/register", &body, None).await;

        assert_eq!(response.status().as_u16(), 400, "Expected 400 for {}", description);
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string(), "Expected a message for {}", description);
    }
}

#[actix_web::test]
async fn admin_can_reject_and_list_users(){
    let app = TestApp::spawn_app().await;

    let admin = app.register("admin").await;
    let owner = app.register("restaurant").await;

    let response = app.post("/reject-user", &serde_json::json!({ "id": owner.id }), Some(&admin.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let users: Vec<Value> = app.get("/fetch-users", Some(&admin.token)).await.json().await.unwrap();
    assert_eq!(users.len(), 2);

    let rejected = users.iter().find(|u| u["id"] == owner.id.to_string()).unwrap();
    assert_eq!(rejected["approval"], "rejected");
}

#[actix_web::test]
async fn approval_routes_require_admin_and_known_user(){
    let app = TestApp::spawn_app().await;

    let customer = app.register("customer").await;
    let admin = app.register("admin").await;

    let response = app.post("/approve-user", &serde_json::json!({ "id": customer.id }), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.post("/approve-user", &serde_json::json!({ "id": customer.id }), None).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post("/approve-user", &serde_json::json!({ "id": uuid::Uuid::new_v4() }), Some(&admin.token)).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get("/fetch-users", Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.get(&format!("/fetch-user-details/{}", admin.id), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 403);
}
