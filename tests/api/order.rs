use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use order_on_go::schema::{cart_lines, orders};
use serde_json::Value;

use crate::helpers::{TestApp, TestUser};

struct Shop{
    admin: TestUser,
    owner: TestUser,
    customer: TestUser
}

// Restaurant with two items and a customer holding both in the cart
async fn shop_with_filled_cart(app: &TestApp) -> Shop{
    let admin = app.register("admin").await;
    let (owner, _) = app.approved_restaurant(&admin).await;

    app.add_product(&owner, "Masala Dosa", "Breakfast", None).await;
    app.add_product(&owner, "Filter Coffee", "Drinks", None).await;
    let dosa = app.item_by_name("Masala Dosa").await;
    let coffee = app.item_by_name("Filter Coffee").await;

    let customer = app.register("customer").await;
    assert_eq!(app.add_to_cart(&customer, &dosa, 2).await.status().as_u16(), 200);
    assert_eq!(app.add_to_cart(&customer, &coffee, 1).await.status().as_u16(), 200);

    Shop{ admin, owner, customer }
}

#[actix_web::test]
async fn placing_order_converts_every_cart_line(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;

    let response = app.post("/place-cart-order", &TestApp::contact(&shop.customer), Some(&shop.customer.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Order placed");
    assert_eq!(body["orderIds"].as_array().unwrap().len(), 2);

    let placed: Vec<Value> = app.get("/fetch-orders", Some(&shop.customer.token)).await.json().await.unwrap();
    assert_eq!(placed.len(), 2);
    assert!(placed.iter().all(|order| order["orderStatus"] == "placed"));
    assert!(placed.iter().all(|order| order["pincode"] == "560001"));

    let dosa = placed.iter().find(|order| order["foodItemName"] == "Masala Dosa").unwrap();
    assert_eq!(dosa["quantity"], 2);
    assert_eq!(dosa["price"], 10.0);

    let cart: Vec<Value> = app.get("/fetch-cart", Some(&shop.customer.token)).await.json().await.unwrap();
    assert!(cart.is_empty());

    let mut conn = app.pool.get().unwrap();
    let remaining: i64 = cart_lines::table
        .filter(cart_lines::user_id.eq(shop.customer.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(remaining, 0);
}

#[actix_web::test]
async fn second_checkout_creates_no_duplicates(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;
    let contact = TestApp::contact(&shop.customer);

    let (first, second) = futures_util::future::join(
        app.post("/place-cart-order", &contact, Some(&shop.customer.token)),
        app.post("/place-cart-order", &contact, Some(&shop.customer.token))
    ).await;
    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();
    let created: i64 = orders::table
        .filter(orders::user_id.eq(shop.customer.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(created, 2);
}

#[actix_web::test]
async fn empty_cart_places_nothing(){
    let app = TestApp::spawn_app().await;
    let customer = app.register("customer").await;

    let response = app.post("/place-cart-order", &TestApp::contact(&customer), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["orderIds"], serde_json::json!([]));
}

#[actix_web::test]
async fn invalid_contact_is_rejected_and_cart_kept(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;

    let mut contact = TestApp::contact(&shop.customer);
    contact["pincode"] = serde_json::json!("12345");

    let response = app.post("/place-cart-order", &contact, Some(&shop.customer.token)).await;
    assert_eq!(response.status().as_u16(), 400);

    let cart: Vec<Value> = app.get("/fetch-cart", Some(&shop.customer.token)).await.json().await.unwrap();
    assert_eq!(cart.len(), 2);

    // Ordering for another user
    let response = app.post("/place-cart-order", &TestApp::contact(&shop.customer), Some(&shop.owner.token)).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn cancelled_order_can_still_be_delivered(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;

    let body: Value = app.post("/place-cart-order", &TestApp::contact(&shop.customer), Some(&shop.customer.token))
        .await
        .json()
        .await
        .unwrap();
    let order_id = body["orderIds"][0].clone();

    let response = app.put("/cancel-order", &serde_json::json!({ "id": order_id }), Some(&shop.customer.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "order cancelled");

    let response = app.put("/update-order-status", &serde_json::json!({ "id": order_id, "updateStatus": "delivered" }), Some(&shop.owner.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let placed: Vec<Value> = app.get("/fetch-orders", Some(&shop.customer.token)).await.json().await.unwrap();
    let order = placed.iter().find(|order| order["id"] == order_id).unwrap();
    assert_eq!(order["orderStatus"], "delivered");
}

#[actix_web::test]
async fn order_visibility_and_status_guards(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;
    let stranger = app.register("customer").await;
    let (other_owner, _) = app.approved_restaurant(&shop.admin).await;

    let body: Value = app.post("/place-cart-order", &TestApp::contact(&shop.customer), Some(&shop.customer.token))
        .await
        .json()
        .await
        .unwrap();
    let order_id = body["orderIds"][0].clone();

    let owner_orders: Vec<Value> = app.get("/fetch-orders", Some(&shop.owner.token)).await.json().await.unwrap();
    assert_eq!(owner_orders.len(), 2);
    let admin_orders: Vec<Value> = app.get("/fetch-orders", Some(&shop.admin.token)).await.json().await.unwrap();
    assert_eq!(admin_orders.len(), 2);
    let other_orders: Vec<Value> = app.get("/fetch-orders", Some(&other_owner.token)).await.json().await.unwrap();
    assert!(other_orders.is_empty());
    let stranger_orders: Vec<Value> = app.get("/fetch-orders", Some(&stranger.token)).await.json().await.unwrap();
    assert!(stranger_orders.is_empty());

    let status = serde_json::json!({ "id": order_id, "updateStatus": "preparing" });
    assert_eq!(app.put("/update-order-status", &status, Some(&shop.customer.token)).await.status().as_u16(), 403);
    assert_eq!(app.put("/update-order-status", &status, Some(&other_owner.token)).await.status().as_u16(), 404);
    assert_eq!(app.put("/cancel-order", &serde_json::json!({ "id": order_id }), Some(&stranger.token)).await.status().as_u16(), 404);

    let unknown = serde_json::json!({ "id": order_id, "updateStatus": "teleported" });
    assert_eq!(app.put("/update-order-status", &unknown, Some(&shop.admin.token)).await.status().as_u16(), 400);

    let missing = serde_json::json!({ "id": uuid::Uuid::new_v4(), "updateStatus": "preparing" });
    assert_eq!(app.put("/update-order-status", &missing, Some(&shop.admin.token)).await.status().as_u16(), 404);

    assert_eq!(app.put("/update-order-status", &status, Some(&shop.admin.token)).await.status().as_u16(), 200);
}

#[actix_web::test]
async fn rejected_owner_cannot_update_order_status(){
    let app = TestApp::spawn_app().await;
    let shop = shop_with_filled_cart(&app).await;

    let body: Value = app.post("/place-cart-order", &TestApp::contact(&shop.customer), Some(&shop.customer.token))
        .await
        .json()
        .await
        .unwrap();
    let order_id = body["orderIds"][0].clone();

    let response = app.post("/reject-user", &serde_json::json!({ "id": shop.owner.id }), Some(&shop.admin.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let status = serde_json::json!({ "id": order_id, "updateStatus": "preparing" });
    let response = app.put("/update-order-status", &status, Some(&shop.owner.token)).await;
    assert_eq!(response.status().as_u16(), 403);

    let placed: Vec<Value> = app.get("/fetch-orders", Some(&shop.customer.token)).await.json().await.unwrap();
    let order = placed.iter().find(|order| order["id"] == order_id).unwrap();
    assert_eq!(order["orderStatus"], "placed");
}
