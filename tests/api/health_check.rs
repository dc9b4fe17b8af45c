use crate::helpers::TestApp;

#[actix_web::test]
async fn check_health_route(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status().as_u16(), 200)
}
