use std::time::Duration;

use super::*;
use axum::{body, body::Body, http::Request, response::Response};
use serde_json::{json, Value};
use server_api::SiteConfig;
use tower::ServiceExt;

fn test_app() -> (Router, Arc<AppState>) {
    let api = ApiContext::new(EntityStore::seeded(), SiteConfig::instant());
    let state = Arc::new(AppState::new(api));
    (build_router(state.clone()), state)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn post_json(uri: &str, value: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request")
}

async fn json_body(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    (status, json_body(response).await)
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/healthz")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn public_pages_render_with_the_site_shell() {
    let (app, _) = test_app();

    let (status, home) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["shell"]["nav"][0]["path"], "/");

    let (status, portfolio) = send(&app, get("/portfolio?category=Bridal")).await;
    assert_eq!(status, StatusCode::OK);
    let items = portfolio["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["category"] == "Bridal"));

    let (status, _) = send(&app, get("/courses")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/policies")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_fall_back_to_not_found_page() {
    let (app, _) = test_app();
    let (status, page) = send(&app, get("/no/such/page")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(page["path"], "/no/such/page");
    assert_eq!(page["home"], "/");
}

#[tokio::test]
async fn webinar_registration_is_tracked_per_visitor() {
    let (app, _) = test_app();

    let request = Request::post("/webinars/1/register")
        .header(VISITOR_HEADER, "visitor-a")
        .body(Body::empty())
        .expect("request");
    let (status, page) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["my_webinars"].as_array().map(Vec::len), Some(1));

    let (_, anonymous) = send(&app, get("/webinars")).await;
    assert_eq!(anonymous["my_webinars"].as_array().map(Vec::len), Some(0));

    let (status, error) = send(&app, post_empty("/webinars/99/register")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["redirect"], "/webinars");
}

#[tokio::test]
async fn login_redirects_to_requested_admin_page() {
    let (app, _) = test_app();

    let (status, outcome) = send(
        &app,
        post_json(
            "/login?redirect=/admin/trainers",
            json!({ "email": "admin@prassanna.com", "password": "secret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["redirect"], "/admin/trainers");

    let (status, error) = send(&app, post_json("/login", json!({ "email": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["message"], "Please fill in all fields");
}

#[tokio::test]
async fn admin_webinar_crud_flow() {
    let (app, state) = test_app();

    let (status, outcome) = send(
        &app,
        post_json(
            "/admin/webinars",
            json!({
                "title": "Draping Basics",
                "description": "Saree draping for beginners.",
                "trainer": "Anitha Reddy",
                "date": "2026-03-10",
                "time": "11:00",
                "duration": "1 Hour",
                "platform": "Zoom",
                "link": "https://zoom.us/j/111222333",
                "status": "Upcoming",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["redirect"], "/admin/webinars");
    let created = state
        .api
        .store
        .list_webinars()
        .into_iter()
        .find(|webinar| webinar.title == "Draping Basics")
        .expect("created webinar");

    let (status, error) = send(&app, post_json("/admin/webinars", json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["fields"]["title"].is_string());

    let (status, form) = send(&app, get(&format!("/admin/webinars/edit/{}", created.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["values"]["title"], "Draping Basics");

    let (status, error) = send(&app, get("/admin/webinars/edit/424242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["redirect"], "/admin/webinars");

    let delete_uri = format!("/admin/webinars/{}", created.id);
    let request = Request::delete(delete_uri.as_str())
        .body(Body::empty())
        .expect("request");
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "confirmation_required");
    assert!(state.api.store.get_webinar(created.id).is_some());

    let request = Request::delete(format!("{delete_uri}?confirm=true"))
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.api.store.get_webinar(created.id).is_none());
}

#[tokio::test]
async fn draft_webinar_cannot_go_live() {
    let (app, _) = test_app();
    let (status, error) = send(&app, post_empty("/admin/live-sessions/2/go-live")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");

    let (status, _) = send(&app, post_empty("/admin/live-sessions/1/go-live")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, post_empty("/admin/live-sessions/1/complete")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn registration_modal_runs_through_submission() {
    let (app, state) = test_app();

    let (status, view) = send(
        &app,
        post_json("/modals/registration", json!({ "featured_webinar_id": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "editing");
    assert_eq!(view["context"]["is_paid"], true);
    let id = view["id"].as_str().expect("modal id").to_string();

    let (status, error) = send(&app, post_empty(&format!("/modals/{id}/submit"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["fields"]["name"].is_string());

    for (field, value) in [
        ("name", "Meera"),
        ("email", "meera@example.com"),
        ("phone", "9876543210"),
    ] {
        let (status, _) = send(
            &app,
            post_json(
                &format!("/modals/{id}/fields"),
                json!({ "field": field, "value": value }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, submitted) = send(&app, post_empty(&format!("/modals/{id}/submit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["outcome"], "submitting");
    assert_eq!(submitted["modal"]["phase"], "submitting");

    tokio::time::sleep(Duration::from_millis(1600)).await;
    let (_, view) = send(&app, get(&format!("/modals/{id}"))).await;
    assert_eq!(view["phase"], "success");

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let (_, view) = send(&app, get(&format!("/modals/{id}"))).await;
    assert_eq!(view["phase"], "closed");
    assert_eq!(view["values"]["name"], "");

    let (status, _) = send(
        &app,
        post_json("/modals/registration", json!({ "course_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.modals.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn payment_modal_cannot_close_while_processing() {
    let (app, _) = test_app();

    let (status, view) = send(
        &app,
        post_json(
            "/modals/payment",
            json!({ "course_name": "Boutique Management", "price": 15000 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = view["id"].as_str().expect("modal id").to_string();

    for (field, value) in [
        ("name", "Meera"),
        ("email", "meera@example.com"),
        ("phone", "9876543210"),
    ] {
        send(
            &app,
            post_json(
                &format!("/modals/{id}/fields"),
                json!({ "field": field, "value": value }),
            ),
        )
        .await;
    }
    let (_, submitted) = send(&app, post_empty(&format!("/modals/{id}/submit"))).await;
    assert_eq!(submitted["outcome"], "advanced_to_payment");
    assert_eq!(submitted["modal"]["step"], "payment");

    for (field, value) in [
        ("card_number", "4111111111111111"),
        ("expiry", "1228"),
        ("cvv", "123"),
    ] {
        send(
            &app,
            post_json(
                &format!("/modals/{id}/fields"),
                json!({ "field": field, "value": value }),
            ),
        )
        .await;
    }
    let (_, view) = send(&app, get(&format!("/modals/{id}"))).await;
    assert_eq!(view["values"]["card_number"], "4111 1111 1111 1111");
    assert_eq!(view["values"]["expiry"], "12/28");

    let (_, submitted) = send(&app, post_empty(&format!("/modals/{id}/submit"))).await;
    assert_eq!(submitted["outcome"], "submitting");

    let request = Request::delete(format!("/modals/{id}"))
        .body(Body::empty())
        .expect("request");
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");
}

#[tokio::test]
async fn closing_an_idle_modal_forgets_it() {
    let (app, state) = test_app();
    let (_, view) = send(
        &app,
        post_json("/modals/registration", json!({ "offering": "workshop" })),
    )
    .await;
    let id = view["id"].as_str().expect("modal id").to_string();

    let request = Request::delete(format!("/modals/{id}"))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.modals.len(), 0);

    let (status, _) = send(&app, get(&format!("/modals/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn abandoned_modals_do_not_accumulate() {
    let (app, state) = test_app();
    for _ in 0..200 {
        let (status, _) = send(
            &app,
            post_json("/modals/registration", json!({ "course_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(state.modals.len(), 200);

    tokio::time::sleep(modals::MODAL_IDLE_TIMEOUT + Duration::from_secs(1)).await;
    send(
        &app,
        post_json("/modals/registration", json!({ "course_id": 1 })),
    )
    .await;
    assert_eq!(state.modals.len(), 1);
}

#[test]
fn visitor_defaults_to_anonymous() {
    let mut headers = HeaderMap::new();
    assert_eq!(visitor(&headers), ANONYMOUS_VISITOR);
    headers.insert(VISITOR_HEADER, "  ".parse().expect("header"));
    assert_eq!(visitor(&headers), ANONYMOUS_VISITOR);
    headers.insert(VISITOR_HEADER, "v-1".parse().expect("header"));
    assert_eq!(visitor(&headers), "v-1");
}
