//! End-to-end tests driving every echo endpoint behind the trace middleware.

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use param_echo::Trace;
use param_echo::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use param_echo::inbound::http::configure;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Reply {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn send(req: TestRequest) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(web::PayloadConfig::new(1024))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body_json(res).await;
    Reply {
        status,
        trace_id,
        body,
    }
}

#[fixture]
fn user() -> Value {
    json!({
        "name": "Chidi",
        "email": "chidi@example.com",
        "address": {"street": "12 Allen Avenue", "city": "Ikeja", "zip": "100271"}
    })
}

#[rstest]
#[case("/items/?name=pen&category=office&price=10", json!({"name": "pen", "category": "office", "price": 10}))]
#[case("/items/?name=pen&category=office&price=10.5", json!({"name": "pen", "category": "office", "price": 10.5}))]
#[case("/search/?page=1", json!({"query": "Diligwe", "size": null, "page": 1}))]
#[case("/search/?page=4&size=25&query=yam", json!({"query": "yam", "size": 25, "page": 4}))]
#[case("/validate/?username=abc", json!("abc"))]
#[actix_web::test]
async fn query_endpoints_echo_valid_input(#[case] uri: &str, #[case] expected: Value) {
    let reply = send(TestRequest::get().uri(uri)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, expected);
    assert!(reply.trace_id.is_some());
}

#[rstest]
#[case("/items/?name=pen&category=office&price=ten")]
#[case("/search/?size=2")]
#[case("/validate/?username=ab")]
#[case("/validate/?username=abc!")]
#[actix_web::test]
async fn query_endpoints_reject_invalid_input(#[case] uri: &str) {
    let reply = send(TestRequest::get().uri(uri)).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let error: Error = serde_json::from_value(reply.body).expect("error envelope");
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.trace_id(), reply.trace_id.as_deref());
    assert!(error.trace_id().is_some());
}

#[rstest]
#[actix_web::test]
async fn users_echo_well_formed_records(user: Value) {
    let reply = send(TestRequest::post().uri("/users/").set_json(&user)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({ "user": user }));
}

#[rstest]
#[actix_web::test]
async fn users_reject_bad_email(mut user: Value) {
    user["email"] = json!("chidi.example.com");
    let reply = send(TestRequest::post().uri("/users/").set_json(&user)).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["details"]["violations"][0]["field"], "email");
    assert_eq!(reply.body["traceId"].as_str(), reply.trace_id.as_deref());
}

#[rstest]
#[actix_web::test]
async fn users_reject_empty_body() {
    let reply = send(TestRequest::post().uri("/users/")).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["details"]["violations"][0]["code"], "missing_body");
}

#[rstest]
#[actix_web::test]
async fn users_reject_oversized_body(mut user: Value) {
    user["name"] = json!("n".repeat(2048));
    let reply = send(TestRequest::post().uri("/users/").set_json(&user)).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply.body["code"], "payload_too_large");
    assert!(reply.trace_id.is_some());
}

#[rstest]
#[case(2024, StatusCode::OK)]
#[case(2023, StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn reports_enforce_start_date_floor(#[case] start_date: i64, #[case] expected: StatusCode) {
    let reply = send(
        TestRequest::post()
            .uri(&format!("/reports/5?start_date={start_date}&end_date=2025"))
            .set_json(json!({"title": "Harvest", "content": "Yields rose."})),
    )
    .await;
    assert_eq!(reply.status, expected);
    if expected == StatusCode::OK {
        assert_eq!(
            reply.body,
            json!({
                "Path Parameter": 5,
                "Query Parameters": {"start_date": 2024, "end_date": 2025},
                "Request Body": {"title": "Harvest", "content": "Yields rose."}
            })
        );
    }
}

#[rstest]
#[case(TestRequest::get().uri("/missing"))]
#[case(TestRequest::get().uri("/items/extra"))]
#[case(TestRequest::get().uri("/reports/5/"))]
#[actix_web::test]
async fn unmatched_routes_return_not_found_envelope(#[case] req: TestRequest) {
    let reply = send(req).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["code"], "not_found");
    assert_eq!(reply.body["traceId"].as_str(), reply.trace_id.as_deref());
}

#[rstest]
#[case(TestRequest::post().uri("/items/"), "GET")]
#[case(TestRequest::delete().uri("/search/"), "GET")]
#[case(TestRequest::get().uri("/users/"), "POST")]
#[case(TestRequest::put().uri("/validate/"), "GET")]
#[case(TestRequest::get().uri("/reports/5"), "POST")]
#[actix_web::test]
async fn wrong_method_returns_method_not_allowed(#[case] req: TestRequest, #[case] allow: &str) {
    let app = test::init_service(App::new().wrap(Trace).configure(configure)).await;
    let res = test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        res.headers()
            .get(header::ALLOW)
            .and_then(|value| value.to_str().ok()),
        Some(allow)
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "method_not_allowed");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case(TestRequest::get().uri("/items?name=pen"), "/items/?name=pen")]
#[case(TestRequest::get().uri("/search"), "/search/")]
#[case(TestRequest::post().uri("/users"), "/users/")]
#[actix_web::test]
async fn missing_trailing_slash_redirects(#[case] req: TestRequest, #[case] location: &str) {
    let app = test::init_service(App::new().wrap(Trace).configure(configure)).await;
    let res = test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(location)
    );
}
