//! Tests for the user creation handler.

use super::*;
use crate::domain::{Address, ErrorCode};
use actix_web::{App, http::StatusCode, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn valid_payload() -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "address": {"street": "1 Main Street", "city": "Lagos", "zip": "100001"}
    })
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(create_user)
}

async fn post_body(body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/users/")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[rstest]
#[actix_web::test]
async fn echoes_valid_user_unchanged(valid_payload: Value) {
    let (status, body) = post_body(valid_payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user": valid_payload }));

    let created: CreatedUser = serde_json::from_value(body).expect("response matches schema");
    assert_eq!(
        created.user.address,
        Address {
            street: "1 Main Street".into(),
            city: "Lagos".into(),
            zip: "100001".into(),
        }
    );
}

#[rstest]
#[actix_web::test]
async fn email_without_at_is_rejected(mut valid_payload: Value) {
    valid_payload["email"] = json!("ada.example.com");
    let (status, body) = post_body(valid_payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Error = serde_json::from_value(body).expect("error envelope");
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.message(), "email must be a valid email address");
    assert_eq!(
        error.details(),
        Some(&json!({"violations": [{
            "location": "body",
            "field": "email",
            "code": "email",
            "message": "email must be a valid email address",
            "value": "ada.example.com"
        }]}))
    );
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("address")]
#[actix_web::test]
async fn missing_required_field_is_rejected(mut valid_payload: Value, #[case] field: &str) {
    if let Some(object) = valid_payload.as_object_mut() {
        object.remove(field);
    }
    let (status, body) = post_body(valid_payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["violations"][0]["code"], "missing_field");
    assert_eq!(body["details"]["violations"][0]["field"], field);
    assert_eq!(body["message"], format!("{field} is required"));
}

#[rstest]
#[case("street")]
#[case("zip")]
#[actix_web::test]
async fn missing_nested_field_reports_dotted_path(mut valid_payload: Value, #[case] field: &str) {
    if let Some(address) = valid_payload["address"].as_object_mut() {
        address.remove(field);
    }
    let (status, body) = post_body(valid_payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violation = &body["details"]["violations"][0];
    assert_eq!(violation["location"], "body");
    assert_eq!(violation["field"], format!("address.{field}"));
    assert_eq!(violation["code"], "missing_field");
    assert_eq!(violation["message"], format!("address.{field} is required"));
}

#[rstest]
#[actix_web::test]
async fn wrong_nested_type_is_rejected(mut valid_payload: Value) {
    valid_payload["address"]["zip"] = json!(100001);
    let (status, body) = post_body(valid_payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["violations"][0]["code"], "json_type");
    assert_eq!(body["details"]["violations"][0]["field"], "address.zip");
}
