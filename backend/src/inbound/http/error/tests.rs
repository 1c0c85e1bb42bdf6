//! Tests for HTTP error rendering.

use super::*;
use crate::domain::Error;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, ResponseError, web};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("please sign in"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("title taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

async fn render(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error payload deserialises");
    (status, header, body)
}

#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "Internal server error");
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none());
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("title taken")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "code": "duplicate_title" }));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "title taken");
    assert_eq!(body.details(), Some(&json!({ "code": "duplicate_title" })));
}

#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let (_, header, body) = render(Error::not_found("missing")).await;

    assert!(header.is_none());
    assert!(body.trace_id().is_none());
}

#[derive(Deserialize)]
struct Probe {
    #[serde(rename = "count")]
    _count: u32,
}

#[actix_web::test]
async fn malformed_json_bodies_become_invalid_request_payloads() {
    let app = actix_web::test::init_service(App::new().app_data(json_config()).route(
        "/probe",
        web::post().to(|_: web::Json<Probe>| async { actix_web::HttpResponse::Ok() }),
    ))
    .await;

    let res = actix_web::test::call_service(
        &app,
        actix_web::test::TestRequest::post()
            .uri("/probe")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"count\": \"many\"}")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_web::test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        body.details().and_then(|details| details.get("source")),
        Some(&json!("body"))
    );
}

#[actix_web::test]
async fn unparsable_path_segments_become_invalid_request_payloads() {
    let app = actix_web::test::init_service(App::new().app_data(path_config()).route(
        "/items/{id}",
        web::get().to(|_: web::Path<i32>| async { actix_web::HttpResponse::Ok() }),
    ))
    .await;

    let res = actix_web::test::call_service(
        &app,
        actix_web::test::TestRequest::get().uri("/items/abc").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_web::test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}
