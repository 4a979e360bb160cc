//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, ResponseError, test as actix_test, web};
use rstest::rstest;
use serde::Deserialize;

async fn body_of(error: &Error) -> (StatusCode, ErrorBody) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body deserialises");
    (status, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::malformed_date("bad date"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_message() {
    let (status, body) = body_of(&Error::invalid_request(
        "Birth date must be earlier than current date",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.error_message,
        "Birth date must be earlier than current date"
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let (status, body) = body_of(&Error::internal("user repository query failed: syntax")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error_message, INTERNAL_ERROR_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn envelope_uses_camel_case_key() {
    let response = ResponseError::error_response(&Error::not_found("gone"));
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

    assert_eq!(value, serde_json::json!({ "errorMessage": "gone" }));
}

#[derive(Deserialize)]
struct Range {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    from: String,
}

#[derive(Deserialize)]
struct Payload {
    name: String,
}

#[rstest]
#[case::missing_query("/q", StatusCode::BAD_REQUEST)]
#[case::bad_path("/p/abc", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn extractor_failures_use_the_envelope(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(
        App::new().service(
            web::scope("")
                .configure(configure_extractors)
                .route(
                    "/q",
                    web::get().to(|_: web::Query<Range>| async { HttpResponse::Ok().finish() }),
                )
                .route(
                    "/p/{id}",
                    web::get().to(|_: web::Path<i64>| async { HttpResponse::Ok().finish() }),
                ),
        ),
    )
    .await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), expected);
    let body: ErrorBody = actix_test::read_body_json(response).await;
    assert!(!body.error_message.is_empty());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_envelope() {
    let app = actix_test::init_service(
        App::new().service(web::scope("").configure(configure_extractors).route(
            "/j",
            web::post().to(|payload: web::Json<Payload>| async move {
                HttpResponse::Ok().body(payload.into_inner().name)
            }),
        )),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/j")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = actix_test::read_body_json(response).await;
    assert!(body.error_message.starts_with("Request body is not valid"));
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8(bytes).expect("utf8 log output")
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[rstest]
#[case(Error::not_found("missing"))]
#[case(Error::internal("boom"))]
#[tokio::test]
async fn failure_events_carry_the_request_trace_id(#[case] error: Error) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let trace_id: TraceId = "6c1f7a52-3d0e-4b8c-9a41-0f2e5d7b8c93"
        .parse()
        .expect("valid trace id");

    TraceId::scope(trace_id, async { error.error_response() }).await;

    assert!(logs.contents().contains("6c1f7a52-3d0e-4b8c-9a41-0f2e5d7b8c93"));
}
