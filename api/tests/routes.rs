use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use intake_api::{build_router, ApiConfig, ApiState, LeadResponse, Location};
use intake_core::FixedClock;
use serde_json::json;
use std::sync::Arc;

fn server() -> TestServer {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let state = ApiState::new(ApiConfig::default()).with_clock(Arc::new(FixedClock(today)));
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = server().get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["booking"]["today"], "2026-10-19");
    assert_eq!(body["booking"]["earliest_express"], "2026-12-01");
    assert_eq!(body["booking"]["earliest_standard"], "2027-02-09");
    assert_eq!(body["booking"]["max_attachments"], 5);
}

#[tokio::test]
async fn test_openapi_document() {
    let response = server().get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/api/lead").is_some());
    assert!(body["paths"].get("/api/public/locations").is_some());
}

#[tokio::test]
async fn test_locations_are_cacheable() {
    let response = server().get("/api/public/locations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("cache-control"),
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    let locations: Vec<Location> = response.json();
    let cities: Vec<_> = locations.iter().map(|l| l.city.as_str()).collect();
    assert_eq!(cities, ["Warszawa", "Gdańsk"]);
}

#[tokio::test]
async fn test_lead_json_accepted() {
    let response = server()
        .post("/api/lead")
        .json(&json!({
            "construction_type": "classic-warm",
            "name": "Jan Kowalski",
            "email": "jan@x.pl",
            "phone": "123 456 789",
            "postal_code": "44-151",
            "city": "Gliwice",
            "preferred_date": "2027-03-01",
            "attachments": [
                { "name": "rzut.pdf", "mime_type": "application/pdf", "size_bytes": 2048 }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<LeadResponse>(), LeadResponse::success());
}

#[tokio::test]
async fn test_lead_missing_phone() {
    let response = server()
        .post("/api/lead")
        .json(&json!({ "name": "Jan" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: LeadResponse = response.json();
    assert!(!body.ok);
    assert_eq!(body.message.as_deref(), Some("Wpisz imię i telefon."));
}

#[tokio::test]
async fn test_lead_honeypot_silently_succeeds() {
    let response = server()
        .post("/api/lead")
        .json(&json!({ "company": "Spam Sp. z o.o." }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<LeadResponse>().ok);
}

#[tokio::test]
async fn test_lead_field_errors() {
    let response = server()
        .post("/api/lead")
        .json(&json!({
            "name": "Jan",
            "phone": "12345",
            "preferred_date": "2026-10-19"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: LeadResponse = response.json();
    assert!(body.errors.contains_key("phone"));
    assert!(body.errors.contains_key("preferred_date"));
}

#[tokio::test]
async fn test_lead_urlencoded() {
    let response = server()
        .post("/api/lead")
        .form(&[("name", "Jan"), ("phone", "123456789"), ("postalCode", "44-151")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_lead_multipart() {
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"name\"\r\n\r\n\
         Jan Kowalski\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"phone\"\r\n\r\n\
         123456789\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"company\"\r\n\r\n\
         \r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"ogrod.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         JPEGDATA\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let response = server()
        .post("/api/lead")
        .bytes(Bytes::from(body))
        .content_type(&format!("multipart/form-data; boundary={boundary}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<LeadResponse>().ok);
}

#[tokio::test]
async fn test_lead_multipart_honeypot() {
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"company\"\r\n\r\n\
         bot\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let response = server()
        .post("/api/lead")
        .bytes(Bytes::from(body))
        .content_type(&format!("multipart/form-data; boundary={boundary}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_lead_unsupported_content_type() {
    let response = server()
        .post("/api/lead")
        .text("name=Jan")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!response.json::<LeadResponse>().ok);
}

#[tokio::test]
async fn test_lead_malformed_json() {
    let response = server()
        .post("/api/lead")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

fn multipart_with_file(boundary: &str, file_name: &str, mime_type: &str, size: usize) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"name\"\r\n\r\n\
         Jan Kowalski\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"phone\"\r\n\r\n\
         123456789\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\n\
         Content-Type: {mime_type}\r\n\r\n",
        b = boundary
    )
    .into_bytes();
    body.extend(std::iter::repeat(b'%').take(size));
    body.extend(format!("\r\n--{boundary}--\r\n").into_bytes());
    body
}

#[tokio::test]
async fn test_lead_multipart_large_attachment_accepted() {
    let boundary = "XBOUNDARYX";
    let body = multipart_with_file(boundary, "projekt.pdf", "application/pdf", 3 * 1024 * 1024);

    let response = server()
        .post("/api/lead")
        .bytes(Bytes::from(body))
        .content_type(&format!("multipart/form-data; boundary={boundary}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<LeadResponse>().ok);
}

#[tokio::test]
async fn test_lead_body_over_limit() {
    let mut config = ApiConfig::default();
    config.attachments.max_files = 1;
    config.attachments.max_file_size = 1024;
    let limit = config.body_limit();
    let server = TestServer::new(build_router(ApiState::new(config))).unwrap();

    let boundary = "XBOUNDARYX";
    let body = multipart_with_file(boundary, "projekt.pdf", "application/pdf", limit + 1);

    let response = server
        .post("/api/lead")
        .bytes(Bytes::from(body))
        .content_type(&format!("multipart/form-data; boundary={boundary}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!response.json::<LeadResponse>().ok);
}
