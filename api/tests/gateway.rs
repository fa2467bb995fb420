use chrono::NaiveDate;
use intake_api::{build_router, ApiConfig, ApiState};
use intake_core::infrastructure::HttpLeadGateway;
use intake_core::{AttachmentSummary, ConstructionType, FixedClock, InquiryDraft, LeadGateway};
use std::sync::Arc;

async fn spawn_api() -> String {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let state = ApiState::new(ApiConfig::default()).with_clock(Arc::new(FixedClock(today)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn draft() -> InquiryDraft {
    InquiryDraft {
        construction_type: Some(ConstructionType::HomeExtension),
        name: "Jan Kowalski".into(),
        email: "jan@x.pl".into(),
        phone: "123 456 789".into(),
        postal_code: "44-151".into(),
        city: "Gliwice".into(),
        preferred_date: NaiveDate::from_ymd_opt(2027, 3, 1),
        attachments: vec![AttachmentSummary {
            name: "rzut.pdf".into(),
            mime_type: "application/pdf".into(),
            size_bytes: 4096,
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_gateway_submits_to_api() {
    let gateway = HttpLeadGateway::new(spawn_api().await).unwrap();
    let receipt = gateway.submit(&draft()).await.unwrap();
    assert!(receipt.ok);
}

#[tokio::test]
async fn test_gateway_surfaces_field_errors() {
    let gateway = HttpLeadGateway::new(spawn_api().await).unwrap();
    let mut draft = draft();
    draft.preferred_date = NaiveDate::from_ymd_opt(2026, 11, 2);

    let receipt = gateway.submit(&draft).await.unwrap();
    assert!(!receipt.ok);
    assert!(receipt.errors.contains_key("preferred_date"));
}

#[tokio::test]
async fn test_gateway_missing_required() {
    let gateway = HttpLeadGateway::new(spawn_api().await).unwrap();
    let receipt = gateway.submit(&InquiryDraft::default()).await.unwrap();
    assert!(!receipt.ok);
    assert_eq!(receipt.message.as_deref(), Some("Wpisz imię i telefon."));
}
