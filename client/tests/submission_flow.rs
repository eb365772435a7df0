mod common;

use common::{refused_url, sample_fields, StubService};
use risk_client::{
    build_payload, HttpTransport, PredictionResult, SubmissionController, SubmissionState,
    ValidationError, FAILURE_MESSAGE,
};
use risk_client::render::render;
use serde_json::{json, Value};

fn failed() -> SubmissionState {
    SubmissionState::Failed(FAILURE_MESSAGE.to_string())
}

#[actix_web::test]
async fn posts_payload_and_renders_prediction() {
    let stub = StubService::start(200, r#"{"prediction":"low risk"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));

    let pending = controller.submit(build_payload(&sample_fields()));
    assert!(controller.state().is_submitting());
    let state = pending.await;

    assert_eq!(
        state,
        SubmissionState::Succeeded(PredictionResult {
            prediction: "low risk".to_string()
        })
    );
    assert_eq!(render(&state), "Predicted Risk Level: low risk");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(
        body,
        json!({
            "Age": 30.0,
            "SystolicBP": 120.0,
            "DiastolicBP": 80.0,
            "HeartRate": 70.0,
            "BodyTemp": 98.6,
            "BS": 7.0
        })
    );

    stub.stop().await;
}

#[actix_web::test]
async fn server_error_shows_fixed_message_only() {
    let stub = StubService::start(500, r#"{"error":"model exploded"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));

    let state = controller.submit(build_payload(&sample_fields())).await;
    assert_eq!(state, failed());

    let shown = render(&state);
    assert!(shown.contains(FAILURE_MESSAGE));
    assert!(!shown.contains("500"));
    assert!(!shown.contains("exploded"));

    stub.stop().await;
}

#[actix_web::test]
async fn bad_request_with_prediction_body_still_fails() {
    let stub = StubService::start(400, r#"{"prediction":"low risk"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));

    assert_eq!(controller.submit(build_payload(&sample_fields())).await, failed());

    stub.stop().await;
}

#[actix_web::test]
async fn success_status_with_unparsable_body_fails() {
    let stub = StubService::start(200, "<html>oops</html>");
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));

    assert_eq!(controller.submit(build_payload(&sample_fields())).await, failed());

    stub.stop().await;
}

#[actix_web::test]
async fn success_status_without_prediction_field_fails() {
    let stub = StubService::start(200, r#"{"error":"No input data provided"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));

    assert_eq!(controller.submit(build_payload(&sample_fields())).await, failed());

    stub.stop().await;
}

#[actix_web::test]
async fn connection_refused_fails() {
    let controller = SubmissionController::new(HttpTransport::new(&refused_url()));

    let pending = controller.submit(build_payload(&sample_fields()));
    assert!(controller.state().is_submitting());
    assert_eq!(pending.await, failed());
    assert!(!controller.state().is_submitting());
}

#[actix_web::test]
async fn repeated_submission_gives_same_state() {
    let stub = StubService::start(200, r#"{"prediction":"mid risk"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));
    let payload = build_payload(&sample_fields());

    let first = controller.submit(payload).await;
    let second = controller.submit(payload).await;

    assert_eq!(first, second);
    assert_eq!(stub.requests().len(), 2);

    stub.stop().await;
}

#[actix_web::test]
async fn lenient_payload_sends_null_for_unparsable_field() {
    let stub = StubService::start(200, r#"{"prediction":"high risk"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));
    let mut fields = sample_fields();
    fields.body_temp = "warm".to_string();

    controller.submit(build_payload(&fields)).await;

    let body: Value = serde_json::from_str(&stub.requests()[0].body).expect("json body");
    assert!(body["BodyTemp"].is_null());

    stub.stop().await;
}

#[actix_web::test]
async fn validated_form_with_bad_input_sends_nothing() {
    let stub = StubService::start(200, r#"{"prediction":"low risk"}"#);
    let controller = SubmissionController::new(HttpTransport::new(&stub.url));
    let mut fields = sample_fields();
    fields.age = "thirty".to_string();

    let state = controller.submit_form(&fields).await;

    assert_eq!(
        state,
        SubmissionState::Invalid(ValidationError::NotANumber { field: "Age" })
    );
    assert!(stub.requests().is_empty());

    stub.stop().await;
}
