//! Tests for the Twilio REST client against a mock HTTP server.

use caller_id_router::config::ProviderConfig;
use caller_id_router::error::ProviderError;
use caller_id_router::provider::{CallInstructions, OutboundCall, TelephonyProvider, TwilioClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLS_PATH: &str = "/2010-04-01/Accounts/AC_test/Calls.json";

fn client(server: &MockServer, timeout_secs: u64) -> TwilioClient {
    TwilioClient::new(&ProviderConfig {
        account_sid: "AC_test".to_string(),
        auth_token: "auth_test".to_string(),
        api_base: server.uri(),
        request_timeout_secs: timeout_secs,
        ..Default::default()
    })
    .expect("client")
}

fn outbound(instructions: CallInstructions) -> OutboundCall {
    OutboundCall {
        to: "+447700900123".to_string(),
        from: "+15550001111".to_string(),
        instructions,
        status_callback: "https://calls.example.com/call-status".to_string(),
    }
}

#[tokio::test]
async fn test_create_call_with_inline_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .and(header_exists("authorization"))
        .and(body_string_contains("To=%2B447700900123"))
        .and(body_string_contains("From=%2B15550001111"))
        .and(body_string_contains("Twiml=%3CResponse%3E"))
        .and(body_string_contains("StatusCallbackEvent=completed"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "CA42",
            "status": "queued",
            "to": "+447700900123",
            "from": "+15550001111",
            "duration": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server, 5)
        .create_call(&outbound(CallInstructions::Twiml(
            "<Response></Response>".to_string(),
        )))
        .await
        .unwrap();

    assert_eq!(record.id, "CA42");
    assert_eq!(record.status, "queued");
    assert_eq!(record.duration_seconds, None);
}

#[tokio::test]
async fn test_create_call_with_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .and(body_string_contains(
            "Url=https%3A%2F%2Fcalls.example.com%2Ftwiml%2Fconnect",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "CA43",
            "status": "queued",
            "to": "+447700900123",
            "from": "+15550001111"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server, 5)
        .create_call(&outbound(CallInstructions::Url(
            "https://calls.example.com/twiml/connect".to_string(),
        )))
        .await
        .unwrap();

    assert_eq!(record.id, "CA43");
}

#[tokio::test]
async fn test_create_call_provider_error_is_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 21_211,
            "message": "The 'To' number +4477 is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211",
            "status": 400
        })))
        .mount(&server)
        .await;

    let err = client(&server, 5)
        .create_call(&outbound(CallInstructions::Twiml(String::new())))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(21_211));
            assert_eq!(message, "The 'To' number +4477 is not a valid phone number.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client(&server, 5)
        .create_call(&outbound(CallInstructions::Twiml(String::new())))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "upstream unavailable");
    assert_eq!(err.code(), 6003);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .set_delay(std::time::Duration::from_secs(3))
                .set_body_json(json!({"sid": "CA1", "status": "queued"})),
        )
        .mount(&server)
        .await;

    let err = client(&server, 1)
        .create_call(&outbound(CallInstructions::Twiml(String::new())))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC_test/Calls/CA42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "CA42",
            "status": "completed",
            "to": "+447700900123",
            "from": "+15550001111",
            "duration": "61"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server, 5).fetch_call("CA42").await.unwrap();
    assert_eq!(record.status, "completed");
    assert_eq!(record.duration_seconds, Some(61));
}
