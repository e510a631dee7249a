use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cek_dice::kernel::dispatch::{DialogueConfig, Dispatcher};
use cek_dice::kernel::random::ScriptedRandom;
use cek_dice::kernel::template::ResponseTemplates;
use cek_dice::server::{build_router, AppState};
use cek_dice::services::verifier::ExtensionIdVerifier;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const APP_ID: &str = "com.example.dice";

fn app(script: Vec<u32>) -> Router {
    let config = DialogueConfig {
        base_audio_url: "https://dice.example.com".to_string(),
        ..DialogueConfig::default()
    };
    let templates = ResponseTemplates::from_value(&json!({ "": ["fallback"] })).unwrap();
    let dispatcher = Dispatcher::with_random(
        config,
        Arc::new(templates),
        Arc::new(ScriptedRandom::new(script)),
    );
    let verifier = ExtensionIdVerifier::new(Some(APP_ID.to_string()));
    build_router(
        AppState::new(dispatcher, verifier),
        std::env::temp_dir().join("cek-dice-no-such-public-dir"),
    )
}

fn cek_body(request: Value) -> Value {
    json!({
        "version": "0.1.0",
        "session": { "new": true, "sessionId": "session-1", "sessionAttributes": {}, "user": { "userId": "u" } },
        "context": { "System": { "application": { "applicationId": APP_ID } } },
        "request": request
    })
}

async fn post(app: Router, signature: Option<&str>, body: String) -> (StatusCode, Value) {
    let mut req = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        req = req.header("SignatureCEK", sig);
    }

    let resp = app.oneshot(req.body(Body::from(body)).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn launch_request_round_trip() {
    let body = cek_body(json!({ "type": "LaunchRequest" })).to_string();
    let (status, json) = post(app(vec![]), Some("sig"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "version": "0.1.0",
            "sessionAttributes": {},
            "response": {
                "outputSpeech": {
                    "type": "SimpleSpeech",
                    "values": { "type": "PlainText", "lang": "ja", "value": "こんにちは．" }
                },
                "card": {},
                "directives": [],
                "shouldEndSession": false
            }
        })
    );
}

#[tokio::test]
async fn dice_request_returns_speech_list() {
    let body = cek_body(json!({
        "type": "IntentRequest",
        "intent": {
            "name": "ThrowDiceIntent",
            "slots": { "diceCount": { "name": "diceCount", "value": "2" } }
        }
    }))
    .to_string();
    let (status, json) = post(app(vec![1, 6]), Some("sig"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"]["shouldEndSession"], json!(false));
    assert_eq!(json["response"]["outputSpeech"]["type"], json!("SpeechList"));
    assert_eq!(
        json["response"]["outputSpeech"]["values"],
        json!([
            { "type": "PlainText", "lang": "ja", "value": "サイコロを 2個 投げます。" },
            { "type": "URL", "lang": "ja", "value": "https://dice.example.com/rolling_dice_sound.mp3" },
            { "type": "PlainText", "lang": "ja", "value": "結果は 1, 6 で、合計 7 です。" }
        ])
    );
}

#[tokio::test]
async fn session_ended_request_closes_session() {
    let body = cek_body(json!({ "type": "SessionEndedRequest" })).to_string();
    let (status, json) = post(app(vec![]), Some("sig"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"]["shouldEndSession"], json!(true));
    assert_eq!(json["sessionAttributes"], json!({}));
    assert_eq!(
        json["response"]["outputSpeech"]["values"]["value"],
        json!("サイコロを終了します。")
    );
}

#[tokio::test]
async fn unknown_request_type_yields_empty_response() {
    let body = cek_body(json!({ "type": "EventRequest" })).to_string();
    let (status, json) = post(app(vec![]), Some("sig"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"]["outputSpeech"], json!({}));
    assert_eq!(json["response"]["shouldEndSession"], json!(true));
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let body = cek_body(json!({ "type": "LaunchRequest" })).to_string();
    let (status, json) = post(app(vec![]), None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!("missing SignatureCEK header"));
}

#[tokio::test]
async fn foreign_application_is_rejected() {
    let mut body = cek_body(json!({ "type": "LaunchRequest" }));
    body["context"]["System"]["application"]["applicationId"] = json!("com.other");
    let (status, json) = post(app(vec![]), Some("sig"), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("com.other"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, json) = post(app(vec![]), Some("sig"), "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("malformed request body"));
}

#[tokio::test]
async fn other_paths_fall_through_to_static_files() {
    let resp = app(vec![])
        .oneshot(
            Request::builder()
                .uri("/rolling_dice_sound.mp3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
