//! Integration tests for the webhook HTTP endpoint.
//!
//! These tests drive the full router end to end:
//! 1. Version headers select the dialect
//! 2. Dialog state survives a round trip through the conversation token
//! 3. Protocol violations are reported without failing the turn

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use assistant_webhook::adapters::http::{
    webhook_router, FulfillmentHandler, HttpConversation, WebhookAppState,
};
use assistant_webhook::adapters::RecordingErrorSink;
use assistant_webhook::application::SessionStartHook;
use assistant_webhook::domain::conversation::{
    ApiVersion, DialogState, Permission, State, StandardIntent, ACTIONS_API_VERSION_HEADER,
};
use assistant_webhook::domain::foundation::ErrorCode;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Counts guesses across turns and asks for permission on request.
struct GuessingGame;

#[async_trait]
impl FulfillmentHandler for GuessingGame {
    async fn handle(&self, conversation: &mut HttpConversation) {
        match conversation.standard_intent() {
            Some(StandardIntent::Main) => {
                conversation.set_state("AWAIT_NUM");
                conversation.set_data(json!({ "tries": 0 }));
                conversation.ask("Pick a number", None);
            }
            Some(StandardIntent::Permission) => {
                let reply = if conversation.is_permission_granted() {
                    "Thanks!"
                } else {
                    "No problem."
                };
                conversation.tell(reply);
            }
            _ => {
                let query = conversation.raw_input().map(str::to_string);
                match query.as_deref() {
                    Some("name please") => {
                        conversation.ask_for_permission(
                            "To greet you",
                            Permission::Name,
                            None,
                        );
                    }
                    Some("bye") => {
                        conversation.tell("Goodbye!");
                    }
                    _ => {
                        let tries = conversation.data()["tries"].as_i64().unwrap_or(0) + 1;
                        if let Some(data) = conversation.data_mut().as_object_mut() {
                            data.insert("tries".to_string(), json!(tries));
                        }
                        conversation.ask("<speak>Try again</speak>", None);
                    }
                }
            }
        }
    }

    fn session_start_hook(&self) -> Option<SessionStartHook> {
        Some(Box::new(|state: &mut DialogState| {
            state.data = json!({ "welcomed": true });
            Ok(())
        }))
    }
}

fn app(sink: Arc<RecordingErrorSink>) -> Router {
    let state = WebhookAppState::new(Arc::new(GuessingGame), sink, ApiVersion::new(1));
    webhook_router("/webhook", state, Duration::from_secs(5))
}

async fn post(app: Router, version: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(version) = version {
        request = request.header(ACTIONS_API_VERSION_HEADER, version);
    }
    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn token_of(response: &Value) -> Value {
    let token = response["conversationToken"].as_str().unwrap();
    serde_json::from_str(token).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn first_turn_asks_and_stores_state() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "conversation": {"conversationId": "c-1", "type": "NEW"},
        "inputs": [{"intent": "actions.intent.MAIN", "rawInputs": [{"query": "talk to the game"}]}]
    });

    let (status, response) = post(app(sink.clone()), Some("2"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["expectUserResponse"], json!(true));
    assert!(response.get("finalResponse").is_none());
    assert_eq!(
        response["expectedInputs"][0]["possibleIntents"],
        json!([{"intent": "actions.intent.TEXT"}])
    );
    assert_eq!(
        response["expectedInputs"][0]["inputPrompt"]["initialPrompts"],
        json!([{"textToSpeech": "Pick a number"}])
    );
    assert_eq!(
        token_of(&response),
        json!({"state": "AWAIT_NUM", "data": {"tries": 0}})
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn token_round_trips_into_next_turn() {
    let sink = Arc::new(RecordingErrorSink::new());
    let first = json!({
        "conversation": {"type": "NEW"},
        "inputs": [{"intent": "actions.intent.MAIN"}]
    });
    let (_, response) = post(app(sink.clone()), Some("2"), first).await;
    let token = response["conversationToken"].clone();

    let second = json!({
        "conversation": {"type": "ACTIVE", "conversationToken": token},
        "inputs": [{"intent": "actions.intent.TEXT", "rawInputs": [{"query": "5"}]}]
    });
    let (status, response) = post(app(sink.clone()), Some("2"), second).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        token_of(&response),
        json!({"state": "AWAIT_NUM", "data": {"tries": 1}})
    );
    assert_eq!(
        response["expectedInputs"][0]["inputPrompt"]["initialPrompts"],
        json!([{"ssml": "<speak>Try again</speak>"}])
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn session_start_hook_seeds_new_conversation() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "conversation": {"type": 1},
        "inputs": [{"intent": "assistant.intent.action.TEXT", "raw_inputs": [{"query": "7"}]}]
    });

    let (_, response) = post(app(sink.clone()), None, body).await;

    assert_eq!(
        token_of(&response),
        json!({"data": {"welcomed": true, "tries": 1}})
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn tell_ends_conversation() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "conversation": {"type": "ACTIVE", "conversationToken": "{\"state\":\"AWAIT_NUM\",\"data\":{}}"},
        "inputs": [{"intent": "actions.intent.TEXT", "rawInputs": [{"query": "bye"}]}]
    });

    let (status, response) = post(app(sink.clone()), Some("2"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "expectUserResponse": false,
            "finalResponse": {"speechResponse": {"textToSpeech": "Goodbye!"}}
        })
    );
}

#[tokio::test]
async fn legacy_permission_request_uses_value_spec() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "conversation": {"conversation_id": "c-9", "type": 2},
        "inputs": [{"intent": "assistant.intent.action.TEXT", "raw_inputs": [{"query": "name please"}]}]
    });

    let (_, response) = post(app(sink.clone()), None, body).await;

    let intent = &response["expectedInputs"][0]["possibleIntents"][0];
    assert_eq!(intent["intent"], json!("assistant.intent.action.PERMISSION"));
    assert_eq!(
        intent["inputValueSpec"],
        json!({"permissionValueSpec": {"optContext": "To greet you", "permissions": ["NAME"]}})
    );
    assert!(intent.get("inputValueData").is_none());
    assert_eq!(
        response["expectedInputs"][0]["inputPrompt"]["initialPrompts"],
        json!([{"textToSpeech": "PLACEHOLDER_FOR_PERMISSION"}])
    );
}

#[tokio::test]
async fn current_permission_request_uses_typed_value_data() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "inputs": [{"intent": "actions.intent.TEXT", "rawInputs": [{"query": "name please"}]}]
    });

    let (_, response) = post(app(sink.clone()), Some("v2"), body).await;

    let intent = &response["expectedInputs"][0]["possibleIntents"][0];
    assert_eq!(intent["intent"], json!("actions.intent.PERMISSION"));
    assert_eq!(
        intent["inputValueData"],
        json!({
            "@type": "type.googleapis.com/google.actions.v2.PermissionValueSpec",
            "optContext": "To greet you",
            "permissions": ["NAME"]
        })
    );
}

#[tokio::test]
async fn permission_answer_reads_granted_flag() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "inputs": [{
            "intent": "actions.intent.PERMISSION",
            "arguments": [{"name": "PERMISSION", "textValue": "true"}]
        }]
    });

    let (_, response) = post(app(sink.clone()), Some("2"), body).await;

    assert_eq!(
        response["finalResponse"]["speechResponse"]["textToSpeech"],
        json!("Thanks!")
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn malformed_token_degrades_to_empty_state() {
    let sink = Arc::new(RecordingErrorSink::new());
    let body = json!({
        "conversation": {"type": "ACTIVE", "conversationToken": "not json"},
        "inputs": [{"intent": "actions.intent.TEXT", "rawInputs": [{"query": "3"}]}]
    });

    let (status, response) = post(app(sink.clone()), Some("2"), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(token_of(&response), json!({"data": {"tries": 1}}));
    assert_eq!(sink.codes(), vec![ErrorCode::MalformedDialogStateToken]);
}

#[tokio::test]
async fn missing_inputs_are_reported_but_turn_completes() {
    let sink = Arc::new(RecordingErrorSink::new());

    let (status, response) = post(app(sink.clone()), Some("2"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["expectUserResponse"], json!(true));
    assert_eq!(
        sink.codes(),
        vec![ErrorCode::MissingInputs, ErrorCode::MissingInputs]
    );
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let sink = Arc::new(RecordingErrorSink::new());
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from("<xml/>"))
        .unwrap();

    let response = app(sink).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn named_and_plain_states_compare_by_name() {
    #[derive(Debug)]
    struct AwaitNum;

    impl assistant_webhook::domain::conversation::NamedState for AwaitNum {
        fn name(&self) -> &str {
            "AWAIT_NUM"
        }
    }

    assert_eq!(State::named(AwaitNum), State::plain("AWAIT_NUM"));
}
